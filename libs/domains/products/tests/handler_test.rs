//! Handler tests for Products domain
//!
//! These drive the products router directly against the in-memory
//! repository:
//! - Request deserialization and validation
//! - Response shaping (`buyingPrice` never leaves the service)
//! - HTTP status codes and the `Location` header
//! - Error bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// POST a product and return the id from its `Location` header.
async fn create(app: &Router, payload: Value) -> i32 {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    location.rsplit('/').next().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_list_empty() {
    let response = app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Value> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_create_returns_201_with_location_and_no_body() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Laptop", "price": 1200, "buyingPrice": 800 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/1");
    assert!(body_bytes(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_create_then_read_hides_buying_price() {
    let app = app();
    let id = create(
        &app,
        json!({ "name": "Laptop", "price": 1200, "buyingPrice": 800 }),
    )
    .await;

    let response = app.oneshot(get(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "id": id, "name": "Laptop", "price": 1200 }));
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = app();
    let id = create(&app, json!({ "id": 500, "name": "Laptop", "price": 1200 })).await;

    assert_eq!(id, 1);
    let response = app.oneshot(get("/500")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_duplicate_name_conflicts() {
    let app = app();
    create(&app, json!({ "name": "Laptop", "price": 1200 })).await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": "Laptop", "price": 900 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");

    let all: Vec<Value> = json_body(app.oneshot(get("/")).await.unwrap().into_body()).await;
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_create_zero_price_fails_validation() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": "Laptop", "price": 0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"][0]["field"], "price");

    let all: Vec<Value> = json_body(app.oneshot(get("/")).await.unwrap().into_body()).await;
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_create_name_length_bounds() {
    for name in ["ab".to_string(), "x".repeat(21)] {
        let response = app()
            .oneshot(json_request("POST", "/", json!({ "name": &name, "price": 10 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "name {:?}", name);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["details"][0]["field"], "name");
    }

    for name in ["abc".to_string(), "x".repeat(20)] {
        let response = app()
            .oneshot(json_request("POST", "/", json!({ "name": &name, "price": 10 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "name {:?}", name);
    }
}

#[tokio::test]
async fn test_read_missing_returns_404() {
    let response = app().oneshot(get("/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_integer_id_returns_400() {
    let app = app();

    for request in [
        get("/abc"),
        get("/cheap/limits"),
        Request::builder()
            .method("DELETE")
            .uri("/1.5")
            .body(Body::empty())
            .unwrap(),
    ] {
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "INVALID_PATH_PARAMETER");
    }
}

#[tokio::test]
async fn test_price_limit_is_exclusive() {
    let app = app();
    for (name, price) in [("Cable", 50), ("Mouse", 100), ("Keyboard", 101), ("Monitor", 200)] {
        create(&app, json!({ "name": name, "price": price })).await;
    }

    let response = app.oneshot(get("/100/limits")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    let prices: Vec<i32> = products.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![101, 200]);
}

#[tokio::test]
async fn test_search_by_name_fragment() {
    let app = app();
    for name in ["Smartphone", "Tablet", "Telephone"] {
        create(&app, json!({ "name": name, "price": 100 })).await;
    }

    let response = app.oneshot(get("/phone/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Product> = json_body(response.into_body()).await;
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Smartphone", "Telephone"]);
}

#[tokio::test]
async fn test_search_fragment_wildcards() {
    let app = app();
    for name in ["Smartphone", "Tablet"] {
        create(&app, json!({ "name": name, "price": 100 })).await;
    }

    let products: Vec<Product> =
        json_body(app.clone().oneshot(get("/Tab_et/search")).await.unwrap().into_body()).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Tablet");

    // `%25` decodes to `%`
    let products: Vec<Product> =
        json_body(app.oneshot(get("/%25/search")).await.unwrap().into_body()).await;
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_update_overwrites_and_returns_empty_200() {
    let app = app();
    let id = create(&app, json!({ "name": "Laptop", "price": 1200 })).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/",
            json!({ "id": id, "name": "Laptop Pro", "price": 1500 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response.into_body()).await.is_empty());

    let product: Product = json_body(
        app.oneshot(get(&format!("/{}", id)))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(product.name, "Laptop Pro");
    assert_eq!(product.price, 1500);
}

#[tokio::test]
async fn test_update_validates_input() {
    let app = app();
    let id = create(&app, json!({ "name": "Laptop", "price": 1200 })).await;

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/", json!({ "id": id, "name": "Laptop", "price": 0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let product: Product = json_body(
        app.oneshot(get(&format!("/{}", id)))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(product.price, 1200);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = app();
    let id = create(&app, json!({ "name": "Laptop", "price": 1200 })).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = app.oneshot(get(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_leaves_storage_unchanged() {
    let app = app();
    create(&app, json!({ "name": "Laptop", "price": 1200 })).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let all: Vec<Product> = json_body(app.oneshot(get("/")).await.unwrap().into_body()).await;
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
