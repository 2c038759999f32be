//! API routes module

pub mod health;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Mount point of the versioned products API below `/api`
pub const PRODUCTS_PATH: &str = "/v1/rest/products";

/// Create all API routes; `create_router` nests them under `/api`.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest(PRODUCTS_PATH, products::router(state))
}

/// Router with the `/ready` endpoint, state already applied so it merges
/// with the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum_helpers::server::create_router;
    use domain_products::{InMemoryProductRepository, ProductService, handlers};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let products = handlers::router(ProductService::new(InMemoryProductRepository::new()));
        create_router::<ApiDoc>(Router::new().nest(PRODUCTS_PATH, products), None)
    }

    #[tokio::test]
    async fn test_location_carries_full_api_path() {
        let response = app()
            .oneshot(
                Request::post("/api/v1/rest/products")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Laptop","price":1200}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/v1/rest/products/1");
    }

    #[tokio::test]
    async fn test_collection_is_served_without_trailing_slash() {
        let response = app()
            .oneshot(Request::get("/api/v1/rest/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/api/v2/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
