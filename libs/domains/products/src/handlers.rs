use axum::{
    Json, Router,
    extract::{OriginalUri, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, ParsedPath, ValidatedJson,
    errors::responses::{
        BadRequestPathResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::ProductResult;
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        update_product,
        get_product,
        delete_product,
        products_above_limit,
        search_products,
    ),
    components(
        schemas(Product, ProductInput),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestPathResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints.
///
/// `/{id}/limits` and `/{id}/search` share the `{id}` segment name with
/// `/{id}`; the segment carries a price limit and a name fragment there.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products::<R>)
                .post(create_product::<R>)
                .put(update_product::<R>),
        )
        .route("/{id}", get(get_product::<R>).delete(delete_product::<R>))
        .route("/{id}/limits", get(products_above_limit::<R>))
        .route("/{id}/search", get(search_products::<R>))
        .with_state(shared_service)
}

/// `Location` for a product created under `base` (the collection path).
fn location(base: &str, id: i32) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All products, ordered by id", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", headers(("Location" = String, description = "URI of the new product"))),
        (status = 204, description = "Nothing was stored"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<Response> {
    let Some(product) = service.create_product(input).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    AuditEvent::new(
        "product.create",
        Some(format!("product:{}", product.id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({
        "name": product.name,
        "price": product.price,
    }))
    .log();

    let location = location(uri.path(), product.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// Overwrite a product, or insert it when its id is unknown
#[utoipa::path(
    put,
    path = "",
    tag = entity::Model::TAG,
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product saved"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<StatusCode> {
    let requested_id = input.id;
    let saved = service.save_product(input).await?;

    AuditEvent::new(
        "product.update",
        saved
            .as_ref()
            .map(|p| p.id)
            .or(requested_id)
            .map(|id| format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({ "written": saved.is_some() }))
    .log();

    Ok(StatusCode::OK)
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestPathResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ParsedPath(id): ParsedPath<i32>,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Delete a product; deleting an unknown id also succeeds
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product no longer exists"),
        (status = 400, response = BadRequestPathResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    headers: HeaderMap,
    ParsedPath(id): ParsedPath<i32>,
) -> ProductResult<StatusCode> {
    let removed = service.delete_product(id).await?;

    AuditEvent::new(
        "product.delete",
        Some(format!("product:{}", id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({ "removed": removed }))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// Products priced strictly above a limit
#[utoipa::path(
    get,
    path = "/{priceLimit}/limits",
    tag = entity::Model::TAG,
    params(
        ("priceLimit" = i32, Path, description = "Exclusive lower bound on price")
    ),
    responses(
        (status = 200, description = "Matching products, ordered by id", body = Vec<Product>),
        (status = 400, response = BadRequestPathResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_above_limit<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ParsedPath(limit): ParsedPath<i32>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.products_priced_above(limit).await?;
    Ok(Json(products))
}

/// Products whose name contains a fragment
///
/// The fragment is a SQL `LIKE` pattern body, so `%` and `_` act as wildcards.
/// Every path segment is a valid fragment, so unlike the other `/{id}` routes
/// there is no 400 response.
#[utoipa::path(
    get,
    path = "/{name}/search",
    tag = entity::Model::TAG,
    params(
        ("name" = String, Path, description = "Name fragment; `%` and `_` are wildcards")
    ),
    responses(
        (status = 200, description = "Matching products, ordered by id", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ParsedPath(fragment): ParsedPath<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_products(&fragment).await?;
    Ok(Json(products))
}
