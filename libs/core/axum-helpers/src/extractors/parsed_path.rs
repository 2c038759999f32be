//! Single path parameter extractor parsed through `FromStr`.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::str::FromStr;

/// Extracts the route's single path parameter and parses it into `T`.
///
/// A value that does not parse is rejected with `400 INVALID_PATH_PARAMETER`
/// instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn get_product(ParsedPath(id): ParsedPath<i32>) -> String {
///     format!("Product {id}")
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ParsedPath<T>
where
    T: FromStr + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidPathParameter(e.body_text()))?;

        raw.parse::<T>().map(ParsedPath).map_err(|_| {
            AppError::InvalidPathParameter(format!(
                "Invalid path parameter '{}': expected {}",
                raw,
                std::any::type_name::<T>()
            ))
        })
    }
}
