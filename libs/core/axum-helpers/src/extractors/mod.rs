//! Custom extractors for Axum handlers.
//!
//! Both reject with [`AppError`](crate::errors::AppError) so failures share
//! the standard JSON error body.

pub mod parsed_path;
pub mod validated_json;

pub use parsed_path::ParsedPath;
pub use validated_json::ValidatedJson;
