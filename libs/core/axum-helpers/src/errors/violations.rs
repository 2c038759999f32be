//! Flattened, client-facing view of `validator` errors.

use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Field name as it appears in the payload
    pub field: String,
    /// Validator rule that failed (e.g. `length`, `range`)
    pub code: String,
    pub message: String,
}

/// Flattens `errors` into violations sorted by field, then code.
///
/// Rules without a custom message fall back to their code.
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldViolation {
                field: field.clone(),
                code: err.code.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    violations
}
