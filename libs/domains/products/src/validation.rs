//! Field-level validation of product candidates.

use axum_helpers::{FieldViolation, field_violations};
use validator::Validate;

/// Every rule `candidate` breaks; empty when it is valid.
///
/// Violations are ordered by field, then by rule.
pub fn violations<T: Validate>(candidate: &T) -> Vec<FieldViolation> {
    match candidate.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => field_violations(&errors),
    }
}
