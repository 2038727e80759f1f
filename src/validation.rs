//! Request field validation

use crate::error::AppError;

/// Require a field to be present and non-empty, returning its value
///
/// Absent and empty fields are rejected identically; whitespace-only
/// values count as absent.
pub fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

/// Require a non-empty field value
pub fn require(field: &str, value: &str) -> Result<(), AppError> {
    required(field, Some(value)).map(|_| ())
}
