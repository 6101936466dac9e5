//! Input validation helpers
//!
//! Centralized text length constants plus the bridge between
//! `validator::ValidationErrors` and the API's `{field, message}` error list.

use validator::{Validate, ValidationErrors};

use shared::FieldError;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, category, dish, change, user name
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions (restaurant, category, dish)
pub const MAX_DESC_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length (kept from the original product rules)
pub const MIN_PASSWORD_LEN: usize = 6;

// ── Validation helpers ──────────────────────────────────────────────

/// Run derive-based validation on a request payload, converting failures
/// into the structured field-error response shape.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(into_field_errors)
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field(field, format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::field(
            field,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::field(
            field,
            format!("{field} is too long ({} chars, max {max_len})", v.len()),
        ));
    }
    Ok(())
}

fn into_field_errors(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<FieldError> = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            fields.push(FieldError::new(field.to_string(), message));
        }
    }
    // Deterministic order for clients and tests
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    AppError::Validation(fields)
}
