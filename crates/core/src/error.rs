use std::collections::BTreeMap;

use crate::types::DbId;

/// Per-field validation messages keyed by the camelCase field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Schema-level failure carrying every offending field at once.
    #[error("Validation failed: {message}")]
    InvalidFields { message: String, details: FieldErrors },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidFields`] from `validator` output.
    ///
    /// Field names are reported in the camelCase form used on the wire.
    /// Nested and list errors are not used by the request DTOs, so only the
    /// flat field errors are collected. Rules without an explicit message fall
    /// back to their validator code (e.g. `"range"`).
    pub fn from_validation_errors(message: impl Into<String>, errors: &validator::ValidationErrors) -> Self {
        let mut details = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            details.insert(snake_to_camel(field), messages);
        }
        CoreError::InvalidFields {
            message: message.into(),
            details,
        }
    }
}

/// `business_name` -> `businessName`.
fn snake_to_camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
