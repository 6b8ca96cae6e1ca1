//! Presence checks for record fields.
//!
//! Only presence is checked. Email shape is deliberately left alone.

use serde_json::json;

use super::Error;

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A required field was absent.
    #[error("missing required field: {field}")]
    Missing { field: &'static str },
    /// A text field was present but blank.
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    /// An update carried no usable field.
    #[error("at least one of {fields} is required")]
    EmptyUpdate { fields: &'static str },
    /// A percentage outside `0..=100`.
    #[error("{field} must be between 0 and 100")]
    OutOfRange { field: &'static str, value: i64 },
}

impl FieldError {
    fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing_field",
            Self::Blank { .. } => "blank_field",
            Self::EmptyUpdate { .. } => "empty_update",
            Self::OutOfRange { .. } => "out_of_range",
        }
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        let code = value.code();
        let details = match &value {
            FieldError::Missing { field } | FieldError::Blank { field } => {
                json!({ "field": field, "code": code })
            }
            FieldError::EmptyUpdate { fields } => json!({ "fields": fields, "code": code }),
            FieldError::OutOfRange { field, value } => {
                json!({ "field": field, "value": value, "code": code })
            }
        };
        Error::invalid_request(value.to_string()).with_details(details)
    }
}

/// Require a present, non-blank text value.
///
/// # Examples
/// ```
/// use lmis_backend::domain::validation::{require_text, FieldError};
///
/// assert_eq!(require_text("name", Some("Ada".into())), Ok("Ada".to_owned()));
/// assert_eq!(
///     require_text("name", Some("  ".into())),
///     Err(FieldError::Blank { field: "name" })
/// );
/// ```
pub fn require_text(field: &'static str, value: Option<String>) -> Result<String, FieldError> {
    match value {
        None => Err(FieldError::Missing { field }),
        Some(text) if text.trim().is_empty() => Err(FieldError::Blank { field }),
        Some(text) => Ok(text),
    }
}

/// Update value to merge, if any. Blank text counts as not supplied so the
/// stored value is kept.
pub fn usable_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
