//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError  - One problem with one field                          │
//! │  └── kind() → ErrorKind (RequiredField, InvalidFormat, OutOfRange,      │
//! │                          TooLong, Conflict, ServerRejected)             │
//! │                                                                         │
//! │  FieldErrors      - Field → ValidationError, plus form-level messages   │
//! │                                                                         │
//! │  Flow:                                                                  │
//! │    local rules ──────────┐                                              │
//! │                          ├──► FieldErrors ──► messages() ──► UI form    │
//! │    ServerRejection ──────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation never panics and never raises: every failure lands in the
//! field slot it belongs to, ready for re-display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::types::Field;

// =============================================================================
// Error Kind
// =============================================================================

/// Machine-readable category of a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Missing, blank, or not one of the allowed choices.
    RequiredField,
    /// Present but malformed (SKU pattern, fractional stock).
    InvalidFormat,
    /// Numeric value outside its allowed range.
    OutOfRange,
    /// Text longer than allowed.
    TooLong,
    /// Collides with an existing record (local SKU pre-check).
    Conflict,
    /// Rejected by the external store.
    ServerRejected,
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single problem with a single form field.
///
/// The `Display` output is the user-facing message shown under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, blank, or not one of the allowed choices.
    #[error("{field} is required")]
    Required { field: Field },

    /// Invalid format (e.g., SKU not in `123-456-78` form).
    #[error("{field} must be {expected}")]
    InvalidFormat { field: Field, expected: &'static str },

    #[error("{field} cannot be negative")]
    Negative { field: Field },

    #[error("{field} must be greater than 0")]
    MustBePositive { field: Field },

    #[error("{field} must be at most {max}")]
    TooLarge { field: Field, max: u64 },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: Field, max: usize },

    /// Duplicate value (e.g., SKU already used by another product).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: Field, value: String },

    /// Message reported by the store for this field.
    #[error("{message}")]
    ServerRejected { field: Field, message: String },
}

impl ValidationError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Duplicate { field, .. }
            | ValidationError::ServerRejected { field, .. } => *field,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Required { .. } => ErrorKind::RequiredField,
            ValidationError::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            ValidationError::Negative { .. }
            | ValidationError::MustBePositive { .. }
            | ValidationError::TooLarge { .. } => ErrorKind::OutOfRange,
            ValidationError::TooLong { .. } => ErrorKind::TooLong,
            ValidationError::Duplicate { .. } => ErrorKind::Conflict,
            ValidationError::ServerRejected { .. } => ErrorKind::ServerRejected,
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field error map: at most one error per field, plus messages that belong
/// to the form as a whole.
///
/// ```rust
/// use stockroom_core::{Field, FieldErrors, ValidationError};
///
/// let mut errors = FieldErrors::new();
/// errors.insert(ValidationError::Required { field: Field::Name });
///
/// assert_eq!(errors.message(Field::Name).as_deref(), Some("Product name is required"));
/// assert!(!errors.contains(Field::Sku));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.fields, .form))]
pub struct FieldErrors {
    fields: BTreeMap<Field, ValidationError>,
    form: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Stores an error in its field's slot, replacing any earlier one.
    pub fn insert(&mut self, error: ValidationError) {
        self.fields.insert(error.field(), error);
    }

    /// Adds a message that is not tied to any field.
    pub fn push_form_message(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.fields.get(&field)
    }

    /// User-facing message for a field, if it has an error.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// Clears a field's error, as the form does once the user edits it.
    pub fn clear(&mut self, field: Field) -> Option<ValidationError> {
        self.fields.remove(&field)
    }

    /// Field errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.fields.iter().map(|(field, error)| (*field, error))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.keys().copied()
    }

    pub fn form_messages(&self) -> &[String] {
        &self.form
    }

    /// Number of field errors (form-level messages not counted).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when there are neither field errors nor form-level messages.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    /// Folds `other` into `self`; on a shared field, `other` wins.
    pub fn merge(&mut self, other: FieldErrors) {
        self.fields.extend(other.fields);
        self.form.extend(other.form);
    }

    /// Renders every error to its message, ready to serialize for the UI.
    pub fn messages(&self) -> FieldMessages {
        FieldMessages {
            fields: self
                .fields
                .iter()
                .map(|(field, error)| (*field, error.to_string()))
                .collect(),
            form: self.form.clone(),
        }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(error);
        errors
    }
}

impl FromIterator<ValidationError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

/// `key: message` pairs in form order, then form-level messages, `; `-joined.
fn summarize(fields: &BTreeMap<Field, ValidationError>, form: &[String]) -> String {
    fields
        .iter()
        .map(|(field, error)| format!("{}: {}", field.key(), error))
        .chain(form.iter().cloned())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serialized shape of [`FieldErrors`] for the UI.
///
/// ```json
/// { "fields": { "sku": "SKU is required" }, "form": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldMessages {
    pub fields: BTreeMap<Field, String>,
    pub form: Vec<String>,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of validating or submitting a product.
pub type CoreResult<T> = Result<T, FieldErrors>;

// =============================================================================
// Unit Tests
// =============================================================================
