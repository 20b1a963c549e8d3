//! # Server Rejections
//!
//! Translates errors reported by the product API into [`FieldErrors`].
//!
//! ## Error Translation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  API error body                      ServerRejection                    │
//! │  ──────────────                      ───────────────                    │
//! │  {"detail": "SKU must be unique"} ─► Message { text }                   │
//! │  {"detail": [{loc, msg}, ...]}    ─► FieldErrors { entries }            │
//! │                                                                         │
//! │  ServerRejection::to_field_errors()                                     │
//! │  ├── duplicate SKU text       → sku: "SKU already exists. ..."          │
//! │  ├── other text               → form-level message                      │
//! │  ├── loc ["body", "<field>"]  → <field>: msg                            │
//! │  └── unknown / short loc      → form-level message                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The API client decodes the body once, at the boundary, with
//! [`ServerRejection::from_error_body`]. Nothing downstream inspects JSON.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{FieldErrors, ValidationError};
use crate::types::Field;

/// Detail text the store uses for a SKU uniqueness violation.
pub const DUPLICATE_SKU_DETAIL: &str = "SKU must be unique";

/// Message shown under the SKU field for a uniqueness violation.
pub const DUPLICATE_SKU_MESSAGE: &str = "SKU already exists. Please use a different SKU.";

// =============================================================================
// Wire Types
// =============================================================================

/// One segment of an error location path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum LocSegment {
    Index(u64),
    Key(String),
    /// Anything else (negative or fractional numbers, nulls, objects).
    Other(serde_json::Value),
}

/// A structured validation error reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetailEntry {
    /// Path to the offending value, e.g. `["body", "price"]`.
    #[serde(default)]
    pub loc: Vec<LocSegment>,

    #[serde(default)]
    pub msg: String,
}

impl DetailEntry {
    /// The form field named by the first segment after the top-level
    /// locator (`loc[1]`), if it is one we know.
    pub fn field(&self) -> Option<Field> {
        match self.loc.get(1) {
            Some(LocSegment::Key(key)) => Field::from_key(key),
            _ => None,
        }
    }
}

/// A create/update rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ServerRejection {
    /// A single message (`{"detail": "..."}`).
    Message { text: String },

    /// Per-field validation errors (`{"detail": [{loc, msg}]}`).
    FieldErrors { entries: Vec<DetailEntry> },
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Entries(Vec<DetailEntry>),
}

// =============================================================================
// Translation
// =============================================================================

impl ServerRejection {
    /// Decodes a raw API error body.
    ///
    /// Fails when the body has no `detail`, or `detail` is neither a string
    /// nor a list of entries; the caller then shows its generic failure.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use stockroom_core::rejection::ServerRejection;
    ///
    /// let rejection = ServerRejection::from_error_body(json!({ "detail": "SKU must be unique" })).unwrap();
    /// assert!(rejection.is_duplicate_sku());
    ///
    /// assert!(ServerRejection::from_error_body(json!({ "error": 1 })).is_err());
    /// ```
    pub fn from_error_body(body: serde_json::Value) -> Result<Self, serde_json::Error> {
        let body: ErrorBody = serde_json::from_value(body)?;

        Ok(match body.detail {
            Detail::Text(text) => ServerRejection::Message { text },
            Detail::Entries(entries) => ServerRejection::FieldErrors { entries },
        })
    }

    pub fn message(text: impl Into<String>) -> Self {
        ServerRejection::Message { text: text.into() }
    }

    /// True when the store rejected a duplicate SKU.
    pub fn is_duplicate_sku(&self) -> bool {
        match self {
            ServerRejection::Message { text } => text
                .to_lowercase()
                .contains(&DUPLICATE_SKU_DETAIL.to_lowercase()),
            ServerRejection::FieldErrors { .. } => false,
        }
    }

    /// Maps the rejection onto the form's field error slots.
    pub fn to_field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        match self {
            ServerRejection::Message { .. } if self.is_duplicate_sku() => {
                debug!("server rejected duplicate SKU");
                errors.insert(ValidationError::ServerRejected {
                    field: Field::Sku,
                    message: DUPLICATE_SKU_MESSAGE.to_string(),
                });
            }
            ServerRejection::Message { text } => {
                warn!(detail = %text, "server rejected product");
                errors.push_form_message(text.clone());
            }
            ServerRejection::FieldErrors { entries } => {
                for entry in entries {
                    match entry.field() {
                        Some(field) => errors.insert(ValidationError::ServerRejected {
                            field,
                            message: entry.msg.clone(),
                        }),
                        None => {
                            debug!(loc = ?entry.loc, "server error without a known field");
                            errors.push_form_message(entry.msg.clone());
                        }
                    }
                }
            }
        }

        errors
    }
}

impl From<&ServerRejection> for FieldErrors {
    fn from(rejection: &ServerRejection) -> Self {
        rejection.to_field_errors()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_duplicate_sku_maps_to_sku_only() {
        let rejection =
            ServerRejection::from_error_body(json!({ "detail": "SKU must be unique" })).unwrap();
        let errors = rejection.to_field_errors();

        assert_eq!(errors.len(), 1);
        assert!(errors.form_messages().is_empty());
        assert_eq!(
            errors.get(Field::Sku).map(ValidationError::kind),
            Some(ErrorKind::ServerRejected)
        );
        assert_eq!(errors.message(Field::Sku).as_deref(), Some(DUPLICATE_SKU_MESSAGE));
    }

    #[test]
    fn test_duplicate_sku_is_matched_loosely() {
        assert!(ServerRejection::message("Conflict: sku must be unique.").is_duplicate_sku());
        assert!(!ServerRejection::message("Product not found").is_duplicate_sku());
    }

    #[test]
    fn test_other_message_is_form_level() {
        let errors = ServerRejection::message("Product not found").to_field_errors();

        assert_eq!(errors.len(), 0);
        assert_eq!(errors.form_messages(), ["Product not found".to_string()]);
    }

    #[test]
    fn test_entries_map_by_second_loc_segment() {
        let body = json!({
            "detail": [
                { "loc": ["body", "price"], "msg": "Input should be greater than 0", "type": "greater_than" },
                { "loc": ["body", "stock"], "msg": "Input should be greater than or equal to 0" },
                { "loc": ["body"], "msg": "Field required" },
                { "loc": ["body", "barcode"], "msg": "Unknown field" },
                { "loc": ["body", 0], "msg": "Bad item" }
            ]
        });

        let errors = ServerRejection::from_error_body(body).unwrap().to_field_errors();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Stock, Field::Price]);
        assert_eq!(
            errors.message(Field::Price).as_deref(),
            Some("Input should be greater than 0")
        );
        assert_eq!(
            errors.form_messages(),
            ["Field required".to_string(), "Unknown field".to_string(), "Bad item".to_string()]
        );
    }

    #[test]
    fn test_odd_loc_segments_keep_the_body() {
        let body = json!({
            "detail": [
                { "loc": ["body", "price"], "msg": "Input should be greater than 0" },
                { "loc": [-1, "stock"], "msg": "Negative index" },
                { "loc": ["body", 1.5], "msg": "Fractional index" },
                { "loc": [null, { "x": 1 }], "msg": "Odd path" }
            ]
        });

        let rejection = ServerRejection::from_error_body(body).unwrap();
        let errors = rejection.to_field_errors();

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Stock, Field::Price]);
        assert_eq!(
            errors.form_messages(),
            ["Fractional index".to_string(), "Odd path".to_string()]
        );

        let ServerRejection::FieldErrors { entries } = rejection else {
            panic!("expected field errors");
        };
        assert_eq!(entries[1].loc[0], LocSegment::Other(json!(-1)));
    }

    #[test]
    fn test_body_without_detail_is_an_error() {
        assert!(ServerRejection::from_error_body(json!({ "message": "nope" })).is_err());
        assert!(ServerRejection::from_error_body(json!({ "detail": 42 })).is_err());
    }

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_value(ServerRejection::message("boom")).unwrap();
        assert_eq!(json, json!({ "kind": "message", "text": "boom" }));

        let rejection = ServerRejection::FieldErrors {
            entries: vec![DetailEntry {
                loc: vec![LocSegment::Key("body".to_string()), LocSegment::Key("name".to_string())],
                msg: "Field required".to_string(),
            }],
        };
        let json = serde_json::to_value(&rejection).unwrap();
        assert_eq!(json["kind"], "fieldErrors");
        assert_eq!(json["entries"][0]["loc"], json!(["body", "name"]));
    }

    #[test]
    fn test_merge_with_local_errors() {
        let mut local = FieldErrors::from(ValidationError::Required { field: Field::Name });
        local.merge(FieldErrors::from(&ServerRejection::message(DUPLICATE_SKU_DETAIL)));

        assert_eq!(local.fields().collect::<Vec<_>>(), vec![Field::Name, Field::Sku]);
    }
}
