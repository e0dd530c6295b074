// File: src/status.rs
// Purpose: Per-field results and the form status published after each pass

use indexmap::IndexMap;
use rusty_forms_rules::Value;
use serde::{Deserialize, Serialize};

use crate::field::Fields;

/// Outcome of one field's rules
///
/// `dirty` is true exactly when `errors` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldValidation {
    /// Names of the failing rules, in evaluation order
    pub errors: Vec<String>,
    pub dirty: bool,
}

impl FieldValidation {
    /// Result for a field without rules
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        let dirty = !errors.is_empty();
        Self { errors, dirty }
    }
}

/// Aggregated result of a validation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStatus {
    pub fields: Fields,
    pub values: IndexMap<String, Value>,
    pub valid: bool,
}

impl Default for FormStatus {
    /// Status before the first pass: nothing validated, nothing invalid
    fn default() -> Self {
        Self {
            fields: Fields::new(),
            values: IndexMap::new(),
            valid: true,
        }
    }
}

impl FormStatus {
    /// Errors of a field, empty if the field is unknown or passed
    pub fn errors(&self, field: &str) -> &[String] {
        self.fields
            .get(field)
            .map(|f| f.errors())
            .unwrap_or(&[])
    }

    pub fn first_error(&self, field: &str) -> Option<&str> {
        self.errors(field).first().map(String::as_str)
    }

    pub fn is_dirty(&self, field: &str) -> bool {
        self.fields.get(field).map(|f| f.is_dirty()).unwrap_or(false)
    }

    /// Keys of fields with at least one error
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, f)| f.is_dirty())
            .map(|(key, _)| key.as_str())
            .collect()
    }
}
