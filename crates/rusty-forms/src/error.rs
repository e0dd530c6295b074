// File: src/error.rs
// Purpose: Configuration errors that abort a validation pass

use rusty_forms_rules::RuleError;
use thiserror::Error;

/// A mistake in how rules are wired to fields
///
/// Failing rules are not errors; they end up as error codes in
/// [`FieldValidation`](crate::FieldValidation). These variants mean the rule
/// configuration itself is broken and the pass cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// No rule name, or arguments the rule cannot use (`maxSize:big`)
    #[error("field `{field}` has an invalid rule token `{token}`")]
    InvalidRule { field: String, token: String },

    #[error("field `{field}` uses the `file` rule but declares no file rules")]
    MissingFileRules { field: String },

    #[error("field `{field}` uses the `file` rule but its value is not a list of files")]
    NotAFileCollection { field: String },
}
