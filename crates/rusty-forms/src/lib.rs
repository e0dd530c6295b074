//! # rusty-forms
//!
//! Reactive form validation for UI layers. A validation pass takes a snapshot
//! of field descriptors, runs each field's rules in order, records the names
//! of failing rules and publishes a [`FormStatus`] (`fields`, `values`,
//! `valid`) into a [`Store`] that UI code subscribes to.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_forms::{fields, validator, FieldDescriptor, FileInfo};
//!
//! let form = validator(|| {
//!     fields([
//!         FieldDescriptor::new("username", "").rule("required"),
//!         FieldDescriptor::new("avatar", vec![FileInfo::new("a.exe", 10)])
//!             .rule("file")
//!             .file_rule("extensions", vec!["png", "jpg"])
//!             .file_rule("maxSize", 1),
//!     ])
//! });
//!
//! // Call after every UI update
//! let status = form.after_update().unwrap();
//! assert!(!status.valid);
//! assert_eq!(status.errors("username"), ["required"]);
//! assert_eq!(status.errors("avatar"), ["extensions"]);
//! ```
//!
//! ## Rules
//!
//! - `"name"` / `"name:arg1:arg2"` - a rule from the [`RuleRegistry`]
//! - `"file"` - check every selected file against the field's `file` rules
//! - [`Rule::custom`] - a zero-argument check with its own error code
//!
//! Unknown rule names are configuration errors ([`ValidationError`]), never
//! silently passing rules.

pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod rule;
pub mod runner;
pub mod status;
pub mod store;

pub use config::{FieldSchema, FormSchema, FormsConfig};
pub use error::ValidationError;
pub use field::{fields, FieldDescriptor, Fields};
pub use form::{validator, Form};
pub use rule::{CustomRule, Rule, FILE_RULE};
pub use runner::{run_pass, validate_field, FormValidator};
pub use status::{FieldValidation, FormStatus};
pub use store::Store;

// Re-export the rule library
pub use rusty_forms_rules as rules;
pub use indexmap::IndexMap;
pub use rusty_forms_rules::{
    bytes_to_size, ArgSpec, FileInfo, RuleError, RuleFn, RuleRegistry, Value,
};
