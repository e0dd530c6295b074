// File: src/field.rs
// Purpose: Field descriptors handed to a validation pass

use indexmap::IndexMap;
use rusty_forms_rules::Value;
use serde::{Deserialize, Serialize};

use crate::rule::Rule;
use crate::status::FieldValidation;

/// Field snapshot keyed by field key, in declaration order
pub type Fields = IndexMap<String, FieldDescriptor>;

/// One form field: its current value, its rules and, for file inputs, the
/// file rules applied to every selected file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    #[serde(default)]
    pub value: Value,

    /// `None` means the field is never validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,

    /// File rule name -> argument, used by the `file` token; checked in
    /// declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub file: IndexMap<String, Value>,

    /// Set by the validation pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            rules: None,
            file: IndexMap::new(),
            validation: None,
        }
    }

    /// Append a rule; accepts tokens (`"minLength:3"`) or built [`Rule`]s
    pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.get_or_insert_with(Vec::new).push(rule.into());
        self
    }

    pub fn rules<I, R>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Rule>,
    {
        self.rules
            .get_or_insert_with(Vec::new)
            .extend(rules.into_iter().map(Into::into));
        self
    }

    /// Declare a file rule (`extensions`, `maxSize`, ...) and its argument
    pub fn file_rule(mut self, name: impl Into<String>, arg: impl Into<Value>) -> Self {
        self.file.insert(name.into(), arg.into());
        self
    }

    pub fn errors(&self) -> &[String] {
        self.validation
            .as_ref()
            .map(|v| v.errors.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_dirty(&self) -> bool {
        self.validation.as_ref().map(|v| v.dirty).unwrap_or(false)
    }
}

/// Build a [`Fields`] map keyed by each descriptor's name
pub fn fields<I>(descriptors: I) -> Fields
where
    I: IntoIterator<Item = FieldDescriptor>,
{
    descriptors
        .into_iter()
        .map(|field| (field.name.clone(), field))
        .collect()
}
