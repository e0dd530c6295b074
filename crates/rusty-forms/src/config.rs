// File: src/config.rs
// Purpose: Form schemas parsed from forms.toml, checked against the rule registry up front

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rusty_forms_rules::{RuleRegistry, Value};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ValidationError;
use crate::field::{FieldDescriptor, Fields};
use crate::rule::Rule;
use crate::runner::resolve_rule;

/// All forms declared in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormsConfig {
    #[serde(default)]
    pub forms: IndexMap<String, FormSchema>,
}

/// Rules for every field of one form, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormSchema {
    #[serde(default)]
    pub fields: IndexMap<String, FieldSchema>,
}

/// Rules for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FieldSchema {
    /// Name used in `values`; defaults to the field key
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub rules: Option<Vec<Rule>>,

    #[serde(default)]
    pub file: IndexMap<String, Value>,
}

impl FormsConfig {
    /// Load configuration from a forms.toml file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, there are no declared forms
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read forms config: {:?}", path))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse forms config: {:?}", path))?;

        tracing::debug!(path = ?path, forms = config.forms.len(), "loaded forms config");
        Ok(config)
    }

    /// Load configuration from default path (./forms.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("forms.toml")
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    pub fn form(&self, name: &str) -> Option<&FormSchema> {
        self.forms.get(name)
    }

    /// Resolve every rule of every form against `registry`
    pub fn check(&self, registry: &RuleRegistry) -> Result<(), ValidationError> {
        for (name, form) in &self.forms {
            form.check(registry).map_err(|err| {
                tracing::error!(form = %name, error = %err, "invalid form rules");
                err
            })?;
        }
        Ok(())
    }
}

impl FormSchema {
    /// Fail fast on unknown rule names and unusable rule arguments, before any
    /// pass runs
    pub fn check(&self, registry: &RuleRegistry) -> Result<(), ValidationError> {
        for (key, field) in &self.fields {
            let Some(rules) = &field.rules else {
                continue;
            };

            for rule in rules {
                match rule {
                    Rule::Named { name, args } => {
                        resolve_rule(registry, key, name, args)?;
                    }
                    Rule::File => {
                        if field.file.is_empty() {
                            return Err(ValidationError::MissingFileRules { field: key.clone() });
                        }
                        for (file_rule, arg) in &field.file {
                            resolve_rule(registry, key, file_rule, &arg.to_args())?;
                        }
                    }
                    Rule::Custom(_) => {}
                }
            }
        }
        Ok(())
    }

    /// Field snapshot for the current `values`; absent values are `Null`
    pub fn fields(&self, values: &IndexMap<String, Value>) -> Fields {
        self.fields
            .iter()
            .map(|(key, schema)| {
                let name = schema.name.clone().unwrap_or_else(|| key.clone());
                let value = values.get(&name).cloned().unwrap_or_default();
                let descriptor = FieldDescriptor {
                    name,
                    value,
                    rules: schema.rules.clone(),
                    file: schema.file.clone(),
                    validation: None,
                };
                (key.clone(), descriptor)
            })
            .collect()
    }
}
