// File: src/runner.rs
// Purpose: The validation pass - run every field's rules and aggregate the results

use indexmap::IndexMap;
use rusty_forms_rules::{RuleError, RuleFn, RuleRegistry, Value};
use std::sync::Arc;

use crate::error::ValidationError;
use crate::field::{FieldDescriptor, Fields};
use crate::rule::Rule;
use crate::status::{FieldValidation, FormStatus};
use crate::store::Store;

/// Run one field's rules in declaration order
///
/// Failing rules are recorded by name. Rules that cannot be resolved, or a
/// `file` token without file rules, abort with a [`ValidationError`].
pub fn validate_field(
    registry: &RuleRegistry,
    field: &FieldDescriptor,
) -> Result<FieldValidation, ValidationError> {
    let Some(rules) = &field.rules else {
        return Ok(FieldValidation::clean());
    };

    let mut errors = Vec::new();

    for rule in rules {
        match rule {
            Rule::File => {
                if field.file.is_empty() {
                    return Err(ValidationError::MissingFileRules {
                        field: field.name.clone(),
                    });
                }

                let mut checks = Vec::with_capacity(field.file.len());
                for (file_rule, arg) in &field.file {
                    let args = arg.to_args();
                    let check = resolve_rule(registry, &field.name, file_rule, &args)?;
                    checks.push((file_rule, check, args));
                }

                for entry in file_entries(field)? {
                    for (file_rule, check, args) in &checks {
                        if !check(entry, args.as_slice()) {
                            tracing::trace!(field = %field.name, rule = %file_rule, file = %entry, "file rule failed");
                            errors.push(file_rule.to_string());
                        }
                    }
                }
            }
            Rule::Custom(custom) => {
                // Custom checks close over their own state; the value is not passed
                if !custom.call() {
                    tracing::trace!(field = %field.name, rule = custom.name(), "custom rule failed");
                    errors.push(custom.name().to_string());
                }
            }
            Rule::Named { name, args } => {
                let check = resolve_rule(registry, &field.name, name, args)?;
                if !check(&field.value, args) {
                    tracing::trace!(field = %field.name, rule = %name, "rule failed");
                    errors.push(name.clone());
                }
            }
        }
    }

    Ok(FieldValidation::from_errors(errors))
}

/// Resolve a rule and check its arguments
///
/// An empty name or unusable arguments are reported against `field` as
/// [`ValidationError::InvalidRule`]; unknown names stay [`RuleError::UnknownRule`].
pub(crate) fn resolve_rule<'r>(
    registry: &'r RuleRegistry,
    field: &str,
    name: &str,
    args: &[String],
) -> Result<&'r RuleFn, ValidationError> {
    let invalid = || ValidationError::InvalidRule {
        field: field.to_string(),
        token: std::iter::once(name)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(":"),
    };

    if name.is_empty() {
        return Err(invalid());
    }

    match registry.check_args(name, args) {
        Ok(check) => Ok(check),
        Err(RuleError::InvalidArgs { .. }) => Err(invalid()),
        Err(err) => Err(err.into()),
    }
}

/// Entries of a file input's value
///
/// A single file counts as one entry; an empty value has none.
fn file_entries(field: &FieldDescriptor) -> Result<Vec<&Value>, ValidationError> {
    match &field.value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(map) => Ok(map.values().collect()),
        file @ Value::File(_) => Ok(vec![file]),
        _ => Err(ValidationError::NotAFileCollection {
            field: field.name.clone(),
        }),
    }
}

/// Validate a whole field snapshot without publishing anything
///
/// Each field comes back with its `validation` set; `valid` is false as soon
/// as one field has errors.
pub fn run_pass(registry: &RuleRegistry, mut fields: Fields) -> Result<FormStatus, ValidationError> {
    let mut values = IndexMap::new();
    let mut valid = true;

    for (key, field) in fields.iter_mut() {
        let validation = validate_field(registry, field).map_err(|err| {
            tracing::error!(field = %key, error = %err, "validation pass aborted");
            err
        })?;

        if validation.dirty {
            valid = false;
        }

        field.validation = Some(validation);
        values.insert(field.name.clone(), field.value.clone());
    }

    tracing::debug!(fields = fields.len(), valid, "validation pass finished");

    Ok(FormStatus {
        fields,
        values,
        valid,
    })
}

/// Runs validation passes and publishes their results
///
/// Two stores are kept: one holding the enriched field map alone and one
/// holding the full [`FormStatus`]. Both are replaced within the same `run`.
#[derive(Debug, Clone)]
pub struct FormValidator {
    registry: Arc<RuleRegistry>,
    fields: Store<Fields>,
    status: Store<FormStatus>,
}

impl FormValidator {
    pub fn new(registry: impl Into<Arc<RuleRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            fields: Store::default(),
            status: Store::default(),
        }
    }

    pub fn with_builtins() -> Self {
        Self::new(RuleRegistry::with_builtins())
    }

    /// Take a snapshot from `provider`, validate it and publish the result
    ///
    /// On a configuration error nothing is published.
    pub fn run<P>(&self, provider: P) -> Result<FormStatus, ValidationError>
    where
        P: FnOnce() -> Fields,
    {
        let status = run_pass(&self.registry, provider())?;

        self.fields.set(status.fields.clone());
        self.status.set(status.clone());

        Ok(status)
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Store holding the latest enriched field map
    pub fn fields(&self) -> &Store<Fields> {
        &self.fields
    }

    /// Store holding the latest [`FormStatus`]
    pub fn status(&self) -> &Store<FormStatus> {
        &self.status
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::with_builtins()
    }
}
