// File: src/registry.rs
// Purpose: Name -> predicate lookup used to resolve rule tokens

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::{file, numeric, required, string, Value};

/// A rule predicate: `(value, args) -> passed`
pub type RuleFn = Arc<dyn Fn(&Value, &[String]) -> bool + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown validation rule `{0}`")]
    UnknownRule(String),

    #[error("rule `{rule}` cannot use arguments {args:?}")]
    InvalidArgs { rule: String, args: Vec<String> },
}

/// What a rule expects in its first argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    /// Anything, including no arguments
    Any,
    /// A number (`maxSize:1.5`, `min:18`)
    Number,
    /// A non-negative integer (`minLength:3`)
    Count,
    /// At least one argument (`in:a:b`)
    Text,
}

impl ArgSpec {
    pub fn accepts(&self, args: &[String]) -> bool {
        let first = args.first().map(|a| a.trim());
        match self {
            ArgSpec::Any => true,
            ArgSpec::Number => first.map_or(false, |a| a.parse::<f64>().is_ok()),
            ArgSpec::Count => first.map_or(false, |a| a.parse::<usize>().is_ok()),
            ArgSpec::Text => !args.is_empty(),
        }
    }
}

/// Registered rules, keyed by the name used in rule tokens
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleFn>,
    specs: HashMap<String, ArgSpec>,
}

impl RuleRegistry {
    /// Registry without any rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in rule
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register("required", required::required)
            .register_with_args("extensions", ArgSpec::Text, file::extensions)
            .register_with_args("maxSize", ArgSpec::Number, file::max_size)
            .register("email", string::email)
            .register("url", string::url)
            .register_with_args("minLength", ArgSpec::Count, string::min_length)
            .register_with_args("maxLength", ArgSpec::Count, string::max_length)
            .register_with_args("contains", ArgSpec::Text, string::contains)
            .register_with_args("equals", ArgSpec::Text, string::equals)
            .register_with_args("in", ArgSpec::Text, string::one_of)
            .register_with_args("min", ArgSpec::Number, numeric::min)
            .register_with_args("max", ArgSpec::Number, numeric::max);
        registry
    }

    /// Add a rule, replacing any rule already registered under `name`.
    /// Its arguments are not checked.
    pub fn register<F>(&mut self, name: impl Into<String>, rule: F) -> &mut Self
    where
        F: Fn(&Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.register_with_args(name, ArgSpec::Any, rule)
    }

    /// Add a rule whose arguments [`RuleRegistry::check_args`] verifies
    pub fn register_with_args<F>(
        &mut self,
        name: impl Into<String>,
        spec: ArgSpec,
        rule: F,
    ) -> &mut Self
    where
        F: Fn(&Value, &[String]) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        self.specs.insert(name.clone(), spec);
        self.rules.insert(name, Arc::new(rule));
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuleFn> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up a rule, failing on names nobody registered
    pub fn resolve(&self, name: &str) -> Result<&RuleFn, RuleError> {
        self.get(name)
            .ok_or_else(|| RuleError::UnknownRule(name.to_string()))
    }

    /// Resolve a rule and make sure `args` are usable by it
    pub fn check_args(&self, name: &str, args: &[String]) -> Result<&RuleFn, RuleError> {
        let rule = self.resolve(name)?;
        let spec = self.specs.get(name).copied().unwrap_or(ArgSpec::Any);
        if !spec.accepts(args) {
            return Err(RuleError::InvalidArgs {
                rule: name.to_string(),
                args: args.to_vec(),
            });
        }
        Ok(rule)
    }

    /// Resolve and run a rule
    pub fn check(&self, name: &str, value: &Value, args: &[String]) -> Result<bool, RuleError> {
        let rule = self.resolve(name)?;
        Ok(rule(value, args))
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileInfo;

    #[test]
    fn test_builtins_registered() {
        let registry = RuleRegistry::with_builtins();
        for name in ["required", "extensions", "maxSize", "email", "minLength", "in"] {
            assert!(registry.contains(name), "missing builtin {}", name);
        }
        assert!(RuleRegistry::new().names().is_empty());
    }

    #[test]
    fn test_unknown_rule_fails_fast() {
        let registry = RuleRegistry::with_builtins();
        let err = registry.check("nope", &Value::Null, &[]).unwrap_err();
        assert_eq!(err, RuleError::UnknownRule("nope".to_string()));
        assert_eq!(err.to_string(), "unknown validation rule `nope`");
    }

    #[test]
    fn test_check_runs_rule() {
        let registry = RuleRegistry::with_builtins();
        let png = Value::File(FileInfo::new("photo.PNG", 10));
        let allowed = vec!["png".to_string(), "jpg".to_string()];

        assert_eq!(registry.check("extensions", &png, &allowed), Ok(true));
        assert_eq!(registry.check("required", &Value::from(""), &[]), Ok(false));
    }

    #[test]
    fn test_register_custom_rule() {
        let mut registry = RuleRegistry::new();
        registry.register("even", |value: &Value, _: &[String]| {
            value.as_f64().map(|n| n % 2.0 == 0.0).unwrap_or(false)
        });

        assert_eq!(registry.check("even", &Value::from(4), &[]), Ok(true));
        assert_eq!(registry.check("even", &Value::from(3), &[]), Ok(false));
        assert_eq!(registry.names(), vec!["even"]);
    }

    #[test]
    fn test_check_args_rejects_unusable_arguments() {
        fn strings(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        let registry = RuleRegistry::with_builtins();

        assert!(registry.check_args("maxSize", &strings(&["1.5"])).is_ok());
        assert!(registry.check_args("minLength", &strings(&[" 3 "])).is_ok());
        assert!(registry.check_args("required", &[]).is_ok());

        assert_eq!(
            registry.check_args("maxSize", &strings(&["big"])).err(),
            Some(RuleError::InvalidArgs {
                rule: "maxSize".to_string(),
                args: strings(&["big"]),
            })
        );
        assert!(registry.check_args("minLength", &[]).is_err());
        assert!(registry.check_args("minLength", &strings(&["-1"])).is_err());
        assert!(registry.check_args("in", &[]).is_err());
        assert_eq!(
            registry.check_args("nope", &[]).err(),
            Some(RuleError::UnknownRule("nope".to_string()))
        );
    }

    #[test]
    fn test_register_replaces_arg_spec() {
        let mut registry = RuleRegistry::with_builtins();
        registry.register("maxSize", |_: &Value, _: &[String]| true);
        assert!(registry.check_args("maxSize", &[]).is_ok());
    }
}
