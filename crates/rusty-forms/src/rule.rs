// File: src/rule.rs
// Purpose: Rule tokens attached to a field ("required", "minLength:3", "file", custom checks)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Token that switches a field to file validation using its `file` map
pub const FILE_RULE: &str = "file";

/// One entry of a field's ordered rule list
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Registry rule with colon-separated string arguments
    Named { name: String, args: Vec<String> },
    /// Validate every file in the value against every rule in the field's `file` map
    File,
    /// Caller-supplied check
    Custom(CustomRule),
}

impl Rule {
    /// Parse a token: `"file"`, or `"name:arg1:arg2"`
    pub fn parse(token: &str) -> Self {
        if token == FILE_RULE {
            return Rule::File;
        }

        let mut parts = token.split(':');
        let name = parts.next().unwrap_or_default().to_string();
        let args = parts.map(str::to_string).collect();
        Rule::Named { name, args }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Rule::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::Named {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Rule::Custom(CustomRule::new(name, check))
    }

    /// Error code recorded when the rule fails (`None` for the file token,
    /// whose failures are reported per file rule)
    pub fn name(&self) -> Option<&str> {
        match self {
            Rule::Named { name, .. } => Some(name),
            Rule::File => None,
            Rule::Custom(custom) => Some(custom.name()),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Named { name, args } => {
                f.write_str(name)?;
                for arg in args {
                    write!(f, ":{}", arg)?;
                }
                Ok(())
            }
            Rule::File => f.write_str(FILE_RULE),
            Rule::Custom(custom) => f.write_str(custom.name()),
        }
    }
}

impl From<&str> for Rule {
    fn from(token: &str) -> Self {
        Rule::parse(token)
    }
}

impl From<String> for Rule {
    fn from(token: String) -> Self {
        Rule::parse(&token)
    }
}

impl From<CustomRule> for Rule {
    fn from(custom: CustomRule) -> Self {
        Rule::Custom(custom)
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Rule::parse(&token))
    }
}

/// Zero-argument predicate supplied by the caller
///
/// The check does not receive the field value: it closes over whatever state
/// it needs (e.g. "passwords match"). Its `name` is the error code.
#[derive(Clone)]
pub struct CustomRule {
    name: String,
    check: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl CustomRule {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self) -> bool {
        (self.check)()
    }
}

impl PartialEq for CustomRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.check, &other.check)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomRule").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Rule::parse("required"), Rule::named("required"));
        assert_eq!(Rule::parse("minLength:3"), Rule::with_args("minLength", ["3"]));
        assert_eq!(Rule::parse("in:a:b:c"), Rule::with_args("in", ["a", "b", "c"]));
        assert_eq!(Rule::parse("file"), Rule::File);
        assert_eq!(Rule::parse(""), Rule::named(""));
    }

    #[test]
    fn test_display_round_trips_token() {
        assert_eq!(Rule::parse("in:a:b").to_string(), "in:a:b");
        assert_eq!(Rule::File.to_string(), "file");
        assert_eq!(Rule::custom("terms", || true).to_string(), "terms");
    }

    #[test]
    fn test_serde_as_token_string() {
        let rules: Vec<Rule> = serde_json::from_str(r#"["required", "file", "maxLength:5"]"#).unwrap();
        assert_eq!(
            rules,
            vec![Rule::named("required"), Rule::File, Rule::with_args("maxLength", ["5"])]
        );
        assert_eq!(
            serde_json::to_string(&rules).unwrap(),
            r#"["required","file","maxLength:5"]"#
        );
    }

    #[test]
    fn test_custom_rule_equality_is_identity() {
        let a = CustomRule::new("terms", || true);
        let b = CustomRule::new("terms", || true);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
