//! String rules
//!
//! Empty values pass every rule here; `required` is the only presence check.
//! Non-string values fail.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::Value;

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

// URL validation regex
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap()
});

/// Run `check` on a non-empty string value
fn check_str(value: &Value, check: impl FnOnce(&str) -> bool) -> bool {
    if value.is_empty() {
        return true;
    }
    value.as_str().map(check).unwrap_or(false)
}

fn first_usize(args: &[String]) -> Option<usize> {
    args.first().and_then(|a| a.trim().parse().ok())
}

/// Validate email format
pub fn email(value: &Value, _args: &[String]) -> bool {
    check_str(value, |s| EMAIL_REGEX.is_match(s))
}

/// Validate URL format (http/https only)
pub fn url(value: &Value, _args: &[String]) -> bool {
    check_str(value, |s| URL_REGEX.is_match(s))
}

/// `minLength:n` counts characters, not bytes
pub fn min_length(value: &Value, args: &[String]) -> bool {
    let Some(min) = first_usize(args) else {
        return false;
    };
    check_str(value, |s| s.chars().count() >= min)
}

/// `maxLength:n`
pub fn max_length(value: &Value, args: &[String]) -> bool {
    let Some(max) = first_usize(args) else {
        return false;
    };
    check_str(value, |s| s.chars().count() <= max)
}

/// `contains:text`
pub fn contains(value: &Value, args: &[String]) -> bool {
    let Some(needle) = args.first() else {
        return false;
    };
    check_str(value, |s| s.contains(needle.as_str()))
}

/// `equals:text`
pub fn equals(value: &Value, args: &[String]) -> bool {
    let Some(expected) = args.first() else {
        return false;
    };
    check_str(value, |s| s == expected)
}

/// `in:a:b:c` restricts the value to one of the listed options
pub fn one_of(value: &Value, allowed: &[String]) -> bool {
    check_str(value, |s| allowed.iter().any(|a| a == s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_email() {
        assert!(email(&Value::from("user@example.com"), &[]));
        assert!(email(&Value::from(""), &[]));
        assert!(!email(&Value::from("user@"), &[]));
        assert!(!email(&Value::from(42), &[]));
    }

    #[test]
    fn test_url() {
        assert!(url(&Value::from("https://example.com/path"), &[]));
        assert!(!url(&Value::from("example.com"), &[]));
        assert!(!url(&Value::from("ftp://example.com"), &[]));
    }

    #[test]
    fn test_length_rules() {
        assert!(min_length(&Value::from("hello"), &args(&["3"])));
        assert!(!min_length(&Value::from("hi"), &args(&["3"])));
        assert!(min_length(&Value::from("héé"), &args(&["3"])));

        assert!(max_length(&Value::from("hello"), &args(&["10"])));
        assert!(!max_length(&Value::from("verylongstring"), &args(&["5"])));

        // Misconfigured argument never passes
        assert!(!min_length(&Value::from("hello"), &[]));
    }

    #[test]
    fn test_matching_rules() {
        assert!(contains(&Value::from("hello world"), &args(&["world"])));
        assert!(!contains(&Value::from("hello world"), &args(&["foo"])));

        assert!(equals(&Value::from("yes"), &args(&["yes"])));
        assert!(!equals(&Value::from("no"), &args(&["yes"])));

        let allowed = args(&["admin", "user", "guest"]);
        assert!(one_of(&Value::from("admin"), &allowed));
        assert!(!one_of(&Value::from("superuser"), &allowed));
    }
}
