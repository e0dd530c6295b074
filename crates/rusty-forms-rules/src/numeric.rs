//! Numeric rules

use crate::Value;

fn bound(args: &[String]) -> Option<f64> {
    args.first().and_then(|a| a.trim().parse().ok())
}

/// Compare the value against the bound; empty values pass, non-numbers fail
fn compare(value: &Value, args: &[String], ok: impl FnOnce(f64, f64) -> bool) -> bool {
    let Some(limit) = bound(args) else {
        return false;
    };
    if value.is_empty() {
        return true;
    }
    value.as_f64().map(|n| ok(n, limit)).unwrap_or(false)
}

/// `min:n`
pub fn min(value: &Value, args: &[String]) -> bool {
    compare(value, args, |n, min| n >= min)
}

/// `max:n`
pub fn max(value: &Value, args: &[String]) -> bool {
    compare(value, args, |n, max| n <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let eighteen = vec!["18".to_string()];

        assert!(min(&Value::from(21), &eighteen));
        assert!(min(&Value::from("18"), &eighteen));
        assert!(!min(&Value::from(17), &eighteen));
        assert!(!min(&Value::from("abc"), &eighteen));

        assert!(max(&Value::from(18), &eighteen));
        assert!(!max(&Value::from(18.5), &eighteen));

        assert!(min(&Value::Null, &eighteen));
    }
}
