//! File rules and byte-size formatting
//!
//! File rules receive a single entry of a file input's value. Entries that are
//! not files are treated as a nameless, empty file.

use crate::Value;

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Extension of a file entry, empty for non-file values
pub fn file_extension(value: &Value) -> String {
    value
        .as_file()
        .map(|file| file.extension())
        .unwrap_or_default()
}

/// File extension must be one of `allowed` (compared lowercase)
pub fn extensions(value: &Value, allowed: &[String]) -> bool {
    let ext = file_extension(value);
    allowed.iter().any(|a| *a == ext)
}

/// File must not exceed `args[0]` megabytes
///
/// The limit is parsed as a float so `"0.5"` means 512 KB. A missing or
/// unparsable limit fails the rule.
pub fn max_size(value: &Value, args: &[String]) -> bool {
    let Some(max_mb) = args.first().and_then(|a| a.trim().parse::<f64>().ok()) else {
        tracing::warn!(?args, "maxSize rule has no numeric limit");
        return false;
    };

    let size = value.as_file().map(|file| file.size).unwrap_or(0);
    size as f64 <= max_mb * BYTES_PER_MEGABYTE
}

/// Human readable byte count: `1536` → `"1.5 KB"`, `0` → `"n/a"`
pub fn bytes_to_size(bytes: u64) -> String {
    if bytes == 0 {
        return "n/a".to_string();
    }

    // floor(log1024(bytes)) in integers; float logs land just below whole
    // powers (1 GB would print as "1024.0 MB")
    let mut i = 0;
    while i + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(i as u32 + 1) {
        i += 1;
    }

    if i == 0 {
        return format!("{} {}", bytes, SIZE_UNITS[0]);
    }

    format!("{:.1} {}", bytes as f64 / 1024f64.powi(i as i32), SIZE_UNITS[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileInfo;
    use rstest::rstest;

    fn file(name: &str, size: u64) -> Value {
        Value::File(FileInfo::new(name, size))
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(0, "n/a")]
    #[case(1, "1 Bytes")]
    #[case(1023, "1023 Bytes")]
    #[case(1024, "1.0 KB")]
    #[case(1536, "1.5 KB")]
    #[case(1024 * 1024, "1.0 MB")]
    #[case(1024 * 1024 * 1024, "1.0 GB")]
    #[case(5 * 1024 * 1024 * 1024, "5.0 GB")]
    #[case(2048 * 1024 * 1024 * 1024 * 1024, "2048.0 TB")]
    fn test_bytes_to_size(#[case] bytes: u64, #[case] expected: &str) {
        assert_eq!(bytes_to_size(bytes), expected);
    }

    #[test]
    fn test_extensions() {
        let allowed = args(&["png", "jpg"]);

        assert!(extensions(&file("photo.PNG", 1), &allowed));
        assert!(extensions(&file("scan.final.jpg", 1), &allowed));
        assert!(!extensions(&file("noext", 1), &args(&["png"])));
        assert!(!extensions(&file("a.exe", 10), &allowed));
        assert!(!extensions(&Value::from("photo.png"), &allowed));
    }

    #[test]
    fn test_max_size() {
        assert!(!max_size(&file("big.png", 2 * 1024 * 1024), &args(&["1"])));
        assert!(max_size(&file("small.png", 500 * 1024), &args(&["1"])));
        assert!(max_size(&file("edge.png", 1024 * 1024), &args(&["1"])));
        assert!(max_size(&file("half.png", 512 * 1024), &args(&["0.5"])));
    }

    #[test]
    fn test_max_size_without_limit_fails() {
        assert!(!max_size(&file("a.png", 1), &[]));
        assert!(!max_size(&file("a.png", 1), &args(&["big"])));
    }
}
