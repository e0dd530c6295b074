//! rusty-forms rule library
//!
//! Named predicates of the shape `(value, args) -> bool` that rule tokens such
//! as `"required"` or `"minLength:3"` resolve to, plus the file rules
//! (`extensions`, `maxSize`) and a byte-size formatter for upload hints.

pub mod file;
pub mod numeric;
pub mod registry;
pub mod required;
pub mod string;
pub mod value;

pub use file::{bytes_to_size, extensions, file_extension, max_size};
pub use registry::{ArgSpec, RuleError, RuleFn, RuleRegistry};
pub use required::required;
pub use value::{FileInfo, Value};
