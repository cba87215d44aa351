//! Editable record trees addressed by dotted field paths.
//!
//! A form's record is held as a [`Node`]. Every edit produces a new record:
//! containers along the edited path are shallow-copied, every other subtree is
//! shared with the previous record.
//!
//! # Example
//!
//! ```
//! use storefront_record::{parse_field_path, get, Node, PathMutator};
//! use serde_json::json;
//!
//! // Split a field name into path segments
//! let path = parse_field_path("shipping.dimensions.length");
//! assert_eq!(path, vec!["shipping", "dimensions", "length"]);
//!
//! // Apply an edit
//! let mutator = PathMutator::default();
//! let state = Node::from(json!({"name": "Tote", "shipping": {}}));
//! let next = mutator.update(&state, "shipping.dimensions.length", "30", false);
//! assert_eq!(get(&next, &path), Some(&Node::from(30)));
//!
//! // Untouched branches are shared
//! assert_eq!(state.get("shipping").unwrap().to_json(), json!({}));
//! ```

use thiserror::Error;

pub mod types;
pub use types::{FieldInput, Path, PathStep, PATH_DELIMITER};

pub mod node;
pub use node::{Map, Node};

pub mod coerce;
pub use coerce::{coerce_leaf, coerce_number, parse_float_prefix, NumericFields, DEFAULT_NUMERIC_FIELDS};

mod get;
pub use get::get;

pub mod mutate;
pub use mutate::{append_item, remove_item_at, replace_item_at, set_in, PathMutator};

pub mod validate;
pub use validate::{validate_field_path, validate_path, ValidationError, MAX_PATH_LENGTH};

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("path has no parent")]
    NoParent,
    #[error("invalid record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Split a field name into path segments.
///
/// Segments are never dropped, so empty names and doubled delimiters yield
/// empty segments.
///
/// # Example
///
/// ```
/// use storefront_record::parse_field_path;
///
/// assert_eq!(parse_field_path("price"), vec!["price"]);
/// assert_eq!(parse_field_path("seo.keywords"), vec!["seo", "keywords"]);
/// assert_eq!(parse_field_path("a..b"), vec!["a", "", "b"]);
/// assert_eq!(parse_field_path(""), vec![""]);
/// ```
pub fn parse_field_path(name: &str) -> Path {
    name.split(PATH_DELIMITER).map(str::to_string).collect()
}

/// Join path segments back into a field name.
///
/// # Example
///
/// ```
/// use storefront_record::format_field_path;
///
/// assert_eq!(format_field_path(&["seo".to_string(), "slug".to_string()]), "seo.slug");
/// ```
pub fn format_field_path(path: &[String]) -> String {
    path.join(".")
}

/// Check if `parent` path contains the `child` path.
///
/// # Example
///
/// ```
/// use storefront_record::{is_child, parse_field_path};
///
/// assert!(is_child(&parse_field_path("shipping"), &parse_field_path("shipping.weight")));
/// assert!(!is_child(&parse_field_path("shipping.weight"), &parse_field_path("shipping")));
/// ```
pub fn is_child(parent: &[String], child: &[String]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns [`RecordError::NoParent`] for the empty path.
pub fn parent(path: &[String]) -> Result<Path, RecordError> {
    match path.split_last() {
        Some((_, init)) => Ok(init.to_vec()),
        None => Err(RecordError::NoParent),
    }
}

/// Check if a string is a canonical array index: decimal digits with no
/// leading zero unless it is `"0"`.
///
/// # Example
///
/// ```
/// use storefront_record::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("12"));
/// assert!(!is_valid_index("012"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(step: &str) -> bool {
    let bytes = step.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

/// Parse a JSON document into a record.
pub fn from_json_str(json: &str) -> Result<Node, RecordError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(Node::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_round_trip() {
        for name in ["price", "shipping.dimensions.height", "a..b", ""] {
            assert_eq!(format_field_path(&parse_field_path(name)), name);
        }
    }

    #[test]
    fn test_parent() {
        let path = parse_field_path("shipping.dimensions.length");
        assert_eq!(parent(&path).unwrap(), vec!["shipping", "dimensions"]);
        assert!(matches!(parent(&[]), Err(RecordError::NoParent)));
    }

    #[test]
    fn test_is_child_same_path() {
        let path = parse_field_path("seo.slug");
        assert!(!is_child(&path, &path));
        assert!(is_child(&[], &path));
    }

    #[test]
    fn test_from_json_str() {
        let node = from_json_str(r#"{"a": [1]}"#).unwrap();
        assert!(node.get("a").unwrap().is_array());
        assert!(matches!(from_json_str("{"), Err(RecordError::Json(_))));
    }
}
