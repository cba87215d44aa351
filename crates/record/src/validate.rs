//! Strict validation of field names.
//!
//! The mutator accepts any field name. These checks are for callers that take
//! field names from outside a form, such as the command line.

use thiserror::Error;

use crate::PATH_DELIMITER;

/// Maximum allowed field name length in bytes.
const MAX_FIELD_NAME_LENGTH: usize = 1024;

/// Maximum allowed path depth. Deeper edits are dropped by the mutator.
pub const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field name is empty")]
    EmptyFieldName,
    #[error("field name has an empty segment at position {0}")]
    EmptySegment(usize),
    #[error("field name too long")]
    FieldNameTooLong,
    #[error("path too long")]
    PathTooLong,
}

/// Validate a dotted field name.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - Any segment between delimiters is empty (`"a..b"`, `".a"`, `"a."`)
/// - The name exceeds 1024 bytes or 256 segments
///
/// # Example
///
/// ```
/// use storefront_record::validate_field_path;
///
/// validate_field_path("shipping.dimensions.length").unwrap();
/// validate_field_path("shipping..length").unwrap_err();
/// ```
pub fn validate_field_path(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyFieldName);
    }
    if name.len() > MAX_FIELD_NAME_LENGTH {
        return Err(ValidationError::FieldNameTooLong);
    }
    let mut depth = 0;
    for (i, segment) in name.split(PATH_DELIMITER).enumerate() {
        if segment.is_empty() {
            return Err(ValidationError::EmptySegment(i));
        }
        depth += 1;
    }
    if depth > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    Ok(())
}

/// Validate an already parsed path.
pub fn validate_path(path: &[String]) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    if let Some(i) = path.iter().position(String::is_empty) {
        return Err(ValidationError::EmptySegment(i));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_simple_names() {
        assert!(validate_field_path("price").is_ok());
        assert!(validate_field_path("seo.metaTitle").is_ok());
        assert!(validate_field_path("variants.0.color").is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        assert_eq!(validate_field_path(""), Err(ValidationError::EmptyFieldName));
    }

    #[test]
    fn test_validate_empty_segments() {
        assert_eq!(validate_field_path(".a"), Err(ValidationError::EmptySegment(0)));
        assert_eq!(validate_field_path("a..b"), Err(ValidationError::EmptySegment(1)));
        assert_eq!(validate_field_path("a."), Err(ValidationError::EmptySegment(1)));
    }

    #[test]
    fn test_validate_long_name() {
        let name = "a".repeat(2000);
        assert_eq!(validate_field_path(&name), Err(ValidationError::FieldNameTooLong));
    }

    #[test]
    fn test_validate_deep_name() {
        let name = vec!["a"; 300].join(".");
        assert_eq!(validate_field_path(&name), Err(ValidationError::PathTooLong));
        let name = vec!["a"; 256].join(".");
        assert!(validate_field_path(&name).is_ok());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path(&["a".to_string(), "b".to_string()]).is_ok());
        assert_eq!(
            validate_path(&["a".to_string(), String::new()]),
            Err(ValidationError::EmptySegment(1))
        );
        let deep: Vec<String> = (0..300).map(|i| i.to_string()).collect();
        assert_eq!(validate_path(&deep), Err(ValidationError::PathTooLong));
    }
}
