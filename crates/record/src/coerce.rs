//! Leaf coercion.
//!
//! Form inputs always deliver text. Fields named in [`NumericFields`] are
//! parsed into numbers before they are stored; everything else is stored as
//! delivered.

use std::collections::BTreeSet;

use crate::Node;

/// Field names treated as numeric unless configured otherwise.
pub const DEFAULT_NUMERIC_FIELDS: &[&str] = &[
    "price",
    "stock",
    "discount",
    "weight",
    "length",
    "width",
    "height",
    "comparePrice",
    "costPrice",
    "lowStockThreshold",
    "order",
];

/// The set of leaf names whose input is parsed as a number.
///
/// Matching is on the final path segment only, so `shipping.weight` and
/// `weight` are both numeric when `weight` is in the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericFields {
    names: BTreeSet<String>,
}

impl NumericFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty set: every leaf keeps its raw input.
    pub fn none() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.names.contains(field)
    }

    pub fn insert(&mut self, field: impl Into<String>) -> bool {
        self.names.insert(field.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for NumericFields {
    fn default() -> Self {
        Self::new(DEFAULT_NUMERIC_FIELDS.iter().copied())
    }
}

/// Parse the longest leading float literal of `input`.
///
/// Leading whitespace is skipped and trailing garbage is ignored, so
/// `"12abc"` is `12` and `"1e3x"` is `1000`. An exponent marker without
/// digits is not consumed. `Infinity` with an optional sign is recognized.
/// Returns `None` when no digits lead the input.
///
/// # Example
///
/// ```
/// use storefront_record::parse_float_prefix;
///
/// assert_eq!(parse_float_prefix("12.5"), Some(12.5));
/// assert_eq!(parse_float_prefix("  -3px"), Some(-3.0));
/// assert_eq!(parse_float_prefix(".5"), Some(0.5));
/// assert_eq!(parse_float_prefix("abc"), None);
/// assert_eq!(parse_float_prefix(""), None);
/// ```
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Coerce a raw input value into a number node.
///
/// Strings go through [`parse_float_prefix`]. The result is `0` whenever
/// nothing parses or the parsed value is zero, NaN, or not finite. Numbers
/// pass through; any other value becomes `0`.
pub fn coerce_number(raw: &Node) -> Node {
    let parsed = match raw {
        Node::Number(n) => n.as_f64(),
        Node::String(s) => parse_float_prefix(s),
        _ => None,
    };
    match parsed {
        Some(f) if f.is_finite() && f != 0.0 => match raw {
            Node::Number(_) => raw.clone(),
            _ => Node::from_f64(f),
        },
        _ => Node::from(0),
    }
}

/// Compute the value stored at a leaf named `field`.
///
/// Checkbox input is stored unchanged. Numeric fields are coerced with
/// [`coerce_number`]. Anything else is stored as delivered.
pub fn coerce_leaf(field: &str, raw: Node, is_checkbox: bool, numeric: &NumericFields) -> Node {
    if is_checkbox {
        return raw;
    }
    if numeric.contains(field) {
        return coerce_number(&raw);
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_float_prefix_plain() {
        assert_eq!(parse_float_prefix("0"), Some(0.0));
        assert_eq!(parse_float_prefix("42"), Some(42.0));
        assert_eq!(parse_float_prefix("12.5"), Some(12.5));
        assert_eq!(parse_float_prefix("-7.25"), Some(-7.25));
        assert_eq!(parse_float_prefix("+3"), Some(3.0));
    }

    #[test]
    fn test_parse_float_prefix_partial() {
        assert_eq!(parse_float_prefix("12abc"), Some(12.0));
        assert_eq!(parse_float_prefix("3.14.15"), Some(3.14));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("2e+"), Some(2.0));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("\t\n 8 kg"), Some(8.0));
    }

    #[test]
    fn test_parse_float_prefix_none() {
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("   "), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("e5"), None);
        assert_eq!(parse_float_prefix("NaN"), None);
        assert_eq!(parse_float_prefix("inf"), None);
    }

    #[test]
    fn test_parse_float_prefix_infinity() {
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("-Infinityx"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_coerce_number_strings() {
        assert_eq!(coerce_number(&Node::from("12.5")).to_json(), json!(12.5));
        assert_eq!(coerce_number(&Node::from("12")).to_json(), json!(12));
        assert_eq!(coerce_number(&Node::from("abc")).to_json(), json!(0));
        assert_eq!(coerce_number(&Node::from("")).to_json(), json!(0));
        assert_eq!(coerce_number(&Node::from("-0")).to_json(), json!(0));
        assert_eq!(coerce_number(&Node::from("Infinity")).to_json(), json!(0));
    }

    #[test]
    fn test_coerce_number_other_values() {
        assert_eq!(coerce_number(&Node::from(5)).to_json(), json!(5));
        assert_eq!(coerce_number(&Node::from(true)).to_json(), json!(0));
        assert_eq!(coerce_number(&Node::Null).to_json(), json!(0));
        assert_eq!(coerce_number(&Node::array(vec![])).to_json(), json!(0));
    }

    #[test]
    fn test_coerce_leaf() {
        let numeric = NumericFields::default();
        assert_eq!(
            coerce_leaf("price", Node::from("9.99"), false, &numeric).to_json(),
            json!(9.99)
        );
        assert_eq!(
            coerce_leaf("name", Node::from("9.99"), false, &numeric).to_json(),
            json!("9.99")
        );
        assert_eq!(
            coerce_leaf("price", Node::from(true), true, &numeric).to_json(),
            json!(true)
        );
    }

    #[test]
    fn test_numeric_fields_default_and_custom() {
        let numeric = NumericFields::default();
        assert_eq!(numeric.len(), DEFAULT_NUMERIC_FIELDS.len());
        assert!(numeric.contains("lowStockThreshold"));
        assert!(!numeric.contains("sku"));

        let mut custom = NumericFields::none();
        assert!(custom.is_empty());
        assert!(custom.insert("rating"));
        assert!(!custom.insert("rating"));
        assert_eq!(custom.iter().collect::<Vec<_>>(), vec!["rating"]);
    }
}
