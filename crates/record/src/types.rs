//! Type definitions for field paths.

/// One segment of a field path. Object key, or array index in canonical
/// decimal form.
pub type PathStep = String;

/// A parsed field path.
pub type Path = Vec<PathStep>;

/// Delimiter between segments of a field name.
pub const PATH_DELIMITER: char = '.';

/// The value a form input delivers for a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Text typed into an input, select or textarea.
    Text(String),
    /// State of a checkbox.
    Checked(bool),
}

impl FieldInput {
    pub fn is_checkbox(&self) -> bool {
        matches!(self, FieldInput::Checked(_))
    }
}

impl From<&str> for FieldInput {
    fn from(s: &str) -> Self {
        FieldInput::Text(s.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(s: String) -> Self {
        FieldInput::Text(s)
    }
}

impl From<bool> for FieldInput {
    fn from(b: bool) -> Self {
        FieldInput::Checked(b)
    }
}
