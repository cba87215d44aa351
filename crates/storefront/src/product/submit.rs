//! Encoding a product form into a multipart update request.

use serde_json::Number;
use storefront_record::Node;

use super::media::{MediaKind, MediaRemovals, PendingUploads};
use crate::config::FormConfig;
use crate::error::FormError;

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    /// A pending upload, sent under `name` with its original file name.
    File { name: String, file_name: String },
}

impl FormPart {
    fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A ready-to-send product update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSubmission {
    pub method: &'static str,
    pub endpoint: String,
    pub parts: Vec<FormPart>,
}

impl ProductSubmission {
    /// Value of the first text part called `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            FormPart::File { file_name, .. } => Some(file_name.as_str()),
            FormPart::Text { .. } => None,
        })
    }
}

fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let abs = f.abs();
    if abs >= 1e21 || abs < 1e-6 {
        // Exponent form always carries a sign.
        let text = format!("{f:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Text form of a scalar as a browser would put it in a form field.
///
/// Containers are JSON-encoded.
pub fn field_text(value: &Node) -> Result<String, FormError> {
    Ok(match value {
        Node::Null => "null".to_string(),
        Node::Bool(b) => b.to_string(),
        Node::Number(n) => number_text(n),
        Node::String(s) => s.clone(),
        Node::Array(_) | Node::Object(_) => serde_json::to_string(value)?,
    })
}

/// Build the update request for `state`.
///
/// # Errors
///
/// [`FormError::MissingProductId`] when `_id` is unset or empty.
pub(crate) fn encode(
    state: &Node,
    removals: &MediaRemovals,
    uploads: &PendingUploads,
    config: &FormConfig,
) -> Result<ProductSubmission, FormError> {
    let id = match state.get("_id") {
        Some(id) if super::defaults::is_truthy(id) => field_text(id)?,
        _ => return Err(FormError::MissingProductId),
    };
    let fields = state.as_object().ok_or(FormError::NotAnObject)?;

    let mut parts = Vec::with_capacity(fields.len() + MediaKind::ALL.len() + uploads.len());
    for (key, value) in fields {
        let text = if config.is_json_field(key) {
            serde_json::to_string(value)?
        } else {
            field_text(value)?
        };
        parts.push(FormPart::text(key.as_str(), text));
    }
    for kind in MediaKind::ALL {
        parts.push(FormPart::text(
            kind.removal_field(),
            serde_json::to_string(removals.list(kind))?,
        ));
    }
    parts.extend(uploads.iter().map(|file| FormPart::File {
        name: "media".to_string(),
        file_name: file.file_name.clone(),
    }));

    Ok(ProductSubmission {
        method: "PUT",
        endpoint: format!("/v1/products/{id}"),
        parts,
    })
}
