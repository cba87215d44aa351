//! Copy-on-write mutation of a record by field path.
//!
//! Every container on the addressed path is shallow-copied and rebuilt; every
//! container off the path is carried over by reference. The input record is
//! never modified.
//!
//! Missing or scalar intermediates are replaced by empty objects. Arrays are
//! never created for intermediates, but existing arrays are descended when the
//! step is a canonical index inside their bounds. Any other step against an
//! array drops the edit and hands back the input record, as does a path
//! deeper than [`MAX_PATH_LENGTH`].

use std::sync::Arc;

use tracing::debug;

use crate::coerce::{coerce_leaf, NumericFields};
use crate::{get, is_valid_index, parse_field_path, FieldInput, Map, Node, MAX_PATH_LENGTH};

/// Applies form edits to a record.
///
/// Holds the single numeric field set consulted by every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMutator {
    numeric: NumericFields,
}

impl PathMutator {
    pub fn new(numeric: NumericFields) -> Self {
        Self { numeric }
    }

    pub fn numeric_fields(&self) -> &NumericFields {
        &self.numeric
    }

    /// Return a new record with the leaf at the dotted `path` set to the
    /// coerced `raw` value.
    ///
    /// # Example
    ///
    /// ```
    /// use storefront_record::{Node, PathMutator};
    /// use serde_json::json;
    ///
    /// let mutator = PathMutator::default();
    /// let state = Node::from(json!({"shipping": {"weight": 0}}));
    /// let next = mutator.update(&state, "shipping.weight", "1.5", false);
    /// assert_eq!(next.to_json(), json!({"shipping": {"weight": 1.5}}));
    /// assert_eq!(state.to_json(), json!({"shipping": {"weight": 0}}));
    /// ```
    pub fn update(&self, state: &Node, path: &str, raw: impl Into<Node>, is_checkbox: bool) -> Node {
        let steps = parse_field_path(path);
        let field = steps.last().map(String::as_str).unwrap_or_default();
        let value = coerce_leaf(field, raw.into(), is_checkbox, &self.numeric);
        debug!(path, %value, "update field");
        set_in(state, &steps, value)
    }

    /// Apply an input event: text or checkbox.
    pub fn apply(&self, state: &Node, path: &str, input: FieldInput) -> Node {
        match input {
            FieldInput::Text(text) => self.update(state, path, text, false),
            FieldInput::Checked(checked) => self.update(state, path, checked, true),
        }
    }
}

/// Return a new record with `value` stored at `path`, without coercion.
///
/// An empty path replaces the whole record.
pub fn set_in(state: &Node, path: &[String], value: Node) -> Node {
    if path.len() > MAX_PATH_LENGTH {
        debug!(depth = path.len(), "path too deep, edit dropped");
        return state.clone();
    }
    match rebuild(state, path, value) {
        Some(next) => next,
        None => state.clone(),
    }
}

fn rebuild(node: &Node, path: &[String], value: Node) -> Option<Node> {
    let Some((step, rest)) = path.split_first() else {
        return Some(value);
    };
    match node {
        Node::Array(items) => {
            let Some(index) = array_index(step, items.len()) else {
                debug!(step = %step, len = items.len(), "array step out of range, edit dropped");
                return None;
            };
            let child = rebuild(&items[index], rest, value)?;
            let mut next = (**items).clone();
            next[index] = child;
            Some(Node::Array(Arc::new(next)))
        }
        Node::Object(map) => {
            let child = match map.get(step) {
                Some(existing) => rebuild(existing, rest, value)?,
                None => rebuild(&Node::Null, rest, value)?,
            };
            let mut next = (**map).clone();
            next.insert(step.clone(), child);
            Some(Node::Object(Arc::new(next)))
        }
        _ => {
            let child = rebuild(&Node::Null, rest, value)?;
            let mut next = Map::new();
            next.insert(step.clone(), child);
            Some(Node::Object(Arc::new(next)))
        }
    }
}

fn array_index(step: &str, len: usize) -> Option<usize> {
    if !is_valid_index(step) {
        return None;
    }
    step.parse::<usize>().ok().filter(|&i| i < len)
}

/// Append `item` to the array at `field_path`.
///
/// A missing or non-array value at the path is replaced by a fresh array
/// holding only `item`.
///
/// # Example
///
/// ```
/// use storefront_record::{append_item, Node};
/// use serde_json::json;
///
/// let state = Node::from(json!({"variants": []}));
/// let next = append_item(&state, "variants", Node::from(json!({"color": ""})));
/// assert_eq!(next.to_json(), json!({"variants": [{"color": ""}]}));
/// ```
pub fn append_item(state: &Node, field_path: &str, item: Node) -> Node {
    let path = parse_field_path(field_path);
    let mut items = match get(state, &path) {
        Some(Node::Array(existing)) => (**existing).clone(),
        _ => Vec::new(),
    };
    items.push(item);
    debug!(field = field_path, len = items.len(), "append item");
    set_in(state, &path, Node::array(items))
}

/// Remove the element at `index` from the array at `field_path`.
///
/// An out-of-range index, or a path that does not hold an array, returns the
/// input record unchanged.
pub fn remove_item_at(state: &Node, field_path: &str, index: usize) -> Node {
    let path = parse_field_path(field_path);
    let Some(Node::Array(items)) = get(state, &path) else {
        return state.clone();
    };
    if index >= items.len() {
        return state.clone();
    }
    let next: Vec<Node> = items
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, item)| item.clone())
        .collect();
    debug!(field = field_path, index, "remove item");
    set_in(state, &path, Node::array(next))
}

/// Replace the element at `index` of the array at `field_path` with
/// `updater(&old)`.
///
/// An out-of-range index, or a path that does not hold an array, returns the
/// input record unchanged and never calls `updater`.
pub fn replace_item_at<F>(state: &Node, field_path: &str, index: usize, updater: F) -> Node
where
    F: FnOnce(&Node) -> Node,
{
    let path = parse_field_path(field_path);
    let Some(Node::Array(items)) = get(state, &path) else {
        return state.clone();
    };
    let Some(old) = items.get(index) else {
        return state.clone();
    };
    let replacement = updater(old);
    let mut next = (**items).clone();
    next[index] = replacement;
    debug!(field = field_path, index, "replace item");
    set_in(state, &path, Node::array(next))
}
