//! Persistent record tree.
//!
//! A [`Node`] mirrors the shape of a JSON value, but its containers sit behind
//! an [`Arc`]. Cloning a node never copies a subtree, and a mutation that
//! rebuilds one branch leaves every other branch pointing at the same
//! allocation as before.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Object payload of a [`Node`]. Keys keep insertion order.
pub type Map = IndexMap<String, Node>;

/// A value in an editable record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Arc<Vec<Node>>),
    Object(Arc<Map>),
}

/// Largest integer magnitude an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Node {
    /// Builds an object node from key/value pairs.
    pub fn object<I, K>(entries: I) -> Node
    where
        I: IntoIterator<Item = (K, Node)>,
        K: Into<String>,
    {
        Node::Object(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Builds an array node.
    pub fn array(items: Vec<Node>) -> Node {
        Node::Array(Arc::new(items))
    }

    /// An empty object.
    pub fn empty_object() -> Node {
        Node::Object(Arc::new(Map::new()))
    }

    /// Converts a float into a number node.
    ///
    /// Integral values within the exactly-representable range are stored as
    /// integers, so `12.0` serializes as `12`. Non-finite values become
    /// [`Node::Null`], matching `serde_json`.
    pub fn from_f64(f: f64) -> Node {
        if !f.is_finite() {
            return Node::Null;
        }
        if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
            return Node::Number(Number::from(f as i64));
        }
        Number::from_f64(f).map(Node::Number).unwrap_or(Node::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key on an object node.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up an element on an array node.
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Returns true when both nodes are containers backed by the same
    /// allocation. Scalars are never considered shared.
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        match (a, b) {
            (Node::Array(x), Node::Array(y)) => Arc::ptr_eq(x, y),
            (Node::Object(x), Node::Object(y)) => Arc::ptr_eq(x, y),
            _ => false,
        }
    }

    /// Converts the tree into a `serde_json` value.
    pub fn to_json(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(n.clone()),
            Node::String(s) => Value::String(s.clone()),
            Node::Array(items) => Value::Array(items.iter().map(Node::to_json).collect()),
            Node::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::array(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::object(map.into_iter().map(|(k, v)| (k, Node::from(v)))),
        }
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        Node::from(value.clone())
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        node.to_json()
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.to_json()
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::from_f64(f)
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Number(Number::from(i))
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Node::Number(Number::from(i))
    }
}

impl From<u64> for Node {
    fn from(u: u64) -> Self {
        Node::Number(Number::from(u))
    }
}

impl From<usize> for Node {
    fn from(u: usize) -> Self {
        Node::Number(Number::from(u as u64))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::array(items)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
