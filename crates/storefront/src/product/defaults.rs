//! Default product shapes and load-time normalization.

use storefront_record::{Map, Node};

use crate::error::FormError;

/// JavaScript truthiness, used where the backend may send `null`, `""`, `0`
/// or `false` for "unset".
pub(crate) fn is_truthy(node: &Node) -> bool {
    match node {
        Node::Null => false,
        Node::Bool(b) => *b,
        Node::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Node::String(s) => !s.is_empty(),
        Node::Array(_) | Node::Object(_) => true,
    }
}

fn empty_array() -> Node {
    Node::array(Vec::new())
}

fn default_gallery() -> Node {
    Node::object([
        ("images", empty_array()),
        ("videos", empty_array()),
        ("models3D", empty_array()),
    ])
}

fn default_seo() -> Node {
    Node::object([
        ("metaTitle", Node::from("")),
        ("metaDescription", Node::from("")),
        ("keywords", empty_array()),
        ("slug", Node::from("")),
    ])
}

fn default_shipping() -> Node {
    Node::object([
        ("weight", Node::from(0)),
        (
            "dimensions",
            Node::object([
                ("length", Node::from(0)),
                ("width", Node::from(0)),
                ("height", Node::from(0)),
            ]),
        ),
        ("freeShipping", Node::from(false)),
        ("shippingClass", Node::from("")),
    ])
}

/// A new variant row.
pub fn default_variant() -> Node {
    Node::object([
        ("color", Node::from("")),
        ("size", Node::from("")),
        ("stock", Node::from(0)),
        ("price", Node::from(0)),
        ("isActive", Node::from(true)),
        ("sku", Node::from("")),
    ])
}

/// A new specification row.
pub fn default_specification() -> Node {
    Node::object([
        ("name", Node::from("")),
        ("value", Node::from("")),
        ("group", Node::from("")),
    ])
}

/// A new detailed-description section placed at position `order`.
pub fn default_description_section(order: usize) -> Node {
    Node::object([
        ("title", Node::from("")),
        ("content", Node::from("")),
        ("type", Node::from("text")),
        ("order", Node::from(order)),
    ])
}

/// The record an empty product form starts from.
pub fn blank_product() -> Node {
    let text = |s: &str| Node::from(s);
    Node::object([
        ("_id", text("")),
        ("name", text("")),
        ("description", text("")),
        ("shortDescription", text("")),
        ("price", Node::from(0)),
        ("category", text("")),
        ("subCategory", text("")),
        ("childCategory", text("")),
        ("media", empty_array()),
        ("gallery", default_gallery()),
        ("images", empty_array()),
        ("brand", text("")),
        ("productModel", text("")),
        ("sku", text("")),
        ("barcode", text("")),
        ("status", text("draft")),
        ("featured", Node::from(false)),
        ("isDigital", Node::from(false)),
        ("discount", Node::from(0)),
        ("comparePrice", Node::from(0)),
        ("costPrice", Node::from(0)),
        ("taxable", Node::from(true)),
        ("taxClass", text("")),
        ("hasVariants", Node::from(false)),
        ("variants", empty_array()),
        ("stock", Node::from(0)),
        ("trackQuantity", Node::from(true)),
        ("allowBackorders", Node::from(false)),
        ("lowStockThreshold", Node::from(5)),
        ("features", empty_array()),
        ("specifications", empty_array()),
        ("detailedDescription", empty_array()),
        ("seo", default_seo()),
        ("shipping", default_shipping()),
        ("tags", empty_array()),
        ("vendor", text("")),
        ("supplier", text("")),
        ("manufacturingDate", text("")),
        ("expiryDate", text("")),
    ])
}

/// Date part of an ISO timestamp: everything before the first `T`.
fn date_only(node: Option<&Node>) -> Node {
    match node.and_then(Node::as_str) {
        Some(s) if !s.is_empty() => Node::from(s.split('T').next().unwrap_or_default()),
        _ => Node::from(""),
    }
}

/// Normalize a backend product record for editing.
///
/// Unset categories become `""`, unset collections become empty, unset
/// `gallery`/`seo`/`shipping` get their default shapes, and dates are cut to
/// `YYYY-MM-DD`. Keys already present keep their position; added keys are
/// appended.
///
/// # Errors
///
/// Returns [`FormError::NotAnObject`] when `record` is not an object.
pub fn normalize_product(record: &Node) -> Result<Node, FormError> {
    let source = record.as_object().ok_or(FormError::NotAnObject)?;
    let mut out: Map = source.clone();

    let mut or_default = |key: &str, default: fn() -> Node| {
        let keep = source.get(key).filter(|v| is_truthy(v)).cloned();
        out.insert(key.to_string(), keep.unwrap_or_else(default));
    };
    or_default("category", || Node::from(""));
    or_default("subCategory", || Node::from(""));
    or_default("childCategory", || Node::from(""));
    or_default("media", empty_array);
    or_default("gallery", default_gallery);
    or_default("images", empty_array);
    or_default("seo", default_seo);
    or_default("shipping", default_shipping);
    or_default("variants", empty_array);
    or_default("features", empty_array);
    or_default("specifications", empty_array);
    or_default("detailedDescription", empty_array);
    or_default("tags", empty_array);

    out.insert(
        "manufacturingDate".to_string(),
        date_only(source.get("manufacturingDate")),
    );
    out.insert("expiryDate".to_string(), date_only(source.get("expiryDate")));

    Ok(Node::object(out))
}
