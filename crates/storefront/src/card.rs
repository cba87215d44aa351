//! Request bodies sent by a product card's cart and wishlist buttons.
//!
//! Keys the product lacks are left out rather than sent as `null`.

use serde_json::{json, Map, Value};
use storefront_record::Node;

use crate::product::{field_text, is_truthy};

fn copy(out: &mut Map<String, Value>, to: &str, product: &Node, from: &str) {
    if let Some(value) = product.get(from) {
        out.insert(to.to_string(), value.to_json());
    }
}

fn truthy(node: Option<&Node>) -> Option<&Node> {
    node.filter(|n| is_truthy(n))
}

fn first_image(product: &Node) -> Option<&Node> {
    truthy(product.get("images").and_then(|images| images.get_index(0)))
}

/// The variant a card adds by default: the first one, when the product has
/// variants enabled.
fn default_variant(product: &Node) -> Option<&Node> {
    truthy(product.get("hasVariants"))?;
    product.get("variants")?.get_index(0)
}

fn line(product: &Node, placeholder: &str) -> Map<String, Value> {
    let mut out = Map::new();
    copy(&mut out, "product", product, "_id");
    copy(&mut out, "name", product, "name");
    copy(&mut out, "price", product, "price");
    copy(&mut out, "discount", product, "discount");
    out.insert("quantity".to_string(), json!(1));
    let image = first_image(product)
        .or_else(|| truthy(product.get("image")))
        .map(Node::to_json)
        .unwrap_or_else(|| json!(placeholder));
    out.insert("image".to_string(), image);
    out
}

/// Body for the add-to-cart request: `{"products": [line]}`.
pub fn cart_request(product: &Node, placeholder: &str) -> Value {
    let mut line = line(product, placeholder);
    if let Some(variant) = default_variant(product) {
        copy(&mut line, "variantId", variant, "_id");
    }
    json!({ "products": [Value::Object(line)] })
}

/// The line stored in the local cart, including the variant's attributes.
pub fn cart_item(product: &Node, placeholder: &str) -> Value {
    let mut item = line(product, placeholder);
    if let Some(variant) = default_variant(product) {
        copy(&mut item, "variantId", variant, "_id");
        copy(&mut item, "color", variant, "color");
        copy(&mut item, "size", variant, "size");
        copy(&mut item, "sku", variant, "sku");
    }
    Value::Object(item)
}

/// Body for the add-to-wishlist request. Cards never pick a variant.
pub fn wishlist_entry(product: &Node, placeholder: &str) -> Value {
    let mut out = Map::new();
    copy(&mut out, "productId", product, "_id");
    copy(&mut out, "name", product, "name");
    copy(&mut out, "price", product, "price");
    copy(&mut out, "discount", product, "discount");
    let image = first_image(product)
        .map(Node::to_json)
        .unwrap_or_else(|| json!(placeholder));
    out.insert("image".to_string(), image);
    Value::Object(out)
}

/// Price after a percentage discount. Missing prices count as zero.
pub fn final_price(product: &Node) -> f64 {
    let price = product.get("price").and_then(Node::as_f64).unwrap_or(0.0);
    match product.get("discount").and_then(Node::as_f64) {
        Some(discount) if discount > 0.0 => price * (1.0 - discount / 100.0),
        _ => price,
    }
}

/// A price as shown on a card: two decimals.
pub fn display_price(price: f64) -> String {
    format!("{price:.2}")
}

/// Product page route for a card click.
pub fn product_route(product: &Node) -> Option<String> {
    let id = truthy(product.get("_id"))?;
    field_text(id).ok().map(|id| format!("/products/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Node {
        Node::from(json!({
            "_id": "p1",
            "name": "Tote",
            "price": 200,
            "discount": 25,
            "images": ["/img/tote.jpg"],
            "hasVariants": true,
            "variants": [
                {"_id": "v1", "color": "Black", "size": "M", "sku": "TOTE-BLK-M"},
                {"_id": "v2", "color": "Brown", "size": "L", "sku": "TOTE-BRN-L"}
            ]
        }))
    }

    #[test]
    fn test_cart_request_uses_first_variant() {
        let body = cart_request(&product(), "/placeholder.png");
        assert_eq!(
            body,
            json!({"products": [{
                "product": "p1",
                "name": "Tote",
                "price": 200,
                "discount": 25,
                "quantity": 1,
                "image": "/img/tote.jpg",
                "variantId": "v1"
            }]})
        );
    }

    #[test]
    fn test_cart_item_carries_variant_attributes() {
        let item = cart_item(&product(), "/placeholder.png");
        assert_eq!(item["color"], json!("Black"));
        assert_eq!(item["size"], json!("M"));
        assert_eq!(item["sku"], json!("TOTE-BLK-M"));
    }

    #[test]
    fn test_no_variant_when_disabled() {
        let mut record = product().to_json();
        record["hasVariants"] = json!(false);
        let item = cart_item(&Node::from(record), "/placeholder.png");
        assert!(item.get("variantId").is_none());
        assert!(item.get("color").is_none());
    }

    #[test]
    fn test_image_fallbacks() {
        let bare = Node::from(json!({"_id": "p2", "image": "/img/single.jpg"}));
        assert_eq!(cart_item(&bare, "/ph.png")["image"], json!("/img/single.jpg"));
        assert_eq!(wishlist_entry(&bare, "/ph.png")["image"], json!("/ph.png"));

        let empty = Node::from(json!({"_id": "p3", "images": []}));
        assert_eq!(cart_item(&empty, "/ph.png")["image"], json!("/ph.png"));
    }

    #[test]
    fn test_wishlist_entry() {
        let entry = wishlist_entry(&product(), "/placeholder.png");
        assert_eq!(
            entry,
            json!({
                "productId": "p1",
                "name": "Tote",
                "price": 200,
                "discount": 25,
                "image": "/img/tote.jpg"
            })
        );
    }

    #[test]
    fn test_final_price() {
        assert_eq!(final_price(&product()), 150.0);
        assert_eq!(final_price(&Node::from(json!({"price": 80, "discount": 0}))), 80.0);
        assert_eq!(final_price(&Node::from(json!({}))), 0.0);
        assert_eq!(display_price(final_price(&product())), "150.00");
    }

    #[test]
    fn test_product_route() {
        assert_eq!(product_route(&product()).as_deref(), Some("/products/p1"));
        assert_eq!(product_route(&Node::from(json!({"name": "x"}))), None);
    }
}
