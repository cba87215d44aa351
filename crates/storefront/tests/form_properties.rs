use proptest::prelude::*;
use serde_json::json;
use storefront::{generate_slug, FieldInput, FormConfig, Node, ProductForm};

fn is_slug(s: &str) -> bool {
    s.is_empty()
        || s.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

fn arb_field() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "name",
        "price",
        "stock",
        "seo.metaTitle",
        "shipping.weight",
        "shipping.dimensions.height",
        "variants.0.color",
        "variants.0.stock",
        "tags.0",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn slug_is_dash_separated_lowercase_words(name in "\\PC{0,24}") {
        let slug = generate_slug(&name);
        prop_assert!(is_slug(&slug), "{:?} -> {:?}", name, slug);
        prop_assert_eq!(generate_slug(&slug), slug.clone());
    }

    #[test]
    fn edits_never_alter_a_snapshot(
        edits in prop::collection::vec((arb_field(), "[a-z0-9.]{0,6}"), 1..8),
    ) {
        let record = Node::from(json!({
            "_id": "p1",
            "name": "Tote",
            "price": 20,
            "variants": [{"color": "Red", "stock": 1}],
            "tags": ["leather"]
        }));
        let mut form = ProductForm::load(FormConfig::default(), &record).unwrap();
        let snapshot = form.state().clone();
        let before = snapshot.to_json();

        for (field, value) in edits {
            form.handle_change(&field, FieldInput::from(value.as_str()));
        }
        form.add_variant();
        form.remove_tag(0);

        prop_assert_eq!(snapshot.to_json(), before);
    }
}
