use serde_json::json;
use storefront::product::FormPart;
use storefront::{FieldInput, FormConfig, FormError, MediaKind, NewMedia, Node, ProductForm};

const PRODUCT: &str = r#"{
    "_id": "665f1c",
    "name": "Weekender",
    "price": 180,
    "discount": 10,
    "featured": false,
    "category": "bags",
    "gallery": {"images": ["/g/1.jpg", "/g/2.jpg"], "videos": [], "models3D": []},
    "seo": {"metaTitle": "", "metaDescription": "", "keywords": ["travel"], "slug": "weekender"},
    "variants": [{"_id": "v1", "color": "Black", "size": "L", "stock": 3, "price": 180, "isActive": true, "sku": "WK-BLK-L"}],
    "manufacturingDate": "2025-02-10T08:30:00.000Z",
    "rating": null
}"#;

fn loaded() -> ProductForm {
    ProductForm::from_json_str(FormConfig::default(), PRODUCT).unwrap()
}

#[test]
fn load_normalizes_backend_record() {
    let state = loaded().state().to_json();
    assert_eq!(state["manufacturingDate"], json!("2025-02-10"));
    assert_eq!(state["expiryDate"], json!(""));
    assert_eq!(state["subCategory"], json!(""));
    assert_eq!(state["tags"], json!([]));
    assert_eq!(state["shipping"]["dimensions"]["height"], json!(0));
    assert_eq!(state["rating"], json!(null));
}

#[test]
fn edit_session_produces_expected_submission() {
    let mut form = loaded();
    form.handle_name_change("Weekender Duffle");
    form.handle_change("price", FieldInput::from("165.5"));
    form.handle_change("shipping.weight", FieldInput::from("1.2"));
    form.handle_change("featured", FieldInput::from(true));
    form.handle_variant_change(0, "stock", 7);
    form.add_tag();
    form.handle_tag_change(0, "duffle");
    form.toggle_removal(MediaKind::GalleryImage, "/g/2.jpg");
    form.add_new_media([NewMedia::new("side.jpg", "blob:a"), NewMedia::new("back.jpg", "blob:b")]);
    form.remove_new_media(1);

    let submission = form.submission().unwrap();
    assert_eq!(submission.method, "PUT");
    assert_eq!(submission.endpoint, "/v1/products/665f1c");

    assert_eq!(submission.text("name"), Some("Weekender Duffle"));
    assert_eq!(submission.text("price"), Some("165.5"));
    assert_eq!(submission.text("discount"), Some("10"));
    assert_eq!(submission.text("featured"), Some("true"));
    assert_eq!(submission.text("rating"), Some("null"));
    assert_eq!(submission.text("tags"), Some(r#"["duffle"]"#));

    let seo: serde_json::Value = serde_json::from_str(submission.text("seo").unwrap()).unwrap();
    assert_eq!(seo["slug"], json!("weekender-duffle"));
    assert_eq!(seo["metaTitle"], json!("Weekender Duffle"));
    assert_eq!(seo["keywords"], json!(["travel"]));

    let shipping: serde_json::Value =
        serde_json::from_str(submission.text("shipping").unwrap()).unwrap();
    assert_eq!(shipping["weight"], json!(1.2));

    let variants: serde_json::Value =
        serde_json::from_str(submission.text("variants").unwrap()).unwrap();
    assert_eq!(variants[0]["stock"], json!(7));

    assert_eq!(submission.text("galleryImagesToRemove"), Some(r#"["/g/2.jpg"]"#));
    assert_eq!(submission.text("mediaToRemove"), Some("[]"));
    assert_eq!(submission.files().collect::<Vec<_>>(), vec!["side.jpg"]);
}

#[test]
fn submission_parts_follow_record_order_then_removals_then_files() {
    let mut form = loaded();
    form.add_new_media([NewMedia::new("a.jpg", "blob:a")]);
    let submission = form.submission().unwrap();
    let names: Vec<&str> = submission
        .parts
        .iter()
        .map(|part| match part {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name.as_str(),
        })
        .collect();
    assert_eq!(&names[..3], &["_id", "name", "price"]);
    let tail = &names[names.len() - 5..];
    assert_eq!(
        tail,
        &[
            "mediaToRemove",
            "galleryImagesToRemove",
            "galleryVideosToRemove",
            "galleryModelsToRemove",
            "media"
        ]
    );
}

#[test]
fn blank_form_cannot_be_submitted() {
    let form = ProductForm::default();
    assert!(matches!(form.submission(), Err(FormError::MissingProductId)));
}

#[test]
fn edits_never_touch_previous_states() {
    let mut form = loaded();
    let snapshot = form.state().clone();
    let snapshot_json = snapshot.to_json();
    form.handle_change("shipping.dimensions.length", FieldInput::from("40"));
    form.add_variant();
    form.remove_keyword(0);
    form.handle_description_section_change(0, "title", "ignored");
    assert_eq!(snapshot.to_json(), snapshot_json);
    assert!(Node::ptr_eq(
        snapshot.get("gallery").unwrap(),
        form.state().get("gallery").unwrap()
    ));
}

#[test]
fn configured_numeric_fields_drive_coercion() {
    let config = FormConfig::from_toml_str(r#"numeric_fields = ["rating"]"#).unwrap();
    let mut form = ProductForm::from_json_str(config, PRODUCT).unwrap();
    form.handle_change("rating", FieldInput::from("4.5"));
    form.handle_change("price", FieldInput::from("99"));
    let state = form.state().to_json();
    assert_eq!(state["rating"], json!(4.5));
    assert_eq!(state["price"], json!("99"));
}

#[test]
fn non_object_record_is_rejected() {
    let err = ProductForm::from_json_str(FormConfig::default(), "[1, 2]").unwrap_err();
    assert!(matches!(err, FormError::NotAnObject));
}
