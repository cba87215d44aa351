//! Admin product editing form.
//!
//! [`ProductForm`] owns the record being edited and replaces it wholesale on
//! every edit. All nested edits go through the record's [`PathMutator`]; the
//! list helpers go through its array companions.

mod defaults;
mod media;
mod submit;

pub use defaults::{
    blank_product, default_description_section, default_specification, default_variant,
    normalize_product,
};
pub(crate) use defaults::is_truthy;
pub use media::{MediaKind, MediaRemovals, NewMedia, PendingUploads};
pub use submit::{field_text, FormPart, ProductSubmission};

use std::collections::BTreeMap;

use storefront_record::{
    append_item, get, parse_field_path, remove_item_at, replace_item_at, set_in, FieldInput,
    Node, PathMutator,
};
use tracing::{debug, warn};

use crate::config::{FormConfig, FormOptions};
use crate::error::FormError;
use crate::slug::generate_slug;

const VARIANTS: &str = "variants";
const SPECIFICATIONS: &str = "specifications";
const DESCRIPTION: &str = "detailedDescription";
const FEATURES: &str = "features";
const TAGS: &str = "tags";
const KEYWORDS: &str = "seo.keywords";

/// Collapsible sections of the form, with their initial state.
const SECTIONS: &[(&str, bool)] = &[
    ("basic", true),
    ("media", true),
    ("inventory", false),
    ("pricing", false),
    ("features", false),
    ("seo", false),
    ("shipping", false),
    ("additional", false),
];

/// Set one key on an element of a list, keeping the rest of the element.
fn merge_field(element: &Node, field: &str, value: Node) -> Node {
    let element = if element.is_object() {
        element.clone()
    } else {
        Node::empty_object()
    };
    set_in(&element, &[field.to_string()], value)
}

#[derive(Debug, Clone)]
pub struct ProductForm {
    state: Node,
    config: FormConfig,
    mutator: PathMutator,
    removals: MediaRemovals,
    uploads: PendingUploads,
    sections: BTreeMap<String, bool>,
}

impl ProductForm {
    /// An empty form.
    pub fn new(config: FormConfig) -> Self {
        let mutator = config.mutator();
        Self {
            state: blank_product(),
            config,
            mutator,
            removals: MediaRemovals::default(),
            uploads: PendingUploads::default(),
            sections: SECTIONS
                .iter()
                .map(|&(name, open)| (name.to_string(), open))
                .collect(),
        }
    }

    /// A form populated from a backend record.
    pub fn load(config: FormConfig, record: &Node) -> Result<Self, FormError> {
        let state = normalize_product(record).inspect_err(|e| {
            warn!(error = %e, "failed to load product record");
        })?;
        debug!(id = %state.get("_id").cloned().unwrap_or_default(), "loaded product");
        Ok(Self {
            state,
            ..Self::new(config)
        })
    }

    pub fn from_json_str(config: FormConfig, json: &str) -> Result<Self, FormError> {
        let value: serde_json::Value = serde_json::from_str(json).inspect_err(|e| {
            warn!(error = %e, "failed to parse product data");
        })?;
        Self::load(config, &Node::from(value))
    }

    pub fn state(&self) -> &Node {
        &self.state
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn into_state(self) -> Node {
        self.state
    }

    /// Route an input event for the field called `name`.
    ///
    /// A select value outside the configured options is still stored, with
    /// a warning.
    pub fn handle_change(&mut self, name: &str, input: FieldInput) {
        if let FieldInput::Text(value) = &input {
            if !self.config.options.allows(name, value) {
                warn!(field = name, value = %value, "value is not a configured option");
            }
        }
        self.state = self.mutator.apply(&self.state, name, input);
    }

    /// Select fields whose current value is not among the configured options.
    pub fn unlisted_choices(&self) -> Vec<(&'static str, String)> {
        FormOptions::SELECT_FIELDS
            .iter()
            .filter_map(|&field| {
                let value = get(&self.state, &parse_field_path(field))?.as_str()?;
                (!self.config.options.allows(field, value)).then(|| (field, value.to_string()))
            })
            .collect()
    }

    /// Set the product name, derive the slug, and seed the meta title when it
    /// is still empty.
    pub fn handle_name_change(&mut self, name: &str) {
        let mut state = set_in(&self.state, &["name".to_string()], Node::from(name));
        state = self.mutator.update(&state, "seo.slug", generate_slug(name), false);
        let has_title = state
            .get("seo")
            .and_then(|seo| seo.get("metaTitle"))
            .is_some_and(defaults::is_truthy);
        if !has_title {
            state = self.mutator.update(&state, "seo.metaTitle", name, false);
        }
        self.state = state;
    }

    pub fn add_array_item(&mut self, field: &str, item: Node) {
        self.state = append_item(&self.state, field, item);
    }

    pub fn remove_array_item(&mut self, field: &str, index: usize) {
        self.state = remove_item_at(&self.state, field, index);
    }

    /// Replace a whole element of the list at `field`.
    pub fn handle_array_change(&mut self, field: &str, index: usize, value: impl Into<Node>) {
        let value = value.into();
        self.state = replace_item_at(&self.state, field, index, |_| value);
    }

    /// Set one key of an element of the list at `field`.
    pub fn handle_item_field_change(
        &mut self,
        field: &str,
        index: usize,
        key: &str,
        value: impl Into<Node>,
    ) {
        let value = value.into();
        self.state = replace_item_at(&self.state, field, index, |old| merge_field(old, key, value));
    }

    pub fn add_variant(&mut self) {
        self.add_array_item(VARIANTS, default_variant());
    }

    pub fn remove_variant(&mut self, index: usize) {
        self.remove_array_item(VARIANTS, index);
    }

    pub fn handle_variant_change(&mut self, index: usize, key: &str, value: impl Into<Node>) {
        self.handle_item_field_change(VARIANTS, index, key, value);
    }

    pub fn add_specification(&mut self) {
        self.add_array_item(SPECIFICATIONS, default_specification());
    }

    pub fn remove_specification(&mut self, index: usize) {
        self.remove_array_item(SPECIFICATIONS, index);
    }

    pub fn handle_specification_change(&mut self, index: usize, key: &str, value: impl Into<Node>) {
        self.handle_item_field_change(SPECIFICATIONS, index, key, value);
    }

    /// Append a text section ordered after the existing ones.
    pub fn add_description_section(&mut self) {
        let order = self
            .state
            .get(DESCRIPTION)
            .and_then(Node::as_array)
            .map_or(0, <[Node]>::len);
        self.add_array_item(DESCRIPTION, default_description_section(order));
    }

    pub fn remove_description_section(&mut self, index: usize) {
        self.remove_array_item(DESCRIPTION, index);
    }

    pub fn handle_description_section_change(
        &mut self,
        index: usize,
        key: &str,
        value: impl Into<Node>,
    ) {
        self.handle_item_field_change(DESCRIPTION, index, key, value);
    }

    pub fn add_feature(&mut self) {
        self.add_array_item(FEATURES, Node::from(""));
    }

    pub fn remove_feature(&mut self, index: usize) {
        self.remove_array_item(FEATURES, index);
    }

    pub fn handle_feature_change(&mut self, index: usize, value: &str) {
        self.handle_array_change(FEATURES, index, value);
    }

    pub fn add_tag(&mut self) {
        self.add_array_item(TAGS, Node::from(""));
    }

    pub fn remove_tag(&mut self, index: usize) {
        self.remove_array_item(TAGS, index);
    }

    pub fn handle_tag_change(&mut self, index: usize, value: &str) {
        self.handle_array_change(TAGS, index, value);
    }

    pub fn add_keyword(&mut self) {
        self.add_array_item(KEYWORDS, Node::from(""));
    }

    pub fn remove_keyword(&mut self, index: usize) {
        self.remove_array_item(KEYWORDS, index);
    }

    pub fn handle_keyword_change(&mut self, index: usize, value: &str) {
        self.handle_array_change(KEYWORDS, index, value);
    }

    /// Flip a section open or closed. Unknown sections start closed.
    pub fn toggle_section(&mut self, section: &str) {
        let open = self.sections.entry(section.to_string()).or_insert(false);
        *open = !*open;
    }

    pub fn is_expanded(&self, section: &str) -> bool {
        self.sections.get(section).copied().unwrap_or(false)
    }

    pub fn toggle_removal(&mut self, kind: MediaKind, url: &str) -> bool {
        self.removals.toggle(kind, url)
    }

    pub fn removals(&self) -> &MediaRemovals {
        &self.removals
    }

    pub fn add_new_media(&mut self, files: impl IntoIterator<Item = NewMedia>) {
        self.uploads.extend(files);
    }

    pub fn remove_new_media(&mut self, index: usize) -> Option<NewMedia> {
        self.uploads.remove(index)
    }

    pub fn pending_uploads(&self) -> &PendingUploads {
        &self.uploads
    }

    /// Encode the form as a product update request.
    pub fn submission(&self) -> Result<ProductSubmission, FormError> {
        let submission = submit::encode(&self.state, &self.removals, &self.uploads, &self.config)
            .inspect_err(|e| warn!(error = %e, "cannot submit product"))?;
        debug!(
            endpoint = %submission.endpoint,
            parts = submission.parts.len(),
            "encoded product update"
        );
        Ok(submission)
    }
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}
