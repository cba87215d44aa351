//! Form configuration.
//!
//! Everything a form needs to know about field semantics lives here, so the
//! numeric field set and the JSON-encoded submit fields are defined once.
//! Loaded from TOML; every key is optional and falls back to the built-in
//! lists.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use storefront_record::{NumericFields, PathMutator, DEFAULT_NUMERIC_FIELDS};
use thiserror::Error;

/// Environment variable naming a TOML config file for the binaries.
pub const CONFIG_ENV: &str = "STOREFRONT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FormConfig {
    /// Leaf names parsed as numbers on edit.
    pub numeric_fields: Vec<String>,
    /// Top-level fields always sent as JSON text on submit.
    pub json_fields: Vec<String>,
    /// Image used by card payloads when a product has none.
    pub placeholder_image: String,
    pub options: FormOptions,
}

/// Choices offered by the product form's selects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FormOptions {
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
    pub child_categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub shipping_classes: Vec<String>,
    pub statuses: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            numeric_fields: strings(DEFAULT_NUMERIC_FIELDS),
            json_fields: strings(&[
                "media",
                "gallery",
                "seo",
                "shipping",
                "variants",
                "features",
                "specifications",
                "detailedDescription",
                "tags",
            ]),
            placeholder_image: "/placeholder.png".to_string(),
            options: FormOptions::default(),
        }
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            categories: strings(&["men", "women", "bags", "fragrances"]),
            sub_categories: strings(&[
                "handbags",
                "perfume",
                "body-mist",
                "roll-on",
                "fragrances-of-india",
                "wallets-and-small-leather-goods",
                "accessories",
                "travel",
            ]),
            child_categories: strings(&[
                "jewelry",
                "scarves",
                "belts",
                "luggage",
                "travel-accessories",
                "travel-bags",
                "cardholders",
                "keyholders",
                "shaving-kit-bags",
            ]),
            colors: strings(&[
                "Red", "Blue", "Black", "White", "Green", "Yellow", "Purple", "Orange", "Pink",
                "Brown",
            ]),
            sizes: strings(&["XS", "S", "M", "L", "XL", "XXL", "2XL", "3XL"]),
            shipping_classes: strings(&["standard", "express", "overnight", "free"]),
            statuses: strings(&["draft", "active", "inactive", "discontinued"]),
        }
    }
}

impl FormOptions {
    /// Select fields backed by an option list.
    pub const SELECT_FIELDS: &'static [&'static str] = &[
        "category",
        "subCategory",
        "childCategory",
        "status",
        "shipping.shippingClass",
    ];

    /// The option list behind the select at `field`, if it has one.
    pub fn choices(&self, field: &str) -> Option<&[String]> {
        let list = match field {
            "category" => &self.categories,
            "subCategory" => &self.sub_categories,
            "childCategory" => &self.child_categories,
            "status" => &self.statuses,
            "shipping.shippingClass" => &self.shipping_classes,
            _ => return None,
        };
        Some(list.as_slice())
    }

    /// Whether `value` is selectable at `field`. An empty value means
    /// nothing is selected and is always allowed, as is any value for a
    /// field without an option list.
    pub fn allows(&self, field: &str, value: &str) -> bool {
        value.is_empty()
            || self
                .choices(field)
                .map_or(true, |list| list.iter().any(|c| c == value))
    }
}

impl FormConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from the file named by [`CONFIG_ENV`], or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn numeric_fields(&self) -> NumericFields {
        NumericFields::new(self.numeric_fields.iter().cloned())
    }

    pub fn mutator(&self) -> PathMutator {
        PathMutator::new(self.numeric_fields())
    }

    pub fn is_json_field(&self, key: &str) -> bool {
        self.json_fields.iter().any(|f| f == key)
    }
}
