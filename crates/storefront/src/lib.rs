//! storefront - form state for the storefront's editing surfaces
//!
//! Product editing, profile editing, and the payloads a product card sends.
//! Records are [`storefront_record::Node`] trees; every edit yields a new
//! tree that shares untouched branches with the old one.

pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod product;
pub mod profile;
mod slug;

pub use card::{cart_item, cart_request, display_price, final_price, product_route, wishlist_entry};
pub use config::{ConfigError, FormConfig, FormOptions};
pub use error::FormError;
pub use product::{MediaKind, NewMedia, ProductForm, ProductSubmission};
pub use profile::{ProfileForm, UserState};
pub use slug::generate_slug;

pub use storefront_record::{FieldInput, Node};
