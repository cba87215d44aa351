//! Customer profile editing.
//!
//! [`UserState`] is the shared copy of the signed-in user's profile;
//! [`ProfileForm`] is the working copy the account page edits one section at a
//! time.

use serde_json::Value;
use storefront_record::{set_in, Node};
use tracing::debug;

use crate::error::FormError;

/// Shared profile state with load/error flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub profile: Option<Node>,
    pub loading: bool,
    pub error: Option<String>,
}

impl UserState {
    pub fn set_user(&mut self, profile: Node) {
        self.profile = Some(profile);
        self.loading = false;
        self.error = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    form: Option<Node>,
    edit_section: Option<String>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A profile arrived from the backend: store it and start editing from it.
    pub fn fetched(&mut self, user: &mut UserState, profile: Node) {
        user.set_user(profile.clone());
        self.form = Some(profile);
    }

    pub fn form(&self) -> Option<&Node> {
        self.form.as_ref()
    }

    pub fn edit_section(&self) -> Option<&str> {
        self.edit_section.as_deref()
    }

    /// Inputs outside the section being edited are read-only.
    pub fn is_editing(&self, section: &str) -> bool {
        self.edit_section.as_deref() == Some(section)
    }

    pub fn edit(&mut self, section: &str) {
        self.edit_section = Some(section.to_string());
    }

    /// Leave edit mode and discard unsaved changes.
    pub fn cancel(&mut self, user: &UserState) {
        self.edit_section = None;
        self.form = user.profile.clone();
    }

    /// Set a top-level profile field. No-op before a profile is loaded.
    pub fn handle_change(&mut self, name: &str, value: &str) {
        if let Some(form) = &self.form {
            self.form = Some(set_in(form, &[name.to_string()], Node::from(value)));
        }
    }

    pub fn set_gender(&mut self, value: &str) {
        self.handle_change("gender", value);
    }

    /// Start a save: flags the shared state as loading and returns the body
    /// to send.
    ///
    /// # Errors
    ///
    /// [`FormError::NoProfile`] before a profile is loaded.
    pub fn save_payload(&self, user: &mut UserState) -> Result<Value, FormError> {
        let form = self.form.as_ref().ok_or(FormError::NoProfile)?;
        user.set_loading(true);
        debug!(section = ?self.edit_section, "saving profile");
        Ok(form.to_json())
    }

    /// The backend accepted the update.
    pub fn saved(&mut self, user: &mut UserState, updated: Node) {
        user.set_user(updated);
        self.edit_section = None;
    }

    /// The backend rejected the update. The working copy stays in edit mode.
    pub fn save_failed(&self, user: &mut UserState, message: impl Into<String>) {
        user.set_error(message);
    }
}
