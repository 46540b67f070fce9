//! Activation Configuration

use serde::Deserialize;

use crate::Result;

/// Tag and type tables used to classify elements
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Tags that already fire click on Enter keydown and Space keyup
    pub button_tags: Vec<String>,

    /// `<input type=...>` values that behave like buttons
    pub button_input_types: Vec<String>,

    /// Tags that fire click on Enter keydown but not on Space
    pub link_tags: Vec<String>,

    /// Space keydown targets whose default action is left alone
    pub native_space_tags: Vec<String>,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            button_tags: owned(&["button"]),
            button_input_types: owned(&["button", "submit", "reset", "image"]),
            link_tags: owned(&["a"]),
            native_space_tags: owned(&["button", "input", "textarea"]),
        }
    }
}

impl ActivationConfig {
    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_button_tag(&self, tag: &str) -> bool {
        contains_ignore_case(&self.button_tags, tag)
    }

    pub fn is_button_input_type(&self, input_type: &str) -> bool {
        contains_ignore_case(&self.button_input_types, input_type.trim())
    }

    pub fn is_link_tag(&self, tag: &str) -> bool {
        contains_ignore_case(&self.link_tags, tag)
    }

    /// Whether a Space keydown targeting `tag` must keep its default action
    pub fn allows_native_space(&self, tag: &str) -> bool {
        contains_ignore_case(&self.native_space_tags, tag)
    }
}

fn contains_ignore_case(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item.eq_ignore_ascii_case(value))
}
