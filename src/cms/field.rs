//! Field descriptors exposed by forms

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current values of a form, keyed by field name
pub type FieldValues = BTreeMap<String, String>;

/// Editor component used to render a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldComponent {
    #[default]
    Text,
    Textarea,
}

impl FieldComponent {
    pub fn is_multiline(self) -> bool {
        matches!(self, FieldComponent::Textarea)
    }
}

/// Describes a single editable value within a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub component: FieldComponent,
}

impl Field {
    /// Create a single-line text field
    #[cfg(test)]
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            component: FieldComponent::Text,
        }
    }

    /// Create a multiline text field
    #[cfg(test)]
    pub fn textarea(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            component: FieldComponent::Textarea,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.component.is_multiline()
    }
}
