//! Traversal and validation settings
//!
//! [`TraversalSettings`] is part of the member cache key, so it stays a small
//! hashable value object.

use serde::{Deserialize, Serialize};

/// Selects which member categories of a type are structural
///
/// Public properties are always included; there is no way to switch them
/// off, and they never appear in the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    #[serde(skip, default = "always")]
    public_properties: bool,
    non_public_properties: bool,
    public_fields: bool,
    non_public_fields: bool,
}

fn always() -> bool {
    true
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            public_properties: true,
            non_public_properties: false,
            public_fields: false,
            non_public_fields: false,
        }
    }
}

impl TraversalSettings {
    /// Every member category, public and non-public
    pub fn all_members() -> Self {
        Self {
            public_properties: true,
            non_public_properties: true,
            public_fields: true,
            non_public_fields: true,
        }
    }

    pub fn with_non_public_properties(mut self, enabled: bool) -> Self {
        self.non_public_properties = enabled;
        self
    }

    pub fn with_public_fields(mut self, enabled: bool) -> Self {
        self.public_fields = enabled;
        self
    }

    pub fn with_non_public_fields(mut self, enabled: bool) -> Self {
        self.non_public_fields = enabled;
        self
    }

    pub fn includes_public_properties(&self) -> bool {
        self.public_properties
    }

    pub fn includes_non_public_properties(&self) -> bool {
        self.non_public_properties
    }

    pub fn includes_public_fields(&self) -> bool {
        self.public_fields
    }

    pub fn includes_non_public_fields(&self) -> bool {
        self.non_public_fields
    }

    /// True when at least one field category is enabled
    pub fn includes_fields(&self) -> bool {
        self.public_fields || self.non_public_fields
    }
}

/// Settings for a validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Prune the remaining traversal as soon as the outcome turns invalid
    pub stop_on_first_error: bool,

    /// Member selection handed to the traversal engine
    pub traversal: TraversalSettings,
}

impl ValidationSettings {
    /// Parse settings from a TOML document
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        toml::from_str(content).context("Failed to parse validation settings")
    }
}
