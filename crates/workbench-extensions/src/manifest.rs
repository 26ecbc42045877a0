//! Extension manifest (`package.json`) model.
//!
//! Local records embed their parsed manifest. Gallery-only extensions expose
//! the manifest as a remote asset, fetched as text and parsed with
//! [`ExtensionManifest::from_json`].
//!
//! # Example
//!
//! ```
//! use workbench_extensions::manifest::ExtensionManifest;
//!
//! let manifest = ExtensionManifest::from_json(
//!     r#"{ "name": "gitlens", "publisher": "eamodio", "version": "7.5.0" }"#,
//! )
//! .unwrap();
//! assert_eq!(manifest.identifier(), "eamodio.gitlens");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Extension manifest as shipped inside an extension package.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionManifest {
    /// Extension name, unique per publisher.
    pub name: String,
    /// Publisher name.
    pub publisher: String,
    /// Semver version string.
    pub version: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon path relative to the extension's install directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Identifiers (`publisher.name`) of extensions this one depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension_dependencies: Vec<String>,
    /// Engine compatibility, e.g. `{ "vscode": "^1.5.0" }`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub engines: BTreeMap<String, String>,
    /// Every other manifest field, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ExtensionManifest {
    /// Create a minimal manifest.
    pub fn new(
        name: impl Into<String>,
        publisher: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            publisher: publisher.into(),
            version: version.into(),
            display_name: None,
            description: None,
            icon: None,
            extension_dependencies: Vec::new(),
            engines: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// The `publisher.name` identifier.
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }
}
