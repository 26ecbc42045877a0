//! Extensions configuration from the `[extensions]` table.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Key of the extensions configuration section.
pub const CONFIGURATION_KEY: &str = "extensions";

/// User-facing extensions settings plus the model's tunables.
///
/// ```toml
/// [extensions]
/// auto_update = true
/// recommendations = ["ms-python.python"]
/// default_icon_url = "media/defaultIcon.png"
/// max_dependency_depth = 32
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionsConfiguration {
    /// Install gallery updates automatically.
    #[serde(default)]
    pub auto_update: bool,
    /// Recommended extension identifiers (`publisher.name`).
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Icon shown when neither the local nor the gallery record has one.
    #[serde(default = "default_icon_url")]
    pub default_icon_url: String,
    /// Deepest level the dependency tree will expand to.
    #[serde(default = "default_max_dependency_depth")]
    pub max_dependency_depth: usize,
}

fn default_icon_url() -> String {
    "media/defaultIcon.png".to_string()
}

fn default_max_dependency_depth() -> usize {
    32
}

impl Default for ExtensionsConfiguration {
    fn default() -> Self {
        Self {
            auto_update: false,
            recommendations: Vec::new(),
            default_icon_url: default_icon_url(),
            max_dependency_depth: default_max_dependency_depth(),
        }
    }
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    extensions: Option<ExtensionsConfiguration>,
}

impl ExtensionsConfiguration {
    /// Parse the `[extensions]` table out of a TOML document.
    ///
    /// A document without the table yields the defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let document: Document = toml::from_str(content)?;
        Ok(document.extensions.unwrap_or_default())
    }

    /// Whether `identifier` is one of the recommended extensions.
    pub fn is_recommended(&self, identifier: &str) -> bool {
        self.recommendations.iter().any(|r| r == identifier)
    }
}
