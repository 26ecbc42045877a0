//! Local and gallery extension records.
//!
//! A *local* record describes an extension installed on disk; a *gallery*
//! record describes the same extension as published in the marketplace.
//! [`ExtensionRecords`] holds one or both for a single logical extension.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::manifest::ExtensionManifest;

/// Where a locally-installed extension comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalExtensionType {
    /// Built into the product.
    System,
    /// Installed by the user.
    User,
}

/// Gallery metadata persisted alongside an installed extension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub publisher_id: Option<String>,
    /// Overrides the manifest publisher for display.
    #[serde(default)]
    pub publisher_display_name: Option<String>,
}

/// An extension installed on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalExtension {
    #[serde(rename = "type")]
    pub extension_type: LocalExtensionType,
    pub manifest: ExtensionManifest,
    /// Install directory.
    pub path: PathBuf,
    #[serde(default)]
    pub metadata: Option<LocalMetadata>,
    #[serde(default)]
    pub readme_url: Option<String>,
    #[serde(default)]
    pub changelog_url: Option<String>,
}

impl LocalExtension {
    pub fn new(
        extension_type: LocalExtensionType,
        manifest: ExtensionManifest,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extension_type,
            manifest,
            path: path.into(),
            metadata: None,
            readme_url: None,
            changelog_url: None,
        }
    }

    /// The `publisher.name` identifier.
    pub fn identifier(&self) -> String {
        self.manifest.identifier()
    }
}

/// Asset locators published with a gallery extension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryAssets {
    #[serde(default)]
    pub manifest: Option<String>,
    #[serde(default)]
    pub readme: Option<String>,
    #[serde(default)]
    pub changelog: Option<String>,
    #[serde(default)]
    pub download: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Icon served from a static CDN, for degraded-network display.
    #[serde(default)]
    pub icon_fallback: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// Gallery-side properties of a published version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryProperties {
    /// Declared dependency identifiers, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub engine: Option<String>,
}

/// An extension as published in the gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryExtension {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub publisher: String,
    #[serde(default)]
    pub publisher_id: String,
    #[serde(default)]
    pub publisher_display_name: Option<String>,
    pub version: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub install_count: u64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u64,
    #[serde(default)]
    pub assets: GalleryAssets,
    #[serde(default)]
    pub properties: GalleryProperties,
}

impl GalleryExtension {
    /// The `publisher.name` identifier.
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }
}

/// The records backing one logical extension: local, gallery, or both.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionRecords {
    Local(LocalExtension),
    Gallery(GalleryExtension),
    Both {
        local: LocalExtension,
        gallery: GalleryExtension,
    },
}

impl ExtensionRecords {
    /// Build from two optional records.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingRecords` when both are `None`.
    pub fn from_parts(
        local: Option<LocalExtension>,
        gallery: Option<GalleryExtension>,
    ) -> Result<Self> {
        match (local, gallery) {
            (Some(local), Some(gallery)) => Ok(Self::Both { local, gallery }),
            (Some(local), None) => Ok(Self::Local(local)),
            (None, Some(gallery)) => Ok(Self::Gallery(gallery)),
            (None, None) => Err(Error::MissingRecords),
        }
    }

    pub fn local(&self) -> Option<&LocalExtension> {
        match self {
            Self::Local(local) | Self::Both { local, .. } => Some(local),
            Self::Gallery(_) => None,
        }
    }

    pub fn gallery(&self) -> Option<&GalleryExtension> {
        match self {
            Self::Gallery(gallery) | Self::Both { gallery, .. } => Some(gallery),
            Self::Local(_) => None,
        }
    }

    /// Split back into the optional pair.
    pub fn into_parts(self) -> (Option<LocalExtension>, Option<GalleryExtension>) {
        match self {
            Self::Local(local) => (Some(local), None),
            Self::Gallery(gallery) => (None, Some(gallery)),
            Self::Both { local, gallery } => (Some(local), Some(gallery)),
        }
    }
}
