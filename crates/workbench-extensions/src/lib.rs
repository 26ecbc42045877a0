//! Extension model for the extensions workbench.
//!
//! This crate merges locally-installed and gallery extension records into a
//! single [`Extension`] view, groups views into a [`Catalog`], and expands
//! declared dependencies into a lazily-built [`DependencyNode`] tree.

pub mod catalog;
pub mod config;
pub mod dependency;
pub mod error;
pub mod extension;
pub mod logging;
pub mod manifest;
pub mod records;
pub mod services;
pub mod telemetry;
pub mod version;

/// Identifier of the extensions viewlet hosting this model.
pub const VIEWLET_ID: &str = "workbench.view.extensions";

pub use catalog::Catalog;
pub use config::{CONFIGURATION_KEY, ExtensionsConfiguration};
pub use dependency::{Ancestors, DependencyNode, EntryKind, TreeEntry, walk};
pub use error::{Error, Result};
pub use extension::Extension;
pub use manifest::ExtensionManifest;
pub use records::{
    ExtensionRecords, GalleryAssets, GalleryExtension, GalleryProperties, LocalExtension,
    LocalExtensionType, LocalMetadata,
};
pub use services::{
    ExtensionContext, ExtensionState, FileReader, GalleryService, StateProvider, TokioFileReader,
};
pub use telemetry::{DefaultTelemetry, TelemetryShaper};
