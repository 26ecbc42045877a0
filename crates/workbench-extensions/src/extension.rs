//! Merged view over an extension's local and gallery records.
//!
//! Every accessor is computed from the underlying [`ExtensionRecords`] on
//! each call. Identity and the installed version prefer the local record;
//! the latest version, counts and asset locators prefer the gallery record.
//! Install state is never stored here: [`Extension::state`] asks the
//! context's state provider every time.

use std::fmt;
use std::io;
use std::path::PathBuf;

use url::Url;

use crate::error::{Error, Result};
use crate::manifest::ExtensionManifest;
use crate::records::{ExtensionRecords, GalleryExtension, LocalExtension, LocalExtensionType};
use crate::services::{ExtensionContext, ExtensionState};
use crate::version;

/// One logical extension, installed, published, or both.
#[derive(Clone)]
pub struct Extension {
    context: ExtensionContext,
    records: ExtensionRecords,
}

impl Extension {
    /// Build a view from optional records.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingRecords` if both records are `None`.
    pub fn new(
        context: ExtensionContext,
        local: Option<LocalExtension>,
        gallery: Option<GalleryExtension>,
    ) -> Result<Self> {
        Ok(Self::from_records(
            context,
            ExtensionRecords::from_parts(local, gallery)?,
        ))
    }

    pub fn from_records(context: ExtensionContext, records: ExtensionRecords) -> Self {
        Self { context, records }
    }

    pub fn records(&self) -> &ExtensionRecords {
        &self.records
    }

    pub fn local(&self) -> Option<&LocalExtension> {
        self.records.local()
    }

    pub fn gallery(&self) -> Option<&GalleryExtension> {
        self.records.gallery()
    }

    /// Installation type; `None` when not installed.
    pub fn extension_type(&self) -> Option<LocalExtensionType> {
        self.local().map(|local| local.extension_type)
    }

    pub fn name(&self) -> &str {
        match &self.records {
            ExtensionRecords::Local(local) | ExtensionRecords::Both { local, .. } => {
                &local.manifest.name
            }
            ExtensionRecords::Gallery(gallery) => &gallery.name,
        }
    }

    pub fn display_name(&self) -> &str {
        match &self.records {
            ExtensionRecords::Local(local) | ExtensionRecords::Both { local, .. } => local
                .manifest
                .display_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(&local.manifest.name),
            ExtensionRecords::Gallery(gallery) => gallery
                .display_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(&gallery.name),
        }
    }

    pub fn publisher(&self) -> &str {
        match &self.records {
            ExtensionRecords::Local(local) | ExtensionRecords::Both { local, .. } => {
                &local.manifest.publisher
            }
            ExtensionRecords::Gallery(gallery) => &gallery.publisher,
        }
    }

    pub fn publisher_display_name(&self) -> &str {
        match &self.records {
            ExtensionRecords::Local(local) | ExtensionRecords::Both { local, .. } => local
                .metadata
                .as_ref()
                .and_then(|m| m.publisher_display_name.as_deref())
                .filter(|n| !n.is_empty())
                .unwrap_or(&local.manifest.publisher),
            ExtensionRecords::Gallery(gallery) => gallery
                .publisher_display_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(&gallery.publisher),
        }
    }

    /// The `publisher.name` key used by the catalog.
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.publisher(), self.name())
    }

    pub fn description(&self) -> Option<&str> {
        match &self.records {
            ExtensionRecords::Local(local) | ExtensionRecords::Both { local, .. } => {
                local.manifest.description.as_deref()
            }
            ExtensionRecords::Gallery(gallery) => gallery.description.as_deref(),
        }
    }

    /// Installed version, or the published one when not installed.
    pub fn version(&self) -> &str {
        match &self.records {
            ExtensionRecords::Local(local) | ExtensionRecords::Both { local, .. } => {
                &local.manifest.version
            }
            ExtensionRecords::Gallery(gallery) => &gallery.version,
        }
    }

    /// Published version, or the installed one when the gallery has no record.
    pub fn latest_version(&self) -> &str {
        match &self.records {
            ExtensionRecords::Gallery(gallery) | ExtensionRecords::Both { gallery, .. } => {
                &gallery.version
            }
            ExtensionRecords::Local(local) => &local.manifest.version,
        }
    }

    /// A user-installed extension whose gallery version is newer.
    pub fn outdated(&self) -> bool {
        self.extension_type() == Some(LocalExtensionType::User)
            && version::is_newer(self.latest_version(), self.version())
    }

    pub fn icon_url(&self) -> String {
        self.local_icon_url()
            .or_else(|| self.gallery().and_then(|g| g.assets.icon.clone()))
            .unwrap_or_else(|| self.context.default_icon_url.clone())
    }

    /// Icon chain for degraded-network display.
    pub fn icon_url_fallback(&self) -> String {
        self.local_icon_url()
            .or_else(|| self.gallery().and_then(|g| g.assets.icon_fallback.clone()))
            .unwrap_or_else(|| self.context.default_icon_url.clone())
    }

    fn local_icon_url(&self) -> Option<String> {
        let local = self.local()?;
        let icon = local.manifest.icon.as_deref().filter(|i| !i.is_empty())?;
        Url::from_file_path(local.path.join(icon))
            .ok()
            .map(String::from)
    }

    pub fn license_url(&self) -> Option<&str> {
        self.gallery().and_then(|g| g.assets.license.as_deref())
    }

    pub fn install_count(&self) -> Option<u64> {
        self.gallery().map(|g| g.install_count)
    }

    pub fn rating(&self) -> Option<f64> {
        self.gallery().map(|g| g.rating)
    }

    pub fn rating_count(&self) -> Option<u64> {
        self.gallery().map(|g| g.rating_count)
    }

    /// Declared gallery dependencies; empty without a gallery record.
    pub fn dependency_ids(&self) -> &[String] {
        self.gallery()
            .map(|g| g.properties.dependencies.as_slice())
            .unwrap_or_default()
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependency_ids().is_empty()
    }

    pub fn state(&self) -> ExtensionState {
        (self.context.state)(self)
    }

    pub fn telemetry_data(&self) -> serde_json::Value {
        match &self.records {
            ExtensionRecords::Gallery(gallery) | ExtensionRecords::Both { gallery, .. } => {
                self.context.telemetry.gallery(gallery)
            }
            ExtensionRecords::Local(local) => self.context.telemetry.local(local),
        }
    }

    fn readme_url(&self) -> Option<&str> {
        self.local()
            .and_then(|l| l.readme_url.as_deref())
            .filter(|u| !u.is_empty())
            .or_else(|| self.gallery().and_then(|g| g.assets.readme.as_deref()))
            .filter(|u| !u.is_empty())
    }

    fn changelog_url(&self) -> Option<&str> {
        self.local()
            .and_then(|l| l.changelog_url.as_deref())
            .filter(|u| !u.is_empty())
            .or_else(|| self.gallery().and_then(|g| g.assets.changelog.as_deref()))
            .filter(|u| !u.is_empty())
    }

    pub fn has_changelog(&self) -> bool {
        self.changelog_url().is_some()
    }

    /// The extension manifest.
    ///
    /// Installed extensions answer from the embedded manifest without I/O;
    /// otherwise the gallery manifest asset is fetched and parsed.
    pub async fn manifest(&self) -> Result<ExtensionManifest> {
        if let Some(local) = self.local() {
            return Ok(local.manifest.clone());
        }

        let url = self
            .gallery()
            .and_then(|g| g.assets.manifest.as_deref())
            .ok_or_else(|| self.not_available("manifest"))?;

        tracing::debug!(extension = %self.identifier(), url, "Fetching gallery manifest");
        let raw = self.context.gallery.get_asset(url).await?;
        ExtensionManifest::from_json(&raw)
    }

    /// README text, read from disk for `file:` URLs and fetched otherwise.
    pub async fn readme(&self) -> Result<String> {
        let url = self
            .readme_url()
            .ok_or_else(|| self.not_available("readme"))?;

        match asset_source(url) {
            AssetSource::Disk(path) => {
                tracing::debug!(extension = %self.identifier(), path = %path.display(), "Reading local readme");
                self.context.files.read_to_string(&path).await
            }
            AssetSource::NoLocalPath => Err(self.no_local_path(url)),
            AssetSource::Remote => {
                tracing::debug!(extension = %self.identifier(), url, "Fetching gallery readme");
                self.context.gallery.get_asset(url).await
            }
        }
    }

    /// Changelog text. Only `file:` URLs are readable.
    pub async fn changelog(&self) -> Result<String> {
        let url = self
            .changelog_url()
            .ok_or_else(|| self.not_available("changelog"))?;

        match asset_source(url) {
            AssetSource::Disk(path) => {
                tracing::debug!(extension = %self.identifier(), path = %path.display(), "Reading local changelog");
                self.context.files.read_to_string(&path).await
            }
            AssetSource::NoLocalPath => Err(self.no_local_path(url)),
            AssetSource::Remote => Err(self.not_available("changelog")),
        }
    }

    fn not_available(&self, asset: &'static str) -> Error {
        Error::NotAvailable {
            extension: self.identifier(),
            asset,
        }
    }

    fn no_local_path(&self, url: &str) -> Error {
        tracing::warn!(extension = %self.identifier(), url, "file URL does not name a local path");
        Error::Io {
            path: PathBuf::from(url),
            source: io::Error::new(io::ErrorKind::InvalidInput, "file URL has no local path"),
        }
    }
}

/// Where an asset URL is read from. Decided by scheme alone.
#[derive(Debug, PartialEq, Eq)]
enum AssetSource {
    Disk(PathBuf),
    /// A `file:` URL that maps to no local path, e.g. one with a remote host.
    NoLocalPath,
    Remote,
}

fn asset_source(url: &str) -> AssetSource {
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "file" => parsed
            .to_file_path()
            .map_or(AssetSource::NoLocalPath, AssetSource::Disk),
        _ => AssetSource::Remote,
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}
