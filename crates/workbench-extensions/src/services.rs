//! Collaborators consumed by extension views.
//!
//! Remote assets come from a [`GalleryService`], `file:` assets from a
//! [`FileReader`], and install state from a [`StateProvider`] owned by
//! whoever drives installs. [`ExtensionContext`] bundles them so every view
//! in a catalog shares one set.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ExtensionsConfiguration;
use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::telemetry::{DefaultTelemetry, TelemetryShaper};

/// Install lifecycle state of an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionState {
    Installing,
    Installed,
    NeedsRestart,
    Uninstalled,
}

/// Maps a view to its current install state.
pub type StateProvider = Arc<dyn Fn(&Extension) -> ExtensionState + Send + Sync>;

/// Fetches gallery assets as text.
#[async_trait]
pub trait GalleryService: Send + Sync {
    async fn get_asset(&self, url: &str) -> Result<String>;
}

/// Reads local assets as UTF-8 text.
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// [`FileReader`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileReader;

#[async_trait]
impl FileReader for TokioFileReader {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Shared collaborators for extension views.
#[derive(Clone)]
pub struct ExtensionContext {
    pub gallery: Arc<dyn GalleryService>,
    pub files: Arc<dyn FileReader>,
    pub telemetry: Arc<dyn TelemetryShaper>,
    pub state: StateProvider,
    pub default_icon_url: String,
}

impl ExtensionContext {
    /// Create a context with the tokio file reader, default telemetry and
    /// the default icon from [`ExtensionsConfiguration::default`].
    pub fn new(gallery: Arc<dyn GalleryService>, state: StateProvider) -> Self {
        Self {
            gallery,
            files: Arc::new(TokioFileReader),
            telemetry: Arc::new(DefaultTelemetry),
            state,
            default_icon_url: ExtensionsConfiguration::default().default_icon_url,
        }
    }

    /// Apply settings from the extensions configuration.
    pub fn with_configuration(mut self, config: &ExtensionsConfiguration) -> Self {
        self.default_icon_url = config.default_icon_url.clone();
        self
    }

    pub fn with_file_reader(mut self, files: Arc<dyn FileReader>) -> Self {
        self.files = files;
        self
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetryShaper>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_default_icon_url(mut self, url: impl Into<String>) -> Self {
        self.default_icon_url = url.into();
        self
    }
}

impl fmt::Debug for ExtensionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionContext")
            .field("default_icon_url", &self.default_icon_url)
            .finish_non_exhaustive()
    }
}
