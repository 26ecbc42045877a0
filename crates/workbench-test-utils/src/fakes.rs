//! In-memory collaborators.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use workbench_extensions::{
    Error, Extension, ExtensionState, FileReader, GalleryService, Result, StateProvider,
};

/// Gallery serving scripted assets and recording every request.
///
/// Unknown URLs fail with `Error::Fetch`.
#[derive(Debug, Default)]
pub struct FakeGallery {
    assets: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `content` for `url`.
    pub fn with_asset(mut self, url: impl Into<String>, content: impl Into<String>) -> Self {
        self.assets.insert(url.into(), content.into());
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GalleryService for FakeGallery {
    async fn get_asset(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.assets.get(url).cloned().ok_or_else(|| Error::Fetch {
            url: url.to_string(),
            reason: "404 Not Found".to_string(),
        })
    }
}

/// Gallery that fails the test if it is ever asked for anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableGallery;

#[async_trait]
impl GalleryService for UnreachableGallery {
    async fn get_asset(&self, url: &str) -> Result<String> {
        panic!("gallery must not be contacted, but {url} was requested");
    }
}

/// File reader over an in-memory path map.
#[derive(Debug, Default)]
pub struct MemoryFileReader {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

#[async_trait]
impl FileReader for MemoryFileReader {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| Error::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })
    }
}

/// State provider reporting installed views as `Installed` and the rest as
/// `Uninstalled`.
pub fn installed_state() -> StateProvider {
    Arc::new(|extension: &Extension| {
        if extension.local().is_some() {
            ExtensionState::Installed
        } else {
            ExtensionState::Uninstalled
        }
    })
}
