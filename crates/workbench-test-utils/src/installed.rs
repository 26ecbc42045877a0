//! [`InstalledExtension`]: an extension directory on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use url::Url;
use workbench_extensions::LocalExtension;

/// A temporary install directory holding a README and/or CHANGELOG.
///
/// # Example
///
/// ```rust,no_run
/// use workbench_test_utils::{InstalledExtension, local_extension};
///
/// let dir = InstalledExtension::new().with_readme("# Hello");
/// let local = dir.attach(local_extension("a", "p", "1.0.0"));
/// assert!(local.readme_url.unwrap().starts_with("file://"));
/// ```
pub struct InstalledExtension {
    temp_dir: TempDir,
    readme: Option<PathBuf>,
    changelog: Option<PathBuf>,
}

impl Default for InstalledExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl InstalledExtension {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            readme: None,
            changelog: None,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_readme(mut self, content: &str) -> Self {
        self.readme = Some(self.write("README.md", content));
        self
    }

    pub fn with_changelog(mut self, content: &str) -> Self {
        self.changelog = Some(self.write("CHANGELOG.md", content));
        self
    }

    /// Point `local` at this directory and its written assets.
    pub fn attach(&self, mut local: LocalExtension) -> LocalExtension {
        local.path = self.root().to_path_buf();
        local.readme_url = self.readme.as_deref().map(file_url);
        local.changelog_url = self.changelog.as_deref().map(file_url);
        local
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("InstalledExtension: failed to write {name}: {e}"));
        path
    }
}

/// `file://` URL for an absolute path.
pub fn file_url(path: &Path) -> String {
    Url::from_file_path(path)
        .unwrap_or_else(|()| panic!("not an absolute path: {}", path.display()))
        .to_string()
}
