use std::path::PathBuf;

/// Errors that can occur in the extension model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An extension view was requested with neither a local nor a gallery record.
    #[error("an extension needs a local or a gallery record")]
    MissingRecords,

    /// No asset location resolves for the requested content, or the content
    /// has no retrieval path for the resolved location.
    #[error("{asset} not available for extension '{extension}'")]
    NotAvailable {
        extension: String,
        asset: &'static str,
    },

    /// Remote asset retrieval failed.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Manifest text is not well-formed JSON for a manifest.
    #[error("failed to parse extension manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// Reading a local asset failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Extension not found in the catalog.
    #[error("unknown extension: {0}")]
    UnknownExtension(String),

    /// A declared dependency is not present in the catalog.
    #[error("dependency '{id}' of '{dependent}' is not in the catalog")]
    LookupMiss { id: String, dependent: String },

    /// Dependency expansion reached the configured depth bound.
    #[error("dependency expansion of '{id}' stopped at depth {depth}")]
    DepthLimit { id: String, depth: usize },

    /// Failed to parse the extensions configuration.
    #[error("failed to parse extensions configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
