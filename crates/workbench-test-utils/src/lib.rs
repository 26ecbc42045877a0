//! Shared test utilities for the extensions workbench.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fakes`]: in-memory gallery and file reader doubles
//! - [`builders`]: local/gallery record builders and catalog helpers
//! - [`installed`]: [`InstalledExtension`] directories on disk

pub mod builders;
pub mod fakes;
pub mod installed;

pub use builders::{catalog_of, gallery_extension, gallery_with_deps, local_extension};
pub use fakes::{FakeGallery, MemoryFileReader, UnreachableGallery, installed_state};
pub use installed::InstalledExtension;
