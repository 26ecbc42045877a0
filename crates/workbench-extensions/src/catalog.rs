//! Catalog of known extensions keyed by `publisher.name`.
//!
//! The catalog is an arena of [`Extension`] views plus an identifier index.
//! It is the lookup universe for dependency expansion: a
//! [`DependencyNode`] resolves each declared identifier here.

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::ExtensionsConfiguration;
use crate::dependency::DependencyNode;
use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::records::{ExtensionRecords, GalleryExtension, LocalExtension};
use crate::services::ExtensionContext;

/// Known extensions, local and published.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Extension>,
    /// Identifier to slot in `entries`. Exact, case-sensitive keys.
    index: HashMap<String, usize>,
    max_depth: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog with the default expansion depth.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            max_depth: ExtensionsConfiguration::default().max_dependency_depth,
        }
    }

    /// Apply settings from the extensions configuration.
    pub fn with_configuration(mut self, config: &ExtensionsConfiguration) -> Self {
        self.max_depth = config.max_dependency_depth;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Deepest node that may still expand its dependencies.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Merge records into a catalog with `config` applied to both the views'
    /// context and the catalog itself.
    pub fn from_configured_records(
        config: &ExtensionsConfiguration,
        context: ExtensionContext,
        locals: Vec<LocalExtension>,
        gallery: Vec<GalleryExtension>,
    ) -> Self {
        let context = context.with_configuration(config);
        Self::from_records(&context, locals, gallery).with_configuration(config)
    }

    /// Merge installed and published records into a catalog.
    ///
    /// A local and a gallery record with the same identifier become one
    /// view backed by both. Installed extensions keep their order, followed
    /// by gallery-only extensions in gallery order. When either side lists
    /// an identifier twice, the first record wins.
    pub fn from_records(
        context: &ExtensionContext,
        locals: Vec<LocalExtension>,
        gallery: Vec<GalleryExtension>,
    ) -> Self {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (i, published) in gallery.iter().enumerate() {
            positions.entry(published.identifier()).or_insert(i);
        }
        let mut published: Vec<Option<GalleryExtension>> = gallery.into_iter().map(Some).collect();

        let mut catalog = Self::new();
        for local in locals {
            let id = local.identifier();
            if catalog.contains(&id) {
                tracing::debug!(id = %id, "Skipping duplicate local record");
                continue;
            }
            let paired = positions
                .get(&id)
                .and_then(|&i| published[i].take());
            let records = match paired {
                Some(gallery) => ExtensionRecords::Both { local, gallery },
                None => ExtensionRecords::Local(local),
            };
            catalog.insert(Extension::from_records(context.clone(), records));
        }

        for gallery in published.into_iter().flatten() {
            let id = gallery.identifier();
            if catalog.contains(&id) {
                tracing::debug!(id = %id, "Skipping duplicate gallery record");
                continue;
            }
            catalog.insert(Extension::from_records(
                context.clone(),
                ExtensionRecords::Gallery(gallery),
            ));
        }

        tracing::debug!(count = catalog.len(), "Built extension catalog");
        catalog
    }

    /// Add an extension, replacing any entry with the same identifier.
    pub fn insert(&mut self, extension: Extension) {
        let id = extension.identifier();
        match self.index.get(&id) {
            Some(&slot) => self.entries[slot] = extension,
            None => {
                self.index.insert(id, self.entries.len());
                self.entries.push(extension);
            }
        }
    }

    /// Look up an extension by `publisher.name`.
    pub fn get(&self, id: &str) -> Option<&Extension> {
        self.index.get(id).map(|&slot| &self.entries[slot])
    }

    /// Look up an extension, failing with `Error::UnknownExtension`.
    pub fn resolve(&self, id: &str) -> Result<&Extension> {
        self.get(id)
            .ok_or_else(|| Error::UnknownExtension(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All identifiers (sorted).
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.index.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Extensions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.entries.iter()
    }

    /// Root of the dependency tree for `id`.
    pub fn load_dependencies(&self, id: &str) -> Result<Rc<DependencyNode<'_>>> {
        let extension = self.resolve(id)?;
        Ok(DependencyNode::new(extension, self, None))
    }

    /// User-installed extensions with a newer gallery version, by identifier.
    pub fn outdated(&self) -> Vec<&Extension> {
        let mut outdated: Vec<&Extension> = self.entries.iter().filter(|e| e.outdated()).collect();
        outdated.sort_by_key(|e| e.identifier());
        outdated
    }

    /// Recommended identifiers that are not installed.
    pub fn missing_recommendations<'a>(
        &self,
        config: &'a ExtensionsConfiguration,
    ) -> Vec<&'a str> {
        config
            .recommendations
            .iter()
            .map(String::as_str)
            .filter(|id| self.get(id).and_then(Extension::local).is_none())
            .collect()
    }
}
