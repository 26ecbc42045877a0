//! Dependency tree over a [`Catalog`].
//!
//! A [`DependencyNode`] points at one extension in the catalog and at the
//! node that depends on it. Children are resolved from the extension's
//! gallery dependency list every time [`DependencyNode::dependencies`] is
//! called; nothing is memoized, and the catalog never holds on to nodes.
//!
//! Expansion does not detect cycles. Instead, a node at the catalog's
//! maximum depth refuses to expand with `Error::DepthLimit`, and
//! [`DependencyNode::is_cycle`] lets callers stop at repeated extensions.
//! [`walk`] does both for display.
//!
//! # Example
//!
//! ```
//! # use std::sync::Arc;
//! # use async_trait::async_trait;
//! # use workbench_extensions::*;
//! # struct Offline;
//! # #[async_trait]
//! # impl GalleryService for Offline {
//! #     async fn get_asset(&self, url: &str) -> Result<String> {
//! #         Err(Error::Fetch { url: url.into(), reason: "offline".into() })
//! #     }
//! # }
//! let context = ExtensionContext::new(
//!     Arc::new(Offline),
//!     Arc::new(|_: &Extension| ExtensionState::Installed),
//! );
//! let gallery = |name: &str, deps: &[&str]| GalleryExtension {
//!     name: name.into(),
//!     publisher: "p".into(),
//!     version: "1.0.0".into(),
//!     properties: GalleryProperties {
//!         dependencies: deps.iter().map(|d| d.to_string()).collect(),
//!         engine: None,
//!     },
//!     ..Default::default()
//! };
//! let catalog = Catalog::from_records(
//!     &context,
//!     vec![],
//!     vec![gallery("a", &[]), gallery("b", &["p.a"])],
//! );
//!
//! let root = catalog.load_dependencies("p.b").unwrap();
//! assert!(root.has_dependencies());
//! let children = root.dependencies().unwrap();
//! assert_eq!(children[0].extension().identifier(), "p.a");
//! assert!(!children[0].has_dependencies());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::extension::Extension;

/// One position in an expanded dependency tree.
pub struct DependencyNode<'c> {
    extension: &'c Extension,
    catalog: &'c Catalog,
    dependent: Option<Rc<DependencyNode<'c>>>,
    depth: usize,
}

impl<'c> DependencyNode<'c> {
    /// Create a node. `dependent` is `None` for the root.
    pub fn new(
        extension: &'c Extension,
        catalog: &'c Catalog,
        dependent: Option<Rc<DependencyNode<'c>>>,
    ) -> Rc<Self> {
        let depth = dependent.as_ref().map_or(0, |d| d.depth + 1);
        Rc::new(Self {
            extension,
            catalog,
            dependent,
            depth,
        })
    }

    pub fn extension(&self) -> &'c Extension {
        self.extension
    }

    /// The node that depends on this one.
    pub fn dependent(&self) -> Option<&Rc<DependencyNode<'c>>> {
        self.dependent.as_ref()
    }

    /// Distance from the root (the root is at 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the extension declares gallery dependencies.
    pub fn has_dependencies(&self) -> bool {
        self.extension.has_dependencies()
    }

    /// Child nodes, one per declared identifier, in declaration order.
    ///
    /// Repeated identifiers produce repeated children. Each call resolves
    /// against the catalog again and allocates new nodes.
    ///
    /// # Errors
    ///
    /// - `Error::DepthLimit` if this node sits at the catalog's maximum
    ///   depth and has dependencies.
    /// - `Error::LookupMiss` if a declared identifier is not in the catalog.
    pub fn dependencies(self: &Rc<Self>) -> Result<Vec<Rc<DependencyNode<'c>>>> {
        let ids = self.extension.dependency_ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        if self.depth >= self.catalog.max_depth() {
            return Err(Error::DepthLimit {
                id: self.extension.identifier(),
                depth: self.depth,
            });
        }

        ids.iter()
            .map(|id| -> Result<Rc<DependencyNode<'c>>> {
                let extension = self.catalog.get(id).ok_or_else(|| {
                    let dependent = self.extension.identifier();
                    tracing::warn!(id = %id, dependent = %dependent, "Dependency missing from catalog");
                    Error::LookupMiss {
                        id: id.clone(),
                        dependent,
                    }
                })?;
                Ok(Self::new(extension, self.catalog, Some(Rc::clone(self))))
            })
            .collect()
    }

    /// Dependents from the parent up to the root.
    pub fn ancestors(&self) -> Ancestors<'_, 'c> {
        Ancestors {
            next: self.dependent.as_deref(),
        }
    }

    /// Whether this node's extension already appears among its ancestors.
    pub fn is_cycle(&self) -> bool {
        let id = self.extension.identifier();
        self.ancestors().any(|a| a.extension.identifier() == id)
    }
}

impl fmt::Debug for DependencyNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyNode")
            .field("extension", &self.extension.identifier())
            .field("depth", &self.depth)
            .field(
                "dependent",
                &self.dependent.as_ref().map(|d| d.extension.identifier()),
            )
            .finish()
    }
}

/// Iterator over a node's dependents, nearest first.
pub struct Ancestors<'n, 'c> {
    next: Option<&'n DependencyNode<'c>>,
}

impl<'n, 'c> Iterator for Ancestors<'n, 'c> {
    type Item = &'n DependencyNode<'c>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.dependent.as_deref();
        Some(node)
    }
}

/// How a [`TreeEntry`] relates to its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Present in the catalog and expanded.
    Resolved,
    /// Already an ancestor; not expanded again.
    Cycle,
    /// Declared but absent from the catalog.
    Missing,
    /// Has dependencies below the depth bound.
    Truncated,
    /// Subtree already listed earlier in the same walk.
    Repeated,
}

/// One line of a flattened dependency tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub depth: usize,
    pub identifier: String,
    pub kind: EntryKind,
}

/// Flatten the tree under `root` depth-first, for display.
///
/// Stops at cycles, at missing catalog entries, and below `max_depth`. An
/// extension with dependencies is expanded once per walk; later occurrences
/// are listed as [`EntryKind::Repeated`]. Output is bounded by extensions
/// plus edges, not by the number of paths through a diamond-shaped graph.
pub fn walk(root: &Rc<DependencyNode<'_>>, max_depth: usize) -> Vec<TreeEntry> {
    let mut entries = Vec::new();
    let mut expanded = HashSet::new();
    walk_into(root, max_depth, &mut expanded, &mut entries);
    entries
}

fn walk_into(
    node: &Rc<DependencyNode<'_>>,
    max_depth: usize,
    expanded: &mut HashSet<String>,
    entries: &mut Vec<TreeEntry>,
) {
    let identifier = node.extension.identifier();

    if node.is_cycle() {
        entries.push(TreeEntry {
            depth: node.depth,
            identifier,
            kind: EntryKind::Cycle,
        });
        return;
    }

    if node.has_dependencies() && node.depth >= max_depth {
        entries.push(TreeEntry {
            depth: node.depth,
            identifier,
            kind: EntryKind::Truncated,
        });
        return;
    }

    if node.has_dependencies() && !expanded.insert(identifier.clone()) {
        entries.push(TreeEntry {
            depth: node.depth,
            identifier,
            kind: EntryKind::Repeated,
        });
        return;
    }

    entries.push(TreeEntry {
        depth: node.depth,
        identifier,
        kind: EntryKind::Resolved,
    });

    for id in node.extension.dependency_ids() {
        match node.catalog.get(id) {
            Some(extension) => {
                let child = DependencyNode::new(extension, node.catalog, Some(Rc::clone(node)));
                walk_into(&child, max_depth, expanded, entries);
            }
            None => entries.push(TreeEntry {
                depth: node.depth + 1,
                identifier: id.clone(),
                kind: EntryKind::Missing,
            }),
        }
    }
}
