//! Dependency panel scenarios over a shared catalog.

use std::rc::Rc;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use workbench_extensions::{
    Catalog, DependencyNode, EntryKind, Error, ExtensionContext, walk,
};
use workbench_test_utils::{
    UnreachableGallery, catalog_of, gallery_extension, gallery_with_deps, installed_state,
    local_extension,
};

fn context() -> ExtensionContext {
    ExtensionContext::new(Arc::new(UnreachableGallery), installed_state())
}

#[test]
fn test_two_extension_catalog() {
    let ctx = context();
    let catalog = catalog_of(
        &ctx,
        vec![gallery_with_deps("a", "p", &[]), gallery_with_deps("b", "p", &["p.a"])],
    );

    let root = catalog.load_dependencies("p.b").unwrap();
    assert!(root.has_dependencies());

    let children = root.dependencies().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].extension().identifier(), "p.a");
    assert!(!children[0].has_dependencies());
    assert!(Rc::ptr_eq(children[0].dependent().unwrap(), &root));
}

#[test]
fn test_local_only_root_has_no_tree() {
    let ctx = context();
    let mut local = local_extension("solo", "p", "1.0.0");
    local.manifest.extension_dependencies = vec!["p.other".to_string()];
    let catalog = Catalog::from_records(&ctx, vec![local], vec![]);

    let root = catalog.load_dependencies("p.solo").unwrap();
    assert!(!root.has_dependencies());
    assert!(root.dependencies().unwrap().is_empty());
}

#[test]
fn test_installed_dependency_is_shared_view() {
    let ctx = context();
    let catalog = Catalog::from_records(
        &ctx,
        vec![local_extension("a", "p", "0.9.0")],
        vec![gallery_extension("a", "p", "1.0.0"), gallery_with_deps("b", "p", &["p.a"])],
    );

    let root = catalog.load_dependencies("p.b").unwrap();
    let child = &root.dependencies().unwrap()[0];
    assert!(child.extension().local().is_some());
    assert!(child.extension().outdated());
}

#[test]
fn test_root_built_outside_catalog() {
    let ctx = context();
    let catalog = catalog_of(&ctx, vec![gallery_with_deps("a", "p", &[])]);
    let detached = workbench_extensions::Extension::new(
        ctx.clone(),
        None,
        Some(gallery_with_deps("viewer", "q", &["p.a"])),
    )
    .unwrap();

    let root = DependencyNode::new(&detached, &catalog, None);
    let children = root.dependencies().unwrap();
    assert_eq!(children[0].extension().identifier(), "p.a");
}

#[test]
fn test_self_reference_bounded_by_depth() {
    let ctx = context();
    let catalog =
        catalog_of(&ctx, vec![gallery_with_deps("loop", "p", &["p.loop"])]).with_max_depth(3);

    let mut node = catalog.load_dependencies("p.loop").unwrap();
    let mut expanded = 0;
    loop {
        match node.dependencies() {
            Ok(children) => {
                expanded += 1;
                node = Rc::clone(&children[0]);
            }
            Err(Error::DepthLimit { depth, .. }) => {
                assert_eq!(depth, 3);
                break;
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
        assert!(expanded <= 3, "expansion must stop at the depth bound");
    }
    assert_eq!(expanded, 3);

    let lines = walk(&catalog.load_dependencies("p.loop").unwrap(), 10);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].kind, EntryKind::Cycle);
}

#[test]
fn test_missing_dependency() {
    let ctx = context();
    let catalog = catalog_of(&ctx, vec![gallery_with_deps("b", "p", &["p.ghost"])]);
    let root = catalog.load_dependencies("p.b").unwrap();

    let err = root.dependencies().unwrap_err();
    assert_eq!(
        err.to_string(),
        "dependency 'p.ghost' of 'p.b' is not in the catalog"
    );

    let lines = walk(&root, 10);
    assert_eq!(lines[1].identifier, "p.ghost");
    assert_eq!(lines[1].kind, EntryKind::Missing);
}
