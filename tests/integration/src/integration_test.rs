//! End-to-end flow: configuration -> catalog -> extension views.
//!
//! Records arrive as JSON, the way a gallery query and a local scan would
//! hand them over.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use workbench_extensions::{
    Catalog, Extension, ExtensionContext, ExtensionState, ExtensionsConfiguration,
    GalleryExtension, LocalExtension, logging,
};
use workbench_test_utils::{FakeGallery, InstalledExtension};

const CONFIG: &str = r#"
[extensions]
auto_update = false
recommendations = ["ms-python.python", "lukehoban.go"]
default_icon_url = "media/defaultIcon.svg"
max_dependency_depth = 8
"#;

const GALLERY: &str = r#"[
    {
        "id": "g-python",
        "name": "python",
        "displayName": "Python",
        "publisher": "ms-python",
        "publisherId": "pub-ms",
        "publisherDisplayName": "Microsoft",
        "version": "0.5.0",
        "installCount": 120000,
        "rating": 4.5,
        "ratingCount": 310,
        "assets": {
            "manifest": "https://gallery/ms-python.python/manifest",
            "readme": "https://gallery/ms-python.python/readme",
            "changelog": "https://gallery/ms-python.python/changelog",
            "icon": "https://gallery/ms-python.python/icon",
            "iconFallback": "https://cdn/ms-python.python/icon",
            "license": "https://gallery/ms-python.python/license"
        },
        "properties": { "dependencies": ["ms-vscode.jupyter"] }
    },
    {
        "id": "g-jupyter",
        "name": "jupyter",
        "publisher": "ms-vscode",
        "version": "1.0.0",
        "assets": { "manifest": "https://gallery/ms-vscode.jupyter/manifest" }
    }
]"#;

/// State provider driven by an install queue owned by the test.
fn queue_state(installing: Arc<Mutex<HashSet<String>>>) -> workbench_extensions::StateProvider {
    Arc::new(move |extension: &Extension| {
        if installing.lock().unwrap().contains(&extension.identifier()) {
            ExtensionState::Installing
        } else if extension.local().is_some() {
            ExtensionState::Installed
        } else {
            ExtensionState::Uninstalled
        }
    })
}

fn local_python(dir: &InstalledExtension) -> LocalExtension {
    let local: LocalExtension = serde_json::from_value(serde_json::json!({
        "type": "user",
        "path": "/unused",
        "manifest": {
            "name": "python",
            "publisher": "ms-python",
            "version": "0.4.0",
            "displayName": "Python"
        }
    }))
    .unwrap();
    dir.attach(local)
}

#[tokio::test]
async fn test_catalog_from_config_and_records() {
    let _ = logging::init_with_default("debug");

    let config = ExtensionsConfiguration::from_toml(CONFIG).unwrap();
    let installing = Arc::new(Mutex::new(HashSet::new()));
    let gallery = Arc::new(FakeGallery::new().with_asset(
        "https://gallery/ms-vscode.jupyter/manifest",
        r#"{"name":"jupyter","publisher":"ms-vscode","version":"1.0.0","description":"Notebooks"}"#,
    ));
    let context = ExtensionContext::new(gallery.clone(), queue_state(Arc::clone(&installing)));

    let dir = InstalledExtension::new()
        .with_readme("# Python for VS Code")
        .with_changelog("## 0.5.0\n- debugger fixes");
    let published: Vec<GalleryExtension> = serde_json::from_str(GALLERY).unwrap();
    let catalog =
        Catalog::from_configured_records(&config, context, vec![local_python(&dir)], published);

    assert_eq!(catalog.identifiers(), vec!["ms-python.python", "ms-vscode.jupyter"]);
    assert_eq!(catalog.max_depth(), 8);

    let python = catalog.get("ms-python.python").unwrap();
    assert_eq!(python.version(), "0.4.0");
    assert_eq!(python.latest_version(), "0.5.0");
    assert!(python.outdated());
    assert_eq!(python.install_count(), Some(120000));
    assert_eq!(python.publisher_display_name(), "ms-python");
    assert_eq!(python.icon_url(), "https://gallery/ms-python.python/icon");
    assert_eq!(python.icon_url_fallback(), "https://cdn/ms-python.python/icon");
    assert_eq!(python.telemetry_data()["galleryId"], "g-python");

    // Local assets win over gallery ones and never hit the network.
    assert_eq!(python.readme().await.unwrap(), "# Python for VS Code");
    assert!(python.changelog().await.unwrap().contains("debugger fixes"));
    assert!(gallery.calls().is_empty());

    let jupyter = catalog.get("ms-vscode.jupyter").unwrap();
    assert_eq!(jupyter.icon_url(), "media/defaultIcon.svg");
    assert_eq!(jupyter.state(), ExtensionState::Uninstalled);
    let manifest = jupyter.manifest().await.unwrap();
    assert_eq!(manifest.description.as_deref(), Some("Notebooks"));
    assert_eq!(gallery.calls(), vec!["https://gallery/ms-vscode.jupyter/manifest"]);

    installing.lock().unwrap().insert("ms-vscode.jupyter".to_string());
    assert_eq!(jupyter.state(), ExtensionState::Installing);

    let outdated: Vec<String> = catalog.outdated().iter().map(|e| e.identifier()).collect();
    assert_eq!(outdated, vec!["ms-python.python"]);
    assert_eq!(catalog.missing_recommendations(&config), vec!["lukehoban.go"]);

    tracing::info!(count = catalog.len(), "Catalog checks complete");
}

#[tokio::test]
async fn test_gallery_only_changelog_is_not_fetched() {
    let gallery = Arc::new(FakeGallery::new());
    let context = ExtensionContext::new(
        gallery.clone(),
        queue_state(Arc::new(Mutex::new(HashSet::new()))),
    );
    let published: Vec<GalleryExtension> = serde_json::from_str(GALLERY).unwrap();
    let catalog = Catalog::from_records(&context, vec![], published);

    let python = catalog.get("ms-python.python").unwrap();
    assert!(python.has_changelog());
    assert!(python.changelog().await.is_err());
    assert!(gallery.calls().is_empty());

    // Readme has a remote path; the fake gallery has no such asset.
    assert!(python.readme().await.is_err());
    assert_eq!(gallery.calls(), vec!["https://gallery/ms-python.python/readme"]);
}
