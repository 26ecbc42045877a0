//! Record builders.
//!
//! Built records are deterministic: gallery ids are `"{publisher}.{name}-id"`,
//! install paths are `/extensions/{publisher}.{name}`.

use workbench_extensions::{
    Catalog, ExtensionContext, ExtensionManifest, GalleryExtension, GalleryProperties,
    LocalExtension, LocalExtensionType,
};

/// A user-installed extension.
pub fn local_extension(name: &str, publisher: &str, version: &str) -> LocalExtension {
    LocalExtension::new(
        LocalExtensionType::User,
        ExtensionManifest::new(name, publisher, version),
        format!("/extensions/{publisher}.{name}"),
    )
}

/// A gallery record without dependencies.
pub fn gallery_extension(name: &str, publisher: &str, version: &str) -> GalleryExtension {
    GalleryExtension {
        id: format!("{publisher}.{name}-id"),
        name: name.to_string(),
        publisher: publisher.to_string(),
        publisher_id: format!("{publisher}-id"),
        version: version.to_string(),
        ..Default::default()
    }
}

/// A gallery record declaring `dependencies`, version `1.0.0`.
pub fn gallery_with_deps(name: &str, publisher: &str, dependencies: &[&str]) -> GalleryExtension {
    GalleryExtension {
        properties: GalleryProperties {
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            engine: None,
        },
        ..gallery_extension(name, publisher, "1.0.0")
    }
}

/// A catalog of gallery-only extensions.
pub fn catalog_of(context: &ExtensionContext, gallery: Vec<GalleryExtension>) -> Catalog {
    Catalog::from_records(context, Vec::new(), gallery)
}
