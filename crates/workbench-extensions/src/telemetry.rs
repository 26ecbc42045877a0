//! Telemetry payloads for extension records.

use serde_json::{Value, json};

use crate::records::{GalleryExtension, LocalExtension};

/// Shapes a telemetry payload from a record.
pub trait TelemetryShaper: Send + Sync {
    fn gallery(&self, extension: &GalleryExtension) -> Value;
    fn local(&self, extension: &LocalExtension) -> Value;
}

/// Identity, gallery ids and a dependency flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTelemetry;

impl TelemetryShaper for DefaultTelemetry {
    fn gallery(&self, extension: &GalleryExtension) -> Value {
        json!({
            "id": extension.identifier(),
            "name": extension.name,
            "galleryId": extension.id,
            "publisherId": extension.publisher_id,
            "publisherName": extension.publisher,
            "publisherDisplayName": extension.publisher_display_name,
            "dependencies": !extension.properties.dependencies.is_empty(),
        })
    }

    fn local(&self, extension: &LocalExtension) -> Value {
        let metadata = extension.metadata.as_ref();
        json!({
            "id": extension.identifier(),
            "name": extension.manifest.name,
            "galleryId": metadata.and_then(|m| m.id.as_deref()),
            "publisherId": metadata.and_then(|m| m.publisher_id.as_deref()),
            "publisherName": extension.manifest.publisher,
            "publisherDisplayName": metadata.and_then(|m| m.publisher_display_name.as_deref()),
            "dependencies": !extension.manifest.extension_dependencies.is_empty(),
        })
    }
}
