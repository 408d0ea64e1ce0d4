use geojson::{Feature, FeatureCollection, JsonObject};
use odmap_core::model::{
    render::{Overlay, OverlayRole},
    service::DrawingSurface,
};
use serde_json::json;

/// a drawing surface that collects overlays as GeoJSON features. each
/// feature's properties carry its symbol in simplestyle form (`fill`,
/// `fill-opacity`, `stroke`, `stroke-width`, `stroke-opacity`) along with the
/// block group id, its role and, for destinations, the trip count.
#[derive(Clone, Debug, Default)]
pub struct GeoJsonSurface {
    features: Vec<Feature>,
}

impl GeoJsonSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features.clone(),
            foreign_members: None,
        }
    }
}

impl DrawingSurface for GeoJsonSurface {
    fn clear(&mut self) {
        self.features.clear();
    }

    fn add(&mut self, overlay: &Overlay, geometry: &geojson::Geometry) {
        self.features.push(Feature {
            bbox: None,
            geometry: Some(geometry.clone()),
            id: None,
            properties: Some(overlay_properties(overlay)),
            foreign_members: None,
        });
    }
}

fn overlay_properties(overlay: &Overlay) -> JsonObject {
    let symbol = &overlay.symbol;
    let mut properties = JsonObject::new();
    properties.insert(String::from("geoid"), json!(overlay.block_group));
    match overlay.role {
        OverlayRole::Destination { trips } => {
            properties.insert(String::from("role"), json!("destination"));
            properties.insert(String::from("trips"), json!(trips));
        }
        OverlayRole::Origin => {
            properties.insert(String::from("role"), json!("origin"));
        }
    }
    properties.insert(String::from("fill"), json!(symbol.fill.hex()));
    properties.insert(String::from("fill-opacity"), json!(symbol.fill.a));
    properties.insert(String::from("stroke"), json!(symbol.outline.hex()));
    properties.insert(String::from("stroke-width"), json!(symbol.outline_width));
    properties.insert(String::from("stroke-opacity"), json!(symbol.outline.a));
    properties
}
