use serde::{Deserialize, Serialize};

use crate::model::{BlockGroupId, OdError};

/// a feature reported by the map's hit test: the id of the layer that owns it
/// and its attributes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HitFeature {
    pub layer_id: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl HitFeature {
    pub fn new(layer_id: &str) -> Self {
        Self {
            layer_id: layer_id.to_string(),
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: serde_json::Value) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    /// the block group id stored under `field`
    pub fn block_group(&self, field: &str) -> Result<BlockGroupId, OdError> {
        self.attributes
            .get(field)
            .and_then(BlockGroupId::from_attribute)
            .ok_or_else(|| OdError::MissingAttribute {
                layer_id: self.layer_id.clone(),
                field: field.to_string(),
            })
    }
}
