use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use odmap_arcgis::client::FeatureServiceConfig;
use odmap_core::model::FieldNames;
use serde::{Deserialize, Serialize};

use super::OdAppError;

/// built-in configuration, overridden by a user file and then by `ODMAP_`
/// environment variables such as `ODMAP_SERVICE__TIMEOUT_SECONDS`
pub const DEFAULT_CONFIG: &str = include_str!("odmap-default.toml");

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OdmapConfig {
    pub service: FeatureServiceConfig,
    #[serde(default)]
    pub fields: FieldNames,
    pub map: MapConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MapConfig {
    /// the layer whose features can be clicked as origins
    pub origin_layer_id: String,
}

impl OdmapConfig {
    pub fn load(configuration_file: Option<&str>) -> Result<OdmapConfig, OdAppError> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(file) = configuration_file {
            builder = builder.add_source(File::from(Path::new(file)));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("ODMAP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                let source = configuration_file.unwrap_or("default configuration");
                let msg = format!("file '{source}' produced error: {e}");
                OdAppError::InvalidUserInput(msg)
            })?;
        config.try_deserialize::<OdmapConfig>().map_err(|e| {
            let msg = format!("error reading odmap configuration: {e}");
            OdAppError::InvalidUserInput(msg)
        })
    }
}
