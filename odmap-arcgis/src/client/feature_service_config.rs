use std::time::Duration;

use odmap_core::model::{filter::Mode, FieldNames};
use serde::{Deserialize, Serialize};

use super::FeatureServiceClient;
use super::FeatureServiceError;

pub const DEFAULT_BASE_URL: &str = "https://services3.arcgis.com/MV5wh5WkCMqlwISp/ArcGIS/rest/services/Greene_County_ODs/FeatureServer";

/// layer ids of the O-D tables, one per mode
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct OdTables {
    pub internal: u32,
}

impl Default for OdTables {
    fn default() -> Self {
        Self { internal: 2 }
    }
}

impl OdTables {
    pub fn layer_for(&self, mode: &Mode) -> u32 {
        match mode {
            Mode::Internal => self.internal,
        }
    }
}

/// Serializable configuration of the feature service.
/// Builds to a [`FeatureServiceClient`]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FeatureServiceConfig {
    /// url of the FeatureServer, without a layer id
    pub base_url: String,
    /// layer holding the block group polygons
    pub block_group_layer: u32,
    pub od_tables: OdTables,
    // request timeout. Defaults to 30 seconds
    pub timeout_seconds: Option<u64>,
    // records requested per page. Defaults to 2000
    pub page_size: Option<u64>,
}

impl Default for FeatureServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            block_group_layer: 1,
            od_tables: OdTables::default(),
            timeout_seconds: Some(30),
            page_size: Some(2000),
        }
    }
}

impl FeatureServiceConfig {
    pub fn build(&self, fields: FieldNames) -> Result<FeatureServiceClient, FeatureServiceError> {
        let base_url = self.base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FeatureServiceError::InvalidUserInput(format!(
                "service base_url must be an http(s) url, found '{}'",
                self.base_url
            )));
        }
        let page_size = self.page_size.unwrap_or(2000);
        if page_size == 0 {
            return Err(FeatureServiceError::InvalidUserInput(String::from(
                "service page_size must be positive",
            )));
        }
        let timeout = Duration::from_secs(self.timeout_seconds.unwrap_or(30));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                FeatureServiceError::ClientBuildError(format!(
                    "failure creating http client with timeout {timeout:?}: {e}"
                ))
            })?;
        Ok(FeatureServiceClient::new(
            client,
            base_url,
            self.block_group_layer,
            self.od_tables,
            page_size,
            fields,
        ))
    }
}
