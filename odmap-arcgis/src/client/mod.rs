mod error;
mod feature_service_client;
mod feature_service_config;
mod query_params;

pub use error::FeatureServiceError;
pub use feature_service_client::FeatureServiceClient;
pub use feature_service_config::{FeatureServiceConfig, OdTables};
pub use query_params::{QueryParams, ResponseFormat};
