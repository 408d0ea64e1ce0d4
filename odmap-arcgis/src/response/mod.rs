//! json bodies returned by the `query` operation of a FeatureServer layer
mod feature_set;
mod service_response;
mod trip_attributes;

pub use feature_set::{CountResult, FeatureRecord, FeatureSet};
pub use service_response::{ServiceErrorBody, ServiceResponse};
pub use trip_attributes::{decode_trip_count, decode_trip_row, decode_trip_rows};
