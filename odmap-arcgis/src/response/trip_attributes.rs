use odmap_core::model::{trip::TripRow, BlockGroupId, FieldNames};
use serde_json::{Map, Value};

use crate::{client::FeatureServiceError, response::FeatureSet};

/// trip counts are daily averages stored as doubles and are kept as-is.
/// negative, non-finite and non-numeric values are rejected.
pub fn decode_trip_count(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|count| count.is_finite() && *count >= 0.0)
}

/// reads one feature's attributes as a [`TripRow`]
pub fn decode_trip_row(
    attributes: &Map<String, Value>,
    fields: &FieldNames,
) -> Result<TripRow, FeatureServiceError> {
    let destination_id = attributes
        .get(&fields.destination)
        .and_then(BlockGroupId::from_attribute)
        .ok_or_else(|| {
            FeatureServiceError::InvalidRow(format!(
                "missing or empty '{}' attribute",
                fields.destination
            ))
        })?;
    let trip_count = match attributes.get(&fields.trips) {
        Some(value) => decode_trip_count(value).ok_or_else(|| {
            FeatureServiceError::InvalidRow(format!(
                "'{}' of destination {destination_id} is not a trip count: {value}",
                fields.trips
            ))
        })?,
        None => {
            return Err(FeatureServiceError::InvalidRow(format!(
                "missing '{}' attribute for destination {destination_id}",
                fields.trips
            )))
        }
    };
    let day_type = attributes
        .get(&fields.day_type)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let day_part = attributes
        .get(&fields.day_part)
        .and_then(Value::as_str)
        .map(String::from);
    Ok(TripRow {
        destination_id,
        trip_count,
        day_type,
        day_part,
    })
}

/// decodes every feature of a page. rows that cannot be decoded are logged
/// and left out.
pub fn decode_trip_rows(page: &FeatureSet, fields: &FieldNames) -> Vec<TripRow> {
    page.features
        .iter()
        .filter_map(|feature| match decode_trip_row(&feature.attributes, fields) {
            Ok(row) => Some(row),
            Err(e) => {
                log::warn!("skipping trip row: {e}");
                None
            }
        })
        .collect()
}
