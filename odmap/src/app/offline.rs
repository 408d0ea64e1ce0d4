use std::collections::HashMap;
use std::path::Path;

use odmap_core::model::{
    service::{MemoryGeometrySource, MemoryTripRecord, MemoryTripTable},
    BlockGroupId, FieldNames, OdError,
};

use super::OdAppError;

/// reads a CSV export of an O-D table. columns are found by the configured
/// field names; the day part column is optional. rows with a missing id or
/// an invalid trip count are logged and skipped.
pub fn read_trip_table(path: &Path, fields: &FieldNames) -> Result<MemoryTripTable, OdAppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| OdAppError::ReadError {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
    let headers = reader
        .headers()
        .map_err(|e| OdAppError::ReadError {
            path: path.to_owned(),
            message: format!("failed reading header row: {e}"),
        })?
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect::<HashMap<_, _>>();
    let column = |name: &str| {
        headers.get(name).copied().ok_or_else(|| {
            OdAppError::InvalidUserInput(format!(
                "O-D table '{}' has no '{name}' column",
                path.display()
            ))
        })
    };
    let origin_col = column(&fields.origin)?;
    let destination_col = column(&fields.destination)?;
    let trips_col = column(&fields.trips)?;
    let day_type_col = column(&fields.day_type)?;
    let day_part_col = headers.get(&fields.day_part).copied();

    let mut records = vec![];
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| OdAppError::ReadError {
            path: path.to_owned(),
            message: format!("failed reading row {idx}: {e}"),
        })?;
        let value = |col: usize| row.get(col).map(str::trim).filter(|v| !v.is_empty());
        let (Some(origin), Some(destination)) = (value(origin_col), value(destination_col))
        else {
            log::warn!("row {idx} of '{}' is missing an origin or destination", path.display());
            continue;
        };
        let origin = BlockGroupId::from(origin);
        let trips = match parse_trip_count(&origin, value(trips_col)) {
            Ok(trips) => trips,
            Err(e) => {
                log::warn!("row {idx} of '{}': {e}", path.display());
                continue;
            }
        };
        records.push(MemoryTripRecord {
            origin,
            destination: BlockGroupId::from(destination),
            trips,
            day_type: value(day_type_col).unwrap_or_default().to_string(),
            day_part: day_part_col.and_then(value).map(String::from),
        });
    }
    log::info!("read {} O-D rows from '{}'", records.len(), path.display());
    Ok(MemoryTripTable::new(fields.clone(), records))
}

fn parse_trip_count(origin: &BlockGroupId, value: Option<&str>) -> Result<f64, OdError> {
    let invalid = |message: String| OdError::InvalidTripRow {
        origin: origin.clone(),
        message,
    };
    let value = value.ok_or_else(|| invalid(String::from("missing trip count")))?;
    let trips = value
        .parse::<f64>()
        .map_err(|e| invalid(format!("trip count '{value}' is not a number: {e}")))?;
    if !trips.is_finite() || trips < 0.0 {
        return Err(invalid(format!("trip count '{value}' is not a non-negative number")));
    }
    Ok(trips)
}

/// reads a GeoJSON FeatureCollection of block group polygons
pub fn read_block_groups(path: &Path, id_field: &str) -> Result<MemoryGeometrySource, OdAppError> {
    let contents = std::fs::read_to_string(path).map_err(|e| OdAppError::ReadError {
        path: path.to_owned(),
        message: e.to_string(),
    })?;
    let geojson = contents
        .parse::<geojson::GeoJson>()
        .map_err(|e| OdAppError::ReadError {
            path: path.to_owned(),
            message: format!("invalid GeoJSON: {e}"),
        })?;
    let geojson::GeoJson::FeatureCollection(collection) = geojson else {
        return Err(OdAppError::InvalidUserInput(format!(
            "'{}' must contain a FeatureCollection",
            path.display()
        )));
    };
    let source = MemoryGeometrySource::from_feature_collection(&collection, id_field)?;
    log::info!("read {} block groups from '{}'", source.len(), path.display());
    Ok(source)
}
