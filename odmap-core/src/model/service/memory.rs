//! in-memory collaborators, used when the O-D table and block group
//! geometries come from local exports instead of the feature service.
use std::collections::HashMap;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::model::{
    filter::QueryFilter,
    service::{BlockGroupGeometry, GeometrySource, TripQueryAdapter},
    trip::TripRow,
    BlockGroupId, FieldNames, OdError, TripPredicateBuilder,
};

/// one row of an exported O-D table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MemoryTripRecord {
    pub origin: BlockGroupId,
    pub destination: BlockGroupId,
    pub trips: f64,
    pub day_type: String,
    pub day_part: Option<String>,
}

/// an O-D table held in memory, filtered with the same predicates that are
/// sent to the feature service.
pub struct MemoryTripTable {
    fields: FieldNames,
    records: Vec<MemoryTripRecord>,
}

impl MemoryTripTable {
    pub fn new(fields: FieldNames, records: Vec<MemoryTripRecord>) -> Self {
        Self { fields, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn attribute<'a>(&self, record: &'a MemoryTripRecord, field: &str) -> Option<&'a str> {
        if field == self.fields.origin {
            Some(record.origin.as_str())
        } else if field == self.fields.destination {
            Some(record.destination.as_str())
        } else if field == self.fields.day_type {
            Some(record.day_type.as_str())
        } else if field == self.fields.day_part {
            record.day_part.as_deref()
        } else {
            None
        }
    }

    fn matching<'a>(
        &'a self,
        predicate: &'a crate::model::Predicate,
    ) -> impl Iterator<Item = &'a MemoryTripRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| predicate.matches(&|field: &str| self.attribute(r, field)))
    }
}

impl TripQueryAdapter for MemoryTripTable {
    type Error = Infallible;

    async fn query_trips(
        &self,
        origin: &BlockGroupId,
        filter: &QueryFilter,
    ) -> Result<Vec<TripRow>, Self::Error> {
        let predicate = TripPredicateBuilder::new(&self.fields).origin_trips(origin, filter);
        log::debug!("in-memory trip query: {predicate}");
        let rows = self
            .matching(&predicate)
            .map(|r| TripRow {
                destination_id: r.destination.clone(),
                trip_count: r.trips,
                day_type: r.day_type.clone(),
                day_part: r.day_part.clone(),
            })
            .collect();
        Ok(rows)
    }

    async fn count_records(&self, filter: &QueryFilter) -> Result<u64, Self::Error> {
        let predicate = TripPredicateBuilder::new(&self.fields).filter_context(filter);
        Ok(self.matching(&predicate).count() as u64)
    }
}

/// block group geometries held in memory, keyed by id
#[derive(Clone, Debug, Default)]
pub struct MemoryGeometrySource {
    geometries: HashMap<BlockGroupId, geojson::Geometry>,
}

impl MemoryGeometrySource {
    pub fn new(geometries: HashMap<BlockGroupId, geojson::Geometry>) -> Self {
        Self { geometries }
    }

    /// reads every feature of a collection, taking its id from the `id_field`
    /// property. features without an id or geometry are an error.
    pub fn from_feature_collection(
        collection: &geojson::FeatureCollection,
        id_field: &str,
    ) -> Result<Self, OdError> {
        let mut geometries = HashMap::with_capacity(collection.features.len());
        for feature in collection.features.iter() {
            let id = feature
                .property(id_field)
                .and_then(BlockGroupId::from_attribute)
                .ok_or_else(|| OdError::MissingAttribute {
                    layer_id: String::from("block group geometries"),
                    field: id_field.to_string(),
                })?;
            let geometry = feature
                .geometry
                .clone()
                .ok_or_else(|| OdError::MissingAttribute {
                    layer_id: String::from("block group geometries"),
                    field: String::from("geometry"),
                })?;
            geometries.insert(id, geometry);
        }
        Ok(Self { geometries })
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

impl GeometrySource for MemoryGeometrySource {
    type Error = Infallible;

    async fn block_group_geometries(
        &self,
        ids: &[BlockGroupId],
    ) -> Result<Vec<BlockGroupGeometry>, Self::Error> {
        let found = ids
            .iter()
            .filter_map(|id| {
                self.geometries.get(id).map(|g| BlockGroupGeometry {
                    block_group: id.clone(),
                    geometry: g.clone(),
                })
            })
            .collect();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::{DayOfWeek, DayPart, DaySelection, Mode, TimeSelection};
    use futures::executor::block_on;

    fn record(origin: &str, dest: &str, trips: f64, day: DayOfWeek, part: u8) -> MemoryTripRecord {
        MemoryTripRecord {
            origin: BlockGroupId::from(origin),
            destination: BlockGroupId::from(dest),
            trips,
            day_type: day.code().to_string(),
            day_part: Some(DayPart::new(part).unwrap().code().to_string()),
        }
    }

    fn table() -> MemoryTripTable {
        MemoryTripTable::new(
            FieldNames::default(),
            vec![
                record("o1", "A", 3.0, DayOfWeek::Monday, 1),
                record("o1", "A", 4.0, DayOfWeek::Tuesday, 1),
                record("o1", "B", 2.0, DayOfWeek::Monday, 2),
                record("o2", "A", 9.0, DayOfWeek::Monday, 1),
            ],
        )
    }

    fn filter(day: DaySelection, time_period: TimeSelection) -> QueryFilter {
        QueryFilter {
            mode: Mode::Internal,
            day,
            time_period,
        }
    }

    #[test]
    fn test_all_days_all_times() {
        let rows = block_on(table().query_trips(
            &BlockGroupId::from("o1"),
            &filter(DaySelection::AllDays, TimeSelection::AllTimes),
        ))
        .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_single_day_and_time() {
        let rows = block_on(table().query_trips(
            &BlockGroupId::from("o1"),
            &filter(
                DaySelection::Day(DayOfWeek::Monday),
                TimeSelection::Part(DayPart::new(1).unwrap()),
            ),
        ))
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trip_count, 3.0);
    }

    #[test]
    fn test_count_records_ignores_origin() {
        let count = block_on(table().count_records(&filter(
            DaySelection::Day(DayOfWeek::Monday),
            TimeSelection::AllTimes,
        )))
        .unwrap();
        assert_eq!(count, 3);
    }

    fn feature_collection(text: &str) -> geojson::FeatureCollection {
        match text.parse::<geojson::GeoJson>().unwrap() {
            geojson::GeoJson::FeatureCollection(fc) => fc,
            other => panic!("expected a FeatureCollection, found {other:?}"),
        }
    }

    #[test]
    fn test_geometries_from_feature_collection() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"GEOID": "A"},
                 "geometry": {"type": "Point", "coordinates": [-80.1, 39.9]}},
                {"type": "Feature", "properties": {"GEOID": 42},
                 "geometry": {"type": "Point", "coordinates": [-80.2, 39.8]}}
            ]
        }"#;
        let collection = feature_collection(geojson);
        let source = MemoryGeometrySource::from_feature_collection(&collection, "GEOID").unwrap();
        assert_eq!(source.len(), 2);
        let found = block_on(source.block_group_geometries(&[
            BlockGroupId::from("42"),
            BlockGroupId::from("missing"),
        ]))
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].block_group, BlockGroupId::from("42"));
    }

    #[test]
    fn test_feature_without_id_is_rejected() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Point", "coordinates": [-80.1, 39.9]}}
            ]
        }"#;
        let collection = feature_collection(geojson);
        assert!(MemoryGeometrySource::from_feature_collection(&collection, "GEOID").is_err());
    }
}
