use itertools::Itertools;
use odmap_core::model::{
    filter::QueryFilter,
    service::{BlockGroupGeometry, GeometrySource, TripQueryAdapter},
    trip::TripRow,
    BlockGroupId, FieldNames, TripPredicateBuilder,
};
use serde::de::DeserializeOwned;

use super::{FeatureServiceError, OdTables, QueryParams};
use crate::response::{decode_trip_rows, CountResult, FeatureSet, ServiceResponse};

/// queries the O-D tables and block group layer of an ArcGIS FeatureServer.
/// built from a [`super::FeatureServiceConfig`].
#[derive(Debug, Clone)]
pub struct FeatureServiceClient {
    client: reqwest::Client,
    base_url: String,
    block_group_layer: u32,
    od_tables: OdTables,
    page_size: u64,
    fields: FieldNames,
}

impl FeatureServiceClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        block_group_layer: u32,
        od_tables: OdTables,
        page_size: u64,
        fields: FieldNames,
    ) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            block_group_layer,
            od_tables,
            page_size,
            fields,
        }
    }

    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    pub fn layer_url(&self, layer: u32) -> String {
        format!("{}/{layer}/query", self.base_url)
    }

    /// sends one query and decodes its body, surfacing error envelopes. long
    /// where clauses are posted as a form.
    pub async fn query<T: DeserializeOwned>(
        &self,
        layer: u32,
        params: &QueryParams,
    ) -> Result<T, FeatureServiceError> {
        let url = self.layer_url(layer);
        let pairs = params.to_pairs();
        let request = if QueryParams::requires_post(&pairs) {
            log::debug!("POST {url} with a long where clause");
            self.client.post(&url).form(&pairs)
        } else {
            log::debug!("GET {url} where {}", params.predicate);
            self.client.get(&url).query(&pairs)
        };
        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FeatureServiceError::RequestError {
                url: url.clone(),
                message: e.to_string(),
            })?;
        let body: ServiceResponse<T> =
            response
                .json()
                .await
                .map_err(|e| FeatureServiceError::DecodeError {
                    url: url.clone(),
                    message: e.to_string(),
                })?;
        body.into_result()
    }

    /// every page of an attribute query, following `exceededTransferLimit`
    pub async fn query_all_pages(
        &self,
        layer: u32,
        params: QueryParams,
    ) -> Result<Vec<FeatureSet>, FeatureServiceError> {
        let mut pages = vec![];
        let mut offset = 0;
        loop {
            let page_params = params.clone().with_page(offset, self.page_size);
            let page: FeatureSet = self.query(layer, &page_params).await?;
            let returned = page.features.len() as u64;
            let more = page.exceeded_transfer_limit && returned > 0;
            pages.push(page);
            if !more {
                break;
            }
            offset += returned;
            log::debug!("layer {layer} exceeded transfer limit, next page at offset {offset}");
        }
        Ok(pages)
    }
}

impl TripQueryAdapter for FeatureServiceClient {
    type Error = FeatureServiceError;

    async fn query_trips(
        &self,
        origin: &BlockGroupId,
        filter: &QueryFilter,
    ) -> Result<Vec<TripRow>, Self::Error> {
        let builder = TripPredicateBuilder::new(&self.fields);
        let predicate = builder.origin_trips(origin, filter);
        let out_fields = builder.trip_out_fields(&filter.time_period);
        log::info!("querying trips for origin {origin}: {predicate}");
        let layer = self.od_tables.layer_for(&filter.mode);
        let pages = self
            .query_all_pages(layer, QueryParams::attributes(predicate, out_fields))
            .await?;
        let rows = pages
            .iter()
            .flat_map(|page| decode_trip_rows(page, &self.fields))
            .collect_vec();
        log::debug!("origin {origin}: {} rows in {} page(s)", rows.len(), pages.len());
        Ok(rows)
    }

    async fn count_records(&self, filter: &QueryFilter) -> Result<u64, Self::Error> {
        let predicate = TripPredicateBuilder::new(&self.fields).filter_context(filter);
        let layer = self.od_tables.layer_for(&filter.mode);
        let result: CountResult = self.query(layer, &QueryParams::count(predicate)).await?;
        Ok(result.count)
    }
}

impl GeometrySource for FeatureServiceClient {
    type Error = FeatureServiceError;

    /// ids are requested in chunks of the page size so no response is truncated
    async fn block_group_geometries(
        &self,
        ids: &[BlockGroupId],
    ) -> Result<Vec<BlockGroupGeometry>, Self::Error> {
        let builder = TripPredicateBuilder::new(&self.fields);
        let mut geometries = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(self.page_size.max(1) as usize) {
            let params = QueryParams::geometries(
                builder.block_groups(chunk),
                vec![self.fields.geoid.clone()],
            );
            let collection: geojson::FeatureCollection =
                self.query(self.block_group_layer, &params).await?;
            geometries.extend(geometries_from_collection(&collection, &self.fields.geoid));
        }
        Ok(geometries)
    }
}

/// features lacking an id or a geometry are logged and left out
fn geometries_from_collection(
    collection: &geojson::FeatureCollection,
    id_field: &str,
) -> Vec<BlockGroupGeometry> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let block_group = feature.property(id_field).and_then(BlockGroupId::from_attribute);
            match (block_group, feature.geometry.as_ref()) {
                (Some(block_group), Some(geometry)) => Some(BlockGroupGeometry {
                    block_group,
                    geometry: geometry.clone(),
                }),
                (block_group, _) => {
                    log::warn!(
                        "block group feature {} missing '{id_field}' or geometry",
                        block_group.map(|b| b.to_string()).unwrap_or_default()
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FeatureServiceConfig;
    use odmap_core::model::filter::{DayOfWeek, DaySelection, Mode, TimeSelection};

    fn collection(json: &str) -> geojson::FeatureCollection {
        match json.parse::<geojson::GeoJson>().unwrap() {
            geojson::GeoJson::FeatureCollection(fc) => fc,
            other => panic!("expected feature collection, found {other:?}"),
        }
    }

    #[test]
    fn test_geometries_from_collection() {
        let fc = collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"GEOID": "A"},
                     "geometry": {"type": "Point", "coordinates": [-80.1, 39.9]}},
                    {"type": "Feature", "properties": {"GEOID": "B"}, "geometry": null},
                    {"type": "Feature", "properties": {},
                     "geometry": {"type": "Point", "coordinates": [-80.2, 39.8]}}
                ]
            }"#,
        );
        let geometries = geometries_from_collection(&fc, "GEOID");
        assert_eq!(geometries.len(), 1);
        assert_eq!(geometries[0].block_group, BlockGroupId::from("A"));
    }

    #[test]
    fn test_geojson_error_envelope() {
        let body = r#"{"error":{"code":400,"message":"Invalid query parameters."}}"#;
        let response: ServiceResponse<geojson::FeatureCollection> =
            serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.into_result(),
            Err(FeatureServiceError::ServiceError { code: 400, .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires the live feature service"]
    async fn test_live_query() {
        let client = FeatureServiceConfig::default()
            .build(FieldNames::default())
            .unwrap();
        let filter = QueryFilter {
            mode: Mode::Internal,
            day: DaySelection::Day(DayOfWeek::Monday),
            time_period: TimeSelection::AllTimes,
        };
        let count = client.count_records(&filter).await.unwrap();
        assert!(count > 0);
    }
}
