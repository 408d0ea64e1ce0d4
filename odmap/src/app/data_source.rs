use odmap_arcgis::client::FeatureServiceClient;
use odmap_core::model::{
    filter::QueryFilter,
    service::{
        BlockGroupGeometry, GeometrySource, MemoryGeometrySource, MemoryTripTable,
        TripQueryAdapter,
    },
    trip::TripRow,
    BlockGroupId,
};

use super::OdAppError;

/// where trip rows and block group geometries come from: the feature
/// service, or local exports of its O-D table and block group layer.
pub enum DataSource {
    FeatureService(FeatureServiceClient),
    Offline {
        trips: MemoryTripTable,
        geometries: MemoryGeometrySource,
    },
}

impl TripQueryAdapter for DataSource {
    type Error = OdAppError;

    async fn query_trips(
        &self,
        origin: &BlockGroupId,
        filter: &QueryFilter,
    ) -> Result<Vec<TripRow>, Self::Error> {
        match self {
            DataSource::FeatureService(client) => Ok(client.query_trips(origin, filter).await?),
            DataSource::Offline { trips, .. } => match trips.query_trips(origin, filter).await {
                Ok(rows) => Ok(rows),
                Err(never) => match never {},
            },
        }
    }

    async fn count_records(&self, filter: &QueryFilter) -> Result<u64, Self::Error> {
        match self {
            DataSource::FeatureService(client) => Ok(client.count_records(filter).await?),
            DataSource::Offline { trips, .. } => match trips.count_records(filter).await {
                Ok(count) => Ok(count),
                Err(never) => match never {},
            },
        }
    }
}

impl GeometrySource for DataSource {
    type Error = OdAppError;

    async fn block_group_geometries(
        &self,
        ids: &[BlockGroupId],
    ) -> Result<Vec<BlockGroupGeometry>, Self::Error> {
        match self {
            DataSource::FeatureService(client) => Ok(client.block_group_geometries(ids).await?),
            DataSource::Offline { geometries, .. } => {
                match geometries.block_group_geometries(ids).await {
                    Ok(found) => Ok(found),
                    Err(never) => match never {},
                }
            }
        }
    }
}
