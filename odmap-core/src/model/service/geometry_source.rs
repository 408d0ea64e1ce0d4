use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::model::BlockGroupId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BlockGroupGeometry {
    pub block_group: BlockGroupId,
    pub geometry: geojson::Geometry,
}

/// looks up block group polygons by id. ids unknown to the source are left
/// out of the result rather than reported.
pub trait GeometrySource {
    type Error: std::fmt::Display;

    fn block_group_geometries(
        &self,
        ids: &[BlockGroupId],
    ) -> impl Future<Output = Result<Vec<BlockGroupGeometry>, Self::Error>>;
}
