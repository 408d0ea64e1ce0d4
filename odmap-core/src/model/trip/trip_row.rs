use serde::{Deserialize, Serialize};

use crate::model::BlockGroupId;

/// one record of the O-D table as returned by a trip query. trip counts are
/// daily averages and may be fractional.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TripRow {
    pub destination_id: BlockGroupId,
    pub trip_count: f64,
    pub day_type: String,
    pub day_part: Option<String>,
}

impl TripRow {
    pub fn new(
        destination_id: BlockGroupId,
        trip_count: f64,
        day_type: &str,
        day_part: Option<&str>,
    ) -> Self {
        Self {
            destination_id,
            trip_count,
            day_type: day_type.to_string(),
            day_part: day_part.map(String::from),
        }
    }
}
