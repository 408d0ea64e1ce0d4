//! reduction of queried trip rows into destination sums.
//!
//! "all days" and "all times" queries return one row per matched day/time
//! code for the same destination; those rows are summed, not averaged.
use serde::{Deserialize, Serialize};

use super::{CombinedTripMap, DestinationTrips, OriginTripMap, TripRow};

/// groups rows by destination and sums their trip counts
pub fn aggregate(rows: &[TripRow]) -> DestinationTrips {
    let mut result = DestinationTrips::with_capacity(rows.len());
    for row in rows {
        *result.entry(row.destination_id.clone()).or_default() += row.trip_count;
    }
    result
}

/// sums every origin's destination trips into one mapping
pub fn combine(origin_trip_map: &OriginTripMap) -> CombinedTripMap {
    let mut combined = CombinedTripMap::new();
    for (_, trips) in origin_trip_map.iter() {
        for (destination, count) in trips.iter() {
            *combined.entry(destination.clone()).or_default() += count;
        }
    }
    combined
}

/// counts describing one aggregated query result, for logging.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AggregationSummary {
    pub rows: usize,
    pub destinations: usize,
    pub total_trips: f64,
}

impl AggregationSummary {
    pub fn new(rows: &[TripRow], trips: &DestinationTrips) -> Self {
        Self {
            rows: rows.len(),
            destinations: trips.len(),
            total_trips: trips.values().sum(),
        }
    }
}

impl std::fmt::Display for AggregationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows, {} destinations, {} trips",
            self.rows, self.destinations, self.total_trips
        )
    }
}
