mod aggregation;
mod origin_trip_map;
mod trip_row;

pub use aggregation::{aggregate, combine, AggregationSummary};
pub use origin_trip_map::{CombinedTripMap, DestinationTrips, OriginTripMap};
pub use trip_row::TripRow;
