use std::future::Future;

use crate::model::{filter::QueryFilter, trip::TripRow, BlockGroupId};

/// access to the O-D table. implementations build their where-clauses with
/// [`crate::model::TripPredicateBuilder`].
pub trait TripQueryAdapter {
    type Error: std::fmt::Display;

    /// every row leaving `origin` within the filter context. no rows is a
    /// valid answer meaning zero trips.
    fn query_trips(
        &self,
        origin: &BlockGroupId,
        filter: &QueryFilter,
    ) -> impl Future<Output = Result<Vec<TripRow>, Self::Error>>;

    /// number of rows in the filter context across all origins
    fn count_records(&self, filter: &QueryFilter)
        -> impl Future<Output = Result<u64, Self::Error>>;
}
