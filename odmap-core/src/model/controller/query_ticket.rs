use crate::model::{
    filter::QueryFilter, service::TripQueryAdapter, trip::TripRow, BlockGroupId,
};

/// the right to apply one trip query result. tickets are not `Clone`, so a
/// result can be handed back to the controller at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct QueryTicket {
    pub(crate) origin: BlockGroupId,
    pub(crate) sequence: u64,
    pub(crate) epoch: u64,
    pub(crate) filter: QueryFilter,
}

impl QueryTicket {
    pub fn origin(&self) -> &BlockGroupId {
        &self.origin
    }

    /// filter context captured when the query was started
    pub fn filter(&self) -> &QueryFilter {
        &self.filter
    }

    /// runs the trip query this ticket was issued for. adapter errors are
    /// flattened to their message; the controller only logs them.
    pub async fn execute<A: TripQueryAdapter>(
        self,
        adapter: &A,
    ) -> (QueryTicket, Result<Vec<TripRow>, String>) {
        let result = adapter
            .query_trips(&self.origin, &self.filter)
            .await
            .map_err(|e| e.to_string());
        (self, result)
    }
}
