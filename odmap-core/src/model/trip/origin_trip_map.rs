use std::collections::HashMap;

use crate::model::BlockGroupId;

/// destination block group -> summed trip count
pub type DestinationTrips = HashMap<BlockGroupId, f64>;

/// destination block group -> trips summed over every selected origin. always
/// derived from an [`OriginTripMap`], never stored.
pub type CombinedTripMap = HashMap<BlockGroupId, f64>;

/// per-origin trip sums. an entry exists for each selected origin whose trip
/// query has resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OriginTripMap {
    origins: HashMap<BlockGroupId, DestinationTrips>,
}

impl OriginTripMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, origin: BlockGroupId, trips: DestinationTrips) {
        self.origins.insert(origin, trips);
    }

    pub fn remove(&mut self, origin: &BlockGroupId) -> Option<DestinationTrips> {
        self.origins.remove(origin)
    }

    pub fn get(&self, origin: &BlockGroupId) -> Option<&DestinationTrips> {
        self.origins.get(origin)
    }

    pub fn contains(&self, origin: &BlockGroupId) -> bool {
        self.origins.contains_key(origin)
    }

    pub fn clear(&mut self) {
        self.origins.clear();
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BlockGroupId, &DestinationTrips)> {
        self.origins.iter()
    }

    /// all trips leaving an origin. zero for an origin without an entry.
    pub fn outbound_total(&self, origin: &BlockGroupId) -> f64 {
        self.origins
            .get(origin)
            .map(|trips| trips.values().sum())
            .unwrap_or_default()
    }

    /// all trips from any origin ending at a block group
    pub fn inbound_total(&self, destination: &BlockGroupId) -> f64 {
        self.origins
            .values()
            .filter_map(|trips| trips.get(destination))
            .sum()
    }
}

impl FromIterator<(BlockGroupId, DestinationTrips)> for OriginTripMap {
    fn from_iter<T: IntoIterator<Item = (BlockGroupId, DestinationTrips)>>(iter: T) -> Self {
        Self {
            origins: iter.into_iter().collect(),
        }
    }
}
