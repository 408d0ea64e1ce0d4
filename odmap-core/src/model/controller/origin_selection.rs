use std::collections::HashMap;

use crate::model::BlockGroupId;

/// the selected origins. each membership carries the sequence number it was
/// created with so that a query started for an earlier selection of the same
/// block group can be recognized as stale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OriginSelection {
    origins: HashMap<BlockGroupId, u64>,
}

impl OriginSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// false if the origin was already selected
    pub fn insert(&mut self, origin: BlockGroupId, sequence: u64) -> bool {
        if self.origins.contains_key(&origin) {
            return false;
        }
        self.origins.insert(origin, sequence);
        true
    }

    pub fn remove(&mut self, origin: &BlockGroupId) -> bool {
        self.origins.remove(origin).is_some()
    }

    pub fn contains(&self, origin: &BlockGroupId) -> bool {
        self.origins.contains_key(origin)
    }

    pub fn sequence(&self, origin: &BlockGroupId) -> Option<u64> {
        self.origins.get(origin).copied()
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

    pub fn iter(&self) -> impl Iterator<Item = &BlockGroupId> {
        self.origins.keys()
    }
}
