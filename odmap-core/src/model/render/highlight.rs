use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{ClassBreakRenderer, Rgba};
use crate::model::{trip::CombinedTripMap, BlockGroupId};

/// fill and outline drawn for one overlay
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Symbol {
    pub fill: Rgba,
    pub outline: Rgba,
    pub outline_width: f32,
}

impl Symbol {
    /// a colored fill with no visible border
    pub fn fill_only(fill: Rgba) -> Self {
        Self {
            fill,
            outline: Rgba::TRANSPARENT,
            outline_width: 0.0,
        }
    }

    /// a bold red border over a transparent fill, marking a selected origin
    pub fn origin_outline() -> Self {
        Self {
            fill: Rgba::TRANSPARENT,
            outline: Rgba::opaque(255, 0, 0),
            outline_width: 3.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "role")]
pub enum OverlayRole {
    Destination { trips: f64 },
    Origin,
}

/// one graphic to place over a block group
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Overlay {
    pub block_group: BlockGroupId,
    pub role: OverlayRole,
    pub symbol: Symbol,
}

/// the overlays for the current selection, in draw order: every destination
/// fill first, then every origin outline so borders are never covered.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HighlightPlan {
    pub overlays: Vec<Overlay>,
}

impl HighlightPlan {
    /// destinations without trips get no overlay. within each group overlays
    /// are ordered by block group id.
    pub fn build<'a, I>(
        combined: &CombinedTripMap,
        selected_origins: I,
        renderer: &ClassBreakRenderer,
    ) -> Self
    where
        I: IntoIterator<Item = &'a BlockGroupId>,
    {
        let fills = combined
            .iter()
            .filter(|(_, trips)| **trips > 0.0)
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(block_group, trips)| Overlay {
                block_group: block_group.clone(),
                role: OverlayRole::Destination { trips: *trips },
                symbol: Symbol::fill_only(renderer.color_for(*trips)),
            });
        let outlines = selected_origins
            .into_iter()
            .sorted()
            .map(|block_group| Overlay {
                block_group: block_group.clone(),
                role: OverlayRole::Origin,
                symbol: Symbol::origin_outline(),
            });
        Self {
            overlays: fills.chain(outlines).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// distinct block groups whose geometry is needed to draw the plan
    pub fn block_groups(&self) -> Vec<BlockGroupId> {
        self.overlays
            .iter()
            .map(|o| o.block_group.clone())
            .unique()
            .collect()
    }
}
