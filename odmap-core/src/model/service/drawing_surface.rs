use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{
    render::{HighlightPlan, Overlay},
    service::BlockGroupGeometry,
};

/// the graphics layer of a map view
pub trait DrawingSurface {
    fn clear(&mut self);
    fn add(&mut self, overlay: &Overlay, geometry: &geojson::Geometry);
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawSummary {
    pub drawn: usize,
    pub missing_geometry: usize,
}

/// replaces everything on the surface with the plan, in plan order. overlays
/// whose block group has no geometry are skipped.
pub fn draw_plan<S: DrawingSurface>(
    surface: &mut S,
    plan: &HighlightPlan,
    geometries: &[BlockGroupGeometry],
) -> DrawSummary {
    let lookup = geometries
        .iter()
        .map(|g| (&g.block_group, &g.geometry))
        .collect::<HashMap<_, _>>();
    let mut summary = DrawSummary::default();
    surface.clear();
    for overlay in plan.overlays.iter() {
        match lookup.get(&overlay.block_group) {
            Some(geometry) => {
                surface.add(overlay, geometry);
                summary.drawn += 1;
            }
            None => {
                log::debug!("no geometry for block group {}", overlay.block_group);
                summary.missing_geometry += 1;
            }
        }
    }
    summary
}
