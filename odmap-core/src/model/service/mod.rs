//! seams to the collaborators the engine drives: the remote trip table, the
//! block group geometry source and the map's drawing surface.
mod drawing_surface;
mod geometry_source;
mod hit_feature;
mod memory;
mod trip_query_adapter;

pub use drawing_surface::{draw_plan, DrawSummary, DrawingSurface};
pub use geometry_source::{BlockGroupGeometry, GeometrySource};
pub use hit_feature::HitFeature;
pub use memory::{MemoryGeometrySource, MemoryTripRecord, MemoryTripTable};
pub use trip_query_adapter::TripQueryAdapter;
