mod class_breaks;
mod highlight;
mod rgba;

pub use class_breaks::{ClassBreak, ClassBreakRenderer};
pub use highlight::{HighlightPlan, Overlay, OverlayRole, Symbol};
pub use rgba::Rgba;
