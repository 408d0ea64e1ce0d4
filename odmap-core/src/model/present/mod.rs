mod side_panel;
mod tooltip;

pub use side_panel::{SidePanel, SidePanelEntry};
pub use tooltip::{Tooltip, TooltipLine};
