use odmap_core::model::{
    filter::QueryFilter,
    present::{SidePanel, Tooltip},
    service::DrawSummary,
    BlockGroupId,
};
use serde::{Deserialize, Serialize};

/// what the session reports back to the view, in the order it happened
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "output")]
pub enum SessionOutput {
    /// a blocking message for the user, e.g. a missing filter selection
    Prompt { message: String },
    /// the side panel was refreshed; `None` hides it
    SidePanel { panel: Option<SidePanel> },
    Tooltip { tooltip: Tooltip },
    TooltipHidden,
    QueryFailed {
        origin: BlockGroupId,
        message: String,
    },
    RecordCount { filter: QueryFilter, count: u64 },
    /// the drawing surface now shows the state of `generation`
    Redrawn {
        generation: u64,
        summary: DrawSummary,
    },
    Settled,
}

impl std::fmt::Display for SessionOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionOutput::Prompt { message } => write!(f, "[prompt] {message}"),
            SessionOutput::SidePanel { panel: Some(panel) } => write!(f, "{panel}"),
            SessionOutput::SidePanel { panel: None } => write!(f, "[side panel hidden]"),
            SessionOutput::Tooltip { tooltip } => write!(f, "{tooltip}"),
            SessionOutput::TooltipHidden => write!(f, "[tooltip hidden]"),
            SessionOutput::QueryFailed { origin, message } => {
                write!(f, "[query failed] origin {origin}: {message}")
            }
            SessionOutput::RecordCount { filter, count } => {
                write!(f, "[records] {count} records for {filter}")
            }
            SessionOutput::Redrawn {
                generation,
                summary,
            } => write!(
                f,
                "[redrawn #{generation}] {} overlays drawn, {} without geometry",
                summary.drawn, summary.missing_geometry
            ),
            SessionOutput::Settled => write!(f, "[settled]"),
        }
    }
}
