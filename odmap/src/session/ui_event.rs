use odmap_core::model::{
    filter::{DaySelection, Mode, TimeSelection},
    service::HitFeature,
};
use serde::{Deserialize, Serialize};

/// an interaction reported by the map view or the filter controls. hit
/// lists are ordered topmost first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum UiEvent {
    SetMode {
        mode: Mode,
    },
    SetDay {
        #[serde(default)]
        day: Option<DaySelection>,
    },
    SetTime {
        #[serde(default)]
        time: Option<TimeSelection>,
    },
    Click {
        hits: Vec<HitFeature>,
    },
    Hover {
        hits: Vec<HitFeature>,
    },
    Drag,
    /// waits for every in-flight query and redraw before the next event
    Settle,
}
