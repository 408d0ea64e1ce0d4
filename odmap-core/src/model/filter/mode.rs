use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::OdError;

/// which family of O-D trips is being viewed. each mode is backed by its own
/// O-D table on the feature service.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// trips that begin and end within the county
    #[default]
    Internal,
}

impl Mode {
    pub const ALL: [Mode; 1] = [Mode::Internal];

    pub fn code(&self) -> &'static str {
        match self {
            Mode::Internal => "internal",
        }
    }

    /// text shown in the mode selector
    pub fn selector_label(&self) -> &'static str {
        match self {
            Mode::Internal => "Greene County Block Groups",
        }
    }

    /// adjective used in tooltip lines ("Inbound Internal Trips")
    pub fn trip_type(&self) -> &'static str {
        match self {
            Mode::Internal => "Internal",
        }
    }

    /// subtitle of the side panel
    pub fn side_panel_title(&self) -> &'static str {
        match self {
            Mode::Internal => "Greene County Trips",
        }
    }

    /// suffix of the legend title
    pub fn legend_scope(&self) -> &'static str {
        match self {
            Mode::Internal => "Within Greene County",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Mode {
    type Err = OdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "internal" => Ok(Mode::Internal),
            _ => Err(OdError::InvalidMode(s.to_string())),
        }
    }
}
