use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::OdError;

/// a single day of week as encoded in the `Day_Type` column of the O-D table.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// the value stored in the O-D table
    pub fn code(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "1: Monday (M-M)",
            DayOfWeek::Tuesday => "2: Tuesday (Tu-Tu)",
            DayOfWeek::Wednesday => "3: Wednesday (W-W)",
            DayOfWeek::Thursday => "4: Thursday (Th-Th)",
            DayOfWeek::Friday => "5: Friday (F-F)",
            DayOfWeek::Saturday => "6: Saturday (Sa-Sa)",
            DayOfWeek::Sunday => "7: Sunday (Su-Su)",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    fn ordinal(&self) -> usize {
        DayOfWeek::ALL
            .iter()
            .position(|d| d == self)
            .map(|p| p + 1)
            .unwrap_or_default()
    }
}

/// the day filter. "all days" has no pre-aggregated rows in the O-D table and
/// expands to every weekday code when queried.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum DaySelection {
    AllDays,
    Day(DayOfWeek),
}

impl DaySelection {
    pub const ALL_DAYS_CODE: &'static str = "0: All Days (M-Su)";

    /// all eight selector options in display order
    pub fn options() -> Vec<DaySelection> {
        std::iter::once(DaySelection::AllDays)
            .chain(DayOfWeek::ALL.into_iter().map(DaySelection::Day))
            .collect()
    }

    pub fn code(&self) -> &'static str {
        match self {
            DaySelection::AllDays => Self::ALL_DAYS_CODE,
            DaySelection::Day(d) => d.code(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DaySelection::AllDays => "All (Mon-Sun)",
            DaySelection::Day(d) => d.label(),
        }
    }

    /// the `Day_Type` values matched by this selection
    pub fn day_type_codes(&self) -> Vec<&'static str> {
        match self {
            DaySelection::AllDays => DayOfWeek::ALL.iter().map(|d| d.code()).collect(),
            DaySelection::Day(d) => vec![d.code()],
        }
    }
}

impl std::fmt::Display for DaySelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<String> for DaySelection {
    type Error = OdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DaySelection> for String {
    fn from(value: DaySelection) -> Self {
        value.code().to_string()
    }
}

/// accepts the full table code ("3: Wednesday (W-W)"), its leading number ("3"),
/// the weekday name ("wednesday") or "all".
impl FromStr for DaySelection {
    type Err = OdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        if trimmed == Self::ALL_DAYS_CODE || lower == "0" || lower == "all" {
            return Ok(DaySelection::AllDays);
        }
        DayOfWeek::ALL
            .into_iter()
            .find(|d| {
                trimmed == d.code()
                    || lower == d.ordinal().to_string()
                    || lower == d.label().to_lowercase()
            })
            .map(DaySelection::Day)
            .ok_or_else(|| OdError::InvalidDay(s.to_string()))
    }
}
