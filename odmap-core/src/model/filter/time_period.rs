use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::model::OdError;

/// `Day_Part` codes of the O-D table, one per hour from 6am to 9pm.
const DAY_PART_CODES: [&str; 15] = [
    "01: 6am (6am-7am)",
    "02: 7am (7am-8am)",
    "03: 8am (8am-9am)",
    "04: 9am (9am-10am)",
    "05: 10am (10am-11am)",
    "06: 11am (11am-12noon)",
    "07: 12pm (12noon-1pm)",
    "08: 1pm (1pm-2pm)",
    "09: 2pm (2pm-3pm)",
    "10: 3pm (3pm-4pm)",
    "11: 4pm (4pm-5pm)",
    "12: 5pm (5pm-6pm)",
    "13: 6pm (6pm-7pm)",
    "14: 7pm (7pm-8pm)",
    "15: 8pm (8pm-9pm)",
];

const DAY_PART_LABELS: [&str; 15] = [
    "6am-7am", "7am-8am", "8am-9am", "9am-10am", "10am-11am", "11am-12pm", "12pm-1pm",
    "1pm-2pm", "2pm-3pm", "3pm-4pm", "4pm-5pm", "5pm-6pm", "6pm-7pm", "7pm-8pm", "8pm-9pm",
];

/// one hourly time bin, numbered 1 through 15 as in the table codes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayPart(u8);

impl DayPart {
    pub const COUNT: u8 = 15;

    pub fn new(number: u8) -> Result<DayPart, OdError> {
        if (1..=Self::COUNT).contains(&number) {
            Ok(DayPart(number))
        } else {
            Err(OdError::InvalidTime(number.to_string()))
        }
    }

    pub fn all() -> impl Iterator<Item = DayPart> {
        (1..=Self::COUNT).map(DayPart)
    }

    pub fn code(&self) -> &'static str {
        DAY_PART_CODES[self.index()]
    }

    pub fn label(&self) -> &'static str {
        DAY_PART_LABELS[self.index()]
    }

    fn index(&self) -> usize {
        (self.0 - 1) as usize
    }
}

impl TryFrom<u8> for DayPart {
    type Error = OdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayPart::new(value)
    }
}

impl From<DayPart> for u8 {
    fn from(value: DayPart) -> Self {
        value.0
    }
}

/// the time filter. "all times" places no restriction on `Day_Part`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum TimeSelection {
    AllTimes,
    Part(DayPart),
}

impl TimeSelection {
    pub const ALL_TIMES_CODE: &'static str = "ALL";

    /// all sixteen selector options in display order
    pub fn options() -> Vec<TimeSelection> {
        std::iter::once(TimeSelection::AllTimes)
            .chain(DayPart::all().map(TimeSelection::Part))
            .collect()
    }

    pub fn code(&self) -> &'static str {
        match self {
            TimeSelection::AllTimes => Self::ALL_TIMES_CODE,
            TimeSelection::Part(p) => p.code(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSelection::AllTimes => "All Times (6am-9pm)",
            TimeSelection::Part(p) => p.label(),
        }
    }

    /// the `Day_Part` value to restrict to, if any
    pub fn day_part_code(&self) -> Option<&'static str> {
        match self {
            TimeSelection::AllTimes => None,
            TimeSelection::Part(p) => Some(p.code()),
        }
    }
}

impl std::fmt::Display for TimeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<String> for TimeSelection {
    type Error = OdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSelection> for String {
    fn from(value: TimeSelection) -> Self {
        value.code().to_string()
    }
}

/// accepts "ALL", the full table code ("03: 8am (8am-9am)"), its leading
/// number ("3" or "03") or the short label ("8am-9am").
impl FromStr for TimeSelection {
    type Err = OdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::ALL_TIMES_CODE) {
            return Ok(TimeSelection::AllTimes);
        }
        if let Ok(n) = trimmed.parse::<u8>() {
            return DayPart::new(n)
                .map(TimeSelection::Part)
                .map_err(|_| OdError::InvalidTime(s.to_string()));
        }
        DayPart::all()
            .find(|p| trimmed == p.code() || trimmed.eq_ignore_ascii_case(p.label()))
            .map(TimeSelection::Part)
            .ok_or_else(|| OdError::InvalidTime(s.to_string()))
    }
}
