use serde::{Deserialize, Serialize};

use super::{DaySelection, Mode, TimeSelection};
use crate::model::OdError;

/// the current mode/day/time selections of the viewer.
///
/// # Invariants
///   - the time period is only set while a day is set
///   - changing mode unsets both day and time period
///
/// invalid transitions are ignored rather than reported; whether a query can
/// be issued is derived through [`FilterState::query_enabled`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    mode: Mode,
    day: Option<DaySelection>,
    time_period: Option<TimeSelection>,
}

/// a complete filter context, the only form accepted by trip queries.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryFilter {
    pub mode: Mode,
    pub day: DaySelection,
    pub time_period: TimeSelection,
}

impl FilterState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            day: None,
            time_period: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn day(&self) -> Option<DaySelection> {
        self.day
    }

    pub fn time_period(&self) -> Option<TimeSelection> {
        self.time_period
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.day = None;
        self.time_period = None;
    }

    pub fn set_day(&mut self, day: Option<DaySelection>) {
        self.day = day;
        if self.day.is_none() {
            self.time_period = None;
        }
    }

    /// returns false, leaving the state unchanged, when a time period is
    /// offered before any day has been chosen.
    pub fn set_time_period(&mut self, time_period: Option<TimeSelection>) -> bool {
        if time_period.is_some() && self.day.is_none() {
            return false;
        }
        self.time_period = time_period;
        true
    }

    /// whether the time selector is usable
    pub fn time_enabled(&self) -> bool {
        self.day.is_some()
    }

    pub fn query_enabled(&self) -> bool {
        self.day.is_some() && self.time_period.is_some()
    }

    /// the filter context for a trip query, or the prompt to show the user.
    /// the day is checked before the time period.
    pub fn query_filter(&self) -> Result<QueryFilter, OdError> {
        let day = self.day.ok_or(OdError::MissingDay)?;
        let time_period = self.time_period.ok_or(OdError::MissingTime)?;
        Ok(QueryFilter {
            mode: self.mode,
            day,
            time_period,
        })
    }
}

impl FilterState {
    /// the filter context used for whole-table record counts. counting only
    /// needs a day; an unset time period places no restriction.
    pub fn count_filter(&self) -> Option<QueryFilter> {
        self.day.map(|day| QueryFilter {
            mode: self.mode,
            day,
            time_period: self.time_period.unwrap_or(TimeSelection::AllTimes),
        })
    }
}

impl std::fmt::Display for QueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let time = match self.time_period {
            TimeSelection::AllTimes => "All Times",
            other => other.code(),
        };
        write!(f, "mode {}, day {}, time {}", self.mode, self.day, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::{DayOfWeek, DayPart};

    fn monday() -> Option<DaySelection> {
        Some(DaySelection::Day(DayOfWeek::Monday))
    }

    fn noon() -> Option<TimeSelection> {
        Some(TimeSelection::Part(DayPart::new(7).unwrap()))
    }

    #[test]
    fn test_new_state_cannot_query() {
        let state = FilterState::default();
        assert!(!state.query_enabled());
        assert!(!state.time_enabled());
        assert_eq!(state.query_filter(), Err(OdError::MissingDay));
    }

    #[test]
    fn test_time_rejected_without_day() {
        let mut state = FilterState::default();
        assert!(!state.set_time_period(noon()));
        assert_eq!(state.time_period(), None);
    }

    #[test]
    fn test_missing_time_after_day() {
        let mut state = FilterState::default();
        state.set_day(monday());
        assert!(state.time_enabled());
        assert_eq!(state.query_filter(), Err(OdError::MissingTime));
    }

    #[test]
    fn test_day_and_time_enable_queries() {
        let mut state = FilterState::default();
        state.set_day(monday());
        assert!(state.set_time_period(noon()));
        assert!(state.query_enabled());
        let filter = state.query_filter().unwrap();
        assert_eq!(filter.day, DaySelection::Day(DayOfWeek::Monday));
        assert_eq!(filter.time_period, noon().unwrap());
    }

    #[test]
    fn test_unsetting_day_unsets_time() {
        let mut state = FilterState::default();
        state.set_day(monday());
        state.set_time_period(Some(TimeSelection::AllTimes));
        state.set_day(None);
        assert_eq!(state.time_period(), None);
        assert!(!state.query_enabled());
    }

    #[test]
    fn test_changing_day_keeps_time() {
        let mut state = FilterState::default();
        state.set_day(monday());
        state.set_time_period(noon());
        state.set_day(Some(DaySelection::AllDays));
        assert_eq!(state.time_period(), noon());
    }

    #[test]
    fn test_count_filter_needs_only_day() {
        let mut state = FilterState::default();
        assert_eq!(state.count_filter(), None);
        state.set_day(monday());
        let filter = state.count_filter().unwrap();
        assert_eq!(filter.time_period, TimeSelection::AllTimes);
        state.set_time_period(noon());
        assert_eq!(state.count_filter().unwrap().time_period, noon().unwrap());
    }

    #[test]
    fn test_set_mode_resets_day_and_time() {
        let mut state = FilterState::default();
        state.set_day(Some(DaySelection::AllDays));
        state.set_time_period(Some(TimeSelection::AllTimes));
        state.set_mode(Mode::Internal);
        assert_eq!(state, FilterState::new(Mode::Internal));
    }
}
