use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{
    filter::{DaySelection, QueryFilter, TimeSelection},
    BlockGroupId, FieldNames,
};

/// a where-clause for the feature service, kept as a tree until it is sent.
/// string values are always rendered as quoted literals with embedded quotes
/// doubled, so ids and codes can never change the structure of the clause.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Predicate {
    /// `field = 'value'`
    Eq { field: String, value: String },
    /// `field IN ('a', 'b', ...)`
    In { field: String, values: Vec<String> },
    /// conjunction of clauses; an empty conjunction matches every row
    And { clauses: Vec<Predicate> },
}

impl Predicate {
    pub fn eq(field: &str, value: &str) -> Predicate {
        Predicate::Eq {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// a single-valued list collapses to an equality test
    pub fn any_of<I, S>(field: &str, values: I) -> Predicate
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = values.into_iter().map(Into::into).collect_vec();
        if values.len() == 1 {
            let value = values.remove(0);
            Predicate::Eq {
                field: field.to_string(),
                value,
            }
        } else {
            Predicate::In {
                field: field.to_string(),
                values,
            }
        }
    }

    pub fn and(clauses: Vec<Predicate>) -> Predicate {
        Predicate::And { clauses }
    }

    /// renders the SQL-92 where clause understood by ArcGIS feature services
    pub fn to_where_clause(&self) -> String {
        match self {
            Predicate::Eq { field, value } => format!("{field} = {}", quote(value)),
            Predicate::In { values, .. } if values.is_empty() => {
                // nothing can match an empty list
                String::from("1=0")
            }
            Predicate::In { field, values } => {
                format!("{field} IN ({})", values.iter().map(|v| quote(v)).join(", "))
            }
            Predicate::And { clauses } if clauses.is_empty() => String::from("1=1"),
            Predicate::And { clauses } => clauses
                .iter()
                .map(|c| match c {
                    Predicate::And { .. } => format!("({})", c.to_where_clause()),
                    _ => c.to_where_clause(),
                })
                .join(" AND "),
        }
    }

    /// evaluates the predicate against a row of string attributes. used to
    /// filter rows held in memory with the same rules the service applies.
    pub fn matches<'a, F>(&self, attribute: &F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        match self {
            Predicate::Eq { field, value } => attribute(field) == Some(value.as_str()),
            Predicate::In { field, values } => attribute(field)
                .map(|a| values.iter().any(|v| v == a))
                .unwrap_or_default(),
            Predicate::And { clauses } => clauses.iter().all(|c| c.matches(attribute)),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_where_clause())
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// builds the predicates issued against the O-D table and block group layer.
pub struct TripPredicateBuilder<'a> {
    fields: &'a FieldNames,
}

impl<'a> TripPredicateBuilder<'a> {
    pub fn new(fields: &'a FieldNames) -> Self {
        Self { fields }
    }

    /// the day restriction: every weekday code for "all days", otherwise the
    /// selected code.
    pub fn day(&self, day: &DaySelection) -> Predicate {
        Predicate::any_of(&self.fields.day_type, day.day_type_codes())
    }

    /// the time restriction, absent for "all times"
    pub fn time(&self, time_period: &TimeSelection) -> Option<Predicate> {
        time_period
            .day_part_code()
            .map(|code| Predicate::eq(&self.fields.day_part, code))
    }

    /// rows of the O-D table within a filter context, for any origin
    pub fn filter_context(&self, filter: &QueryFilter) -> Predicate {
        let clauses = std::iter::once(self.day(&filter.day))
            .chain(self.time(&filter.time_period))
            .collect_vec();
        Predicate::and(clauses)
    }

    /// rows of the O-D table leaving one origin within a filter context
    pub fn origin_trips(&self, origin: &BlockGroupId, filter: &QueryFilter) -> Predicate {
        let clauses = std::iter::once(Predicate::eq(&self.fields.origin, origin.as_str()))
            .chain(std::iter::once(self.day(&filter.day)))
            .chain(self.time(&filter.time_period))
            .collect_vec();
        Predicate::and(clauses)
    }

    /// block group features by id
    pub fn block_groups(&self, ids: &[BlockGroupId]) -> Predicate {
        Predicate::In {
            field: self.fields.geoid.clone(),
            values: ids.iter().map(|id| id.0.clone()).collect_vec(),
        }
    }

    /// fields requested for trip rows. the day part is only needed when rows
    /// from several time bins are summed together.
    pub fn trip_out_fields(&self, time_period: &TimeSelection) -> Vec<String> {
        let mut out_fields = vec![
            self.fields.destination.clone(),
            self.fields.trips.clone(),
            self.fields.day_type.clone(),
        ];
        if matches!(time_period, TimeSelection::AllTimes) {
            out_fields.push(self.fields.day_part.clone());
        }
        out_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::{DayOfWeek, DayPart, Mode};

    fn filter(day: DaySelection, time_period: TimeSelection) -> QueryFilter {
        QueryFilter {
            mode: Mode::Internal,
            day,
            time_period,
        }
    }

    #[test]
    fn test_all_days_all_times() {
        let fields = FieldNames::default();
        let builder = TripPredicateBuilder::new(&fields);
        let predicate = builder.origin_trips(
            &BlockGroupId::from("420594001001"),
            &filter(DaySelection::AllDays, TimeSelection::AllTimes),
        );
        let Predicate::And { clauses } = &predicate else {
            panic!("expected a conjunction, found {predicate:?}");
        };
        assert_eq!(clauses.len(), 2, "no time clause expected");
        match &clauses[1] {
            Predicate::In { field, values } => {
                assert_eq!(field, "Day_Type");
                assert_eq!(values.len(), 7);
            }
            other => panic!("expected IN clause, found {other:?}"),
        }
        assert_eq!(
            predicate.to_where_clause(),
            "Origin = '420594001001' AND Day_Type IN ('1: Monday (M-M)', '2: Tuesday (Tu-Tu)', \
             '3: Wednesday (W-W)', '4: Thursday (Th-Th)', '5: Friday (F-F)', \
             '6: Saturday (Sa-Sa)', '7: Sunday (Su-Su)')"
        );
    }

    #[test]
    fn test_single_day_single_time() {
        let fields = FieldNames::default();
        let builder = TripPredicateBuilder::new(&fields);
        let predicate = builder.origin_trips(
            &BlockGroupId::from("420594001001"),
            &filter(
                DaySelection::Day(DayOfWeek::Friday),
                TimeSelection::Part(DayPart::new(2).unwrap()),
            ),
        );
        assert_eq!(
            predicate.to_where_clause(),
            "Origin = '420594001001' AND Day_Type = '5: Friday (F-F)' AND Day_Part = '02: 7am (7am-8am)'"
        );
    }

    #[test]
    fn test_filter_context_has_no_origin() {
        let fields = FieldNames::default();
        let builder = TripPredicateBuilder::new(&fields);
        let predicate = builder.filter_context(&filter(
            DaySelection::Day(DayOfWeek::Monday),
            TimeSelection::AllTimes,
        ));
        assert_eq!(predicate.to_where_clause(), "Day_Type = '1: Monday (M-M)'");
    }

    #[test]
    fn test_quotes_are_escaped() {
        let predicate = Predicate::eq("Origin", "1' OR '1'='1");
        assert_eq!(
            predicate.to_where_clause(),
            "Origin = '1'' OR ''1''=''1'"
        );
    }

    #[test]
    fn test_empty_forms() {
        assert_eq!(Predicate::and(vec![]).to_where_clause(), "1=1");
        let fields = FieldNames::default();
        let builder = TripPredicateBuilder::new(&fields);
        assert_eq!(builder.block_groups(&[]).to_where_clause(), "1=0");
    }

    #[test]
    fn test_matches_in_memory_row() {
        let fields = FieldNames::default();
        let builder = TripPredicateBuilder::new(&fields);
        let predicate = builder.origin_trips(
            &BlockGroupId::from("A"),
            &filter(DaySelection::AllDays, TimeSelection::AllTimes),
        );
        let row = |field: &str| -> Option<&str> {
            match field {
                "Origin" => Some("A"),
                "Day_Type" => Some("6: Saturday (Sa-Sa)"),
                _ => None,
            }
        };
        assert!(predicate.matches(&row));
        let other_origin = |field: &str| -> Option<&str> {
            match field {
                "Origin" => Some("B"),
                "Day_Type" => Some("6: Saturday (Sa-Sa)"),
                _ => None,
            }
        };
        assert!(!predicate.matches(&other_origin));
    }

    #[test]
    fn test_out_fields_include_day_part_for_all_times() {
        let fields = FieldNames::default();
        let builder = TripPredicateBuilder::new(&fields);
        assert!(builder
            .trip_out_fields(&TimeSelection::AllTimes)
            .contains(&String::from("Day_Part")));
        assert!(!builder
            .trip_out_fields(&TimeSelection::Part(DayPart::new(1).unwrap()))
            .contains(&String::from("Day_Part")));
    }
}
