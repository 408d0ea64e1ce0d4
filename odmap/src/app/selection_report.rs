use indexmap::IndexMap;
use itertools::Itertools;
use odmap_core::model::{
    controller::OdController, filter::QueryFilter, render::ClassBreakRenderer, BlockGroupId,
};
use serde::{Deserialize, Serialize};

/// the outcome of a selection, written by `odmap select --json`. origins are
/// listed by id and destinations by descending trip count.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelectionReport {
    pub filter: Option<QueryFilter>,
    pub origins: IndexMap<BlockGroupId, f64>,
    pub destinations: IndexMap<BlockGroupId, DestinationEntry>,
    pub total_trips: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DestinationEntry {
    pub trips: f64,
    /// legend label of the class the destination is drawn with
    pub class: Option<String>,
}

impl SelectionReport {
    pub fn new(controller: &OdController, renderer: &ClassBreakRenderer) -> SelectionReport {
        let trips = controller.trips();
        let origins = controller
            .selection()
            .iter()
            .sorted()
            .map(|origin| (origin.clone(), trips.outbound_total(origin)))
            .collect::<IndexMap<_, _>>();
        let destinations = controller
            .combined()
            .into_iter()
            .filter(|(_, trips)| *trips > 0.0)
            .sorted_by(|(a_id, a), (b_id, b)| b.total_cmp(a).then_with(|| a_id.cmp(b_id)))
            .map(|(id, trips)| {
                let class = renderer.class_for(trips).map(|c| c.label.clone());
                (id, DestinationEntry { trips, class })
            })
            .collect::<IndexMap<_, _>>();
        let total_trips = destinations.values().map(|d| d.trips).sum();
        SelectionReport {
            filter: controller.filter().query_filter().ok(),
            origins,
            destinations,
            total_trips,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use odmap_core::model::{
        controller::Toggle,
        filter::{DaySelection, TimeSelection},
        trip::TripRow,
        FieldNames,
    };

    fn row(dest: &str, trips: f64) -> TripRow {
        TripRow::new(BlockGroupId::from(dest), trips, "1: Monday (M-M)", None)
    }

    #[test]
    fn test_report_ordering() {
        let mut controller = OdController::new("BlockGroups", FieldNames::default());
        controller.set_day(Some(DaySelection::AllDays));
        controller.set_time_period(Some(TimeSelection::AllTimes));
        for (origin, rows) in [
            ("o2", vec![row("A", 1.0), row("C", 5.0)]),
            ("o1", vec![row("A", 7.0), row("B", 2.0), row("D", 0.0)]),
        ] {
            match controller.toggle_origin(BlockGroupId::from(origin)).unwrap() {
                Toggle::Selected(ticket) => {
                    controller.resolve(ticket, Ok(rows));
                }
                Toggle::Deselected(_) => panic!("expected selection"),
            }
        }

        let report = SelectionReport::new(&controller, &ClassBreakRenderer::default());
        let origins = report.origins.iter().map(|(k, v)| (k.as_str(), *v)).collect_vec();
        assert_eq!(origins, vec![("o1", 9.0), ("o2", 6.0)]);
        let destinations = report
            .destinations
            .iter()
            .map(|(k, v)| (k.as_str(), v.trips))
            .collect_vec();
        assert_eq!(destinations, vec![("A", 8.0), ("C", 5.0), ("B", 2.0)]);
        assert_eq!(report.destinations[0].class.as_deref(), Some("6-15 trips"));
        assert_eq!(report.total_trips, 15.0);
    }
}
