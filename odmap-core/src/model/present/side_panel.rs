use serde::{Deserialize, Serialize};

use crate::model::{filter::Mode, trip::OriginTripMap, BlockGroupId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SidePanelEntry {
    pub block_group: BlockGroupId,
    pub outbound_trips: f64,
}

/// summary of the selected origins. there is no panel while nothing is selected.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SidePanel {
    pub subtitle: String,
    pub entries: Vec<SidePanelEntry>,
}

impl SidePanel {
    pub const TITLE: &'static str = "Selected Block Groups";

    pub fn build<'a, I>(mode: &Mode, selected: I, trips: &OriginTripMap) -> Option<SidePanel>
    where
        I: IntoIterator<Item = &'a BlockGroupId>,
    {
        let mut entries = selected
            .into_iter()
            .map(|block_group| SidePanelEntry {
                block_group: block_group.clone(),
                outbound_trips: trips.outbound_total(block_group),
            })
            .collect::<Vec<_>>();
        if entries.is_empty() {
            return None;
        }
        entries.sort_by(|a, b| a.block_group.cmp(&b.block_group));
        Some(SidePanel {
            subtitle: mode.side_panel_title().to_string(),
            entries,
        })
    }
}

impl std::fmt::Display for SidePanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", Self::TITLE)?;
        writeln!(f, "{}", self.subtitle)?;
        for entry in self.entries.iter() {
            writeln!(f, "  Block Group: {}", entry.block_group)?;
            writeln!(f, "  Total Outbound Trips: {}", entry.outbound_trips)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::trip::DestinationTrips;

    #[test]
    fn test_hidden_without_selection() {
        let panel = SidePanel::build(&Mode::Internal, [], &OriginTripMap::new());
        assert_eq!(panel, None);
    }

    #[test]
    fn test_lists_outbound_totals_in_id_order() {
        let mut trips = OriginTripMap::new();
        let o1_trips: DestinationTrips =
            [(BlockGroupId::from("A"), 4.0), (BlockGroupId::from("B"), 6.0)]
                .into_iter()
                .collect();
        trips.insert(BlockGroupId::from("o1"), o1_trips);
        // o2 is selected but its query has not resolved
        let selected = [BlockGroupId::from("o2"), BlockGroupId::from("o1")];
        let panel = SidePanel::build(&Mode::Internal, selected.iter(), &trips)
            .expect("selection should produce a panel");
        assert_eq!(panel.subtitle, "Greene County Trips");
        assert_eq!(
            panel.entries,
            vec![
                SidePanelEntry {
                    block_group: BlockGroupId::from("o1"),
                    outbound_trips: 10.0
                },
                SidePanelEntry {
                    block_group: BlockGroupId::from("o2"),
                    outbound_trips: 0.0
                },
            ]
        );
        let text = panel.to_string();
        assert!(text.starts_with("Selected Block Groups\nGreene County Trips\n"));
        assert!(text.contains("Total Outbound Trips: 10"));
    }
}
