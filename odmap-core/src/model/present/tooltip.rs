use serde::{Deserialize, Serialize};

use crate::model::{filter::Mode, trip::OriginTripMap, BlockGroupId};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TooltipLine {
    SelectedOrigin,
    Inbound { mode: Mode, trips: f64 },
    Outbound { mode: Mode, trips: f64 },
    NoTrips,
    SelectPrompt,
}

impl std::fmt::Display for TooltipLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TooltipLine::SelectedOrigin => write!(f, "Selected Origin"),
            TooltipLine::Inbound { mode, trips } => {
                write!(f, "Inbound {} Trips: {trips}", mode.trip_type())
            }
            TooltipLine::Outbound { mode, trips } => {
                write!(f, "Total Outbound {} Trips: {trips}", mode.trip_type())
            }
            TooltipLine::NoTrips => write!(f, "No trips to this area"),
            TooltipLine::SelectPrompt => write!(f, "Click to select as origin"),
        }
    }
}

/// hover text for a block group
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub block_group: BlockGroupId,
    pub lines: Vec<TooltipLine>,
}

impl Tooltip {
    /// # Cases
    ///   - hovered block group is a selected origin: trips arriving from any
    ///     selected origin and trips leaving it, each only when nonzero
    ///   - another block group while something is selected: its inbound total,
    ///     or a no-trips note
    ///   - nothing selected: a prompt to select
    pub fn build<'a, I>(
        mode: &Mode,
        hovered: &BlockGroupId,
        selected: I,
        trips: &OriginTripMap,
    ) -> Tooltip
    where
        I: IntoIterator<Item = &'a BlockGroupId>,
    {
        let mut selected = selected.into_iter().peekable();
        let any_selected = selected.peek().is_some();
        let hovered_selected = selected.any(|s| s == hovered);
        let inbound = trips.inbound_total(hovered);

        let lines = if hovered_selected {
            let outbound = trips.outbound_total(hovered);
            let mut lines = vec![TooltipLine::SelectedOrigin];
            if inbound > 0.0 {
                lines.push(TooltipLine::Inbound {
                    mode: *mode,
                    trips: inbound,
                });
            }
            if outbound > 0.0 {
                lines.push(TooltipLine::Outbound {
                    mode: *mode,
                    trips: outbound,
                });
            }
            lines
        } else if any_selected {
            if inbound > 0.0 {
                vec![TooltipLine::Inbound {
                    mode: *mode,
                    trips: inbound,
                }]
            } else {
                vec![TooltipLine::NoTrips]
            }
        } else {
            vec![TooltipLine::SelectPrompt]
        };

        Tooltip {
            block_group: hovered.clone(),
            lines,
        }
    }
}

impl std::fmt::Display for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Block Group: {}", self.block_group)?;
        for line in self.lines.iter() {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::trip::DestinationTrips;

    fn trips() -> OriginTripMap {
        let o1: DestinationTrips = [(BlockGroupId::from("A"), 7.0), (BlockGroupId::from("o2"), 2.0)]
            .into_iter()
            .collect();
        let o2: DestinationTrips = [(BlockGroupId::from("A"), 1.0)].into_iter().collect();
        [(BlockGroupId::from("o1"), o1), (BlockGroupId::from("o2"), o2)]
            .into_iter()
            .collect()
    }

    fn selected() -> Vec<BlockGroupId> {
        vec![BlockGroupId::from("o1"), BlockGroupId::from("o2")]
    }

    #[test]
    fn test_selected_origin_shows_inbound_and_outbound() {
        let tooltip = Tooltip::build(
            &Mode::Internal,
            &BlockGroupId::from("o2"),
            selected().iter(),
            &trips(),
        );
        assert_eq!(
            tooltip.to_string(),
            "Block Group: o2\nSelected Origin\nInbound Internal Trips: 2\nTotal Outbound Internal Trips: 1"
        );
    }

    #[test]
    fn test_selected_origin_omits_zero_totals() {
        let tooltip = Tooltip::build(
            &Mode::Internal,
            &BlockGroupId::from("o1"),
            selected().iter(),
            &trips(),
        );
        assert_eq!(
            tooltip.lines,
            vec![
                TooltipLine::SelectedOrigin,
                TooltipLine::Outbound {
                    mode: Mode::Internal,
                    trips: 9.0
                }
            ]
        );
    }

    #[test]
    fn test_destination_inbound() {
        let tooltip = Tooltip::build(
            &Mode::Internal,
            &BlockGroupId::from("A"),
            selected().iter(),
            &trips(),
        );
        assert_eq!(
            tooltip.lines,
            vec![TooltipLine::Inbound {
                mode: Mode::Internal,
                trips: 8.0
            }]
        );
    }

    #[test]
    fn test_destination_without_trips() {
        let tooltip = Tooltip::build(
            &Mode::Internal,
            &BlockGroupId::from("Z"),
            selected().iter(),
            &trips(),
        );
        assert_eq!(tooltip.lines, vec![TooltipLine::NoTrips]);
        assert!(tooltip.to_string().ends_with("No trips to this area"));
    }

    #[test]
    fn test_fractional_inbound_is_shown() {
        let o1: DestinationTrips = [(BlockGroupId::from("A"), 0.4)].into_iter().collect();
        let trips: OriginTripMap = [(BlockGroupId::from("o1"), o1)].into_iter().collect();
        let selected = [BlockGroupId::from("o1")];
        let tooltip = Tooltip::build(
            &Mode::Internal,
            &BlockGroupId::from("A"),
            selected.iter(),
            &trips,
        );
        assert_eq!(tooltip.to_string(), "Block Group: A\nInbound Internal Trips: 0.4");
    }

    #[test]
    fn test_prompt_without_selection() {
        let tooltip = Tooltip::build(
            &Mode::Internal,
            &BlockGroupId::from("A"),
            [],
            &OriginTripMap::new(),
        );
        assert_eq!(
            tooltip.to_string(),
            "Block Group: A\nClick to select as origin"
        );
    }
}
