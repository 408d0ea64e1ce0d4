use crate::model::{
    controller::{OriginSelection, QueryTicket},
    filter::{DaySelection, FilterState, Mode, QueryFilter, TimeSelection},
    present::{SidePanel, Tooltip},
    render::{ClassBreakRenderer, HighlightPlan},
    service::HitFeature,
    trip::{self, AggregationSummary, CombinedTripMap, OriginTripMap, TripRow},
    BlockGroupId, FieldNames, OdError,
};

/// result of clicking a block group
#[derive(Debug, PartialEq, Eq)]
pub enum Toggle {
    /// the origin and its trips were removed
    Deselected(BlockGroupId),
    /// the origin was added; its trips arrive once the ticket's query resolves
    Selected(QueryTicket),
}

/// what happened to a trip query result handed back to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Applied {
        origin: BlockGroupId,
        summary: AggregationSummary,
    },
    /// the query failed; the origin stays selected and contributes no trips
    Failed {
        origin: BlockGroupId,
        message: String,
    },
    /// the origin was deselected, or the filters changed, while the query ran
    Stale { origin: BlockGroupId },
}

/// owns the filter state, the origin selection and the per-origin trips.
///
/// # Invariants
///   - every key of the trip map is a selected origin
///   - a trip query result is stored only while the selection it was started
///     for, and the filter context it ran under, are both still current
#[derive(Debug)]
pub struct OdController {
    filter: FilterState,
    selection: OriginSelection,
    trips: OriginTripMap,
    /// bumped on every filter-context reset
    epoch: u64,
    next_sequence: u64,
    origin_layer_id: String,
    fields: FieldNames,
}

impl OdController {
    /// `origin_layer_id` names the map layer whose features can be selected
    pub fn new(origin_layer_id: &str, fields: FieldNames) -> Self {
        Self {
            filter: FilterState::default(),
            selection: OriginSelection::new(),
            trips: OriginTripMap::new(),
            epoch: 0,
            next_sequence: 0,
            origin_layer_id: origin_layer_id.to_string(),
            fields,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn selection(&self) -> &OriginSelection {
        &self.selection
    }

    pub fn trips(&self) -> &OriginTripMap {
        &self.trips
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn origin_layer_id(&self) -> &str {
        &self.origin_layer_id
    }

    pub fn set_mode(&mut self, mode: Mode) {
        log::info!("selected mode: {mode}");
        self.filter.set_mode(mode);
        self.reset_selection();
    }

    /// any day change resets the selection. returns the filter context to
    /// count records for, if a day is set.
    pub fn set_day(&mut self, day: Option<DaySelection>) -> Option<QueryFilter> {
        match day {
            Some(d) => log::info!("selected day: {d}"),
            None => log::info!("no day selected, clearing selection"),
        }
        self.filter.set_day(day);
        self.reset_selection();
        self.filter.count_filter()
    }

    /// ignored, returning None, while no day is set. otherwise resets the
    /// selection and returns the filter context to count records for.
    pub fn set_time_period(&mut self, time_period: Option<TimeSelection>) -> Option<QueryFilter> {
        if !self.filter.set_time_period(time_period) {
            log::warn!("time period ignored until a day is selected");
            return None;
        }
        match time_period {
            Some(TimeSelection::AllTimes) => log::info!("selected time period: All Times"),
            Some(t) => log::info!("selected time period: {t}"),
            None => log::info!("time period cleared"),
        }
        self.reset_selection();
        self.filter.count_filter()
    }

    fn reset_selection(&mut self) {
        self.selection.clear();
        self.trips.clear();
        self.epoch += 1;
    }

    /// deselects a selected origin, or selects it and issues a ticket for its
    /// trip query. fails with a prompt while the filters are incomplete.
    pub fn toggle_origin(&mut self, origin: BlockGroupId) -> Result<Toggle, OdError> {
        let filter = self.filter.query_filter()?;
        if self.selection.remove(&origin) {
            self.trips.remove(&origin);
            log::debug!("deselected origin {origin}");
            return Ok(Toggle::Deselected(origin));
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.selection.insert(origin.clone(), sequence);
        log::debug!("selected origin {origin}");
        Ok(Toggle::Selected(QueryTicket {
            origin,
            sequence,
            epoch: self.epoch,
            filter,
        }))
    }

    /// handles a click given the hit test results, topmost first. the filters
    /// are checked before anything else. clicks that miss the origin layer
    /// return `Ok(None)`.
    pub fn click(&mut self, hits: &[HitFeature]) -> Result<Option<Toggle>, OdError> {
        self.filter.query_filter()?;
        let Some(hit) = self.origin_hit(hits) else {
            return Ok(None);
        };
        let origin = hit.block_group(&self.fields.geoid)?;
        self.toggle_origin(origin).map(Some)
    }

    /// tooltip for the topmost origin-layer feature, if any
    pub fn hover(&self, hits: &[HitFeature]) -> Option<Tooltip> {
        let hit = self.origin_hit(hits)?;
        match hit.block_group(&self.fields.geoid) {
            Ok(block_group) => Some(self.tooltip(&block_group)),
            Err(e) => {
                log::error!("{e}");
                None
            }
        }
    }

    fn origin_hit<'a>(&self, hits: &'a [HitFeature]) -> Option<&'a HitFeature> {
        hits.iter().find(|h| h.layer_id == self.origin_layer_id)
    }

    /// whether a result for this ticket would still be applied
    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.epoch == self.epoch && self.selection.sequence(&ticket.origin) == Some(ticket.sequence)
    }

    /// hands a query result back. rows are aggregated and stored only if the
    /// ticket is still current.
    pub fn resolve(
        &mut self,
        ticket: QueryTicket,
        result: Result<Vec<TripRow>, String>,
    ) -> Resolution {
        let QueryTicket { origin, .. } = &ticket;
        if !self.is_current(&ticket) {
            log::debug!("discarding stale trip query result for origin {origin}");
            return Resolution::Stale {
                origin: ticket.origin,
            };
        }
        match result {
            Ok(rows) => {
                if rows.is_empty() {
                    log::info!("no destinations found for origin {origin}");
                }
                let destinations = trip::aggregate(&rows);
                let summary = AggregationSummary::new(&rows, &destinations);
                log::info!("trip query for origin {origin}: {summary}");
                self.trips.insert(ticket.origin.clone(), destinations);
                Resolution::Applied {
                    origin: ticket.origin,
                    summary,
                }
            }
            Err(message) => {
                log::error!("error querying trips for origin {origin}: {message}");
                Resolution::Failed {
                    origin: ticket.origin,
                    message,
                }
            }
        }
    }

    pub fn combined(&self) -> CombinedTripMap {
        trip::combine(&self.trips)
    }

    pub fn side_panel(&self) -> Option<SidePanel> {
        SidePanel::build(&self.filter.mode(), self.selection.iter(), &self.trips)
    }

    pub fn tooltip(&self, block_group: &BlockGroupId) -> Tooltip {
        Tooltip::build(
            &self.filter.mode(),
            block_group,
            self.selection.iter(),
            &self.trips,
        )
    }

    pub fn highlight_plan(&self, renderer: &ClassBreakRenderer) -> HighlightPlan {
        HighlightPlan::build(&self.combined(), self.selection.iter(), renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        filter::{DayOfWeek, DayPart},
        present::TooltipLine,
        render::OverlayRole,
        service::{MemoryTripRecord, MemoryTripTable},
    };
    use serde_json::json;

    const LAYER: &str = "BlockGroups";

    fn controller() -> OdController {
        let mut c = OdController::new(LAYER, FieldNames::default());
        c.set_day(Some(DaySelection::AllDays));
        c.set_time_period(Some(TimeSelection::AllTimes));
        c
    }

    fn id(s: &str) -> BlockGroupId {
        BlockGroupId::from(s)
    }

    fn row(dest: &str, count: f64) -> TripRow {
        TripRow::new(id(dest), count, "1: Monday (M-M)", None)
    }

    fn select(c: &mut OdController, origin: &str) -> QueryTicket {
        match c.toggle_origin(id(origin)).unwrap() {
            Toggle::Selected(ticket) => ticket,
            other => panic!("expected selection, found {other:?}"),
        }
    }

    fn hit(geoid: &str) -> HitFeature {
        HitFeature::new(LAYER).with_attribute("GEOID", json!(geoid))
    }

    #[test]
    fn test_toggle_requires_filters() {
        let mut c = OdController::new(LAYER, FieldNames::default());
        assert_eq!(c.toggle_origin(id("o1")), Err(OdError::MissingDay));
        c.set_day(Some(DaySelection::Day(DayOfWeek::Monday)));
        assert_eq!(c.toggle_origin(id("o1")), Err(OdError::MissingTime));
        assert!(c.selection().is_empty());
    }

    #[test]
    fn test_select_then_resolve() {
        let mut c = controller();
        let ticket = select(&mut c, "o1");
        assert_eq!(ticket.filter().day, DaySelection::AllDays);
        let rows = vec![row("A", 3.0), row("B", 2.0), row("A", 4.0)];
        let resolution = c.resolve(ticket, Ok(rows));
        assert!(matches!(resolution, Resolution::Applied { .. }));
        assert_eq!(c.combined().get(&id("A")), Some(&7.0));
        assert_eq!(c.combined().get(&id("B")), Some(&2.0));
    }

    #[test]
    fn test_select_deselect_restores_state() {
        let mut c = controller();
        let first = select(&mut c, "o1");
        c.resolve(first, Ok(vec![row("A", 1.0)]));
        let selection_before = c.selection().clone();
        let trips_before = c.trips().clone();

        let ticket = select(&mut c, "o2");
        c.resolve(ticket, Ok(vec![row("A", 5.0), row("C", 2.0)]));
        let toggle = c.toggle_origin(id("o2")).unwrap();
        assert_eq!(toggle, Toggle::Deselected(id("o2")));

        assert_eq!(c.selection(), &selection_before);
        assert_eq!(c.trips(), &trips_before);
    }

    #[test]
    fn test_deselect_before_resolution_discards_rows() {
        let mut c = controller();
        let ticket = select(&mut c, "o1");
        c.toggle_origin(id("o1")).unwrap();
        let resolution = c.resolve(ticket, Ok(vec![row("A", 3.0)]));
        assert_eq!(resolution, Resolution::Stale { origin: id("o1") });
        assert!(!c.trips().contains(&id("o1")));
        assert!(c.combined().is_empty());
    }

    #[test]
    fn test_reselect_makes_first_ticket_stale() {
        let mut c = controller();
        let first = select(&mut c, "o1");
        c.toggle_origin(id("o1")).unwrap();
        let second = select(&mut c, "o1");

        let stale = c.resolve(first, Ok(vec![row("A", 100.0)]));
        assert_eq!(stale, Resolution::Stale { origin: id("o1") });
        let applied = c.resolve(second, Ok(vec![row("A", 1.0)]));
        assert!(matches!(applied, Resolution::Applied { .. }));
        assert_eq!(c.combined().get(&id("A")), Some(&1.0));
    }

    #[test]
    fn test_results_apply_in_any_order() {
        let mut c = controller();
        let t1 = select(&mut c, "o1");
        let t2 = select(&mut c, "o2");
        c.resolve(t2, Ok(vec![row("A", 1.0), row("C", 5.0)]));
        c.resolve(t1, Ok(vec![row("A", 7.0), row("B", 2.0)]));
        let combined = c.combined();
        assert_eq!(combined.len(), 3);
        assert_eq!(combined[&id("A")], 8.0);
        assert_eq!(combined[&id("B")], 2.0);
        assert_eq!(combined[&id("C")], 5.0);
    }

    #[test]
    fn test_filter_change_invalidates_pending_queries() {
        let mut c = controller();
        let ticket = select(&mut c, "o1");
        c.set_time_period(Some(TimeSelection::Part(DayPart::new(4).unwrap())));
        assert!(c.selection().is_empty());
        assert!(!c.is_current(&ticket));
        assert_eq!(
            c.resolve(ticket, Ok(vec![row("A", 1.0)])),
            Resolution::Stale { origin: id("o1") }
        );
    }

    #[test]
    fn test_set_mode_resets_everything() {
        let mut c = controller();
        let ticket = select(&mut c, "o1");
        c.resolve(ticket, Ok(vec![row("A", 1.0)]));
        c.set_mode(Mode::Internal);
        assert_eq!(c.filter(), &FilterState::new(Mode::Internal));
        assert!(c.selection().is_empty());
        assert!(c.trips().is_empty());
    }

    #[test]
    fn test_failed_query_contributes_nothing() {
        let mut c = controller();
        let ticket = select(&mut c, "o1");
        let resolution = c.resolve(ticket, Err(String::from("service unavailable")));
        assert!(matches!(resolution, Resolution::Failed { .. }));
        assert!(c.selection().contains(&id("o1")));
        assert_eq!(c.trips().outbound_total(&id("o1")), 0.0);
        let panel = c.side_panel().unwrap();
        assert_eq!(panel.entries[0].outbound_trips, 0.0);
    }

    #[test]
    fn test_time_without_day_is_ignored() {
        let mut c = OdController::new(LAYER, FieldNames::default());
        let epoch = c.epoch();
        assert_eq!(c.set_time_period(Some(TimeSelection::AllTimes)), None);
        assert_eq!(c.epoch(), epoch);
        assert_eq!(c.filter().time_period(), None);
    }

    #[test]
    fn test_click_prompts_before_hit_test() {
        let mut c = OdController::new(LAYER, FieldNames::default());
        assert_eq!(c.click(&[hit("o1")]), Err(OdError::MissingDay));
    }

    #[test]
    fn test_click_other_layer_is_noop() {
        let mut c = controller();
        let other = HitFeature::new("Basemap").with_attribute("GEOID", json!("o1"));
        assert_eq!(c.click(&[other]), Ok(None));
        assert!(c.selection().is_empty());
    }

    #[test]
    fn test_click_missing_geoid_is_error() {
        let mut c = controller();
        let result = c.click(&[HitFeature::new(LAYER)]);
        assert!(matches!(result, Err(OdError::MissingAttribute { .. })));
        assert!(c.selection().is_empty());
    }

    #[test]
    fn test_click_toggles_topmost_origin_feature() {
        let mut c = controller();
        let hits = [HitFeature::new("Graphics"), hit("o1"), hit("o2")];
        let toggle = c.click(&hits).unwrap();
        assert!(matches!(toggle, Some(Toggle::Selected(t)) if t.origin() == &id("o1")));
        let toggle = c.click(&hits).unwrap();
        assert_eq!(toggle, Some(Toggle::Deselected(id("o1"))));
    }

    #[test]
    fn test_hover_tooltips() {
        let mut c = controller();
        assert_eq!(
            c.hover(&[hit("A")]).map(|t| t.lines),
            Some(vec![TooltipLine::SelectPrompt])
        );
        let ticket = select(&mut c, "o1");
        c.resolve(ticket, Ok(vec![row("A", 4.0)]));
        assert_eq!(
            c.hover(&[hit("A")]).map(|t| t.lines),
            Some(vec![TooltipLine::Inbound {
                mode: Mode::Internal,
                trips: 4.0
            }])
        );
        assert_eq!(c.hover(&[HitFeature::new("Graphics")]), None);
    }

    #[test]
    fn test_highlight_plan_outlines_selected_origins() {
        let mut c = controller();
        let ticket = select(&mut c, "o1");
        c.resolve(ticket, Ok(vec![row("A", 5.0), row("B", 0.0)]));
        let plan = c.highlight_plan(&ClassBreakRenderer::default());
        let roles = plan.overlays.iter().map(|o| o.role).collect::<Vec<_>>();
        assert_eq!(
            roles,
            vec![OverlayRole::Destination { trips: 5.0 }, OverlayRole::Origin]
        );
    }

    #[tokio::test]
    async fn test_ticket_execute_against_memory_table() {
        let table = MemoryTripTable::new(
            FieldNames::default(),
            vec![
                MemoryTripRecord {
                    origin: id("o1"),
                    destination: id("A"),
                    trips: 3.0,
                    day_type: DayOfWeek::Monday.code().to_string(),
                    day_part: None,
                },
                MemoryTripRecord {
                    origin: id("o1"),
                    destination: id("A"),
                    trips: 4.0,
                    day_type: DayOfWeek::Sunday.code().to_string(),
                    day_part: None,
                },
            ],
        );
        let mut c = controller();
        let ticket = select(&mut c, "o1");
        let (ticket, result) = ticket.execute(&table).await;
        c.resolve(ticket, result);
        assert_eq!(c.trips().outbound_total(&id("o1")), 7.0);
    }
}
