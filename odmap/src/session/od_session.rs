use std::rc::Rc;

use futures::{future::LocalBoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};
use odmap_core::model::{
    controller::{OdController, QueryTicket, Resolution, Toggle},
    filter::QueryFilter,
    render::{ClassBreakRenderer, HighlightPlan},
    service::{
        draw_plan, BlockGroupGeometry, DrawingSurface, GeometrySource, HitFeature,
        TripQueryAdapter,
    },
    trip::TripRow,
};
use tokio::sync::mpsc;

use super::{SessionOutput, UiEvent};

/// a finished piece of async work, waiting to be applied to the session
enum Completion {
    Trips {
        ticket: QueryTicket,
        result: Result<Vec<TripRow>, String>,
    },
    Count {
        filter: QueryFilter,
        epoch: u64,
        result: Result<u64, String>,
    },
    Geometries {
        generation: u64,
        plan: HighlightPlan,
        result: Result<Vec<BlockGroupGeometry>, String>,
    },
}

/// runs the viewer: applies ui events to the controller, starts trip,
/// record count and geometry queries, and draws each new highlight plan.
///
/// every state change that affects the map starts a new redraw generation.
/// a redraw whose geometries arrive after a newer generation has started is
/// dropped, so the surface always ends up showing the latest state.
pub struct Session<A, G, S> {
    controller: OdController,
    renderer: ClassBreakRenderer,
    adapter: Rc<A>,
    geometries: Rc<G>,
    surface: S,
    pending: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
    generation: u64,
    outputs: mpsc::UnboundedSender<SessionOutput>,
}

impl<A, G, S> Session<A, G, S>
where
    A: TripQueryAdapter + 'static,
    G: GeometrySource + 'static,
    S: DrawingSurface,
{
    /// one value may serve as both adapter and geometry source
    pub fn new(
        controller: OdController,
        renderer: ClassBreakRenderer,
        adapter: Rc<A>,
        geometries: Rc<G>,
        surface: S,
        outputs: mpsc::UnboundedSender<SessionOutput>,
    ) -> Self {
        Self {
            controller,
            renderer,
            adapter,
            geometries,
            surface,
            pending: FuturesUnordered::new(),
            generation: 0,
            outputs,
        }
    }

    pub fn controller(&self) -> &OdController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// number of queries and redraws not yet applied
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// processes events until the sender side closes, then waits for the
    /// remaining work.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<UiEvent>) -> Self {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                },
                Some(completion) = self.pending.next(), if !self.pending.is_empty() => {
                    self.complete(completion)
                }
            }
        }
        self.settle().await;
        self
    }

    /// applies one event. only [`UiEvent::Settle`] waits on in-flight work;
    /// every other event returns as soon as its queries are started.
    pub async fn handle_event(&mut self, event: UiEvent) {
        log::debug!("ui event: {event:?}");
        match event {
            UiEvent::SetMode { mode } => {
                self.controller.set_mode(mode);
                self.filter_reset(None);
            }
            UiEvent::SetDay { day } => {
                let count = self.controller.set_day(day);
                self.filter_reset(count);
            }
            UiEvent::SetTime { time } => {
                let epoch = self.controller.epoch();
                let count = self.controller.set_time_period(time);
                if self.controller.epoch() != epoch {
                    self.filter_reset(count);
                }
            }
            UiEvent::Click { hits } => self.click(&hits),
            UiEvent::Hover { hits } => match self.controller.hover(&hits) {
                Some(tooltip) => self.emit(SessionOutput::Tooltip { tooltip }),
                None => self.emit(SessionOutput::TooltipHidden),
            },
            UiEvent::Drag => self.emit(SessionOutput::TooltipHidden),
            UiEvent::Settle => self.settle().await,
        }
    }

    /// applies the next piece of finished work. false when nothing is in
    /// flight.
    pub async fn step(&mut self) -> bool {
        match self.pending.next().await {
            Some(completion) => {
                self.complete(completion);
                true
            }
            None => false,
        }
    }

    /// waits until no query or redraw is in flight, including work started
    /// while waiting.
    pub async fn settle(&mut self) {
        while self.step().await {}
        self.emit(SessionOutput::Settled);
    }

    fn click(&mut self, hits: &[HitFeature]) {
        match self.controller.click(hits) {
            Ok(Some(Toggle::Selected(ticket))) => self.start_trip_query(ticket),
            Ok(Some(Toggle::Deselected(_))) => self.refresh(),
            Ok(None) => {
                // a click off the origin layer closes the side panel, the
                // selection is kept
                log::debug!(
                    "click did not hit layer '{}'",
                    self.controller.origin_layer_id()
                );
                self.emit(SessionOutput::SidePanel { panel: None });
            }
            Err(e) if e.is_user_prompt() => self.emit(SessionOutput::Prompt {
                message: e.to_string(),
            }),
            Err(e) => log::error!("{e}"),
        }
    }

    /// day and time changes clear the selection and the map, then count the
    /// records of the new filter context
    fn filter_reset(&mut self, count: Option<QueryFilter>) {
        self.refresh();
        if let Some(filter) = count {
            self.start_record_count(filter);
        }
    }

    fn refresh(&mut self) {
        let panel = self.controller.side_panel();
        self.emit(SessionOutput::SidePanel { panel });
        self.redraw();
    }

    fn redraw(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let plan = self.controller.highlight_plan(&self.renderer);
        if plan.is_empty() {
            self.draw(generation, &plan, &[]);
            return;
        }
        let ids = plan.block_groups();
        let geometries = Rc::clone(&self.geometries);
        self.pending.push(
            async move {
                let result = geometries
                    .block_group_geometries(&ids)
                    .await
                    .map_err(|e| e.to_string());
                Completion::Geometries {
                    generation,
                    plan,
                    result,
                }
            }
            .boxed_local(),
        );
    }

    fn draw(&mut self, generation: u64, plan: &HighlightPlan, geometries: &[BlockGroupGeometry]) {
        let summary = draw_plan(&mut self.surface, plan, geometries);
        if summary.missing_geometry > 0 {
            log::warn!(
                "{} overlays skipped, block group geometry not found",
                summary.missing_geometry
            );
        }
        self.emit(SessionOutput::Redrawn {
            generation,
            summary,
        });
    }

    fn start_trip_query(&mut self, ticket: QueryTicket) {
        let adapter = Rc::clone(&self.adapter);
        self.pending.push(
            async move {
                let (ticket, result) = ticket.execute(adapter.as_ref()).await;
                Completion::Trips { ticket, result }
            }
            .boxed_local(),
        );
    }

    fn start_record_count(&mut self, filter: QueryFilter) {
        let adapter = Rc::clone(&self.adapter);
        let epoch = self.controller.epoch();
        self.pending.push(
            async move {
                let result = adapter
                    .count_records(&filter)
                    .await
                    .map_err(|e| e.to_string());
                Completion::Count {
                    filter,
                    epoch,
                    result,
                }
            }
            .boxed_local(),
        );
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Trips { ticket, result } => {
                match self.controller.resolve(ticket, result) {
                    Resolution::Applied { .. } => self.refresh(),
                    Resolution::Failed { origin, message } => {
                        self.emit(SessionOutput::QueryFailed { origin, message });
                        self.refresh();
                    }
                    Resolution::Stale { .. } => {}
                }
            }
            Completion::Count {
                filter,
                epoch,
                result,
            } => {
                if epoch != self.controller.epoch() {
                    log::debug!("dropping record count for superseded filters {filter}");
                    return;
                }
                match result {
                    Ok(count) => {
                        log::info!("{count} records match {filter}");
                        self.emit(SessionOutput::RecordCount { filter, count });
                    }
                    Err(e) => log::warn!("record count for {filter} failed: {e}"),
                }
            }
            Completion::Geometries {
                generation,
                plan,
                result,
            } => {
                if generation != self.generation {
                    log::debug!(
                        "dropping redraw #{generation}, superseded by #{}",
                        self.generation
                    );
                    return;
                }
                match result {
                    Ok(geometries) => self.draw(generation, &plan, &geometries),
                    Err(e) => log::error!("error querying block group geometries: {e}"),
                }
            }
        }
    }

    fn emit(&self, output: SessionOutput) {
        if self.outputs.send(output).is_err() {
            log::debug!("session output receiver closed");
        }
    }
}
