use std::path::Path;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use odmap_core::model::{
    controller::OdController,
    filter::{DaySelection, Mode, QueryFilter, TimeSelection},
    render::ClassBreakRenderer,
    service::{HitFeature, TripQueryAdapter},
};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::{
    app::{read_block_groups, read_trip_table, DataSource, OdAppError, OdmapConfig, SelectionReport},
    session::{Session, SessionOutput, UiEvent},
    surface::GeoJsonSurface,
};

type OdSession = Session<DataSource, DataSource, GeoJsonSurface>;

/// Command line viewer for origin-destination trips between census block groups
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct OdmapApp {
    /// TOML configuration file, layered over the built-in defaults
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub op: OdmapOperation,
}

/// local exports to read instead of querying the feature service
#[derive(Debug, Clone, Default, Serialize, Deserialize, Args)]
pub struct SourceArgs {
    /// CSV export of the O-D table with the configured field names as headers
    #[arg(long, requires = "block_groups")]
    pub trip_table: Option<String>,

    /// GeoJSON FeatureCollection of the block group layer
    #[arg(long, requires = "trip_table")]
    pub block_groups: Option<String>,
}

impl SourceArgs {
    pub fn build(&self, config: &OdmapConfig) -> Result<DataSource, OdAppError> {
        match (&self.trip_table, &self.block_groups) {
            (Some(trip_table), Some(block_groups)) => Ok(DataSource::Offline {
                trips: read_trip_table(Path::new(trip_table), &config.fields)?,
                geometries: read_block_groups(Path::new(block_groups), &config.fields.geoid)?,
            }),
            (None, None) => {
                log::info!("using feature service at {}", config.service.base_url);
                let client = config.service.build(config.fields.clone())?;
                Ok(DataSource::FeatureService(client))
            }
            _ => Err(OdAppError::InvalidUserInput(String::from(
                "--trip-table and --block-groups must be given together",
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum OdmapOperation {
    /// select origin block groups under a day and time, then print the side
    /// panel of the selection
    Select {
        /// day code, weekday name or number, or "all"
        #[arg(short, long)]
        day: DaySelection,

        /// time period code, hour bin number, or "ALL"
        #[arg(short, long)]
        time: TimeSelection,

        /// origin block group ids, clicked in order
        #[arg(short, long, required = true, num_args = 1..)]
        origin: Vec<String>,

        /// write the highlight overlays as GeoJSON to this file
        #[arg(short = 'O', long)]
        output: Option<String>,

        /// print a JSON report of the selection instead of the side panel
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// replay a JSON array of ui events, printing what the viewer reports
    /// after each one
    Replay {
        /// file containing the events
        #[arg(short, long)]
        events: String,

        /// write the final highlight overlays as GeoJSON to this file
        #[arg(short = 'O', long)]
        output: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// print the class-break legend
    Legend,
    /// list the modes, days and time periods the filters accept
    Options,
    /// print the number of O-D records for a day and time
    Count {
        #[arg(short, long)]
        day: DaySelection,

        #[arg(short, long)]
        time: TimeSelection,

        #[command(flatten)]
        source: SourceArgs,
    },
}

impl OdmapOperation {
    pub fn run(&self, configuration_file: Option<&str>) -> Result<(), OdAppError> {
        match self {
            OdmapOperation::Legend => {
                print!("{}", legend(&ClassBreakRenderer::default(), &Mode::default()));
                Ok(())
            }
            OdmapOperation::Options => {
                print!("{}", filter_options());
                Ok(())
            }
            OdmapOperation::Select {
                day,
                time,
                origin,
                output,
                json,
                source,
            } => {
                let config = OdmapConfig::load(configuration_file)?;
                let mut events = vec![
                    UiEvent::SetDay { day: Some(*day) },
                    UiEvent::SetTime { time: Some(*time) },
                ];
                events.extend(origin.iter().map(|id| click_event(&config, id)));
                let (session, outputs) = run_session(&config, source.build(&config)?, events)?;
                for output in outputs.iter() {
                    match output {
                        SessionOutput::Prompt { .. } | SessionOutput::QueryFailed { .. } => {
                            eprintln!("{output}")
                        }
                        SessionOutput::RecordCount { .. } => log::info!("{output}"),
                        _ => {}
                    }
                }
                if *json {
                    let report = SelectionReport::new(session.controller(), &ClassBreakRenderer::default());
                    let report_json = serde_json::to_string_pretty(&report).map_err(|e| {
                        OdAppError::InvalidUserInput(format!("failed to serialize report: {e}"))
                    })?;
                    println!("{report_json}");
                } else {
                    match session.controller().side_panel() {
                        Some(panel) => print!("{panel}"),
                        None => println!("no origins selected"),
                    }
                }
                write_overlays(output.as_deref(), session.surface())
            }
            OdmapOperation::Replay {
                events,
                output,
                source,
            } => {
                let config = OdmapConfig::load(configuration_file)?;
                let events = read_events(Path::new(events))?;
                let surface = replay(&config, source.build(&config)?, events)?;
                write_overlays(output.as_deref(), &surface)
            }
            OdmapOperation::Count { day, time, source } => {
                let config = OdmapConfig::load(configuration_file)?;
                let data_source = source.build(&config)?;
                let filter = QueryFilter {
                    mode: Mode::default(),
                    day: *day,
                    time_period: *time,
                };
                let runtime = build_runtime()?;
                let count = runtime.block_on(data_source.count_records(&filter))?;
                println!("{count} records for {filter}");
                Ok(())
            }
        }
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime, OdAppError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            OdAppError::TokioError(format!("failure creating async rust tokio runtime: {e}"))
        })
}

fn new_session(
    config: &OdmapConfig,
    source: DataSource,
    outputs: mpsc::UnboundedSender<SessionOutput>,
) -> OdSession {
    let source = Rc::new(source);
    Session::new(
        OdController::new(&config.map.origin_layer_id, config.fields.clone()),
        ClassBreakRenderer::default(),
        Rc::clone(&source),
        source,
        GeoJsonSurface::new(),
        outputs,
    )
}

/// feeds every event through the session loop and waits for all queries
fn run_session(
    config: &OdmapConfig,
    source: DataSource,
    events: Vec<UiEvent>,
) -> Result<(OdSession, Vec<SessionOutput>), OdAppError> {
    let runtime = build_runtime()?;
    let (output_tx, mut output_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    for event in events {
        event_tx.send(event).map_err(|e| {
            OdAppError::TokioError(format!("failure queueing ui event: {e}"))
        })?;
    }
    drop(event_tx);
    let session = runtime.block_on(new_session(config, source, output_tx).run(event_rx));
    let mut outputs = vec![];
    while let Ok(output) = output_rx.try_recv() {
        outputs.push(output);
    }
    Ok((session, outputs))
}

/// applies events one at a time, printing the outputs of each. queries only
/// complete at `settle` events and after the last event.
fn replay(
    config: &OdmapConfig,
    source: DataSource,
    events: Vec<UiEvent>,
) -> Result<GeoJsonSurface, OdAppError> {
    let runtime = build_runtime()?;
    let (output_tx, mut output_rx) = mpsc::unbounded_channel();
    let mut session = new_session(config, source, output_tx);
    let mut print_outputs = || {
        while let Ok(output) = output_rx.try_recv() {
            println!("{output}");
        }
    };
    for (idx, event) in events.into_iter().enumerate() {
        println!("--- event {idx}: {}", event_name(&event));
        runtime.block_on(session.handle_event(event));
        print_outputs();
    }
    println!("--- end of events");
    runtime.block_on(session.settle());
    print_outputs();
    Ok(session.into_surface())
}

fn event_name(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::SetMode { .. } => "set_mode",
        UiEvent::SetDay { .. } => "set_day",
        UiEvent::SetTime { .. } => "set_time",
        UiEvent::Click { .. } => "click",
        UiEvent::Hover { .. } => "hover",
        UiEvent::Drag => "drag",
        UiEvent::Settle => "settle",
    }
}

fn click_event(config: &OdmapConfig, geoid: &str) -> UiEvent {
    let hit = HitFeature::new(&config.map.origin_layer_id)
        .with_attribute(&config.fields.geoid, serde_json::json!(geoid));
    UiEvent::Click { hits: vec![hit] }
}

fn read_events(path: &Path) -> Result<Vec<UiEvent>, OdAppError> {
    let contents = std::fs::read(path).map_err(|e| OdAppError::ReadError {
        path: path.to_owned(),
        message: e.to_string(),
    })?;
    serde_json::from_slice::<Vec<UiEvent>>(&contents).map_err(|e| OdAppError::ReadError {
        path: path.to_owned(),
        message: format!("expected a JSON array of ui events: {e}"),
    })
}

fn write_overlays(output: Option<&str>, surface: &GeoJsonSurface) -> Result<(), OdAppError> {
    let Some(output) = output else {
        return Ok(());
    };
    let path = Path::new(output);
    let contents = serde_json::to_string_pretty(&surface.feature_collection()).map_err(|e| {
        OdAppError::WriteError {
            path: path.to_owned(),
            message: e.to_string(),
        }
    })?;
    std::fs::write(path, contents).map_err(|e| OdAppError::WriteError {
        path: path.to_owned(),
        message: e.to_string(),
    })?;
    log::info!("wrote {} overlays to '{output}'", surface.len());
    Ok(())
}

fn legend(renderer: &ClassBreakRenderer, mode: &Mode) -> String {
    let rows = renderer
        .breaks()
        .iter()
        .map(|b| format!("  {}  {}\n", b.color, b.label))
        .join("");
    format!("{}\n{rows}", ClassBreakRenderer::legend_title(mode))
}

/// the selector contents of each filter as `code  label` lines
fn filter_options() -> String {
    let modes = Mode::ALL
        .iter()
        .map(|m| format!("  {}  {}\n", m.code(), m.selector_label()))
        .join("");
    let days = DaySelection::options()
        .iter()
        .map(|d| format!("  {}  {}\n", d.code(), d.label()))
        .join("");
    let times = TimeSelection::options()
        .iter()
        .map(|t| format!("  {}  {}\n", t.code(), t.label()))
        .join("");
    format!("Mode\n{modes}Day of Week\n{days}Time Period\n{times}")
}
