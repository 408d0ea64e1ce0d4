mod app_config;
mod data_source;
mod error;
mod odmap_app;
mod offline;
mod selection_report;

pub use app_config::{MapConfig, OdmapConfig};
pub use data_source::DataSource;
pub use error::OdAppError;
pub use odmap_app::{OdmapApp, OdmapOperation, SourceArgs};
pub use offline::{read_block_groups, read_trip_table};
pub use selection_report::SelectionReport;
