//! the state of the viewer and its transitions.
//!
//! all mutation goes through [`OdController`]. trip queries are started by
//! handing out a [`QueryTicket`]; the caller runs the query wherever it likes
//! and returns the ticket with the result, which is applied only if the ticket
//! is still current.
mod od_controller;
mod origin_selection;
mod query_ticket;

pub use od_controller::{OdController, Resolution, Toggle};
pub use origin_selection::OriginSelection;
pub use query_ticket::QueryTicket;
