//! the cooperative event loop tying the controller to its collaborators.
//!
//! ui events and the completions of in-flight queries are interleaved on a
//! single task; nothing here is shared across threads.
mod od_session;
mod session_output;
mod ui_event;

pub use od_session::Session;
pub use session_output::SessionOutput;
pub use ui_event::UiEvent;
