mod day;
mod filter_state;
mod mode;
mod time_period;

pub use day::{DayOfWeek, DaySelection};
pub use filter_state::{FilterState, QueryFilter};
pub use mode::Mode;
pub use time_period::{DayPart, TimeSelection};
