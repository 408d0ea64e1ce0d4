pub mod controller;
pub mod filter;
pub mod present;
pub mod render;
pub mod service;
pub mod trip;

mod block_group_id;
mod error;
mod field_names;
mod predicate;

pub use block_group_id::BlockGroupId;
pub use error::OdError;
pub use field_names::FieldNames;
pub use predicate::{Predicate, TripPredicateBuilder};
