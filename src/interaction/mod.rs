//! Turning pointer input into body picks and selection effects.

pub mod picking;
pub mod selection;

pub use picking::{PickQuery, PickResult, Ray};
pub use selection::{Effect, Event, MarkerKind, Selection, SelectionState};
