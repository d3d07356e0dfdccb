//! Nearest-neighbour sequencing of unordered stops.
//!
//! [`find_nearest`] performs one oracle query to select the closest
//! candidate. [`sequence`] drives it until every stop has been placed.

mod error;
mod nearest;
mod sequencer;

pub use error::SequenceError;
pub use nearest::{Nearest, find_nearest};
pub use sequencer::{RouteSequencer, sequence};
