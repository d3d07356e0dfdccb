//! Measure travel costs from one origin to many candidates.
//!
//! The [`DistanceOracle`] trait abstracts how distances are obtained: a
//! routing API, straight-line geometry or a precomputed table. The sequencer
//! depends only on the trait and compares values within a single result.

mod error;
mod oracle;
mod straight_line;

pub use error::MeasurementError;
pub use oracle::{
    DistanceOracle, DistanceQuery, Distances, ParseTravelModeError, TravelMode,
};
pub use straight_line::StraightLineOracle;
