use thiserror::Error;

use crate::MeasurementError;

/// Errors that abort a sequencing run.
///
/// A failed run never yields a partial route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The nearest-stop search was given no candidates.
    #[error("no candidate stops remain to choose from")]
    EmptyCandidateSet,
    /// Coordinate input was empty, so there is no origin.
    #[error("at least one location is required to start a route")]
    MissingOrigin,
    /// The distance oracle could not produce distances.
    #[error("distance measurement failed: {0}")]
    Measurement(#[from] MeasurementError),
    /// The distance oracle returned the wrong number of distances.
    #[error("distance oracle returned {actual} distances for {expected} candidates")]
    ResultLengthMismatch {
        /// Number of candidates queried.
        expected: usize,
        /// Number of distances returned.
        actual: usize,
    },
}
