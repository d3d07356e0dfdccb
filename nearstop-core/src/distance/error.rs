use thiserror::Error;

/// Errors from [`crate::distance::DistanceOracle::measure`].
///
/// Any of these aborts the sequencing run that issued the query. Callers may
/// retry by sequencing again from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasurementError {
    /// No candidate destinations were provided.
    ///
    /// The oracle requires at least one candidate. The sequencer never issues
    /// such a query.
    #[error("at least one candidate destination is required")]
    EmptyInput,
    /// The distance service could not be reached.
    #[error("request to {url} failed: {message}")]
    NetworkError {
        /// Request URL, with credentials removed.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The distance service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL, with credentials removed.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The distance service answered with a non-success HTTP status.
    #[error("request to {url} returned HTTP {status}: {message}")]
    HttpError {
        /// Request URL, with credentials removed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The distance service reported a failure status in its payload.
    #[error("distance service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `InvalidQuery` or `REQUEST_DENIED`.
        code: String,
        /// Service-provided message, possibly empty.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse distance response: {message}")]
    ParseError {
        /// Parser error description.
        message: String,
    },
}
