//! Error types emitted by the nearstop CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use nearstop_core::{InvalidInputLocation, MeasurementError, SequenceError};
use nearstop_data::routing::{DirectionsError, ProviderBuildError};
use nearstop_data::store::LocationStoreError;
use thiserror::Error;

/// Errors emitted by the nearstop CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The location text is not a valid `lat,lng` pair or known address.
    #[error("invalid location {input:?}: {source}")]
    InvalidLocation {
        input: String,
        #[source]
        source: InvalidInputLocation,
    },
    /// The geocoding service failed while looking up an address.
    #[error("failed to geocode {input:?}: {source}")]
    Geocode {
        input: String,
        #[source]
        source: MeasurementError,
    },
    /// Reading or writing the stored locations failed.
    #[error(transparent)]
    Store(#[from] LocationStoreError),
    /// Constructing a routing adapter failed.
    #[error("failed to build {service} client: {source}")]
    BuildRoutingClient {
        service: &'static str,
        #[source]
        source: ProviderBuildError,
    },
    /// Sequencing the stored locations failed.
    #[error("failed to sequence stops: {0}")]
    Sequence(#[from] SequenceError),
    /// Fetching directions for the sequenced route failed.
    #[error("failed to fetch directions: {0}")]
    Directions(#[from] DirectionsError),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
