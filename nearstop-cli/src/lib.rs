//! Command-line interface for planning nearest-neighbour routes.
//!
//! The `nearstop` binary keeps a pending list of locations on disk:
//! `add` appends a coordinate pair or geocoded address, `clear` forgets them all, and `plan` orders them
//! with the greedy sequencer, stores the ordered list and prints it.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use nearstop_data::store::{DEFAULT_STORAGE_KEY, LocationStore};

mod add;
mod clear;
mod error;
mod plan;

pub use error::CliError;

use add::AddArgs;
use clear::ClearArgs;
use plan::PlanArgs;

pub(crate) const ARG_STATE_DIR: &str = "state-dir";
pub(crate) const ARG_STORAGE_KEY: &str = "storage-key";
pub(crate) const ARG_LOCATION: &str = "location";
pub(crate) const ARG_LABEL: &str = "label";
pub(crate) const ARG_ORACLE: &str = "oracle";
pub(crate) const ARG_MODE: &str = "mode";
pub(crate) const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
pub(crate) const ARG_GOOGLE_API_KEY: &str = "google-api-key";
pub(crate) const ARG_DIRECTIONS: &str = "directions";
pub(crate) const ENV_ADD_LOCATION: &str = "NEARSTOP_CMDS_ADD_LOCATION";
pub(crate) const ENV_ADD_GOOGLE_API_KEY: &str = "NEARSTOP_CMDS_ADD_GOOGLE_API_KEY";
pub(crate) const ENV_PLAN_GOOGLE_API_KEY: &str = "NEARSTOP_CMDS_PLAN_GOOGLE_API_KEY";

/// State directory used when none is configured.
pub const DEFAULT_STATE_DIR: &str = ".nearstop";

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(
    name = "nearstop",
    about = "Order a list of stops with a nearest-neighbour heuristic",
    version
)]
pub struct Cli {
    /// Log sequencing and HTTP activity at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Whether debug logging was requested.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate or geocode a location and append it to the pending list.
    Add(AddArgs),
    /// Forget every pending location.
    Clear(ClearArgs),
    /// Sequence the pending locations and print the route.
    Plan(PlanArgs),
}

/// Run a parsed command, writing its report to standard output.
///
/// # Errors
///
/// Returns [`CliError`] when configuration, geocoding, storage, routing or
/// output fails.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Add(args) => add::run_add(args, &mut stdout).await,
        Command::Clear(args) => clear::run_clear_with(args, &mut stdout),
        Command::Plan(args) => plan::run_plan(args, &mut stdout).await,
    }
}

/// Where the pending list lives, after configuration merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoreConfig {
    pub(crate) state_dir: Utf8PathBuf,
    pub(crate) storage_key: String,
}

impl StoreConfig {
    pub(crate) fn resolve(state_dir: Option<Utf8PathBuf>, storage_key: Option<String>) -> Self {
        Self {
            state_dir: state_dir.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STATE_DIR)),
            storage_key: storage_key.unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_owned()),
        }
    }

    pub(crate) fn open(&self) -> Result<LocationStore, CliError> {
        Ok(LocationStore::with_key(&self.state_dir, &self.storage_key)?)
    }
}

pub(crate) fn write_line(writer: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writeln!(writer, "{line}").map_err(CliError::WriteOutput)
}

#[cfg(test)]
mod tests;
