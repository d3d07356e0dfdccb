//! Test helpers shared by the unit and behavioural CLI tests.

use super::*;
use nearstop_core::{DistanceOracle, StraightLineOracle};
use add::{AddConfig, GeocoderBuilder};
use nearstop_data::routing::test_support::{StubDirections, StubDistanceOracle, StubGeocoder};
use nearstop_data::routing::{DirectionsProvider, Geocoder};
use plan::{PlanConfig, RoutingBuilder};
use std::time::Duration;
use tempfile::TempDir;

/// A temporary state directory addressed as UTF-8.
pub(super) struct StateDir {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl StateDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("state")).expect("utf-8 tempdir");
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8PathBuf {
        &self.path
    }

    pub(super) fn store(&self) -> LocationStore {
        LocationStore::new(&self.path)
    }
}

/// Routing and geocoding builder returning stubs instead of HTTP clients.
///
/// Without a configured oracle it measures great-circle distances.
#[derive(Debug, Clone)]
pub(super) struct StubServices {
    pub(super) oracle: Option<StubDistanceOracle>,
    pub(super) directions: StubDirections,
    pub(super) geocoder: StubGeocoder,
}

impl Default for StubServices {
    fn default() -> Self {
        Self {
            oracle: None,
            directions: StubDirections::uniform(1_500.0, Duration::from_secs(300)),
            geocoder: StubGeocoder::default(),
        }
    }
}

impl RoutingBuilder for StubServices {
    fn oracle(&self, _config: &PlanConfig) -> Result<Box<dyn DistanceOracle>, CliError> {
        Ok(match &self.oracle {
            Some(oracle) => Box::new(oracle.clone()),
            None => Box::new(StraightLineOracle),
        })
    }

    fn directions(&self, _config: &PlanConfig) -> Result<Box<dyn DirectionsProvider>, CliError> {
        Ok(Box::new(self.directions.clone()))
    }
}

impl GeocoderBuilder for StubServices {
    fn geocoder(&self, _config: &AddConfig) -> Result<Box<dyn Geocoder>, CliError> {
        Ok(Box::new(self.geocoder.clone()))
    }
}

pub(super) fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(future)
}

/// Parse and run `argv`, capturing standard output.
pub(super) fn run_with_builder(
    argv: Vec<String>,
    builder: &StubServices,
    stdout: &mut Vec<u8>,
) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(argv)?;
    match cli.command {
        Command::Add(args) => block_on(add::run_add_with(args, builder, stdout)),
        Command::Clear(args) => clear::run_clear_with(args, stdout),
        Command::Plan(args) => block_on(plan::run_plan_with(args, builder, stdout)),
    }
}
