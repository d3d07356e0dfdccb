//! `plan` command: sequence the pending locations and print the route.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use nearstop_core::{
    DistanceOracle, Itinerary, Outcome, PlanningSession, RouteSequencer, StepsTable,
    StraightLineOracle, TravelMode,
};
use nearstop_data::routing::{
    DEFAULT_OSRM_BASE_URL, DirectionsProvider, GOOGLE_DISTANCE_MATRIX_URL, GoogleDistanceOracle,
    OsrmDirections, OsrmDistanceOracle, RoutingServiceConfig,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DIRECTIONS, ARG_GOOGLE_API_KEY, ARG_MODE, ARG_ORACLE, ARG_OSRM_BASE_URL, ARG_STATE_DIR,
    ARG_STORAGE_KEY, CliError, ENV_PLAN_GOOGLE_API_KEY, StoreConfig, write_line,
};

/// Which distance oracle measures candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum OracleKind {
    /// OSRM Table service.
    #[default]
    Osrm,
    /// Google Distance Matrix API.
    Google,
    /// Great-circle distance, no network access.
    StraightLine,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    about = "Sequence the pending locations",
    long_about = "Order the pending locations with a nearest-neighbour \
                  heuristic: the first entered location is the start and \
                  every later stop is the closest one not yet visited. The \
                  ordered list replaces the pending list."
)]
#[ortho_config(prefix = "NEARSTOP")]
pub(crate) struct PlanArgs {
    /// Distance oracle used to compare candidates.
    #[arg(long = ARG_ORACLE, value_enum, value_name = "oracle")]
    #[serde(default)]
    pub(crate) oracle: Option<OracleKind>,
    /// Travel mode: driving, walking or cycling.
    #[arg(long = ARG_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) mode: Option<TravelMode>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// API key for the Google Distance Matrix oracle.
    #[arg(long = ARG_GOOGLE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// Fetch per-leg directions from OSRM and print a steps table.
    #[arg(long = ARG_DIRECTIONS)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) directions: bool,
    /// Directory holding the pending list.
    #[arg(long = ARG_STATE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) state_dir: Option<Utf8PathBuf>,
    /// Name of the pending list within the state directory.
    #[arg(long = ARG_STORAGE_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) storage_key: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) oracle: OracleKind,
    pub(crate) mode: TravelMode,
    pub(crate) osrm_base_url: String,
    pub(crate) google_api_key: Option<String>,
    pub(crate) directions: bool,
    pub(crate) store: StoreConfig,
}

impl PlanConfig {
    fn google_api_key(&self) -> Result<&str, CliError> {
        self.google_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_GOOGLE_API_KEY,
                env: ENV_PLAN_GOOGLE_API_KEY,
            })
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let config = Self {
            oracle: args.oracle.unwrap_or_default(),
            mode: args.mode.unwrap_or_default(),
            osrm_base_url: args
                .osrm_base_url
                .unwrap_or_else(|| DEFAULT_OSRM_BASE_URL.to_owned()),
            google_api_key: args.google_api_key,
            directions: args.directions,
            store: StoreConfig::resolve(args.state_dir, args.storage_key),
        };
        if config.oracle == OracleKind::Google {
            config.google_api_key()?;
        }
        Ok(config)
    }
}

/// Builds the routing adapters for one `plan` invocation.
pub(crate) trait RoutingBuilder {
    fn oracle(&self, config: &PlanConfig) -> Result<Box<dyn DistanceOracle>, CliError>;
    fn directions(&self, config: &PlanConfig) -> Result<Box<dyn DirectionsProvider>, CliError>;
}

pub(crate) struct DefaultRoutingBuilder;

impl RoutingBuilder for DefaultRoutingBuilder {
    fn oracle(&self, config: &PlanConfig) -> Result<Box<dyn DistanceOracle>, CliError> {
        match config.oracle {
            OracleKind::Osrm => {
                let service = RoutingServiceConfig::new(config.osrm_base_url.clone())
                    .with_mode(config.mode);
                let oracle = OsrmDistanceOracle::with_config(service).map_err(|source| {
                    CliError::BuildRoutingClient {
                        service: "OSRM",
                        source,
                    }
                })?;
                Ok(Box::new(oracle))
            }
            OracleKind::Google => {
                let service =
                    RoutingServiceConfig::new(GOOGLE_DISTANCE_MATRIX_URL).with_mode(config.mode);
                let oracle = GoogleDistanceOracle::with_config(config.google_api_key()?, service)
                    .map_err(|source| CliError::BuildRoutingClient {
                        service: "Google Distance Matrix",
                        source,
                    })?;
                Ok(Box::new(oracle))
            }
            OracleKind::StraightLine => Ok(Box::new(StraightLineOracle)),
        }
    }

    fn directions(&self, config: &PlanConfig) -> Result<Box<dyn DirectionsProvider>, CliError> {
        let directions = OsrmDirections::new(config.osrm_base_url.clone()).map_err(|source| {
            CliError::BuildRoutingClient {
                service: "OSRM",
                source,
            }
        })?;
        Ok(Box::new(directions))
    }
}

pub(crate) async fn run_plan(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_plan_with(args, &DefaultRoutingBuilder, writer).await
}

pub(crate) async fn run_plan_with(
    args: PlanArgs,
    builder: &dyn RoutingBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = config.store.open()?;
    let stops = store.load()?;
    if stops.is_empty() {
        return write_line(writer, "No locations stored");
    }

    let mut session = PlanningSession::with_stops(config.mode, stops);
    let sequencer = RouteSequencer::new(builder.oracle(&config)?);
    log::info!(
        "sequencing {} locations with the {:?} oracle",
        session.pending().len(),
        config.oracle
    );
    let Some(Outcome::Accepted) = session.plan(&sequencer).await? else {
        return Ok(());
    };
    store.save(session.pending())?;

    let Some(itinerary) = session.itinerary() else {
        return Ok(());
    };
    write_itinerary(writer, itinerary)?;

    if config.directions {
        match itinerary.directions_request() {
            Some(request) => {
                let legs = builder.directions(&config)?.legs(&request).await?;
                write_line(writer, "")?;
                write!(writer, "{}", StepsTable::new(legs)).map_err(CliError::WriteOutput)?;
            }
            None => log::info!("a single stop has no directions"),
        }
    }
    Ok(())
}

fn write_itinerary(writer: &mut dyn Write, itinerary: &Itinerary) -> Result<(), CliError> {
    write_line(writer, &format!("Route ({}):", itinerary.mode()))?;
    for marker in itinerary.markers() {
        write_line(
            writer,
            &format!(
                "{:<5}  {}",
                marker.label.to_string(),
                marker.stop.display_name()
            ),
        )?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
