//! `add` command: validate or geocode a location and append it to the
//! pending list.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use nearstop_core::{Coordinate, InvalidInputLocation, Stop};
use nearstop_data::routing::{GeocodeError, Geocoder, GoogleGeocoder};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_GOOGLE_API_KEY, ARG_LABEL, ARG_LOCATION, ARG_STATE_DIR, ARG_STORAGE_KEY, CliError,
    ENV_ADD_GOOGLE_API_KEY, ENV_ADD_LOCATION, StoreConfig, write_line,
};

/// CLI arguments for the `add` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "add",
    about = "Append a location to the pending list",
    long_about = "Validate a \"lat,lng\" pair, or geocode an address, and \
                  append it to the pending list. Latitude must lie in \
                  [-90, 90] and longitude in [-180, 180]. Text that is not a \
                  coordinate pair is looked up with the Google Geocoding API. \
                  Invalid or unknown locations leave the list untouched."
)]
#[ortho_config(prefix = "NEARSTOP")]
pub(crate) struct AddArgs {
    /// Location as "lat,lng", e.g. "51.5074,-0.1278", or an address.
    #[arg(value_name = "location", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Short name shown instead of the coordinates.
    #[arg(long = ARG_LABEL, value_name = "text")]
    #[serde(default)]
    pub(crate) label: Option<String>,
    /// API key for the Google Geocoding API, needed for addresses.
    #[arg(long = ARG_GOOGLE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) google_api_key: Option<String>,
    /// Directory holding the pending list.
    #[arg(long = ARG_STATE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) state_dir: Option<Utf8PathBuf>,
    /// Name of the pending list within the state directory.
    #[arg(long = ARG_STORAGE_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) storage_key: Option<String>,
}

impl AddArgs {
    pub(crate) fn into_config(self) -> Result<AddConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AddConfig::try_from(merged)
    }
}

/// What the user typed, once classified.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LocationInput {
    /// A valid `lat,lng` pair.
    Coordinates(Coordinate),
    /// Free text to geocode.
    Address(String),
}

impl LocationInput {
    /// Coordinate pairs win; only text that is not a pair at all becomes an
    /// address. Out-of-range pairs stay errors.
    fn classify(input: &str) -> Result<Self, InvalidInputLocation> {
        match Coordinate::parse(input) {
            Ok(coordinate) => Ok(Self::Coordinates(coordinate)),
            Err(InvalidInputLocation::Malformed { .. }) if !input.trim().is_empty() => {
                Ok(Self::Address(input.trim().to_owned()))
            }
            Err(err) => Err(err),
        }
    }
}

/// Resolved `add` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AddConfig {
    pub(crate) input: String,
    pub(crate) location: LocationInput,
    pub(crate) label: Option<String>,
    pub(crate) google_api_key: Option<String>,
    pub(crate) store: StoreConfig,
}

impl AddConfig {
    fn google_api_key(&self) -> Result<&str, CliError> {
        self.google_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_GOOGLE_API_KEY,
                env: ENV_ADD_GOOGLE_API_KEY,
            })
    }
}

impl TryFrom<AddArgs> for AddConfig {
    type Error = CliError;

    fn try_from(args: AddArgs) -> Result<Self, Self::Error> {
        let input = args.location.ok_or(CliError::MissingArgument {
            field: ARG_LOCATION,
            env: ENV_ADD_LOCATION,
        })?;
        let location = match LocationInput::classify(&input) {
            Ok(location) => location,
            Err(source) => return Err(CliError::InvalidLocation { input, source }),
        };
        let config = Self {
            input,
            location,
            label: args.label,
            google_api_key: args.google_api_key,
            store: StoreConfig::resolve(args.state_dir, args.storage_key),
        };
        if matches!(config.location, LocationInput::Address(_)) {
            config.google_api_key()?;
        }
        Ok(config)
    }
}

/// Builds the geocoder for one `add` invocation.
pub(crate) trait GeocoderBuilder {
    fn geocoder(&self, config: &AddConfig) -> Result<Box<dyn Geocoder>, CliError>;
}

pub(crate) struct DefaultGeocoderBuilder;

impl GeocoderBuilder for DefaultGeocoderBuilder {
    fn geocoder(&self, config: &AddConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let geocoder = GoogleGeocoder::new(config.google_api_key()?).map_err(|source| {
            CliError::BuildRoutingClient {
                service: "Google Geocoding",
                source,
            }
        })?;
        Ok(Box::new(geocoder))
    }
}

async fn resolve_stop(
    config: &AddConfig,
    builder: &dyn GeocoderBuilder,
) -> Result<Stop, CliError> {
    let stop = match &config.location {
        LocationInput::Coordinates(coordinate) => Stop::new(*coordinate),
        LocationInput::Address(address) => builder
            .geocoder(config)?
            .geocode(address)
            .await
            .map_err(|err| match err {
                GeocodeError::Unresolved(source) => CliError::InvalidLocation {
                    input: config.input.clone(),
                    source,
                },
                GeocodeError::Request(source) => CliError::Geocode {
                    input: config.input.clone(),
                    source,
                },
            })?,
    };
    Ok(match &config.label {
        Some(label) => stop.with_label(label.clone()),
        None => stop,
    })
}

pub(crate) async fn run_add(args: AddArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_add_with(args, &DefaultGeocoderBuilder, writer).await
}

pub(crate) async fn run_add_with(
    args: AddArgs,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = config.store.open()?;
    let stop = resolve_stop(&config, builder).await?;
    let name = stop.display_name();
    let stops = store.append(stop)?;
    log::info!("stored {} locations in {}", stops.len(), store.path());
    write_line(
        writer,
        &format!("Added {name} ({} pending)", stops.len()),
    )
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<AddConfig, CliError> {
    let merged = AddArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AddConfig::try_from(merged)
}
