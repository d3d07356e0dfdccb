//! Address lookup backed by the Google Geocoding API.
//!
//! A lookup keeps the first result. `ZERO_RESULTS`, an empty result list or
//! any other non-`OK` status rejects the address text; transport and decode
//! failures surface as [`MeasurementError`]s.

use async_trait::async_trait;
use nearstop_core::{Coordinate, InvalidInputLocation, MeasurementError, Stop};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::provider::{JsonClient, ProviderBuildError, RoutingServiceConfig};

/// Public Geocoding endpoint.
pub const GOOGLE_GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Errors raised while resolving address text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// The geocoding service could not be reached or answered garbage.
    #[error(transparent)]
    Request(#[from] MeasurementError),
    /// The service answered but the text names no usable location.
    #[error(transparent)]
    Unresolved(#[from] InvalidInputLocation),
}

/// Resolves free-form address text to a stop.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up `address` and return a stop carrying the service's formatted
    /// address.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Unresolved`] when nothing matches and
    /// [`GeocodeError::Request`] when the service fails.
    async fn geocode(&self, address: &str) -> Result<Stop, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Geocoder using the Google Geocoding API.
#[derive(Clone)]
pub struct GoogleGeocoder {
    http: JsonClient,
    base: Url,
    api_key: String,
    config: RoutingServiceConfig,
}

impl std::fmt::Debug for GoogleGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("http", &self.http)
            .field("base", &self.base.as_str())
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl GoogleGeocoder {
    /// Create a geocoder for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is empty or the HTTP client fails to
    /// build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(api_key, RoutingServiceConfig::new(GOOGLE_GEOCODING_URL))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// `config.base_url` is the full Geocoding endpoint; the travel mode and
    /// metric are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is empty, the base URL is invalid or
    /// the HTTP client fails to build.
    pub fn with_config(
        api_key: impl Into<String>,
        config: RoutingServiceConfig,
    ) -> Result<Self, ProviderBuildError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderBuildError::MissingApiKey {
                service: "Google Geocoding",
            });
        }
        let base = config.parsed_base_url()?;
        let http = JsonClient::new(&config)?;
        Ok(Self {
            http,
            base,
            api_key,
            config,
        })
    }

    fn geocode_url(&self, address: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }
}

/// Keep the first result of a Geocoding response for `address`.
fn convert_response(address: &str, response: GeocodeResponse) -> Result<Stop, GeocodeError> {
    let unresolved = |status: String| InvalidInputLocation::Unresolved {
        input: address.to_owned(),
        status,
    };
    if response.status != "OK" {
        return Err(unresolved(response.status).into());
    }
    let first = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| unresolved("ZERO_RESULTS".to_owned()))?;
    let location = first.geometry.location;
    let coordinate = Coordinate::validated(location.lat, location.lng)?;
    Ok(Stop::new(coordinate).with_address(first.formatted_address))
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<Stop, GeocodeError> {
        let url = self.geocode_url(address);
        log::debug!("geocoding {address:?}");
        let response: GeocodeResponse = self.http.get_json(&url).await?;
        convert_response(address, response)
    }
}
