//! `DistanceOracle` backed by the Google Distance Matrix API.
//!
//! Requests carry one origin and pipe-separated destinations. Elements whose
//! status is not `"OK"` are unreachable; a top-level status other than
//! `"OK"` fails the whole measurement.

use async_trait::async_trait;
use nearstop_core::{DistanceOracle, DistanceQuery, Distances, MeasurementError, TravelMode};
use serde::Deserialize;
use url::Url;

use super::provider::{
    CostMetric, JsonClient, ProviderBuildError, RoutingServiceConfig, reachable_or_infinite,
};

/// Public Distance Matrix endpoint.
pub const GOOGLE_DISTANCE_MATRIX_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Distance Matrix API response.
#[derive(Debug, Deserialize)]
struct MatrixResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<MatrixValue>,
    duration: Option<MatrixValue>,
}

#[derive(Debug, Deserialize)]
struct MatrixValue {
    value: f64,
}

impl MatrixElement {
    fn cost(&self, metric: CostMetric) -> f64 {
        if self.status != "OK" {
            return f64::INFINITY;
        }
        let value = match metric {
            CostMetric::Distance => self.distance.as_ref(),
            CostMetric::Duration => self.duration.as_ref(),
        };
        reachable_or_infinite(value.map(|v| v.value))
    }
}

/// Google's name for a travel mode.
const fn google_mode(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "driving",
        TravelMode::Walking => "walking",
        TravelMode::Cycling => "bicycling",
    }
}

/// HTTP distance oracle using the Google Distance Matrix API.
#[derive(Clone)]
pub struct GoogleDistanceOracle {
    http: JsonClient,
    base: Url,
    api_key: String,
    config: RoutingServiceConfig,
}

impl std::fmt::Debug for GoogleDistanceOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleDistanceOracle")
            .field("http", &self.http)
            .field("base", &self.base.as_str())
            .field("api_key", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl GoogleDistanceOracle {
    /// Create an oracle for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is empty or the HTTP client fails to
    /// build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(api_key, RoutingServiceConfig::new(GOOGLE_DISTANCE_MATRIX_URL))
    }

    /// Create an oracle with explicit configuration.
    ///
    /// `config.base_url` is the full Distance Matrix endpoint.
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
                service: "Google Distance Matrix",
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

    /// Build the request URL for `query`.
    fn matrix_url(&self, query: &DistanceQuery) -> Url {
        let destinations = query
            .candidates()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("|");

        let mut url = self.base.clone();
        url.query_pairs_mut()
            .append_pair("origins", &query.origin().to_string())
            .append_pair("destinations", &destinations)
            .append_pair("mode", google_mode(self.config.mode))
            .append_pair("units", "metric")
            .append_pair("key", &self.api_key);
        url
    }

    /// Convert a Distance Matrix response to distances aligned with the
    /// query.
    fn convert_response(&self, response: MatrixResponse) -> Result<Distances, MeasurementError> {
        if response.status != "OK" {
            return Err(MeasurementError::ServiceError {
                code: response.status,
                message: response.error_message.unwrap_or_default(),
            });
        }

        let row = response
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| MeasurementError::ParseError {
                message: "Distance Matrix response has no rows".to_owned(),
            })?;

        Ok(row
            .elements
            .iter()
            .map(|element| element.cost(self.config.metric))
            .collect())
    }
}

#[async_trait]
impl DistanceOracle for GoogleDistanceOracle {
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        let url = self.matrix_url(query);
        log::debug!(
            "requesting Distance Matrix for {} candidates via {}",
            query.len(),
            self.config.mode
        );
        let response: MatrixResponse = self.http.get_json(&url).await?;
        self.convert_response(response)
    }
}
