//! `DistanceOracle` backed by OSRM's Table API.
//!
//! Each measurement issues one Table request with the origin as the only
//! source and the candidates as destinations, so the response is a single
//! row aligned with the query.

use async_trait::async_trait;
use nearstop_core::{Coordinate, DistanceOracle, DistanceQuery, Distances, MeasurementError};
use url::Url;

use super::osrm::TableResponse;
use super::provider::{
    CostMetric, JsonClient, ProviderBuildError, RoutingServiceConfig, reachable_or_infinite,
};

/// HTTP distance oracle using the OSRM Table API.
///
/// # Example
///
/// ```no_run
/// use nearstop_core::{Coordinate, DistanceOracle, DistanceQuery};
/// use nearstop_data::routing::{CostMetric, OsrmDistanceOracle, RoutingServiceConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RoutingServiceConfig::new("http://localhost:5000")
///     .with_metric(CostMetric::Duration);
/// let oracle = OsrmDistanceOracle::with_config(config)?;
///
/// let query = DistanceQuery::new(
///     Coordinate::new(51.5, -0.1),
///     vec![Coordinate::new(51.6, -0.2)],
/// )?;
/// let distances = oracle.measure(&query).await?;
/// assert_eq!(distances.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OsrmDistanceOracle {
    http: JsonClient,
    base: Url,
    config: RoutingServiceConfig,
}

impl OsrmDistanceOracle {
    /// Create an oracle with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(RoutingServiceConfig::new(base_url))
    }

    /// Create an oracle with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: RoutingServiceConfig) -> Result<Self, ProviderBuildError> {
        let base = config.base_directory()?;
        let http = JsonClient::new(&config)?;
        Ok(Self { http, base, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &RoutingServiceConfig {
        &self.config
    }

    /// Build the Table API URL for `query`.
    ///
    /// The URL format is
    /// `{base_url}/table/v1/{profile}/{coordinates}?sources=0&destinations=1;..;n&annotations={metric}`
    /// where coordinates are semicolon-separated `lng,lat` pairs, origin first.
    fn table_url(&self, query: &DistanceQuery) -> Result<Url, MeasurementError> {
        let coordinates = osrm_coordinates(
            std::iter::once(query.origin()).chain(query.candidates().iter().copied()),
        );
        let destinations = (1..=query.len())
            .map(|index| index.to_string())
            .collect::<Vec<_>>()
            .join(";");

        let mut url = join_service_path(
            &self.base,
            &format!("table/v1/{}/{coordinates}", self.config.mode),
        )?;
        url.set_query(Some(&format!(
            "sources=0&destinations={destinations}&annotations={}",
            self.config.metric.annotation()
        )));
        Ok(url)
    }

    /// Convert an OSRM response to distances aligned with the query.
    fn convert_response(&self, response: TableResponse) -> Result<Distances, MeasurementError> {
        if !response.is_ok() {
            return Err(MeasurementError::ServiceError {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let (matrix, name) = match self.config.metric {
            CostMetric::Distance => (response.distances, "distances"),
            CostMetric::Duration => (response.durations, "durations"),
        };
        let row = matrix
            .ok_or_else(|| MeasurementError::ParseError {
                message: format!("OSRM response missing {name} array"),
            })?
            .into_iter()
            .next()
            .ok_or_else(|| MeasurementError::ParseError {
                message: format!("OSRM response has an empty {name} array"),
            })?;

        // Nulls mark unreachable pairs; negative or non-finite values are
        // treated the same way.
        Ok(row
            .into_iter()
            .map(reachable_or_infinite)
            .collect())
    }
}

#[async_trait]
impl DistanceOracle for OsrmDistanceOracle {
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        let url = self.table_url(query)?;
        log::debug!(
            "requesting OSRM table for {} candidates via {}",
            query.len(),
            self.config.mode
        );
        let response: TableResponse = self.http.get_json(&url).await?;
        self.convert_response(response)
    }
}

/// Format coordinates the way OSRM expects them in a path.
pub(crate) fn osrm_coordinates(coordinates: impl Iterator<Item = Coordinate>) -> String {
    coordinates
        .map(|coordinate| format!("{},{}", coordinate.lng, coordinate.lat))
        .collect::<Vec<_>>()
        .join(";")
}

/// Append `path` beneath the service base directory.
pub(crate) fn join_service_path(base: &Url, path: &str) -> Result<Url, MeasurementError> {
    base.join(path)
        .map_err(|err| MeasurementError::NetworkError {
            url: base.to_string(),
            message: format!("failed to build request URL: {err}"),
        })
}
