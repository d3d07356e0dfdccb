//! Shared configuration and HTTP plumbing for routing service adapters.
//!
//! Every adapter in this module owns a [`JsonClient`] built from a
//! [`RoutingServiceConfig`]. The client issues `GET` requests, decodes JSON
//! bodies and maps transport failures onto
//! [`MeasurementError`](nearstop_core::MeasurementError) variants.

use std::time::Duration;

use nearstop_core::{MeasurementError, TravelMode};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Error type for routing adapter construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL could not be used.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The service needs an API key and none was supplied.
    #[error("{service} requires an API key")]
    MissingApiKey {
        /// Name of the service.
        service: &'static str,
    },
}

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "nearstop-routing/0.1";

/// Default base URL for a locally hosted OSRM service.
pub const DEFAULT_OSRM_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which annotation a distance oracle reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostMetric {
    /// Travel distance in metres.
    #[default]
    Distance,
    /// Travel time in seconds.
    Duration,
}

impl CostMetric {
    /// OSRM `annotations` value for this metric.
    #[must_use]
    pub const fn annotation(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
        }
    }
}

/// Configuration shared by the HTTP routing adapters.
#[derive(Debug, Clone)]
pub struct RoutingServiceConfig {
    /// Base URL for the service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Travel mode passed to the service.
    pub mode: TravelMode,
    /// Annotation reported by distance oracles.
    pub metric: CostMetric,
}

impl Default for RoutingServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            mode: TravelMode::default(),
            metric: CostMetric::default(),
        }
    }
}

impl RoutingServiceConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the travel mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the reported metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: CostMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Parse `base_url`, rejecting URLs that cannot carry a path.
    pub(crate) fn parsed_base_url(&self) -> Result<Url, ProviderBuildError> {
        let url = Url::parse(&self.base_url).map_err(|err| ProviderBuildError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ProviderBuildError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }
        Ok(url)
    }

    /// Parse `base_url` as a directory so relative service paths join
    /// beneath it.
    pub(crate) fn base_directory(&self) -> Result<Url, ProviderBuildError> {
        let mut url = self.parsed_base_url()?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

/// `GET`-and-decode client bound to one adapter's configuration.
#[derive(Debug, Clone)]
pub(crate) struct JsonClient {
    client: Client,
    timeout: Duration,
}

impl JsonClient {
    pub(crate) fn new(config: &RoutingServiceConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Fetch `url` and decode the body as `T`.
    pub(crate) async fn get_json<T>(&self, url: &Url) -> Result<T, MeasurementError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, url))?;

        response
            .json()
            .await
            .map_err(|err| MeasurementError::ParseError {
                message: err.without_url().to_string(),
            })
    }

    /// Convert a reqwest error to a `MeasurementError`.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &Url) -> MeasurementError {
        let shown = redacted(url);
        if error.is_timeout() {
            return MeasurementError::Timeout {
                url: shown,
                timeout_secs: self.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return MeasurementError::HttpError {
                url: shown,
                status: status.as_u16(),
                message: error.without_url().to_string(),
            };
        }

        MeasurementError::NetworkError {
            url: shown,
            message: error.without_url().to_string(),
        }
    }
}

/// Render `url` for error messages with any `key` parameter masked.
pub(crate) fn redacted(url: &Url) -> String {
    if !url.query_pairs().any(|(name, _)| name == "key") {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let shown = if name == "key" {
                "REDACTED".to_owned()
            } else {
                value.into_owned()
            };
            (name.into_owned(), shown)
        })
        .collect();
    let mut shown = url.clone();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}

/// Treat negative and non-finite service values as unreachable.
pub(crate) fn reachable_or_infinite(value: Option<f64>) -> f64 {
    value
        .filter(|v| *v >= 0.0 && v.is_finite())
        .unwrap_or(f64::INFINITY)
}
