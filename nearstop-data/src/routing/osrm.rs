//! OSRM API response types for the Table and Route services.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#table-service> and
//! <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Table API response.
///
/// With `sources=0` the matrices hold a single row: the costs from the origin
/// to each destination.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTable"` - Table computation failed
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Matrix of distances in metres, present with `annotations=distance`.
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,

    /// Matrix of durations in seconds, present with `annotations=duration`.
    #[serde(default)]
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM; `"NoRoute"` when the stops are disconnected.
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route through every requested coordinate.
#[derive(Debug, Deserialize)]
pub struct RouteEntry {
    /// Legs between consecutive coordinates.
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// Travel between two consecutive coordinates of a route.
#[derive(Debug, Deserialize)]
pub struct RouteLeg {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
}
