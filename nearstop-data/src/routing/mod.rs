//! HTTP adapters for routing services.
//!
//! This module provides [`OsrmDistanceOracle`] and [`GoogleDistanceOracle`],
//! implementations of [`nearstop_core::DistanceOracle`] that fetch one row of
//! a distance matrix per query, and [`OsrmDirections`], which fetches the
//! legs of a finished route for display. [`GoogleGeocoder`] resolves address
//! text to a stop before it joins the pending list.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use nearstop_core::{Coordinate, RouteSequencer};
//! use nearstop_data::routing::{OsrmDistanceOracle, RoutingServiceConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RoutingServiceConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let sequencer = RouteSequencer::new(OsrmDistanceOracle::with_config(config)?);
//!
//! let route = sequencer
//!     .sequence_coordinates(&[
//!         Coordinate::new(51.50, -0.12),
//!         Coordinate::new(51.52, -0.10),
//!         Coordinate::new(51.51, -0.11),
//!     ])
//!     .await?;
//! println!("{} stops", route.len());
//! # Ok(())
//! # }
//! ```

mod directions;
mod geocoding;
mod google;
mod osrm;
mod osrm_table;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use directions::{DirectionsError, DirectionsProvider, OsrmDirections};
pub use geocoding::{GOOGLE_GEOCODING_URL, GeocodeError, Geocoder, GoogleGeocoder};
pub use google::{GOOGLE_DISTANCE_MATRIX_URL, GoogleDistanceOracle};
pub use osrm_table::OsrmDistanceOracle;
pub use provider::{
    CostMetric, DEFAULT_OSRM_BASE_URL, DEFAULT_USER_AGENT, ProviderBuildError,
    RoutingServiceConfig,
};
