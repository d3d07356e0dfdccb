//! Facade crate for the nearstop route planner.
//!
//! This crate re-exports the core sequencing types and exposes the HTTP
//! routing adapters and the location store behind the `adapters` feature.

#![forbid(unsafe_code)]

pub use nearstop_core::{
    Coordinate, CoordinateError, DirectionsRequest, DistanceOracle, DistanceQuery, Distances,
    InvalidInputLocation, Itinerary, Leg, Marker, MarkerLabel, MeasurementError, Nearest,
    Outcome, PlanningSession, Route, RouteSequencer, SequenceError, StepsTable, Stop,
    StraightLineOracle, TravelMode, find_nearest, sequence,
};

#[cfg(feature = "adapters")]
pub use nearstop_data::routing::{
    DirectionsError, DirectionsProvider, GeocodeError, Geocoder, GoogleDistanceOracle,
    GoogleGeocoder, OsrmDirections, OsrmDistanceOracle, ProviderBuildError,
    RoutingServiceConfig,
};

#[cfg(feature = "adapters")]
pub use nearstop_data::store::{LocationStore, LocationStoreError};
