//! Core domain types for the nearstop route planner.
//!
//! The crate orders a set of stops with a greedy nearest-neighbour heuristic.
//! Distances come from a caller-supplied [`DistanceOracle`]; nothing here
//! performs network or file I/O.
//!
//! - [`find_nearest`] selects the closest of the remaining stops with one
//!   oracle query.
//! - [`sequence`] and [`RouteSequencer`] build a [`Route`] that starts at the
//!   origin and visits every stop exactly once.
//! - [`Itinerary`] and [`StepsTable`] prepare a route for display.
//! - [`PlanningSession`] tracks pending stops and discards stale runs.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod coordinate;
pub mod distance;
pub mod itinerary;
mod route;
pub mod sequence;
mod session;
mod stop;

#[doc(hidden)]
pub mod test_support;

pub use coordinate::{Coordinate, CoordinateError, InvalidInputLocation};
pub use distance::{
    DistanceOracle, DistanceQuery, Distances, MeasurementError, ParseTravelModeError,
    StraightLineOracle, TravelMode,
};
pub use itinerary::{
    DirectionsRequest, Itinerary, Leg, Marker, MarkerLabel, StepsTable, format_distance,
    format_duration,
};
pub use route::Route;
pub use sequence::{Nearest, RouteSequencer, SequenceError, find_nearest, sequence};
pub use session::{Outcome, PlanningSession, RunTicket, Submission};
pub use stop::Stop;
