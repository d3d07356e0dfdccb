//! Presentation model for a sequenced route.
//!
//! Turns a [`Route`](crate::Route) into labelled markers, the shape of a
//! directions request, and a steps table once leg details are known. Nothing
//! here performs I/O.

mod markers;
mod table;

pub use markers::{DirectionsRequest, Itinerary, Marker, MarkerLabel};
pub use table::{Leg, StepsTable, format_distance, format_duration};
