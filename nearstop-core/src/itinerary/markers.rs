use std::fmt;

use crate::{Coordinate, Route, Stop, TravelMode};

/// Display label for a stop's position within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerLabel {
    /// The origin.
    Start,
    /// The final stop.
    End,
    /// An interior stop, numbered by its route index.
    Position(usize),
}

impl MarkerLabel {
    /// Label for `index` in a route of `len` stops.
    ///
    /// Index zero is always `Start`, even for a single-stop route.
    ///
    /// # Examples
    /// ```
    /// use nearstop_core::MarkerLabel;
    ///
    /// assert_eq!(MarkerLabel::for_index(0, 3), MarkerLabel::Start);
    /// assert_eq!(MarkerLabel::for_index(1, 3), MarkerLabel::Position(1));
    /// assert_eq!(MarkerLabel::for_index(2, 3), MarkerLabel::End);
    /// ```
    #[must_use]
    pub const fn for_index(index: usize, len: usize) -> Self {
        if index == 0 {
            Self::Start
        } else if index.saturating_add(1) == len {
            Self::End
        } else {
            Self::Position(index)
        }
    }
}

impl fmt::Display for MarkerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("Start"),
            Self::End => f.write_str("End"),
            Self::Position(index) => write!(f, "{index}"),
        }
    }
}

/// A labelled stop ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Position label.
    pub label: MarkerLabel,
    /// The stop itself.
    pub stop: Stop,
}

/// Shape of a turn-by-turn directions request for a route.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    /// First stop.
    pub origin: Stop,
    /// Last stop.
    pub destination: Stop,
    /// Interior stops, each a stopover.
    pub waypoints: Vec<Stop>,
    /// How the traveller moves.
    pub mode: TravelMode,
}

impl DirectionsRequest {
    /// Every stop in travel order.
    #[must_use]
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        std::iter::once(&self.origin)
            .chain(&self.waypoints)
            .chain(std::iter::once(&self.destination))
    }

    /// Every coordinate in travel order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.stops().map(|stop| stop.coordinate).collect()
    }
}

/// A sequenced route prepared for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    markers: Vec<Marker>,
    mode: TravelMode,
}

impl Itinerary {
    /// Label every stop of `route`.
    #[must_use]
    pub fn from_route(route: &Route, mode: TravelMode) -> Self {
        let len = route.len();
        let markers = route
            .stops()
            .iter()
            .enumerate()
            .map(|(index, stop)| Marker {
                label: MarkerLabel::for_index(index, len),
                stop: stop.clone(),
            })
            .collect();
        Self { markers, mode }
    }

    /// Labelled stops in visiting order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Travel mode the itinerary was prepared for.
    #[must_use]
    pub const fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Directions request covering the whole route.
    ///
    /// Returns `None` when there are fewer than two stops, as there is
    /// nowhere to travel.
    #[must_use]
    pub fn directions_request(&self) -> Option<DirectionsRequest> {
        let (first, rest) = self.markers.split_first()?;
        let (last, interior) = rest.split_last()?;
        Some(DirectionsRequest {
            origin: first.stop.clone(),
            destination: last.stop.clone(),
            waypoints: interior.iter().map(|marker| marker.stop.clone()).collect(),
            mode: self.mode,
        })
    }
}
