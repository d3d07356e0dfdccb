//! Ordered visiting sequences produced by the sequencer.

use crate::{Coordinate, Stop};

/// An ordered path through stops, beginning at the fixed origin.
///
/// A `Route` is only built by the sequencer, which guarantees it is the
/// origin followed by a permutation of the stops it was given: every input
/// stop appears exactly once.
///
/// # Examples
/// ```
/// use nearstop_core::{Coordinate, SequenceError, Stop, StraightLineOracle, sequence};
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// # runtime.block_on(async {
/// let origin = Stop::new(Coordinate::new(0.0, 0.0));
/// let route = sequence(&StraightLineOracle, origin.clone(), Vec::new()).await?;
/// assert_eq!(route.stops(), &[origin]);
/// # Ok::<(), SequenceError>(())
/// # })?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    stops: Vec<Stop>,
}

impl Route {
    /// Begin a route at `origin`.
    pub(crate) fn starting_at(origin: Stop, capacity: usize) -> Self {
        let mut stops = Vec::with_capacity(capacity.saturating_add(1));
        stops.push(origin);
        Self { stops }
    }

    pub(crate) fn push(&mut self, stop: Stop) {
        self.stops.push(stop);
    }

    /// Coordinate of the stop most recently appended.
    pub(crate) fn tail_coordinate(&self) -> Option<Coordinate> {
        self.stops.last().map(|stop| stop.coordinate)
    }

    /// Stops in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// The fixed starting stop.
    #[must_use]
    pub fn origin(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// The final stop; equal to the origin for a single-stop route.
    #[must_use]
    pub fn destination(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Number of stops including the origin.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the route has no stops. Sequenced routes always hold the
    /// origin.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Coordinates in visiting order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.stops.iter().map(|stop| stop.coordinate).collect()
    }

    /// Consume the route, yielding its stops.
    #[must_use]
    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn route_preserves_push_order() {
        let first = Stop::new(Coordinate::new(0.0, 0.0));
        let second = Stop::new(Coordinate::new(1.0, 1.0));
        let mut route = Route::starting_at(first.clone(), 1);
        route.push(second.clone());

        assert_eq!(route.stops(), &[first.clone(), second.clone()]);
        assert_eq!(route.origin(), Some(&first));
        assert_eq!(route.destination(), Some(&second));
        assert_eq!(route.tail_coordinate(), Some(second.coordinate));
    }

    #[rstest]
    fn single_stop_route_starts_and_ends_at_origin() {
        let origin = Stop::new(Coordinate::new(3.0, 4.0));
        let route = Route::starting_at(origin.clone(), 0);
        assert_eq!(route.len(), 1);
        assert_eq!(route.origin(), route.destination());
    }
}
