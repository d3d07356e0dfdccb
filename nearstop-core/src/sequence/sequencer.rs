//! Greedy nearest-neighbour route construction.

use crate::{Coordinate, DistanceOracle, Route, Stop};

use super::error::SequenceError;
use super::nearest::find_nearest;

/// Orders stops by repeatedly visiting the closest unvisited one.
///
/// The sequencer owns no state beyond its oracle; each call to
/// [`RouteSequencer::sequence`] is an independent run.
///
/// # Examples
/// ```
/// use nearstop_core::{Coordinate, RouteSequencer, Stop, StraightLineOracle};
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let sequencer = RouteSequencer::new(StraightLineOracle);
/// let route = runtime.block_on(sequencer.sequence_coordinates(&[
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 3.0),
///     Coordinate::new(0.0, 1.0),
/// ]))?;
/// assert_eq!(
///     route.coordinates(),
///     vec![
///         Coordinate::new(0.0, 0.0),
///         Coordinate::new(0.0, 1.0),
///         Coordinate::new(0.0, 3.0),
///     ]
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteSequencer<O> {
    oracle: O,
}

impl<O> RouteSequencer<O>
where
    O: DistanceOracle,
{
    /// Construct a sequencer backed by `oracle`.
    #[must_use]
    pub const fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Borrow the oracle.
    #[must_use]
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Order `unordered` into a route beginning at `origin`.
    ///
    /// See [`sequence`] for the algorithm and failure behaviour.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SequenceError`] raised while searching.
    pub async fn sequence(&self, origin: Stop, unordered: Vec<Stop>) -> Result<Route, SequenceError> {
        sequence(&self.oracle, origin, unordered).await
    }

    /// Treat the first coordinate as the origin and order the rest.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::MissingOrigin`] for empty input, otherwise
    /// the errors of [`RouteSequencer::sequence`].
    pub async fn sequence_coordinates(
        &self,
        coordinates: &[Coordinate],
    ) -> Result<Route, SequenceError> {
        let (origin, rest) = coordinates
            .split_first()
            .ok_or(SequenceError::MissingOrigin)?;
        let unordered = rest.iter().copied().map(Stop::new).collect();
        self.sequence(Stop::new(*origin), unordered).await
    }
}

/// Build a route from `origin` through every stop in `unordered`.
///
/// Each iteration asks `oracle` for distances from the route's current tail
/// to every remaining stop, appends the closest and removes it from the
/// remaining list. Remaining stops keep their relative input order, so ties
/// resolve to the stop given earliest. Queries are issued one at a time.
///
/// An empty `unordered` yields `[origin]` without querying the oracle.
///
/// # Errors
///
/// Any error from [`find_nearest`] aborts the run; no partial route is
/// returned.
pub async fn sequence<O>(
    oracle: &O,
    origin: Stop,
    unordered: Vec<Stop>,
) -> Result<Route, SequenceError>
where
    O: DistanceOracle + ?Sized,
{
    let total = unordered.len();
    let mut route = Route::starting_at(origin, total);
    let mut remaining = unordered;

    while !remaining.is_empty() {
        let current = route
            .tail_coordinate()
            .ok_or(SequenceError::MissingOrigin)?;
        let index = find_nearest(oracle, current, &remaining).await?.index;
        let next = remaining.remove(index);
        log::debug!(
            "step {}/{total}: {current} -> {}",
            route.len(),
            next.coordinate
        );
        route.push(next);
    }

    debug_assert_eq!(route.len(), total + 1, "route must hold every stop once");
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::MeasurementError;
    use crate::test_support::{LineOracle, ScriptedOracle, line_positions, line_stops};

    #[fixture]
    fn sequencer() -> RouteSequencer<LineOracle> {
        RouteSequencer::new(LineOracle)
    }

    #[rstest]
    #[tokio::test]
    async fn orders_points_on_a_line(sequencer: RouteSequencer<LineOracle>) {
        let origin = Stop::new(LineOracle::point(0.0));

        let route = sequencer
            .sequence(origin, line_stops(&[10.0, 3.0, 7.0]))
            .await
            .expect("route");

        assert_eq!(line_positions(&route), vec![0.0, 3.0, 7.0, 10.0]);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_stops_yield_origin_without_queries() {
        let oracle = ScriptedOracle::new([]);
        let origin = Stop::new(LineOracle::point(0.0)).with_label("depot");

        let route = sequence(&oracle, origin.clone(), Vec::new())
            .await
            .expect("route");

        assert_eq!(route.stops(), &[origin]);
        assert!(oracle.calls().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn single_stop_uses_one_query_with_one_candidate() {
        let oracle = ScriptedOracle::new([Ok(vec![42.0])]);
        let origin = Stop::new(LineOracle::point(0.0));
        let only = Stop::new(LineOracle::point(5.0));

        let route = sequence(&oracle, origin.clone(), vec![only.clone()])
            .await
            .expect("route");

        assert_eq!(route.stops(), &[origin, only]);
        let calls = oracle.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn ties_resolve_to_earliest_remaining_stop() {
        let first = Stop::new(LineOracle::point(1.0)).with_label("first");
        let second = Stop::new(LineOracle::point(1.0)).with_label("second");
        let oracle = ScriptedOracle::new([Ok(vec![5.0, 5.0]), Ok(vec![0.0])]);

        let route = sequence(
            &oracle,
            Stop::new(LineOracle::point(0.0)),
            vec![first.clone(), second.clone()],
        )
        .await
        .expect("route");

        assert_eq!(route.stops().get(1), Some(&first));
        assert_eq!(route.stops().get(2), Some(&second));
    }

    #[rstest]
    #[tokio::test]
    async fn queries_start_from_the_route_tail() {
        let oracle = ScriptedOracle::new([Ok(vec![9.0, 1.0]), Ok(vec![8.0])]);
        let stops = line_stops(&[9.0, 1.0]);

        sequence(&oracle, Stop::new(LineOracle::point(0.0)), stops)
            .await
            .expect("route");

        let calls = oracle.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].origin(), LineOracle::point(0.0));
        assert_eq!(calls[1].origin(), LineOracle::point(1.0));
        assert_eq!(calls[1].candidates(), &[LineOracle::point(9.0)]);
    }

    #[rstest]
    #[tokio::test]
    async fn failure_mid_run_returns_no_route() {
        let oracle = ScriptedOracle::new([
            Ok(vec![1.0, 2.0, 3.0]),
            Err(MeasurementError::NetworkError {
                url: "http://router.invalid".to_owned(),
                message: "connection reset".to_owned(),
            }),
        ]);

        let result = sequence(
            &oracle,
            Stop::new(LineOracle::point(0.0)),
            line_stops(&[1.0, 2.0, 3.0]),
        )
        .await;

        assert!(matches!(
            result,
            Err(SequenceError::Measurement(MeasurementError::NetworkError { .. }))
        ));
        assert_eq!(oracle.calls().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn coordinates_without_origin_are_rejected(sequencer: RouteSequencer<LineOracle>) {
        let err = sequencer
            .sequence_coordinates(&[])
            .await
            .expect_err("missing origin");
        assert_eq!(err, SequenceError::MissingOrigin);
    }

    #[rstest]
    #[tokio::test]
    async fn first_coordinate_is_the_origin(sequencer: RouteSequencer<LineOracle>) {
        let route = sequencer
            .sequence_coordinates(&[
                LineOracle::point(5.0),
                LineOracle::point(0.0),
                LineOracle::point(6.0),
            ])
            .await
            .expect("route");

        assert_eq!(line_positions(&route), vec![5.0, 6.0, 0.0]);
    }
}
