//! Application-side state for the add, clear and submit flow.
//!
//! The sequencer is stateless. A [`PlanningSession`] holds what the user has
//! entered and the last accepted itinerary, and decides whether a finished
//! run is still wanted: only the most recently submitted run may replace the
//! displayed itinerary.

use crate::{Coordinate, DistanceOracle, Itinerary, Route, RouteSequencer, SequenceError, Stop, TravelMode};

/// Identifies one submitted sequencing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunTicket(u64);

/// Input for one sequencing run taken from the pending stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Ticket to present when the run completes.
    pub ticket: RunTicket,
    /// The first pending stop.
    pub origin: Stop,
    /// The remaining pending stops in entry order.
    pub stops: Vec<Stop>,
}

impl Submission {
    /// Every submitted coordinate, origin first.
    #[must_use]
    pub fn coordinates(&self) -> Vec<Coordinate> {
        std::iter::once(self.origin.coordinate)
            .chain(self.stops.iter().map(|stop| stop.coordinate))
            .collect()
    }
}

/// What happened to a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The run was the latest; its route is now the itinerary.
    Accepted,
    /// A newer submission or a clear superseded the run; its route was
    /// discarded.
    Stale,
}

/// Pending stops plus the itinerary currently on display.
///
/// # Examples
/// ```
/// use nearstop_core::{Coordinate, Outcome, PlanningSession, RouteSequencer, Stop, StraightLineOracle};
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let mut session = PlanningSession::default();
/// session.add_stop(Stop::new(Coordinate::new(0.0, 0.0)));
/// session.add_stop(Stop::new(Coordinate::new(0.0, 1.0)));
///
/// let sequencer = RouteSequencer::new(StraightLineOracle);
/// let outcome = runtime.block_on(session.plan(&sequencer))?;
/// assert_eq!(outcome, Some(Outcome::Accepted));
/// assert_eq!(session.itinerary().map(|i| i.markers().len()), Some(2));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanningSession {
    pending: Vec<Stop>,
    mode: TravelMode,
    latest: u64,
    itinerary: Option<Itinerary>,
}

impl PlanningSession {
    /// Start a session for `mode` with no stops.
    #[must_use]
    pub const fn new(mode: TravelMode) -> Self {
        Self {
            pending: Vec::new(),
            mode,
            latest: 0,
            itinerary: None,
        }
    }

    /// Start a session from previously stored stops.
    #[must_use]
    pub fn with_stops(mode: TravelMode, stops: Vec<Stop>) -> Self {
        Self {
            pending: stops,
            ..Self::new(mode)
        }
    }

    /// Append a validated stop.
    pub fn add_stop(&mut self, stop: Stop) {
        self.pending.push(stop);
    }

    /// Stops entered so far, or the ordered stops of the last accepted run.
    #[must_use]
    pub fn pending(&self) -> &[Stop] {
        &self.pending
    }

    /// The itinerary of the last accepted run, if any.
    #[must_use]
    pub const fn itinerary(&self) -> Option<&Itinerary> {
        self.itinerary.as_ref()
    }

    /// Forget all stops and the displayed itinerary.
    ///
    /// Runs submitted before the clear become stale.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.itinerary = None;
        self.latest = self.latest.saturating_add(1);
    }

    /// Whether `ticket` belongs to the most recent submission.
    #[must_use]
    pub const fn is_current(&self, ticket: RunTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Take the pending stops for a new run, superseding earlier runs.
    ///
    /// Returns `None` when no stops are pending.
    pub fn submit(&mut self) -> Option<Submission> {
        let (origin, stops) = self.pending.split_first()?;
        self.latest = self.latest.saturating_add(1);
        Some(Submission {
            ticket: RunTicket(self.latest),
            origin: origin.clone(),
            stops: stops.to_vec(),
        })
    }

    /// Record a finished run.
    ///
    /// The route replaces the itinerary and the pending stops only when
    /// `ticket` is still current.
    pub fn complete(&mut self, ticket: RunTicket, route: &Route) -> Outcome {
        if !self.is_current(ticket) {
            log::debug!("discarding stale run {ticket:?}; latest is {}", self.latest);
            return Outcome::Stale;
        }
        self.itinerary = Some(Itinerary::from_route(route, self.mode));
        self.pending = route.stops().to_vec();
        Outcome::Accepted
    }

    /// Submit, sequence and complete in one step.
    ///
    /// Returns `Ok(None)` when there is nothing to plan.
    ///
    /// # Errors
    ///
    /// Propagates [`SequenceError`]; the session is left as it was before
    /// the failed run, apart from the consumed ticket.
    pub async fn plan<O>(
        &mut self,
        sequencer: &RouteSequencer<O>,
    ) -> Result<Option<Outcome>, SequenceError>
    where
        O: DistanceOracle,
    {
        let Some(submission) = self.submit() else {
            return Ok(None);
        };
        let route = sequencer
            .sequence(submission.origin, submission.stops)
            .await?;
        Ok(Some(self.complete(submission.ticket, &route)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::test_support::{LineOracle, line_positions, line_stops};

    #[fixture]
    fn session() -> PlanningSession {
        PlanningSession::with_stops(TravelMode::Driving, line_stops(&[0.0, 10.0, 3.0]))
    }

    async fn route_for(submission: &Submission) -> Route {
        RouteSequencer::new(LineOracle)
            .sequence(submission.origin.clone(), submission.stops.clone())
            .await
            .expect("route")
    }

    #[rstest]
    fn submit_on_empty_session_is_none() {
        let mut session = PlanningSession::default();
        assert!(session.submit().is_none());
    }

    #[rstest]
    fn submission_uses_first_stop_as_origin(mut session: PlanningSession) {
        let submission = session.submit().expect("pending stops");
        assert_eq!(submission.origin.coordinate, LineOracle::point(0.0));
        assert_eq!(
            submission.coordinates(),
            vec![
                LineOracle::point(0.0),
                LineOracle::point(10.0),
                LineOracle::point(3.0)
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn latest_run_is_accepted(mut session: PlanningSession) {
        let submission = session.submit().expect("pending stops");
        let route = route_for(&submission).await;

        assert_eq!(session.complete(submission.ticket, &route), Outcome::Accepted);
        let itinerary = session.itinerary().expect("itinerary");
        assert_eq!(itinerary.markers().len(), 3);
        assert_eq!(line_positions(&route), vec![0.0, 3.0, 10.0]);
        assert_eq!(session.pending(), route.stops());
    }

    #[rstest]
    #[tokio::test]
    async fn superseded_run_is_discarded(mut session: PlanningSession) {
        let older = session.submit().expect("pending stops");
        let newer = session.submit().expect("pending stops");
        let older_route = route_for(&older).await;

        assert_eq!(session.complete(older.ticket, &older_route), Outcome::Stale);
        assert!(session.itinerary().is_none());
        assert!(session.is_current(newer.ticket));
    }

    #[rstest]
    #[tokio::test]
    async fn clear_invalidates_outstanding_runs(mut session: PlanningSession) {
        let submission = session.submit().expect("pending stops");
        session.clear();
        let route = route_for(&submission).await;

        assert_eq!(session.complete(submission.ticket, &route), Outcome::Stale);
        assert!(session.pending().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn plan_sequences_pending_stops(mut session: PlanningSession) {
        let sequencer = RouteSequencer::new(LineOracle);

        let outcome = session.plan(&sequencer).await.expect("plan");

        assert_eq!(outcome, Some(Outcome::Accepted));
        let positions: Vec<f64> = session
            .pending()
            .iter()
            .map(|stop| stop.coordinate.lng)
            .collect();
        assert_eq!(positions, vec![0.0, 3.0, 10.0]);
    }
}
