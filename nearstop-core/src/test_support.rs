//! Deterministic oracles and fixtures shared by unit and behaviour tests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::{
    Coordinate, DistanceOracle, DistanceQuery, Distances, MeasurementError, Route, Stop,
};

/// One-dimensional proxy oracle.
///
/// Positions live on the longitude axis at latitude zero and the distance is
/// the absolute longitude difference.
#[derive(Default, Debug, Copy, Clone)]
pub struct LineOracle;

impl LineOracle {
    /// Coordinate for `position` on the line.
    #[must_use]
    pub const fn point(position: f64) -> Coordinate {
        Coordinate::new(0.0, position)
    }
}

#[async_trait]
impl DistanceOracle for LineOracle {
    #[expect(
        clippy::float_arithmetic,
        reason = "line distance is the longitude difference"
    )]
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        let origin = query.origin().lng;
        Ok(query
            .candidates()
            .iter()
            .map(|candidate| (candidate.lng - origin).abs())
            .collect())
    }
}

/// Stops at the given line positions, labelled by input index.
#[must_use]
pub fn line_stops(positions: &[f64]) -> Vec<Stop> {
    positions
        .iter()
        .enumerate()
        .map(|(index, position)| {
            Stop::new(LineOracle::point(*position)).with_label(format!("stop-{index}"))
        })
        .collect()
}

/// Line positions of a route's stops in visiting order.
#[must_use]
pub fn line_positions(route: &Route) -> Vec<f64> {
    route.stops().iter().map(|stop| stop.coordinate.lng).collect()
}

/// Oracle replaying a fixed script of responses and recording each query.
///
/// Once the script is exhausted every further call fails with a
/// `ScriptExhausted` service error.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<Result<Distances, MeasurementError>>>,
    calls: Mutex<Vec<DistanceQuery>>,
}

impl ScriptedOracle {
    /// Create an oracle that answers calls with `responses` in order.
    #[must_use]
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<Distances, MeasurementError>>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<DistanceQuery> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl DistanceOracle for ScriptedOracle {
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(MeasurementError::ServiceError {
                    code: "ScriptExhausted".to_owned(),
                    message: "no scripted response left".to_owned(),
                })
            })
    }
}

/// Wraps another oracle and records every query passed through it.
#[derive(Debug, Default)]
pub struct RecordingOracle<O> {
    inner: O,
    calls: Mutex<Vec<DistanceQuery>>,
}

impl<O> RecordingOracle<O> {
    /// Record queries sent to `inner`.
    #[must_use]
    pub const fn new(inner: O) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<DistanceQuery> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl<O> DistanceOracle for RecordingOracle<O>
where
    O: DistanceOracle,
{
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());
        self.inner.measure(query).await
    }
}
