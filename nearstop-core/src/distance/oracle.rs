//! Distance oracle trait and the query/result types it exchanges.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::Coordinate;

use super::error::MeasurementError;

/// Travel costs aligned with a query's candidates.
///
/// `f64::INFINITY` marks a candidate the oracle cannot reach.
pub type Distances = Vec<f64>;

/// One origin and the ordered candidates to measure against it.
///
/// # Examples
/// ```
/// use nearstop_core::{Coordinate, DistanceQuery, MeasurementError};
///
/// let query = DistanceQuery::new(
///     Coordinate::new(0.0, 0.0),
///     vec![Coordinate::new(1.0, 1.0)],
/// )?;
/// assert_eq!(query.len(), 1);
/// assert_eq!(
///     DistanceQuery::new(Coordinate::new(0.0, 0.0), Vec::new()),
///     Err(MeasurementError::EmptyInput)
/// );
/// # Ok::<(), MeasurementError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceQuery {
    origin: Coordinate,
    candidates: Vec<Coordinate>,
}

impl DistanceQuery {
    /// Build a query.
    ///
    /// # Errors
    ///
    /// Returns [`MeasurementError::EmptyInput`] when `candidates` is empty.
    pub fn new(origin: Coordinate, candidates: Vec<Coordinate>) -> Result<Self, MeasurementError> {
        if candidates.is_empty() {
            return Err(MeasurementError::EmptyInput);
        }
        Ok(Self { origin, candidates })
    }

    /// Where every measurement starts.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Destinations in the order their distances must be returned.
    #[must_use]
    pub fn candidates(&self) -> &[Coordinate] {
        &self.candidates
    }

    /// Number of candidates, and so the required result length.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always `false`; empty queries cannot be constructed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// How the traveller moves between stops.
///
/// The sequencer never inspects the mode; adapters translate it into their
/// service's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TravelMode {
    /// By car.
    #[default]
    Driving,
    /// On foot.
    Walking,
    /// By bicycle.
    #[cfg_attr(feature = "serde", serde(alias = "bicycling"))]
    Cycling,
}

impl TravelMode {
    /// Lowercase name used on the command line and in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TravelMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode {0:?} (expected driving, walking or cycling)")]
pub struct ParseTravelModeError(String);

impl FromStr for TravelMode {
    type Err = ParseTravelModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(Self::Driving),
            "walking" => Ok(Self::Walking),
            "cycling" | "bicycling" => Ok(Self::Cycling),
            _ => Err(ParseTravelModeError(s.to_owned())),
        }
    }
}

/// Measure travel cost from one origin to many candidates in one batch.
///
/// Implementations must return exactly one distance per candidate, in
/// candidate order. Units are the oracle's choice (metres, seconds) but must
/// be comparable within one result. Callers never assume symmetry or the
/// triangle inequality.
///
/// The call may suspend for arbitrarily long. A sequencing run awaits each
/// call before issuing the next.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use nearstop_core::{Coordinate, DistanceOracle, DistanceQuery, Distances, MeasurementError};
///
/// struct LatitudeGap;
///
/// #[async_trait]
/// impl DistanceOracle for LatitudeGap {
///     async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
///         let origin = query.origin();
///         Ok(query
///             .candidates()
///             .iter()
///             .map(|c| (c.lat - origin.lat).abs())
///             .collect())
///     }
/// }
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let query = DistanceQuery::new(Coordinate::new(0.0, 0.0), vec![Coordinate::new(2.0, 0.0)])?;
/// let distances = runtime.block_on(LatitudeGap.measure(&query))?;
/// assert_eq!(distances, vec![2.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[async_trait]
pub trait DistanceOracle: Send + Sync {
    /// Return one travel cost per candidate in `query`.
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError>;
}

#[async_trait]
impl<T> DistanceOracle for &T
where
    T: DistanceOracle + ?Sized,
{
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        (**self).measure(query).await
    }
}

#[async_trait]
impl<T> DistanceOracle for Box<T>
where
    T: DistanceOracle + ?Sized,
{
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        (**self).measure(query).await
    }
}

#[async_trait]
impl<T> DistanceOracle for Arc<T>
where
    T: DistanceOracle + ?Sized,
{
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        (**self).measure(query).await
    }
}
