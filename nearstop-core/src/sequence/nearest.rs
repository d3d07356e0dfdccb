//! Pick the closest remaining stop with a single oracle query.

use crate::{Coordinate, DistanceOracle, DistanceQuery, Stop};

use super::error::SequenceError;

/// The closest candidate and where it sits in the candidate slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    /// The chosen stop, borrowed from the candidates.
    pub stop: &'a Stop,
    /// Index of `stop` in the candidate slice.
    pub index: usize,
    /// The distance the oracle reported for `stop`.
    pub distance: f64,
}

/// Find the stop in `remaining` closest to `origin`.
///
/// Issues exactly one oracle query covering every candidate in order. Ties go
/// to the earliest candidate. NaN distances never win over a number.
///
/// # Errors
///
/// - [`SequenceError::EmptyCandidateSet`] when `remaining` is empty; no query
///   is issued.
/// - [`SequenceError::Measurement`] when the oracle fails.
/// - [`SequenceError::ResultLengthMismatch`] when the oracle returns a
///   different number of distances than candidates.
///
/// # Examples
/// ```
/// use nearstop_core::{Coordinate, Stop, StraightLineOracle, find_nearest};
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let remaining = vec![
///     Stop::new(Coordinate::new(0.0, 5.0)),
///     Stop::new(Coordinate::new(0.0, 1.0)),
/// ];
/// let nearest = runtime.block_on(find_nearest(
///     &StraightLineOracle,
///     Coordinate::new(0.0, 0.0),
///     &remaining,
/// ))?;
/// assert_eq!(nearest.index, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub async fn find_nearest<'a, O>(
    oracle: &O,
    origin: Coordinate,
    remaining: &'a [Stop],
) -> Result<Nearest<'a>, SequenceError>
where
    O: DistanceOracle + ?Sized,
{
    if remaining.is_empty() {
        return Err(SequenceError::EmptyCandidateSet);
    }

    let candidates = remaining.iter().map(|stop| stop.coordinate).collect();
    let query = DistanceQuery::new(origin, candidates)?;
    let distances = oracle.measure(&query).await?;

    if distances.len() != remaining.len() {
        return Err(SequenceError::ResultLengthMismatch {
            expected: remaining.len(),
            actual: distances.len(),
        });
    }

    let (index, distance) = first_minimum(&distances).ok_or(SequenceError::EmptyCandidateSet)?;
    let stop = remaining
        .get(index)
        .ok_or(SequenceError::ResultLengthMismatch {
            expected: remaining.len(),
            actual: distances.len(),
        })?;

    if distance.is_infinite() {
        log::warn!("nearest of {} candidates from {origin} is unreachable", remaining.len());
    }

    Ok(Nearest {
        stop,
        index,
        distance,
    })
}

/// Index and value of the first minimum, sweeping with a strict `<`.
///
/// NaN is ranked after every number so a measured candidate always beats an
/// unmeasurable one.
fn first_minimum(distances: &[f64]) -> Option<(usize, f64)> {
    let mut iter = distances.iter().copied().enumerate();
    let mut best = iter.next()?;
    for (index, distance) in iter {
        let beats_best = if best.1.is_nan() {
            !distance.is_nan()
        } else {
            distance < best.1
        };
        if beats_best {
            best = (index, distance);
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::MeasurementError;
    use crate::test_support::{LineOracle, ScriptedOracle, line_stops};

    #[rstest]
    #[case(&[3.0, 1.0, 2.0], 1)]
    #[case(&[2.0, 1.0, 1.0], 1)]
    #[case(&[5.0, 5.0, 5.0], 0)]
    #[case(&[f64::NAN, 4.0, 2.0], 2)]
    #[case(&[f64::INFINITY, f64::INFINITY], 0)]
    #[case(&[7.0], 0)]
    fn first_minimum_prefers_earliest(#[case] distances: &[f64], #[case] expected: usize) {
        let (index, _) = first_minimum(distances).expect("non-empty distances");
        assert_eq!(index, expected);
    }

    #[rstest]
    fn first_minimum_of_nothing_is_none() {
        assert!(first_minimum(&[]).is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn returns_closest_stop_and_index() {
        let remaining = line_stops(&[10.0, 3.0, 7.0]);

        let nearest = find_nearest(&LineOracle, LineOracle::point(0.0), &remaining)
            .await
            .expect("nearest stop");

        assert_eq!(nearest.index, 1);
        assert_eq!(nearest.stop, &remaining[1]);
        assert_eq!(nearest.distance, 3.0);
    }

    #[rstest]
    #[tokio::test]
    async fn queries_every_candidate_once_in_order() {
        let remaining = line_stops(&[4.0, 2.0]);
        let oracle = ScriptedOracle::new([Ok(vec![4.0, 2.0])]);

        find_nearest(&oracle, LineOracle::point(0.0), &remaining)
            .await
            .expect("nearest stop");

        let calls = oracle.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].origin(), LineOracle::point(0.0));
        assert_eq!(
            calls[0].candidates(),
            &[LineOracle::point(4.0), LineOracle::point(2.0)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn empty_candidates_fail_without_querying() {
        let oracle = ScriptedOracle::new([]);

        let err = find_nearest(&oracle, LineOracle::point(0.0), &[])
            .await
            .expect_err("empty candidates");

        assert_eq!(err, SequenceError::EmptyCandidateSet);
        assert!(oracle.calls().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn oracle_failure_is_a_measurement_error() {
        let remaining = line_stops(&[1.0]);
        let oracle = ScriptedOracle::new([Err(MeasurementError::ServiceError {
            code: "OVER_QUERY_LIMIT".to_owned(),
            message: String::new(),
        })]);

        let err = find_nearest(&oracle, LineOracle::point(0.0), &remaining)
            .await
            .expect_err("oracle failure");

        assert!(matches!(
            err,
            SequenceError::Measurement(MeasurementError::ServiceError { .. })
        ));
    }

    #[rstest]
    #[case(vec![1.0, 2.0])]
    #[case(vec![1.0, 2.0, 3.0, 4.0])]
    #[tokio::test]
    async fn wrong_result_length_is_rejected(#[case] distances: Vec<f64>) {
        let remaining = line_stops(&[1.0, 2.0, 3.0]);
        let actual = distances.len();
        let oracle = ScriptedOracle::new([Ok(distances)]);

        let err = find_nearest(&oracle, LineOracle::point(0.0), &remaining)
            .await
            .expect_err("length mismatch");

        assert_eq!(
            err,
            SequenceError::ResultLengthMismatch {
                expected: 3,
                actual,
            }
        );
    }
}
