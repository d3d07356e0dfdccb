//! Great-circle distance oracle needing no network access.

use async_trait::async_trait;
use geo::{Distance, Haversine, Point};

use super::error::MeasurementError;
use super::oracle::{DistanceOracle, DistanceQuery, Distances};

/// Haversine distance in metres between the origin and each candidate.
///
/// Useful offline and in tests. It ignores the road network, so orderings
/// may differ from those a routing service would produce.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLineOracle;

#[async_trait]
impl DistanceOracle for StraightLineOracle {
    async fn measure(&self, query: &DistanceQuery) -> Result<Distances, MeasurementError> {
        let origin = Point::from(query.origin());
        Ok(query
            .candidates()
            .iter()
            .map(|candidate| Haversine.distance(origin, Point::from(*candidate)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn measures_one_degree_of_latitude() {
        let query = DistanceQuery::new(
            Coordinate::new(0.0, 0.0),
            vec![Coordinate::new(1.0, 0.0), Coordinate::new(0.0, 0.0)],
        )
        .expect("non-empty query");

        let distances = StraightLineOracle
            .measure(&query)
            .await
            .expect("straight-line distances");

        assert_eq!(distances.len(), 2);
        let one_degree = distances.first().copied().expect("first distance");
        assert!((111_000.0..111_400.0).contains(&one_degree), "{one_degree}");
        assert_eq!(distances.get(1).copied(), Some(0.0));
    }
}
