use geo::Point;
use serde::{Deserialize, Serialize};

/// A query position together with how many nearest locations are wanted
/// from each category.
///
/// The count is expected to be positive; loaders reject zero before a
/// `QueryPoint` is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPoint {
    /// Longitude (x) and latitude (y) in degrees
    pub point: Point<f64>,
    /// Number of nearest locations requested per category
    pub count: usize,
}

impl QueryPoint {
    pub fn new(point: Point<f64>, count: usize) -> Self {
        Self { point, count }
    }

    pub fn point(&self) -> &Point<f64> {
        &self.point
    }

    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_accessors() {
        let q = QueryPoint::new(Point::new(-96.8, 32.78), 5);
        assert_eq!(q.latitude(), 32.78);
        assert_eq!(q.longitude(), -96.8);
        assert_eq!(q.count(), 5);
    }
}
