use rand::Rng;
use serde::Serialize;

use super::Coordinate;

/// Axis-aligned bounding box in degrees (x = longitude, y = latitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create bounds from a set of points
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_x = f64::MAX;
        let mut max_x = f64::MIN;
        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;

        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Inclusive containment on all four edges
    pub fn contains(&self, point: Coordinate) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Uniformly sample a point inside the box
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Coordinate {
        Coordinate::new(
            self.min_x + rng.random::<f64>() * self.width(),
            self.min_y + rng.random::<f64>() * self.height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(0.5, 1.0),
        ];
        let bounds = BoundingBox::from_points(&points).unwrap();

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 1.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 2.0);
        assert_eq!(bounds.center(), Coordinate::new(0.5, 1.0));
    }

    #[test]
    fn test_width_height() {
        let bounds =
            BoundingBox::from_points(&[Coordinate::new(0.0, 0.0), Coordinate::new(-1.0, 3.0)])
                .unwrap();
        assert_eq!(bounds.width(), 1.0);
        assert_eq!(bounds.height(), 3.0);
    }

    #[test]
    fn test_sample_stays_inside() {
        let bounds = BoundingBox {
            min_x: -122.5,
            max_x: -122.3,
            min_y: 37.7,
            max_y: 37.8,
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(bounds.contains(bounds.sample(&mut rng)));
        }
    }
}
