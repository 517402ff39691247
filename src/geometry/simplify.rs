use geo::{LineString, Simplify};

use super::Coordinate;

/// Ramer-Douglas-Peucker simplification of a hand-drawn boundary
///
/// `epsilon` is in degrees; 0 disables simplification. The input is kept
/// as-is when it is too short to simplify or would collapse below a triangle.
pub fn simplify_boundary(points: &[Coordinate], epsilon: f64) -> Vec<Coordinate> {
    if epsilon <= 0.0 || points.len() < 5 {
        return points.to_vec();
    }

    // close the ring so the last edge takes part in the simplification
    let line: LineString<f64> = points
        .iter()
        .chain(points.first())
        .map(|&c| geo::Coord::from(c))
        .collect();

    let mut simplified: Vec<Coordinate> = line
        .simplify(&epsilon)
        .0
        .into_iter()
        .map(Coordinate::from)
        .collect();
    simplified.pop();

    if simplified.len() < 3 {
        return points.to_vec();
    }

    simplified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_simplify_short_input_untouched() {
        let points = vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0)];
        assert_eq!(simplify_boundary(&points, 0.5), points);
    }

    #[test]
    fn test_simplify_disabled() {
        let points: Vec<Coordinate> = (0..10).map(|i| c(i as f64, (i % 2) as f64)).collect();
        assert_eq!(simplify_boundary(&points, 0.0), points);
    }

    #[test]
    fn test_simplify_removes_collinear_jitter() {
        // square with extra near-collinear points on the bottom edge
        let points = vec![
            c(0.0, 0.0),
            c(0.25, 0.00001),
            c(0.5, -0.00001),
            c(0.75, 0.00001),
            c(1.0, 0.0),
            c(1.0, 1.0),
            c(0.0, 1.0),
        ];
        let result = simplify_boundary(&points, 0.001);
        assert_eq!(result.len(), 4);
        assert_eq!(result[0], c(0.0, 0.0));
    }
}
