//! Planar polygon helpers over (longitude, latitude) pairs.
//!
//! Everything here treats degrees as flat Cartesian units. That is fine for
//! proximity tests and rough areas over a few kilometres, and increasingly
//! wrong for large shapes or near the poles.

use super::{BoundingBox, Coordinate};

/// Kilometres per degree of latitude, and per degree of longitude at the equator
const KM_PER_DEGREE: f64 = 111.0;

/// Euclidean distance between two coordinates, in degrees
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Shoelace area of an implicitly closed polygon, in square degrees
///
/// Returns 0 for fewer than 3 vertices.
pub fn polygon_area_degrees(polygon: &[Coordinate]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mut total = 0.0;
    for (i, current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        total += current.x * next.y - next.x * current.y;
    }

    total.abs() / 2.0
}

/// Approximate polygon area in square kilometres
///
/// Scales the square-degree area by 111 km per degree of latitude and
/// 111 km * cos(mean latitude) per degree of longitude.
pub fn polygon_area_square_km(polygon: &[Coordinate]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }

    let mean_lat = polygon.iter().map(|c| c.y).sum::<f64>() / polygon.len() as f64;
    let km_per_degree_lon = KM_PER_DEGREE * mean_lat.to_radians().cos();

    KM_PER_DEGREE * km_per_degree_lon * polygon_area_degrees(polygon)
}

/// Ray-casting containment test
///
/// Self-intersecting input gets the plain even-odd answer.
pub fn point_in_polygon(point: Coordinate, polygon: &[Coordinate]) -> bool {
    let Coordinate { x, y } = point;
    let mut inside = false;

    let mut j = match polygon.len() {
        0 => return false,
        n => n - 1,
    };
    for (i, pi) in polygon.iter().enumerate() {
        let pj = polygon[j];
        let crosses = (pi.y > y) != (pj.y > y)
            && x < (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Axis-aligned bounds of the polygon's vertices, or `None` if it is empty
pub fn bounding_box(polygon: &[Coordinate]) -> Option<BoundingBox> {
    BoundingBox::from_points(polygon)
}
