pub mod bounds;
pub mod polygon;
pub mod projection;
pub mod simplify;

pub use bounds::BoundingBox;
pub use polygon::{
    bounding_box, distance, point_in_polygon, polygon_area_degrees, polygon_area_square_km,
};
pub use projection::{Projector, meters_per_pixel, radius_in_pixels};
pub use simplify::simplify_boundary;

use serde::{Deserialize, Serialize};

/// A WGS84 position as (longitude, latitude) in decimal degrees.
///
/// `x` is longitude and `y` is latitude, matching GeoJSON axis order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lon(&self) -> f64 {
        self.x
    }

    pub fn lat(&self) -> f64 {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::coord! { x: c.x, y: c.y }
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self {
        Self { x: c.x, y: c.y }
    }
}

/// Parses "lon,lat"
impl std::str::FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lon,lat\", got {:?}", s))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|e| format!("bad longitude {:?}: {}", lon.trim(), e))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("bad latitude {:?}: {}", lat.trim(), e))?;

        let coord = Coordinate::new(lon, lat);
        if !coord.is_finite() {
            return Err(format!("coordinate {:?} is not finite", s));
        }
        Ok(coord)
    }
}
