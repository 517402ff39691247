use super::Coordinate;

/// Metres per degree at the equator
const METERS_PER_DEGREE: f64 = 111320.0;

/// Web Mercator ground resolution at zoom 0 on the equator, metres per pixel
const EQUATOR_METERS_PER_PIXEL: f64 = 156543.03392;

/// Equirectangular projection from WGS84 to local metres
///
/// Uses approximation suitable for scenario-scale areas:
/// - x = (lon - center_lon) * cos(center_lat) * 111320
/// - y = (lat - center_lat) * 111320
#[derive(Debug, Clone)]
pub struct Projector {
    center: Coordinate,
    cos_lat: f64,
}

impl Projector {
    /// Create a new projector centered at the given coordinate
    pub fn new(center: Coordinate) -> Self {
        Self {
            center,
            cos_lat: center.lat().to_radians().cos(),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    /// Project a coordinate to local metres
    ///
    /// # Returns
    /// * (x, y) in metres, east and north of the projection center
    pub fn project(&self, point: Coordinate) -> (f64, f64) {
        let x = (point.lon() - self.center.lon()) * self.cos_lat * METERS_PER_DEGREE;
        let y = (point.lat() - self.center.lat()) * METERS_PER_DEGREE;
        (x, y)
    }

    /// Inverse of [`Projector::project`]
    pub fn unproject(&self, x: f64, y: f64) -> Coordinate {
        Coordinate::new(
            self.center.lon() + x / (self.cos_lat * METERS_PER_DEGREE),
            self.center.lat() + y / METERS_PER_DEGREE,
        )
    }

    /// Point `meters` away from the center along `bearing` (radians, 0 = east, counter-clockwise)
    pub fn offset(&self, bearing: f64, meters: f64) -> Coordinate {
        self.unproject(bearing.cos() * meters, bearing.sin() * meters)
    }

    /// Planar distance in kilometres from the projection center
    pub fn distance_km(&self, point: Coordinate) -> f64 {
        let (x, y) = self.project(point);
        (x * x + y * y).sqrt() / 1000.0
    }
}

/// Web Mercator ground resolution at the given latitude and zoom
pub fn meters_per_pixel(lat: f64, zoom: f64) -> f64 {
    EQUATOR_METERS_PER_PIXEL * lat.to_radians().cos() / 2f64.powf(zoom)
}

/// On-screen radius of a ground circle, used to size coverage discs
pub fn radius_in_pixels(radius_km: f64, lat: f64, zoom: f64) -> f64 {
    radius_km * 1000.0 / meters_per_pixel(lat, zoom)
}
