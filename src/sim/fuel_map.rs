use rand::Rng;

use crate::domain::{FuelModel, LandCoverPolygon};
use crate::geometry::Coordinate;

/// A named rectangle of uniform fuel, bounds exclusive
#[derive(Debug, Clone, Copy)]
pub struct FuelRegion {
    pub name: &'static str,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub fuel: FuelModel,
}

impl FuelRegion {
    pub fn contains(&self, point: Coordinate) -> bool {
        point.lon() > self.min_lon
            && point.lon() < self.max_lon
            && point.lat() > self.min_lat
            && point.lat() < self.max_lat
    }
}

const fn region(
    name: &'static str,
    (min_lon, max_lon): (f64, f64),
    (min_lat, max_lat): (f64, f64),
    fuel: FuelModel,
) -> FuelRegion {
    FuelRegion {
        name,
        min_lon,
        max_lon,
        min_lat,
        max_lat,
        fuel,
    }
}

/// Coarse Northern California land cover, checked in order
///
/// Regions overlap; the first match wins, so urban cores come before the
/// bay and the bay before the surrounding valley and ranges.
pub const CALIFORNIA_REGIONS: &[FuelRegion] = &[
    region("Sacramento", (-121.55, -121.40), (38.50, 38.65), FuelModel::Built),
    region("East Bay", (-122.30, -122.20), (37.80, 37.90), FuelModel::Built),
    region("SF downtown", (-122.43, -122.38), (37.76, 37.80), FuelModel::Built),
    region("Sierra Nevada", (-121.0, -119.5), (38.0, 40.0), FuelModel::Trees),
    region("SF Bay", (-122.50, -122.15), (37.5, 38.0), FuelModel::Water),
    region("Lake Tahoe", (-120.20, -119.95), (38.90, 39.25), FuelModel::Water),
    region("Central Valley", (-122.0, -121.0), (37.0, 39.0), FuelModel::Grass),
    region("Coast ranges", (-122.8, -122.0), (37.8, 39.5), FuelModel::Shrub),
    region("Central Valley farms", (-121.8, -121.0), (36.5, 39.5), FuelModel::Crops),
];

/// Picked at random where nothing else is known
pub const FALLBACK_MIX: [FuelModel; 4] = [
    FuelModel::Trees,
    FuelModel::Grass,
    FuelModel::Shrub,
    FuelModel::Rangeland,
];

/// Fuel lookup: mapped land cover first, then fixed regions, then a random mix
#[derive(Debug, Clone)]
pub struct FuelMap {
    land_cover: Vec<LandCoverPolygon>,
    regions: Vec<FuelRegion>,
}

impl Default for FuelMap {
    fn default() -> Self {
        Self {
            land_cover: Vec::new(),
            regions: CALIFORNIA_REGIONS.to_vec(),
        }
    }
}

impl FuelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map with no built-in regions, for places outside California
    pub fn without_regions() -> Self {
        Self {
            land_cover: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Add mapped polygons; later polygons take precedence over earlier ones
    pub fn add_land_cover(&mut self, polygons: impl IntoIterator<Item = LandCoverPolygon>) {
        self.land_cover
            .extend(polygons.into_iter().filter(LandCoverPolygon::is_valid));
    }

    pub fn land_cover_len(&self) -> usize {
        self.land_cover.len()
    }

    /// Fuel at a point without falling back to the random mix
    pub fn known_fuel_at(&self, point: Coordinate) -> Option<FuelModel> {
        if let Some(polygon) = self.land_cover.iter().rev().find(|p| p.contains(point)) {
            return Some(polygon.fuel);
        }
        self.regions
            .iter()
            .find(|r| r.contains(point))
            .map(|r| r.fuel)
    }

    pub fn fuel_at<R: Rng + ?Sized>(&self, point: Coordinate, rng: &mut R) -> FuelModel {
        self.known_fuel_at(point)
            .unwrap_or_else(|| FALLBACK_MIX[rng.random_range(0..FALLBACK_MIX.len())])
    }
}
