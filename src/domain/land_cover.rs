use std::collections::HashMap;

use super::FuelModel;
use crate::geometry::{BoundingBox, Coordinate, point_in_polygon};

/// Classify OSM land cover tags into a fuel model
pub fn fuel_from_osm_tags(tags: &HashMap<String, String>) -> Option<FuelModel> {
    if let Some(natural) = tags.get("natural") {
        let fuel = match natural.as_str() {
            "water" | "wetland" | "bay" => Some(FuelModel::Water),
            "wood" => Some(FuelModel::Trees),
            "grassland" => Some(FuelModel::Grass),
            "scrub" | "heath" => Some(FuelModel::Shrub),
            "bare_rock" | "sand" | "scree" | "beach" => Some(FuelModel::Bare),
            "glacier" => Some(FuelModel::SnowIce),
            _ => None,
        };
        if fuel.is_some() {
            return fuel;
        }
    }

    if tags.get("waterway").map(String::as_str) == Some("riverbank") {
        return Some(FuelModel::Water);
    }

    match tags.get("landuse")?.as_str() {
        "reservoir" | "basin" => Some(FuelModel::Water),
        "forest" => Some(FuelModel::Trees),
        "grass" | "meadow" => Some(FuelModel::Grass),
        "farmland" | "orchard" | "vineyard" => Some(FuelModel::Crops),
        "residential" | "commercial" | "industrial" | "retail" => Some(FuelModel::Built),
        _ => None,
    }
}

/// A mapped area with a known fuel model
#[derive(Debug, Clone)]
pub struct LandCoverPolygon {
    pub fuel: FuelModel,
    pub outer: Vec<Coordinate>,
    bounds: Option<BoundingBox>,
}

impl LandCoverPolygon {
    pub fn new(fuel: FuelModel, outer: Vec<Coordinate>) -> Self {
        let bounds = BoundingBox::from_points(&outer);
        Self {
            fuel,
            outer,
            bounds,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.outer.len() >= 3
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        match &self.bounds {
            Some(b) => b.contains(point) && point_in_polygon(point, &self.outer),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fuel_from_osm_tags() {
        assert_eq!(
            fuel_from_osm_tags(&tags(&[("natural", "water")])),
            Some(FuelModel::Water)
        );
        assert_eq!(
            fuel_from_osm_tags(&tags(&[("landuse", "forest")])),
            Some(FuelModel::Trees)
        );
        assert_eq!(
            fuel_from_osm_tags(&tags(&[("landuse", "vineyard")])),
            Some(FuelModel::Crops)
        );
        assert_eq!(
            fuel_from_osm_tags(&tags(&[("waterway", "riverbank")])),
            Some(FuelModel::Water)
        );
        // an unknown natural tag falls through to landuse
        assert_eq!(
            fuel_from_osm_tags(&tags(&[("natural", "tree_row"), ("landuse", "meadow")])),
            Some(FuelModel::Grass)
        );
        assert_eq!(fuel_from_osm_tags(&tags(&[("highway", "primary")])), None);
    }

    #[test]
    fn test_land_cover_contains() {
        let lake = LandCoverPolygon::new(
            FuelModel::Water,
            vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(1.0, 0.0),
                Coordinate::new(1.0, 1.0),
                Coordinate::new(0.0, 1.0),
            ],
        );
        assert!(lake.is_valid());
        assert!(lake.contains(Coordinate::new(0.5, 0.5)));
        assert!(!lake.contains(Coordinate::new(1.5, 0.5)));

        let empty = LandCoverPolygon::new(FuelModel::Water, vec![]);
        assert!(!empty.contains(Coordinate::new(0.0, 0.0)));
    }
}
