use crate::api::OverpassResponse;
use crate::domain::{LandCoverPolygon, fuel_from_osm_tags};
use crate::geometry::Coordinate;
use std::collections::HashMap;

fn build_node_lookup(response: &OverpassResponse) -> HashMap<u64, Coordinate> {
    response
        .elements
        .iter()
        .filter(|e| e.type_ == "node")
        .filter_map(|e| {
            let lat = e.lat?;
            let lon = e.lon?;
            Some((e.id, Coordinate::new(lon, lat)))
        })
        .collect()
}

fn resolve_way_to_points(node_refs: &[u64], nodes: &HashMap<u64, Coordinate>) -> Vec<Coordinate> {
    node_refs
        .iter()
        .filter_map(|id| nodes.get(id).copied())
        .collect()
}

fn is_closed_way(points: &[Coordinate]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 3 => {
            (first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9
        }
        _ => false,
    }
}

/// Parse an Overpass response into land cover polygons
///
/// # Algorithm
/// 1. Build node_id → coordinate lookup from all node elements
/// 2. For each closed way whose tags map to a fuel model:
///    - Resolve node refs to coordinates
///    - Drop the repeated closing vertex
pub fn parse_land_cover(response: &OverpassResponse) -> Vec<LandCoverPolygon> {
    let nodes = build_node_lookup(response);
    let mut polygons = Vec::new();

    for element in &response.elements {
        if element.type_ != "way" {
            continue;
        }

        let Some(fuel) = element.tags.as_ref().and_then(fuel_from_osm_tags) else {
            continue;
        };

        let Some(node_refs) = &element.nodes else {
            continue;
        };

        let mut points = resolve_way_to_points(node_refs, &nodes);

        // closed ring with at least a triangle plus the closing node
        if !is_closed_way(&points) || points.len() < 4 {
            continue;
        }
        points.pop();

        polygons.push(LandCoverPolygon::new(fuel, points));
    }

    polygons
}
