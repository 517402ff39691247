//! GeoJSON and JSON summaries of a session.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::Path;

use crate::geometry::Coordinate;
use crate::session::Session;
use crate::sim::{Intensity, SimulationStatus};

fn position(c: Coordinate) -> Value {
    json!([c.lon(), c.lat()])
}

fn point_feature(c: Coordinate, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": position(c) },
        "properties": properties,
    })
}

/// Everything in the session as a GeoJSON FeatureCollection
///
/// Each feature carries a `kind` property: location, boundary, camera,
/// ignition, spot or cell.
pub fn session_to_geojson(session: &Session) -> Value {
    let mut features = Vec::new();

    if let Some(location) = session.location() {
        features.push(point_feature(
            location.position,
            json!({ "kind": "location", "label": location.label }),
        ));
    }

    if let Some(boundary) = session.boundary() {
        let ring: Vec<Value> = boundary.closed_ring().into_iter().map(position).collect();
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [ring] },
            "properties": {
                "kind": "boundary",
                "area_sq_km": boundary.area_sq_km(),
            },
        }));
    }

    for camera in session.cameras() {
        features.push(point_feature(
            camera.position,
            json!({ "kind": "camera", "id": camera.id, "radius_km": camera.radius_km }),
        ));
    }

    match session.simulation() {
        Some(sim) => {
            features.push(point_feature(
                sim.ignition(),
                json!({
                    "kind": "ignition",
                    "fuel": sim.fuel().name(),
                    "fuel_color": sim.fuel().color(),
                }),
            ));
            for spot in sim.spots() {
                features.push(point_feature(
                    spot.position,
                    json!({ "kind": "spot", "size": spot.current_size() }),
                ));
            }
            // the first cell is the ignition point itself
            for cell in sim.cells().iter().skip(1) {
                features.push(point_feature(
                    cell.position,
                    json!({
                        "kind": "cell",
                        "fuel": cell.fuel.name(),
                        "ignited_at_minutes": cell.ignited_at_minutes,
                    }),
                ));
            }
        }
        None => {
            if let Some(ignition) = session.ignition() {
                features.push(point_feature(ignition, json!({ "kind": "ignition" })));
            }
        }
    }

    json!({ "type": "FeatureCollection", "features": features })
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub fuel: String,
    pub status: SimulationStatus,
    pub elapsed_minutes: f64,
    pub spread_m: f64,
    pub burned_hectares: f64,
    pub intensity: Intensity,
    pub spots: usize,
    pub cells: usize,
    /// Ids of cameras whose coverage reaches the ignition point
    pub detecting_cameras: Vec<String>,
}

/// Headline numbers of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub location: Option<String>,
    pub boundary_area_sq_km: Option<f64>,
    pub cameras: Vec<String>,
    pub simulation: Option<SimulationSummary>,
}

impl SessionSummary {
    pub fn from_session(session: &Session) -> Self {
        let simulation = session.simulation().map(|sim| SimulationSummary {
            fuel: sim.fuel().name().to_string(),
            status: sim.status(),
            elapsed_minutes: sim.elapsed_minutes(),
            spread_m: sim.spread_m(),
            burned_hectares: sim.burned_hectares(),
            intensity: sim.intensity(),
            spots: sim.spots().len(),
            cells: sim.cells().len(),
            detecting_cameras: session
                .cameras_covering(sim.ignition())
                .map(|c| c.id.clone())
                .collect(),
        });

        Self {
            location: session.location().map(|l| l.label.clone()),
            boundary_area_sq_km: session.boundary().map(|b| b.area_sq_km()),
            cameras: session.cameras().iter().map(|c| c.id.clone()).collect(),
            simulation,
        }
    }
}

/// Write any serializable value as pretty-printed JSON
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    std::fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    fn scenario() -> Session {
        let mut rng = StdRng::seed_from_u64(21);
        let mut session = Session::default();
        session.set_location(Coordinate::new(-121.5, 37.5), "Central Valley");
        for p in [
            Coordinate::new(-121.55, 37.45),
            Coordinate::new(-121.45, 37.45),
            Coordinate::new(-121.45, 37.55),
            Coordinate::new(-121.55, 37.55),
        ] {
            session.add_boundary_point(p).unwrap();
        }
        session.complete_boundary().unwrap();
        session.add_cameras(&mut rng).unwrap();
        session.place_ignition(Coordinate::new(-121.5, 37.5)).unwrap();
        session.start_simulation(&mut rng).unwrap();
        for _ in 0..4 {
            session.tick(&mut rng).unwrap();
        }
        session
    }

    fn kinds(collection: &Value) -> Vec<String> {
        collection["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["properties"]["kind"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_geojson_structure() {
        let session = scenario();
        let collection = session_to_geojson(&session);
        assert_eq!(collection["type"], "FeatureCollection");

        let kinds = kinds(&collection);
        assert_eq!(kinds.iter().filter(|k| *k == "location").count(), 1);
        assert_eq!(kinds.iter().filter(|k| *k == "boundary").count(), 1);
        assert_eq!(kinds.iter().filter(|k| *k == "ignition").count(), 1);
        assert_eq!(
            kinds.iter().filter(|k| *k == "camera").count(),
            session.cameras().len()
        );
        assert_eq!(kinds.iter().filter(|k| *k == "spot").count(), 4 * 6);

        let boundary = &collection["features"][1];
        let ring = boundary["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_geojson_pending_ignition() {
        let mut session = Session::default();
        session.place_ignition(Coordinate::new(1.0, 2.0)).unwrap();
        let collection = session_to_geojson(&session);
        assert_eq!(kinds(&collection), vec!["ignition"]);
        assert_eq!(
            collection["features"][0]["geometry"]["coordinates"],
            json!([1.0, 2.0])
        );
    }

    #[test]
    fn test_summary() {
        let session = scenario();
        let summary = SessionSummary::from_session(&session);
        assert_eq!(summary.location.as_deref(), Some("Central Valley"));
        assert!(summary.boundary_area_sq_km.unwrap() > 90.0);

        let sim = summary.simulation.unwrap();
        assert_eq!(sim.fuel, "Grass");
        assert_eq!(sim.elapsed_minutes, 20.0);
        assert_eq!(sim.spots, 24);
    }

    #[test]
    fn test_write_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenario.geojson");
        let session = scenario();

        write_json(&path, &session_to_geojson(&session)).unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["type"], "FeatureCollection");
    }
}
