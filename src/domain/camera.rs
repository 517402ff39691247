use serde::Serialize;

use crate::geometry::{Coordinate, Projector};

/// A simulated camera marker with a fixed coverage disc
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    /// Four-digit display id
    pub id: String,
    pub position: Coordinate,
    pub radius_km: f64,
}

impl Camera {
    pub fn new(id: impl Into<String>, position: Coordinate, radius_km: f64) -> Self {
        Self {
            id: id.into(),
            position,
            radius_km,
        }
    }

    /// Whether `point` lies within the coverage disc (planar approximation)
    pub fn covers(&self, point: Coordinate) -> bool {
        Projector::new(self.position).distance_km(point) <= self.radius_km
    }
}
