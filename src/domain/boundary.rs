use serde::Serialize;

use crate::error::SessionError;
use crate::geometry::{
    BoundingBox, Coordinate, point_in_polygon, polygon_area_square_km, simplify_boundary,
};

/// Points collected while a boundary is being drawn
#[derive(Debug, Clone, Default)]
pub struct BoundaryDraft {
    points: Vec<Coordinate>,
}

impl BoundaryDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Coordinate) -> Result<(), SessionError> {
        if !point.is_finite() {
            return Err(SessionError::NonFiniteCoordinate {
                x: point.x,
                y: point.y,
            });
        }
        self.points.push(point);
        Ok(())
    }

    /// Drop the most recent point
    pub fn undo(&mut self) -> Option<Coordinate> {
        self.points.pop()
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The pending edge from the last point back to the first, once a ring can close
    pub fn closing_edge(&self) -> Option<(Coordinate, Coordinate)> {
        if self.points.len() < 3 {
            return None;
        }
        Some((*self.points.last()?, *self.points.first()?))
    }

    /// Close the ring, optionally simplifying it first
    pub fn complete(self, simplify_epsilon: f64) -> Result<Boundary, SessionError> {
        let points = simplify_boundary(&self.points, simplify_epsilon);
        Boundary::new(points)
    }
}

/// A closed region of interest with its area and extent precomputed
#[derive(Debug, Clone, Serialize)]
pub struct Boundary {
    polygon: Vec<Coordinate>,
    area_sq_km: f64,
    bounds: BoundingBox,
}

impl Boundary {
    pub fn new(polygon: Vec<Coordinate>) -> Result<Self, SessionError> {
        if polygon.len() < 3 {
            return Err(SessionError::TooFewBoundaryPoints(polygon.len()));
        }
        if let Some(bad) = polygon.iter().find(|c| !c.is_finite()) {
            return Err(SessionError::NonFiniteCoordinate { x: bad.x, y: bad.y });
        }

        let bounds =
            BoundingBox::from_points(&polygon).ok_or(SessionError::TooFewBoundaryPoints(0))?;
        let area_sq_km = polygon_area_square_km(&polygon);

        Ok(Self {
            polygon,
            area_sq_km,
            bounds,
        })
    }

    pub fn polygon(&self) -> &[Coordinate] {
        &self.polygon
    }

    pub fn area_sq_km(&self) -> f64 {
        self.area_sq_km
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        self.bounds.contains(point) && point_in_polygon(point, &self.polygon)
    }

    /// Closed ring with the first vertex repeated, as GeoJSON wants it
    pub fn closed_ring(&self) -> Vec<Coordinate> {
        let mut ring = self.polygon.clone();
        ring.extend(self.polygon.first().copied());
        ring
    }
}
