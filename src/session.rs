//! Interactive scenario state: location, boundary, cameras and the fire.

use rand::Rng;

use crate::config::{CameraSettings, SimulationSettings};
use crate::domain::{Boundary, BoundaryDraft, Camera};
use crate::error::SessionError;
use crate::geometry::Coordinate;
use crate::sim::{FireSimulation, FuelMap, TickSummary, place_cameras};

/// A geocoded place the view is centred on
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub position: Coordinate,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    location: Option<Location>,
    draft: BoundaryDraft,
    boundary: Option<Boundary>,
    cameras: Vec<Camera>,
    ignition: Option<Coordinate>,
    simulation: Option<FireSimulation>,
    fuel_map: FuelMap,
    simulation_settings: SimulationSettings,
    camera_settings: CameraSettings,
    simplify_epsilon: f64,
}

impl Session {
    pub fn new(fuel_map: FuelMap) -> Self {
        Self {
            fuel_map,
            ..Self::default()
        }
    }

    pub fn with_simulation_settings(mut self, settings: SimulationSettings) -> Self {
        self.simulation_settings = settings;
        self
    }

    pub fn with_camera_settings(mut self, settings: CameraSettings) -> Self {
        self.camera_settings = settings;
        self
    }

    pub fn with_simplify_epsilon(mut self, epsilon: f64) -> Self {
        self.simplify_epsilon = epsilon;
        self
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn draft(&self) -> &BoundaryDraft {
        &self.draft
    }

    pub fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_ref()
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn ignition(&self) -> Option<Coordinate> {
        self.ignition
    }

    pub fn simulation(&self) -> Option<&FireSimulation> {
        self.simulation.as_ref()
    }

    pub fn fuel_map(&self) -> &FuelMap {
        &self.fuel_map
    }

    pub fn fuel_map_mut(&mut self) -> &mut FuelMap {
        &mut self.fuel_map
    }

    /// Replace the current search marker
    pub fn set_location(&mut self, position: Coordinate, label: impl Into<String>) {
        self.location = Some(Location {
            position,
            label: label.into(),
        });
    }

    /// Start or continue drawing; a completed boundary is discarded first
    pub fn add_boundary_point(&mut self, point: Coordinate) -> Result<(), SessionError> {
        if self.boundary.is_some() {
            self.clear_boundary();
        }
        self.draft.push(point)
    }

    /// Close the drawn ring; the draft is kept when it is too short
    pub fn complete_boundary(&mut self) -> Result<&Boundary, SessionError> {
        let draft = std::mem::take(&mut self.draft);
        match draft.clone().complete(self.simplify_epsilon) {
            Ok(boundary) => Ok(&*self.boundary.insert(boundary)),
            Err(e) => {
                self.draft = draft;
                Err(e)
            }
        }
    }

    /// Remove the boundary, any draft and the cameras placed inside it
    pub fn clear_boundary(&mut self) {
        self.draft = BoundaryDraft::new();
        self.boundary = None;
        self.clear_cameras();
    }

    /// Scatter a fresh set of cameras inside the boundary
    pub fn add_cameras<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&[Camera], SessionError> {
        let boundary = self.boundary.as_ref().ok_or(SessionError::NoBoundary)?;
        self.cameras = place_cameras(boundary, &self.camera_settings, rng);
        Ok(&self.cameras)
    }

    pub fn clear_cameras(&mut self) {
        self.cameras.clear();
    }

    /// Cameras whose coverage disc contains `point`
    pub fn cameras_covering(&self, point: Coordinate) -> impl Iterator<Item = &Camera> {
        self.cameras.iter().filter(move |c| c.covers(point))
    }

    /// Set the fire point, replacing any earlier one
    pub fn place_ignition(&mut self, point: Coordinate) -> Result<(), SessionError> {
        if !point.is_finite() {
            return Err(SessionError::NonFiniteCoordinate {
                x: point.x,
                y: point.y,
            });
        }
        self.ignition = Some(point);
        Ok(())
    }

    pub fn start_simulation<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&FireSimulation, SessionError> {
        if self.simulation.as_ref().is_some_and(FireSimulation::is_running) {
            return Err(SessionError::SimulationRunning);
        }
        let ignition = self.ignition.ok_or(SessionError::NoIgnitionPoint)?;

        let simulation = FireSimulation::ignite(
            ignition,
            &self.fuel_map,
            self.simulation_settings.clone(),
            rng,
        )?;
        Ok(&*self.simulation.insert(simulation))
    }

    /// Advance the running simulation by one configured tick
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TickSummary, SessionError> {
        let dt = self.simulation_settings.tick_minutes;
        self.tick_by(dt, rng)
    }

    pub fn tick_by<R: Rng + ?Sized>(
        &mut self,
        dt_minutes: f64,
        rng: &mut R,
    ) -> Result<TickSummary, SessionError> {
        let simulation = self.simulation.as_mut().ok_or(SessionError::NoSimulation)?;
        simulation.advance(dt_minutes, &self.fuel_map, rng)
    }

    /// Drop the fire and its ignition point
    pub fn reset_simulation(&mut self) {
        if let Some(simulation) = self.simulation.as_mut() {
            simulation.stop();
        }
        self.simulation = None;
        self.ignition = None;
    }

    /// Clear the fire, boundary and cameras; the location and fuel map stay
    pub fn reset(&mut self) {
        self.reset_simulation();
        self.clear_boundary();
    }
}
