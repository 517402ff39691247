//! Discrete-time fire spread around a single ignition point.
//!
//! The model is illustrative: a circular front advancing at the ignition
//! fuel's growth rate, visual spots scattered inside the front, and a
//! coarse random walk of burned cells gated by each cell's burn rate.

use std::collections::HashSet;
use std::f64::consts::{PI, TAU};

use rand::Rng;
use serde::Serialize;

use super::FuelMap;
use crate::config::SimulationSettings;
use crate::domain::FuelModel;
use crate::error::SessionError;
use crate::geometry::{Coordinate, Projector};

/// Square metres per hectare
const SQ_METERS_PER_HECTARE: f64 = 10_000.0;

/// Neighbour offsets for cell spread, counter-clockwise from east
const DIRECTIONS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Intensity {
    Low,
    Moderate,
    High,
    Extreme,
}

impl Intensity {
    pub fn from_hectares(burned: f64) -> Self {
        if burned > 15.0 {
            Intensity::Extreme
        } else if burned > 5.0 {
            Intensity::High
        } else if burned > 1.0 {
            Intensity::Moderate
        } else {
            Intensity::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Moderate => "Moderate",
            Intensity::High => "High",
            Intensity::Extreme => "Extreme",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Intensity::Low => "#FFC107",
            Intensity::Moderate => "#FF9800",
            Intensity::High => "#FF5722",
            Intensity::Extreme => "#F44336",
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            Intensity::Low => 0.4,
            Intensity::Moderate => 0.5,
            Intensity::High => 0.6,
            Intensity::Extreme => 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationStatus {
    Running,
    /// Reached the time or area limit
    Complete,
    /// Halted by the caller
    Stopped,
}

/// A visual ember inside the fire front
#[derive(Debug, Clone, Serialize)]
pub struct FireSpot {
    pub position: Coordinate,
    pub size: f64,
    pub growth: f64,
    pub max_growth: f64,
    pub grow_rate: f64,
}

impl FireSpot {
    pub fn current_size(&self) -> f64 {
        self.size + self.growth
    }

    pub fn is_growing(&self) -> bool {
        self.growth <= self.max_growth
    }

    fn grow(&mut self, ticks: f64) {
        if self.is_growing() {
            self.growth += self.grow_rate * ticks;
        }
    }
}

/// A burned grid cell reached by cell spread
#[derive(Debug, Clone, Serialize)]
pub struct FireCell {
    pub position: Coordinate,
    pub fuel: FuelModel,
    pub ignited_at_minutes: f64,
}

/// What changed during one [`FireSimulation::advance`] call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSummary {
    pub elapsed_minutes: f64,
    pub spread_m: f64,
    pub burned_hectares: f64,
    pub intensity: Intensity,
    pub new_spots: usize,
    pub new_cells: usize,
    pub status: SimulationStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct FireSimulation {
    ignition: Coordinate,
    fuel: FuelModel,
    elapsed_minutes: f64,
    spread_m: f64,
    burned_hectares: f64,
    intensity: Intensity,
    status: SimulationStatus,
    spots: Vec<FireSpot>,
    cells: Vec<FireCell>,
    #[serde(skip)]
    burned: HashSet<String>,
    #[serde(skip)]
    settings: SimulationSettings,
    #[serde(skip)]
    projector: Projector,
}

fn cell_key(point: Coordinate) -> String {
    format!("{:.6},{:.6}", point.lon(), point.lat())
}

impl FireSimulation {
    /// Start a fire at `point`, sampling the fuel there
    ///
    /// Fails when the settings carry a limit the run could never reach.
    pub fn ignite<R: Rng + ?Sized>(
        point: Coordinate,
        fuel_map: &FuelMap,
        settings: SimulationSettings,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        settings.validate()?;
        let fuel = fuel_map.fuel_at(point, rng);

        let mut burned = HashSet::new();
        burned.insert(cell_key(point));

        Ok(Self {
            ignition: point,
            fuel,
            elapsed_minutes: 0.0,
            spread_m: 0.0,
            burned_hectares: 0.0,
            intensity: Intensity::Low,
            status: SimulationStatus::Running,
            spots: Vec::new(),
            cells: vec![FireCell {
                position: point,
                fuel,
                ignited_at_minutes: 0.0,
            }],
            burned,
            settings,
            projector: Projector::new(point),
        })
    }

    pub fn ignition(&self) -> Coordinate {
        self.ignition
    }

    pub fn fuel(&self) -> FuelModel {
        self.fuel
    }

    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed_minutes
    }

    pub fn spread_m(&self) -> f64 {
        self.spread_m
    }

    pub fn burned_hectares(&self) -> f64 {
        self.burned_hectares
    }

    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SimulationStatus::Running
    }

    pub fn spots(&self) -> &[FireSpot] {
        &self.spots
    }

    pub fn cells(&self) -> &[FireCell] {
        &self.cells
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            self.status = SimulationStatus::Stopped;
        }
    }

    fn summary(&self, new_spots: usize, new_cells: usize) -> TickSummary {
        TickSummary {
            elapsed_minutes: self.elapsed_minutes,
            spread_m: self.spread_m,
            burned_hectares: self.burned_hectares,
            intensity: self.intensity,
            new_spots,
            new_cells,
            status: self.status,
        }
    }

    /// Advance the fire by `dt_minutes` of simulated time
    ///
    /// A finished or stopped simulation is left untouched.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        dt_minutes: f64,
        fuel_map: &FuelMap,
        rng: &mut R,
    ) -> Result<TickSummary, SessionError> {
        if !(dt_minutes > 0.0 && dt_minutes.is_finite()) {
            return Err(SessionError::InvalidTick(dt_minutes));
        }
        if !self.is_running() {
            return Ok(self.summary(0, 0));
        }

        self.elapsed_minutes += dt_minutes;
        self.spread_m = self.fuel.growth_rate() * self.elapsed_minutes;
        self.burned_hectares = PI * self.spread_m.powi(2) / SQ_METERS_PER_HECTARE;

        // spot growth is defined per nominal tick
        let ticks = if self.settings.tick_minutes > 0.0 {
            dt_minutes / self.settings.tick_minutes
        } else {
            1.0
        };
        for spot in &mut self.spots {
            spot.grow(ticks);
        }

        let new_spots = if self.fuel.is_burnable() && self.spread_m > 0.0 {
            self.spawn_spots(rng)
        } else {
            0
        };

        let new_cells = if self.settings.cell_spread {
            self.expand_cells(fuel_map, rng)
        } else {
            0
        };

        self.intensity = Intensity::from_hectares(self.burned_hectares);

        if self.elapsed_minutes >= self.settings.max_minutes
            || self.burned_hectares >= self.settings.max_hectares
        {
            self.status = SimulationStatus::Complete;
        }

        Ok(self.summary(new_spots, new_cells))
    }

    /// Run ticks of the configured length until the simulation stops
    pub fn run_to_completion<R: Rng + ?Sized>(
        &mut self,
        fuel_map: &FuelMap,
        rng: &mut R,
    ) -> Result<Vec<TickSummary>, SessionError> {
        let dt = self.settings.tick_minutes;
        let mut ticks = Vec::new();
        while self.is_running() {
            ticks.push(self.advance(dt, fuel_map, rng)?);
        }
        Ok(ticks)
    }

    fn spawn_spots<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let profile = self.fuel.spot_profile();
        let count = self.fuel.spots_per_tick();

        for _ in 0..count {
            let bearing = rng.random::<f64>() * TAU;
            let factor = profile.min_distance_factor
                + rng.random::<f64>() * (profile.max_distance_factor - profile.min_distance_factor);
            let position = self.projector.offset(bearing, self.spread_m * factor);

            let size = profile.min_size + rng.random::<f64>() * (profile.max_size - profile.min_size);
            let max_growth = 30.0 + rng.random::<f64>() * 20.0;

            self.spots.push(FireSpot {
                position,
                size,
                growth: 0.0,
                max_growth,
                grow_rate: profile.grow_rate,
            });
        }

        count
    }

    fn expand_cells<R: Rng + ?Sized>(&mut self, fuel_map: &FuelMap, rng: &mut R) -> usize {
        let grid = self.settings.cell_grid_size;
        let attempts = rng.random_range(2..=4);
        let mut added = 0;

        for _ in 0..attempts {
            if self.cells.is_empty() {
                break;
            }
            let source = self.cells[rng.random_range(0..self.cells.len())].position;
            let (dx, dy) = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];

            let jitter = (rng.random::<f64>() - 0.5) * grid * 0.3;
            let candidate = Coordinate::new(
                source.lon() + dx * grid / 2000.0 + jitter / 2000.0,
                source.lat() + dy * grid / 2000.0 + jitter / 2000.0,
            );

            let key = cell_key(candidate);
            if self.burned.contains(&key) {
                continue;
            }

            let fuel = fuel_map.fuel_at(candidate, rng);
            if fuel == FuelModel::Water {
                continue;
            }
            if rng.random::<f64>() > fuel.burn_rate() {
                continue;
            }

            self.cells.push(FireCell {
                position: candidate,
                fuel,
                ignited_at_minutes: self.elapsed_minutes,
            });
            self.burned.insert(key);
            added += 1;
        }

        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Central Valley grassland
    const GRASS: Coordinate = Coordinate::new(-121.5, 37.5);
    /// Middle of SF Bay
    const BAY: Coordinate = Coordinate::new(-122.35, 37.70);

    fn ignite(point: Coordinate, settings: SimulationSettings, seed: u64) -> (FireSimulation, FuelMap, StdRng) {
        let map = FuelMap::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let sim = FireSimulation::ignite(point, &map, settings, &mut rng).unwrap();
        (sim, map, rng)
    }

    #[test]
    fn test_intensity_thresholds() {
        assert_eq!(Intensity::from_hectares(0.0), Intensity::Low);
        assert_eq!(Intensity::from_hectares(1.0), Intensity::Low);
        assert_eq!(Intensity::from_hectares(1.01), Intensity::Moderate);
        assert_eq!(Intensity::from_hectares(5.5), Intensity::High);
        assert_eq!(Intensity::from_hectares(15.01), Intensity::Extreme);
        assert_eq!(Intensity::Extreme.color(), "#F44336");
        assert_eq!(Intensity::Low.opacity(), 0.4);
        assert_eq!(Intensity::Extreme.opacity(), 0.7);
        assert!(Intensity::Moderate.opacity() < Intensity::High.opacity());
    }

    #[test]
    fn test_grass_fire_runs_to_time_limit() {
        let (mut sim, map, mut rng) = ignite(GRASS, SimulationSettings::default(), 42);
        assert_eq!(sim.fuel(), FuelModel::Grass);

        let first = sim.advance(5.0, &map, &mut rng).unwrap();
        assert_eq!(first.spread_m, 10.0);
        assert_eq!(first.new_spots, 6);
        assert_eq!(first.intensity, Intensity::Low);

        let ticks = sim.run_to_completion(&map, &mut rng).unwrap();
        assert_eq!(ticks.len(), 35);
        assert_eq!(sim.status(), SimulationStatus::Complete);
        assert_eq!(sim.elapsed_minutes(), 180.0);
        assert_eq!(sim.spread_m(), 360.0);
        // pi * 360^2 / 10000
        assert!((sim.burned_hectares() - 40.715).abs() < 0.01);
        assert_eq!(sim.intensity(), Intensity::Extreme);
        assert_eq!(sim.spots().len(), 36 * 6);
    }

    #[test]
    fn test_intensity_rises_over_time() {
        let (mut sim, map, mut rng) = ignite(GRASS, SimulationSettings::default(), 5);
        let ticks = sim.run_to_completion(&map, &mut rng).unwrap();
        for pair in ticks.windows(2) {
            assert!(pair[0].intensity <= pair[1].intensity);
            assert!(pair[0].burned_hectares < pair[1].burned_hectares);
        }
        // 1.13 ha after 30 minutes of grass
        assert_eq!(ticks[5].intensity, Intensity::Moderate);
    }

    #[test]
    fn test_area_limit_completes_early() {
        let settings = SimulationSettings {
            max_hectares: 1.0,
            ..SimulationSettings::default()
        };
        let (mut sim, map, mut rng) = ignite(GRASS, settings, 9);
        let ticks = sim.run_to_completion(&map, &mut rng).unwrap();
        assert_eq!(ticks.len(), 6);
        assert_eq!(sim.elapsed_minutes(), 30.0);
    }

    #[test]
    fn test_spots_stay_inside_front() {
        let (mut sim, map, mut rng) = ignite(GRASS, SimulationSettings::default(), 1);
        let summary = sim.advance(20.0, &map, &mut rng).unwrap();
        let projector = Projector::new(GRASS);
        for spot in sim.spots() {
            let d = projector.distance_km(spot.position) * 1000.0;
            assert!(d >= 0.1 * summary.spread_m - 1e-6);
            assert!(d <= summary.spread_m + 1e-6);
            assert!((8.0..15.0).contains(&spot.size));
        }
    }

    #[test]
    fn test_spots_stop_growing() {
        let settings = SimulationSettings {
            max_minutes: 1000.0,
            max_hectares: 1.0e9,
            cell_spread: false,
            ..SimulationSettings::default()
        };
        let (mut sim, map, mut rng) = ignite(GRASS, settings, 2);
        for _ in 0..60 {
            sim.advance(5.0, &map, &mut rng).unwrap();
        }
        let first = &sim.spots()[0];
        // 1.5 per tick, capped once growth passes max_growth
        assert!(first.growth > first.max_growth);
        assert!(first.growth <= first.max_growth + first.grow_rate);
        assert!(!first.is_growing());
    }

    #[test]
    fn test_water_ignition_does_not_spread() {
        let (mut sim, map, mut rng) = ignite(BAY, SimulationSettings::default(), 3);
        assert_eq!(sim.fuel(), FuelModel::Water);

        let ticks = sim.run_to_completion(&map, &mut rng).unwrap();
        assert_eq!(ticks.len(), 36);
        assert!(sim.spots().is_empty());
        assert_eq!(sim.burned_hectares(), 0.0);
        assert_eq!(sim.intensity(), Intensity::Low);
        // the bay is wide enough that no neighbouring cell catches
        assert_eq!(sim.cells().len(), 1);
    }

    #[test]
    fn test_cells_are_unique_and_not_water() {
        let (mut sim, map, mut rng) = ignite(GRASS, SimulationSettings::default(), 8);
        sim.run_to_completion(&map, &mut rng).unwrap();

        let keys: HashSet<String> = sim.cells().iter().map(|c| cell_key(c.position)).collect();
        assert_eq!(keys.len(), sim.cells().len());
        assert!(sim.cells().iter().all(|c| c.fuel != FuelModel::Water));
        assert!(sim.cells().len() > 1);
    }

    #[test]
    fn test_cell_spread_disabled() {
        let settings = SimulationSettings {
            cell_spread: false,
            ..SimulationSettings::default()
        };
        let (mut sim, map, mut rng) = ignite(GRASS, settings, 4);
        sim.run_to_completion(&map, &mut rng).unwrap();
        assert_eq!(sim.cells().len(), 1);
    }

    #[test]
    fn test_unreachable_limits_are_rejected() {
        let map = FuelMap::new();
        let mut rng = StdRng::seed_from_u64(14);
        for settings in [
            SimulationSettings {
                max_minutes: f64::NAN,
                ..SimulationSettings::default()
            },
            SimulationSettings {
                max_minutes: f64::INFINITY,
                ..SimulationSettings::default()
            },
            SimulationSettings {
                max_hectares: f64::NAN,
                ..SimulationSettings::default()
            },
        ] {
            // water never burns, so only the time limit could end this run
            let err = FireSimulation::ignite(BAY, &map, settings, &mut rng).unwrap_err();
            assert!(matches!(err, SessionError::InvalidLimit { .. }));
        }
    }

    #[test]
    fn test_stop_and_invalid_tick() {
        let (mut sim, map, mut rng) = ignite(GRASS, SimulationSettings::default(), 6);
        assert_eq!(
            sim.advance(0.0, &map, &mut rng).unwrap_err(),
            SessionError::InvalidTick(0.0)
        );
        assert!(sim.advance(f64::NAN, &map, &mut rng).is_err());

        sim.advance(5.0, &map, &mut rng).unwrap();
        sim.stop();
        let after = sim.advance(5.0, &map, &mut rng).unwrap();
        assert_eq!(after.status, SimulationStatus::Stopped);
        assert_eq!(after.elapsed_minutes, 5.0);
        assert_eq!(after.new_spots, 0);
    }
}
