pub mod cameras;
pub mod fire;
pub mod fuel_map;

pub use cameras::{generate_camera_id, place_cameras, sample_inside};
pub use fire::{FireCell, FireSimulation, FireSpot, Intensity, SimulationStatus, TickSummary};
pub use fuel_map::{CALIFORNIA_REGIONS, FALLBACK_MIX, FuelMap, FuelRegion};
