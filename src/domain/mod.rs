pub mod boundary;
pub mod camera;
pub mod fuel;
pub mod land_cover;

pub use boundary::{Boundary, BoundaryDraft};
pub use camera::Camera;
pub use fuel::{FuelModel, SpotProfile};
pub use land_cover::{LandCoverPolygon, fuel_from_osm_tags};
