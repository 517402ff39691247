//! firesim - Toy wildfire spread scenarios over map boundaries, cameras and fuel models

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod geometry;
pub mod osm;
pub mod session;
pub mod sim;

pub use error::SessionError;
pub use geometry::{BoundingBox, Coordinate};
pub use session::Session;
