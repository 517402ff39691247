use thiserror::Error;

/// Precondition failures of scenario operations
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("at least 3 points are needed for a boundary, got {0}")]
    TooFewBoundaryPoints(usize),
    #[error("boundary point ({x}, {y}) is not a finite coordinate")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("no completed boundary; draw and complete a boundary first")]
    NoBoundary,
    #[error("no ignition point; place a fire point first")]
    NoIgnitionPoint,
    #[error("a simulation is already running")]
    SimulationRunning,
    #[error("no simulation has been started")]
    NoSimulation,
    #[error("tick length must be positive, got {0} minutes")]
    InvalidTick(f64),
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidLimit { name: &'static str, value: f64 },
}
