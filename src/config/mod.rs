use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::SessionError;

/// Region appended to address searches that do not already name it
pub const DEFAULT_REGION: &str = "San Francisco, CA";

/// Id that exactly one placed camera receives
pub const RESERVED_CAMERA_ID: &str = "3738";

fn default_region() -> Option<String> {
    Some(DEFAULT_REGION.to_string())
}
fn default_simplify_epsilon() -> f64 {
    0.0
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_region")]
    pub region: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Boundary simplification tolerance in degrees, 0 disables
    #[serde(default = "default_simplify_epsilon")]
    pub simplify_epsilon: f64,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub cameras: CameraSettings,
    #[serde(default)]
    pub overpass: Option<OverpassConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            seed: None,
            verbose: default_verbose(),
            simplify_epsilon: default_simplify_epsilon(),
            output: None,
            simulation: SimulationSettings::default(),
            cameras: CameraSettings::default(),
            overpass: None,
        }
    }
}

fn default_tick_minutes() -> f64 {
    5.0
}
fn default_max_minutes() -> f64 {
    180.0
}
fn default_max_hectares() -> f64 {
    50.0
}
fn default_cell_spread() -> bool {
    true
}
fn default_cell_grid_size() -> f64 {
    10.0
}

/// Tuning of the fire spread demo
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationSettings {
    /// Simulated minutes per tick
    #[serde(default = "default_tick_minutes")]
    pub tick_minutes: f64,
    /// The run completes once this much time has elapsed
    #[serde(default = "default_max_minutes")]
    pub max_minutes: f64,
    /// ...or once this much area has burned
    #[serde(default = "default_max_hectares")]
    pub max_hectares: f64,
    /// Grow discrete burned cells alongside the radial front
    #[serde(default = "default_cell_spread")]
    pub cell_spread: bool,
    /// Cell step is grid / 2000 degrees
    #[serde(default = "default_cell_grid_size")]
    pub cell_grid_size: f64,
}

impl SimulationSettings {
    /// Reject limits a run could never reach, which would keep it going forever
    pub fn validate(&self) -> std::result::Result<(), SessionError> {
        if !(self.tick_minutes > 0.0 && self.tick_minutes.is_finite()) {
            return Err(SessionError::InvalidTick(self.tick_minutes));
        }
        for (name, value) in [
            ("max_minutes", self.max_minutes),
            ("max_hectares", self.max_hectares),
            ("cell_grid_size", self.cell_grid_size),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SessionError::InvalidLimit { name, value });
            }
        }
        Ok(())
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_minutes: default_tick_minutes(),
            max_minutes: default_max_minutes(),
            max_hectares: default_max_hectares(),
            cell_spread: default_cell_spread(),
            cell_grid_size: default_cell_grid_size(),
        }
    }
}

fn default_min_cameras() -> usize {
    5
}
fn default_max_cameras() -> usize {
    10
}
fn default_camera_radius_km() -> f64 {
    1.2
}
fn default_max_attempts() -> usize {
    20
}
fn default_reserved_id() -> String {
    RESERVED_CAMERA_ID.to_string()
}

/// Random camera placement inside a boundary
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CameraSettings {
    #[serde(default = "default_min_cameras")]
    pub min_count: usize,
    #[serde(default = "default_max_cameras")]
    pub max_count: usize,
    #[serde(default = "default_camera_radius_km")]
    pub radius_km: f64,
    /// Rejection-sampling tries per camera before it is skipped
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_reserved_id")]
    pub reserved_id: String,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            min_count: default_min_cameras(),
            max_count: default_max_cameras(),
            radius_km: default_camera_radius_km(),
            max_attempts: default_max_attempts(),
            reserved_id: default_reserved_id(),
        }
    }
}

fn default_overpass_urls() -> Vec<String> {
    vec![
        "https://overpass.private.coffee/api/interpreter".to_string(),
        "https://overpass-api.de/api/interpreter".to_string(),
        "https://maps.mail.ru/osm/tools/overpass/api/interpreter".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    200
}

fn default_max_retries() -> u32 {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_urls")]
    pub urls: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            urls: default_overpass_urls(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl FileConfig {
    /// Load the first readable config from the standard search paths
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("firesim.toml"));
    paths.push(PathBuf::from(".firesim.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("firesim").join("config.toml"));
        paths.push(config_dir.join("firesim.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".firesim.toml"));
        paths.push(home.join(".config").join("firesim").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.region.as_deref(), Some(DEFAULT_REGION));
        assert_eq!(config.simulation, SimulationSettings::default());
        assert_eq!(config.cameras.reserved_id, "3738");
        assert_eq!(config.cameras.radius_km, 1.2);
        assert!(config.overpass.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config: FileConfig = toml::from_str(
            r#"
            seed = 42
            simplify_epsilon = 0.0005

            [simulation]
            tick_minutes = 10.0
            cell_spread = false

            [cameras]
            min_count = 2
            max_count = 3

            [overpass]
            max_retries = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.simulation.tick_minutes, 10.0);
        assert!(!config.simulation.cell_spread);
        assert_eq!(config.simulation.max_minutes, 180.0);
        assert_eq!(config.cameras.min_count, 2);
        assert_eq!(config.cameras.max_attempts, 20);

        let overpass = config.overpass.unwrap();
        assert_eq!(overpass.max_retries, 1);
        assert_eq!(overpass.urls.len(), 3);
    }

    #[test]
    fn test_validate_limits() {
        assert!(SimulationSettings::default().validate().is_ok());

        let nan_minutes = SimulationSettings {
            max_minutes: f64::NAN,
            ..SimulationSettings::default()
        };
        assert!(matches!(
            nan_minutes.validate(),
            Err(SessionError::InvalidLimit { name: "max_minutes", .. })
        ));

        let inf_hectares = SimulationSettings {
            max_hectares: f64::INFINITY,
            ..SimulationSettings::default()
        };
        assert!(matches!(
            inf_hectares.validate(),
            Err(SessionError::InvalidLimit { name: "max_hectares", .. })
        ));

        let zero_tick = SimulationSettings {
            tick_minutes: 0.0,
            ..SimulationSettings::default()
        };
        assert_eq!(zero_tick.validate(), Err(SessionError::InvalidTick(0.0)));
    }

    #[test]
    fn test_nan_limit_from_toml_is_rejected() {
        let config: FileConfig = toml::from_str("[simulation]\nmax_minutes = nan\n").unwrap();
        assert!(config.simulation.validate().is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("firesim.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "region = \"Sacramento, CA\"\nverbose = true").unwrap();

        let config = FileConfig::from_path(&path).unwrap();
        assert_eq!(config.region.as_deref(), Some("Sacramento, CA"));
        assert!(config.verbose);

        assert!(FileConfig::from_path(&dir.path().join("missing.toml")).is_err());
    }
}
