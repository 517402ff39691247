use serde::{Deserialize, Serialize};

/// Land cover class used as an illustrative fuel model
///
/// Codes follow the land cover classification the legend is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelModel {
    NoData,
    Water,
    Trees,
    Grass,
    Crops,
    Shrub,
    Built,
    Bare,
    SnowIce,
    Clouds,
    Rangeland,
}

/// How fire spots scatter and grow for a given fuel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotProfile {
    /// Nearest spot placement as a fraction of the spread radius
    pub min_distance_factor: f64,
    /// Farthest spot placement as a fraction of the spread radius
    pub max_distance_factor: f64,
    pub min_size: f64,
    pub max_size: f64,
    /// Growth per tick of the spot's visual size
    pub grow_rate: f64,
}

impl FuelModel {
    /// All models in code order, as shown in the legend
    pub const ALL: [FuelModel; 11] = [
        FuelModel::NoData,
        FuelModel::Water,
        FuelModel::Trees,
        FuelModel::Grass,
        FuelModel::Crops,
        FuelModel::Shrub,
        FuelModel::Built,
        FuelModel::Bare,
        FuelModel::SnowIce,
        FuelModel::Clouds,
        FuelModel::Rangeland,
    ];

    pub fn from_code(code: u8) -> Option<FuelModel> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(&self) -> u8 {
        match self {
            FuelModel::NoData => 0,
            FuelModel::Water => 1,
            FuelModel::Trees => 2,
            FuelModel::Grass => 3,
            FuelModel::Crops => 4,
            FuelModel::Shrub => 5,
            FuelModel::Built => 6,
            FuelModel::Bare => 7,
            FuelModel::SnowIce => 8,
            FuelModel::Clouds => 9,
            FuelModel::Rangeland => 10,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FuelModel::NoData => "No Data",
            FuelModel::Water => "Water",
            FuelModel::Trees => "Trees",
            FuelModel::Grass => "Grass",
            FuelModel::Crops => "Crops",
            FuelModel::Shrub => "Shrub",
            FuelModel::Built => "Built",
            FuelModel::Bare => "Bare",
            FuelModel::SnowIce => "Snow/Ice",
            FuelModel::Clouds => "Clouds",
            FuelModel::Rangeland => "Rangeland",
        }
    }

    /// Legend color as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            FuelModel::NoData => "#ffffbe",
            FuelModel::Water => "#0077FF",
            FuelModel::Trees => "#4CAF50",
            FuelModel::Grass => "#8BC34A",
            FuelModel::Crops => "#CDDC39",
            FuelModel::Shrub => "#FFEB3B",
            FuelModel::Built => "#FF5722",
            FuelModel::Bare => "#795548",
            FuelModel::SnowIce => "#FFFFFF",
            FuelModel::Clouds => "#9E9E9E",
            FuelModel::Rangeland => "#FFA726",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FuelModel::NoData => "Areas with no classified land cover data",
            FuelModel::Water => "Lakes, rivers, oceans - non-burnable",
            FuelModel::Trees => "Dense forest with moderate burn rate",
            FuelModel::Grass => "Open grasslands - fast burning, high spread",
            FuelModel::Crops => "Agricultural lands with medium fire risk",
            FuelModel::Shrub => "Shrublands with high intensity burns",
            FuelModel::Built => "Urban areas with limited vegetation",
            FuelModel::Bare => "Bare soil, rock - minimal fuel for fire",
            FuelModel::SnowIce => "Permanent snow/ice cover - non-burnable",
            FuelModel::Clouds => "Data obscured by cloud cover",
            FuelModel::Rangeland => "Mixed grass/shrubs with moderate fire risk",
        }
    }

    /// Probability that fire spreads into a cell of this fuel
    pub fn burn_rate(&self) -> f64 {
        match self {
            FuelModel::NoData => 0.1,
            FuelModel::Water => 0.0,
            FuelModel::Trees => 0.4,
            FuelModel::Grass => 0.8,
            FuelModel::Crops => 0.5,
            FuelModel::Shrub => 0.7,
            FuelModel::Built => 0.1,
            FuelModel::Bare => 0.05,
            FuelModel::SnowIce => 0.0,
            FuelModel::Clouds => 0.0,
            FuelModel::Rangeland => 0.6,
        }
    }

    /// Fire front advance in metres per minute
    pub fn growth_rate(&self) -> f64 {
        match self {
            FuelModel::NoData => 0.5,
            FuelModel::Water => 0.0,
            FuelModel::Trees => 1.0,
            FuelModel::Grass => 2.0,
            FuelModel::Crops => 1.5,
            FuelModel::Shrub => 1.8,
            FuelModel::Built => 0.3,
            FuelModel::Bare => 0.2,
            FuelModel::SnowIce => 0.0,
            FuelModel::Clouds => 0.0,
            FuelModel::Rangeland => 1.7,
        }
    }

    /// Models shown in the legend, most flammable first
    ///
    /// NoData and Clouds are placeholders rather than land cover, so they are left out.
    /// Ties keep code order.
    pub fn legend() -> Vec<FuelModel> {
        let mut models: Vec<FuelModel> = Self::ALL
            .into_iter()
            .filter(|m| !matches!(m, FuelModel::NoData | FuelModel::Clouds))
            .collect();
        models.sort_by(|a, b| b.burn_rate().total_cmp(&a.burn_rate()));
        models
    }

    pub fn is_burnable(&self) -> bool {
        self.burn_rate() > 0.0
    }

    /// Number of spots a tick adds around the front
    pub fn spots_per_tick(&self) -> usize {
        match self {
            FuelModel::Grass => 6,
            FuelModel::Shrub => 4,
            FuelModel::Trees => 3,
            _ => 2,
        }
    }

    pub fn spot_profile(&self) -> SpotProfile {
        match self {
            // uniform scatter, large fast spots
            FuelModel::Grass => SpotProfile {
                min_distance_factor: 0.1,
                max_distance_factor: 1.0,
                min_size: 8.0,
                max_size: 15.0,
                grow_rate: 1.5,
            },
            FuelModel::Shrub => SpotProfile {
                min_distance_factor: 0.2,
                max_distance_factor: 0.8,
                min_size: 7.0,
                max_size: 13.0,
                grow_rate: 1.2,
            },
            // concentrated near the middle of the front
            FuelModel::Trees => SpotProfile {
                min_distance_factor: 0.3,
                max_distance_factor: 0.7,
                min_size: 6.0,
                max_size: 11.0,
                grow_rate: 0.8,
            },
            _ => SpotProfile {
                min_distance_factor: 0.2,
                max_distance_factor: 0.9,
                min_size: 5.0,
                max_size: 10.0,
                grow_rate: 1.0,
            },
        }
    }
}

impl std::fmt::Display for FuelModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
