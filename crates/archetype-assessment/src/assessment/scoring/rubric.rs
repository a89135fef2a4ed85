use serde::{Deserialize, Serialize};

/// Fixed constants that shape normalization, banding and the balancing correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRubric {
    /// Raw score mapped to 0%.
    pub raw_floor: f64,
    /// Raw score mapped to 100%.
    pub raw_ceiling: f64,
    pub most_like_me_points: f64,
    pub least_like_me_points: f64,
    /// Balancing index at or above which every percentage is reduced.
    pub balancing_high_threshold: u8,
    pub balancing_high_adjustment: i32,
    /// Balancing index at or below which every percentage is raised.
    pub balancing_low_threshold: u8,
    pub balancing_low_adjustment: i32,
    /// Highest percentage still banded `low`.
    pub low_band_ceiling: u8,
    /// Highest percentage still banded `moderate`.
    pub moderate_band_ceiling: u8,
}

impl ScoringRubric {
    pub const fn standard() -> Self {
        Self {
            raw_floor: 4.0,
            raw_ceiling: 24.0,
            most_like_me_points: 2.0,
            least_like_me_points: -1.0,
            balancing_high_threshold: 55,
            balancing_high_adjustment: -3,
            balancing_low_threshold: 34,
            balancing_low_adjustment: 2,
            low_band_ceiling: 34,
            moderate_band_ceiling: 50,
        }
    }
}

impl Default for ScoringRubric {
    fn default() -> Self {
        Self::standard()
    }
}
