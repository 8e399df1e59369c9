use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("world must be at least 1x1, got {width}x{height}")]
    EmptyWorld { width: u32, height: u32 },
    #[error("sea level {sea_level} must sit below mountain level {mountain_level}")]
    LevelsOutOfOrder { sea_level: f64, mountain_level: f64 },
    #[error("noise scale must be positive, got {0}")]
    NoiseScale(f64),
    #[error("cell size must be positive, got {0}")]
    CellSize(f32),
}

/// Everything world generation and spawning need; missing fields take the defaults below.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Columns in offset coordinates.
    pub width: u32,
    /// Rows in offset coordinates.
    pub height: u32,
    pub noise_scale: f64,
    /// Normalized noise at or below this is sea.
    pub sea_level: f64,
    /// Normalized noise above this is mountain.
    pub mountain_level: f64,
    pub seed: u32,
    pub claim_radius: u32,
    /// AI civilizations founded alongside the player.
    pub civilizations: u32,
    pub unit_spawn_range: u32,
    /// Hex radius in world units.
    pub cell_size: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            noise_scale: 0.25,
            sea_level: 0.4,
            mountain_level: 0.7,
            seed: 0,
            claim_radius: 2,
            civilizations: 1,
            unit_spawn_range: 1,
            cell_size: 1.0,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyWorld { width: self.width, height: self.height });
        }
        if self.sea_level >= self.mountain_level {
            return Err(ConfigError::LevelsOutOfOrder { sea_level: self.sea_level, mountain_level: self.mountain_level });
        }
        if self.noise_scale <= 0. { return Err(ConfigError::NoiseScale(self.noise_scale)); }
        if self.cell_size <= 0. { return Err(ConfigError::CellSize(self.cell_size)); }
        Ok(())
    }
}
