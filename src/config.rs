//! Game configuration: defaults, JSON loading and validation.
//!
//! Every field is optional in `~/.skyhop/config.json`; missing fields take
//! the defaults from `core::constants`. A configuration is validated before
//! any scene is built from it.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::constants::*;
use crate::core::easing::Easing;
use crate::utils::persistence;
use crate::world::difficulty::{MarginRange, MarginTable};

pub const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{pool} pool needs at least 2 members, got {size}")]
    PoolTooSmall { pool: &'static str, size: usize },

    #[error("{field} must be positive and finite, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },

    #[error("{field} must be within [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("margin table is empty")]
    EmptyMarginTable,

    #[error("margin range for level {level} is inverted: [{min}, {max}]")]
    InvertedMarginRange { level: usize, min: i32, max: i32 },

    #[error("level {level} margin can drop to {margin}, must exceed platform width {platform_width}")]
    MarginTooSmall {
        level: usize,
        margin: f64,
        platform_width: f64,
    },

    #[error("physics tick must be at least 1 ms")]
    ZeroTick,

    #[error("points per level must be at least 1")]
    ZeroPointsPerLevel,
}

/// World geometry and physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub gravity: f64,
    pub tick_ms: u64,
    pub ground_pool_size: usize,
    pub ground_height: f64,
    pub platform_pool_size: usize,
    pub platform_spacing: f64,
    pub platform_width: f64,
    pub platform_height: f64,
    pub player_width: f64,
    pub player_height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            gravity: GRAVITY,
            tick_ms: PHYSICS_TICK_MS,
            ground_pool_size: GROUND_POOL_SIZE,
            ground_height: GROUND_HEIGHT,
            platform_pool_size: PLATFORM_POOL_SIZE,
            platform_spacing: PLATFORM_SPACING,
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
        }
    }
}

/// Camera follow tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Screen-relative x fraction past which the camera starts following.
    pub follow_threshold: f64,
    /// Multiplier on `ln(1 + distance / width)` for the easing step.
    pub ease_gain: f64,
    /// Smallest fraction of the remaining distance covered per tick.
    pub min_ease_step: f64,
    /// Screen-relative y fraction the player's top is kept below.
    pub vertical_band: f64,
    pub recenter_on_landing: bool,
    /// Screen-relative x fraction the landed platform is panned to.
    pub recenter_anchor: f64,
    pub recenter_duration_ms: u64,
    pub recenter_easing: Easing,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_threshold: CAMERA_FOLLOW_THRESHOLD,
            ease_gain: CAMERA_EASE_GAIN,
            min_ease_step: CAMERA_MIN_EASE_STEP,
            vertical_band: CAMERA_VERTICAL_BAND,
            recenter_on_landing: true,
            recenter_anchor: CAMERA_RECENTER_ANCHOR,
            recenter_duration_ms: CAMERA_RECENTER_MS,
            recenter_easing: Easing::SineInOut,
        }
    }
}

/// Difficulty progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub points_per_level: u32,
    pub margin_table: Vec<MarginRange>,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            points_per_level: POINTS_PER_LEVEL,
            margin_table: MarginTable::default().ranges().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub camera: CameraConfig,
    pub difficulty: DifficultyConfig,
    /// Fixed RNG seed for reproducible platform layouts.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Default location: ~/.skyhop/config.json.
    pub fn default_path() -> io::Result<PathBuf> {
        persistence::data_path(CONFIG_FILENAME)
    }

    /// Load and validate a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig = persistence::load_json(path)
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Write this config as pretty JSON.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        persistence::save_json(path, self).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn margin_table(&self) -> MarginTable {
        MarginTable::new(self.difficulty.margin_table.clone())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.world;
        for (field, value) in [
            ("viewport_width", w.viewport_width),
            ("viewport_height", w.viewport_height),
            ("gravity", w.gravity),
            ("ground_height", w.ground_height),
            ("platform_spacing", w.platform_spacing),
            ("platform_width", w.platform_width),
            ("platform_height", w.platform_height),
            ("player_width", w.player_width),
            ("player_height", w.player_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }
        if w.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if w.ground_pool_size < 2 {
            return Err(ConfigError::PoolTooSmall {
                pool: "ground",
                size: w.ground_pool_size,
            });
        }
        if w.platform_pool_size < 2 {
            return Err(ConfigError::PoolTooSmall {
                pool: "platform",
                size: w.platform_pool_size,
            });
        }

        let c = &self.camera;
        for (field, value) in [
            ("follow_threshold", c.follow_threshold),
            ("min_ease_step", c.min_ease_step),
            ("vertical_band", c.vertical_band),
            ("recenter_anchor", c.recenter_anchor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { field, value });
            }
        }
        if !(c.ease_gain.is_finite() && c.ease_gain > 0.0) {
            return Err(ConfigError::InvalidDimension {
                field: "ease_gain",
                value: c.ease_gain,
            });
        }

        let d = &self.difficulty;
        if d.points_per_level == 0 {
            return Err(ConfigError::ZeroPointsPerLevel);
        }
        if d.margin_table.is_empty() {
            return Err(ConfigError::EmptyMarginTable);
        }
        for (level, range) in d.margin_table.iter().enumerate() {
            if range.min > range.max {
                return Err(ConfigError::InvertedMarginRange {
                    level,
                    min: range.min,
                    max: range.max,
                });
            }
            // Recycled platforms must land strictly right of the last one
            let margin = w.viewport_width / 2.0 + smallest_offset(*range);
            if margin <= w.platform_width {
                return Err(ConfigError::MarginTooSmall {
                    level,
                    margin,
                    platform_width: w.platform_width,
                });
            }
        }
        Ok(())
    }
}

/// Lowest value of `round(r * max + min)` over `r` in `[0, 1)`.
fn smallest_offset(range: MarginRange) -> f64 {
    range.min as f64 + (range.max as f64).min(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.world.ground_pool_size, 3);
        assert_eq!(config.world.platform_pool_size, 8);
        assert_eq!(config.difficulty.margin_table.len(), 3);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "world": { "platform_pool_size": 12 }, "seed": 7 }"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.world.platform_pool_size, 12);
        assert_eq!(config.world.viewport_width, VIEWPORT_WIDTH);
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rejects_small_pools() {
        let mut config = GameConfig::default();
        config.world.ground_pool_size = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PoolTooSmall { pool: "ground", size: 1 })
        ));

        let mut config = GameConfig::default();
        config.world.platform_pool_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PoolTooSmall { pool: "platform", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_and_negative_dimensions() {
        let mut config = GameConfig::default();
        config.world.platform_width = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension { field: "platform_width", .. })
        ));

        let mut config = GameConfig::default();
        config.world.gravity = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_margin_table() {
        let mut config = GameConfig::default();
        config.difficulty.margin_table.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyMarginTable)));

        let mut config = GameConfig::default();
        config.difficulty.margin_table[1] = MarginRange { min: 50, max: -50 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedMarginRange { level: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_margin_that_places_platforms_behind() {
        // Half of a 100-wide viewport minus 100 is a negative margin
        let mut config = GameConfig::default();
        config.world.viewport_width = 100.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MarginTooSmall { level: 0, .. })
        ));

        // Overlapping platforms: 640 - 600 = 40 < 80
        let mut config = GameConfig::default();
        config.difficulty.margin_table[2] = MarginRange { min: -600, max: 0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MarginTooSmall { level: 2, .. })
        ));

        // Negative max lowers the floor further: 640 - 500 - 100 = 40
        let mut config = GameConfig::default();
        config.difficulty.margin_table[1] = MarginRange { min: -500, max: -100 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MarginTooSmall { level: 1, .. })
        ));

        // Just wide enough: 640 - 559 = 81 > 80
        let mut config = GameConfig::default();
        config.difficulty.margin_table[0] = MarginRange { min: -559, max: 0 };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_tick_and_zero_points() {
        let mut config = GameConfig::default();
        config.world.tick_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTick)));

        let mut config = GameConfig::default();
        config.difficulty.points_per_level = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPointsPerLevel)));
    }

    #[test]
    fn test_rejects_camera_fraction_out_of_range() {
        let mut config = GameConfig::default();
        config.camera.follow_threshold = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FractionOutOfRange { field: "follow_threshold", .. })
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("skyhop-config-{}", std::process::id()))
            .join(CONFIG_FILENAME);
        let mut config = GameConfig::default();
        config.seed = Some(42);
        config.camera.recenter_on_landing = false;

        config.save_to(&path).unwrap();
        let loaded = GameConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("skyhop-definitely-missing/config.json");
        let config = GameConfig::load_from(&path).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_invalid_values_is_rejected() {
        let path = std::env::temp_dir()
            .join(format!("skyhop-config-bad-{}", std::process::id()))
            .join(CONFIG_FILENAME);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "difficulty": { "points_per_level": 0 } }"#).unwrap();

        assert!(matches!(
            GameConfig::load_from(&path),
            Err(ConfigError::ZeroPointsPerLevel)
        ));

        std::fs::remove_file(path).ok();
    }
}
