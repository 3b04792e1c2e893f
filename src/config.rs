//! Tunable game parameters.
//!
//! Defaults reproduce the classic 800×700 layout. Any field may be
//! overridden from a TOML file; missing fields keep their default.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::formation::{COLS, SPACING_X};
use crate::player::BOTTOM_MARGIN;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: Dimensions,
    pub player_size: Dimensions,
    pub enemy_size: Dimensions,
    pub bullet_size: Dimensions,
    pub enemy_bullet_size: Dimensions,
    pub player_speed: i32,
    pub bullet_speed: i32,
    pub enemy_bullet_speed: i32,
    /// Horizontal distance covered by one formation step.
    pub enemy_step: i32,
    /// Vertical drop when the formation reaches an edge.
    pub enemy_move_down: i32,
    /// Ticks between player shots.
    pub fire_cooldown: u32,
    /// Ticks between enemy shots.
    pub enemy_shoot_interval: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Dimensions::new(800, 700),
            player_size: Dimensions::new(50, 40),
            enemy_size: Dimensions::new(40, 40),
            bullet_size: Dimensions::new(4, 15),
            enemy_bullet_size: Dimensions::new(4, 15),
            player_speed: 6,
            bullet_speed: 8,
            enemy_bullet_speed: 6,
            enemy_step: 10,
            enemy_move_down: 30,
            fire_cooldown: 20,
            enemy_shoot_interval: 60,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("window", self.window),
            ("player_size", self.player_size),
            ("enemy_size", self.enemy_size),
            ("bullet_size", self.bullet_size),
            ("enemy_bullet_size", self.enemy_bullet_size),
        ];
        for (field, dims) in sizes {
            if dims.width <= 0 || dims.height <= 0 {
                return Err(invalid(
                    field,
                    format!("{}×{} must be positive", dims.width, dims.height),
                ));
            }
        }

        let speeds = [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("enemy_step", self.enemy_step),
            ("enemy_move_down", self.enemy_move_down),
        ];
        for (field, value) in speeds {
            if value <= 0 {
                return Err(invalid(field, format!("{value} must be positive")));
            }
        }

        // Per-tick movement may not jump across the whole window.
        let strides = [
            ("player_speed", self.player_speed, self.window.width),
            ("enemy_step", self.enemy_step, self.window.width),
            ("bullet_speed", self.bullet_speed, self.window.height),
            ("enemy_bullet_speed", self.enemy_bullet_speed, self.window.height),
            ("enemy_move_down", self.enemy_move_down, self.window.height),
        ];
        for (field, value, limit) in strides {
            if value > limit {
                return Err(invalid(field, format!("{value} exceeds the window extent {limit}")));
            }
        }

        if self.enemy_shoot_interval == 0 {
            return Err(invalid("enemy_shoot_interval", "must be at least 1".into()));
        }

        if self.player_size.width > self.window.width
            || self.player_size.height + BOTTOM_MARGIN > self.window.height
        {
            return Err(invalid("player_size", "player does not fit in the window".into()));
        }

        let formation_width = COLS as i32 * SPACING_X;
        if formation_width > self.window.width {
            return Err(invalid(
                "window",
                format!("width {} is narrower than the {formation_width} px formation", self.window.width),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
