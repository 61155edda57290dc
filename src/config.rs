/// Tunables, loaded from an optional TOML file.
///
/// Every section falls back to its defaults, so a config file only needs the
/// keys it changes:
///
/// ```toml
/// frame_ms = 20
///
/// [player]
/// shot_interval = 6
/// ```

use std::{env, fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::error::GameError;
use crate::surface::{Bounds, Color};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "VIPER_CONFIG";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub shots: ShotConfig,
    pub stars: StarConfig,
    pub assets: AssetConfig,
    /// Target frame cadence of the driver loop.
    pub frame_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            shots: ShotConfig::default(),
            stars: StarConfig::default(),
            assets: AssetConfig::default(),
            frame_ms: 16,
        }
    }
}

impl GameConfig {
    /// Read the file named by `VIPER_CONFIG`, or fall back to defaults.
    pub fn load() -> Result<Self, GameError> {
        match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, GameError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    fn validate(&self) -> Result<(), GameError> {
        if self.field.width <= 0.0 || self.field.height <= 0.0 {
            return Err(GameError::Config("field size must be positive".into()));
        }
        if self.player.shot_interval < 0 {
            return Err(GameError::Config("player.shot_interval must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl FieldConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds { width: self.width, height: self.height }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self { width: 640.0, height: 480.0 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Minimum frames between two shots.
    pub shot_interval: i32,
    /// Units per second during the entry animation.
    pub entry_speed: f32,
    pub entry_origin_x: f32,
    pub entry_end_x: f32,
    pub life: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            speed: 3.0,
            shot_interval: 10,
            entry_speed: 50.0,
            entry_origin_x: -50.0,
            entry_end_x: 32.0,
            life: 1,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub capacity: usize,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub life: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self { capacity: 10, width: 48.0, height: 48.0, speed: 5.0, life: 1 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub capacity: usize,
    /// Slots for the two-way spread shot.
    pub spread_capacity: usize,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub power: i32,
    pub enemy_capacity: usize,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_speed: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            spread_capacity: 10,
            width: 32.0,
            height: 32.0,
            speed: 7.0,
            power: 1,
            enemy_capacity: 50,
            enemy_width: 16.0,
            enemy_height: 16.0,
            enemy_speed: 10.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
    pub max_size: f32,
    pub max_speed: f32,
    pub color: Color,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self { count: 100, max_size: 3.0, max_speed: 4.0, color: Color::rgb(0x33, 0x33, 0x55) }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub player: String,
    pub player_shot: String,
    pub spread_shot: String,
    pub enemy: String,
    pub enemy_shot: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            player: "assets/images/viper.png".into(),
            player_shot: "assets/images/viper_shot.png".into(),
            spread_shot: "assets/images/viper_single_shot.png".into(),
            enemy: "assets/images/enemy_small.png".into(),
            enemy_shot: "assets/images/enemy_shot.png".into(),
        }
    }
}
