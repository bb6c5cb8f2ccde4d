/// Game configuration.
///
/// Every field has a default, so a config file only needs the values it
/// changes.  Unknown fields are rejected to catch typos early.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canvas::Scale;
use crate::error::ConfigError;
use crate::input::Action;

/// Minimum milliseconds between shots.  0 disables throttling.
pub const DEFAULT_FIRE_RATE_MS: u64 = 250;
/// ≈30 FPS
pub const DEFAULT_FRAME_MS: u64 = 33;
pub const DEFAULT_CELL_SIZE: f32 = 80.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyConfig {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub shoot: Vec<String>,
}

impl KeyConfig {
    pub fn names(&self, action: Action) -> &[String] {
        match action {
            Action::Up => &self.up,
            Action::Down => &self.down,
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::Shoot => &self.shoot,
        }
    }
}

fn names(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            up: names(&["up", "w"]),
            down: names(&["down", "s"]),
            left: names(&["left", "a"]),
            right: names(&["right", "d"]),
            shoot: names(&["space"]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub fire_rate_ms: u64,
    pub frame_ms: u64,
    /// Edge length of one level grid cell, in pixels.
    pub cell_size: f32,
    pub scale: Scale,
    pub keys: KeyConfig,
    /// Replaces the built-in level grid.
    pub level_path: Option<PathBuf>,
    /// When set, every preloaded image must exist under this directory.
    pub asset_dir: Option<PathBuf>,
    pub sky_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            fire_rate_ms: DEFAULT_FIRE_RATE_MS,
            frame_ms: DEFAULT_FRAME_MS,
            cell_size: DEFAULT_CELL_SIZE,
            scale: Scale::default(),
            keys: KeyConfig::default(),
            level_path: None,
            asset_dir: None,
            sky_seed: 7,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<GameConfig, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<GameConfig, ConfigError> {
        match path {
            Some(p) => GameConfig::load(p),
            None => Ok(GameConfig::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Scale { px_per_col, px_per_row } = self.scale;
        if !(px_per_col > 0.0 && px_per_row > 0.0) {
            return Err(ConfigError::BadScale { px_per_col, px_per_row });
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::BadCellSize(self.cell_size));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::ZeroFrameTime);
        }
        crate::input::KeyBindings::from_config(&self.keys)?;
        Ok(())
    }
}
