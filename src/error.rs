/// Error types for the fallible edges of the game: configuration, level
/// parsing and asset preloading.  Gameplay itself never fails; collisions,
/// bounds and cooldowns are plain boolean branches.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown key name {name:?} bound to action {action}")]
    UnknownKey { action: String, name: String },
    #[error("action {0} has no keys bound")]
    UnboundAction(String),
    #[error("viewport scale must be positive, got {px_per_col}x{px_per_row}")]
    BadScale { px_per_col: f32, px_per_row: f32 },
    #[error("level cell size must be positive, got {0}")]
    BadCellSize(f32),
    #[error("frame time must be at least 1 ms")]
    ZeroFrameTime,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level grid is empty")]
    Empty,
    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no image registered for {0}")]
    Unknown(String),
    #[error("asset {path} not found on disk at {resolved}")]
    Missing { path: String, resolved: PathBuf },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("failed to read level file {path}: {source}")]
    LevelFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
