pub mod assets;
pub mod canvas;
pub mod collection;
pub mod compose;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod layer;
pub mod level;
pub mod physics;
pub mod sprite;
pub mod tilemap;
