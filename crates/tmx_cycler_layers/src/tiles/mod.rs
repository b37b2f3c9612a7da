//! Tile layer rendering.

pub mod animations;
pub mod render;
pub mod tilemap_builder;

pub use animations::{update_tile_animations, AnimationFrame, AnimationSpeed, TileAnimation};
pub use tilemap_builder::TilemapBuilder;
