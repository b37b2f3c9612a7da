//! Bevy asset types wrapping parsed Tiled data.

pub mod map;
pub mod tileset;
