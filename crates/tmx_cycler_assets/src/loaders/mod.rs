//! Asset loaders for Tiled files.

pub mod map;
