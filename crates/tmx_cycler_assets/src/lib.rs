//! # `tmx_cycler_assets`
//!
//! Layer 1 of `tmx_cycler`: pure asset loading for Tiled `.tmx` maps.
//!
//! Parsing is done by the [`tiled`] crate. This crate only wraps the result in a
//! Bevy asset, registers tileset images as load dependencies and precomputes the
//! map bounds that the spawning layer needs.
//!
//! ```no_run
//! use bevy::prelude::*;
//! use tmx_cycler_assets::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(TiledMapAssetsPlugin::default());
//! ```

pub mod assets;
pub mod loaders;
pub mod plugin;

pub use plugin::TiledMapAssetsPlugin;

/// Common imports for `tmx_cycler_assets` users.
pub mod prelude {
    pub use crate::assets::{map::TiledMapAsset, tileset::TilesetImages};
    pub use crate::loaders::map::{MapLoaderError, TiledMapAssetLoader};
    pub use crate::plugin::TiledMapAssetsPlugin;
}
