//! # `tmx_cycler_layers`
//!
//! Turns a loaded `TiledMapAsset` into an entity hierarchy and renders its tile
//! and object layers.
//!
//! ## Architecture
//!
//! - **Spawning**: a reactive `PreUpdate` system waits until a `TiledMap`'s asset
//!   and all its images are loaded, then spawns one entity per tile or object
//!   layer.
//! - **Render slots**: tile and object layers are numbered in document order. Slot `n` sits
//!   at `z = offset + n * separation`, so lower layers are drawn first. Only
//!   `layer_count` slots exist; extra layers are reported and skipped.
//! - **Rendering**: an observer on [`events::TileLayerSpawned`] builds
//!   `bevy_ecs_tilemap` tilemaps (atlas tilesets) or sprites (image
//!   collections). Every tile is an entity with a [`components::MapTile`].
//!   Object shapes become [`components::MapObject`] entities outlined with
//!   gizmos.
//! - **Animation**: animated tiles cycle through their frames in
//!   [`plugin::TileLayerSystems::Animate`].
//!
//! Despawning the map entity removes the whole hierarchy.
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use tmx_cycler_assets::TiledMapAssetsPlugin;
//! use tmx_cycler_layers::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TiledMapAssetsPlugin::default())
//!         .add_plugins(TileLayersPlugin::default())
//!         .add_systems(Startup, spawn_map)
//!         .run();
//! }
//!
//! fn spawn_map(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(TiledMap {
//!         handle: asset_server.load("maps/orthogonal.tmx"),
//!     });
//! }
//! ```

pub mod components;
pub mod events;
pub mod objects;
pub mod plugin;
pub mod spawn;
pub mod tiles;

pub use plugin::{LayerRenderConfig, TileLayerSystems, TileLayersPlugin};

pub mod prelude {
    //! Common imports for `tmx_cycler_layers` users.

    pub use crate::components::{
        LayerId, LayersInMap, MapGeometry, MapLoadFailed, MapObject, MapTile, ObjectLayer,
        ObjectShape, TileLayer, TiledMap,
    };
    pub use crate::events::{MapSpawned, TileLayerSpawned};
    pub use crate::plugin::{LayerRenderConfig, TileLayerSystems, TileLayersPlugin};
    pub use crate::tiles::{AnimationSpeed, TileAnimation};
}
