//! Events fired while a map hierarchy is spawned.

use bevy::prelude::*;

/// Fired when a tile layer entity is spawned.
///
/// The render observer listens to this to build tilemaps for the layer.
#[derive(Event, Debug, Clone)]
pub struct TileLayerSpawned {
    /// The spawned layer entity
    pub entity: Entity,
    /// The parent map entity
    pub map_entity: Entity,
    /// Render slot of the layer
    pub slot: usize,
    /// The layer's ID from Tiled
    pub layer_id: u32,
}

/// Fired when a map's entity hierarchy is fully spawned.
///
/// This is an `EntityEvent` that can be observed on the map entity.
///
/// ```ignore
/// commands.spawn(TiledMap { ... })
///     .observe(|trigger: On<MapSpawned>| {
///         info!("Map ready: {:?}", trigger.event().entity);
///     });
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct MapSpawned {
    /// The map entity
    #[event_target]
    pub entity: Entity,
}
