//! Observer for tile layer spawning events.

use bevy::prelude::*;
use tmx_cycler_assets::prelude::TiledMapAsset;

use super::tilemap_builder::TilemapBuilder;
use crate::components::{TileLayerData, TiledMap};
use crate::events::TileLayerSpawned;

/// Observer that renders tile layers.
///
/// Reads the `TileLayerData` of the spawned layer and builds its tilemaps
/// and tile entities.
pub fn on_tile_layer_spawned(
    trigger: On<TileLayerSpawned>,
    layer_query: Query<&TileLayerData>,
    map_query: Query<&TiledMap>,
    map_assets: Res<Assets<TiledMapAsset>>,
    mut commands: Commands,
) {
    let event = trigger.event();

    let Ok(tile_data) = layer_query.get(event.entity) else {
        warn!(
            "TileLayerSpawned event for entity {:?} but no TileLayerData component found",
            event.entity
        );
        return;
    };

    let Some(map_asset) = map_query
        .get(event.map_entity)
        .ok()
        .and_then(|map| map_assets.get(&map.handle))
    else {
        warn!("Map {:?} of layer {:?} is gone", event.map_entity, event.entity);
        return;
    };

    let builder = TilemapBuilder {
        map_entity: event.map_entity,
        layer_entity: event.entity,
        map_asset,
    };
    let count = builder.build(&mut commands, tile_data);

    debug!(
        "Rendered layer {} in slot {} with {} tiles",
        event.layer_id, event.slot, count
    );
}
