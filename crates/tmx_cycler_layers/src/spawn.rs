//! Reactive spawning of map hierarchies.

use bevy::asset::RecursiveDependencyLoadState;
use bevy::prelude::*;
use tiled::LayerType;
use tmx_cycler_assets::prelude::TiledMapAsset;

use crate::components::{
    LayerId, LayersInMap, MapGeometry, MapLoadFailed, MapObject, ObjectLayer, ObjectShape,
    TileInstance, TileLayer, TileLayerData, TiledMap,
};
use crate::events::{MapSpawned, TileLayerSpawned};
use crate::plugin::LayerRenderConfig;

/// Reactive system that detects when a `TiledMapAsset` and all its images are
/// loaded and spawns the layer hierarchy.
///
/// Runs in `PreUpdate` before user systems. Maps already spawned carry
/// `LayersInMap`; maps that failed to load carry `MapLoadFailed`. Both are
/// skipped.
pub fn process_loaded_maps(
    asset_server: Res<AssetServer>,
    map_assets: Res<Assets<TiledMapAsset>>,
    config: Res<LayerRenderConfig>,
    mut commands: Commands,
    map_query: Query<(Entity, &TiledMap), (Without<LayersInMap>, Without<MapLoadFailed>)>,
) {
    for (map_entity, tiled_map) in &map_query {
        match asset_server.get_recursive_dependency_load_state(&tiled_map.handle) {
            Some(RecursiveDependencyLoadState::Loaded) => {}
            Some(RecursiveDependencyLoadState::Failed(err)) => {
                error!("Map entity {:?} failed to load: {}", map_entity, err);
                commands.entity(map_entity).insert(MapLoadFailed);
                continue;
            }
            _ => continue,
        }

        let Some(map_asset) = map_assets.get(&tiled_map.handle) else {
            warn!("Map asset loaded but not found in Assets resource!");
            continue;
        };

        let map_name = asset_server
            .get_path(&tiled_map.handle)
            .and_then(|p| {
                p.path()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Map".to_string());

        debug!("Spawning map hierarchy for '{}'", map_name);
        commands
            .entity(map_entity)
            .insert(Name::new(format!("Map: {map_name}")));

        let layers = spawn_map(&mut commands, map_entity, map_asset, &config);

        info!(
            "Map '{}' spawned with {} layers",
            map_name,
            layers.len()
        );

        commands.entity(map_entity).insert(LayersInMap(layers));
        commands
            .entity(map_entity)
            .trigger(|entity| MapSpawned { entity });
    }
}

/// A layer flattened out of the map's layer tree.
#[derive(Debug, Clone)]
pub struct LayerPlan {
    /// Tiled layer ID
    pub layer_id: u32,
    /// Layer name
    pub name: String,
    /// Accumulated offset of the layer and its parent groups (Tiled pixels, Y down)
    pub offset: Vec2,
    pub content: LayerContent,
}

/// What a planned layer renders.
#[derive(Debug, Clone)]
pub enum LayerContent {
    Tiles(TileLayerData),
    Objects(Vec<ObjectPlan>),
}

/// A shape object waiting to be spawned.
#[derive(Debug, Clone)]
pub struct ObjectPlan {
    pub name: String,
    /// Anchor in Tiled pixels, Y down
    pub position: Vec2,
    /// Clockwise rotation in degrees
    pub rotation: f32,
    pub object: MapObject,
}

/// Flatten the visible tile and object layers of a map in document order.
///
/// Group layers contribute their offset and opacity to their children. Hidden
/// layers and everything inside hidden groups are left out. Image layers have
/// no renderer and are skipped.
pub fn collect_layers(map: &tiled::Map) -> Vec<LayerPlan> {
    let mut plans = Vec::new();
    collect_into(
        map.layers(),
        Vec2::ZERO,
        1.0,
        map.tilesets().len(),
        &mut plans,
    );
    plans
}

fn collect_into<'map>(
    layers: impl Iterator<Item = tiled::Layer<'map>>,
    parent_offset: Vec2,
    parent_opacity: f32,
    tileset_count: usize,
    plans: &mut Vec<LayerPlan>,
) {
    for layer in layers {
        if !layer.visible {
            debug!("Skipping hidden layer '{}'", layer.name);
            continue;
        }

        let offset = parent_offset + Vec2::new(layer.offset_x, layer.offset_y);
        let opacity = parent_opacity * layer.opacity;

        let content = match layer.layer_type() {
            LayerType::Tiles(tile_layer) => {
                let Some(data) = build_tile_layer_data(&tile_layer, opacity, tileset_count) else {
                    warn!("Tile layer '{}' is not finite, skipping", layer.name);
                    continue;
                };
                debug!("Tile layer '{}' has {} tiles", layer.name, data.tile_count());
                LayerContent::Tiles(data)
            }
            LayerType::Objects(object_layer) => {
                LayerContent::Objects(build_object_plans(&object_layer, opacity))
            }
            LayerType::Group(group) => {
                collect_into(group.layers(), offset, opacity, tileset_count, plans);
                continue;
            }
            LayerType::Image(_) => {
                debug!("Skipping image layer '{}'", layer.name);
                continue;
            }
        };

        plans.push(LayerPlan {
            layer_id: layer.id(),
            name: layer.name.clone(),
            offset,
            content,
        });
    }
}

/// Spawn one entity per tile or object layer under `map_entity`.
///
/// Layers get render slots in document order. Layers beyond
/// `config.layer_count` are not spawned.
///
/// # Returns
///
/// The spawned layer entities, in slot order
pub fn spawn_map(
    commands: &mut Commands,
    map_entity: Entity,
    map_asset: &TiledMapAsset,
    config: &LayerRenderConfig,
) -> Vec<Entity> {
    let geometry = MapGeometry::new(
        map_asset.tilemap_size.x,
        map_asset.tilemap_size.y,
        map_asset.tile_size.x as f32,
        map_asset.tile_size.y as f32,
    );
    commands.entity(map_entity).insert(geometry);

    let plans = collect_layers(&map_asset.map);
    if plans.len() > config.layer_count {
        let skipped: Vec<&str> = plans[config.layer_count..]
            .iter()
            .map(|plan| plan.name.as_str())
            .collect();
        warn!(
            "Map has {} layers but only {} render slots, skipping {:?}",
            plans.len(),
            config.layer_count,
            skipped
        );
    }

    let mut layer_entities = Vec::with_capacity(plans.len().min(config.layer_count));

    for (slot, plan) in plans.into_iter().enumerate() {
        if !config.has_slot(slot) {
            break;
        }

        let transform = Transform::from_xyz(
            plan.offset.x,
            -plan.offset.y, // Tiled's Y-down to Bevy's Y-up
            config.slot_z(slot),
        );
        let name = Name::new(format!("Layer: {}", plan.name));

        let layer_entity = match plan.content {
            LayerContent::Tiles(data) => {
                let layer_entity = commands
                    .spawn((
                        TileLayer { slot },
                        LayerId(plan.layer_id),
                        transform,
                        name,
                        data,
                        ChildOf(map_entity),
                    ))
                    .id();

                commands.trigger(TileLayerSpawned {
                    entity: layer_entity,
                    map_entity,
                    slot,
                    layer_id: plan.layer_id,
                });
                layer_entity
            }
            LayerContent::Objects(objects) => {
                let layer_entity = commands
                    .spawn((
                        ObjectLayer { slot },
                        LayerId(plan.layer_id),
                        transform,
                        name,
                        ChildOf(map_entity),
                    ))
                    .id();
                spawn_objects(commands, layer_entity, &geometry, objects);
                layer_entity
            }
        };

        layer_entities.push(layer_entity);
    }

    layer_entities
}

/// Convert the visible shape objects of an object layer.
///
/// The layer colour tints every object when set. Text objects are skipped.
pub fn build_object_plans(object_layer: &tiled::ObjectLayer, opacity: f32) -> Vec<ObjectPlan> {
    let layer_color = object_layer
        .colour
        .map(|c| Color::srgba_u8(c.red, c.green, c.blue, c.alpha));

    object_layer
        .objects()
        .filter(|object| object.visible)
        .filter_map(|object| {
            let Some(shape) = ObjectShape::from_tiled(&object.shape) else {
                debug!("Skipping text object {}", object.id());
                return None;
            };
            let color = layer_color.unwrap_or_else(|| shape.default_color());
            let alpha = color.alpha() * opacity.clamp(0.0, 1.0);
            Some(ObjectPlan {
                name: object.name.clone(),
                position: Vec2::new(object.x, object.y),
                rotation: object.rotation,
                object: MapObject {
                    id: object.id(),
                    shape,
                    color: color.with_alpha(alpha),
                },
            })
        })
        .collect()
}

fn spawn_objects(
    commands: &mut Commands,
    layer_entity: Entity,
    geometry: &MapGeometry,
    objects: Vec<ObjectPlan>,
) {
    for plan in objects {
        let anchor = geometry.tiled_to_local(plan.position);
        let name = if plan.name.is_empty() {
            format!("Object {}", plan.object.id)
        } else {
            format!("Object: {}", plan.name)
        };
        commands.spawn((
            Transform::from_xyz(anchor.x, anchor.y, 0.0)
                // Tiled rotates clockwise
                .with_rotation(Quat::from_rotation_z(-plan.rotation.to_radians())),
            Name::new(name),
            plan.object,
            ChildOf(layer_entity),
        ));
    }
}

/// Build `TileLayerData` from a tile layer.
///
/// Pre-processes all tiles: checks tileset indices, extracts flip flags.
/// Returns `None` for infinite layers.
pub fn build_tile_layer_data(
    tile_layer: &tiled::TileLayer,
    opacity: f32,
    tileset_count: usize,
) -> Option<TileLayerData> {
    let tiled::TileLayer::Finite(finite) = tile_layer else {
        return None;
    };

    let width = finite.width();
    let height = finite.height();

    let mut tile_data = TileLayerData::empty(width, height);
    tile_data.opacity = opacity.clamp(0.0, 1.0);

    for y in 0..height {
        for x in 0..width {
            let Some(tile) = finite.get_tile(x as i32, y as i32) else {
                continue;
            };

            let tileset_index = tile.tileset_index();
            if tileset_index >= tileset_count {
                warn!(
                    "Tile at ({}, {}) references tileset index {} which doesn't exist",
                    x, y, tileset_index
                );
                continue;
            }

            tile_data.set(
                x,
                y,
                Some(TileInstance {
                    tileset_index: tileset_index as u32,
                    tile_id: tile.id(),
                    flipped_h: tile.flip_h,
                    flipped_v: tile.flip_v,
                    flipped_d: tile.flip_d,
                }),
            );
        }
    }

    Some(tile_data)
}
