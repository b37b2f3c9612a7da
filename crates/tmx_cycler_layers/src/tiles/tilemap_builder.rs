//! Converts `TileLayerData` into `bevy_ecs_tilemap` structures.

use std::collections::BTreeMap;

use bevy::prelude::*;
use bevy_ecs_tilemap::prelude::*;
use tmx_cycler_assets::prelude::{TiledMapAsset, TilesetImages};

use super::animations::TileAnimation;
use crate::components::{MapGeometry, MapTile, TileInstance, TileLayerData};

/// Tile grouped by tileset: Tiled `(column, row)` and the instance.
type PlacedTile = (u32, u32, TileInstance);

/// Builds rendering entities for one tile layer.
///
/// `bevy_ecs_tilemap` needs one texture per tilemap, so a layer gets one
/// tilemap per atlas tileset it uses. Image collection tilesets have no
/// single texture and render as sprites instead.
pub struct TilemapBuilder<'a> {
    pub map_entity: Entity,
    pub layer_entity: Entity,
    pub map_asset: &'a TiledMapAsset,
}

impl TilemapBuilder<'_> {
    /// Spawn tilemaps and tile entities as children of the layer entity.
    ///
    /// Returns the number of tiles spawned.
    pub fn build(&self, commands: &mut Commands, tile_data: &TileLayerData) -> usize {
        let tiles_by_tileset = group_by_tileset(tile_data);
        let mut spawned = 0;

        for (tileset_index, tiles) in tiles_by_tileset {
            let Some(tileset) = self.map_asset.tileset(tileset_index) else {
                warn!("Tileset {} has no images, skipping", tileset_index);
                continue;
            };

            spawned += if tileset.is_image_collection() {
                self.create_image_collection_tiles(commands, tiles, tileset, tile_data.opacity)
            } else {
                self.create_atlas_tilemap(commands, tiles, tileset, tile_data)
            };
        }

        spawned
    }

    fn geometry(&self) -> MapGeometry {
        MapGeometry::new(
            self.map_asset.tilemap_size.x,
            self.map_asset.tilemap_size.y,
            self.map_asset.tile_size.x as f32,
            self.map_asset.tile_size.y as f32,
        )
    }

    /// Create sprites for image collection tilesets.
    fn create_image_collection_tiles(
        &self,
        commands: &mut Commands,
        tiles: Vec<PlacedTile>,
        tileset: &TilesetImages,
        opacity: f32,
    ) -> usize {
        let geometry = self.geometry();
        let mut count = 0;

        for (x, y, tile_instance) in tiles {
            let Some(image) = tileset.get_tile_image(tile_instance.tile_id) else {
                warn!("Tile ID {} not found in tileset", tile_instance.tile_id);
                continue;
            };

            let center = geometry.tile_center(x, y);
            let mut transform = Transform::from_xyz(center.x, center.y, 0.0);
            let mut sprite = Sprite {
                image: image.clone(),
                color: Color::WHITE.with_alpha(opacity),
                flip_x: tile_instance.flipped_h,
                flip_y: tile_instance.flipped_v,
                ..default()
            };

            // Diagonal flip is a 90° rotation + horizontal flip
            if tile_instance.flipped_d {
                transform.rotation = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
                sprite.flip_x = !sprite.flip_x;
            }

            commands.spawn((
                sprite,
                transform,
                MapTile {
                    map: self.map_entity,
                    position: UVec2::new(x, y),
                },
                ChildOf(self.layer_entity),
            ));
            count += 1;
        }

        count
    }

    /// Create a tilemap for an atlas tileset.
    fn create_atlas_tilemap(
        &self,
        commands: &mut Commands,
        tiles: Vec<PlacedTile>,
        tileset: &TilesetImages,
        tile_data: &TileLayerData,
    ) -> usize {
        let Some(ref atlas_image) = tileset.atlas_image else {
            warn!("Expected atlas tileset but atlas_image is None");
            return 0;
        };

        if tileset.margin > 0 {
            warn!(
                "Tileset '{}' has a margin of {}px which is not supported, tiles may be misaligned",
                tileset.tileset.name, tileset.margin
            );
        }

        let map_size = TilemapSize {
            x: tile_data.width,
            y: tile_data.height,
        };
        let tile_size = TilemapTileSize {
            x: tileset.tile_size.x as f32,
            y: tileset.tile_size.y as f32,
        };
        let grid_size = TilemapGridSize {
            x: self.map_asset.tile_size.x as f32,
            y: self.map_asset.tile_size.y as f32,
        };
        let spacing = TilemapSpacing {
            x: tileset.spacing as f32,
            y: tileset.spacing as f32,
        };
        let tint = Color::WHITE.with_alpha(tile_data.opacity);

        let geometry = self.geometry();
        let tilemap_entity = commands.spawn(ChildOf(self.layer_entity)).id();
        let mut tile_storage = TileStorage::empty(map_size);
        let count = tiles.len();

        // Tiled has (0,0) at top-left, bevy_ecs_tilemap at bottom-left
        for (x, y, tile_instance) in tiles {
            let tile_pos = TilePos {
                x,
                y: geometry.flip_row(y),
            };

            let mut entity_commands = commands.spawn((
                TileBundle {
                    position: tile_pos,
                    texture_index: TileTextureIndex(tile_instance.tile_id),
                    tilemap_id: TilemapId(tilemap_entity),
                    flip: TileFlip {
                        x: tile_instance.flipped_h,
                        y: tile_instance.flipped_v,
                        d: tile_instance.flipped_d,
                    },
                    color: TileColor(tint),
                    ..default()
                },
                MapTile {
                    map: self.map_entity,
                    position: UVec2::new(x, y),
                },
                ChildOf(tilemap_entity),
            ));

            if let Some(animation) = tileset
                .animation(tile_instance.tile_id)
                .and_then(TileAnimation::from_pairs)
            {
                entity_commands.insert(animation);
            }

            tile_storage.set(&tile_pos, entity_commands.id());
        }

        // TilePos (0, 0) sits at the tilemap origin, so shift by half a cell to
        // keep the layer inside MapGeometry bounds.
        commands.entity(tilemap_entity).insert(TilemapBundle {
            grid_size,
            size: map_size,
            storage: tile_storage,
            texture: TilemapTexture::Single(atlas_image.clone()),
            tile_size,
            spacing,
            map_type: TilemapType::Square,
            transform: Transform::from_xyz(grid_size.x / 2.0, grid_size.y / 2.0, 0.0),
            ..default()
        });

        count
    }
}

/// Group tiles by tileset index, in tileset order.
fn group_by_tileset(tile_data: &TileLayerData) -> BTreeMap<u32, Vec<PlacedTile>> {
    let mut grouped: BTreeMap<u32, Vec<PlacedTile>> = BTreeMap::new();

    for (x, y, tile) in tile_data.iter_tiles() {
        grouped
            .entry(tile.tileset_index)
            .or_default()
            .push((x, y, *tile));
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(tileset_index: u32, tile_id: u32) -> Option<TileInstance> {
        Some(TileInstance {
            tileset_index,
            tile_id,
            flipped_h: false,
            flipped_v: false,
            flipped_d: false,
        })
    }

    #[test]
    fn tiles_are_grouped_per_tileset() {
        let mut data = TileLayerData::empty(3, 1);
        data.set(0, 0, instance(1, 4));
        data.set(1, 0, instance(0, 2));
        data.set(2, 0, instance(1, 5));

        let grouped = group_by_tileset(&data);
        let keys: Vec<u32> = grouped.keys().copied().collect();
        assert_eq!(keys, vec![0, 1]);

        let second: Vec<u32> = grouped[&1].iter().map(|(x, _, _)| *x).collect();
        assert_eq!(second, vec![0, 2]);
    }
}
