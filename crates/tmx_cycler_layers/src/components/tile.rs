//! Tile layer data components.

use bevy::prelude::*;

/// Raw tile grid data attached to tile layer entities.
///
/// The render observer turns it into tile entities.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TileLayerData {
    /// Layer width in tiles
    pub width: u32,

    /// Layer height in tiles
    pub height: u32,

    /// Layer opacity (`0.0..=1.0`)
    pub opacity: f32,

    /// Flattened grid of tiles: index = y * width + x
    /// None = empty tile
    pub tiles: Vec<Option<TileInstance>>,
}

impl TileLayerData {
    /// Create an empty tile layer with the given dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            opacity: 1.0,
            tiles: vec![None; (width * height) as usize],
        }
    }

    /// Get tile at position (returns None if out of bounds or empty).
    pub fn get(&self, x: u32, y: u32) -> Option<&TileInstance> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize)?.as_ref()
    }

    /// Set tile at position.
    pub fn set(&mut self, x: u32, y: u32, tile: Option<TileInstance>) {
        if x < self.width && y < self.height {
            let index = (y * self.width + x) as usize;
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = tile;
            }
        }
    }

    /// Iterate all non-empty tiles as `(x, y, tile_instance)`, Tiled coordinates.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (u32, u32, &TileInstance)> {
        self.tiles.iter().enumerate().filter_map(|(idx, tile)| {
            tile.as_ref().map(|t| {
                let x = (idx as u32) % self.width;
                let y = (idx as u32) / self.width;
                (x, y, t)
            })
        })
    }

    /// Number of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_some()).count()
    }
}

/// Pre-processed tile data (NOT a component, stored in `TileLayerData`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct TileInstance {
    /// Index of the tileset in the map
    pub tileset_index: u32,

    /// Local tile ID within the tileset (0-based)
    pub tile_id: u32,

    /// Horizontal flip flag
    pub flipped_h: bool,

    /// Vertical flip flag
    pub flipped_v: bool,

    /// Diagonal flip flag
    pub flipped_d: bool,
}

/// A spawned tile entity, tagged with the map it belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct MapTile {
    /// The map root entity
    pub map: Entity,
    /// Tiled `(column, row)` coordinate, row 0 at the top
    pub position: UVec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(tile_id: u32) -> TileInstance {
        TileInstance {
            tileset_index: 0,
            tile_id,
            flipped_h: false,
            flipped_v: false,
            flipped_d: false,
        }
    }

    #[test]
    fn iter_tiles_skips_empty_cells() {
        let mut data = TileLayerData::empty(3, 2);
        data.set(2, 0, Some(tile(7)));
        data.set(0, 1, Some(tile(9)));

        let tiles: Vec<_> = data.iter_tiles().map(|(x, y, t)| (x, y, t.tile_id)).collect();
        assert_eq!(tiles, vec![(2, 0, 7), (0, 1, 9)]);
        assert_eq!(data.tile_count(), 2);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut data = TileLayerData::empty(2, 2);
        data.set(5, 0, Some(tile(1)));
        assert_eq!(data.tile_count(), 0);
        assert!(data.get(5, 0).is_none());
    }
}
