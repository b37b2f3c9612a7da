use bevy::{platform::collections::HashMap, prelude::*};

use crate::assets::tileset::TilesetImages;

/// Bevy asset wrapper for Tiled maps (.tmx files).
#[derive(TypePath, Asset, Debug)]
pub struct TiledMapAsset {
    /// The raw Tiled map data (PRESERVE AS-IS)
    pub map: tiled::Map,

    /// Image handles per tileset.
    /// Key: Tileset index (matches `LayerTile::tileset_index()`)
    pub tilesets: HashMap<u32, TilesetImages>,

    // ===== PROCESSED DATA FOR BEVY =====
    /// Map size in tiles
    pub tilemap_size: UVec2,

    /// Map tile size in pixels
    pub tile_size: UVec2,

    /// Map bounding box in pixels, origin at the bottom-left
    pub rect: Rect,
}

impl TiledMapAsset {
    /// Look up the images of a tileset by its index in the map.
    pub fn tileset(&self, tileset_index: u32) -> Option<&TilesetImages> {
        self.tilesets.get(&tileset_index)
    }
}

/// Compute map size in tiles and the pixel bounding box of a finite map.
pub fn calculate_map_bounds(width: u32, height: u32, tile_width: u32, tile_height: u32) -> (UVec2, Rect) {
    let tilemap_size = UVec2::new(width, height);
    let rect = Rect::new(
        0.0,
        0.0,
        width as f32 * tile_width as f32,
        height as f32 * tile_height as f32,
    );
    (tilemap_size, rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_span_all_tiles() {
        let (size, rect) = calculate_map_bounds(20, 15, 32, 16);
        assert_eq!(size, UVec2::new(20, 15));
        assert_eq!(rect.min, Vec2::ZERO);
        assert_eq!(rect.max, Vec2::new(640.0, 240.0));
    }

    #[test]
    fn empty_map_has_empty_bounds() {
        let (size, rect) = calculate_map_bounds(0, 0, 32, 32);
        assert_eq!(size, UVec2::ZERO);
        assert_eq!(rect.size(), Vec2::ZERO);
    }
}
