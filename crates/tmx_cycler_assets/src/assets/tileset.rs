use std::sync::Arc;

use bevy::{platform::collections::HashMap, prelude::*};

/// Image handles for one tileset of a map.
///
/// Supports both texture atlas tilesets (single spritesheet) and image collection
/// tilesets (individual images per tile). Embedded and external (.tsx) tilesets
/// are both already parsed by the `tiled` crate, so no separate tileset asset
/// is needed.
#[derive(Debug, Clone)]
pub struct TilesetImages {
    /// Raw Tiled tileset data, shared with the parsed map.
    pub tileset: Arc<tiled::Tileset>,

    /// For texture atlas tilesets: single spritesheet image
    pub atlas_image: Option<Handle<Image>>,

    /// For image collection tilesets: individual tile images
    ///
    /// Key: Local tile ID (0-based, NOT GID)
    pub tile_images: HashMap<u32, Handle<Image>>,

    /// Tile size in pixels (width, height)
    pub tile_size: UVec2,

    /// Tileset grid dimensions in tiles (columns, rows), `UVec2::ZERO` for
    /// image collections.
    pub grid_size: UVec2,

    /// Spacing between tiles in the atlas (pixels)
    pub spacing: u32,

    /// Margin around the tileset in the atlas (pixels)
    pub margin: u32,
}

impl TilesetImages {
    /// Check if this is an image collection tileset (vs. texture atlas)
    #[inline]
    pub fn is_image_collection(&self) -> bool {
        self.atlas_image.is_none()
    }

    /// Get the image handle for a specific tile
    ///
    /// For texture atlas tilesets, this returns the atlas image (same for all tiles).
    /// For image collection tilesets, this returns the specific tile's image.
    pub fn get_tile_image(&self, local_tile_id: u32) -> Option<&Handle<Image>> {
        if let Some(ref atlas) = self.atlas_image {
            Some(atlas)
        } else {
            self.tile_images.get(&local_tile_id)
        }
    }

    /// Animation frames `(local tile id, duration ms)` of a tile, if it is animated.
    pub fn animation(&self, local_tile_id: u32) -> Option<Vec<(u32, u32)>> {
        let tile = self.tileset.get_tile(local_tile_id)?;
        let frames = tile.animation.as_ref()?;
        if frames.is_empty() {
            return None;
        }
        Some(
            frames
                .iter()
                .map(|frame| (frame.tile_id, frame.duration))
                .collect(),
        )
    }
}

/// Calculate grid size (columns, rows) for a tileset
///
/// Texture atlases derive rows from total tiles and columns; image collections
/// have no columns and get `UVec2::ZERO`.
pub fn calculate_grid_size(columns: u32, tilecount: u32) -> UVec2 {
    if columns > 0 {
        UVec2::new(columns, tilecount.div_ceil(columns))
    } else {
        UVec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_rows_round_up() {
        assert_eq!(calculate_grid_size(8, 64), UVec2::new(8, 8));
        assert_eq!(calculate_grid_size(8, 65), UVec2::new(8, 9));
    }

    #[test]
    fn image_collection_has_no_grid() {
        assert_eq!(calculate_grid_size(0, 12), UVec2::ZERO);
    }

    fn terrain_images(atlas_image: Option<Handle<Image>>) -> TilesetImages {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../assets/maps/terrain.tsx");
        let tileset = tiled::Loader::new()
            .load_tsx_tileset(&path)
            .expect("sample tileset should parse");
        let mut tile_images = HashMap::default();
        tile_images.insert(2, Handle::default());
        TilesetImages {
            tileset: Arc::new(tileset),
            atlas_image,
            tile_images,
            tile_size: UVec2::splat(32),
            grid_size: UVec2::new(4, 2),
            spacing: 0,
            margin: 0,
        }
    }

    #[test]
    fn image_collections_resolve_per_tile() {
        let images = terrain_images(None);
        assert!(images.is_image_collection());
        assert!(images.get_tile_image(2).is_some());
        assert!(images.get_tile_image(3).is_none());
    }

    #[test]
    fn atlas_serves_every_tile() {
        let images = terrain_images(Some(Handle::default()));
        assert!(images.get_tile_image(7).is_some());
    }

    #[test]
    fn animated_tiles_list_their_frames() {
        let images = terrain_images(None);
        assert_eq!(images.animation(4), Some(vec![(4, 400), (5, 400)]));
        assert_eq!(images.animation(0), None);
    }
}
