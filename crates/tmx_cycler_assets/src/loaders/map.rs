use std::path::{Path, PathBuf};

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    platform::collections::HashMap,
    prelude::*,
    tasks::ConditionalSendFuture,
};
use normalize_path::NormalizePath;
use thiserror::Error;

use crate::assets::{
    map::{TiledMapAsset, calculate_map_bounds},
    tileset::{TilesetImages, calculate_grid_size},
};

/// Asset loader for Tiled maps (.tmx files)
///
/// The map and any external tilesets are parsed by `tiled::Loader` directly from
/// the filesystem. Every tileset image (atlas or per-tile) is registered as a
/// dependency of the map, so the map only counts as loaded once all of its
/// images are.
#[derive(Debug, Clone)]
pub struct TiledMapAssetLoader {
    asset_root: PathBuf,
}

#[derive(Debug, Error)]
pub enum MapLoaderError {
    #[error("Failed to load map: {0}")]
    Tiled(#[from] tiled::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Infinite maps are not supported: {0}")]
    InfiniteMap(String),
}

impl TiledMapAssetLoader {
    /// Create a loader reading files below `asset_root`.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }
}

impl AssetLoader for TiledMapAssetLoader {
    type Asset = TiledMapAsset;
    type Settings = ();
    type Error = MapLoaderError;

    fn load(
        &self,
        _reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let asset_path = load_context.asset_path().path().to_path_buf();
            let full_path = self.asset_root.join(&asset_path);

            let mut loader = tiled::Loader::new();
            let map = loader.load_tmx_map(&full_path)?;

            if map.infinite() {
                return Err(MapLoaderError::InfiniteMap(
                    asset_path.display().to_string(),
                ));
            }

            // Key by tileset_index (iteration order matches tiled's tileset_index())
            let mut tilesets = HashMap::default();
            for (tileset_index, tileset) in map.tilesets().iter().enumerate() {
                let images = load_tileset_images(&self.asset_root, load_context, tileset)?;
                tilesets.insert(tileset_index as u32, images);
            }

            let (tilemap_size, rect) =
                calculate_map_bounds(map.width, map.height, map.tile_width, map.tile_height);

            debug!(
                "Parsed map {} ({}x{} tiles, {} tilesets)",
                asset_path.display(),
                map.width,
                map.height,
                tilesets.len()
            );

            Ok(TiledMapAsset {
                tile_size: UVec2::new(map.tile_width, map.tile_height),
                map,
                tilesets,
                tilemap_size,
                rect,
            })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tmx"]
    }
}

/// Register the images of one tileset as dependencies of the map being loaded.
fn load_tileset_images(
    asset_root: &Path,
    load_context: &mut LoadContext,
    tileset: &std::sync::Arc<tiled::Tileset>,
) -> Result<TilesetImages, MapLoaderError> {
    let (atlas_image, tile_images) = if let Some(ref image) = tileset.image {
        // TEXTURE ATLAS MODE: Single spritesheet
        let handle: Handle<Image> = load_context.load(to_asset_path(asset_root, &image.source)?);
        (Some(handle), HashMap::default())
    } else {
        // IMAGE COLLECTION MODE: Per-tile images
        let mut tile_images = HashMap::default();
        for (tile_id, tile) in tileset.tiles() {
            if let Some(ref tile_image) = tile.image {
                let handle: Handle<Image> =
                    load_context.load(to_asset_path(asset_root, &tile_image.source)?);
                tile_images.insert(tile_id, handle);
            }
        }
        (None, tile_images)
    };

    Ok(TilesetImages {
        tileset: tileset.clone(),
        atlas_image,
        tile_images,
        tile_size: UVec2::new(tileset.tile_width, tileset.tile_height),
        grid_size: calculate_grid_size(tileset.columns, tileset.tilecount),
        spacing: tileset.spacing,
        margin: tileset.margin,
    })
}

/// Convert a filesystem path produced by `tiled` into a Bevy asset path.
///
/// `tiled` joins image sources onto the directory of the file that referenced
/// them, so paths look like `assets/maps/../tiles/grass.png`. Bevy's
/// `AssetServer` rejects `..` components and expects paths relative to the
/// asset root with forward slashes: `tiles/grass.png`.
pub fn to_asset_path(asset_root: &Path, fs_path: &Path) -> Result<String, MapLoaderError> {
    // Path::join does NOT normalize, it just concatenates
    let normalized = fs_path.normalize();
    let root = asset_root.normalize();

    let relative = normalized.strip_prefix(&root).map_err(|_| {
        MapLoaderError::InvalidPath(format!(
            "{} is outside the asset root {}",
            normalized.display(),
            root.display()
        ))
    })?;

    let asset_path = relative
        .to_str()
        .ok_or_else(|| MapLoaderError::InvalidPath(format!("Invalid UTF-8 in path: {relative:?}")))?
        .replace('\\', "/");

    Ok(asset_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_components_are_folded() {
        let path = to_asset_path(
            Path::new("assets"),
            Path::new("assets/maps/../tiles/grass.png"),
        )
        .unwrap();
        assert_eq!(path, "tiles/grass.png");
    }

    #[test]
    fn absolute_root_is_stripped() {
        let path = to_asset_path(
            Path::new("/srv/game/assets"),
            Path::new("/srv/game/assets/maps/./ortho.png"),
        )
        .unwrap();
        assert_eq!(path, "maps/ortho.png");
    }

    #[test]
    fn paths_outside_the_root_are_rejected() {
        let err = to_asset_path(Path::new("assets"), Path::new("elsewhere/grass.png"));
        assert!(matches!(err, Err(MapLoaderError::InvalidPath(_))));
    }
}
