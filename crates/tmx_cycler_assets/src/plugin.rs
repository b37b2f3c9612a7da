use std::path::PathBuf;

use bevy::prelude::*;

use crate::assets::map::TiledMapAsset;
use crate::loaders::map::TiledMapAssetLoader;

/// Plugin that registers the Tiled map asset type and its loader.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use tmx_cycler_assets::TiledMapAssetsPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TiledMapAssetsPlugin::new("assets"))
///     .run();
/// ```
///
/// The `tiled` crate reads map and tileset files straight from disk, so the
/// loader needs to know where Bevy's asset root lives on the filesystem. It must
/// match the root the `AssetServer` reads from.
///
/// This is a **Layer 1** plugin: no entity spawning, no rendering.
#[derive(Debug, Clone)]
pub struct TiledMapAssetsPlugin {
    /// Filesystem directory that asset paths are relative to.
    pub asset_root: PathBuf,
}

impl TiledMapAssetsPlugin {
    /// Create the plugin with an explicit asset root.
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }
}

impl Default for TiledMapAssetsPlugin {
    fn default() -> Self {
        Self::new("assets")
    }
}

impl Plugin for TiledMapAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<TiledMapAsset>()
            .register_asset_loader(TiledMapAssetLoader::new(self.asset_root.clone()));

        debug!(
            "Tiled map loader registered with asset root {}",
            self.asset_root.display()
        );
    }
}
