//! Filesystem locations of the application's assets.

use std::path::{Path, PathBuf};

use bevy::asset::io::file::FileAssetReader;

use crate::config::CyclerConfig;

/// Asset folder below the base directory, matching `AssetPlugin::file_path`'s default.
pub const ASSETS_DIR: &str = "assets";

/// Directory the application's assets are resolved against.
///
/// Resolved the same way Bevy's file asset reader does it: `BEVY_ASSET_ROOT`,
/// then `CARGO_MANIFEST_DIR`, then the directory of the executable.
pub fn asset_base_dir() -> PathBuf {
    FileAssetReader::get_base_path()
}

/// Filesystem path of the asset root (`<base>/assets`).
pub fn asset_root(base: &Path) -> PathBuf {
    base.join(ASSETS_DIR)
}

/// Filesystem path of the config file (`<base>/assets/cycler.json`).
pub fn config_path(base: &Path) -> PathBuf {
    asset_path(base, ASSETS_DIR, CyclerConfig::FILE_NAME)
}

/// Join an asset file name onto a location below `base`.
///
/// ```
/// # use std::path::Path;
/// # use tmx_cycler::paths::asset_path;
/// let path = asset_path(Path::new("/game"), "assets/maps", "orthogonal.tmx");
/// assert_eq!(path, Path::new("/game/assets/maps/orthogonal.tmx"));
/// ```
pub fn asset_path(base: &Path, asset_loc: impl AsRef<Path>, asset: impl AsRef<Path>) -> PathBuf {
    base.join(asset_loc).join(asset)
}

/// Path of a map file as the `AssetServer` expects it, relative to the asset root.
pub fn map_asset_path(maps_dir: &str, map: &str) -> PathBuf {
    asset_path(Path::new(""), maps_dir, map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_path_joins_location_and_name() {
        let base = Path::new("/opt/tmx_cycler");
        assert_eq!(
            asset_path(base, "assets/maps", "ortho2.tmx"),
            PathBuf::from("/opt/tmx_cycler/assets/maps/ortho2.tmx")
        );
        assert_eq!(
            asset_path(base, "glsl", "positionshader.glsl"),
            base.join("glsl").join("positionshader.glsl")
        );
    }

    #[test]
    fn asset_path_works_on_relative_bases() {
        assert_eq!(
            asset_path(Path::new("game"), "assets", "a.tmx"),
            Path::new("game/assets/a.tmx")
        );
    }

    #[test]
    fn asset_root_is_below_base() {
        assert_eq!(asset_root(Path::new("/srv")), Path::new("/srv/assets"));
    }

    #[test]
    fn config_lives_in_the_asset_root() {
        assert_eq!(
            config_path(Path::new("/srv")),
            Path::new("/srv/assets/cycler.json")
        );
        assert_eq!(
            config_path(Path::new("/srv")).parent(),
            Some(asset_root(Path::new("/srv")).as_path())
        );
    }

    #[test]
    fn map_paths_are_relative_to_the_asset_root() {
        assert_eq!(
            map_asset_path("maps", "ortho3.tmx"),
            Path::new("maps/ortho3.tmx")
        );
    }
}
