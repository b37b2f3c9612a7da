//! Application configuration.
//!
//! Read from `assets/cycler.json` when the file exists. Every field is
//! optional; missing fields take their default.
//!
//! ```json
//! {
//!   "maps": ["orthogonal.tmx", "ortho2.tmx", "ortho3.tmx"],
//!   "layer_count": 6,
//!   "fps_refresh_ms": 50
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;
use tmx_cycler_layers::LayerRenderConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config lists no maps")]
    NoMaps,

    #[error("layer_count must be at least 1")]
    NoLayers,

    #[error("fps_refresh_ms must be greater than zero")]
    ZeroRefresh,
}

/// Settings of the map cycler.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CyclerConfig {
    /// Window title
    pub title: String,
    /// Map files, cycled in order
    pub maps: Vec<String>,
    /// Directory of the map files, relative to the asset root
    pub maps_dir: String,
    /// Number of tile layer render slots
    pub layer_count: usize,
    pub window_width: u32,
    pub window_height: u32,
    /// Refresh interval of the FPS panel
    pub fps_refresh_ms: u64,
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            title: "TMX Loader".to_string(),
            maps: vec![
                "orthogonal.tmx".to_string(),
                "ortho2.tmx".to_string(),
                "ortho3.tmx".to_string(),
            ],
            maps_dir: "maps".to_string(),
            layer_count: 6,
            window_width: 640,
            window_height: 640,
            fps_refresh_ms: 50,
        }
    }
}

impl CyclerConfig {
    /// Name of the config file inside the asset root.
    pub const FILE_NAME: &str = "cycler.json";

    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()
    }

    /// Read the config file at `path`, or fall back to the defaults when there is none.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.maps.is_empty() {
            return Err(ConfigError::NoMaps);
        }
        if self.layer_count == 0 {
            return Err(ConfigError::NoLayers);
        }
        if self.fps_refresh_ms == 0 {
            return Err(ConfigError::ZeroRefresh);
        }
        Ok(self)
    }

    pub fn fps_refresh(&self) -> Duration {
        Duration::from_millis(self.fps_refresh_ms)
    }

    /// Render slot configuration for the tile layers.
    pub fn layer_render_config(&self) -> LayerRenderConfig {
        LayerRenderConfig {
            layer_count: self.layer_count,
            ..default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut file = std::fs::File::create(config_file(&dir)).expect("config file");
        file.write_all(content.as_bytes()).expect("write config");
        dir
    }

    fn config_file(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join(CyclerConfig::FILE_NAME)
    }

    #[test]
    fn defaults_cycle_three_maps() {
        let config = CyclerConfig::default();
        assert_eq!(config.maps, vec!["orthogonal.tmx", "ortho2.tmx", "ortho3.tmx"]);
        assert_eq!(config.layer_count, 6);
        assert_eq!(config.fps_refresh(), Duration::from_millis(50));
        assert_eq!((config.window_width, config.window_height), (640, 640));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = CyclerConfig::load_or_default(&config_file(&dir)).expect("defaults");
        assert_eq!(config, CyclerConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = write_config(r#"{ "maps": ["a.tmx", "b.tmx"], "layer_count": 3 }"#);
        let config = CyclerConfig::load_or_default(&config_file(&dir)).expect("config");
        assert_eq!(config.maps, vec!["a.tmx", "b.tmx"]);
        assert_eq!(config.layer_count, 3);
        assert_eq!(config.maps_dir, "maps");
        assert_eq!(config.layer_render_config().layer_count, 3);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = write_config(r#"{ "map": ["a.tmx"] }"#);
        let err = CyclerConfig::load_or_default(&config_file(&dir));
        assert!(matches!(err, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn empty_map_list_is_invalid() {
        let dir = write_config(r#"{ "maps": [] }"#);
        let err = CyclerConfig::load_or_default(&config_file(&dir));
        assert!(matches!(err, Err(ConfigError::NoMaps)));
    }

    #[test]
    fn zero_values_are_invalid() {
        let config = CyclerConfig {
            layer_count: 0,
            ..default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoLayers)));

        let config = CyclerConfig {
            fps_refresh_ms: 0,
            ..default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroRefresh)));
    }
}
