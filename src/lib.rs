//! # `tmx_cycler`
//!
//! Shows Tiled maps and switches to the next one on every touch or left click.
//!
//! The maps are loaded by `tmx_cycler_assets` and rendered by
//! `tmx_cycler_layers`; this crate holds the application around them: config
//! file, asset paths, the map rotation, states, camera framing and an FPS panel.
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use tmx_cycler::{paths, CyclerConfig, TmxCyclerPlugin};
//!
//! let asset_root = paths::asset_root(&paths::asset_base_dir());
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(TmxCyclerPlugin::new(CyclerConfig::default(), asset_root))
//!     .run();
//! ```

pub mod camera;
pub mod config;
pub mod cycle;
pub mod debug_panel;
pub mod paths;
pub mod plugin;
pub mod rotation;
pub mod state;

pub use config::{ConfigError, CyclerConfig};
pub use plugin::TmxCyclerPlugin;

pub mod prelude {
    pub use crate::config::{ConfigError, CyclerConfig};
    pub use crate::cycle::{ActiveMap, MapCycled};
    pub use crate::plugin::TmxCyclerPlugin;
    pub use crate::rotation::MapRotation;
    pub use crate::state::AppState;
}
