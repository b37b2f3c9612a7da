//! Top-level plugin of the map cycler.

use std::path::PathBuf;

use bevy::prelude::*;
use tmx_cycler_assets::TiledMapAssetsPlugin;
use tmx_cycler_layers::{TileLayerSystems, TileLayersPlugin};

use crate::camera::{frame_camera_on_map, spawn_camera};
use crate::config::CyclerConfig;
use crate::cycle::{MapCyclePlugin, load_initial_map};
use crate::debug_panel::DebugPanelPlugin;
use crate::rotation::MapRotation;
use crate::state::AppState;

/// Everything the map cycler adds on top of `DefaultPlugins`.
///
/// Setup runs in a fixed order: the map plugins and their systems are
/// registered, then the camera, then the world resources and states. At
/// startup the first map is requested and the app enters [`AppState::Main`].
pub struct TmxCyclerPlugin {
    pub config: CyclerConfig,
    /// Filesystem path of the asset root, for the map loader
    pub asset_root: PathBuf,
}

impl TmxCyclerPlugin {
    pub fn new(config: CyclerConfig, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            asset_root: asset_root.into(),
        }
    }
}

impl Plugin for TmxCyclerPlugin {
    fn build(&self, app: &mut App) {
        // Map systems: loading, layer spawning, render slots, animators
        app.add_plugins((
            TiledMapAssetsPlugin::new(self.asset_root.clone()),
            TileLayersPlugin::new(self.config.layer_render_config()),
        ));

        // Camera, lowest render slot first
        app.add_systems(Startup, spawn_camera)
            .add_observer(frame_camera_on_map);

        // World resources and states
        let Some(rotation) = MapRotation::new(self.config.maps.clone()) else {
            error!("No maps configured, nothing to show");
            return;
        };
        app.insert_resource(self.config.clone())
            .insert_resource(rotation)
            .init_state::<AppState>()
            .configure_sets(
                Update,
                TileLayerSystems::Animate.run_if(in_state(AppState::Main)),
            )
            .add_plugins((
                MapCyclePlugin,
                DebugPanelPlugin {
                    refresh: self.config.fps_refresh(),
                },
            ));

        // First map, then enter the main state
        app.add_systems(
            Startup,
            (load_initial_map, enter_main).chain().after(spawn_camera),
        );

        info!(
            "Map cycler ready with {} maps and {} layer slots",
            self.config.maps.len(),
            self.config.layer_count
        );
        debug!("Config: {:?}", self.config);
    }
}

pub fn enter_main(mut next_state: ResMut<NextState<AppState>>) {
    next_state.set(AppState::Main);
}
