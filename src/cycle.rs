//! Switching to the next map on touch or click.

use bevy::prelude::*;
use tmx_cycler_layers::prelude::TiledMap;

use crate::config::CyclerConfig;
use crate::paths::map_asset_path;
use crate::rotation::MapRotation;
use crate::state::AppState;

/// Marks the map currently on screen.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ActiveMap;

/// Fired after the rotation advanced to a new map.
#[derive(Event, Debug, Clone)]
pub struct MapCycled {
    /// Rotation index after the advance
    pub index: usize,
    /// The map to show
    pub map: String,
}

/// Map cycling: input handling and swapping of the active map.
///
/// Expects `CyclerConfig`, `MapRotation` and the `AppState` state to exist.
pub struct MapCyclePlugin;

impl Plugin for MapCyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(swap_active_map).add_systems(
            Update,
            request_next_map.run_if(in_state(AppState::Main)),
        );
    }
}

/// Spawn the map the rotation currently points at.
pub fn load_initial_map(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<CyclerConfig>,
    rotation: Res<MapRotation>,
) {
    spawn_active_map(&mut commands, &asset_server, &config, rotation.current());
}

/// Advance the rotation on a left click or a new touch.
pub fn request_next_map(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut rotation: ResMut<MapRotation>,
    mut commands: Commands,
) {
    if !(mouse.just_pressed(MouseButton::Left) || touches.any_just_pressed()) {
        return;
    }

    let map = rotation.advance().to_string();
    info!("Switching to map {} (index {})", map, rotation.index());

    commands.trigger(MapCycled {
        index: rotation.index(),
        map,
    });
}

/// Despawn the active map with all its layers and tiles, then spawn the next one.
pub fn swap_active_map(
    trigger: On<MapCycled>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<CyclerConfig>,
    active_maps: Query<Entity, With<ActiveMap>>,
) {
    for entity in &active_maps {
        commands.entity(entity).despawn();
    }

    spawn_active_map(&mut commands, &asset_server, &config, &trigger.event().map);
}

fn spawn_active_map(
    commands: &mut Commands,
    asset_server: &AssetServer,
    config: &CyclerConfig,
    map: &str,
) -> Entity {
    let path = map_asset_path(&config.maps_dir, map);
    debug!("Loading map {}", path.display());

    commands
        .spawn((
            Name::new(format!("Map: {map}")),
            TiledMap {
                handle: asset_server.load(path),
            },
            ActiveMap,
        ))
        .id()
}
