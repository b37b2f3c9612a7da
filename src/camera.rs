//! The 2D camera looking at the active map.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use tmx_cycler_layers::prelude::{MapGeometry, MapSpawned};

use crate::cycle::ActiveMap;

/// Marks the camera that frames the active map.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MapCamera;

/// Spawn the orthographic map camera.
///
/// Tile layers are ordered by their Z coordinate, so the lowest slot is drawn first.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Map Camera"), Camera2d, MapCamera));
}

/// Centre the camera on a freshly spawned active map and zoom so it fits the window.
pub fn frame_camera_on_map(
    trigger: On<MapSpawned>,
    maps: Query<(&MapGeometry, &Transform), With<ActiveMap>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut Transform, &mut Projection), (With<MapCamera>, Without<ActiveMap>)>,
) {
    let Ok((geometry, map_transform)) = maps.get(trigger.event().entity) else {
        return;
    };

    let viewport = windows
        .single()
        .map(Window::size)
        .unwrap_or(Vec2::ONE);
    let scale = fit_scale(geometry.bounds.size(), viewport);
    let center = map_transform.translation.truncate() + geometry.bounds.center();

    for (mut transform, mut projection) in &mut cameras {
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = scale;
        }
    }

    debug!("Camera centred on {} with scale {}", center, scale);
}

/// Orthographic scale at which `content` fills `viewport` without cropping.
pub fn fit_scale(content: Vec2, viewport: Vec2) -> f32 {
    if content.min_element() <= 0.0 || viewport.min_element() <= 0.0 {
        return 1.0;
    }
    (content / viewport).max_element()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit_keeps_scale() {
        assert_eq!(fit_scale(Vec2::splat(640.0), Vec2::splat(640.0)), 1.0);
    }

    #[test]
    fn larger_axis_decides() {
        assert_eq!(fit_scale(Vec2::new(1280.0, 320.0), Vec2::splat(640.0)), 2.0);
        assert_eq!(fit_scale(Vec2::new(320.0, 160.0), Vec2::splat(640.0)), 0.5);
    }

    #[test]
    fn empty_maps_do_not_zoom() {
        assert_eq!(fit_scale(Vec2::ZERO, Vec2::splat(640.0)), 1.0);
    }
}
