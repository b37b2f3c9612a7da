//! Map root components.

use bevy::prelude::*;
use tmx_cycler_assets::prelude::TiledMapAsset;

/// Root component for a Tiled map.
///
/// Spawn an entity with this component to trigger map loading and entity hierarchy creation.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use tmx_cycler_layers::prelude::TiledMap;
/// fn spawn_map(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands.spawn(TiledMap {
///         handle: asset_server.load("maps/orthogonal.tmx"),
///     });
/// }
/// ```
#[derive(Component, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct TiledMap {
    /// Handle to the loaded `TiledMapAsset`.
    pub handle: Handle<TiledMapAsset>,
}

/// Layer entities spawned for a map, in render slot order.
///
/// Its presence marks the map as spawned.
#[derive(Component, Debug, Clone, Default)]
pub struct LayersInMap(pub Vec<Entity>);

/// Marker added when a map or one of its dependencies failed to load.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MapLoadFailed;

/// World-space extent of a spawned map.
///
/// Bevy's Y axis points up while Tiled's points down. Row 0 of the map is the
/// top row, at `y = bounds.max.y`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MapGeometry {
    /// Map size in tiles
    pub size: UVec2,
    /// Tile size in pixels
    pub tile_size: Vec2,
    /// Map bounds in pixels, origin at the bottom-left corner
    pub bounds: Rect,
}

impl MapGeometry {
    pub fn new(width: u32, height: u32, tile_width: f32, tile_height: f32) -> Self {
        Self {
            size: UVec2::new(width, height),
            tile_size: Vec2::new(tile_width, tile_height),
            bounds: Rect::new(
                0.0,
                0.0,
                width as f32 * tile_width,
                height as f32 * tile_height,
            ),
        }
    }

    /// Centre of the tile at Tiled `(column, row)` in map-local space.
    pub fn tile_center(&self, column: u32, row: u32) -> Vec2 {
        let w = self.tile_size.x;
        let h = self.tile_size.y;
        Vec2::new(
            column as f32 * w + w / 2.0,
            self.bounds.height() - row as f32 * h - h / 2.0,
        )
    }

    /// Convert a point in Tiled pixels (Y down) to map-local space.
    pub fn tiled_to_local(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x, self.bounds.height() - point.y)
    }

    /// Convert a Tiled row to a bottom-up row (`bevy_ecs_tilemap`'s `TilePos`).
    pub fn flip_row(&self, row: u32) -> u32 {
        self.size.y.saturating_sub(1).saturating_sub(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_tile_is_at_the_top() {
        let geometry = MapGeometry::new(10, 8, 32.0, 32.0);
        assert_eq!(geometry.tile_center(0, 0), Vec2::new(16.0, 256.0 - 16.0));
    }

    #[test]
    fn bottom_right_tile_is_at_the_bottom() {
        let geometry = MapGeometry::new(10, 8, 32.0, 16.0);
        assert_eq!(geometry.tile_center(9, 7), Vec2::new(9.0 * 32.0 + 16.0, 8.0));
    }

    #[test]
    fn tiled_pixels_flip_against_the_map_height() {
        let geometry = MapGeometry::new(20, 20, 32.0, 32.0);
        assert_eq!(
            geometry.tiled_to_local(Vec2::new(256.0, 256.0)),
            Vec2::new(256.0, 384.0)
        );
        assert_eq!(geometry.tiled_to_local(Vec2::ZERO), Vec2::new(0.0, 640.0));
    }

    #[test]
    fn flipped_rows_count_from_the_bottom() {
        let geometry = MapGeometry::new(4, 5, 16.0, 16.0);
        assert_eq!(geometry.flip_row(0), 4);
        assert_eq!(geometry.flip_row(4), 0);
    }

    #[test]
    fn tile_centers_agree_with_flipped_grid() {
        // A bottom-up grid anchored half a tile in must land on the same centre.
        let geometry = MapGeometry::new(6, 3, 20.0, 10.0);
        for row in 0..3 {
            let grid_y = geometry.flip_row(row) as f32 * 10.0 + 5.0;
            assert_eq!(geometry.tile_center(2, row).y, grid_y);
        }
    }
}
