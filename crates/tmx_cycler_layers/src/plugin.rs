//! Plugin for `tmx_cycler_layers`.

use bevy::prelude::*;

use crate::objects::draw_map_objects;
use crate::spawn::process_loaded_maps;
use crate::tiles;

/// Configuration for the layer render slots.
///
/// Slot `n` renders at `z = z_offset + n * z_separation`.
#[derive(Resource, Debug, Clone)]
pub struct LayerRenderConfig {
    /// Number of tile and object layers that get a render slot.
    pub layer_count: usize,
    /// Base Z offset for slot 0.
    pub z_offset: f32,
    /// Z distance between consecutive slots.
    pub z_separation: f32,
    /// Run the tile animators (default: true with "animations" feature)
    pub animate: bool,
    /// Draw object layer outlines
    pub draw_objects: bool,
}

impl LayerRenderConfig {
    /// Z coordinate of a render slot.
    pub fn slot_z(&self, slot: usize) -> f32 {
        self.z_offset + slot as f32 * self.z_separation
    }

    /// Whether a slot index has a renderer.
    pub fn has_slot(&self, slot: usize) -> bool {
        slot < self.layer_count
    }
}

impl Default for LayerRenderConfig {
    fn default() -> Self {
        Self {
            layer_count: 6,
            z_offset: 0.0,
            z_separation: 1.0,
            animate: cfg!(feature = "animations"),
            draw_objects: true,
        }
    }
}

/// System sets of this plugin, so applications can order or gate them.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TileLayerSystems {
    /// Spawning of layer hierarchies for loaded maps (`PreUpdate`).
    Spawn,
    /// Tile animators (`Update`).
    Animate,
    /// Object outlines (`Update`).
    DrawObjects,
}

/// Plugin spawning and rendering the tile and object layers of Tiled maps.
///
/// Add it after `TiledMapAssetsPlugin`.
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use tmx_cycler_layers::{LayerRenderConfig, TileLayersPlugin};
/// App::new().add_plugins(TileLayersPlugin::new(LayerRenderConfig {
///     layer_count: 4,
///     ..default()
/// }));
/// ```
#[derive(Default)]
pub struct TileLayersPlugin {
    /// Configuration for rendering
    pub config: LayerRenderConfig,
}

impl TileLayersPlugin {
    /// Create plugin with custom configuration.
    pub fn new(config: LayerRenderConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TileLayersPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_ecs_tilemap::TilemapPlugin);

        app.insert_resource(self.config.clone());

        app.add_systems(
            PreUpdate,
            process_loaded_maps.in_set(TileLayerSystems::Spawn),
        );

        app.add_observer(tiles::render::on_tile_layer_spawned);

        if self.config.draw_objects {
            app.add_systems(
                Update,
                draw_map_objects.in_set(TileLayerSystems::DrawObjects),
            );
        }

        #[cfg(feature = "animations")]
        if self.config.animate {
            app.init_resource::<tiles::AnimationSpeed>();
            app.add_systems(
                Update,
                tiles::update_tile_animations.in_set(TileLayerSystems::Animate),
            );
        }

        info!(
            "TileLayersPlugin initialized with {} layer slots",
            self.config.layer_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_slots_render_first() {
        let config = LayerRenderConfig {
            z_offset: 2.0,
            z_separation: 10.0,
            ..default()
        };
        assert_eq!(config.slot_z(0), 2.0);
        assert_eq!(config.slot_z(3), 32.0);
        assert!(config.slot_z(1) < config.slot_z(2));
    }

    #[test]
    fn default_has_six_slots() {
        let config = LayerRenderConfig::default();
        assert!(config.has_slot(5));
        assert!(!config.has_slot(6));
    }
}
