//! Layer components.

use bevy::prelude::*;

/// A tile layer occupying one render slot.
///
/// Slot 0 is the lowest layer of the map and is drawn first.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct TileLayer {
    /// Render slot index (`0..layer_count`)
    pub slot: usize,
}

/// Layer ID assigned by Tiled.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub struct LayerId(pub u32);
