//! Application lifecycle states.

use bevy::prelude::*;

/// Application states.
///
/// Map input and tile animators only run in `Main`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// Plugins registered, first map not yet requested
    #[default]
    Setup,
    Main,
}
