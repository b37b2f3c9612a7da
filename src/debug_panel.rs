//! On-screen frames-per-second counter.

use std::time::Duration;

use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::time::common_conditions::on_timer;

/// Marks the FPS text.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FpsText;

/// Shows the FPS in the top-left corner, refreshed every `refresh`.
pub struct DebugPanelPlugin {
    pub refresh: Duration,
}

impl Plugin for DebugPanelPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        }

        app.add_systems(Startup, setup_debug_panel).add_systems(
            Update,
            update_fps_text.run_if(on_timer(self.refresh)),
        );
    }
}

pub fn setup_debug_panel(mut commands: Commands) {
    commands.spawn((
        Name::new("FPS Panel"),
        Text::new(format_fps(0.0)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            padding: UiRect::all(Val::Px(4.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        FpsText,
    ));
}

pub fn update_fps_text(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let Some(fps) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
    else {
        return;
    };

    for mut text in &mut query {
        text.0 = format_fps(fps);
    }
}

/// FPS label, truncated to whole frames.
pub fn format_fps(fps: f64) -> String {
    format!("FPS: {}", fps.max(0.0).trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_is_truncated() {
        assert_eq!(format_fps(59.97), "FPS: 59");
        assert_eq!(format_fps(60.0), "FPS: 60");
    }

    #[test]
    fn bogus_values_show_zero() {
        assert_eq!(format_fps(-3.0), "FPS: 0");
        assert_eq!(format_fps(f64::NAN), "FPS: 0");
    }
}
