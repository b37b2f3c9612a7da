use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use tmx_cycler::{paths, ConfigError, CyclerConfig, TmxCyclerPlugin};

fn main() -> Result<(), ConfigError> {
    let base = paths::asset_base_dir();
    let config = CyclerConfig::load_or_default(&paths::config_path(&base))?;
    let asset_root = paths::asset_root(&base);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.title.clone(),
                        resolution: (config.window_width, config.window_height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn,bevy_ecs_tilemap=warn".to_string(),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .add_plugins(TmxCyclerPlugin::new(config, asset_root))
        .run();

    Ok(())
}
