use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::window::{WindowMode, WindowResolution};
use slide_engine::PuzzleConfig;

// Creates the Bevy app with a portrait window sized to the puzzle image.
pub fn build_app(title: &str, config: &PuzzleConfig) -> App {
    let mut app = App::new();

    let asset_plugin = AssetPlugin {
        file_path: "assets".to_string(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: title.to_string(),
            present_mode: bevy::window::PresentMode::Fifo,
            resolution: WindowResolution::new(config.image_width, config.image_height),
            canvas: Some("#gameCanvas".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    app.add_plugins(DefaultPlugins.set(asset_plugin).set(window_plugin));

    // Keeps the frame rate down while nothing moves, mostly for phones.
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(ClearColor(Color::BLACK));

    app
}
