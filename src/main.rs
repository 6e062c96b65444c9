//! Start-up for twisty_cube, with window and plugins.

use bevy::{prelude::*, window::*};

use twisty_cube::utils::{debug_functions::DebugFunctionsPlugin, systems_logic::SystemsLogicPlugin};

/// Entry point for the application
fn main() {
    let window = Some(Window {
        title: "Twisty Cube".into(),
        #[cfg(target_arch = "wasm32")]
        canvas: Some("#game-canvas".into()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    });

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: window,
                ..default()
            }),
            SystemsLogicPlugin,
            DebugFunctionsPlugin,
        ))
        .run();
}
