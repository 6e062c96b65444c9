//! Systems logic: wires the puzzle into the frame loop.
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::utils::config::PuzzleConfig;
use crate::utils::inputs::{
    current_view, handle_keyboard_input, handle_mouse_input, handle_touch_input,
};
use crate::utils::objects::{PersistentCamera, TouchState};
use crate::utils::puzzle::Puzzle;
use crate::utils::setup::{rebuild_cube, setup_environment, spawn_persistent_camera, sync_face_transforms};
use crate::utils::ui::{setup_ui, update_status_text};

// Plugin for managing all the puzzle systems.
pub struct SystemsLogicPlugin;

impl Plugin for SystemsLogicPlugin {
    /// Builds the plugin by adding the resources and systems to the app.
    fn build(&self, app: &mut App) {
        app.insert_resource(Puzzle::new(load_config()))
            .init_resource::<TouchState>()
            // Persistent camera, lights and HUD are spawned once
            .add_systems(
                Startup,
                (spawn_persistent_camera, setup_environment, setup_ui),
            )
            .add_systems(
                Update,
                (
                    // Inputs first, so a gesture and its frame land together
                    (handle_keyboard_input, handle_mouse_input, handle_touch_input),
                    tick_puzzle,
                    rebuild_cube,
                    sync_face_transforms,
                    update_status_text,
                )
                    .chain(),
            );
    }
}

/// Reads the configuration file, falling back to defaults.
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> PuzzleConfig {
    use crate::utils::config::ConfigError;
    use crate::utils::constants::game_constants::CONFIG_PATH;

    match PuzzleConfig::load(CONFIG_PATH) {
        Ok(config) => {
            info!("loaded {CONFIG_PATH}");
            config
        }
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            info!("no {CONFIG_PATH} found, using defaults");
            PuzzleConfig::default()
        }
        Err(err) => {
            warn!("{err}, using defaults");
            PuzzleConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> PuzzleConfig {
    PuzzleConfig::default()
}

/// Advances the running animation, if any, by one frame.
fn tick_puzzle(
    mut puzzle: ResMut<Puzzle>,
    camera_query: Query<(&Camera, &GlobalTransform), With<PersistentCamera>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    if !puzzle.controls().is_animating() {
        return;
    }
    let Some(view) = current_view(&camera_query, &window_query) else {
        return;
    };
    puzzle.tick(&view);
}
