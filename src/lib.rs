//! Declaration of the modules for twisty_cube.

/// Puzzle logic, rendering plugins, constants and objects
pub mod utils {
    // Renderer-free puzzle core
    pub mod animation;
    pub mod config;
    pub mod constants;
    pub mod controls;
    pub mod cube;
    pub mod grid;
    pub mod projection;
    pub mod puzzle;
    pub mod solved;
    pub mod throttle;

    // Bevy scene, input and HUD
    pub mod debug_functions;
    pub mod inputs;
    pub mod macros;
    pub mod objects;
    pub mod setup;
    pub mod systems_logic;
    pub mod ui;
}
