// Constants used by the puzzle, structured into modules.

/// Puzzle geometry and turn tuning
pub mod cube_constants {
    use std::f32::consts::{PI, TAU};

    pub const DEFAULT_ORDER: u32 = 3;
    pub const DEFAULT_SIZE: f32 = 1.0;

    // Valid range of orders accepted by `set_order`.
    pub const MIN_ORDER: u32 = 2;
    pub const MAX_ORDER: u32 = 20;

    // Drag-to-angle gain while a slice is dragged (angle per calibration length).
    pub const SLICE_DRAG_GAIN: f32 = 1.5 * PI;
    // Drag-to-angle gain while the whole puzzle is dragged.
    pub const FREE_ROTATE_GAIN: f32 = TAU;

    // Number of steps a quarter turn is split into when snapping a released slice.
    pub const COMPENSATION_STEPS: u32 = 20;
    // Number of steps a quarter turn is split into when undoing.
    pub const UNDO_STEPS: u32 = 10;

    // Committed angles closer than this to the identity leave faces untouched.
    pub const COMMIT_THRESHOLD: f32 = 0.25 * PI;

    // Tolerance for comparing coordinates that already lie on the grid.
    pub const GRID_EPSILON: f32 = 1e-4;
}

/// Gesture handling
pub mod gesture_constants {
    pub const DEFAULT_SHUFFLE_STEPS: u32 = 10;

    // Maximum drag-move rate for small and large puzzles.
    pub const MOVE_RATE_HZ: f32 = 60.0;
    pub const LARGE_ORDER_MOVE_RATE_HZ: f32 = 30.0;
    // Orders at or above this use the large-puzzle move rate.
    pub const LARGE_ORDER_THRESHOLD: u32 = 10;
}

/// 3D camera
pub mod camera_3d_constants {
    use bevy::prelude::Vec3;

    // Direction from the puzzle center to the camera.
    pub const CAMERA_3D_DIRECTION: Vec3 = Vec3::new(1.0, 1.1, 1.6);
    // Camera distance per cell of puzzle edge length.
    pub const CAMERA_3D_DISTANCE_PER_CELL: f32 = 3.3;
    pub const CAMERA_3D_FOV: f32 = std::f32::consts::FRAC_PI_4;
}

/// Sticker rendering
pub mod sticker_constants {
    use bevy::prelude::Color;

    // Share of the cell edge covered by the colored sticker.
    pub const STICKER_SCALE: f32 = 0.88;
    // Offset of the black backing plate behind each sticker.
    pub const BACKING_OFFSET: f32 = 0.002;

    pub const BACKING_COLOR: Color = Color::srgb(0.05, 0.05, 0.05);
    pub const BACKGROUND_COLOR: Color = Color::srgb(0.12, 0.13, 0.16);

    // +X, -X, +Y, -Y, +Z, -Z
    pub const STICKER_COLORS: [Color; 6] = [
        Color::srgb(0.85, 0.1, 0.1),
        Color::srgb(1.0, 0.5, 0.0),
        Color::srgb(0.95, 0.95, 0.95),
        Color::srgb(1.0, 0.85, 0.0),
        Color::srgb(0.0, 0.6, 0.25),
        Color::srgb(0.05, 0.3, 0.85),
    ];
}

/// Generic game constants
pub mod game_constants {
    // Seed for the random number generator.
    pub const SEED: u64 = 69;

    // Configuration file read at startup on native targets.
    pub const CONFIG_PATH: &str = "puzzle.toml";
}
