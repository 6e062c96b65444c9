// This file defines the components and resources used by the puzzle scene.
use bevy::prelude::*;

/// A component that marks the parent entity of all stickers. Its rotation is
/// the whole-puzzle orientation.
#[derive(Component)]
pub struct CubeRoot;

/// A component that marks an entity as one sticker of the puzzle.
#[derive(Component)]
pub struct FaceMarker {
    /// Index of the face in the puzzle's face list.
    pub face_index: usize,
}

/// A component that marks the camera, which persists across rebuilds.
#[derive(Component)]
pub struct PersistentCamera;

/// A component that marks an entity as a game entity, which is cleared when
/// the puzzle is rebuilt.
#[derive(Component)]
pub struct GameEntity;

/// A component for the status line of the HUD.
#[derive(Component)]
pub struct StatusText;

/// A resource tracking the finger that drives the current gesture.
#[derive(Resource, Default, Debug)]
pub struct TouchState {
    // Only the first finger down drives a gesture.
    pub active_touch_id: Option<u64>,
}

/// A resource with the debug overlay toggles.
#[derive(Resource, Default, Debug)]
pub struct DebugOverlay {
    pub show_axis: bool,
}
