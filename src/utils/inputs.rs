//! Input handling: pointer and touch gestures plus the keyboard shortcuts.
use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved, PrimaryWindow};

use crate::utils::objects::{PersistentCamera, TouchState};
use crate::utils::projection::ViewCamera;
use crate::utils::puzzle::Puzzle;

/// Snapshot of the camera for the renderer-free puzzle code.
pub fn view_camera(camera: &Camera, transform: &GlobalTransform, window: &Window) -> ViewCamera {
    ViewCamera::new(
        Mat4::from(transform.affine()),
        camera.clip_from_view(),
        Vec2::new(window.width(), window.height()),
    )
}

/// Same as [`view_camera`], straight from the queries every input system uses.
pub fn current_view(
    camera_query: &Query<(&Camera, &GlobalTransform), With<PersistentCamera>>,
    window_query: &Query<&Window, With<PrimaryWindow>>,
) -> Option<ViewCamera> {
    let (camera, transform) = camera_query.single().ok()?;
    let window = window_query.single().ok()?;
    Some(view_camera(camera, transform, window))
}

/// Mouse press, move, release and leaving the window.
pub fn handle_mouse_input(
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut cursor_moved: MessageReader<CursorMoved>,
    mut cursor_left: MessageReader<CursorLeft>,
    mut puzzle: ResMut<Puzzle>,
    camera_query: Query<(&Camera, &GlobalTransform), With<PersistentCamera>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let left_window = cursor_left.read().count() > 0;
    let Some(view) = current_view(&camera_query, &window_query) else {
        cursor_moved.clear();
        return;
    };
    if !puzzle.controls().input_enabled() {
        cursor_moved.clear();
        return;
    }

    if mouse.just_pressed(MouseButton::Left)
        && let Ok(window) = window_query.single()
        && let Some(pos) = window.cursor_position()
    {
        puzzle.start(pos, &view);
    }

    // only the newest position of a frame matters, the rest share its timestamp
    if mouse.pressed(MouseButton::Left) {
        if let Some(event) = cursor_moved.read().last() {
            puzzle.drag(event.position, time.elapsed(), &view);
        }
    } else {
        cursor_moved.clear();
    }

    if mouse.just_released(MouseButton::Left) || left_window {
        puzzle.end();
    }
}

/// Single-finger touch gestures. A cancelled touch ends the gesture.
pub fn handle_touch_input(
    touches: Res<Touches>,
    time: Res<Time>,
    mut touch_state: ResMut<TouchState>,
    mut puzzle: ResMut<Puzzle>,
    camera_query: Query<(&Camera, &GlobalTransform), With<PersistentCamera>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(view) = current_view(&camera_query, &window_query) else {
        return;
    };
    if !puzzle.controls().input_enabled() {
        touch_state.active_touch_id = None;
        return;
    }

    for touch in touches.iter_just_pressed() {
        if touch_state.active_touch_id.is_none() && puzzle.start(touch.position(), &view) {
            touch_state.active_touch_id = Some(touch.id());
        }
    }

    let Some(id) = touch_state.active_touch_id else {
        return;
    };

    if let Some(touch) = touches.get_pressed(id)
        && touch.delta() != Vec2::ZERO
    {
        puzzle.drag(touch.position(), time.elapsed(), &view);
    }

    let ended = touches.iter_just_released().any(|touch| touch.id() == id)
        || touches.iter_just_canceled().any(|touch| touch.id() == id);
    if ended {
        puzzle.end();
        touch_state.active_touch_id = None;
    }
}

const ORDER_KEYS: [(KeyCode, u32); 8] = [
    (KeyCode::Digit2, 2),
    (KeyCode::Digit3, 3),
    (KeyCode::Digit4, 4),
    (KeyCode::Digit5, 5),
    (KeyCode::Digit6, 6),
    (KeyCode::Digit7, 7),
    (KeyCode::Digit8, 8),
    (KeyCode::Digit9, 9),
];

/// Keyboard shortcuts for the puzzle operations.
pub fn handle_keyboard_input(keyboard: Res<ButtonInput<KeyCode>>, mut puzzle: ResMut<Puzzle>) {
    if keyboard.just_pressed(KeyCode::KeyS) {
        let steps = puzzle.config().shuffle_steps;
        if puzzle.shuffle(steps) {
            info!("shuffling {steps} turns");
        }
    }
    if (keyboard.just_pressed(KeyCode::KeyU) || keyboard.just_pressed(KeyCode::Backspace))
        && puzzle.undo()
    {
        info!("undo");
    }
    if keyboard.just_pressed(KeyCode::Enter) && puzzle.solve() {
        info!("solving");
    }
    if keyboard.just_pressed(KeyCode::Escape) && puzzle.cancel() {
        info!("cancel requested");
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        puzzle.restore();
    }
    for (key, order) in ORDER_KEYS {
        if keyboard.just_pressed(key) && order != puzzle.order() && !puzzle.set_order(order) {
            warn!("order {order} is outside the configured range");
        }
    }
}
