//! Debug functions for the puzzle.
use bevy::{prelude::*, window::*};

use crate::utils::objects::DebugOverlay;
use crate::utils::puzzle::Puzzle;

pub struct DebugFunctionsPlugin;

impl Plugin for DebugFunctionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlay>()
            .add_systems(Update, (toggle_vsync, toggle_overlay, draw_rotation_axis).chain());
    }
}

/// Toggles VSync when the 'V' key is pressed.
fn toggle_vsync(input: Res<ButtonInput<KeyCode>>, mut window: Query<&mut Window>) {
    if input.just_pressed(KeyCode::KeyV) {
        let Ok(mut window) = window.single_mut() else {
            return;
        };

        window.present_mode = if matches!(window.present_mode, PresentMode::AutoVsync) {
            PresentMode::AutoNoVsync
        } else {
            PresentMode::AutoVsync
        };

        info!("PRESENT_MODE: {:?}", window.present_mode);
    }
}

/// Toggles the axis overlay when the 'G' key is pressed.
fn toggle_overlay(input: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<DebugOverlay>) {
    if input.just_pressed(KeyCode::KeyG) {
        overlay.show_axis = !overlay.show_axis;
        info!("Rotation axis overlay: {}", overlay.show_axis);
    }
}

/// Draws the puzzle axes and the axis of the turn being dragged.
fn draw_rotation_axis(mut gizmos: Gizmos, overlay: Res<DebugOverlay>, puzzle: Res<Puzzle>) {
    if !overlay.show_axis {
        return;
    }
    let cube = puzzle.cube();
    let orientation = cube.orientation();
    let reach = cube.order() as f32 * cube.size();

    gizmos.axes(Transform::from_rotation(orientation), reach * 0.75);

    if let Some(turn) = cube.rotate_info() {
        let axis = orientation * turn.record.axis;
        gizmos.arrow(-axis * reach, axis * reach, Color::srgb(1.0, 0.0, 1.0));
    }
}
