//! Status HUD.
use bevy::prelude::*;

use crate::log;
use crate::utils::controls::GestureState;
use crate::utils::objects::StatusText;
use crate::utils::puzzle::Puzzle;

pub fn setup_ui(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        StatusText,
    ));

    commands.spawn((
        Text::new("S: Shuffle | U: Undo | Enter: Solve | Esc: Cancel | R: Restore | 2-9: Order"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.8, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

/// One-line summary of the puzzle.
pub fn status_line(puzzle: &Puzzle) -> String {
    let cube = puzzle.cube();
    let order = cube.order();
    let moves = cube.steps().iter().filter(|record| !record.is_noop()).count();
    let activity = match puzzle.state() {
        GestureState::Idle if cube.is_solved() => "solved",
        GestureState::Idle => "ready",
        GestureState::Dragging { slice_locked: true } => "turning",
        GestureState::Dragging { slice_locked: false } => "looking around",
        GestureState::Compensating => "snapping",
        GestureState::Shuffling => "shuffling",
        GestureState::Undoing => "undoing",
        GestureState::Solving => "solving",
    };
    let stopping = if puzzle.controls().cancel_requested() {
        " (stopping)"
    } else {
        ""
    };
    format!("{order}x{order}x{order} | moves: {moves} | {activity}{stopping}")
}

pub fn update_status_text(
    puzzle: Res<Puzzle>,
    mut text_query: Query<&mut Text, With<StatusText>>,
    mut last_state: Local<Option<GestureState>>,
) {
    if !puzzle.is_changed() {
        return;
    }
    let state = puzzle.state();
    if *last_state == Some(GestureState::Solving)
        && state == GestureState::Idle
        && puzzle.cube().is_solved()
    {
        log!("🎉 Solved!");
    }
    *last_state = Some(state);

    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    let line = status_line(&puzzle);
    if text.0 != line {
        text.0 = line;
    }
}
