//! Gesture state machine.
//!
//! Pointer gestures and the bulk operations (shuffle, undo, solve) share one
//! mode so that at most one of them ever touches the puzzle.
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::utils::animation::{Compensation, InverseAnimation};
use crate::utils::config::PuzzleConfig;
use crate::utils::cube::Cube;
use crate::utils::projection::ViewCamera;
use crate::utils::throttle::Throttle;

/// Face draws attempted per shuffle turn before the shuffle gives up.
const SHUFFLE_ATTEMPTS: u32 = 8;

/// Observable state of the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    /// A pointer is down. `slice_locked` is true when the gesture started on a
    /// face and therefore turns a slice rather than the whole puzzle.
    Dragging { slice_locked: bool },
    Compensating,
    Shuffling,
    Undoing,
    Solving,
}

#[derive(Debug, Clone)]
enum Mode {
    Idle,
    Dragging {
        face: Option<usize>,
        start: Vec2,
        last: Vec2,
    },
    Compensating(Compensation),
    Shuffling {
        remaining: u32,
        current: Option<Compensation>,
    },
    Undoing(InverseAnimation),
    Solving(InverseAnimation),
}

#[derive(Debug, Clone)]
pub struct Controls {
    mode: Mode,
    throttle: Throttle,
    compensation_steps: u32,
    undo_steps: u32,
    free_rotate_gain: f32,
    cancel_requested: bool,
}

impl Controls {
    pub fn new(config: &PuzzleConfig, order: u32) -> Self {
        Self {
            mode: Mode::Idle,
            throttle: Throttle::new(config.move_interval(order)),
            compensation_steps: config.compensation_steps,
            undo_steps: config.undo_steps,
            free_rotate_gain: config.free_rotate_gain,
            cancel_requested: false,
        }
    }

    pub fn state(&self) -> GestureState {
        match &self.mode {
            Mode::Idle => GestureState::Idle,
            Mode::Dragging { face, .. } => GestureState::Dragging {
                slice_locked: face.is_some(),
            },
            Mode::Compensating(_) => GestureState::Compensating,
            Mode::Shuffling { .. } => GestureState::Shuffling,
            Mode::Undoing(_) => GestureState::Undoing,
            Mode::Solving(_) => GestureState::Solving,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, Mode::Idle)
    }

    /// Whether pointer and touch input is accepted. Input is locked for the
    /// whole duration of a shuffle, undo or solve.
    pub fn input_enabled(&self) -> bool {
        !matches!(
            self.mode,
            Mode::Shuffling { .. } | Mode::Undoing(_) | Mode::Solving(_)
        )
    }

    /// Whether `tick` has work to do.
    pub fn is_animating(&self) -> bool {
        !matches!(self.mode, Mode::Idle | Mode::Dragging { .. })
    }

    /// Whether a running shuffle or solve has been asked to stop.
    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    /// Pointer pressed at `pos`. Returns whether a gesture started.
    pub fn operate_start(&mut self, cube: &Cube, pos: Vec2, view: &ViewCamera) -> bool {
        if !self.is_idle() {
            return false;
        }
        let face = view.viewport_ray(pos).and_then(|ray| cube.hit_test(ray));
        log::trace!("gesture started at {pos:?} on face {face:?}");
        self.throttle.reset();
        self.mode = Mode::Dragging {
            face,
            start: pos,
            last: pos,
        };
        true
    }

    /// Pointer moved to `pos` at time `now`. Returns whether the move was
    /// handled (not throttled and part of a gesture).
    pub fn operate_drag(&mut self, cube: &mut Cube, pos: Vec2, now: Duration, view: &ViewCamera) -> bool {
        let Mode::Dragging { face, start, last } = &mut self.mode else {
            return false;
        };
        if !self.throttle.ready(now) {
            return false;
        }

        match *face {
            Some(index) => {
                cube.rotate_level(*start, pos, index, view);
            }
            None => {
                let movement = pos - *last;
                let move_for_half_pi = cube.drag_for_half_pi(view);
                if movement != Vec2::ZERO && move_for_half_pi > f32::EPSILON {
                    let angle = self.free_rotate_gain * movement.length() / move_for_half_pi;
                    let axis = view.right() * movement.y + view.up() * movement.x;
                    cube.rotate_whole(axis, angle);
                }
            }
        }
        *last = pos;
        true
    }

    /// Pointer released. A locked slice starts snapping to a quarter turn.
    pub fn operate_end(&mut self, cube: &mut Cube) -> bool {
        let Mode::Dragging { face, .. } = self.mode else {
            return false;
        };
        self.mode = match face.and(cube.rotate_compensation(self.compensation_steps)) {
            Some(compensation) => Mode::Compensating(compensation),
            None => Mode::Idle,
        };
        true
    }

    /// Starts `steps` random turns. Rejected unless idle.
    pub fn shuffle(&mut self, steps: u32) -> bool {
        if !self.is_idle() || steps == 0 {
            log::debug!("shuffle ignored in {:?}", self.state());
            return false;
        }
        self.cancel_requested = false;
        self.mode = Mode::Shuffling {
            remaining: steps,
            current: None,
        };
        true
    }

    /// Starts undoing the latest turn that moved something.
    pub fn undo(&mut self, cube: &mut Cube) -> bool {
        if !self.is_idle() {
            log::debug!("undo ignored in {:?}", self.state());
            return false;
        }
        let Some(record) = cube.pop_undoable() else {
            return false;
        };
        self.mode = Mode::Undoing(InverseAnimation::new(record, self.undo_steps));
        true
    }

    /// Starts undoing the whole history, one turn after the other.
    pub fn solve(&mut self, cube: &mut Cube) -> bool {
        if !self.is_idle() {
            log::debug!("solve ignored in {:?}", self.state());
            return false;
        }
        let Some(record) = cube.pop_undoable() else {
            return false;
        };
        self.cancel_requested = false;
        self.mode = Mode::Solving(InverseAnimation::new(record, self.undo_steps));
        true
    }

    /// Asks a running shuffle or solve to stop once its current turn settled.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.mode, Mode::Shuffling { .. } | Mode::Solving(_)) {
            self.cancel_requested = true;
            return true;
        }
        false
    }

    /// Advances the active animation by one frame. Returns whether anything
    /// is still animating.
    pub fn tick<R: Rng>(&mut self, cube: &mut Cube, rng: &mut R, view: &ViewCamera) -> bool {
        let more = match &mut self.mode {
            Mode::Idle | Mode::Dragging { .. } => return false,
            Mode::Compensating(compensation) => compensation.tick(cube),
            Mode::Undoing(animation) => animation.tick(cube),
            Mode::Solving(animation) => {
                if animation.tick(cube) {
                    true
                } else if self.cancel_requested {
                    log::debug!("solve cancelled with {} turn(s) left", cube.steps().len());
                    false
                } else if let Some(record) = cube.pop_undoable() {
                    *animation = InverseAnimation::new(record, self.undo_steps);
                    true
                } else {
                    false
                }
            }
            Mode::Shuffling { remaining, current } => {
                if let Some(compensation) = current {
                    if compensation.tick(cube) {
                        return true;
                    }
                    *current = None;
                }
                if *remaining == 0 || self.cancel_requested {
                    false
                } else {
                    *remaining -= 1;
                    *current = start_random_turn(cube, rng, view, self.compensation_steps);
                    current.is_some()
                }
            }
        };

        if !more {
            self.mode = Mode::Idle;
            self.cancel_requested = false;
        }
        more
    }
}

/// Drags a random face by a random offset, the way a user would.
fn start_random_turn<R: Rng>(
    cube: &mut Cube,
    rng: &mut R,
    view: &ViewCamera,
    steps: u32,
) -> Option<Compensation> {
    if cube.faces().is_empty() {
        return None;
    }
    let half_x = ((view.viewport.x / 2.0) as u32).max(1);
    let half_y = ((view.viewport.y / 2.0) as u32).max(1);

    for _ in 0..SHUFFLE_ATTEMPTS {
        let index = rng.random_range(0..cube.faces().len());
        let offset = Vec2::new(
            rng.random_range(1..=half_x) as f32,
            rng.random_range(1..=half_y) as f32,
        );
        if cube.rotate_level(Vec2::ZERO, offset, index, view) {
            return cube.rotate_compensation(steps);
        }
    }
    log::warn!("shuffle found no turnable face, stopping");
    None
}
