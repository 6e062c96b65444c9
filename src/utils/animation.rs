//! Frame-driven turn animations.
//!
//! Each animation is advanced by calling `tick` once per frame; `tick` returns
//! whether more frames remain. Nothing here knows about the frame scheduler.
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::utils::cube::{Cube, RotationRecord};

/// Shortest signed correction bringing `angle` onto a multiple of a quarter turn.
pub fn fix_to_half_pi(angle: f32) -> f32 {
    let sign = if angle < 0.0 { -1.0 } else { 1.0 };
    let rest = angle.abs() % FRAC_PI_2;
    let fix = if rest > FRAC_PI_4 { FRAC_PI_2 - rest } else { -rest };
    fix * sign
}

/// Constant-speed rotation of `total` radians split into steps of `step`.
#[derive(Debug, Clone, PartialEq)]
struct Sweep {
    total: f32,
    rotated: f32,
    step: f32,
}

impl Sweep {
    /// `steps` is the number of steps a full quarter turn would take.
    fn new(total: f32, steps: u32) -> Self {
        Self {
            total,
            rotated: 0.0,
            step: FRAC_PI_2 / steps.max(1) as f32,
        }
    }

    /// Signed angle for the next step, or `None` once the sweep is complete.
    fn advance(&mut self) -> Option<f32> {
        let remaining = self.total.abs() - self.rotated;
        // leftovers from float summation are not worth a frame
        if remaining <= 1e-6 {
            return None;
        }
        let angle = self.step.min(remaining);
        self.rotated += angle;
        Some(angle.copysign(self.total))
    }
}

/// Snaps a released slice to the nearest quarter turn, then commits it.
#[derive(Debug, Clone, PartialEq)]
pub struct Compensation {
    angle_to_fix: f32,
    sweep: Sweep,
    finished: bool,
}

impl Compensation {
    pub fn new(angle: f32, steps: u32) -> Self {
        let angle_to_fix = fix_to_half_pi(angle);
        Self {
            angle_to_fix,
            sweep: Sweep::new(angle_to_fix, steps),
            finished: false,
        }
    }

    /// Advances one frame. The call that finds nothing left to rotate commits
    /// the turn and returns `false`.
    pub fn tick(&mut self, cube: &mut Cube) -> bool {
        if self.finished {
            return false;
        }
        match self.sweep.advance() {
            Some(angle) => {
                cube.rotate_in_progress(angle);
                true
            }
            None => {
                self.finished = true;
                cube.commit(self.angle_to_fix);
                false
            }
        }
    }
}

/// Animated reversal of one history record.
#[derive(Debug, Clone, PartialEq)]
pub struct InverseAnimation {
    record: RotationRecord,
    angle: f32,
    sweep: Sweep,
    finished: bool,
}

impl InverseAnimation {
    pub fn new(record: RotationRecord, steps: u32) -> Self {
        let angle = record.inverse_angle();
        Self {
            sweep: Sweep::new(angle, steps),
            record,
            angle,
            finished: false,
        }
    }

    /// Advances one frame. Once the slice is back in place the logical state
    /// is snapped and `false` is returned.
    pub fn tick(&mut self, cube: &mut Cube) -> bool {
        if self.finished {
            return false;
        }
        match self.sweep.advance() {
            Some(angle) => {
                cube.rotate_record(&self.record, angle);
                true
            }
            None => {
                self.finished = true;
                cube.settle_faces(&self.record, self.angle);
                false
            }
        }
    }
}
