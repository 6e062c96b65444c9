//! Rotation engine: puzzle state, slice resolution, turns and history.
use std::f32::consts::TAU;

use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::utils::animation::Compensation;
use crate::utils::constants::cube_constants::{COMMIT_THRESHOLD, GRID_EPSILON, SLICE_DRAG_GAIN};
use crate::utils::grid::{closest_normal, closest_orientation, closest_position};
use crate::utils::projection::ViewCamera;
use crate::utils::solved::{SIDE_NORMALS, create_solved_puzzle};

/// One visible sticker of the puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Outward normal, always one of the six axis-aligned unit vectors.
    pub normal: Vec3,
    /// Grid-snapped center of the sticker.
    pub position: Vec3,
    /// Side the sticker started on; identifies its color.
    pub sticker: Vec3,
    /// Visual transform. The sticker quad lies in its local XY plane facing +Z.
    pub transform: Transform,
}

impl Face {
    pub fn new(normal: Vec3, position: Vec3) -> Self {
        Self {
            normal,
            position,
            sticker: normal,
            transform: Transform::from_translation(position)
                .with_rotation(Quat::from_rotation_arc(Vec3::Z, normal)),
        }
    }

    /// Center of the cubie this face belongs to.
    pub fn cell_center(&self, size: f32) -> Vec3 {
        self.position - self.normal * (size / 2.0)
    }

    /// Applies `rotation` to the logical normal and position and snaps both
    /// (and the visual transform) back onto the grid.
    fn settle(&mut self, rotation: Quat, order: u32, size: f32) {
        self.normal = closest_normal(rotation * self.normal);
        self.position = closest_position(order, size, rotation * self.position);
        self.transform.translation = self.position;
        self.transform.rotation = closest_orientation(self.transform.rotation);
    }
}

/// One committed (or in-progress) slice turn.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationRecord {
    /// Unit rotation axis in puzzle space.
    pub axis: Vec3,
    /// Signed angle in radians.
    pub angle: f32,
    /// Indices of the faces in the slice.
    pub faces: Vec<usize>,
}

impl RotationRecord {
    /// Net number of counter-clockwise quarter turns, in `0..4`.
    pub fn quarter_turns(&self) -> i32 {
        ((self.angle / std::f32::consts::FRAC_PI_2).round() as i32).rem_euclid(4)
    }

    /// Whether the record settled back onto the identity.
    pub fn is_noop(&self) -> bool {
        self.quarter_turns() == 0
    }

    /// Angle that undoes this record.
    pub fn inverse_angle(&self) -> f32 {
        -self.angle % TAU
    }
}

/// One of the four screen directions a drag on a face can mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateVec {
    /// Normalized screen-space direction.
    pub win_vec: Vec2,
    pub start: usize,
    pub end: usize,
}

/// Turn being dragged, locked for the rest of the gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnInProgress {
    pub record: RotationRecord,
    pub rotate_vec: RotateVec,
}

/// An N×N×N puzzle and its move history.
#[derive(Debug, Clone)]
pub struct Cube {
    order: u32,
    size: f32,
    faces: Vec<Face>,
    /// Visual orientation of the whole puzzle; never recorded.
    orientation: Quat,
    rotating: bool,
    rotate_info: Option<TurnInProgress>,
    steps: Vec<RotationRecord>,
    slice_drag_gain: f32,
}

impl Cube {
    pub fn new(order: u32, size: f32) -> Self {
        Self {
            order,
            size,
            faces: create_solved_puzzle(order, size),
            orientation: Quat::IDENTITY,
            rotating: false,
            rotate_info: None,
            steps: Vec::new(),
            slice_drag_gain: SLICE_DRAG_GAIN,
        }
    }

    pub fn with_slice_drag_gain(mut self, gain: f32) -> Self {
        self.slice_drag_gain = gain;
        self
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Committed history, oldest first.
    pub fn steps(&self) -> &[RotationRecord] {
        &self.steps
    }

    /// Whether a slice turn is locked in and not yet committed.
    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub fn rotate_info(&self) -> Option<&TurnInProgress> {
        self.rotate_info.as_ref()
    }

    /// Whether every side shows a single sticker color.
    pub fn is_solved(&self) -> bool {
        let mut side_stickers: [Option<Vec3>; 6] = [None; 6];
        self.faces.iter().all(|face| {
            let Some(side) = SIDE_NORMALS.iter().position(|&n| n == face.normal) else {
                return false;
            };
            *side_stickers[side].get_or_insert(face.sticker) == face.sticker
        })
    }

    /// World-space center of a face, including the whole-puzzle orientation.
    pub(crate) fn face_world_position(&self, index: usize) -> Option<Vec3> {
        let face = self.faces.get(index)?;
        Some(self.orientation * face.transform.translation)
    }

    /// Screen length of a drag that corresponds to the calibration angle.
    pub fn drag_for_half_pi(&self, view: &ViewCamera) -> f32 {
        view.screen_length(Vec3::ZERO, self.order as f32 * self.size)
    }

    /// Finds one face in the same row and one in the same column as `index`,
    /// on the same side of the puzzle.
    fn siblings(&self, index: usize) -> Option<(usize, usize)> {
        let face = self.faces.get(index)?;
        let (a, b) = if face.normal.x != 0.0 {
            (1, 2)
        } else if face.normal.y != 0.0 {
            (0, 2)
        } else {
            (0, 1)
        };

        let same = |x: f32, y: f32| (x - y).abs() < GRID_EPSILON;
        let mut sibling0 = None;
        let mut sibling1 = None;
        for (i, other) in self.faces.iter().enumerate() {
            if other.normal != face.normal || other.position.abs_diff_eq(face.position, GRID_EPSILON) {
                continue;
            }
            if sibling0.is_none() && same(other.position[a], face.position[a]) {
                sibling0 = Some(i);
            }
            if sibling1.is_none() && same(other.position[b], face.position[b]) {
                sibling1 = Some(i);
            }
            if let (Some(s0), Some(s1)) = (sibling0, sibling1) {
                return Some((s0, s1));
            }
        }
        None
    }

    /// The four signed screen directions through `index` and its siblings.
    pub(crate) fn rotate_vecs(&self, index: usize, view: &ViewCamera) -> Option<[RotateVec; 4]> {
        let (sibling0, sibling1) = self.siblings(index)?;
        let win_pos = view.world_to_screen(self.face_world_position(index)?)?;
        let win_pos0 = view.world_to_screen(self.face_world_position(sibling0)?)?;
        let win_pos1 = view.world_to_screen(self.face_world_position(sibling1)?)?;

        Some([
            RotateVec {
                win_vec: (win_pos0 - win_pos).normalize_or_zero(),
                start: index,
                end: sibling0,
            },
            RotateVec {
                win_vec: (win_pos - win_pos0).normalize_or_zero(),
                start: sibling0,
                end: index,
            },
            RotateVec {
                win_vec: (win_pos1 - win_pos).normalize_or_zero(),
                start: index,
                end: sibling1,
            },
            RotateVec {
                win_vec: (win_pos - win_pos1).normalize_or_zero(),
                start: sibling1,
                end: index,
            },
        ])
    }

    /// Resolves which axis and slice a drag starting on face `index` turns.
    ///
    /// Returns `None` for ambiguous gestures: a zero drag, a face without
    /// siblings, or a face seen exactly edge-on.
    pub fn judge_rotate(&self, drag: Vec2, index: usize, view: &ViewCamera) -> Option<TurnInProgress> {
        if drag.length_squared() == 0.0 || index >= self.faces.len() {
            return None;
        }

        let mut best: Option<(f32, RotateVec)> = None;
        for vec in self.rotate_vecs(index, view)? {
            if vec.win_vec == Vec2::ZERO {
                continue;
            }
            let cos = vec.win_vec.dot(drag) / drag.length();
            let angle = cos.clamp(-1.0, 1.0).acos();
            if best.is_none_or(|(min, _)| angle < min) {
                best = Some((angle, vec));
            }
        }
        let (_, rotate_vec) = best?;

        let face = &self.faces[index];
        let direction =
            (self.faces[rotate_vec.end].position - self.faces[rotate_vec.start].position).normalize();
        let axis = face.normal.cross(direction).normalize();
        let faces = self.slice_faces(index, axis);

        Some(TurnInProgress {
            record: RotationRecord {
                axis,
                angle: 0.0,
                faces,
            },
            rotate_vec,
        })
    }

    /// Faces whose cubie lies in the same layer as the cubie of `index`,
    /// perpendicular to `axis`. Empty for an unknown face.
    pub(crate) fn slice_faces(&self, index: usize, axis: Vec3) -> Vec<usize> {
        let Some(pivot) = self.faces.get(index).map(|face| face.cell_center(self.size)) else {
            return Vec::new();
        };
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, face)| (face.cell_center(self.size) - pivot).dot(axis).abs() < GRID_EPSILON)
            .map(|(i, _)| i)
            .collect()
    }

    /// Follows a slice drag from `pre` to `cur` on face `index`.
    ///
    /// The first call of a gesture locks the axis and slice; later calls only
    /// update the angle. Returns whether a turn is in progress.
    pub fn rotate_level(&mut self, pre: Vec2, cur: Vec2, index: usize, view: &ViewCamera) -> bool {
        let drag = cur - pre;

        if !self.rotating {
            let Some(turn) = self.judge_rotate(drag, index, view) else {
                return false;
            };
            log::trace!(
                "locked turn about {:?} with {} faces",
                turn.record.axis,
                turn.record.faces.len()
            );
            self.rotate_info = Some(turn);
            self.rotating = true;
        }

        let move_for_half_pi = self.drag_for_half_pi(view);
        if move_for_half_pi <= f32::EPSILON {
            return true;
        }

        let Self {
            faces,
            rotate_info,
            slice_drag_gain,
            ..
        } = self;
        let Some(info) = rotate_info.as_mut() else {
            return false;
        };

        let projection = drag.dot(info.rotate_vec.win_vec);
        let angle = *slice_drag_gain * projection / move_for_half_pi;
        let diff = angle - info.record.angle;
        info.record.angle = angle;
        rotate_faces(faces, &info.record.faces, info.record.axis, diff);
        true
    }

    /// Starts snapping the in-progress turn to the nearest quarter turn.
    pub fn rotate_compensation(&self, steps: u32) -> Option<Compensation> {
        let info = self.rotate_info.as_ref()?;
        Some(Compensation::new(info.record.angle, steps))
    }

    /// Rotates the in-progress slice visually, without touching its angle.
    pub(crate) fn rotate_in_progress(&mut self, angle: f32) {
        let Self {
            faces, rotate_info, ..
        } = self;
        if let Some(info) = rotate_info {
            rotate_faces(faces, &info.record.faces, info.record.axis, angle);
        }
    }

    /// Commits the in-progress turn after `angle_to_fix` has been applied.
    ///
    /// The record is pushed even when it settles on the identity.
    pub(crate) fn commit(&mut self, angle_to_fix: f32) {
        self.rotating = false;
        let Some(mut info) = self.rotate_info.take() else {
            return;
        };
        info.record.angle += angle_to_fix;

        let angle = info.record.angle % TAU;
        if angle.abs() > COMMIT_THRESHOLD {
            self.settle_faces(&info.record, angle);
        } else {
            // snap the visuals back in place
            self.settle_faces(&info.record, 0.0);
        }

        log::debug!(
            "committed {} quarter turn(s) about {:?}",
            info.record.quarter_turns(),
            info.record.axis
        );
        self.steps.push(info.record);
    }

    /// Rotates the logical state of every face in `record` by `angle` and
    /// snaps it onto the grid.
    pub(crate) fn settle_faces(&mut self, record: &RotationRecord, angle: f32) {
        let rotation = Quat::from_axis_angle(record.axis, angle);
        let (order, size) = (self.order, self.size);
        for &i in &record.faces {
            if let Some(face) = self.faces.get_mut(i) {
                face.settle(rotation, order, size);
            }
        }
    }

    /// Rotates the slice of `record` visually by `angle`.
    pub(crate) fn rotate_record(&mut self, record: &RotationRecord, angle: f32) {
        rotate_faces(&mut self.faces, &record.faces, record.axis, angle);
    }

    /// Undoes `record` in a single step.
    pub fn apply_inverse(&mut self, record: &RotationRecord) {
        let angle = record.inverse_angle();
        self.rotate_record(record, angle);
        self.settle_faces(record, angle);
    }

    /// Pops history until a record that actually moved something is found.
    pub fn pop_undoable(&mut self) -> Option<RotationRecord> {
        while let Some(record) = self.steps.pop() {
            if !record.is_noop() {
                return Some(record);
            }
            log::trace!("skipping settled no-op turn");
        }
        None
    }

    /// Rotates the whole puzzle about a world axis. Visual only.
    pub fn rotate_whole(&mut self, axis: Vec3, angle: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        self.orientation = (Quat::from_axis_angle(axis, angle) * self.orientation).normalize();
    }

    /// Finds the face hit first by a world-space ray.
    pub fn hit_test(&self, ray: Ray3d) -> Option<usize> {
        let half = self.size / 2.0;
        let direction = *ray.direction;

        let mut closest: Option<(f32, usize)> = None;
        for (i, face) in self.faces.iter().enumerate() {
            let rotation = self.orientation * face.transform.rotation;
            let center = self.orientation * face.transform.translation;
            let normal = rotation * Vec3::Z;

            // only front faces can be hit
            let denom = normal.dot(direction);
            if denom >= -f32::EPSILON {
                continue;
            }
            let distance = (center - ray.origin).dot(normal) / denom;
            if distance < 0.0 {
                continue;
            }

            let local = rotation.inverse() * (ray.get_point(distance) - center);
            if local.x.abs() <= half
                && local.y.abs() <= half
                && closest.is_none_or(|(best, _)| distance < best)
            {
                closest = Some((distance, i));
            }
        }
        closest.map(|(_, i)| i)
    }
}

/// Rotates the visual transforms of `indices` about an axis through the origin.
fn rotate_faces(faces: &mut [Face], indices: &[usize], axis: Vec3, angle: f32) {
    if angle == 0.0 {
        return;
    }
    let rotation = Quat::from_axis_angle(axis, angle);
    for &i in indices {
        if let Some(face) = faces.get_mut(i) {
            face.transform.rotate_around(Vec3::ZERO, rotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn view() -> ViewCamera {
        ViewCamera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, FRAC_PI_4, Vec2::new(800.0, 800.0))
    }

    fn index_of(cube: &Cube, normal: Vec3, position: Vec3) -> usize {
        cube.faces()
            .iter()
            .position(|face| face.normal == normal && face.position == position)
            .unwrap()
    }

    fn snapshot(cube: &Cube) -> Vec<(Vec3, Vec3)> {
        cube.faces().iter().map(|f| (f.normal, f.position)).collect()
    }

    /// Drags face `index` by `drag` pixels and lets the snap run to completion.
    fn turn(cube: &mut Cube, index: usize, drag: Vec2) {
        assert!(cube.rotate_level(Vec2::ZERO, drag, index, &view()));
        let mut compensation = cube.rotate_compensation(20).unwrap();
        while compensation.tick(cube) {}
    }

    #[test]
    fn record_quarter_turns() {
        let record = |angle| RotationRecord {
            axis: Vec3::Y,
            angle,
            faces: vec![],
        };
        assert_eq!(record(FRAC_PI_2).quarter_turns(), 1);
        assert_eq!(record(-FRAC_PI_2).quarter_turns(), 3);
        assert_eq!(record(2.0 * PI + 1e-4).quarter_turns(), 0);
        assert!(record(1e-7).is_noop());
        assert!(!record(PI).is_noop());
    }

    #[test]
    fn siblings_share_row_and_column() {
        let cube = Cube::new(3, 1.0);
        let index = index_of(&cube, Vec3::Z, Vec3::new(0.0, 0.0, 1.5));
        let (s0, s1) = cube.siblings(index).unwrap();
        assert_eq!(cube.faces()[s0].normal, Vec3::Z);
        assert_eq!(cube.faces()[s0].position.x, 0.0);
        assert_eq!(cube.faces()[s1].position.y, 0.0);
        assert_ne!(s0, index);
        assert_ne!(s1, index);
    }

    #[test]
    fn order_one_has_no_siblings() {
        let cube = Cube::new(1, 1.0);
        assert_eq!(cube.faces().len(), 6);
        let index = index_of(&cube, Vec3::Z, Vec3::new(0.0, 0.0, 0.5));
        assert!(cube.judge_rotate(Vec2::X, index, &view()).is_none());
    }

    #[test]
    fn zero_drag_is_ambiguous() {
        let cube = Cube::new(3, 1.0);
        let index = index_of(&cube, Vec3::Z, Vec3::new(0.0, 0.0, 1.5));
        assert!(cube.judge_rotate(Vec2::ZERO, index, &view()).is_none());
    }

    #[test]
    fn horizontal_drag_on_front_turns_about_y() {
        let cube = Cube::new(3, 1.0);
        let index = index_of(&cube, Vec3::Z, Vec3::new(1.0, 1.0, 1.5));
        let turn = cube.judge_rotate(Vec2::new(30.0, 2.0), index, &view()).unwrap();
        assert_eq!(turn.record.axis, Vec3::Y);
        assert_eq!(turn.record.angle, 0.0);
        // top layer: 9 top stickers and 3 on each of the 4 sides
        assert_eq!(turn.record.faces.len(), 21);
        for &i in &turn.record.faces {
            assert!(cube.faces()[i].cell_center(1.0).y == 1.0);
        }
    }

    #[test]
    fn vertical_drag_on_front_turns_about_x() {
        let cube = Cube::new(3, 1.0);
        let index = index_of(&cube, Vec3::Z, Vec3::new(0.0, 0.0, 1.5));
        // screen y grows downward
        let turn = cube.judge_rotate(Vec2::new(1.0, 40.0), index, &view()).unwrap();
        assert_eq!(turn.record.axis, Vec3::X);
        // middle layer has no caps
        assert_eq!(turn.record.faces.len(), 12);
    }

    #[test]
    fn back_face_slice_is_a_single_layer() {
        let cube = Cube::new(3, 1.0);
        let index = index_of(&cube, Vec3::NEG_Z, Vec3::new(1.0, 0.0, -1.5));
        let slice = cube.slice_faces(index, Vec3::Y);
        assert_eq!(slice.len(), 12);
        assert!(slice.iter().all(|&i| cube.faces()[i].cell_center(1.0).y == 0.0));
    }

    #[test]
    fn axis_is_locked_for_the_whole_gesture() {
        let mut cube = Cube::new(3, 1.0);
        let index = index_of(&cube, Vec3::Z, Vec3::new(0.0, 1.0, 1.5));
        assert!(cube.rotate_level(Vec2::ZERO, Vec2::new(20.0, 0.0), index, &view()));
        let axis = cube.rotate_info().unwrap().record.axis;
        assert!(cube.rotate_level(Vec2::ZERO, Vec2::new(20.0, 80.0), index, &view()));
        assert_eq!(cube.rotate_info().unwrap().record.axis, axis);
    }

    #[test]
    fn drag_angle_follows_calibration_length() {
        let mut cube = Cube::new(3, 1.0);
        let index = index_of(&cube, Vec3::Z, Vec3::new(0.0, 1.0, 1.5));
        let length = cube.drag_for_half_pi(&view());
        cube.rotate_level(Vec2::ZERO, Vec2::new(length / 3.0, 0.0), index, &view());
        let angle = cube.rotate_info().unwrap().record.angle;
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = 1e-3);
    }

    #[test]
    fn quarter_turn_round_trips() {
        let mut cube = Cube::new(3, 1.0);
        let before = snapshot(&cube);
        let index = index_of(&cube, Vec3::Z, Vec3::new(1.0, 1.0, 1.5));
        let length = cube.drag_for_half_pi(&view());
        turn(&mut cube, index, Vec2::new(length / 3.0, 0.0));

        assert_eq!(cube.steps().len(), 1);
        assert_eq!(cube.steps()[0].quarter_turns(), 1);
        assert!(!cube.is_solved());
        assert_ne!(snapshot(&cube), before);

        let record = cube.pop_undoable().unwrap();
        cube.apply_inverse(&record);
        assert_eq!(snapshot(&cube), before);
        assert!(cube.is_solved());
    }

    #[test]
    fn committed_faces_stay_on_grid() {
        let mut cube = Cube::new(4, 1.0);
        let length = cube.drag_for_half_pi(&view());
        for (k, drag) in [Vec2::new(0.4, 0.0), Vec2::new(0.0, 0.7), Vec2::new(-0.55, 0.1)]
            .into_iter()
            .enumerate()
        {
            let index = index_of(&cube, Vec3::Z, Vec3::new(0.5, -0.5, 2.0));
            turn(&mut cube, index, drag * length);
            assert_eq!(cube.steps().len(), k + 1);
        }
        for face in cube.faces() {
            assert!(crate::utils::grid::is_axis_normal(face.normal));
            assert_eq!(closest_position(4, 1.0, face.position), face.position);
            assert_eq!(face.transform.translation, face.position);
        }
    }

    #[test]
    fn small_drag_settles_as_noop() {
        let mut cube = Cube::new(3, 1.0);
        let before = snapshot(&cube);
        let index = index_of(&cube, Vec3::Z, Vec3::new(0.0, 0.0, 1.5));
        turn(&mut cube, index, Vec2::new(5.0, 0.0));
        assert_eq!(cube.steps().len(), 1);
        assert!(cube.steps()[0].is_noop());
        assert_eq!(snapshot(&cube), before);
        assert!(cube.pop_undoable().is_none());
        assert!(cube.steps().is_empty());
    }

    #[test]
    fn instant_and_stepped_inverse_agree() {
        let mut a = Cube::new(3, 1.0);
        let index = index_of(&a, Vec3::Z, Vec3::new(-1.0, 0.0, 1.5));
        let length = a.drag_for_half_pi(&view());
        turn(&mut a, index, Vec2::new(0.0, length * 2.0 / 3.0));
        let mut b = a.clone();

        let record = a.pop_undoable().unwrap();
        a.apply_inverse(&record);

        let record = b.pop_undoable().unwrap();
        let mut animation = crate::utils::animation::InverseAnimation::new(record, 10);
        while animation.tick(&mut b) {}

        assert_eq!(snapshot(&a), snapshot(&b));
        assert!(a.is_solved());
    }

    #[test]
    fn whole_rotation_is_visual_only() {
        let mut cube = Cube::new(3, 1.0);
        let before = snapshot(&cube);
        cube.rotate_whole(Vec3::new(1.0, 1.0, 0.0), 0.7);
        assert_eq!(snapshot(&cube), before);
        assert!(cube.steps().is_empty());
        assert_ne!(cube.orientation(), Quat::IDENTITY);
    }

    #[test]
    fn hit_test_finds_front_face() {
        let cube = Cube::new(3, 1.0);
        let ray = view().viewport_ray(Vec2::new(400.0, 400.0)).unwrap();
        let hit = cube.hit_test(ray).unwrap();
        assert_eq!(cube.faces()[hit].normal, Vec3::Z);
        assert_eq!(cube.faces()[hit].position, Vec3::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn hit_test_misses_empty_space() {
        let cube = Cube::new(3, 1.0);
        let ray = view().viewport_ray(Vec2::new(5.0, 5.0)).unwrap();
        assert!(cube.hit_test(ray).is_none());
    }

    #[test]
    fn unknown_face_index_is_harmless() {
        let mut cube = Cube::new(3, 1.0);
        let index = cube.faces().len();
        assert!(cube.face_world_position(index).is_none());
        assert!(cube.rotate_vecs(index, &view()).is_none());
        assert!(cube.slice_faces(index, Vec3::Y).is_empty());
        assert!(cube.judge_rotate(Vec2::X, index, &view()).is_none());
        assert!(!cube.rotate_level(Vec2::ZERO, Vec2::X, index, &view()));
        assert!(!cube.is_rotating());
    }

    #[test]
    fn hit_test_prefers_the_nearest_face() {
        let mut cube = Cube::new(3, 1.0);
        let middle = index_of(&cube, Vec3::Z, Vec3::new(-1.0, 0.0, 1.5));
        let top = index_of(&cube, Vec3::Z, Vec3::new(0.0, 1.0, 1.5));
        // middle layer halfway through a turn, its front corner sticks out
        let slice = cube.slice_faces(middle, Vec3::Y);
        rotate_faces(&mut cube.faces, &slice, Vec3::Y, FRAC_PI_4);

        // enters the turned middle sticker, then climbs into the top one
        let direction = Dir3::new(Vec3::new(0.0, 1.0, -1.0)).unwrap();
        let through = Vec3::new(0.3, 0.3, 1.5 * std::f32::consts::SQRT_2 - 0.3);
        let ray = Ray3d::new(through - *direction * 4.0, direction);

        let behind = ray.get_point((1.5 - ray.origin.z) / direction.z);
        assert!((behind - cube.faces()[top].position).abs().max_element() <= 0.5);

        assert_eq!(cube.hit_test(ray), Some(middle));
        cube.faces.retain(|face| face.position.y != 0.0);
        let top = index_of(&cube, Vec3::Z, Vec3::new(0.0, 1.0, 1.5));
        assert_eq!(cube.hit_test(ray), Some(top));
    }

    #[test]
    fn hit_test_follows_whole_rotation() {
        let mut cube = Cube::new(3, 1.0);
        // bring the right side to the front
        cube.rotate_whole(Vec3::Y, -FRAC_PI_2);
        let ray = view().viewport_ray(Vec2::new(400.0, 400.0)).unwrap();
        let hit = cube.hit_test(ray).unwrap();
        assert_eq!(cube.faces()[hit].normal, Vec3::X);
    }
}
