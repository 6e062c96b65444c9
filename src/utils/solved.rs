//! Generator for the solved puzzle geometry.
use bevy::prelude::*;

use crate::utils::cube::Face;
use crate::utils::grid::closest_position;

/// Outward normals of the six sides, in sticker color order.
pub const SIDE_NORMALS: [Vec3; 6] = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];

/// Builds the `6 * order^2` faces of a solved puzzle.
///
/// Faces are grouped by side (in `SIDE_NORMALS` order) and row-major inside a
/// side, so the index of a face is stable for the lifetime of a puzzle.
pub fn create_solved_puzzle(order: u32, size: f32) -> Vec<Face> {
    let offset = (order as f32 - 1.0) / 2.0;
    let surface = (offset + 0.5) * size;
    let mut faces = Vec::with_capacity(6 * (order * order) as usize);

    for normal in SIDE_NORMALS {
        // two in-plane axes of this side
        let (u, v) = if normal.x != 0.0 {
            (Vec3::Y, Vec3::Z)
        } else if normal.y != 0.0 {
            (Vec3::X, Vec3::Z)
        } else {
            (Vec3::X, Vec3::Y)
        };

        for row in 0..order {
            for col in 0..order {
                let position = normal * surface
                    + u * ((row as f32 - offset) * size)
                    + v * ((col as f32 - offset) * size);
                faces.push(Face::new(normal, closest_position(order, size, position)));
            }
        }
    }

    faces
}
