//! Snapping of near-grid vectors back onto the discrete puzzle grid.
//!
//! Every committed turn passes each rotated face through these functions, so
//! floating-point error from the rotation matrices never survives a commit.
use bevy::prelude::*;

/// Returns the axis-aligned unit vector closest to `v`.
///
/// The dominant component decides the axis, its sign decides the direction.
pub fn closest_normal(v: Vec3) -> Vec3 {
    let abs = v.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::X * v.x.signum()
    } else if abs.y >= abs.z {
        Vec3::Y * v.y.signum()
    } else {
        Vec3::Z * v.z.signum()
    }
}

/// Returns the valid face position closest to `position` for a puzzle of the
/// given `order` and cell `size`.
pub fn closest_position(order: u32, size: f32, position: Vec3) -> Vec3 {
    Vec3::new(
        closest_coordinate(order, position.x / size) * size,
        closest_coordinate(order, position.y / size) * size,
        closest_coordinate(order, position.z / size) * size,
    )
}

/// Snaps one coordinate, expressed in cells, to the grid.
///
/// Odd orders have cell centers at `0, ±1, .., ±offset`, even orders at
/// `±0.5, ±1.5, .., ±offset`. Faces on the outer surface sit at
/// `±(offset + 0.5)`.
fn closest_coordinate(order: u32, cells: f32) -> f32 {
    let offset = (order as f32 - 1.0) / 2.0;
    let sign = if cells < 0.0 { -1.0 } else { 1.0 };
    let abs = cells.abs();

    // halfway between the outermost cell center and the surface
    if abs > offset + 0.25 {
        return sign * (offset + 0.5);
    }

    let snapped = if order % 2 == 1 {
        abs.round().min(offset)
    } else {
        ((abs - 0.5).round().max(0.0) + 0.5).min(offset)
    };
    sign * snapped
}

/// Snaps a rotation to the closest of the 24 axis-aligned orientations.
pub fn closest_orientation(rotation: Quat) -> Quat {
    let basis = Mat3::from_quat(rotation);
    let x = closest_normal(basis.x_axis);
    let mut y = closest_normal(basis.y_axis);
    if x.dot(y) != 0.0 {
        // both columns drifted onto the same axis, rebuild y from z
        let z = closest_normal(basis.z_axis);
        y = z.cross(x);
    }
    Quat::from_mat3(&Mat3::from_cols(x, y, x.cross(y))).normalize()
}

/// Whether `v` is exactly one of the six axis-aligned unit vectors.
pub fn is_axis_normal(v: Vec3) -> bool {
    closest_normal(v) == v
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMALS: [Vec3; 6] = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];

    #[test]
    fn snapped_normals_are_fixed_points() {
        for normal in NORMALS {
            assert_eq!(closest_normal(normal), normal);
            assert!(is_axis_normal(normal));
        }
    }

    #[test]
    fn drifted_normal_snaps_to_dominant_axis() {
        assert_eq!(closest_normal(Vec3::new(0.02, -0.999, 1e-5)), Vec3::NEG_Y);
        assert_eq!(closest_normal(Vec3::new(-4.4e-8, 1e-7, 1.0000001)), Vec3::Z);
        assert!(!is_axis_normal(Vec3::new(0.7, 0.7, 0.0)));
    }

    #[test]
    fn odd_order_coordinates() {
        // order 3: centers at 0, ±1; surface at ±1.5
        assert_eq!(closest_position(3, 1.0, Vec3::new(0.98, -0.03, 1.49)), Vec3::new(1.0, 0.0, 1.5));
        assert_eq!(closest_position(3, 1.0, Vec3::new(-1.51, 1.2, -0.4)), Vec3::new(-1.5, 1.0, 0.0));
    }

    #[test]
    fn even_order_coordinates() {
        // order 4: centers at ±0.5, ±1.5; surface at ±2
        assert_eq!(
            closest_position(4, 1.0, Vec3::new(0.47, -1.52, 2.01)),
            Vec3::new(0.5, -1.5, 2.0)
        );
        assert_eq!(
            closest_position(2, 1.0, Vec3::new(-0.5001, 0.49, -1.0)),
            Vec3::new(-0.5, 0.5, -1.0)
        );
    }

    #[test]
    fn cell_size_is_respected() {
        assert_eq!(
            closest_position(3, 0.5, Vec3::new(0.51, 0.74, -0.02)),
            Vec3::new(0.5, 0.75, 0.0)
        );
    }

    #[test]
    fn snapped_positions_are_fixed_points() {
        for order in 2..=7 {
            let offset = (order as f32 - 1.0) / 2.0;
            let mut values = vec![offset + 0.5, -(offset + 0.5)];
            for i in 0..order {
                values.push(i as f32 - offset);
            }
            for &x in &values {
                for &y in &values {
                    let p = Vec3::new(x, y, offset + 0.5);
                    assert_eq!(closest_position(order, 1.0, p), p, "order {order}");
                }
            }
        }
    }

    #[test]
    fn orientation_snaps_to_quarter_turns() {
        let drifted = Quat::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2 + 0.01);
        let snapped = closest_orientation(drifted);
        assert!((snapped * Vec3::Z).abs_diff_eq(Vec3::X, 1e-6));
        assert!((snapped * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-6));
        assert!(closest_orientation(Quat::IDENTITY).abs_diff_eq(Quat::IDENTITY, 1e-6));
    }
}
