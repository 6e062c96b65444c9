//! Camera and projection utilities
use bevy::math::{Dir3, Ray3d};
use bevy::prelude::*;

/// Snapshot of a perspective camera and its viewport, decoupled from the ECS.
///
/// Screen coordinates have their origin in the top-left corner with y growing
/// downward, matching window cursor and touch positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    pub world_from_view: Mat4,
    pub clip_from_view: Mat4,
    pub viewport: Vec2,
}

impl ViewCamera {
    pub fn new(world_from_view: Mat4, clip_from_view: Mat4, viewport: Vec2) -> Self {
        Self {
            world_from_view,
            clip_from_view,
            viewport,
        }
    }

    /// Builds a camera at `eye` looking at `target` with a vertical field of view.
    pub fn looking_at(eye: Vec3, target: Vec3, fov: f32, viewport: Vec2) -> Self {
        let world_from_view = Mat4::look_at_rh(eye, target, Vec3::Y).inverse();
        let aspect = viewport.x / viewport.y.max(1.0);
        let clip_from_view = Mat4::perspective_rh(fov, aspect, 0.1, 1000.0);
        Self::new(world_from_view, clip_from_view, viewport)
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.world_from_view.w_axis.truncate()
    }

    /// Camera right direction in world space.
    pub fn right(&self) -> Vec3 {
        self.world_from_view.x_axis.truncate().normalize_or_zero()
    }

    /// Camera up direction in world space.
    pub fn up(&self) -> Vec3 {
        self.world_from_view.y_axis.truncate().normalize_or_zero()
    }

    /// Projects a world point to normalized device coordinates.
    ///
    /// Returns `None` for points on the camera plane.
    pub fn world_to_ndc(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.clip_from_view * self.world_from_view.inverse() * point.extend(1.0);
        // Prevent division by near-zero depth values
        if clip.w.abs() < 1e-6 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Projects a world point to screen coordinates.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        self.world_to_ndc(point).map(|ndc| self.ndc_to_screen(ndc.truncate()))
    }

    pub fn ndc_to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        )
    }

    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        )
    }

    /// Ray from the camera through a screen point.
    pub fn viewport_ray(&self, screen: Vec2) -> Option<Ray3d> {
        let ndc = self.screen_to_ndc(screen);
        let world_from_clip = self.world_from_view * self.clip_from_view.inverse();
        // any depth strictly inside the clip range lies on the ray
        let through = world_from_clip.project_point3(ndc.extend(0.5));
        let origin = self.position();
        let direction = Dir3::new(through - origin).ok()?;
        Some(Ray3d::new(origin, direction))
    }

    /// Screen-space length of a world segment of `world_length` centered on
    /// `center` and parallel to the camera's right direction.
    pub fn screen_length(&self, center: Vec3, world_length: f32) -> f32 {
        let offset = self.right() * (world_length / 2.0);
        match (
            self.world_to_screen(center - offset),
            self.world_to_screen(center + offset),
        ) {
            (Some(a), Some(b)) => a.distance(b),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> ViewCamera {
        ViewCamera::looking_at(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            std::f32::consts::FRAC_PI_4,
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let screen = camera().world_to_screen(Vec3::ZERO).unwrap();
        assert_relative_eq!(screen.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(screen.y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn screen_y_grows_downward() {
        let camera = camera();
        let above = camera.world_to_screen(Vec3::Y).unwrap();
        let right = camera.world_to_screen(Vec3::X).unwrap();
        assert!(above.y < 300.0);
        assert!(right.x > 400.0);
    }

    #[test]
    fn ndc_and_screen_are_inverse() {
        let camera = camera();
        let screen = Vec2::new(123.0, 456.0);
        let back = camera.ndc_to_screen(camera.screen_to_ndc(screen));
        assert_relative_eq!(back.x, screen.x, epsilon = 1e-3);
        assert_relative_eq!(back.y, screen.y, epsilon = 1e-3);
    }

    #[test]
    fn center_ray_points_at_target() {
        let ray = camera().viewport_ray(Vec2::new(400.0, 300.0)).unwrap();
        assert!(ray.origin.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-4));
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn ray_passes_through_projected_point() {
        let camera = camera();
        let point = Vec3::new(1.0, -0.5, 0.5);
        let screen = camera.world_to_screen(point).unwrap();
        let ray = camera.viewport_ray(screen).unwrap();
        let t = (point - ray.origin).dot(*ray.direction);
        assert!(ray.get_point(t).abs_diff_eq(point, 1e-3));
    }

    #[test]
    fn screen_length_shrinks_with_distance() {
        let near = camera().screen_length(Vec3::ZERO, 3.0);
        let far = ViewCamera::looking_at(
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::ZERO,
            std::f32::consts::FRAC_PI_4,
            Vec2::new(800.0, 600.0),
        )
        .screen_length(Vec3::ZERO, 3.0);
        assert!(near > 0.0);
        assert_relative_eq!(near, far * 2.0, epsilon = 1.0);
    }
}
