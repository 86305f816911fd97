//! Camera model and pointer unprojection
//!
//! The attractor follows the pointer. A pointer position in normalized
//! device coordinates is unprojected through the camera and the resulting
//! ray is intersected with the `z = 0` working plane.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

const PARALLEL_EPSILON: f32 = 1e-6;

/// Perspective camera looking at `look_at`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 20.0),
            look_at: Vec3::ZERO,
            fov_y_degrees: 35.0,
            aspect: 1.0,
            near: 1.0,
            far: 40.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    /// OpenGL-style projection, depth in [-1, 1]
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Map a point in normalized device coordinates back to world space
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        self.view_projection().inverse().project_point3(ndc)
    }

    /// Map a world point to normalized device coordinates
    pub fn project(&self, world: Vec3) -> Vec3 {
        self.view_projection().project_point3(world)
    }

    /// Intersect the pointer ray with the `z = 0` plane.
    /// Returns `None` when the ray runs (nearly) parallel to the plane.
    pub fn pointer_to_plane(&self, ndc: Vec2) -> Option<Vec3> {
        let on_ray = self.unproject(ndc.extend(0.5));
        let dir = (on_ray - self.position).normalize_or_zero();
        if !dir.is_finite() || dir.z.abs() < PARALLEL_EPSILON {
            return None;
        }
        let distance = -self.position.z / dir.z;
        Some(self.position + dir * distance)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

/// Convert a pixel position (origin top-left) into normalized device coordinates
pub fn screen_to_ndc(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new((pos.x / size.x) * 2.0 - 1.0, -(pos.y / size.y) * 2.0 + 1.0)
}

/// Inverse of [`screen_to_ndc`]
pub fn ndc_to_screen(ndc: Vec2, size: Vec2) -> Vec2 {
    Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y)
}
