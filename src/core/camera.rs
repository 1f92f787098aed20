//! Perspective camera that orbits the field origin

use crate::core::types::{Mat4, Vec3};

/// Lowest/highest vertical FOV (degrees) fed to the projection matrix.
/// The parameter range is wider; degenerate ends are clamped here.
const MIN_PROJ_FOV: f32 = 1.0;
const MAX_PROJ_FOV: f32 = 179.0;

/// Camera with eased position and FOV, always looking at the origin
#[derive(Clone, Debug, PartialEq)]
pub struct FieldCamera {
    /// World position
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl FieldCamera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            fov_degrees,
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Point the camera looks at
    pub fn target(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Up vector used for the view matrix.
    ///
    /// Y up, except when the camera sits on the Y axis where Y would be
    /// parallel to the view direction.
    pub fn up(&self) -> Vec3 {
        let forward = (self.target() - self.position).normalize_or_zero();
        if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        if self.position.length_squared() < 1e-12 {
            // Sitting on the target; look down -Z from the origin.
            return Mat4::look_at_rh(Vec3::ZERO, -Vec3::Z, Vec3::Y);
        }
        Mat4::look_at_rh(self.position, self.target(), self.up())
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        let fov = self.fov_degrees.clamp(MIN_PROJ_FOV, MAX_PROJ_FOV).to_radians();
        let near = self.near.max(1e-3);
        let far = self.far.max(near + 1e-3);
        let aspect = if self.aspect > 0.0 { self.aspect } else { 1.0 };
        Mat4::perspective_rh(fov, aspect, near, far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio (call on resize). Ignores zero-height viewports.
    pub fn set_aspect(&mut self, width: f32, height: f32) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.aspect = width / height;
        true
    }
}

impl Default for FieldCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -7.0, 3.0), 60.0, 16.0 / 9.0)
    }
}
