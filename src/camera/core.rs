//! Camera state and the GPU camera uniform.

use glam::{Mat4, Vec3};

/// Perspective camera defined by position, yaw, and projection
/// parameters.
///
/// The scene camera only ever translates and yaws about Y, so a full
/// orientation quaternion would be dead weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Rotation about the world Y axis, in radians.
    pub yaw: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// The view matrix (inverse of the camera's world transform).
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        (Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.yaw))
        .inverse()
    }

    /// The combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        // perspective_rh uses [0,1] depth range (wgpu convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * self.build_view()
    }
}

/// GPU uniform buffer holding the camera matrices.
///
/// The view matrix rides along so the shaders can shade in view space
/// (the normal material colors by view-space normal; the matcap material
/// derives its UVs from it).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// View matrix.
    pub view: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Identity matrices.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Update both matrices from the camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.view = camera.build_view().to_cols_array_2d();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            position: Vec3::new(0.0, 0.0, 4.0),
            yaw: 0.0,
            aspect: 16.0 / 9.0,
            fovy: 75.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn view_moves_world_opposite_to_camera() {
        let cam = camera();
        let p = cam.build_view().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
    }

    #[test]
    fn yaw_rotates_about_y() {
        let mut cam = camera();
        cam.position = Vec3::ZERO;
        cam.yaw = std::f32::consts::FRAC_PI_2;
        // Positive yaw turns the camera left, so a point that was
        // straight ahead drifts to the right of view.
        let p = cam.build_view().transform_point3(Vec3::NEG_Z);
        assert!((p - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = camera();
        let clip = cam.build_matrix() * Vec3::ZERO.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }
}
