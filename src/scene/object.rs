//! Renderable object state.

use glam::{Mat4, Vec2, Vec3};

use crate::animation::Glide;

/// Position / rotation / uniform-scale transform.
///
/// Rotation is a pair of Euler angles about X then Y; the decorative
/// objects never rotate about Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation (x, y) in radians, fixed after creation.
    pub rotation: Vec2,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Transform {
    /// Identity transform.
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec2::ZERO,
        scale: 1.0,
    };

    /// Model matrix: translate · rotate_x · rotate_y · scale.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// One decorative pair: a cuboid and a donut animated by the same
/// per-index drift rule.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorPair {
    /// The cube-like member.
    pub cuboid: Transform,
    /// The torus-like member.
    pub donut: Transform,
}

/// The centered text mesh's animated state.
///
/// Position is reassigned absolutely every frame; the tilt glides track
/// the pointer.
#[derive(Debug, Clone)]
pub struct TextObject {
    /// World-space position (bobs on a small circle).
    pub position: Vec3,
    /// Eased rotation about X, tracking pointer y / 2.
    pub tilt_x: Glide,
    /// Eased rotation about Y, tracking pointer x / 2.
    pub tilt_y: Glide,
}

impl TextObject {
    /// A text object at rest at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            tilt_x: Glide::at(0.0),
            tilt_y: Glide::at(0.0),
        }
    }

    /// Model matrix from the current position and tilt.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.tilt_x.value())
            * Mat4::from_rotation_y(self.tilt_y.value())
    }
}

impl Default for TextObject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_matrix() {
        assert_eq!(Transform::IDENTITY.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn matrix_applies_scale_before_rotation() {
        let t = Transform {
            position: Vec3::ZERO,
            rotation: Vec2::new(0.0, std::f32::consts::FRAC_PI_2),
            scale: 2.0,
        };
        // +X scaled to length 2, then yawed 90° toward -Z.
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn matrix_applies_translation_last() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec2::ZERO,
            scale: 0.5,
        };
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.5, 2.0, 3.0)).length() < 1e-5);
    }
}
