//! Axis-aligned cuboid mesh generation.

use glam::Vec3;

use super::{MeshData, Vertex};

/// Generate a unit cube centered on the origin with per-face normals.
#[must_use]
pub fn unit() -> MeshData {
    generate(Vec3::ONE)
}

/// Generate a cuboid of the given extents centered on the origin.
///
/// 24 vertices (4 per face, flat normals) and 36 indices.
#[must_use]
pub fn generate(size: Vec3) -> MeshData {
    let h = size * 0.5;
    let mut mesh = MeshData::default();

    // (normal, u axis, v axis) per face
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        let origin = normal * (normal.abs().dot(h));
        let ue = u * u.abs().dot(h);
        let ve = v * v.abs().dot(h);
        for corner in [
            origin - ue - ve,
            origin + ue - ve,
            origin + ue + ve,
            origin - ue + ve,
        ] {
            mesh.vertices.push(Vertex::new(corner, normal));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}
