//! Torus ("donut") mesh generation.

use std::f32::consts::TAU;

use glam::Vec3;

use super::{MeshData, Vertex};

/// Torus generation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    /// Distance from the torus center to the tube center.
    pub radius: f32,
    /// Tube radius.
    pub tube: f32,
    /// Segments around the tube cross-section.
    pub radial_segments: u32,
    /// Segments around the main ring.
    pub tubular_segments: u32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            radius: 0.3,
            tube: 0.2,
            radial_segments: 20,
            tubular_segments: 45,
        }
    }
}

/// Generate an indexed torus mesh with smooth normals.
#[must_use]
pub fn generate(params: &TorusParams) -> MeshData {
    let radial = params.radial_segments.max(3);
    let tubular = params.tubular_segments.max(3);

    let mut mesh = MeshData::default();
    mesh.vertices
        .reserve(((radial + 1) * (tubular + 1)) as usize);

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;

            let ring = params.radius + params.tube * v.cos();
            let position =
                Vec3::new(ring * u.cos(), ring * u.sin(), params.tube * v.sin());
            let center =
                Vec3::new(params.radius * u.cos(), params.radius * u.sin(), 0.0);
            let normal = (position - center).normalize();

            mesh.vertices.push(Vertex::new(position, normal));
        }
    }

    for j in 1..=radial {
        for i in 1..=tubular {
            let a = (tubular + 1) * j + i - 1;
            let b = (tubular + 1) * (j - 1) + i - 1;
            let c = (tubular + 1) * (j - 1) + i;
            let d = (tubular + 1) * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let p = TorusParams::default();
        let m = generate(&p);
        assert_eq!(m.vertices.len(), (21 * 46) as usize);
        assert_eq!(m.indices.len(), (20 * 45 * 6) as usize);
    }

    #[test]
    fn normals_are_unit_length() {
        let m = generate(&TorusParams::default());
        for v in &m.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn positions_within_outer_radius() {
        let p = TorusParams::default();
        let m = generate(&p);
        let bound = p.radius + p.tube + 1e-4;
        for v in &m.vertices {
            assert!(Vec3::from_array(v.position).length() <= bound);
        }
    }
}
