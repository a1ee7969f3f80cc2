//! Per-instance GPU data.

use glam::Mat4;

/// One instanced draw's model matrix, uploaded as four vec4 columns.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Instance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
}

impl Instance {
    /// Wrap a model matrix.
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self {
            model: matrix.to_cols_array_2d(),
        }
    }

    /// Instance-stepped vertex layout at shader locations 2 through 5.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 4] =
            wgpu::vertex_attr_array![
                2 => Float32x4,
                3 => Float32x4,
                4 => Float32x4,
                5 => Float32x4,
            ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Instance>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn matrix_round_trips_column_major() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let instance = Instance::from_matrix(m);
        // Translation lands in the fourth column.
        assert_eq!(instance.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(Mat4::from_cols_array_2d(&instance.model), m);
    }

    #[test]
    fn layout_is_instance_stepped() {
        let layout = Instance::layout();
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.array_stride, 64);
        assert_eq!(layout.attributes.len(), 4);
        assert_eq!(layout.attributes[0].shader_location, 2);
        assert_eq!(layout.attributes[3].shader_location, 5);
    }
}
