//! Forward renderer for the marquee scene.
//!
//! One pass, three instanced draws: donuts, cuboids, and the text mesh.
//! Vertex and index buffers are uploaded once at startup; only the
//! per-instance model matrices and the camera uniform change per frame.

pub mod instance;

pub use instance::Instance;

use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform};
use crate::geometry::MeshData;
use crate::gpu::{DepthTexture, MatcapTexture, RenderContext, TypedBuffer};
use crate::options::Material;
use crate::scene::Scene;

const NORMAL_SHADER: &str = include_str!("shaders/normal.wgsl");
const MATCAP_SHADER: &str = include_str!("shaders/matcap.wgsl");

/// Static vertex/index buffers for one mesh.
struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// One instanced draw: shared mesh plus its per-frame instance buffer.
struct InstancedDraw {
    mesh: MeshBuffers,
    instances: TypedBuffer<Instance>,
}

impl InstancedDraw {
    fn new(
        device: &wgpu::Device,
        label: &str,
        mesh: &MeshData,
        instance_capacity: usize,
    ) -> Self {
        Self {
            mesh: MeshBuffers::new(device, label, mesh),
            instances: TypedBuffer::with_capacity(
                device,
                &format!("{label} Instances"),
                instance_capacity,
                wgpu::BufferUsages::VERTEX,
            ),
        }
    }

    fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.instances.is_empty() || self.mesh.index_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        render_pass.set_index_buffer(
            self.mesh.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(
            0..self.mesh.index_count,
            0,
            0..self.instances.count() as u32,
        );
    }
}

/// Owns every GPU resource needed to draw the scene.
pub struct SceneRenderer {
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    matcap_bind_group: Option<wgpu::BindGroup>,
    normal_pipeline: wgpu::RenderPipeline,
    matcap_pipeline: Option<wgpu::RenderPipeline>,
    depth: DepthTexture,
    donuts: InstancedDraw,
    cuboids: InstancedDraw,
    text: Option<InstancedDraw>,
    material: Material,
}

impl SceneRenderer {
    /// Build pipelines and upload the static meshes.
    ///
    /// `text_mesh` is `None` when the font failed to load; `matcap` is
    /// `None` when no matcap image is available, which forces the normal
    /// material regardless of `material`.
    pub fn new(
        context: &RenderContext,
        donut_mesh: &MeshData,
        cuboid_mesh: &MeshData,
        text_mesh: Option<&MeshData>,
        matcap: Option<&MatcapTexture>,
        material: Material,
        pair_count: usize,
    ) -> Self {
        let device = &context.device;

        let camera_uniform = CameraUniform::new();
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let camera_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let normal_pipeline = create_scene_pipeline(
            context,
            "Normal Material Pipeline",
            NORMAL_SHADER,
            &[&camera_layout],
        );

        let (matcap_pipeline, matcap_bind_group) = match matcap {
            Some(matcap) => {
                let matcap_layout = device.create_bind_group_layout(
                    &wgpu::BindGroupLayoutDescriptor {
                        label: Some("Matcap Bind Group Layout"),
                        entries: &[
                            wgpu::BindGroupLayoutEntry {
                                binding: 0,
                                visibility: wgpu::ShaderStages::FRAGMENT,
                                ty: wgpu::BindingType::Texture {
                                    sample_type: wgpu::TextureSampleType::Float {
                                        filterable: true,
                                    },
                                    view_dimension: wgpu::TextureViewDimension::D2,
                                    multisampled: false,
                                },
                                count: None,
                            },
                            wgpu::BindGroupLayoutEntry {
                                binding: 1,
                                visibility: wgpu::ShaderStages::FRAGMENT,
                                ty: wgpu::BindingType::Sampler(
                                    wgpu::SamplerBindingType::Filtering,
                                ),
                                count: None,
                            },
                        ],
                    },
                );
                let bind_group =
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("Matcap Bind Group"),
                        layout: &matcap_layout,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: wgpu::BindingResource::TextureView(
                                    &matcap.view,
                                ),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: wgpu::BindingResource::Sampler(
                                    &matcap.sampler,
                                ),
                            },
                        ],
                    });
                let pipeline = create_scene_pipeline(
                    context,
                    "Matcap Material Pipeline",
                    MATCAP_SHADER,
                    &[&camera_layout, &matcap_layout],
                );
                (Some(pipeline), Some(bind_group))
            }
            None => (None, None),
        };

        let material = if matcap_bind_group.is_some() {
            material
        } else {
            if material == Material::Matcap {
                log::warn!(
                    "matcap material requested without a matcap texture; \
                     falling back to normal material"
                );
            }
            Material::Normal
        };

        Self {
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            matcap_bind_group,
            normal_pipeline,
            matcap_pipeline,
            depth: DepthTexture::new(
                device,
                context.config.width,
                context.config.height,
            ),
            donuts: InstancedDraw::new(
                device,
                "Donut",
                donut_mesh,
                pair_count,
            ),
            cuboids: InstancedDraw::new(
                device,
                "Cuboid",
                cuboid_mesh,
                pair_count,
            ),
            text: text_mesh
                .map(|mesh| InstancedDraw::new(device, "Text", mesh, 1)),
            material,
        }
    }

    /// Recreate the depth attachment after a surface resize.
    pub fn resize(&mut self, context: &RenderContext) {
        self.depth = DepthTexture::new(
            &context.device,
            context.config.width,
            context.config.height,
        );
    }

    /// Upload the camera matrices for this frame.
    pub fn update_camera(&mut self, context: &RenderContext, camera: &Camera) {
        self.camera_uniform.update_view_proj(camera);
        context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Upload this frame's instance transforms from the scene state.
    pub fn write_instances(&mut self, context: &RenderContext, scene: &Scene) {
        let donuts: Vec<Instance> = scene
            .pairs()
            .iter()
            .map(|pair| Instance::from_matrix(pair.donut.matrix()))
            .collect();
        let cuboids: Vec<Instance> = scene
            .pairs()
            .iter()
            .map(|pair| Instance::from_matrix(pair.cuboid.matrix()))
            .collect();

        let device = &context.device;
        let queue = &context.queue;
        let _ = self.donuts.instances.write(device, queue, &donuts);
        let _ = self.cuboids.instances.write(device, queue, &cuboids);

        if let (Some(text), Some(state)) = (&mut self.text, scene.text()) {
            let _ = text.instances.write(
                device,
                queue,
                &[Instance::from_matrix(state.matrix())],
            );
        }
    }

    /// Record and submit one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain texture cannot be
    /// acquired; the caller decides whether to reconfigure or bail.
    pub fn draw(
        &self,
        context: &RenderContext,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            match (self.material, &self.matcap_pipeline) {
                (Material::Matcap, Some(pipeline)) => {
                    render_pass.set_pipeline(pipeline);
                    if let Some(bind_group) = &self.matcap_bind_group {
                        render_pass.set_bind_group(1, bind_group, &[]);
                    }
                }
                _ => render_pass.set_pipeline(&self.normal_pipeline),
            }
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            self.donuts.draw(&mut render_pass);
            self.cuboids.draw(&mut render_pass);
            if let Some(text) = &self.text {
                text.draw(&mut render_pass);
            }
        }

        context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// The material the renderer is actually drawing with.
    #[must_use]
    pub fn material(&self) -> Material {
        self.material
    }
}

/// Create the shared instanced-mesh render pipeline.
fn create_scene_pipeline(
    context: &RenderContext,
    label: &str,
    shader_source: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let device = &context.device;
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[
                crate::geometry::Vertex::layout(),
                Instance::layout(),
            ],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: context.format(),
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthTexture::FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
