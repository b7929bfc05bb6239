//! Phong shading pass with depth testing and flat planar shadows.
//!
//! [`PhongPass`] owns the render pipeline, a per-draw uniform buffer and the
//! depth buffer. A frame is recorded through [`FrameRecorder`], which implements
//! [`Renderer`] so the composer can drive it directly.
//!
//! # Uniform slots
//!
//! Every draw writes its [`DrawUniforms`] into its own slot of a single buffer and
//! binds it with a dynamic offset. Queue writes land before the pass executes, so
//! sharing one slot between draws would leave every draw with the last values.

use glam::{Mat4, Vec4};
use tracing::warn;

use crate::composer::{DrawCall, DrawTarget, Renderer, Shading};
use crate::gpu::GpuContext;
use crate::mesh::{GpuMesh, Vertex};

/// Uniforms for a single draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`, identity when `model` is singular.
    pub normal_matrix: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub material_ambient: [f32; 4],
    pub material_diffuse: [f32; 4],
    pub material_specular: [f32; 4],
    pub light_ambient: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub light_specular: [f32; 4],
    pub light_position: [f32; 4],
    /// x: shininess, y: 1.0 for a flat shadow draw.
    pub params: [f32; 4],
}

impl DrawUniforms {
    pub fn from_call(call: &DrawCall) -> Self {
        let normal_matrix = if call.model.determinant().abs() > f32::EPSILON {
            call.model.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };

        let mut uniforms = Self {
            model: call.model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            view: call.view.to_cols_array_2d(),
            projection: call.projection.to_cols_array_2d(),
            eye: call.eye.extend(1.0).to_array(),
            ..bytemuck::Zeroable::zeroed()
        };

        match call.shading {
            Shading::Lit { material, light } => {
                uniforms.material_ambient = material.ambient().to_array();
                uniforms.material_diffuse = material.diffuse().to_array();
                uniforms.material_specular = material.specular().to_array();
                uniforms.light_ambient = light.ambient().to_array();
                uniforms.light_diffuse = light.diffuse().to_array();
                uniforms.light_specular = light.specular().to_array();
                uniforms.light_position = light.position().extend(1.0).to_array();
                uniforms.params = [material.shininess(), 0.0, 0.0, 0.0];
            }
            Shading::FlatShadow => {
                uniforms.params = Vec4::new(1.0, 1.0, 0.0, 0.0).to_array();
            }
        }
        uniforms
    }
}

/// GPU copies of the two scene meshes.
pub struct SceneMeshes {
    pub plane: GpuMesh,
    pub object: GpuMesh,
}

impl SceneMeshes {
    fn get(&self, target: DrawTarget) -> &GpuMesh {
        match target {
            DrawTarget::Plane => &self.plane,
            DrawTarget::Object => &self.object,
        }
    }
}

pub struct PhongPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniform_stride: u64,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl PhongPass {
    /// Uniform slots available per frame.
    pub const MAX_DRAWS: u64 = 8;

    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Phong Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/phong.wgsl").into()),
        });

        let uniform_size = std::mem::size_of::<DrawUniforms>() as u64;
        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let uniform_stride = uniform_size.div_ceil(alignment) * alignment;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniforms"),
            size: uniform_stride * Self::MAX_DRAWS,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Draw Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(uniform_size),
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(uniform_size),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Phong Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Phong Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            // Loaded meshes have inconsistent winding, so nothing is culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_view = Self::create_depth_view(gpu);

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
        }
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreates the depth buffer if the surface size changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Binds the pipeline and returns a recorder for this frame's draws.
    pub fn begin<'a, 'pass>(
        &'a self,
        gpu: &'a GpuContext,
        render_pass: &'a mut wgpu::RenderPass<'pass>,
        meshes: &'a SceneMeshes,
    ) -> FrameRecorder<'a, 'pass> {
        render_pass.set_pipeline(&self.pipeline);
        FrameRecorder {
            pass: self,
            gpu,
            render_pass,
            meshes,
            slot: 0,
        }
    }
}

/// Records draws into an open render pass.
pub struct FrameRecorder<'a, 'pass> {
    pass: &'a PhongPass,
    gpu: &'a GpuContext,
    render_pass: &'a mut wgpu::RenderPass<'pass>,
    meshes: &'a SceneMeshes,
    slot: u64,
}

impl Renderer for FrameRecorder<'_, '_> {
    fn submit(&mut self, call: &DrawCall) {
        if self.slot >= PhongPass::MAX_DRAWS {
            warn!(draw = ?call.target, "draw dropped, uniform slots exhausted");
            return;
        }

        let offset = self.slot * self.pass.uniform_stride;
        self.slot += 1;

        let uniforms = DrawUniforms::from_call(call);
        self.gpu.queue.write_buffer(
            &self.pass.uniform_buffer,
            offset,
            bytemuck::cast_slice(&[uniforms]),
        );

        let mesh = self.meshes.get(call.target);
        self.render_pass
            .set_bind_group(0, &self.pass.uniform_bind_group, &[offset as u32]);
        self.render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.render_pass.draw(0..mesh.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Light;
    use crate::material::Material;
    use glam::Vec3;

    fn call(model: Mat4, shading: Shading) -> DrawCall {
        DrawCall {
            target: DrawTarget::Object,
            model,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            eye: Vec3::new(0.0, 0.0, 4.0),
            shading,
        }
    }

    #[test]
    fn uniform_layout_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 4 * 64 + 9 * 16);
    }

    #[test]
    fn lit_draw_packs_material_and_light() {
        let material = Material::default();
        let light = Light::default();
        let uniforms =
            DrawUniforms::from_call(&call(Mat4::IDENTITY, Shading::Lit { material, light }));

        assert_eq!(uniforms.material_diffuse, material.diffuse().to_array());
        assert_eq!(uniforms.light_position, [1.0, 2.0, 1.0, 1.0]);
        assert_eq!(uniforms.params, [material.shininess(), 0.0, 0.0, 0.0]);
        assert_eq!(uniforms.eye, [0.0, 0.0, 4.0, 1.0]);
    }

    #[test]
    fn shadow_draw_sets_flag_and_identity_normals() {
        let flatten = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let uniforms = DrawUniforms::from_call(&call(flatten, Shading::FlatShadow));

        assert_eq!(uniforms.params[1], 1.0);
        assert_eq!(uniforms.normal_matrix, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(uniforms.material_diffuse, [0.0; 4]);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let uniforms = DrawUniforms::from_call(&call(
            model,
            Shading::Lit {
                material: Material::default(),
                light: Light::default(),
            },
        ));
        assert!((uniforms.normal_matrix[0][0] - 0.5).abs() < 1e-6);
        assert!((uniforms.normal_matrix[1][1] - 1.0).abs() < 1e-6);
    }
}
