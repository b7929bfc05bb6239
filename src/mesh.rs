//! GPU-resident copies of [`MeshData`].
//!
//! # Vertex Layout
//!
//! The [`Vertex`] struct uses the following GPU layout (36 bytes per vertex):
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | color     | Float32x3 | 12     | 1               |
//! | normal    | Float32x3 | 24     | 2               |

use crate::geometry::MeshData;
use crate::gpu::GpuContext;

/// One triangle corner as uploaded to the vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// The wgpu vertex buffer layout descriptor for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // color
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    /// Interleaves the three parallel sequences of `mesh`.
    pub fn interleave(mesh: &MeshData) -> Vec<Vertex> {
        mesh.points
            .iter()
            .zip(&mesh.colors)
            .zip(&mesh.normals)
            .map(|((p, c), n)| Vertex {
                position: p.to_array(),
                color: c.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }
}

/// Vertex buffer for one triangle list, drawn without an index buffer.
#[derive(Debug)]
pub struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
}

impl GpuMesh {
    /// Uploads `mesh` into a new vertex buffer.
    pub fn new(gpu: &GpuContext, mesh: &MeshData) -> Self {
        use wgpu::util::DeviceExt;

        let vertices = Vertex::interleave(mesh);
        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 36);
        assert_eq!(Vertex::LAYOUT.array_stride, 36);
    }

    #[test]
    fn shader_locations_match_field_offsets() {
        let locations: Vec<_> = Vertex::LAYOUT
            .attributes
            .iter()
            .map(|a| (a.shader_location, a.offset))
            .collect();
        assert_eq!(locations, vec![(0, 0), (1, 12), (2, 24)]);
        assert_eq!(std::mem::offset_of!(Vertex, color), 12);
        assert_eq!(std::mem::offset_of!(Vertex, normal), 24);
    }

    #[test]
    fn interleave_keeps_corner_order() {
        let mesh = MeshData::square(Vec3::new(0.1, 0.2, 0.3));
        let vertices = Vertex::interleave(&mesh);

        assert_eq!(vertices.len(), mesh.len());
        for (vertex, point) in vertices.iter().zip(&mesh.points) {
            assert_eq!(vertex.position, point.to_array());
            assert_eq!(vertex.color, [0.1, 0.2, 0.3]);
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }
}
