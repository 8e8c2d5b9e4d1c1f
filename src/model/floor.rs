use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Half-extent of the ground plane; the floor covers +-FLOOR_EXTENT in x/z.
pub const FLOOR_EXTENT: f32 = 50.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

/// CPU-side mesh, uploaded once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

/// GPU-resident mesh, drawn non-indexed.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl Mesh {
    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor_vertex_buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        MeshBuffer {
            vertex_buffer,
            vertex_count: self.vertices.len() as u32,
        }
    }
}

/// The ground plane: two triangles at y = 0 spanning +-FLOOR_EXTENT.
pub fn floor_mesh() -> Mesh {
    let e = FLOOR_EXTENT;
    Mesh {
        vertices: vec![
            Vertex { pos: [-e, 0.0, -e] },
            Vertex { pos: [e, 0.0, -e] },
            Vertex { pos: [e, 0.0, e] },
            Vertex { pos: [-e, 0.0, -e] },
            Vertex { pos: [e, 0.0, e] },
            Vertex { pos: [-e, 0.0, e] },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_two_triangles() {
        assert_eq!(floor_mesh().vertices.len(), 6);
    }

    #[test]
    fn floor_is_flat_at_origin_height() {
        for v in &floor_mesh().vertices {
            assert_eq!(v.pos[1], 0.0);
        }
    }

    #[test]
    fn floor_covers_full_extent() {
        let mesh = floor_mesh();
        let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.pos[0]).collect();
        let zs: Vec<f32> = mesh.vertices.iter().map(|v| v.pos[2]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), -FLOOR_EXTENT);
        assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), FLOOR_EXTENT);
        assert_eq!(zs.iter().cloned().fold(f32::INFINITY, f32::min), -FLOOR_EXTENT);
        assert_eq!(zs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), FLOOR_EXTENT);
    }
}
