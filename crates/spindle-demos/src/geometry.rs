//! Static cube geometry.
//!
//! The cube is 24 vertices (4 per face, so each face carries its own color)
//! and 36 indices. Faces wind clockwise when viewed from outside; the cube
//! pipeline culls back faces under that convention. The skybox is the same
//! cube scaled up, position-only, and shares the index buffer.

use bytemuck::{Pod, Zeroable};

pub const CUBE_VERTEX_COUNT: usize = 24;
pub const INDEX_COUNT: usize = 36;

/// Cube half-extent in world units.
const H: f32 = 1.0;

/// Skybox half-extent. Large enough that the camera always sits well inside.
const SKY: f32 = 10.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl CubeVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
}

impl SkyVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![
        0 => Float32x3 // position
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SkyVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(position: [f32; 3], color: [f32; 4]) -> CubeVertex {
    CubeVertex { position, color }
}

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// One quad per face, vertices ordered top-left, top-right, bottom-right,
/// bottom-left as seen from outside the cube along the face normal.
pub const CUBE_VERTICES: [CubeVertex; CUBE_VERTEX_COUNT] = [
    // +Z
    v([-H, H, H], RED),
    v([H, H, H], RED),
    v([H, -H, H], RED),
    v([-H, -H, H], RED),
    // -Z
    v([H, H, -H], GREEN),
    v([-H, H, -H], GREEN),
    v([-H, -H, -H], GREEN),
    v([H, -H, -H], GREEN),
    // +X
    v([H, H, H], BLUE),
    v([H, H, -H], BLUE),
    v([H, -H, -H], BLUE),
    v([H, -H, H], BLUE),
    // -X
    v([-H, H, -H], YELLOW),
    v([-H, H, H], YELLOW),
    v([-H, -H, H], YELLOW),
    v([-H, -H, -H], YELLOW),
    // +Y
    v([-H, H, -H], CYAN),
    v([H, H, -H], CYAN),
    v([H, H, H], CYAN),
    v([-H, H, H], CYAN),
    // -Y
    v([-H, -H, H], MAGENTA),
    v([H, -H, H], MAGENTA),
    v([H, -H, -H], MAGENTA),
    v([-H, -H, -H], MAGENTA),
];

const fn s(x: f32, y: f32, z: f32) -> SkyVertex {
    SkyVertex { position: [x, y, z] }
}

/// Skybox cube: same 24-vertex face pattern as [`CUBE_VERTICES`], scaled to
/// [`SKY`], so the two meshes share one index buffer.
pub const SKY_VERTICES: [SkyVertex; CUBE_VERTEX_COUNT] = [
    // +Z
    s(-SKY, SKY, SKY),
    s(SKY, SKY, SKY),
    s(SKY, -SKY, SKY),
    s(-SKY, -SKY, SKY),
    // -Z
    s(SKY, SKY, -SKY),
    s(-SKY, SKY, -SKY),
    s(-SKY, -SKY, -SKY),
    s(SKY, -SKY, -SKY),
    // +X
    s(SKY, SKY, SKY),
    s(SKY, SKY, -SKY),
    s(SKY, -SKY, -SKY),
    s(SKY, -SKY, SKY),
    // -X
    s(-SKY, SKY, -SKY),
    s(-SKY, SKY, SKY),
    s(-SKY, -SKY, SKY),
    s(-SKY, -SKY, -SKY),
    // +Y
    s(-SKY, SKY, -SKY),
    s(SKY, SKY, -SKY),
    s(SKY, SKY, SKY),
    s(-SKY, SKY, SKY),
    // -Y
    s(-SKY, -SKY, SKY),
    s(SKY, -SKY, SKY),
    s(SKY, -SKY, -SKY),
    s(-SKY, -SKY, -SKY),
];

/// Two clockwise triangles per face quad.
pub const CUBE_INDICES: [u16; INDEX_COUNT] = [
    0, 1, 2, 0, 2, 3, // +Z
    4, 5, 6, 4, 6, 7, // -Z
    8, 9, 10, 8, 10, 11, // +X
    12, 13, 14, 12, 14, 15, // -X
    16, 17, 18, 16, 18, 19, // +Y
    20, 21, 22, 20, 22, 23, // -Y
];

/// Exact byte size of the cube vertex buffer.
pub const fn cube_vertex_buffer_size() -> u64 {
    (CUBE_VERTEX_COUNT * std::mem::size_of::<CubeVertex>()) as u64
}

/// Exact byte size of the skybox vertex buffer.
pub const fn sky_vertex_buffer_size() -> u64 {
    (CUBE_VERTEX_COUNT * std::mem::size_of::<SkyVertex>()) as u64
}

/// Exact byte size of the shared index buffer.
pub const fn index_buffer_size() -> u64 {
    (INDEX_COUNT * std::mem::size_of::<u16>()) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        assert_eq!(CUBE_VERTICES.len(), 24);
        assert_eq!(SKY_VERTICES.len(), 24);
        assert_eq!(CUBE_INDICES.len(), 36);
    }

    #[test]
    fn buffer_sizes_are_exact() {
        assert_eq!(cube_vertex_buffer_size(), 24 * 28);
        assert_eq!(sky_vertex_buffer_size(), 24 * 12);
        assert_eq!(index_buffer_size(), 36 * 2);
    }

    #[test]
    fn indices_stay_in_bounds() {
        for &i in &CUBE_INDICES {
            assert!((i as usize) < CUBE_VERTEX_COUNT);
        }
    }

    #[test]
    fn each_face_has_one_color() {
        for face in CUBE_VERTICES.chunks(4) {
            let c = face[0].color;
            assert!(face.iter().all(|v| v.color == c));
        }
    }

    #[test]
    fn face_colors_are_distinct() {
        for (i, a) in CUBE_VERTICES.chunks(4).enumerate() {
            for b in CUBE_VERTICES.chunks(4).skip(i + 1) {
                assert_ne!(a[0].color, b[0].color);
            }
        }
    }

    #[test]
    fn sky_is_scaled_cube() {
        for (cube, sky) in CUBE_VERTICES.iter().zip(SKY_VERTICES.iter()) {
            for axis in 0..3 {
                assert_eq!(sky.position[axis], cube.position[axis] * (SKY / H));
            }
        }
    }

    // Writing a vertex through its buffer layout and reading it back at the
    // declared stride/offsets must be byte-exact.
    #[test]
    fn vertex_round_trips_byte_exact() {
        let original = CubeVertex {
            position: [0.125, -2.5, 7.75],
            color: [0.5, 0.25, 1.0, 0.0625],
        };

        let bytes = bytemuck::bytes_of(&original);
        assert_eq!(bytes.len(), std::mem::size_of::<CubeVertex>());

        let layout = CubeVertex::layout();
        assert_eq!(layout.array_stride, 28);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 12);

        let position: [f32; 3] =
            *bytemuck::from_bytes(&bytes[layout.attributes[0].offset as usize..][..12]);
        let color: [f32; 4] =
            *bytemuck::from_bytes(&bytes[layout.attributes[1].offset as usize..][..16]);

        assert_eq!(position, original.position);
        assert_eq!(color, original.color);

        let back: CubeVertex = *bytemuck::from_bytes(bytes);
        assert_eq!(back, original);
    }

    #[test]
    fn index_buffer_round_trips_byte_exact() {
        let bytes = bytemuck::cast_slice::<u16, u8>(&CUBE_INDICES);
        assert_eq!(bytes.len() as u64, index_buffer_size());

        let back: &[u16] = bytemuck::cast_slice(bytes);
        assert_eq!(back, CUBE_INDICES);
    }
}
