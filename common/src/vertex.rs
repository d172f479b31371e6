use std::mem;

use glam::{Vec2, Vec3};

/// Location of one attribute inside an interleaved vertex, for whoever uploads the buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub offset: usize,
    /// number of f32 components
    pub components: usize,
}

pub trait Vertex: bytemuck::Pod {
    fn attributes() -> &'static [VertexAttribute];

    fn stride() -> usize {
        mem::size_of::<Self>()
    }
}

/// Textured, vertex-coloured world vertex.
///
/// `color` is the face's light sample scaled to `0..=1`. Faces without a light sample
/// carry white so a multiplying shader leaves the texture untouched.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UVVertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub color: Vec3,
}

impl Default for UVVertex {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            uv: Vec2::ZERO,
            color: Vec3::ONE,
        }
    }
}

const UV_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        name: "position",
        offset: mem::offset_of!(UVVertex, position),
        components: 3,
    },
    VertexAttribute {
        name: "uv",
        offset: mem::offset_of!(UVVertex, uv),
        components: 2,
    },
    VertexAttribute {
        name: "color",
        offset: mem::offset_of!(UVVertex, color),
        components: 3,
    },
];

impl Vertex for UVVertex {
    fn attributes() -> &'static [VertexAttribute] {
        &UV_VERTEX_ATTRIBUTES
    }
}
