//! Quad geometry shared by all renderables
//!
//! Every sprite and glyph is a single textured quad. Vertices are plain data
//! suitable for direct upload to a vertex buffer.

use bytemuck::{Pod, Zeroable};

/// Vertex of a textured quad
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// Model-space position
    pub position: [f32; 2],
    /// Texture coordinate
    pub uv: [f32; 2],
}

/// Index list drawing a quad as two triangles
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Normalized texture sub-rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Left texture coordinate
    pub left: f32,
    /// Top texture coordinate
    pub top: f32,
    /// Right texture coordinate
    pub right: f32,
    /// Bottom texture coordinate
    pub bottom: f32,
}

impl UvRect {
    /// The whole texture
    pub const FULL: UvRect = UvRect {
        left: 0.0,
        top: 0.0,
        right: 1.0,
        bottom: 1.0,
    };
}

/// Four vertices of a textured quad, wound counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadGeometry {
    /// Corner vertices: top-left, top-right, bottom-right, bottom-left
    pub vertices: [QuadVertex; 4],
}

impl QuadGeometry {
    /// Quad centered on the origin with the given half extents
    pub fn centered(half_width: f32, half_height: f32, uv: UvRect) -> Self {
        Self {
            vertices: [
                QuadVertex {
                    position: [-half_width, -half_height],
                    uv: [uv.left, uv.top],
                },
                QuadVertex {
                    position: [half_width, -half_height],
                    uv: [uv.right, uv.top],
                },
                QuadVertex {
                    position: [half_width, half_height],
                    uv: [uv.right, uv.bottom],
                },
                QuadVertex {
                    position: [-half_width, half_height],
                    uv: [uv.left, uv.bottom],
                },
            ],
        }
    }

    /// Quad with its top-left corner on the origin
    pub fn top_left(width: f32, height: f32, uv: UvRect) -> Self {
        Self {
            vertices: [
                QuadVertex {
                    position: [0.0, 0.0],
                    uv: [uv.left, uv.top],
                },
                QuadVertex {
                    position: [width, 0.0],
                    uv: [uv.right, uv.top],
                },
                QuadVertex {
                    position: [width, height],
                    uv: [uv.right, uv.bottom],
                },
                QuadVertex {
                    position: [0.0, height],
                    uv: [uv.left, uv.bottom],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_quad_straddles_origin() {
        let q = QuadGeometry::centered(2.0, 3.0, UvRect::FULL);
        assert_eq!(q.vertices[0].position, [-2.0, -3.0]);
        assert_eq!(q.vertices[2].position, [2.0, 3.0]);
    }

    #[test]
    fn top_left_quad_starts_at_origin() {
        let q = QuadGeometry::top_left(4.0, 5.0, UvRect::FULL);
        assert_eq!(q.vertices[0].position, [0.0, 0.0]);
        assert_eq!(q.vertices[2].position, [4.0, 5.0]);
    }

    #[test]
    fn vertices_are_pod() {
        let q = QuadGeometry::centered(1.0, 1.0, UvRect::FULL);
        let bytes: &[u8] = bytemuck::cast_slice(&q.vertices);
        assert_eq!(bytes.len(), 4 * std::mem::size_of::<QuadVertex>());
    }
}
