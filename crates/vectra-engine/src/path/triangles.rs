use crate::coords::UserPoint;

use super::PathError;

/// Which triangles a renderer skips, by screen-space winding.
#[repr(i8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TriangleCulling {
    /// Skip triangles with negative signed area.
    Negative = -1,
    #[default]
    None = 0,
    /// Skip triangles with positive signed area.
    Positive = 1,
}

/// Texture coordinate dimension per vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum UvtDim {
    /// `(u, v)`
    #[default]
    Uv = 2,
    /// `(u, v, t)` with `t` the perspective term.
    Uvt = 3,
}

/// Pre-tessellated triangle mesh.
///
/// Vertices are `(x, y)` pairs. Without indices, every three consecutive
/// vertices form a triangle. UVT data is either empty or exactly one
/// `uvt_dim`-sized tuple per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrianglePath {
    vertices: Vec<f32>,
    indices: Vec<u32>,
    uvt: Vec<f32>,
    uvt_dim: UvtDim,
    pub culling: TriangleCulling,
}

impl TrianglePath {
    pub fn new(
        vertices: Vec<f32>,
        indices: Vec<u32>,
        uvt: Vec<f32>,
        uvt_dim: UvtDim,
        culling: TriangleCulling,
    ) -> Result<Self, PathError> {
        if vertices.len() % 2 != 0 {
            return Err(PathError::VertexDataLength(vertices.len()));
        }
        let vertex_count = vertices.len() / 2;

        if indices.is_empty() {
            if vertex_count % 3 != 0 {
                return Err(PathError::IndexCountNotTriangles(vertex_count));
            }
        } else {
            if indices.len() % 3 != 0 {
                return Err(PathError::IndexCountNotTriangles(indices.len()));
            }
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(PathError::IndexOutOfRange { index, vertex_count });
            }
        }

        let expected = vertex_count * uvt_dim as usize;
        if !uvt.is_empty() && uvt.len() != expected {
            return Err(PathError::UvtLength { expected, found: uvt.len() });
        }

        Ok(Self { vertices, indices, uvt, uvt_dim, culling })
    }

    /// Untextured mesh.
    #[inline]
    pub fn from_vertices(vertices: Vec<f32>, indices: Vec<u32>) -> Result<Self, PathError> {
        Self::new(vertices, indices, Vec::new(), UvtDim::Uv, TriangleCulling::None)
    }

    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn uvt(&self) -> &[f32] {
        &self.uvt
    }

    #[inline]
    pub fn uvt_dim(&self) -> UvtDim {
        self.uvt_dim
    }

    #[inline]
    pub fn has_uvt(&self) -> bool {
        !self.uvt.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        if self.indices.is_empty() {
            self.vertex_count() / 3
        } else {
            self.indices.len() / 3
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    pub fn vertex(&self, i: usize) -> Option<UserPoint> {
        let xy = self.vertices.get(i * 2..i * 2 + 2)?;
        Some(UserPoint::new(xy[0], xy[1]))
    }

    /// UVT tuple of vertex `i`, if the mesh is textured.
    pub fn uvt_of(&self, i: usize) -> Option<&[f32]> {
        let dim = self.uvt_dim as usize;
        self.uvt.get(i * dim..i * dim + dim)
    }

    /// Vertex indices of triangle `t`.
    pub fn triangle(&self, t: usize) -> Option<[u32; 3]> {
        if t >= self.triangle_count() {
            return None;
        }
        if self.indices.is_empty() {
            let base = (t * 3) as u32;
            Some([base, base + 1, base + 2])
        } else {
            let tri = &self.indices[t * 3..t * 3 + 3];
            Some([tri[0], tri[1], tri[2]])
        }
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        (0..self.triangle_count()).filter_map(|t| self.triangle(t))
    }

    /// Twice the signed area of triangle `tri` in vertex space.
    pub fn signed_area(&self, tri: [u32; 3]) -> f32 {
        let [a, b, c] = tri.map(|i| self.vertex(i as usize).unwrap_or_default());
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    /// True when the culling mode drops `tri`.
    pub fn is_culled(&self, tri: [u32; 3]) -> bool {
        let area = self.signed_area(tri);
        match self.culling {
            TriangleCulling::None => false,
            TriangleCulling::Positive => area > 0.0,
            TriangleCulling::Negative => area < 0.0,
        }
    }
}
