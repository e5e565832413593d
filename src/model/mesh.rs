use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const fn new(pos: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { pos, normal, uv }
    }
}

/// CPU-side triangle mesh, ready for a renderer to upload as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Placeholder a renderer can hold before its first upload.
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Renderers skip draw calls for meshes with no geometry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    /// Box with its minimum corner at the origin and extents `size`.
    /// One quad per face so every face gets its own normal and full UV square.
    pub fn cuboid(size: Vec3) -> Self {
        let (w, h, d) = (size.x, size.y, size.z);

        let vertices = vec![
            // Front (+z)
            Vertex::new([0.0, 0.0, d], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([w, 0.0, d], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([w, h, d], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([0.0, h, d], [0.0, 0.0, 1.0], [0.0, 1.0]),
            // Back (-z)
            Vertex::new([w, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 0.0]),
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, -1.0], [1.0, 0.0]),
            Vertex::new([0.0, h, 0.0], [0.0, 0.0, -1.0], [1.0, 1.0]),
            Vertex::new([w, h, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0]),
            // Left (-x)
            Vertex::new([0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([0.0, 0.0, d], [-1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([0.0, h, d], [-1.0, 0.0, 0.0], [1.0, 1.0]),
            Vertex::new([0.0, h, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0]),
            // Right (+x)
            Vertex::new([w, 0.0, d], [1.0, 0.0, 0.0], [0.0, 0.0]),
            Vertex::new([w, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([w, h, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0]),
            Vertex::new([w, h, d], [1.0, 0.0, 0.0], [0.0, 1.0]),
            // Top (+y)
            Vertex::new([0.0, h, d], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([w, h, d], [0.0, 1.0, 0.0], [1.0, 0.0]),
            Vertex::new([w, h, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
            Vertex::new([0.0, h, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
            // Bottom (-y)
            Vertex::new([0.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0]),
            Vertex::new([w, 0.0, 0.0], [0.0, -1.0, 0.0], [1.0, 0.0]),
            Vertex::new([w, 0.0, d], [0.0, -1.0, 0.0], [1.0, 1.0]),
            Vertex::new([0.0, 0.0, d], [0.0, -1.0, 0.0], [0.0, 1.0]),
        ];

        // two counter-clockwise triangles per face
        let indices = (0..6u32)
            .flat_map(|face| {
                let b = face * 4;
                [b, b + 1, b + 2, b + 2, b + 3, b]
            })
            .collect();

        Self { vertices, indices }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Component-wise (min, max) of all vertex positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from_array(v.pos));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_layout() {
        let mesh = Mesh::cuboid(Vec3::new(3.0, 10.0, 3.0));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        assert_eq!(mesh.bounds(), Some((Vec3::ZERO, Vec3::new(3.0, 10.0, 3.0))));
    }

    #[test]
    fn test_cuboid_triangles_face_outward() {
        let size = Vec3::new(2.0, 1.0, 4.0);
        let mesh = Mesh::cuboid(size);
        let center = size * 0.5;
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.vertices[i as usize].pos));
            let winding = (b - a).cross(c - a);
            let stored = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!(winding.dot(stored) > 0.0, "winding disagrees with normal {:?}", stored);
            assert!((a - center).dot(stored) > 0.0, "normal points inward {:?}", stored);
        }
    }

    #[test]
    fn test_byte_views_match_lengths() {
        let mesh = Mesh::cuboid(Vec3::ONE);
        assert_eq!(mesh.vertex_bytes().len(), 24 * std::mem::size_of::<Vertex>());
        assert_eq!(mesh.index_bytes().len(), 36 * 4);
        assert!(Mesh::empty().is_empty());
        assert_eq!(Mesh::empty().bounds(), None);
    }
}
