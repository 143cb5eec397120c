//! # Triangle Mesh
//!
//! Named, ordered triangle soup. Every triangle carries its own vertices, the
//! way STL stores them; there is no shared vertex index.

use std::collections::HashMap;

use config::constants::DEGENERATE_AREA_EPSILON;
use glam::DVec3;

/// Three ordered vertices.
///
/// Vertex order fixes the normal direction by the right-hand rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex positions (f64 for precision)
    pub vertices: [DVec3; 3],
}

impl Triangle {
    /// Creates a triangle from three vertices.
    #[inline]
    pub fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Same triangle with the opposite winding, `(v2, v1, v0)`.
    #[inline]
    pub fn inverted(self) -> Self {
        let [v0, v1, v2] = self.vertices;
        Self::new(v2, v1, v0)
    }

    /// Unnormalized normal, `(v1 - v0) × (v2 - v0)`.
    #[inline]
    pub fn cross(&self) -> DVec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0).cross(v2 - v0)
    }

    /// Unit normal.
    ///
    /// Zero-area triangles have no direction and yield a NaN normal, which is
    /// written as-is.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use lithophane_mesh::Triangle;
    ///
    /// let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
    /// assert_eq!(tri.normal(), DVec3::Z);
    /// ```
    #[inline]
    pub fn normal(&self) -> DVec3 {
        let n = self.cross();
        n / n.length()
    }

    /// Returns true if the triangle has (numerically) zero area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.cross().length() < DEGENERATE_AREA_EPSILON
    }
}

/// Receiver of generated triangles, in emission order.
pub trait TriangleSink {
    /// Appends one triangle.
    fn push_triangle(&mut self, triangle: Triangle);
}

impl TriangleSink for Vec<Triangle> {
    fn push_triangle(&mut self, triangle: Triangle) {
        self.push(triangle);
    }
}

/// A named triangle mesh.
///
/// Triangle order is insertion order and is preserved on output.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use lithophane_mesh::{Triangle, TriangleMesh};
///
/// let mut mesh = TriangleMesh::new("demo");
/// mesh.add_triangle(Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y));
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    name: String,
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Creates an empty mesh.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::new(),
        }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(name: impl Into<String>, triangle_count: usize) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Model name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Appends a triangle.
    #[inline]
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of zero-area triangles.
    pub fn degenerate_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.is_degenerate()).count()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut points = self.triangles.iter().flat_map(|t| t.vertices);
        let Some(first) = points.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        points.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }

    /// Returns true if every undirected edge is shared by exactly two
    /// triangles.
    ///
    /// Vertices are matched by exact coordinates, which holds for meshes whose
    /// triangles copy points from shared rings.
    pub fn is_watertight(&self) -> bool {
        let mut uses: HashMap<(VertexKey, VertexKey), u32> = HashMap::new();
        for tri in &self.triangles {
            let keys = tri.vertices.map(vertex_key);
            for (a, b) in [(keys[0], keys[1]), (keys[1], keys[2]), (keys[2], keys[0])] {
                let edge = if a <= b { (a, b) } else { (b, a) };
                *uses.entry(edge).or_insert(0) += 1;
            }
        }
        !uses.is_empty() && uses.values().all(|&count| count == 2)
    }
}

impl TriangleSink for TriangleMesh {
    fn push_triangle(&mut self, triangle: Triangle) {
        self.add_triangle(triangle);
    }
}

type VertexKey = [u64; 3];

fn vertex_key(v: DVec3) -> VertexKey {
    // +0.0 and -0.0 are the same point
    [v.x + 0.0, v.y + 0.0, v.z + 0.0].map(f64::to_bits)
}
