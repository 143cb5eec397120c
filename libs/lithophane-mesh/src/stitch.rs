//! # Stitching
//!
//! Turns rings into triangles: caps close one ring, walls connect two.
//!
//! Every quad is split along the same diagonal, from `a[i]` to `b[j]` where
//! `j` is the next index around the ring:
//!
//! ```text
//! b[i] ---- b[j]
//!  |      /  |
//!  |    /    |
//!  |  /      |
//! a[i] ---- a[j]
//! ```

use glam::DVec3;

use crate::layer::Layer;
use crate::mesh::{Triangle, TriangleSink};

/// Which end of the cylinder a cap closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapSide {
    /// Faces down.
    Bottom,
    /// Faces up.
    Top,
}

/// Vertex order of an emitted triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Vertices in construction order.
    Forward,
    /// Vertices reversed, flipping the normal.
    Reversed,
}

impl From<CapSide> for Winding {
    fn from(side: CapSide) -> Self {
        match side {
            CapSide::Bottom => Winding::Forward,
            CapSide::Top => Winding::Reversed,
        }
    }
}

/// Orders `vertices` for the requested winding.
#[inline]
pub fn oriented(vertices: [DVec3; 3], winding: Winding) -> Triangle {
    let [v0, v1, v2] = vertices;
    let triangle = Triangle::new(v0, v1, v2);
    match winding {
        Winding::Forward => triangle,
        Winding::Reversed => triangle.inverted(),
    }
}

/// The two triangles of the quad `a[i], a[j], b[i], b[j]`.
#[inline]
fn quad(a: &[DVec3], b: &[DVec3], i: usize, j: usize) -> [[DVec3; 3]; 2] {
    [[a[i], b[j], b[i]], [a[i], a[j], b[j]]]
}

/// Emits the annulus closing `layer`: `2 * width` triangles.
///
/// Bottom caps face down; top caps use the reversed winding and face up.
pub fn horizontal_surface<K: TriangleSink + ?Sized>(layer: &Layer, side: CapSide, sink: &mut K) {
    let winding = Winding::from(side);
    for i in 0..layer.len() {
        let j = layer.next_index(i);
        for vertices in quad(layer.inner(), layer.outer(), i, j) {
            sink.push_triangle(oriented(vertices, winding));
        }
    }
}

/// Emits the outer and inner walls between two rings: `4 * width` triangles.
///
/// The outer wall faces away from the axis, the inner wall toward it.
pub fn vertical_surface<K: TriangleSink + ?Sized>(lower: &Layer, upper: &Layer, sink: &mut K) {
    debug_assert_eq!(lower.len(), upper.len());
    let (outer_lower, outer_upper) = (lower.outer(), upper.outer());
    let (inner_lower, inner_upper) = (lower.inner(), upper.inner());
    for i in 0..lower.len() {
        let j = lower.next_index(i);

        for [v0, v1, v2] in quad(outer_lower, outer_upper, i, j) {
            sink.push_triangle(Triangle::new(v0, v1, v2));
        }

        sink.push_triangle(Triangle::new(inner_lower[i], inner_upper[i], inner_upper[j]));
        sink.push_triangle(Triangle::new(inner_lower[i], inner_upper[j], inner_lower[j]));
    }
}
