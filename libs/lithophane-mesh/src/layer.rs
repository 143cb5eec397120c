//! # Layers
//!
//! A layer is one ring of the model: an outer and an inner perimeter with one
//! point per image column, all at the same height. Ring index `width - 1`
//! connects back to index 0.
//!
//! Layers are written in place so the orchestrator can keep two buffers and
//! swap them row after row.

use glam::DVec3;

use crate::geometry::{ModelGeometry, TrigTable};
use crate::params::{ModelParams, RoughFace};
use crate::sampler::BrightnessSampler;
use crate::thickness::ThicknessPolicy;

/// Outer and inner perimeters of one ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    outer: Vec<DVec3>,
    inner: Vec<DVec3>,
}

impl Layer {
    /// Creates a layer of `width` points per perimeter, all at the origin.
    pub fn with_width(width: usize) -> Self {
        Self {
            outer: vec![DVec3::ZERO; width],
            inner: vec![DVec3::ZERO; width],
        }
    }

    /// Number of points per perimeter.
    #[inline]
    pub fn len(&self) -> usize {
        self.outer.len()
    }

    /// Returns true if the layer has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }

    /// Points of the outer perimeter.
    #[inline]
    pub fn outer(&self) -> &[DVec3] {
        &self.outer
    }

    /// Points of the inner perimeter.
    #[inline]
    pub fn inner(&self) -> &[DVec3] {
        &self.inner
    }

    /// Index following `i` around the ring.
    #[inline]
    pub fn next_index(&self, i: usize) -> usize {
        (i + 1) % self.len()
    }

    /// Height of the ring.
    pub fn z(&self) -> f64 {
        self.outer.first().map_or(0.0, |p| p.z)
    }

    #[inline]
    fn set(&mut self, i: usize, outer: DVec3, inner: DVec3) {
        self.outer[i] = outer;
        self.inner[i] = inner;
    }
}

/// Builds rings by revolving wall thicknesses around the cylinder axis.
#[derive(Debug, Clone, Copy)]
pub struct LayerBuilder<'a, S: ?Sized> {
    policy: ThicknessPolicy<'a, S>,
    trig: &'a TrigTable,
    radius: f64,
    pixel_step: f64,
    rough_face: RoughFace,
}

impl<'a, S: BrightnessSampler + ?Sized> LayerBuilder<'a, S> {
    /// Creates a builder sharing the precomputed trigonometric table.
    pub fn new(
        params: &ModelParams,
        geometry: &ModelGeometry,
        trig: &'a TrigTable,
        sampler: &'a S,
    ) -> Self {
        Self {
            policy: ThicknessPolicy::new(params, geometry, sampler),
            trig,
            radius: geometry.radius,
            pixel_step: geometry.pixel_step,
            rough_face: params.rough_face,
        }
    }

    /// Thickness policy used for image rows.
    pub fn policy(&self) -> &ThicknessPolicy<'a, S> {
        &self.policy
    }

    /// Height of an image row: `row * pixel_step + vertical_offset`.
    #[inline]
    pub fn row_z(&self, row: u32, vertical_offset: f64) -> f64 {
        f64::from(row) * self.pixel_step + vertical_offset
    }

    /// Builds the ring for an image row into a new layer.
    pub fn build_lithophane_layer(&self, row: u32, vertical_offset: f64) -> Layer {
        let mut layer = Layer::with_width(self.trig.len());
        self.fill_lithophane_layer(&mut layer, row, vertical_offset);
        layer
    }

    /// Rewrites `layer` with the ring for an image row.
    pub fn fill_lithophane_layer(&self, layer: &mut Layer, row: u32, vertical_offset: f64) {
        debug_assert_eq!(layer.len(), self.trig.len());
        let z = self.row_z(row, vertical_offset);
        let profile = self.policy.row_profile(row);
        for col in 0..layer.len() {
            let thickness = profile.blend(self.policy.raw(col as u32, row));
            self.place(layer, col, z, thickness);
        }
    }

    /// Builds a fixed-thickness ring at height `z` into a new layer.
    pub fn build_border_layer(&self, z: f64, thickness: f64) -> Layer {
        let mut layer = Layer::with_width(self.trig.len());
        self.fill_border_layer(&mut layer, z, thickness);
        layer
    }

    /// Rewrites `layer` with a fixed-thickness ring at height `z`.
    pub fn fill_border_layer(&self, layer: &mut Layer, z: f64, thickness: f64) {
        debug_assert_eq!(layer.len(), self.trig.len());
        for col in 0..layer.len() {
            self.place(layer, col, z, thickness);
        }
    }

    #[inline]
    fn place(&self, layer: &mut Layer, col: usize, z: f64, thickness: f64) {
        let (outer_radius, inner_radius) = self.rough_face.radii(self.radius, thickness);
        let (cos, sin) = (self.trig.cos(col), self.trig.sin(col));
        layer.set(
            col,
            DVec3::new(cos * outer_radius, sin * outer_radius, z),
            DVec3::new(cos * inner_radius, sin * inner_radius, z),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BorderParams;
    use crate::sampler::GridSampler;
    use approx::assert_relative_eq;

    struct Fixture {
        params: ModelParams,
        geometry: ModelGeometry,
        trig: TrigTable,
        sampler: GridSampler,
    }

    impl Fixture {
        fn new(params: ModelParams, sampler: GridSampler) -> Self {
            let geometry = ModelGeometry::new(&params, sampler.width(), sampler.height());
            let trig = TrigTable::new(sampler.width());
            Self {
                params,
                geometry,
                trig,
                sampler,
            }
        }

        fn builder(&self) -> LayerBuilder<'_, GridSampler> {
            LayerBuilder::new(&self.params, &self.geometry, &self.trig, &self.sampler)
        }
    }

    fn radial(p: DVec3) -> f64 {
        p.x.hypot(p.y)
    }

    #[test]
    fn test_layer_has_one_point_per_column_at_one_height() {
        let fixture = Fixture::new(
            ModelParams::without_borders(),
            GridSampler::from_fn(7, 3, |col, row| (col + row) as f32 / 10.0),
        );
        let layer = fixture.builder().build_lithophane_layer(2, 1.5);

        assert_eq!(layer.outer().len(), 7);
        assert_eq!(layer.inner().len(), 7);
        let z = 2.0 * fixture.geometry.pixel_step + 1.5;
        for i in 0..layer.len() {
            assert_eq!(layer.outer()[i].z, layer.inner()[i].z);
            assert_relative_eq!(layer.outer()[i].z, z);
        }
        assert_relative_eq!(layer.z(), z);
    }

    #[test]
    fn test_rough_outside_keeps_inner_face_on_base_cylinder() {
        let params = ModelParams {
            rough_face: RoughFace::Outside,
            ..ModelParams::without_borders()
        };
        let fixture = Fixture::new(params, GridSampler::uniform(4, 2, 0.0));
        let layer = fixture.builder().build_lithophane_layer(0, 0.0);
        for i in 0..4 {
            assert_relative_eq!(radial(layer.inner()[i]), 75.0, epsilon = 1e-9);
            assert_relative_eq!(radial(layer.outer()[i]), 78.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rough_inside_keeps_outer_face_on_base_cylinder() {
        let params = ModelParams {
            rough_face: RoughFace::Inside,
            ..ModelParams::without_borders()
        };
        let fixture = Fixture::new(params, GridSampler::uniform(5, 1, 1.0));
        let layer = fixture.builder().build_lithophane_layer(0, 0.0);
        for i in 0..5 {
            assert_relative_eq!(radial(layer.outer()[i]), 75.0, epsilon = 1e-9);
            assert_relative_eq!(radial(layer.inner()[i]), 74.4, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rough_both_splits_thickness() {
        let params = ModelParams {
            rough_face: RoughFace::Both,
            ..ModelParams::without_borders()
        };
        let fixture = Fixture::new(params, GridSampler::uniform(6, 1, 0.0));
        let layer = fixture.builder().build_lithophane_layer(0, 0.0);
        assert_relative_eq!(radial(layer.outer()[3]), 76.5, epsilon = 1e-9);
        assert_relative_eq!(radial(layer.inner()[3]), 73.5, epsilon = 1e-9);
    }

    #[test]
    fn test_border_layer_ignores_brightness() {
        let params = ModelParams {
            rough_face: RoughFace::Outside,
            bottom_border: BorderParams::new(3.0, 2.0, 1.0),
            ..ModelParams::default()
        };
        let fixture = Fixture::new(
            params,
            GridSampler::from_fn(8, 4, |col, _| col as f32 / 8.0),
        );
        let layer = fixture.builder().build_border_layer(3.0, 2.0);
        for i in 0..8 {
            assert_relative_eq!(radial(layer.outer()[i]), 77.0, epsilon = 1e-9);
            assert_relative_eq!(radial(layer.inner()[i]), 75.0, epsilon = 1e-9);
            assert_eq!(layer.outer()[i].z, 3.0);
        }
    }

    #[test]
    fn test_columns_follow_angle_step() {
        let fixture = Fixture::new(ModelParams::without_borders(), GridSampler::uniform(4, 1, 0.5));
        let layer = fixture.builder().build_lithophane_layer(0, 0.0);
        let outer = layer.outer();
        assert!(outer[0].x > 0.0 && outer[0].y.abs() < 1e-9);
        assert!(outer[1].y > 0.0 && outer[1].x.abs() < 1e-9);
        assert!(outer[2].x < 0.0);
        assert!(outer[3].y < 0.0);
    }

    #[test]
    fn test_fill_reuses_buffer() {
        let fixture = Fixture::new(ModelParams::without_borders(), GridSampler::uniform(5, 3, 0.2));
        let builder = fixture.builder();
        let mut layer = builder.build_lithophane_layer(0, 0.0);
        builder.fill_lithophane_layer(&mut layer, 2, 0.0);
        assert_eq!(layer, builder.build_lithophane_layer(2, 0.0));
    }

    #[test]
    fn test_next_index_wraps() {
        let layer = Layer::with_width(3);
        assert_eq!(layer.next_index(0), 1);
        assert_eq!(layer.next_index(2), 0);
    }
}
