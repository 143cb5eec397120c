//! # Model Geometry
//!
//! Quantities derived once from the parameters and the sampler dimensions,
//! and shared by reference with every layer that is built.

use std::f64::consts::PI;

use crate::params::ModelParams;

/// Derived scalar geometry of one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelGeometry {
    /// Points per ring (image width).
    pub width: u32,
    /// Image rows.
    pub height: u32,
    /// Radius of the base cylinder.
    pub radius: f64,
    /// Angle between adjacent columns, `2π / width`.
    pub angle_step: f64,
    /// Arc length of one column on the base cylinder, `π * diameter / width`.
    /// Rows use the same spacing, so pixels are square.
    pub pixel_step: f64,
    /// Height of the image area, `height * pixel_step`.
    pub total_height: f64,
}

impl ModelGeometry {
    /// Derives the geometry for a `width x height` brightness field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lithophane_mesh::{ModelGeometry, ModelParams};
    ///
    /// let geometry = ModelGeometry::new(&ModelParams::default(), 100, 50);
    /// assert!((geometry.pixel_step - std::f64::consts::PI * 1.5).abs() < 1e-12);
    /// ```
    pub fn new(params: &ModelParams, width: u32, height: u32) -> Self {
        let pixel_step = PI * params.diameter / f64::from(width);
        Self {
            width,
            height,
            radius: params.radius(),
            angle_step: 2.0 * PI / f64::from(width),
            pixel_step,
            total_height: f64::from(height) * pixel_step,
        }
    }

    /// Height of `row` above row 0, ignoring any vertical offset.
    #[inline]
    pub fn row_height(&self, row: u32) -> f64 {
        f64::from(row) * self.pixel_step
    }
}

/// Cosine and sine of every column angle, computed once per model.
#[derive(Debug, Clone, PartialEq)]
pub struct TrigTable {
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl TrigTable {
    /// Tabulates `width` evenly spaced angles, starting at 0.
    pub fn new(width: u32) -> Self {
        let angle_step = 2.0 * PI / f64::from(width);
        let (cos, sin) = (0..width)
            .map(|col| {
                let angle = f64::from(col) * angle_step;
                (angle.cos(), angle.sin())
            })
            .unzip();
        Self { cos, sin }
    }

    /// Number of tabulated columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.cos.len()
    }

    /// Returns true if no columns are tabulated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    /// Cosine of the column angle.
    #[inline]
    pub fn cos(&self, col: usize) -> f64 {
        self.cos[col]
    }

    /// Sine of the column angle.
    #[inline]
    pub fn sin(&self, col: usize) -> f64 {
        self.sin[col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geometry_steps() {
        let params = ModelParams {
            diameter: 100.0,
            ..ModelParams::default()
        };
        let geometry = ModelGeometry::new(&params, 200, 40);
        assert_relative_eq!(geometry.angle_step, PI / 100.0);
        assert_relative_eq!(geometry.pixel_step, PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(geometry.total_height, 20.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(geometry.row_height(3), 1.5 * PI, epsilon = 1e-12);
        assert_eq!(geometry.radius, 50.0);
    }

    #[test]
    fn test_trig_table_quarter_turns() {
        let table = TrigTable::new(4);
        assert_eq!(table.len(), 4);
        assert_relative_eq!(table.cos(0), 1.0);
        assert_relative_eq!(table.sin(0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(table.sin(1), 1.0, epsilon = 1e-12);
        assert_relative_eq!(table.cos(2), -1.0, epsilon = 1e-12);
        assert_relative_eq!(table.sin(3), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trig_table_is_unit_circle() {
        let table = TrigTable::new(37);
        for col in 0..table.len() {
            let r = table.cos(col).hypot(table.sin(col));
            assert_relative_eq!(r, 1.0, epsilon = 1e-12);
        }
    }
}
