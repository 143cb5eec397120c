//! # Thickness Policy
//!
//! Maps brightness to wall thickness and blends the result toward the border
//! thickness inside the transition bands at the bottom and top of the image.
//!
//! ```text
//! raw        = (1 - brightness) * (max - min) + min
//! thickness  = raw * proportion + border * (1 - proportion)
//! ```
//!
//! `proportion` is 1 outside the bands and falls linearly to 0 at the image
//! edge that touches a border.

use crate::geometry::ModelGeometry;
use crate::params::{BorderParams, ModelParams};
use crate::sampler::BrightnessSampler;

/// Blend weights for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionProfile {
    /// Weight of the image-driven thickness, in `[0, 1]`.
    pub proportion: f64,
    /// Thickness blended in with weight `1 - proportion`.
    pub border_thickness: f64,
}

impl TransitionProfile {
    /// Profile outside every transition band.
    pub const NONE: Self = Self {
        proportion: 1.0,
        border_thickness: 0.0,
    };

    /// Blends an image-driven thickness with the border thickness.
    #[inline]
    pub fn blend(&self, raw: f64) -> f64 {
        raw * self.proportion + self.border_thickness * (1.0 - self.proportion)
    }
}

/// Linear brightness-to-thickness mapping; brighter is thinner.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::thickness::raw_thickness;
///
/// assert_eq!(raw_thickness(1.0, 0.6, 3.0), 0.6);
/// assert_eq!(raw_thickness(0.0, 0.6, 3.0), 3.0);
/// ```
#[inline]
pub fn raw_thickness(brightness: f32, min_thickness: f64, max_thickness: f64) -> f64 {
    (1.0 - f64::from(brightness)) * (max_thickness - min_thickness) + min_thickness
}

/// Wall thickness for every cell of a brightness field.
#[derive(Debug, Clone, Copy)]
pub struct ThicknessPolicy<'a, S: ?Sized> {
    sampler: &'a S,
    min_thickness: f64,
    max_thickness: f64,
    top_border: BorderParams,
    bottom_border: BorderParams,
    pixel_step: f64,
    total_height: f64,
}

impl<'a, S: BrightnessSampler + ?Sized> ThicknessPolicy<'a, S> {
    /// Creates the policy for one model.
    pub fn new(params: &ModelParams, geometry: &ModelGeometry, sampler: &'a S) -> Self {
        Self {
            sampler,
            min_thickness: params.min_thickness,
            max_thickness: params.max_thickness,
            top_border: params.top_border,
            bottom_border: params.bottom_border,
            pixel_step: geometry.pixel_step,
            total_height: geometry.total_height,
        }
    }

    /// Wall thickness at `(col, row)`.
    pub fn thickness(&self, col: u32, row: u32) -> f64 {
        self.row_profile(row).blend(self.raw(col, row))
    }

    /// Unblended, image-driven thickness at `(col, row)`.
    #[inline]
    pub fn raw(&self, col: u32, row: u32) -> f64 {
        raw_thickness(
            self.sampler.brightness(col, row),
            self.min_thickness,
            self.max_thickness,
        )
    }

    /// Blend profile shared by every column of `row`.
    #[inline]
    pub fn row_profile(&self, row: u32) -> TransitionProfile {
        self.transition(f64::from(row) * self.pixel_step)
    }

    /// Blend profile at `height` above row 0.
    ///
    /// The bottom band takes priority when both bands cover `height`.
    /// A zero-length band never blends.
    pub fn transition(&self, height: f64) -> TransitionProfile {
        let bottom = &self.bottom_border;
        if bottom.blends() && height < bottom.transition {
            return TransitionProfile {
                proportion: height / bottom.transition,
                border_thickness: bottom.thickness,
            };
        }

        let top = &self.top_border;
        if top.blends() && height > self.total_height - top.transition {
            return TransitionProfile {
                proportion: (self.total_height - height) / top.transition,
                border_thickness: top.thickness,
            };
        }

        TransitionProfile::NONE
    }

    /// Returns true when some row lies in both transition bands.
    pub fn bands_overlap(&self) -> bool {
        self.bottom_border.blends()
            && self.top_border.blends()
            && self.bottom_border.transition > self.total_height - self.top_border.transition
    }
}
