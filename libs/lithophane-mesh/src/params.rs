//! # Model Parameters
//!
//! Physical dimensions of the lithophane, in millimeters.

use std::fmt;
use std::str::FromStr;

use config::constants::{
    DEFAULT_BOTTOM_BORDER_HEIGHT, DEFAULT_BOTTOM_BORDER_THICKNESS,
    DEFAULT_BOTTOM_BORDER_TRANSITION, DEFAULT_DIAMETER, DEFAULT_MAX_THICKNESS,
    DEFAULT_MIN_THICKNESS, DEFAULT_TOP_BORDER_HEIGHT, DEFAULT_TOP_BORDER_THICKNESS,
    DEFAULT_TOP_BORDER_TRANSITION,
};
use serde::{Deserialize, Serialize};

use crate::error::{ParseRoughFaceError, ValidationError};

/// Which face of the wall carries the relief.
///
/// The other face stays on the base cylinder and is smooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoughFace {
    /// Relief on the inside, flat outer face at the base radius.
    #[default]
    Inside,
    /// Relief on the outside, flat inner face at the base radius.
    Outside,
    /// Relief split evenly between both faces.
    Both,
}

impl RoughFace {
    /// Returns `(outer, inner)` radii of a ring point with the given wall
    /// thickness around a base cylinder of `radius`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lithophane_mesh::RoughFace;
    ///
    /// assert_eq!(RoughFace::Outside.radii(75.0, 3.0), (78.0, 75.0));
    /// assert_eq!(RoughFace::Inside.radii(75.0, 3.0), (75.0, 72.0));
    /// assert_eq!(RoughFace::Both.radii(75.0, 3.0), (76.5, 73.5));
    /// ```
    #[inline]
    pub fn radii(self, radius: f64, thickness: f64) -> (f64, f64) {
        match self {
            RoughFace::Inside => (radius, radius - thickness),
            RoughFace::Outside => (radius + thickness, radius),
            RoughFace::Both => {
                let half = thickness / 2.0;
                (radius + half, radius - half)
            }
        }
    }

    /// How far a wall of the given thickness reaches inside the base
    /// cylinder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lithophane_mesh::RoughFace;
    ///
    /// assert_eq!(RoughFace::Inside.inward_depth(3.0), 3.0);
    /// assert_eq!(RoughFace::Outside.inward_depth(3.0), 0.0);
    /// assert_eq!(RoughFace::Both.inward_depth(3.0), 1.5);
    /// ```
    #[inline]
    pub fn inward_depth(self, thickness: f64) -> f64 {
        let (_, inner) = self.radii(0.0, thickness);
        -inner
    }
}

impl fmt::Display for RoughFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoughFace::Inside => "inside",
            RoughFace::Outside => "outside",
            RoughFace::Both => "both",
        };
        f.write_str(name)
    }
}

impl FromStr for RoughFace {
    type Err = ParseRoughFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inside" => Ok(RoughFace::Inside),
            "outside" => Ok(RoughFace::Outside),
            "both" => Ok(RoughFace::Both),
            _ => Err(ParseRoughFaceError(s.to_string())),
        }
    }
}

/// Identifies the top or bottom border in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    /// Rim at the top of the cylinder.
    Top,
    /// Rim at the bottom of the cylinder.
    Bottom,
}

impl fmt::Display for BorderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderSide::Top => f.write_str("Top"),
            BorderSide::Bottom => f.write_str("Bottom"),
        }
    }
}

/// A fixed-thickness rim and the band that blends it into the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderParams {
    /// Height of the rim; zero disables the border.
    pub height: f64,
    /// Wall thickness of the rim.
    pub thickness: f64,
    /// Length of the blend band inside the image area.
    pub transition: f64,
}

impl BorderParams {
    /// Creates border parameters.
    pub fn new(height: f64, thickness: f64, transition: f64) -> Self {
        Self {
            height,
            thickness,
            transition,
        }
    }

    /// A border that is not generated.
    pub fn disabled() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns true when the rim is generated.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.height > 0.0
    }

    /// Returns true when the image blends into the rim over a non-zero band.
    #[inline]
    pub fn blends(&self) -> bool {
        self.is_enabled() && self.transition > 0.0
    }

    fn validate(&self, side: BorderSide) -> Result<(), ValidationError> {
        for (field, value) in [
            ("height", self.height),
            ("thickness", self.thickness),
            ("transition", self.transition),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::NegativeBorder { side, field, value });
            }
        }
        Ok(())
    }
}

/// Complete set of model dimensions.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{ModelParams, RoughFace};
///
/// let params = ModelParams {
///     rough_face: RoughFace::Outside,
///     ..ModelParams::default()
/// };
/// assert!(params.validate().is_ok());
/// assert_eq!(params.radius(), 75.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Diameter of the base cylinder, measured on the flat face.
    pub diameter: f64,
    /// Wall thickness of the lightest pixels.
    pub min_thickness: f64,
    /// Wall thickness of the darkest pixels.
    pub max_thickness: f64,
    /// Rim at the top of the cylinder.
    pub top_border: BorderParams,
    /// Rim at the bottom of the cylinder.
    pub bottom_border: BorderParams,
    /// Face carrying the relief.
    pub rough_face: RoughFace,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            diameter: DEFAULT_DIAMETER,
            min_thickness: DEFAULT_MIN_THICKNESS,
            max_thickness: DEFAULT_MAX_THICKNESS,
            top_border: BorderParams::new(
                DEFAULT_TOP_BORDER_HEIGHT,
                DEFAULT_TOP_BORDER_THICKNESS,
                DEFAULT_TOP_BORDER_TRANSITION,
            ),
            bottom_border: BorderParams::new(
                DEFAULT_BOTTOM_BORDER_HEIGHT,
                DEFAULT_BOTTOM_BORDER_THICKNESS,
                DEFAULT_BOTTOM_BORDER_TRANSITION,
            ),
            rough_face: RoughFace::default(),
        }
    }
}

impl ModelParams {
    /// Default dimensions with both borders disabled.
    pub fn without_borders() -> Self {
        Self {
            top_border: BorderParams::disabled(),
            bottom_border: BorderParams::disabled(),
            ..Self::default()
        }
    }

    /// Radius of the base cylinder.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Returns true when a top rim is generated.
    #[inline]
    pub fn has_top_border(&self) -> bool {
        self.top_border.is_enabled()
    }

    /// Returns true when a bottom rim is generated.
    #[inline]
    pub fn has_bottom_border(&self) -> bool {
        self.bottom_border.is_enabled()
    }

    /// Returns true when some wall reaches the cylinder axis, folding the
    /// inner face through itself.
    ///
    /// Validation accepts such models; callers should warn.
    pub fn inner_face_collapses(&self) -> bool {
        let mut thicknesses = vec![self.max_thickness];
        for border in [self.top_border, self.bottom_border] {
            if border.is_enabled() {
                thicknesses.push(border.thickness);
            }
        }
        let radius = self.radius();
        thicknesses
            .into_iter()
            .any(|t| self.rough_face.inward_depth(t) >= radius)
    }

    /// Checks every dimension.
    ///
    /// NaN and infinity fail every check.
    ///
    /// # Errors
    ///
    /// Returns the first rejected dimension, checked in the order diameter,
    /// minimum thickness, maximum thickness, bottom border, top border.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.diameter.is_finite() || self.diameter <= 0.0 {
            return Err(ValidationError::NonPositiveDiameter(self.diameter));
        }
        if !self.min_thickness.is_finite() || self.min_thickness <= 0.0 {
            return Err(ValidationError::NonPositiveMinThickness(self.min_thickness));
        }
        if !self.max_thickness.is_finite() || self.max_thickness <= self.min_thickness {
            return Err(ValidationError::MaxNotAboveMin {
                min: self.min_thickness,
                max: self.max_thickness,
            });
        }
        self.bottom_border.validate(BorderSide::Bottom)?;
        self.top_border.validate(BorderSide::Top)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_come_from_config() {
        let params = ModelParams::default();
        assert_eq!(params.diameter, 150.0);
        assert_eq!(params.min_thickness, 0.6);
        assert_eq!(params.max_thickness, 3.0);
        assert_eq!(params.top_border, BorderParams::new(3.0, 3.0, 2.0));
        assert_eq!(params.bottom_border, BorderParams::new(3.0, 3.0, 2.0));
        assert_eq!(params.rough_face, RoughFace::Inside);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_diameter() {
        let params = ModelParams {
            diameter: 0.0,
            ..ModelParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::NonPositiveDiameter(0.0))
        );
    }

    #[test]
    fn test_rejects_nan_diameter() {
        let params = ModelParams {
            diameter: f64::NAN,
            ..ModelParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::NonPositiveDiameter(_))
        ));
    }

    #[test]
    fn test_rejects_infinite_dimensions() {
        let params = ModelParams {
            diameter: f64::INFINITY,
            ..ModelParams::without_borders()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::NonPositiveDiameter(f64::INFINITY))
        );

        let params = ModelParams {
            max_thickness: f64::INFINITY,
            ..ModelParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ValidationError::MaxNotAboveMin { .. })
        ));

        let params = ModelParams {
            top_border: BorderParams::new(3.0, f64::INFINITY, 2.0),
            ..ModelParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::NegativeBorder {
                side: BorderSide::Top,
                field: "thickness",
                value: f64::INFINITY,
            })
        );
    }

    #[test]
    fn test_thick_walls_on_small_cylinders_collapse_inner_face() {
        let small = ModelParams {
            diameter: 2.0,
            ..ModelParams::without_borders()
        };
        assert!(small.validate().is_ok());
        assert!(small.inner_face_collapses());

        let outside = ModelParams {
            rough_face: RoughFace::Outside,
            ..small
        };
        assert!(!outside.inner_face_collapses());

        // Both: half of 3.0 stays below the 2.0 radius, until it does not.
        let both = ModelParams {
            diameter: 4.0,
            rough_face: RoughFace::Both,
            ..ModelParams::without_borders()
        };
        assert!(!both.inner_face_collapses());
        let both = ModelParams {
            max_thickness: 4.0,
            ..both
        };
        assert!(both.inner_face_collapses());

        let thick_border = ModelParams {
            diameter: 8.0,
            bottom_border: BorderParams::new(1.0, 4.0, 0.0),
            top_border: BorderParams::disabled(),
            ..ModelParams::default()
        };
        assert!(thick_border.inner_face_collapses());
        assert!(!ModelParams::default().inner_face_collapses());
    }

    #[test]
    fn test_rejects_non_positive_min_thickness() {
        let params = ModelParams {
            min_thickness: -0.5,
            ..ModelParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::NonPositiveMinThickness(-0.5))
        );
    }

    #[test]
    fn test_rejects_max_equal_to_min() {
        let params = ModelParams {
            min_thickness: 2.0,
            max_thickness: 2.0,
            ..ModelParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::MaxNotAboveMin { min: 2.0, max: 2.0 })
        );
    }

    #[test]
    fn test_rejects_negative_border_field() {
        let params = ModelParams {
            top_border: BorderParams::new(3.0, 3.0, -2.0),
            ..ModelParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::NegativeBorder {
                side: BorderSide::Top,
                field: "transition",
                value: -2.0,
            })
        );
    }

    #[test]
    fn test_zero_height_disables_border() {
        let border = BorderParams::new(0.0, 3.0, 2.0);
        assert!(!border.is_enabled());
        assert!(!border.blends());
        assert!(BorderParams::new(3.0, 3.0, 0.0).is_enabled());
        assert!(!BorderParams::new(3.0, 3.0, 0.0).blends());

        let params = ModelParams::without_borders();
        assert!(!params.has_top_border() && !params.has_bottom_border());
        assert!(ModelParams::default().has_top_border());
    }

    #[test]
    fn test_rough_face_parsing() {
        assert_eq!("inside".parse::<RoughFace>(), Ok(RoughFace::Inside));
        assert_eq!("OUTSIDE".parse::<RoughFace>(), Ok(RoughFace::Outside));
        assert_eq!(" both ".parse::<RoughFace>(), Ok(RoughFace::Both));
        assert!("middle".parse::<RoughFace>().is_err());
        assert_eq!(RoughFace::Both.to_string(), "both");
    }

    #[test]
    fn test_settings_json_falls_back_to_defaults() {
        let params: ModelParams =
            serde_json::from_str(r#"{ "diameter": 80.0, "rough_face": "both" }"#)
                .expect("valid settings");
        assert_eq!(params.diameter, 80.0);
        assert_eq!(params.rough_face, RoughFace::Both);
        assert_eq!(params.min_thickness, 0.6);
        assert!(params.top_border.is_enabled());
    }

    #[test]
    fn test_settings_json_round_trip() {
        let params = ModelParams::without_borders();
        let json = serde_json::to_string(&params).expect("serializable");
        let back: ModelParams = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, params);
    }
}
