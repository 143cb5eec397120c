//! # Lithophane Errors
//!
//! Error types for model validation, image loading and STL I/O.
//!
//! ## Error Policy
//!
//! - Configuration is validated before any geometry is built or any file is
//!   opened for writing
//! - All errors are terminal for the current run; nothing is retried
//! - Degenerate triangles are not errors (see [`crate::mesh::Triangle::normal`])

use std::path::PathBuf;

use thiserror::Error;

use crate::params::BorderSide;

/// A rejected model configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The source image does not exist.
    #[error("Image path \"{}\" not found", path.display())]
    ImageNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The source image path exists but is not a regular file.
    #[error("Image path \"{}\" is not a file", path.display())]
    ImageNotAFile {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Diameter is zero, negative, infinite or NaN.
    #[error("Diameter must be a finite number greater than zero: {0}")]
    NonPositiveDiameter(f64),

    /// Minimum thickness is zero, negative, infinite or NaN.
    #[error("Minimum thickness must be a finite number greater than zero: {0}")]
    NonPositiveMinThickness(f64),

    /// Maximum thickness does not exceed the minimum.
    #[error("Maximum thickness must be finite and above the minimum: min={min}, max={max}")]
    MaxNotAboveMin {
        /// Configured minimum thickness.
        min: f64,
        /// Configured maximum thickness.
        max: f64,
    },

    /// A border dimension is negative, infinite or NaN.
    #[error("{side} border {field} must be a non-negative finite number: {value}")]
    NegativeBorder {
        /// Which border was rejected.
        side: BorderSide,
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The brightness field cannot form a closed ring.
    #[error("Image too small: {width}x{height} (need at least {min_width} columns and 1 row)")]
    ImageTooSmall {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Minimum accepted width.
        min_width: u32,
    },

    /// An in-memory brightness grid has the wrong number of samples.
    #[error("Brightness grid {width}x{height} needs {expected} samples, got {got}")]
    SampleCountMismatch {
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
        /// `width * height`.
        expected: usize,
        /// Number of samples supplied.
        got: usize,
    },
}

/// Errors that can occur while generating or serializing a lithophane.
#[derive(Debug, Error)]
pub enum LithophaneError {
    /// Bad configuration, detected before any geometry work.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// The source image could not be decoded.
    #[error("Image decoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// STL input could not be parsed.
    #[error("Invalid STL: {message}")]
    InvalidStl {
        /// Description of what was invalid.
        message: String,
    },
}

impl LithophaneError {
    /// Creates an STL parse error.
    pub fn invalid_stl(message: impl Into<String>) -> Self {
        Self::InvalidStl {
            message: message.into(),
        }
    }
}

/// Rejected rough-face name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown rough face \"{0}\" (expected inside, outside or both)")]
pub struct ParseRoughFaceError(pub String);

/// Result type alias for lithophane operations.
pub type LithophaneResult<T> = Result<T, LithophaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_human_readable() {
        let err = LithophaneError::from(ValidationError::MaxNotAboveMin { min: 3.0, max: 1.0 });
        let text = err.to_string();
        assert!(text.contains("Maximum thickness"));
        assert!(text.contains("min=3"));
    }

    #[test]
    fn test_border_error_names_side_and_field() {
        let err = ValidationError::NegativeBorder {
            side: BorderSide::Top,
            field: "height",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "Top border height must be a non-negative finite number: -1"
        );
    }

    #[test]
    fn test_image_path_errors_quote_path() {
        let err = ValidationError::ImageNotFound {
            path: PathBuf::from("missing.png"),
        };
        assert_eq!(err.to_string(), "Image path \"missing.png\" not found");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LithophaneError>();
    }
}
