//! Centralized configuration values shared across the lithophane pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

// =============================================================================
// MODEL DEFAULTS (millimeters)
// =============================================================================

/// Default cylinder diameter, measured on the flat face.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_DIAMETER;
/// assert_eq!(DEFAULT_DIAMETER, 150.0);
/// ```
pub const DEFAULT_DIAMETER: f64 = 150.0;

/// Default thickness of the lightest pixels.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_MIN_THICKNESS;
/// assert!(DEFAULT_MIN_THICKNESS > 0.0);
/// ```
pub const DEFAULT_MIN_THICKNESS: f64 = 0.6;

/// Default thickness of the darkest pixels.
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_MAX_THICKNESS, DEFAULT_MIN_THICKNESS};
/// assert!(DEFAULT_MAX_THICKNESS > DEFAULT_MIN_THICKNESS);
/// ```
pub const DEFAULT_MAX_THICKNESS: f64 = 3.0;

/// Default height of the top border rim. Zero disables the border.
pub const DEFAULT_TOP_BORDER_HEIGHT: f64 = 3.0;

/// Default thickness of the top border rim.
pub const DEFAULT_TOP_BORDER_THICKNESS: f64 = 3.0;

/// Default length of the band that blends the image into the top border.
pub const DEFAULT_TOP_BORDER_TRANSITION: f64 = 2.0;

/// Default height of the bottom border rim. Zero disables the border.
pub const DEFAULT_BOTTOM_BORDER_HEIGHT: f64 = 3.0;

/// Default thickness of the bottom border rim.
pub const DEFAULT_BOTTOM_BORDER_THICKNESS: f64 = 3.0;

/// Default length of the band that blends the bottom border into the image.
pub const DEFAULT_BOTTOM_BORDER_TRANSITION: f64 = 2.0;

// =============================================================================
// GEOMETRY LIMITS
// =============================================================================

/// Minimum number of image columns needed to close a ring.
///
/// # Examples
/// ```
/// use config::constants::MIN_RING_WIDTH;
/// let width = 2u32;
/// assert!(width < MIN_RING_WIDTH);
/// ```
pub const MIN_RING_WIDTH: u32 = 3;

/// Area below which a triangle is reported as degenerate.
///
/// Degenerate triangles are still written; this only drives diagnostics.
///
/// # Examples
/// ```
/// use config::constants::DEGENERATE_AREA_EPSILON;
/// let doubled_area: f64 = 0.0;
/// assert!(doubled_area < DEGENERATE_AREA_EPSILON);
/// ```
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// STL FORMAT
// =============================================================================

/// Size of the binary STL name header in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of the little-endian triangle count that follows the header.
pub const STL_COUNT_SIZE: usize = 4;

/// Size of one binary STL triangle record: normal, three vertices and the
/// attribute word.
///
/// # Examples
/// ```
/// use config::constants::STL_TRIANGLE_SIZE;
/// assert_eq!(STL_TRIANGLE_SIZE, 4 * 3 * 4 + 2);
/// ```
pub const STL_TRIANGLE_SIZE: usize = 50;

/// Attribute byte count written after every binary triangle.
pub const STL_ATTRIBUTE_BYTE_COUNT: u16 = 0;

/// Byte used to pad the binary header.
pub const STL_HEADER_PADDING: u8 = b' ';

/// Replacement for characters that cannot be written to the ASCII-only header.
pub const STL_NAME_REPLACEMENT: char = '?';

// =============================================================================
// OUTPUT
// =============================================================================

/// Capacity of the buffered writer used for STL output.
///
/// Triangle counts grow with `width * height`, so output is written through a
/// megabyte-scale buffer.
///
/// # Examples
/// ```
/// use config::constants::OUTPUT_BUFFER_SIZE;
/// assert_eq!(OUTPUT_BUFFER_SIZE, 2 * 1024 * 1024);
/// ```
pub const OUTPUT_BUFFER_SIZE: usize = 2 * 1024 * 1024;

/// Prefix of the model name stored in the STL header.
///
/// # Examples
/// ```
/// use config::constants::MODEL_NAME_PREFIX;
/// let name = format!("{MODEL_NAME_PREFIX} photo.png");
/// assert!(name.starts_with("Cylindrical lithophane"));
/// ```
pub const MODEL_NAME_PREFIX: &str = "Cylindrical lithophane from";
