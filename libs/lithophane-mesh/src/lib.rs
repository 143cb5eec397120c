//! # Lithophane Mesh
//!
//! Generates cylindrical lithophanes: hollow cylinders whose wall thickness
//! follows the brightness of an image, so the picture appears when the
//! cylinder is lit from inside.
//!
//! ## Architecture
//!
//! ```text
//! BrightnessSampler ─→ ThicknessPolicy ─→ LayerBuilder ─→ stitch ─→ TriangleSink
//!                                                                       ↓
//!                                                                  stl writer
//! ```
//!
//! Each image column becomes one point of every ring and each image row one
//! ring. Optional solid borders close the bottom and top, with transition
//! bands that blend the relief into the border thickness.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lithophane_mesh::{generate_file, ModelParams, StlFormat};
//!
//! let params = ModelParams::default();
//! let report = generate_file("photo.png", "photo.stl", params, StlFormat::Binary)?;
//! println!("{} triangles", report.triangle_count);
//! ```

pub mod error;
pub mod geometry;
pub mod layer;
pub mod lithophane;
pub mod mesh;
pub mod params;
pub mod sampler;
pub mod stitch;
pub mod stl;
pub mod thickness;

pub use error::{LithophaneError, LithophaneResult, ParseRoughFaceError, ValidationError};
pub use geometry::{ModelGeometry, TrigTable};
pub use layer::{Layer, LayerBuilder};
pub use lithophane::{generate_file, GenerationReport, Lithophane};
pub use mesh::{Triangle, TriangleMesh, TriangleSink};
pub use params::{BorderParams, BorderSide, ModelParams, RoughFace};
pub use sampler::{check_image_path, BrightnessSampler, GridSampler, ImageSampler};
pub use stl::StlFormat;
pub use thickness::ThicknessPolicy;
