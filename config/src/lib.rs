//! # Config Crate
//!
//! Centralized configuration constants for the lithophane pipeline.
//! All magic numbers and tunable defaults are defined here so that the
//! geometry library and the command-line front end agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_DIAMETER, DEFAULT_MIN_THICKNESS, DEFAULT_MAX_THICKNESS};
//!
//! let user_diameter: Option<f64> = None;
//! let diameter = user_diameter.unwrap_or(DEFAULT_DIAMETER);
//! assert_eq!(diameter, 150.0);
//! assert!(DEFAULT_MAX_THICKNESS > DEFAULT_MIN_THICKNESS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Millimeters**: Every length is expressed in millimeters
//! - **Familiar Defaults**: A 150 mm cylinder with 0.6 to 3.0 mm walls and 3 mm borders

pub mod constants;
