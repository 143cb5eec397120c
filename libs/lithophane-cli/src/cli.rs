//! Command line arguments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use lithophane_mesh::{ModelParams, RoughFace, StlFormat};

/// Generate cylindrical lithophane STL files from images
#[derive(Debug, Parser)]
#[command(name = "lithophanizer", version, long_about = None)]
#[command(arg_required_else_help = true, allow_negative_numbers = true)]
pub struct Args {
    /// Source image (PNG, JPEG, BMP or GIF)
    #[arg(short, long, value_name = "PATH")]
    pub image: PathBuf,

    /// Output STL file
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Cylinder diameter in mm
    #[arg(short, long, value_name = "MM")]
    pub diameter: Option<f64>,

    /// Wall thickness of the lightest pixels in mm
    #[arg(short = 'n', long = "thickness-min", value_name = "MM")]
    pub min_thickness: Option<f64>,

    /// Wall thickness of the darkest pixels in mm
    #[arg(short = 'x', long = "thickness-max", value_name = "MM")]
    pub max_thickness: Option<f64>,

    /// Top border height in mm (0 disables the border)
    #[arg(long, value_name = "MM")]
    pub border_top_height: Option<f64>,

    /// Top border thickness in mm
    #[arg(long, value_name = "MM")]
    pub border_top_thickness: Option<f64>,

    /// Length of the band blending the image into the top border, in mm
    #[arg(long, value_name = "MM")]
    pub border_top_transition: Option<f64>,

    /// Bottom border height in mm (0 disables the border)
    #[arg(long, value_name = "MM")]
    pub border_bottom_height: Option<f64>,

    /// Bottom border thickness in mm
    #[arg(long, value_name = "MM")]
    pub border_bottom_thickness: Option<f64>,

    /// Length of the band blending the image into the bottom border, in mm
    #[arg(long, value_name = "MM")]
    pub border_bottom_transition: Option<f64>,

    /// Face carrying the relief: inside, outside or both
    #[arg(long, value_name = "FACE", conflicts_with = "flat_inside")]
    pub rough_face: Option<RoughFace>,

    /// Keep the inner face flat (same as --rough-face outside)
    #[arg(long)]
    pub flat_inside: bool,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    pub ascii: bool,

    /// JSON file with base parameter values
    #[arg(long, value_name = "JSON")]
    pub settings: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parameters from defaults, then the settings file, then flags.
    pub fn resolve_params(&self) -> Result<ModelParams> {
        let mut params = match &self.settings {
            Some(path) => load_settings(path)?,
            None => ModelParams::default(),
        };

        override_with(&mut params.diameter, self.diameter);
        override_with(&mut params.min_thickness, self.min_thickness);
        override_with(&mut params.max_thickness, self.max_thickness);

        let top = &mut params.top_border;
        override_with(&mut top.height, self.border_top_height);
        override_with(&mut top.thickness, self.border_top_thickness);
        override_with(&mut top.transition, self.border_top_transition);

        let bottom = &mut params.bottom_border;
        override_with(&mut bottom.height, self.border_bottom_height);
        override_with(&mut bottom.thickness, self.border_bottom_thickness);
        override_with(&mut bottom.transition, self.border_bottom_transition);

        if self.flat_inside {
            params.rough_face = RoughFace::Outside;
        }
        override_with(&mut params.rough_face, self.rough_face);

        Ok(params)
    }

    /// Requested STL flavor.
    pub fn format(&self) -> StlFormat {
        if self.ascii {
            StlFormat::Ascii
        } else {
            StlFormat::Binary
        }
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn load_settings(path: &Path) -> Result<ModelParams> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))
}
