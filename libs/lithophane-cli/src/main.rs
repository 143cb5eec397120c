//! Lithophanizer
//!
//! Turns an image into a cylindrical lithophane STL.
//!
//! ```text
//! lithophanizer -i photo.png -o photo.stl -d 120 --rough-face outside
//! ```
//!
//! Options override values from `--settings <json>`, which override the
//! built-in defaults. Logs go to stderr; set `RUST_LOG` or pass `-v` for more.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use lithophane_mesh::generate_file;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let params = args.resolve_params()?;
    generate_file(&args.image, &args.output, params, args.format())
        .with_context(|| format!("Failed to generate {}", args.output.display()))?;
    Ok(())
}

/// Installs a stderr subscriber. `-v` forces debug, `-vv` trace; otherwise
/// `RUST_LOG` applies, falling back to info.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
