//! # STL Serialization
//!
//! Binary and ASCII STL output, plus a reader used to verify written files.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Name, space padded
//! UINT32       – Number of triangles (little endian)
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid
//! ```
//!
//! Coordinates are kept in f64 up to this point and narrowed to f32 here.

mod ascii;
mod binary;

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use config::constants::{
    OUTPUT_BUFFER_SIZE, STL_COUNT_SIZE, STL_HEADER_SIZE, STL_NAME_REPLACEMENT, STL_TRIANGLE_SIZE,
};
use tracing::debug;

use crate::error::{LithophaneError, LithophaneResult};
use crate::mesh::TriangleMesh;

pub use ascii::{read_ascii, write_ascii};
pub use binary::{header_bytes, read_binary, write_binary};

/// STL flavor to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    /// Compact little-endian records; the default.
    #[default]
    Binary,
    /// Human-readable text.
    Ascii,
}

impl fmt::Display for StlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StlFormat::Binary => f.write_str("binary"),
            StlFormat::Ascii => f.write_str("ascii"),
        }
    }
}

impl FromStr for StlFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(StlFormat::Binary),
            "ascii" => Ok(StlFormat::Ascii),
            other => Err(format!("unknown STL format \"{other}\" (expected binary or ascii)")),
        }
    }
}

/// Size in bytes of a binary STL with `triangle_count` triangles.
///
/// # Example
///
/// ```rust
/// assert_eq!(lithophane_mesh::stl::binary_size(40), 84 + 40 * 50);
/// ```
pub fn binary_size(triangle_count: usize) -> u64 {
    (STL_HEADER_SIZE + STL_COUNT_SIZE) as u64 + triangle_count as u64 * STL_TRIANGLE_SIZE as u64
}

/// Writes `mesh` in the requested format.
///
/// # Errors
///
/// Propagates write failures.
pub fn write<W: Write>(mesh: &TriangleMesh, writer: &mut W, format: StlFormat) -> io::Result<()> {
    match format {
        StlFormat::Binary => write_binary(mesh, writer),
        StlFormat::Ascii => write_ascii(mesh, writer),
    }
}

/// Creates `path` and writes `mesh` through a buffered writer.
///
/// The file is created only here, after the mesh is complete.
///
/// # Errors
///
/// Returns [`LithophaneError::Io`] if the file cannot be created or written.
pub fn write_file(
    mesh: &TriangleMesh,
    path: impl AsRef<Path>,
    format: StlFormat,
) -> LithophaneResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, file);
    write(mesh, &mut writer, format)?;
    writer.flush()?;
    debug!(
        "Wrote {} triangles to {} ({format})",
        mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

/// Parses STL data, detecting binary or ASCII.
///
/// Data whose length matches the triangle count in its binary header is
/// binary, even if the name starts with `solid`.
///
/// # Errors
///
/// Returns [`LithophaneError::InvalidStl`] for malformed data.
pub fn read(bytes: &[u8]) -> LithophaneResult<TriangleMesh> {
    if looks_binary(bytes) {
        read_binary(bytes)
    } else if bytes.trim_ascii_start().starts_with(b"solid") {
        read_ascii(bytes)
    } else {
        read_binary(bytes)
    }
}

/// Reads and parses an STL file.
///
/// # Errors
///
/// Returns [`LithophaneError::Io`] if the file cannot be read, or
/// [`LithophaneError::InvalidStl`] for malformed content.
pub fn read_file(path: impl AsRef<Path>) -> LithophaneResult<TriangleMesh> {
    let bytes = std::fs::read(path)?;
    read(&bytes)
}

/// Opens a buffered reader over an STL file known to be ASCII.
///
/// # Errors
///
/// Returns [`LithophaneError::Io`] if the file cannot be opened.
pub fn read_ascii_file(path: impl AsRef<Path>) -> LithophaneResult<TriangleMesh> {
    read_ascii(BufReader::new(File::open(path)?))
}

fn looks_binary(bytes: &[u8]) -> bool {
    let Some(count) = bytes.get(STL_HEADER_SIZE..STL_HEADER_SIZE + STL_COUNT_SIZE) else {
        return false;
    };
    let count = u32::from_le_bytes([count[0], count[1], count[2], count[3]]);
    bytes.len() as u64 == binary_size(count as usize)
}

/// Replaces characters that do not belong in an STL name.
pub(crate) fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c
            } else {
                STL_NAME_REPLACEMENT
            }
        })
        .collect()
}

pub(crate) fn eof_as_invalid(err: io::Error, message: impl FnOnce() -> String) -> LithophaneError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        LithophaneError::invalid_stl(message())
    } else {
        LithophaneError::Io(err)
    }
}
