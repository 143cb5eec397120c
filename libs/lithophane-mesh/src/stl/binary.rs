//! Binary STL records.

use std::io::{self, Read, Write};

use config::constants::{
    STL_ATTRIBUTE_BYTE_COUNT, STL_COUNT_SIZE, STL_HEADER_PADDING, STL_HEADER_SIZE,
    STL_TRIANGLE_SIZE,
};
use glam::DVec3;

use super::{eof_as_invalid, sanitize_name};
use crate::error::LithophaneResult;
use crate::mesh::{Triangle, TriangleMesh};

/// The 80-byte header for `name`: ASCII only, truncated, space padded.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::stl::header_bytes;
///
/// let header = header_bytes("vase");
/// assert_eq!(&header[..4], b"vase");
/// assert!(header[4..].iter().all(|&b| b == b' '));
/// ```
pub fn header_bytes(name: &str) -> [u8; STL_HEADER_SIZE] {
    let mut header = [STL_HEADER_PADDING; STL_HEADER_SIZE];
    let name = sanitize_name(name);
    let len = name.len().min(STL_HEADER_SIZE);
    header[..len].copy_from_slice(&name.as_bytes()[..len]);
    header
}

/// Writes `mesh` as binary STL.
///
/// # Errors
///
/// Fails on write errors, or with [`io::ErrorKind::InvalidInput`] if the
/// triangle count does not fit in 32 bits.
pub fn write_binary<W: Write + ?Sized>(mesh: &TriangleMesh, writer: &mut W) -> io::Result<()> {
    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} triangles exceed the binary STL limit", mesh.triangle_count()),
        )
    })?;

    writer.write_all(&header_bytes(mesh.name()))?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; STL_TRIANGLE_SIZE];
    for triangle in mesh.triangles() {
        encode_triangle(triangle, &mut record);
        writer.write_all(&record)?;
    }
    writer.flush()
}

fn encode_triangle(triangle: &Triangle, record: &mut [u8; STL_TRIANGLE_SIZE]) {
    let vectors = [
        triangle.normal(),
        triangle.vertices[0],
        triangle.vertices[1],
        triangle.vertices[2],
    ];
    for (slot, vector) in record.chunks_exact_mut(12).zip(vectors) {
        for (bytes, value) in slot.chunks_exact_mut(4).zip(vector.as_vec3().to_array()) {
            bytes.copy_from_slice(&value.to_le_bytes());
        }
    }
    record[48..].copy_from_slice(&STL_ATTRIBUTE_BYTE_COUNT.to_le_bytes());
}

/// Parses binary STL. Stored normals are ignored.
///
/// # Errors
///
/// Returns [`crate::LithophaneError::InvalidStl`] if the data ends before the
/// header or before the announced number of triangles.
pub fn read_binary<R: Read>(mut reader: R) -> LithophaneResult<TriangleMesh> {
    let mut header = [0u8; STL_HEADER_SIZE + STL_COUNT_SIZE];
    reader
        .read_exact(&mut header)
        .map_err(|e| eof_as_invalid(e, || "file too small for a binary STL header".to_string()))?;

    let name = String::from_utf8_lossy(&header[..STL_HEADER_SIZE])
        .trim_end_matches([' ', '\0'])
        .to_string();
    let count = u32::from_le_bytes([
        header[STL_HEADER_SIZE],
        header[STL_HEADER_SIZE + 1],
        header[STL_HEADER_SIZE + 2],
        header[STL_HEADER_SIZE + 3],
    ]);

    let mut mesh = TriangleMesh::new(name);
    let mut record = [0u8; STL_TRIANGLE_SIZE];
    for index in 0..count {
        reader.read_exact(&mut record).map_err(|e| {
            eof_as_invalid(e, || format!("expected {count} triangles, found {index}"))
        })?;
        mesh.add_triangle(Triangle::new(
            read_vector(&record[12..24]),
            read_vector(&record[24..36]),
            read_vector(&record[36..48]),
        ));
    }
    Ok(mesh)
}

fn read_vector(bytes: &[u8]) -> DVec3 {
    let component = |i: usize| {
        let b = &bytes[i * 4..i * 4 + 4];
        f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    };
    DVec3::new(component(0), component(1), component(2))
}
