//! ASCII STL text.

use std::io::{self, BufRead, Write};

use glam::DVec3;

use super::sanitize_name;
use crate::error::{LithophaneError, LithophaneResult};
use crate::mesh::{Triangle, TriangleMesh};

/// Writes `mesh` as ASCII STL.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_ascii<W: Write + ?Sized>(mesh: &TriangleMesh, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "solid {}", sanitize_name(mesh.name()))?;
    for triangle in mesh.triangles() {
        let n = triangle.normal().as_vec3();
        writeln!(writer, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for vertex in triangle.vertices {
            let v = vertex.as_vec3();
            writeln!(writer, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid")?;
    writer.flush()
}

/// Parses ASCII STL. Stored normals are ignored.
///
/// # Errors
///
/// Returns [`LithophaneError::InvalidStl`] with the offending line number for
/// unknown keywords, malformed numbers, facets without exactly three vertices
/// and a missing `endsolid`.
pub fn read_ascii<R: BufRead>(reader: R) -> LithophaneResult<TriangleMesh> {
    let mut lines = reader.lines().enumerate();

    let name = loop {
        let Some((_, line)) = lines.next() else {
            return Err(LithophaneError::invalid_stl("empty ASCII STL"));
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.strip_prefix("solid") {
            Some(rest) => break rest.trim().to_string(),
            None => return Err(LithophaneError::invalid_stl("ASCII STL must start with \"solid\"")),
        }
    };

    let mut mesh = TriangleMesh::new(name);
    let mut facet: Option<Vec<DVec3>> = None;
    for (index, line) in lines {
        let line = line?;
        let number = index + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None | Some("outer") | Some("endloop") => {}
            Some("facet") => {
                if facet.is_some() {
                    return Err(at_line(number, "facet opened inside another facet"));
                }
                facet = Some(Vec::with_capacity(3));
            }
            Some("vertex") => {
                let Some(vertices) = facet.as_mut() else {
                    return Err(at_line(number, "vertex outside of a facet"));
                };
                vertices.push(parse_vertex(tokens, number)?);
            }
            Some("endfacet") => {
                let Some(vertices) = facet.take() else {
                    return Err(at_line(number, "endfacet without facet"));
                };
                let [v0, v1, v2] = vertices[..] else {
                    return Err(at_line(
                        number,
                        format!("facet has {} vertices, expected 3", vertices.len()),
                    ));
                };
                mesh.add_triangle(Triangle::new(v0, v1, v2));
            }
            Some("endsolid") => return Ok(mesh),
            Some(other) => return Err(at_line(number, format!("unexpected keyword \"{other}\""))),
        }
    }
    Err(LithophaneError::invalid_stl("missing \"endsolid\""))
}

fn parse_vertex<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    number: usize,
) -> LithophaneResult<DVec3> {
    let mut coords = [0.0f64; 3];
    for coord in &mut coords {
        let token = tokens
            .next()
            .ok_or_else(|| at_line(number, "vertex needs three coordinates"))?;
        let value: f32 = token
            .parse()
            .map_err(|_| at_line(number, format!("invalid coordinate \"{token}\"")))?;
        *coord = f64::from(value);
    }
    Ok(DVec3::from_array(coords))
}

fn at_line(number: usize, message: impl AsRef<str>) -> LithophaneError {
    LithophaneError::invalid_stl(format!("line {number}: {}", message.as_ref()))
}
