//! # Lithophane Builder
//!
//! Runs the generation pipeline for one model:
//!
//! ```text
//! Init → BottomCap → Body → TopCap → Serialize → Done
//! ```
//!
//! Rings are built bottom to top into two reusable [`Layer`] buffers. Each new
//! ring is stitched to the previous one and the buffers are swapped, so memory
//! stays proportional to the image width.

use std::mem;
use std::path::Path;

use config::constants::MODEL_NAME_PREFIX;
use tracing::{debug, info, warn};

use crate::error::LithophaneResult;
use crate::geometry::{ModelGeometry, TrigTable};
use crate::layer::{Layer, LayerBuilder};
use crate::mesh::{Triangle, TriangleMesh, TriangleSink};
use crate::params::{BorderSide, ModelParams};
use crate::sampler::{check_dimensions, check_image_path, BrightnessSampler, ImageSampler};
use crate::stitch::{horizontal_surface, vertical_surface, CapSide};
use crate::stl::{self, StlFormat};
use crate::thickness::ThicknessPolicy;

/// A validated model, ready to be built.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{GridSampler, Lithophane, ModelParams, RoughFace};
///
/// let params = ModelParams {
///     rough_face: RoughFace::Outside,
///     ..ModelParams::without_borders()
/// };
/// let sampler = GridSampler::uniform(4, 2, 0.0);
/// let mesh = Lithophane::new(params, &sampler)?.build();
/// // bottom cap + one wall + top cap
/// assert_eq!(mesh.triangle_count(), 2 * 4 + 4 * 4 + 2 * 4);
/// # Ok::<(), lithophane_mesh::LithophaneError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Lithophane<'a, S: ?Sized> {
    params: ModelParams,
    sampler: &'a S,
    geometry: ModelGeometry,
    trig: TrigTable,
    name: String,
}

impl<'a, S: BrightnessSampler + ?Sized> Lithophane<'a, S> {
    /// Validates `params` against `sampler` and precomputes the geometry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LithophaneError::Validation`] for bad parameters or
    /// an image narrower than three columns or with no rows.
    pub fn new(params: ModelParams, sampler: &'a S) -> LithophaneResult<Self> {
        params.validate()?;
        check_dimensions(sampler)?;

        let geometry = ModelGeometry::new(&params, sampler.width(), sampler.height());
        let trig = TrigTable::new(geometry.width);
        let lithophane = Self {
            params,
            sampler,
            geometry,
            trig,
            name: MODEL_NAME_PREFIX.to_string(),
        };
        lithophane.log_summary();
        Ok(lithophane)
    }

    /// Sets the mesh name written to the STL header.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mesh name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated parameters.
    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Derived geometry.
    pub fn geometry(&self) -> &ModelGeometry {
        &self.geometry
    }

    /// Height of the printed part, borders included.
    pub fn physical_height(&self) -> f64 {
        let mut height = self.geometry.row_height(self.last_body_row());
        if self.params.has_bottom_border() {
            height += self.params.bottom_border.height;
        }
        if self.params.has_top_border() {
            height += self.geometry.pixel_step + self.params.top_border.height;
        }
        height
    }

    /// Number of triangles [`Self::build`] will emit.
    pub fn expected_triangle_count(&self) -> usize {
        let width = self.geometry.width as usize;
        let mut walls = self.last_body_row() as usize;
        if self.params.has_bottom_border() {
            walls += 1;
        }
        if self.params.has_top_border() {
            walls += 2;
        }
        2 * width + 4 * width * walls + 2 * width
    }

    /// Builds the whole model into a new mesh.
    pub fn build(&self) -> TriangleMesh {
        let mut mesh =
            TriangleMesh::with_capacity(self.name.clone(), self.expected_triangle_count());
        self.build_into(&mut mesh);
        mesh
    }

    /// Streams every triangle into `sink`, bottom to top.
    pub fn build_into<K: TriangleSink + ?Sized>(&self, sink: &mut K) {
        let builder = LayerBuilder::new(&self.params, &self.geometry, &self.trig, self.sampler);
        let mut counter = CountingSink::new(sink);
        let width = self.trig.len();
        let mut previous = Layer::with_width(width);
        let mut current = Layer::with_width(width);

        // BottomCap
        let bottom = self.params.bottom_border;
        let vertical_offset = if bottom.is_enabled() {
            builder.fill_border_layer(&mut previous, 0.0, bottom.thickness);
            horizontal_surface(&previous, CapSide::Bottom, &mut counter);
            builder.fill_border_layer(&mut current, bottom.height, bottom.thickness);
            vertical_surface(&previous, &current, &mut counter);
            mem::swap(&mut previous, &mut current);
            bottom.height
        } else {
            builder.fill_lithophane_layer(&mut previous, 0, 0.0);
            horizontal_surface(&previous, CapSide::Bottom, &mut counter);
            0.0
        };
        debug!("Bottom cap done: {} triangles", counter.count);

        // Body
        for row in 1..=self.last_body_row() {
            builder.fill_lithophane_layer(&mut current, row, vertical_offset);
            vertical_surface(&previous, &current, &mut counter);
            mem::swap(&mut previous, &mut current);
        }
        debug!("Body done: {} triangles", counter.count);

        // TopCap
        let top = self.params.top_border;
        if top.is_enabled() {
            let z = previous.z() + self.geometry.pixel_step;
            builder.fill_border_layer(&mut current, z, top.thickness);
            vertical_surface(&previous, &current, &mut counter);
            mem::swap(&mut previous, &mut current);

            builder.fill_border_layer(&mut current, z + top.height, top.thickness);
            vertical_surface(&previous, &current, &mut counter);
            mem::swap(&mut previous, &mut current);
        }
        horizontal_surface(&previous, CapSide::Top, &mut counter);
        debug!("Top cap done: {} triangles", counter.count);
    }

    /// Last image row that gets its own ring.
    ///
    /// A top border supplies the final ring in place of the last image row.
    fn last_body_row(&self) -> u32 {
        if self.params.has_top_border() {
            self.geometry.height.saturating_sub(2)
        } else {
            self.geometry.height - 1
        }
    }

    fn log_summary(&self) {
        info!(
            "Lithophane: diameter={:.2}mm, height={:.2}mm, pixel={:.3}mm, {}x{} px, rough face {}",
            self.params.diameter,
            self.physical_height(),
            self.geometry.pixel_step,
            self.geometry.width,
            self.geometry.height,
            self.params.rough_face
        );

        let policy = ThicknessPolicy::new(&self.params, &self.geometry, self.sampler);
        if policy.bands_overlap() {
            warn!(
                "Transition bands overlap on a {:.2}mm image; the bottom band takes priority",
                self.geometry.total_height
            );
        }
        if self.params.inner_face_collapses() {
            warn!(
                "Walls reach the axis of a {:.2}mm cylinder ({} face); inner face self-intersects",
                self.params.diameter, self.params.rough_face
            );
        }
        for (side, border) in [
            (BorderSide::Bottom, self.params.bottom_border),
            (BorderSide::Top, self.params.top_border),
        ] {
            if border.is_enabled() && border.thickness == 0.0 {
                warn!("{side} border thickness is 0; its rings will produce degenerate triangles");
            }
        }
    }
}

/// Counts triangles on their way to another sink.
struct CountingSink<'s, K: ?Sized> {
    inner: &'s mut K,
    count: usize,
}

impl<'s, K: TriangleSink + ?Sized> CountingSink<'s, K> {
    fn new(inner: &'s mut K) -> Self {
        Self { inner, count: 0 }
    }
}

impl<K: TriangleSink + ?Sized> TriangleSink for CountingSink<'_, K> {
    fn push_triangle(&mut self, triangle: Triangle) {
        self.count += 1;
        self.inner.push_triangle(triangle);
    }
}

/// Outcome of [`generate_file`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Model name written to the STL.
    pub name: String,
    /// Derived geometry.
    pub geometry: ModelGeometry,
    /// Height of the printed part, borders included.
    pub physical_height: f64,
    /// Triangles written.
    pub triangle_count: usize,
    /// Zero-area triangles among them.
    pub degenerate_count: usize,
    /// Size of the output file.
    pub bytes_written: u64,
}

/// Generates a lithophane from an image file and writes it as STL.
///
/// Parameters and the image path are checked before anything is decoded, and
/// the output file is created only once the mesh is complete.
///
/// # Errors
///
/// Returns [`crate::LithophaneError::Validation`] for bad inputs,
/// [`crate::LithophaneError::Image`] if the image cannot be decoded, and
/// [`crate::LithophaneError::Io`] if the output cannot be written.
pub fn generate_file(
    image: impl AsRef<Path>,
    output: impl AsRef<Path>,
    params: ModelParams,
    format: StlFormat,
) -> LithophaneResult<GenerationReport> {
    let (image, output) = (image.as_ref(), output.as_ref());
    check_image_path(image)?;
    params.validate()?;

    let sampler = ImageSampler::open(image)?;
    let file_name = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lithophane =
        Lithophane::new(params, &sampler)?.with_name(format!("{MODEL_NAME_PREFIX} {file_name}"));

    let mesh = lithophane.build();
    let degenerate_count = mesh.degenerate_count();
    if degenerate_count > 0 {
        warn!("{degenerate_count} degenerate triangles written with NaN normals");
    }

    stl::write_file(&mesh, output, format)?;
    let bytes_written = std::fs::metadata(output)?.len();
    info!(
        "Wrote {} triangles ({} bytes) to {}",
        mesh.triangle_count(),
        bytes_written,
        output.display()
    );

    Ok(GenerationReport {
        name: mesh.name().to_string(),
        geometry: *lithophane.geometry(),
        physical_height: lithophane.physical_height(),
        triangle_count: mesh.triangle_count(),
        degenerate_count,
        bytes_written,
    })
}
