//! # Brightness Samplers
//!
//! Sources of the brightness field that drives wall thickness.
//!
//! Row 0 is always the bottom of the physical model. Samplers backed by
//! images flip the vertical axis so the picture is upright on the cylinder.

use std::path::Path;

use config::constants::MIN_RING_WIDTH;
use image::{DynamicImage, RgbImage};

use crate::error::{LithophaneResult, ValidationError};

/// A 2D brightness field in `[0, 1]`, where 0 is darkest.
pub trait BrightnessSampler {
    /// Number of columns; becomes the number of points per ring.
    fn width(&self) -> u32;

    /// Number of rows.
    fn height(&self) -> u32;

    /// Brightness at `(col, row)`, with row 0 at the bottom of the model.
    fn brightness(&self, col: u32, row: u32) -> f32;
}

impl<S: BrightnessSampler + ?Sized> BrightnessSampler for &S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn brightness(&self, col: u32, row: u32) -> f32 {
        (**self).brightness(col, row)
    }
}

/// Checks that a sampler can form closed rings.
pub(crate) fn check_dimensions<S: BrightnessSampler + ?Sized>(
    sampler: &S,
) -> Result<(), ValidationError> {
    let (width, height) = (sampler.width(), sampler.height());
    if width < MIN_RING_WIDTH || height == 0 {
        return Err(ValidationError::ImageTooSmall {
            width,
            height,
            min_width: MIN_RING_WIDTH,
        });
    }
    Ok(())
}

/// In-memory brightness grid, stored row-major with row 0 at the bottom.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::{BrightnessSampler, GridSampler};
///
/// let grid = GridSampler::from_fn(4, 2, |col, _row| if col % 2 == 0 { 0.0 } else { 1.0 });
/// assert_eq!(grid.brightness(1, 0), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridSampler {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl GridSampler {
    /// Creates a grid from `width * height` row-major samples.
    ///
    /// Samples are clamped into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SampleCountMismatch`] when the sample count
    /// does not match the dimensions.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self, ValidationError> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(ValidationError::SampleCountMismatch {
                width,
                height,
                expected,
                got: values.len(),
            });
        }
        let values = values.into_iter().map(|v| v.clamp(0.0, 1.0)).collect();
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Creates a grid with the same brightness everywhere.
    pub fn uniform(width: u32, height: u32, brightness: f32) -> Self {
        Self {
            width,
            height,
            values: vec![brightness.clamp(0.0, 1.0); width as usize * height as usize],
        }
    }

    /// Creates a grid by evaluating `f(col, row)` for every cell.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> f32) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                values.push(f(col, row).clamp(0.0, 1.0));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }
}

impl BrightnessSampler for GridSampler {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn brightness(&self, col: u32, row: u32) -> f32 {
        self.values[row as usize * self.width as usize + col as usize]
    }
}

/// Brightness sampled from a decoded image.
///
/// Brightness is the HSB "B" channel, `max(r, g, b) / 255`. Alpha is ignored.
#[derive(Debug, Clone)]
pub struct ImageSampler {
    image: RgbImage,
}

impl ImageSampler {
    /// Opens and decodes an image file.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ImageNotFound`] / [`ValidationError::ImageNotAFile`]
    ///   before any decoding is attempted
    /// - [`crate::LithophaneError::Image`] when decoding fails
    pub fn open(path: impl AsRef<Path>) -> LithophaneResult<Self> {
        let path = path.as_ref();
        check_image_path(path)?;
        let image = image::open(path)?;
        Ok(Self::from_dynamic(image))
    }

    /// Wraps an already decoded image.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: image.into_rgb8(),
        }
    }

    /// Wraps an RGB image.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }
}

impl BrightnessSampler for ImageSampler {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn brightness(&self, col: u32, row: u32) -> f32 {
        let y = self.image.height() - 1 - row;
        let [r, g, b] = self.image.get_pixel(col, y).0;
        f32::from(r.max(g).max(b)) / 255.0
    }
}

/// Checks that `path` names an existing regular file.
///
/// # Errors
///
/// Returns [`ValidationError::ImageNotFound`] or
/// [`ValidationError::ImageNotAFile`].
pub fn check_image_path(path: &Path) -> Result<(), ValidationError> {
    if !path.exists() {
        return Err(ValidationError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ValidationError::ImageNotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;
    use tempfile::tempdir;

    #[test]
    fn test_grid_rejects_wrong_sample_count() {
        let err = GridSampler::new(3, 2, vec![0.5; 5]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SampleCountMismatch {
                width: 3,
                height: 2,
                expected: 6,
                got: 5,
            }
        );
    }

    #[test]
    fn test_grid_is_row_major_bottom_up() {
        let grid = GridSampler::new(2, 2, vec![0.0, 0.25, 0.5, 0.75]).unwrap();
        assert_eq!(grid.brightness(0, 0), 0.0);
        assert_eq!(grid.brightness(1, 0), 0.25);
        assert_eq!(grid.brightness(0, 1), 0.5);
        assert_eq!(grid.brightness(1, 1), 0.75);
    }

    #[test]
    fn test_grid_clamps_samples() {
        let grid = GridSampler::new(1, 2, vec![-1.0, 2.0]).unwrap();
        assert_eq!(grid.brightness(0, 0), 0.0);
        assert_eq!(grid.brightness(0, 1), 1.0);
    }

    #[test]
    fn test_image_uses_hsb_brightness() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(2, 0, Rgb([51, 102, 0]));
        let sampler = ImageSampler::from_rgb(img);
        assert_eq!(sampler.brightness(0, 0), 0.0);
        assert_eq!(sampler.brightness(1, 0), 1.0);
        assert_relative_eq!(sampler.brightness(2, 0), 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_image_rows_are_flipped() {
        // Top pixel row of the picture is white, bottom row black.
        let mut img = RgbImage::new(3, 2);
        for x in 0..3 {
            img.put_pixel(x, 0, Rgb([255, 255, 255]));
            img.put_pixel(x, 1, Rgb([0, 0, 0]));
        }
        let sampler = ImageSampler::from_rgb(img);
        assert_eq!(sampler.brightness(0, 0), 0.0);
        assert_eq!(sampler.brightness(0, 1), 1.0);
    }

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(&GridSampler::uniform(3, 1, 0.0)).is_ok());
        assert_eq!(
            check_dimensions(&GridSampler::uniform(2, 5, 0.0)),
            Err(ValidationError::ImageTooSmall {
                width: 2,
                height: 5,
                min_width: 3,
            })
        );
        assert!(check_dimensions(&GridSampler::uniform(8, 0, 0.0)).is_err());
    }

    #[test]
    fn test_open_missing_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let err = ImageSampler::open(&path).unwrap_err();
        assert!(matches!(
            err,
            crate::LithophaneError::Validation(ValidationError::ImageNotFound { .. })
        ));
    }

    #[test]
    fn test_open_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let err = ImageSampler::open(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            crate::LithophaneError::Validation(ValidationError::ImageNotAFile { .. })
        ));
    }

    #[test]
    fn test_open_undecodable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        let err = ImageSampler::open(&path).unwrap_err();
        assert!(matches!(err, crate::LithophaneError::Image(_)));
    }

    #[test]
    fn test_open_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let img = RgbImage::from_pixel(4, 3, Rgb([128, 128, 128]));
        img.save(&path).unwrap();

        let sampler = ImageSampler::open(&path).unwrap();
        assert_eq!(sampler.width(), 4);
        assert_eq!(sampler.height(), 3);
        assert_relative_eq!(sampler.brightness(3, 2), 128.0 / 255.0, epsilon = 1e-6);
    }
}
