//! External collaborators at the engine boundary.
//!
//! The engine neither decodes images nor runs segmentation models; it
//! consumes their results through the two traits here. [`FileSource`]
//! is the stock raster source for local files. Failures surface as
//! [`Error`] values and never touch controller state.

use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3, ArrayView3};

use crate::error::Error;

/// Supplies an RGB raster, e.g. from a local path or a remote reference.
pub trait RasterSource {
    /// Fetch the image as an (height, width, 3) RGB array.
    fn fetch(&self) -> Result<Array3<u8>, Error>;
}

/// Produces a per-pixel integer label map for an RGB raster.
///
/// `Ok(None)` is the explicit "no objects detected" signal; the
/// controller interprets it as an all-zero label map of the image
/// shape. A returned map must match the image's spatial dimensions.
pub trait LabelMapProducer {
    fn predict(&mut self, image: ArrayView3<u8>) -> Result<Option<Array2<i32>>, Error>;
}

/// Raster source reading from the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RasterSource for FileSource {
    fn fetch(&self) -> Result<Array3<u8>, Error> {
        let decoded = image::open(&self.path).map_err(|source| Error::RasterLoad {
            path: self.path.clone(),
            source,
        })?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let data = rgb.into_raw();
        Ok(Array3::from_shape_vec((height as usize, width as usize, 3), data)
            .expect("decoded buffer matches image dimensions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let source = FileSource::new("/definitely/not/a/real/image.png");
        let result = source.fetch();
        assert!(matches!(result, Err(Error::RasterLoad { .. })));
    }

    #[test]
    fn test_error_reports_path() {
        let source = FileSource::new("/nope.png");
        let message = source.fetch().unwrap_err().to_string();
        assert!(message.contains("/nope.png"));
    }
}
