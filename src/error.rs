//! Error types for the mask editing engine.
//!
//! Only failures at the crate boundary surface as [`Error`]: raster
//! decoding, label-map producers, and shape disagreement between a
//! produced label map and its source image. Ignorable conditions
//! (out-of-bounds clicks, selection before any prediction, empty
//! undo/redo) are handled in place and never become errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A raster source could not be read or decoded.
    #[error("failed to load raster from {path:?}")]
    RasterLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A label map producer returned a map whose spatial dimensions
    /// disagree with the image it was asked to segment.
    #[error("label map shape {got:?} does not match image shape {expected:?}")]
    LabelMapShape {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// The label map producer itself failed.
    #[error("label map producer failed: {0}")]
    Producer(String),
}
