//! Rendering artifacts consumed by the display layer.
//!
//! The engine never draws; it hands the renderer two read-only views:
//! the tinted RGBA overlay of the label map produced here, and the
//! vector outline produced by `selection::outline`.

pub mod colormap;
pub mod overlay;

pub use colormap::Colormap;
pub use overlay::colorize_labels;
