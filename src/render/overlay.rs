//! Tinted RGBA overlay of the label map.
//!
//! The overlay is what the renderer composites over the photograph:
//! every pixel's label is normalized against the largest label present
//! and mapped through the configured palette; the alpha channel carries
//! the configured opacity. Rows are tinted in parallel.

use ndarray::{Array3, ArrayView2};
use rayon::prelude::*;

use crate::config::RenderStyle;

/// Render the label map as an RGBA overlay.
///
/// # Arguments
/// * `labels` - Per-pixel integer label map
/// * `style` - Palette and opacity to apply
///
/// # Returns
/// RGBA image of shape (height, width, 4), alpha = opacity everywhere.
/// An all-zero label map tints uniformly with the palette floor.
pub fn colorize_labels(labels: ArrayView2<i32>, style: &RenderStyle) -> Array3<u8> {
    let (height, width) = labels.dim();
    if height == 0 || width == 0 {
        return Array3::zeros((height, width, 4));
    }
    let max_label = labels.iter().copied().max().unwrap_or(0).max(0);
    let alpha = (style.opacity() * 255.0).round() as u8;

    let mut buf = vec![0u8; height * width * 4];
    buf.par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(row, chunk)| {
            for col in 0..width {
                let label = labels[[row, col]];
                let t = if max_label > 0 {
                    label.max(0) as f32 / max_label as f32
                } else {
                    0.0
                };
                let [r, g, b] = style.colormap.sample(t);
                let px = &mut chunk[col * 4..col * 4 + 4];
                px[0] = r;
                px[1] = g;
                px[2] = b;
                px[3] = alpha;
            }
        });

    Array3::from_shape_vec((height, width, 4), buf)
        .expect("buffer length matches (height, width, 4)")
}
