//! Boundary extraction: selection mask -> renderable vector outline.
//!
//! The mask is padded with a one-pixel background border so regions
//! touching the image edge still close into rings, traced with the
//! marching-squares tracer, and shifted back by the pad offset. The
//! result is a single flat `(x, y)` vertex buffer with a `[NaN, NaN]`
//! sentinel between rings, so one path object can carry any number of
//! disjoint regions and interior holes, plus the tight bounding box over
//! all finite vertices. The outline is a pure rendering artifact,
//! recomputed after every mask mutation and never a source of truth.

use ndarray::{s, Array2, ArrayView2};

use super::marching_squares::trace_rings;

/// Sentinel vertex separating rings in the flat path buffer.
pub const RING_SENTINEL: [f32; 2] = [f32::NAN, f32::NAN];

/// Axis-aligned rectangle in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Ordered vertex rings of the current selection boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryPath {
    points: Vec<[f32; 2]>,
    bounds: Rect,
    ring_count: usize,
}

impl BoundaryPath {
    /// Flat vertex buffer: rings in order, separated by [`RING_SENTINEL`]
    /// entries (no trailing sentinel). Suited to "connect finite" path
    /// builders.
    pub fn points(&self) -> &[[f32; 2]] {
        &self.points
    }

    /// Iterate over the individual rings.
    pub fn rings(&self) -> impl Iterator<Item = &[[f32; 2]]> {
        self.points
            .split(|p| p[0].is_nan())
            .filter(|ring| !ring.is_empty())
    }

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    /// Tight bounding rectangle over all finite vertices; the empty
    /// rectangle when the selection is empty.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.ring_count == 0
    }
}

/// Extract the boundary outline of a selection mask.
///
/// # Arguments
/// * `mask` - Boolean selection mask
///
/// # Returns
/// The ring set and bounding box; empty for an all-background mask.
pub fn extract(mask: ArrayView2<bool>) -> BoundaryPath {
    let (height, width) = mask.dim();

    // Pad with one pixel of background so contours touching the image
    // edge close properly, then undo the offset on every emitted vertex.
    let mut padded = Array2::from_elem((height + 2, width + 2), false);
    if height > 0 && width > 0 {
        padded
            .slice_mut(s![1..height + 1, 1..width + 1])
            .assign(&mask);
    }

    let rings = trace_rings(padded.view());

    let mut points = Vec::new();
    let mut min = [f32::INFINITY, f32::INFINITY];
    let mut max = [f32::NEG_INFINITY, f32::NEG_INFINITY];

    for (i, ring) in rings.iter().enumerate() {
        if i > 0 {
            points.push(RING_SENTINEL);
        }
        for v in ring {
            let p = [v[0] - 1.0, v[1] - 1.0];
            min[0] = min[0].min(p[0]);
            min[1] = min[1].min(p[1]);
            max[0] = max[0].max(p[0]);
            max[1] = max[1].max(p[1]);
            points.push(p);
        }
    }

    let bounds = if rings.is_empty() {
        Rect::default()
    } else {
        Rect {
            x: min[0],
            y: min[1],
            width: max[0] - min[0],
            height: max[1] - min[1],
        }
    };

    BoundaryPath {
        points,
        bounds,
        ring_count: rings.len(),
    }
}
