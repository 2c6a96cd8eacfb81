//! Boolean algebra over selection masks.
//!
//! All operations are pure and total over equal-shaped boolean arrays.
//! A shape mismatch can only arise from a broken reset discipline in the
//! controller, so it is treated as a fatal programming error rather than
//! a recoverable condition.

use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2, Zip};

/// `current OR region`: grow the selection by a new region.
pub fn add(current: ArrayView2<bool>, region: ArrayView2<bool>) -> Array2<bool> {
    assert_eq!(
        current.dim(),
        region.dim(),
        "mask shapes disagree: {:?} vs {:?}",
        current.dim(),
        region.dim()
    );
    let mut out = current.to_owned();
    Zip::from(&mut out).and(&region).for_each(|o, &r| *o = *o || r);
    out
}

/// `current AND NOT region`: remove from the current selection any
/// pixel also present in `region`. This is not mask inversion.
pub fn subtract(current: ArrayView2<bool>, region: ArrayView2<bool>) -> Array2<bool> {
    assert_eq!(
        current.dim(),
        region.dim(),
        "mask shapes disagree: {:?} vs {:?}",
        current.dim(),
        region.dim()
    );
    let mut out = current.to_owned();
    Zip::from(&mut out).and(&region).for_each(|o, &r| *o = *o && !r);
    out
}

/// All-false mask of the given `(rows, cols)` shape.
pub fn clear(shape: (usize, usize)) -> Array2<bool> {
    Array2::from_elem(shape, false)
}

/// Fill enclosed holes in the mask.
///
/// Background pixels are flooded 4-connectedly from the full image
/// border; any background pixel the flood never reaches is enclosed by
/// foreground and becomes foreground. Background regions touching the
/// border are left unchanged. Idempotent.
pub fn fill_holes(mask: ArrayView2<bool>) -> Array2<bool> {
    let (height, width) = mask.dim();
    if height == 0 || width == 0 {
        return mask.to_owned();
    }

    let mut outside = Array2::from_elem((height, width), false);
    let mut queue = VecDeque::new();

    // Seed the flood from every background pixel on the perimeter.
    let mut seed = |r: usize, c: usize, outside: &mut Array2<bool>, queue: &mut VecDeque<(usize, usize)>| {
        if !mask[[r, c]] && !outside[[r, c]] {
            outside[[r, c]] = true;
            queue.push_back((r, c));
        }
    };
    for col in 0..width {
        seed(0, col, &mut outside, &mut queue);
        seed(height - 1, col, &mut outside, &mut queue);
    }
    for row in 0..height {
        seed(row, 0, &mut outside, &mut queue);
        seed(row, width - 1, &mut outside, &mut queue);
    }

    while let Some((row, col)) = queue.pop_front() {
        for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
            let nr = row as i64 + dr;
            let nc = col as i64 + dc;
            if nr < 0 || nr >= height as i64 || nc < 0 || nc >= width as i64 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if !mask[[nr, nc]] && !outside[[nr, nc]] {
                outside[[nr, nc]] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    // Foreground stays; background not reached from the border is a hole.
    let mut out = mask.to_owned();
    Zip::from(&mut out).and(&outside).for_each(|o, &reached| {
        *o = *o || !reached;
    });
    out
}
