//! Flood-based region selection over a label map.
//!
//! Clicking a pixel selects the maximal 4-connected run of pixels that
//! carry the exact same label value, background (label 0) included.
//! Selection is purely geometric; no label value is special-cased.

use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2};

/// 4-connected neighborhood.
const NEIGHBORS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Select the connected region sharing the seed pixel's label.
///
/// # Arguments
/// * `labels` - Per-pixel integer label map (0 = no detected object)
/// * `seed` - (row, col) of the clicked pixel; must be in bounds
///
/// # Returns
/// Boolean mask of the same shape, true over the selected region.
///
/// Deterministic: identical inputs always produce an identical mask.
/// The caller is responsible for rejecting out-of-range seeds before
/// calling; an out-of-range seed here is a programming error.
pub fn select(labels: ArrayView2<i32>, seed: (usize, usize)) -> Array2<bool> {
    let (height, width) = labels.dim();
    assert!(
        seed.0 < height && seed.1 < width,
        "seed {:?} outside label map of shape {:?}",
        seed,
        (height, width)
    );

    let target = labels[[seed.0, seed.1]];
    let mut mask = Array2::from_elem((height, width), false);

    let mut queue = VecDeque::new();
    queue.push_back(seed);
    mask[[seed.0, seed.1]] = true;

    while let Some((row, col)) = queue.pop_front() {
        for (dr, dc) in NEIGHBORS {
            let nr = row as i64 + dr;
            let nc = col as i64 + dc;
            if nr < 0 || nr >= height as i64 || nc < 0 || nc >= width as i64 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if !mask[[nr, nc]] && labels[[nr, nc]] == target {
                mask[[nr, nc]] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 all-zero label map with a 3x3 block of label 1 at rows/cols 2..=4.
    fn block_labels() -> Array2<i32> {
        let mut labels = Array2::<i32>::zeros((10, 10));
        for row in 2..5 {
            for col in 2..5 {
                labels[[row, col]] = 1;
            }
        }
        labels
    }

    #[test]
    fn test_click_inside_block_selects_block() {
        let labels = block_labels();
        let mask = select(labels.view(), (3, 3));

        let selected = mask.iter().filter(|&&v| v).count();
        assert_eq!(selected, 9);
        for row in 2..5 {
            for col in 2..5 {
                assert!(mask[[row, col]]);
            }
        }
    }

    #[test]
    fn test_click_background_selects_complement() {
        let labels = block_labels();
        let mask = select(labels.view(), (0, 0));

        let selected = mask.iter().filter(|&&v| v).count();
        assert_eq!(selected, 91);
        assert!(!mask[[3, 3]]);
        assert!(mask[[9, 9]]);
    }

    #[test]
    fn test_diagonal_pixels_not_connected() {
        // Two label-1 pixels touching only at a corner.
        let mut labels = Array2::<i32>::zeros((4, 4));
        labels[[1, 1]] = 1;
        labels[[2, 2]] = 1;

        let mask = select(labels.view(), (1, 1));
        assert!(mask[[1, 1]]);
        assert!(!mask[[2, 2]]);
    }

    #[test]
    fn test_deterministic() {
        let labels = block_labels();
        let first = select(labels.view(), (0, 0));
        let second = select(labels.view(), (0, 0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_uniform_map_selects_everything() {
        let labels = Array2::<i32>::from_elem((6, 7), 3);
        let mask = select(labels.view(), (5, 6));
        assert!(mask.iter().all(|&v| v));
    }
}
