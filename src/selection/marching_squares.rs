//! Marching-squares tracing of foreground/background iso-contours.
//!
//! Each 2x2 cell of the mask is classified by which of its corner pixels
//! are foreground, and the matching boundary chord(s) are emitted as
//! *directed* segments that keep foreground on the left of the travel
//! direction. With a consistent orientation, every crossing edge has
//! exactly one incoming and one outgoing chord, so chords chain into
//! closed rings by exact endpoint lookup; no epsilon matching is needed.
//! Outer rings and hole rings wind in opposite directions as a
//! consequence, which is what a path renderer needs to punch holes.
//!
//! Chord endpoints sit at edge midpoints, so every coordinate is a
//! multiple of one half. Endpoints are keyed by their doubled (and thus
//! integral) coordinates.

use std::collections::BTreeMap;

use ndarray::ArrayView2;

/// Endpoint key in doubled coordinates: `(2x, 2y)`.
type Key = (i64, i64);

/// Trace all boundary rings of a boolean mask.
///
/// Returns each closed ring as an ordered `(x, y)` vertex list, where
/// `x` is the column and `y` the row. Vertices lie on half-integer
/// coordinates between pixel centers. Rings are emitted in a
/// deterministic order (lexicographic by their smallest vertex key).
///
/// Contours touching the array edge are truncated against it; callers
/// that need every region closed should pad the mask with a background
/// border first (see [`super::outline::extract`]).
pub fn trace_rings(mask: ArrayView2<bool>) -> Vec<Vec<[f32; 2]>> {
    let (height, width) = mask.dim();
    if height < 2 || width < 2 {
        return Vec::new();
    }

    // Directed chords: start key -> end key.
    let mut chords: BTreeMap<Key, Key> = BTreeMap::new();

    for y in 0..height - 1 {
        for x in 0..width - 1 {
            let tl = mask[[y, x]] as u8;
            let tr = mask[[y, x + 1]] as u8;
            let br = mask[[y + 1, x + 1]] as u8;
            let bl = mask[[y + 1, x]] as u8;
            let case = tl | tr << 1 | br << 2 | bl << 3;

            if case == 0 || case == 15 {
                continue;
            }

            // Midpoints of the four cell edges, in doubled coordinates.
            let (x2, y2) = (2 * x as i64, 2 * y as i64);
            let top = (x2 + 1, y2);
            let right = (x2 + 2, y2 + 1);
            let bottom = (x2 + 1, y2 + 2);
            let left = (x2, y2 + 1);

            // Foreground stays on the left of each directed chord.
            // Saddle cells (5, 10) split into two chords, keeping
            // diagonal foreground pairs disconnected to match the
            // 4-connectivity used everywhere else in the engine.
            match case {
                1 => {
                    chords.insert(left, top);
                }
                2 => {
                    chords.insert(top, right);
                }
                3 => {
                    chords.insert(left, right);
                }
                4 => {
                    chords.insert(right, bottom);
                }
                5 => {
                    chords.insert(left, top);
                    chords.insert(right, bottom);
                }
                6 => {
                    chords.insert(top, bottom);
                }
                7 => {
                    chords.insert(left, bottom);
                }
                8 => {
                    chords.insert(bottom, left);
                }
                9 => {
                    chords.insert(bottom, top);
                }
                10 => {
                    chords.insert(top, right);
                    chords.insert(bottom, left);
                }
                11 => {
                    chords.insert(bottom, right);
                }
                12 => {
                    chords.insert(right, left);
                }
                13 => {
                    chords.insert(right, top);
                }
                14 => {
                    chords.insert(top, left);
                }
                _ => unreachable!("cell case is a 4-bit index"),
            }
        }
    }

    // Chain chords into closed rings, starting each ring at the smallest
    // unused key so output order is stable.
    let mut rings = Vec::new();
    while let Some((&start, _)) = chords.first_key_value() {
        let mut ring = Vec::new();
        let mut cursor = start;
        while let Some(next) = chords.remove(&cursor) {
            ring.push([cursor.0 as f32 / 2.0, cursor.1 as f32 / 2.0]);
            cursor = next;
            if cursor == start {
                break;
            }
        }
        rings.push(ring);
    }

    rings
}

/// Twice the signed area of a ring; the sign carries the winding
/// direction (positive = clockwise in image coordinates with y down).
pub fn signed_area_doubled(ring: &[[f32; 2]]) -> f32 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        sum += a[0] * b[1] - b[0] * a[1];
    }
    sum
}
