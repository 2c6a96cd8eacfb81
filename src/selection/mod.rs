//! Selection algorithms over label maps and boolean masks.
//!
//! This module holds the pure computational core of the engine:
//! - **Flood selection**: region growing over the label map from a clicked pixel
//! - **Mask algebra**: union, subtraction, hole filling, clearing
//! - **Boundary extraction**: marching squares outline tracing for vector rendering
//!
//! Everything here is a pure function; state lives in the controller.

pub mod algebra;
pub mod flood;
pub mod marching_squares;
pub mod outline;

pub use outline::{extract, BoundaryPath, Rect};
