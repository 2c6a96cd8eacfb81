//! maskedit: Interactive binary-mask editing engine
//!
//! The mask-state core of a desktop image-segmentation annotation tool,
//! with Python bindings via PyO3 for the host UI.
//!
//! A segmentation model labels every pixel of a photograph; the user
//! then builds a selection by clicking labelled regions, composing
//! them with boolean operations, and filling holes, with bounded
//! undo/redo throughout. This crate owns that state machine:
//!
//! - **Flood selection**: a click grows into the 4-connected region
//!   sharing the clicked pixel's label (`selection::flood`)
//! - **Mask algebra**: union, subtraction, hole filling, clearing
//!   (`selection::algebra`)
//! - **Boundary extraction**: marching-squares outline rings plus a
//!   bounding box for vector rendering (`selection::outline`)
//! - **History**: bounded, branch-discarding undo/redo snapshots
//!   (`history`)
//! - **Controller**: the single owner of mutable selection state,
//!   driving all of the above and notifying the renderer (`editor`)
//!
//! ## Data Model
//!
//! | Value | Shape | Type |
//! |-------|-------|------|
//! | Label map | (H, W) | i32, 0 = no detected object |
//! | Selection mask | (H, W) | bool |
//! | RGB raster | (H, W, 3) | u8 |
//! | Overlay | (H, W, 4) | u8 RGBA |
//!
//! The label map is produced wholesale by an external model and
//! replaced atomically; the selection mask always matches its shape.

pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod io;
pub mod render;
pub mod selection;

pub use config::{EngineConfig, RenderStyle};
pub use editor::SelectionController;
pub use error::Error;

// Python bindings (only when the python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::RenderStyle;
    use crate::render::{colorize_labels, Colormap};
    use crate::selection::{algebra, flood, outline};

    /// Select the 4-connected region sharing the label at (row, col).
    #[pyfunction]
    pub fn flood_select<'py>(
        py: Python<'py>,
        labels: PyReadonlyArray2<'py, i32>,
        row: usize,
        col: usize,
    ) -> PyResult<Bound<'py, PyArray2<bool>>> {
        let labels = labels.as_array();
        let (height, width) = labels.dim();
        if row >= height || col >= width {
            return Err(PyValueError::new_err(format!(
                "seed ({row}, {col}) outside label map of shape ({height}, {width})"
            )));
        }
        Ok(flood::select(labels, (row, col)).into_pyarray(py))
    }

    /// Union of two equal-shaped boolean masks.
    #[pyfunction]
    pub fn mask_add<'py>(
        py: Python<'py>,
        current: PyReadonlyArray2<'py, bool>,
        region: PyReadonlyArray2<'py, bool>,
    ) -> PyResult<Bound<'py, PyArray2<bool>>> {
        let (current, region) = (current.as_array(), region.as_array());
        if current.dim() != region.dim() {
            return Err(PyValueError::new_err("mask shapes disagree"));
        }
        Ok(algebra::add(current, region).into_pyarray(py))
    }

    /// Remove the region's pixels from the current mask.
    #[pyfunction]
    pub fn mask_subtract<'py>(
        py: Python<'py>,
        current: PyReadonlyArray2<'py, bool>,
        region: PyReadonlyArray2<'py, bool>,
    ) -> PyResult<Bound<'py, PyArray2<bool>>> {
        let (current, region) = (current.as_array(), region.as_array());
        if current.dim() != region.dim() {
            return Err(PyValueError::new_err("mask shapes disagree"));
        }
        Ok(algebra::subtract(current, region).into_pyarray(py))
    }

    /// Fill background holes not reachable from the image border.
    #[pyfunction]
    pub fn fill_holes<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, bool>,
    ) -> Bound<'py, PyArray2<bool>> {
        algebra::fill_holes(mask.as_array()).into_pyarray(py)
    }

    /// Extract boundary rings of a mask.
    ///
    /// Returns an (N, 2) float array of (x, y) vertices with NaN rows
    /// separating rings, plus the bounding box as (x, y, width, height).
    #[pyfunction]
    pub fn extract_boundary<'py>(
        py: Python<'py>,
        mask: PyReadonlyArray2<'py, bool>,
    ) -> (Bound<'py, PyArray2<f32>>, (f32, f32, f32, f32)) {
        let path = outline::extract(mask.as_array());
        let bounds = path.bounds();

        let points = path.points();
        let mut flat = Vec::with_capacity(points.len() * 2);
        for p in points {
            flat.push(p[0]);
            flat.push(p[1]);
        }
        let coords = ndarray::Array2::from_shape_vec((points.len(), 2), flat)
            .expect("flat buffer has two entries per vertex");

        (
            coords.into_pyarray(py),
            (bounds.x, bounds.y, bounds.width, bounds.height),
        )
    }

    /// Tint a label map with a named colormap and opacity.
    #[pyfunction]
    pub fn label_overlay<'py>(
        py: Python<'py>,
        labels: PyReadonlyArray2<'py, i32>,
        colormap: &str,
        opacity: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let colormap: Colormap = colormap.parse().map_err(PyValueError::new_err)?;
        let style = RenderStyle::new(colormap, opacity);
        Ok(colorize_labels(labels.as_array(), &style).into_pyarray(py))
    }

    /// maskedit extension module
    #[pymodule]
    pub fn maskedit(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(flood_select, m)?)?;
        m.add_function(wrap_pyfunction!(mask_add, m)?)?;
        m.add_function(wrap_pyfunction!(mask_subtract, m)?)?;
        m.add_function(wrap_pyfunction!(fill_holes, m)?)?;
        m.add_function(wrap_pyfunction!(extract_boundary, m)?)?;
        m.add_function(wrap_pyfunction!(label_overlay, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::maskedit;
