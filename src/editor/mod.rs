//! The selection controller: the single owner of mutable mask state.
//!
//! The controller holds the installed label map, the live selection
//! mask, the undo/redo history, and the latest boundary outline. All
//! mutations flow through it on the event thread: a click floods a
//! region and unions it in, fill/clear rewrite the mask, undo/redo
//! restore snapshots. After every mutation the boundary is re-extracted
//! and the registered renderer callback is notified; the rendering
//! layer only ever sees derived, read-only artifacts.
//!
//! While a model prediction is in flight, mutating commands are
//! rejected until the new label map has landed and the mask has been
//! reset to match its shape.

pub mod command;

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use crate::config::{EngineConfig, RenderStyle};
use crate::error::Error;
use crate::history::HistoryStack;
use crate::io::LabelMapProducer;
use crate::render::{colorize_labels, Colormap};
use crate::selection::outline::BoundaryPath;
use crate::selection::{algebra, flood, outline};

pub use command::{Command, CommandSpec, ParamKind, ParamSpec, COMMAND_TABLE};

/// Callback invoked with the fresh outline after every mask mutation.
pub type ChangeListener = Box<dyn FnMut(&BoundaryPath)>;

pub struct SelectionController {
    labels: Option<Array2<i32>>,
    mask: Array2<bool>,
    history: HistoryStack,
    boundary: BoundaryPath,
    style: RenderStyle,
    awaiting_prediction: bool,
    on_change: Option<ChangeListener>,
}

impl SelectionController {
    pub fn new(config: EngineConfig) -> Self {
        let mask = algebra::clear((0, 0));
        let history = HistoryStack::new(mask.clone(), config.history_capacity);
        Self {
            labels: None,
            mask,
            history,
            boundary: BoundaryPath::default(),
            style: config.style,
            awaiting_prediction: false,
            on_change: None,
        }
    }

    /// Register the renderer notification callback.
    pub fn set_on_change(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    // ========================================================================
    // Read-only views for the rendering layer
    // ========================================================================

    pub fn mask(&self) -> ArrayView2<bool> {
        self.mask.view()
    }

    pub fn label_map(&self) -> Option<ArrayView2<i32>> {
        self.labels.as_ref().map(|labels| labels.view())
    }

    pub fn boundary(&self) -> &BoundaryPath {
        &self.boundary
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Tinted RGBA overlay of the current label map, if one is installed.
    pub fn label_overlay(&self) -> Option<Array3<u8>> {
        self.labels
            .as_ref()
            .map(|labels| colorize_labels(labels.view(), &self.style))
    }

    // ========================================================================
    // Prediction cycle
    // ========================================================================

    /// Mark a model prediction as in flight. Mutating commands are
    /// rejected until a label map is installed. Calling this again
    /// before the previous prediction lands simply lets the newest
    /// request win.
    pub fn begin_prediction(&mut self) {
        self.awaiting_prediction = true;
    }

    pub fn prediction_pending(&self) -> bool {
        self.awaiting_prediction
    }

    /// Install a freshly produced label map: the selection resets to
    /// all-false at the new shape and the history restarts from that
    /// single empty state.
    pub fn install_label_map(&mut self, labels: Array2<i32>) {
        let shape = labels.dim();
        self.labels = Some(labels);
        self.awaiting_prediction = false;
        self.mask = algebra::clear(shape);
        self.history.clear(self.mask.clone());
        self.refresh_boundary();
    }

    /// Run one full prediction cycle against a producer.
    ///
    /// An explicit "no objects" result installs an all-zero label map
    /// of the image shape. On producer failure or a shape mismatch the
    /// existing mask, label map, and history are left untouched.
    pub fn run_prediction<P: LabelMapProducer>(
        &mut self,
        producer: &mut P,
        image: ArrayView3<u8>,
    ) -> Result<(), Error> {
        self.begin_prediction();
        let (height, width, _) = image.dim();
        match producer.predict(image) {
            Ok(Some(labels)) => {
                if labels.dim() != (height, width) {
                    self.awaiting_prediction = false;
                    return Err(Error::LabelMapShape {
                        expected: (height, width),
                        got: labels.dim(),
                    });
                }
                self.install_label_map(labels);
                Ok(())
            }
            Ok(None) => {
                self.install_label_map(Array2::zeros((height, width)));
                Ok(())
            }
            Err(err) => {
                self.awaiting_prediction = false;
                Err(err)
            }
        }
    }

    // ========================================================================
    // Mutating commands
    // ========================================================================

    /// Dispatch a command from the statically declared table.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Click { x, y } => self.click(x, y),
            Command::FillHoles => self.fill_holes(),
            Command::ClearSelection => self.clear_selection(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::SetStyle { colormap, opacity } => self.set_style(colormap, opacity),
        }
    }

    /// Grow the selection from the clicked pixel.
    ///
    /// Clicks outside the label map, or before any prediction has
    /// landed, are ignored without touching state.
    pub fn click(&mut self, x: i64, y: i64) {
        if !self.mutation_allowed("click") {
            return;
        }
        let Some(labels) = self.labels.as_ref() else {
            log::debug!("click at ({x}, {y}) before any label map; ignoring");
            return;
        };
        let (height, width) = labels.dim();
        if x < 0 || y < 0 || y as usize >= height || x as usize >= width {
            log::debug!("click at ({x}, {y}) outside {width}x{height} map; ignoring");
            return;
        }

        let region = flood::select(labels.view(), (y as usize, x as usize));
        let merged = algebra::add(self.mask.view(), region.view());
        self.commit(merged, true);
    }

    /// Fill enclosed background holes in the selection.
    pub fn fill_holes(&mut self) {
        if !self.mutation_allowed("fill_holes") {
            return;
        }
        let filled = algebra::fill_holes(self.mask.view());
        self.commit(filled, true);
    }

    /// Reset the selection to empty (the label map stays installed).
    pub fn clear_selection(&mut self) {
        if !self.mutation_allowed("clear_selection") {
            return;
        }
        let cleared = algebra::clear(self.mask.dim());
        self.commit(cleared, true);
    }

    /// Replace the selection wholesale with a caller-provided mask,
    /// recorded in the history like any other edit. The mask must match
    /// the current selection shape.
    pub fn reset_selection(&mut self, mask: Array2<bool>) {
        if !self.mutation_allowed("reset_selection") {
            return;
        }
        assert_eq!(
            mask.dim(),
            self.mask.dim(),
            "replacement mask shape disagrees with the live selection"
        );
        self.commit(mask, true);
    }

    /// Restore the previous snapshot, if any. Restoring never records
    /// a new history entry.
    pub fn undo(&mut self) {
        if !self.mutation_allowed("undo") {
            return;
        }
        if let Some(snapshot) = self.history.undo() {
            let mask = snapshot.clone();
            self.commit(mask, false);
        }
    }

    /// Re-apply the next snapshot, if any.
    pub fn redo(&mut self) {
        if !self.mutation_allowed("redo") {
            return;
        }
        if let Some(snapshot) = self.history.redo() {
            let mask = snapshot.clone();
            self.commit(mask, false);
        }
    }

    /// Change the overlay style. Style is not mask state, so this does
    /// not touch the history.
    pub fn set_style(&mut self, colormap: Colormap, opacity: f32) {
        self.style.colormap = colormap;
        self.style.set_opacity(opacity);
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn mutation_allowed(&self, what: &str) -> bool {
        if self.awaiting_prediction {
            log::warn!("{what} rejected while a prediction is in flight");
            return false;
        }
        true
    }

    /// Install a new mask value, optionally recording it, then rebuild
    /// the outline and notify the renderer.
    fn commit(&mut self, mask: Array2<bool>, remember: bool) {
        self.mask = mask;
        if remember {
            self.history.append(self.mask.clone());
        }
        self.refresh_boundary();
    }

    fn refresh_boundary(&mut self) {
        self.boundary = outline::extract(self.mask.view());
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.boundary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// 10x10 all-zero label map with a 3x3 block of label 1 at 2..=4.
    fn block_labels() -> Array2<i32> {
        let mut labels = Array2::<i32>::zeros((10, 10));
        for row in 2..5 {
            for col in 2..5 {
                labels[[row, col]] = 1;
            }
        }
        labels
    }

    fn controller_with_block() -> SelectionController {
        let mut controller = SelectionController::new(EngineConfig::default());
        controller.install_label_map(block_labels());
        controller
    }

    fn selected(controller: &SelectionController) -> usize {
        controller.mask().iter().filter(|&&v| v).count()
    }

    struct FixedProducer(Result<Option<Array2<i32>>, Error>);

    impl LabelMapProducer for FixedProducer {
        fn predict(&mut self, _image: ArrayView3<u8>) -> Result<Option<Array2<i32>>, Error> {
            match &self.0 {
                Ok(labels) => Ok(labels.clone()),
                Err(_) => Err(Error::Producer("model exploded".into())),
            }
        }
    }

    #[test]
    fn test_click_selects_component() {
        init_logging();
        let mut controller = controller_with_block();

        controller.click(3, 3);
        assert_eq!(selected(&controller), 9);

        controller.click(0, 0);
        assert_eq!(selected(&controller), 100);
    }

    #[test]
    fn test_click_out_of_bounds_is_noop() {
        init_logging();
        let mut controller = controller_with_block();
        let history_len = controller.history().len();

        controller.click(-1, 3);
        controller.click(3, -2);
        controller.click(10, 0);
        controller.click(0, 10);

        assert_eq!(selected(&controller), 0);
        assert_eq!(controller.history().len(), history_len);
        assert!(controller.boundary().is_empty());
    }

    #[test]
    fn test_click_without_label_map_is_noop() {
        init_logging();
        let mut controller = SelectionController::new(EngineConfig::default());
        controller.click(0, 0);
        assert_eq!(controller.mask().dim(), (0, 0));
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        init_logging();
        let mut controller = controller_with_block();

        controller.click(3, 3);
        controller.click(0, 0);
        assert_eq!(selected(&controller), 100);

        controller.undo();
        assert_eq!(selected(&controller), 9);
        controller.undo();
        assert_eq!(selected(&controller), 0);
        // History exhausted: a further undo changes nothing.
        controller.undo();
        assert_eq!(selected(&controller), 0);

        controller.redo();
        assert_eq!(selected(&controller), 9);
        controller.redo();
        assert_eq!(selected(&controller), 100);
        controller.redo();
        assert_eq!(selected(&controller), 100);
    }

    #[test]
    fn test_undo_does_not_append_history() {
        init_logging();
        let mut controller = controller_with_block();
        controller.click(3, 3);
        let len_before = controller.history().len();

        controller.undo();
        controller.redo();
        assert_eq!(controller.history().len(), len_before);
    }

    #[test]
    fn test_edit_after_undo_discards_redo() {
        init_logging();
        let mut controller = controller_with_block();
        controller.click(3, 3);
        controller.click(0, 0);

        controller.undo(); // back to the 9-pixel state
        controller.fill_holes();

        // The 100-pixel state is gone; redo has nothing to restore.
        let after_fill = selected(&controller);
        controller.redo();
        assert_eq!(selected(&controller), after_fill);
    }

    #[test]
    fn test_reset_selection_records_history() {
        init_logging();
        let mut controller = controller_with_block();
        let mut replacement = algebra::clear((10, 10));
        replacement[[7, 7]] = true;

        controller.reset_selection(replacement);
        assert_eq!(selected(&controller), 1);

        controller.undo();
        assert_eq!(selected(&controller), 0);
        controller.redo();
        assert_eq!(selected(&controller), 1);
    }

    #[test]
    fn test_fill_holes_via_controller() {
        init_logging();
        let mut controller = controller_with_block();
        // Select the background: the 3x3 block becomes an enclosed hole.
        controller.click(0, 0);
        assert_eq!(selected(&controller), 91);

        controller.fill_holes();
        assert_eq!(selected(&controller), 100);
    }

    #[test]
    fn test_clear_selection_records_history() {
        init_logging();
        let mut controller = controller_with_block();
        controller.click(3, 3);
        controller.clear_selection();
        assert_eq!(selected(&controller), 0);

        controller.undo();
        assert_eq!(selected(&controller), 9);
    }

    #[test]
    fn test_new_label_map_resets_state() {
        init_logging();
        let mut controller = controller_with_block();
        controller.click(3, 3);
        assert_eq!(selected(&controller), 9);

        controller.install_label_map(Array2::zeros((4, 6)));
        assert_eq!(controller.mask().dim(), (4, 6));
        assert_eq!(selected(&controller), 0);
        assert_eq!(controller.history().len(), 1);
        assert!(controller.boundary().is_empty());
    }

    #[test]
    fn test_commands_rejected_while_prediction_pending() {
        init_logging();
        let mut controller = controller_with_block();
        controller.begin_prediction();

        controller.click(3, 3);
        controller.fill_holes();
        controller.undo();
        assert_eq!(selected(&controller), 0);
        assert_eq!(controller.history().len(), 1);

        // Landing a map re-enables mutation.
        controller.install_label_map(block_labels());
        assert!(!controller.prediction_pending());
        controller.click(3, 3);
        assert_eq!(selected(&controller), 9);
    }

    #[test]
    fn test_run_prediction_no_detections() {
        init_logging();
        let mut controller = SelectionController::new(EngineConfig::default());
        let image = Array3::<u8>::zeros((5, 7, 3));
        let mut producer = FixedProducer(Ok(None));

        controller
            .run_prediction(&mut producer, image.view())
            .expect("no-detections is not an error");

        let labels = controller.label_map().expect("all-zero map installed");
        assert_eq!(labels.dim(), (5, 7));
        assert!(labels.iter().all(|&v| v == 0));

        // The whole frame is one background component.
        controller.click(2, 2);
        assert_eq!(selected(&controller), 35);
    }

    #[test]
    fn test_run_prediction_shape_mismatch_preserves_state() {
        init_logging();
        let mut controller = controller_with_block();
        controller.click(3, 3);

        let image = Array3::<u8>::zeros((8, 8, 3));
        let mut producer = FixedProducer(Ok(Some(Array2::zeros((3, 3)))));
        let result = controller.run_prediction(&mut producer, image.view());

        assert!(matches!(result, Err(Error::LabelMapShape { .. })));
        assert_eq!(selected(&controller), 9, "mask untouched");
        assert_eq!(controller.label_map().unwrap().dim(), (10, 10));
        assert!(!controller.prediction_pending());
    }

    #[test]
    fn test_run_prediction_failure_preserves_state() {
        init_logging();
        let mut controller = controller_with_block();
        controller.click(3, 3);

        let image = Array3::<u8>::zeros((8, 8, 3));
        let mut producer = FixedProducer(Err(Error::Producer("down".into())));
        let result = controller.run_prediction(&mut producer, image.view());

        assert!(result.is_err());
        assert_eq!(selected(&controller), 9);
        assert!(!controller.prediction_pending());
    }

    #[test]
    fn test_change_listener_notified() {
        init_logging();
        let mut controller = controller_with_block();
        let calls = Rc::new(Cell::new(0usize));
        let seen = calls.clone();
        controller.set_on_change(Box::new(move |_boundary| {
            seen.set(seen.get() + 1);
        }));

        controller.click(3, 3); // 1
        controller.undo(); // 2
        controller.redo(); // 3
        controller.click(99, 99); // ignored, no notification
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_boundary_follows_selection() {
        init_logging();
        let mut controller = controller_with_block();
        controller.click(3, 3);

        let bounds = controller.boundary().bounds();
        assert_eq!(controller.boundary().ring_count(), 1);
        assert!((bounds.x - 1.5).abs() < 1e-6);
        assert!((bounds.y - 1.5).abs() < 1e-6);
        assert!((bounds.width - 3.0).abs() < 1e-6);
        assert!((bounds.height - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_apply_dispatches() {
        init_logging();
        let mut controller = controller_with_block();

        controller.apply(Command::Click { x: 3, y: 3 });
        assert_eq!(selected(&controller), 9);
        controller.apply(Command::Undo);
        assert_eq!(selected(&controller), 0);
        controller.apply(Command::SetStyle {
            colormap: Colormap::Magma,
            opacity: 0.8,
        });
        assert_eq!(controller.style().colormap, Colormap::Magma);
        assert!((controller.style().opacity() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_style_change_skips_history() {
        init_logging();
        let mut controller = controller_with_block();
        let len = controller.history().len();
        controller.set_style(Colormap::Inferno, 0.3);
        assert_eq!(controller.history().len(), len);
    }

    #[test]
    fn test_label_overlay_shape() {
        init_logging();
        let controller = controller_with_block();
        let overlay = controller.label_overlay().expect("label map installed");
        assert_eq!(overlay.dim(), (10, 10, 4));

        let empty = SelectionController::new(EngineConfig::default());
        assert!(empty.label_overlay().is_none());
    }
}
