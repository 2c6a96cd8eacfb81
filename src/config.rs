//! Engine configuration.
//!
//! Configuration is an explicit value threaded through the controller
//! constructor. There is no global settings object; whoever builds the
//! controller decides the style and history depth.

use crate::render::Colormap;

/// Granularity of the opacity slider. Values set through
/// [`RenderStyle::set_opacity`] snap to this step.
pub const OPACITY_STEP: f32 = 0.05;

/// Default number of selection snapshots retained for undo/redo.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// How the label-map overlay is tinted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub colormap: Colormap,
    /// Overlay opacity in `[0, 1]`, quantized to [`OPACITY_STEP`].
    opacity: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            colormap: Colormap::Viridis,
            opacity: 0.5,
        }
    }
}

impl RenderStyle {
    pub fn new(colormap: Colormap, opacity: f32) -> Self {
        let mut style = Self {
            colormap,
            opacity: 0.0,
        };
        style.set_opacity(opacity);
        style
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the overlay opacity, clamped to `[0, 1]` and snapped to the
    /// 0.05 slider step.
    pub fn set_opacity(&mut self, opacity: f32) {
        let clamped = opacity.clamp(0.0, 1.0);
        self.opacity = (clamped / OPACITY_STEP).round() * OPACITY_STEP;
    }
}

/// Everything the controller needs to know at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub style: RenderStyle,
    /// Maximum number of retained history snapshots. Must be positive.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            style: RenderStyle::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
