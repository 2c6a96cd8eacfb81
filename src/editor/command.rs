//! Statically declared command surface.
//!
//! Every user-triggerable operation is listed once in [`COMMAND_TABLE`]
//! with its parameter schema; the UI builds its controls from the table
//! and dispatches through [`Command`]. Nothing is discovered by runtime
//! introspection.

use crate::config::OPACITY_STEP;
use crate::render::Colormap;

/// A user action routed through the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Grow the selection from the clicked pixel (image coordinates).
    Click { x: i64, y: i64 },
    /// Fill enclosed background holes in the selection.
    FillHoles,
    /// Reset the selection to empty.
    ClearSelection,
    /// Step back one history snapshot.
    Undo,
    /// Step forward one history snapshot.
    Redo,
    /// Change the overlay palette and opacity.
    SetStyle { colormap: Colormap, opacity: f32 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click { .. } => "click",
            Self::FillHoles => "fill_holes",
            Self::ClearSelection => "clear_selection",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::SetStyle { .. } => "set_style",
        }
    }

    /// Table entry describing this command.
    pub fn spec(&self) -> &'static CommandSpec {
        let name = self.name();
        COMMAND_TABLE
            .iter()
            .find(|spec| spec.name == name)
            .expect("every command variant is declared in COMMAND_TABLE")
    }
}

/// Parameter schema for one command argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// Integer pixel coordinate.
    Int,
    /// Bounded float with a fixed step.
    Slider { min: f32, max: f32, step: f32 },
    /// One of an enumerated set of names.
    Choice { values: &'static [&'static str] },
}

/// One entry of the command table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
}

/// The complete command surface, declared once.
pub const COMMAND_TABLE: &[CommandSpec] = &[
    CommandSpec {
        name: "click",
        params: &[
            ParamSpec {
                name: "x",
                kind: ParamKind::Int,
            },
            ParamSpec {
                name: "y",
                kind: ParamKind::Int,
            },
        ],
    },
    CommandSpec {
        name: "fill_holes",
        params: &[],
    },
    CommandSpec {
        name: "clear_selection",
        params: &[],
    },
    CommandSpec {
        name: "undo",
        params: &[],
    },
    CommandSpec {
        name: "redo",
        params: &[],
    },
    CommandSpec {
        name: "set_style",
        params: &[
            ParamSpec {
                name: "colormap",
                kind: ParamKind::Choice {
                    values: &Colormap::NAMES,
                },
            },
            ParamSpec {
                name: "opacity",
                kind: ParamKind::Slider {
                    min: 0.0,
                    max: 1.0,
                    step: OPACITY_STEP,
                },
            },
        ],
    },
];
