//! In-place cell editing.
//!
//! The grid does not draw the text input itself. It asks a
//! [`TextInputOverlay`] to appear over the cell, and later reads the edited
//! text back on commit.

use serde::{Deserialize, Serialize};
use trellis_core::logging::targets;
use trellis_render::{Font, Rect};

use crate::model::{CellRef, CellValue, GridModel};
use crate::selection::SelectionMode;

/// Where and how to show the text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRequest {
    /// Client rectangle of the cell being edited.
    pub rect: Rect,
    pub font: Font,
    /// The cell's current value as text.
    pub initial_text: String,
}

/// A host-provided single-line text input shown over a cell.
pub trait TextInputOverlay {
    /// Show the input and fill it with `request.initial_text`.
    fn show(&mut self, request: OverlayRequest);

    /// Remove the input.
    fn hide(&mut self);

    /// The text currently in the input.
    fn text(&self) -> String;

    /// Replace the text in the input.
    fn set_text(&mut self, text: &str);
}

/// An in-memory overlay for hosts without a native text input, and for
/// tests, which drive it through [`TextInputOverlay::set_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineTextOverlay {
    request: Option<OverlayRequest>,
    text: String,
}

impl InlineTextOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.request.is_some()
    }

    /// The request the overlay is currently shown for.
    pub fn request(&self) -> Option<&OverlayRequest> {
        self.request.as_ref()
    }
}

impl TextInputOverlay for InlineTextOverlay {
    fn show(&mut self, request: OverlayRequest) {
        self.text = request.initial_text.clone();
        self.request = Some(request);
    }

    fn hide(&mut self) {
        self.request = None;
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// What happens to an open edit when something else interrupts it
/// (a new selection, a scroll, a resize drag, another edit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditInterrupt {
    /// Discard the edited text.
    #[default]
    Cancel,
    /// Write the edited text back first.
    Commit,
}

/// Everything that decides whether an edit may start.
#[derive(Debug, Clone, Copy)]
pub struct EditGate {
    pub edit_mode: bool,
    pub selection_mode: SelectionMode,
    pub selected: Option<CellRef>,
}

/// At most one open edit.
#[derive(Debug, Default)]
pub struct EditSession {
    editing: Option<CellRef>,
    interrupt: EditInterrupt,
}

impl EditSession {
    pub fn new(interrupt: EditInterrupt) -> Self {
        Self {
            editing: None,
            interrupt,
        }
    }

    pub fn is_active(&self) -> bool {
        self.editing.is_some()
    }

    /// The cell being edited.
    pub fn editing(&self) -> Option<CellRef> {
        self.editing
    }

    pub fn interrupt_policy(&self) -> EditInterrupt {
        self.interrupt
    }

    pub fn set_interrupt_policy(&mut self, interrupt: EditInterrupt) {
        self.interrupt = interrupt;
    }

    /// Open an edit on the selected cell.
    ///
    /// Rejected (returns `false`) when edit mode is off, the selection mode is
    /// not cell selection, no cell is selected, the cell forbids editing, or
    /// `cell_rect` is unknown. An open edit is interrupted first.
    pub fn begin(
        &mut self,
        model: &mut GridModel,
        overlay: &mut dyn TextInputOverlay,
        gate: EditGate,
        cell_rect: Option<Rect>,
    ) -> bool {
        if !gate.edit_mode || gate.selection_mode != SelectionMode::Cell {
            tracing::trace!(target: targets::EDIT, edit_mode = gate.edit_mode, mode = ?gate.selection_mode, "edit rejected");
            return false;
        }
        let Some(target) = gate.selected else {
            tracing::trace!(target: targets::EDIT, "edit rejected: no selected cell");
            return false;
        };
        let (row_height, request_font, initial_text) = match model.cell_by_ref(target) {
            Some(cell) if cell.can_edit() => {
                let row_height = model
                    .object(target.row.into())
                    .map_or(0, |row| row.size());
                let mut font = cell.font().clone();
                font.height = cell.effective_text_height(row_height);
                (row_height, font, cell.text())
            }
            _ => {
                tracing::trace!(target: targets::EDIT, "edit rejected: cell is read-only");
                return false;
            }
        };
        let Some(rect) = cell_rect else {
            tracing::trace!(target: targets::EDIT, "edit rejected: cell is not laid out");
            return false;
        };

        self.interrupt(model, overlay);

        overlay.show(OverlayRequest {
            rect,
            font: request_font,
            initial_text,
        });
        self.editing = Some(target);
        tracing::debug!(target: targets::EDIT, position = ?model.position_of(target), row_height, "edit started");
        true
    }

    /// Write the overlay's text into the cell and close the edit.
    ///
    /// Returns the edited cell, or `None` if no edit was open or the cell was
    /// deleted meanwhile.
    pub fn commit(
        &mut self,
        model: &mut GridModel,
        overlay: &mut dyn TextInputOverlay,
    ) -> Option<CellRef> {
        let target = self.editing.take()?;
        let text = overlay.text();
        overlay.hide();
        let cell = model.cell_by_ref_mut(target)?;
        cell.set_value(CellValue::Text(text));
        tracing::debug!(target: targets::EDIT, "edit committed");
        Some(target)
    }

    /// Close the edit without writing anything.
    pub fn cancel(&mut self, overlay: &mut dyn TextInputOverlay) -> Option<CellRef> {
        let target = self.editing.take()?;
        overlay.hide();
        tracing::debug!(target: targets::EDIT, "edit cancelled");
        Some(target)
    }

    /// Close an open edit following the interrupt policy.
    ///
    /// Returns `true` if the cell value changed.
    pub fn interrupt(&mut self, model: &mut GridModel, overlay: &mut dyn TextInputOverlay) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.interrupt {
            EditInterrupt::Cancel => {
                self.cancel(overlay);
                false
            }
            EditInterrupt::Commit => self.commit(model, overlay).is_some(),
        }
    }
}
