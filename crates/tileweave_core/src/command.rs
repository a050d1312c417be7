//! Command pattern for undoable edits.
//!
//! Commands here are strictly one-shot: a [`CellEdit`] may be applied once
//! and undone once, and a [`Transaction`] drains its children on undo. There
//! is no redo; re-application of a spent command is ignored.

use crate::event::{EventQueue, MapEvent};
use crate::grid::TileGrid;
use crate::tile::NO_MATERIAL;

/// An undoable top-level editor command.
pub trait EditorCommand: Send + Sync {
    /// Apply the command's effects.
    fn apply(&mut self, grid: &mut TileGrid, events: &mut EventQueue);
    /// Reverse the command's effects.
    fn undo(&mut self, grid: &mut TileGrid, events: &mut EventQueue);
    /// Human-readable undo label.
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditState {
    Fresh,
    Applied,
    Undone,
}

/// A single-cell edit with symmetric apply/undo.
///
/// The cell's prior id is captured on first application only. Writing the
/// sentinel id 0 is a no-op in both directions.
#[derive(Debug, Clone)]
pub struct CellEdit {
    x: u32,
    y: u32,
    new_id: u32,
    old_id: u32,
    state: EditState,
}

impl CellEdit {
    pub fn new(x: u32, y: u32, new_id: u32) -> Self {
        Self {
            x,
            y,
            new_id,
            old_id: NO_MATERIAL,
            state: EditState::Fresh,
        }
    }

    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn new_id(&self) -> u32 {
        self.new_id
    }

    /// The id the cell held before this edit; meaningful once applied.
    pub fn old_id(&self) -> u32 {
        self.old_id
    }
}

impl EditorCommand for CellEdit {
    fn apply(&mut self, grid: &mut TileGrid, events: &mut EventQueue) {
        if self.state != EditState::Fresh {
            return;
        }
        self.state = EditState::Applied;
        self.old_id = grid.tile_at(self.x, self.y);
        if self.new_id != NO_MATERIAL {
            grid.set_tile(self.x, self.y, self.new_id);
            events.push(MapEvent::CellChanged {
                x: self.x,
                y: self.y,
            });
        }
    }

    fn undo(&mut self, grid: &mut TileGrid, events: &mut EventQueue) {
        if self.state != EditState::Applied {
            return;
        }
        self.state = EditState::Undone;
        if self.old_id != NO_MATERIAL {
            grid.set_tile(self.x, self.y, self.old_id);
            events.push(MapEvent::CellChanged {
                x: self.x,
                y: self.y,
            });
        }
    }

    fn description(&self) -> &str {
        "Set Tile"
    }
}

/// An ordered group of cell edits applied incrementally and undone as a
/// unit.
///
/// Children execute the moment they are added, so a builder can read the
/// grid between edits — the autotile pass depends on this. Undo walks the
/// children last-to-first and removes them, making the transaction
/// single-use.
#[derive(Debug)]
pub struct Transaction {
    children: Vec<CellEdit>,
    added: usize,
    description: String,
}

impl Transaction {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            children: Vec::new(),
            added: 0,
            description: description.into(),
        }
    }

    /// Append `edit` and apply it immediately.
    pub fn add_edit(&mut self, mut edit: CellEdit, grid: &mut TileGrid, events: &mut EventQueue) {
        edit.apply(grid, events);
        self.children.push(edit);
        self.added += 1;
    }

    /// True iff no edit was ever added. An undone (drained) transaction does
    /// not retroactively report empty.
    pub fn is_empty(&self) -> bool {
        self.added == 0
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// The child edits in application order.
    pub fn edits(&self) -> &[CellEdit] {
        &self.children
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new("Edit")
    }
}

impl EditorCommand for Transaction {
    fn apply(&mut self, _grid: &mut TileGrid, _events: &mut EventQueue) {
        // All effects already happened in add_edit.
    }

    fn undo(&mut self, grid: &mut TileGrid, events: &mut EventQueue) {
        while let Some(mut edit) = self.children.pop() {
            edit.undo(grid, events);
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// LIFO stack of applied top-level commands.
#[derive(Default)]
pub struct CommandHistory {
    stack: Vec<Box<dyn EditorCommand>>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an already-applied command onto the stack.
    pub fn push(&mut self, command: Box<dyn EditorCommand>, events: &mut EventQueue) {
        self.stack.push(command);
        events.push(MapEvent::CommandListChanged);
    }

    /// Pop and undo the most recent command, if any.
    pub fn undo_last(&mut self, grid: &mut TileGrid, events: &mut EventQueue) {
        if let Some(mut command) = self.stack.pop() {
            command.undo(grid, events);
            events.push(MapEvent::CommandListChanged);
        }
    }

    /// Drop every entry without undoing any. Used on map or configuration
    /// reload, where the prior commands no longer apply to the new state.
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Undo label of the command that would be undone next.
    pub fn last_description(&self) -> Option<&str> {
        self.stack.last().map(|c| c.description())
    }
}
