//! Whole-grid commands.
//!
//! Resize, clear, and anything else that swaps the entire map goes through
//! [`ReplaceGrid`]: the grid is never resized in place, a replacement is
//! built up front and swapped in, and undo swaps the old grid back.

use std::mem;

use tileweave_core::{EditorCommand, EventQueue, MapEvent, TileGrid};

/// Swap the whole grid for a prepared replacement.
pub struct ReplaceGrid {
    next: Option<TileGrid>,
    prev: Option<TileGrid>,
    description: String,
}

impl ReplaceGrid {
    pub fn new(next: TileGrid, description: impl Into<String>) -> Self {
        Self {
            next: Some(next),
            prev: None,
            description: description.into(),
        }
    }
}

impl EditorCommand for ReplaceGrid {
    fn apply(&mut self, grid: &mut TileGrid, events: &mut EventQueue) {
        if let Some(next) = self.next.take() {
            self.prev = Some(mem::replace(grid, next));
            events.push(MapEvent::MapReplaced);
        }
    }

    fn undo(&mut self, grid: &mut TileGrid, events: &mut EventQueue) {
        if let Some(prev) = self.prev.take() {
            *grid = prev;
            events.push(MapEvent::MapReplaced);
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
