//! The editor event channel.
//!
//! A synchronous, ordered message queue in place of an observer broadcast:
//! model operations push events, the driving collaborator drains them after
//! each interaction. Delivery order is emission order.

/// What changed in the editor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    /// The whole grid was replaced (resize, clear, map load).
    MapReplaced,
    /// A single cell changed value.
    CellChanged { x: u32, y: u32 },
    /// The undo history gained or lost an entry.
    CommandListChanged,
    /// The primary or secondary material selection changed.
    MaterialSelectionChanged,
}

/// FIFO queue of pending [`MapEvent`]s.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<MapEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MapEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first.
    pub fn drain(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
