//! Core data structures for tileweave
//!
//! This crate provides the fundamental types for the tile map editor:
//! - `TileType` - A map-cell category with 8 directional compatibility keys
//! - `Catalog` - The ordered, immutable set of tile types for a session
//! - `TileGrid` - A mutable 2D array of tile-type ids
//! - `CellEdit` / `Transaction` / `CommandHistory` - The undoable edit substrate
//! - `MapEvent` / `EventQueue` - The synchronous editor event channel
//!
//! The compatibility model lives next to `TileType`: two tiles may sit side
//! by side only when both sub-edge keys of the touching side are present and
//! equal on each tile.

mod catalog;
mod command;
mod event;
mod grid;
mod tile;

pub use catalog::{catalog_to_json, parse_catalog, Catalog, CatalogError, COMMON_TAG};
pub use command::{CellEdit, CommandHistory, EditorCommand, Transaction};
pub use event::{EventQueue, MapEvent};
pub use grid::TileGrid;
pub use tile::{
    filter_compatible, is_compatible, CardinalDir, DiagonalDir, EdgeSlot, TileType, NO_MATERIAL,
};
