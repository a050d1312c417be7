//! Editor session for tileweave
//!
//! This crate supplies everything around the core model that an editor UI
//! needs: the [`EditorSession`] context object, whole-grid commands for
//! resize and clear, and JSON persistence for maps and catalogs.
//!
//! # Example
//!
//! ```rust,ignore
//! use tileweave_core::parse_catalog;
//! use tileweave_editor::EditorSession;
//!
//! let catalog = parse_catalog(&std::fs::read_to_string("tiles.json")?)?;
//! let mut session = EditorSession::new(catalog);
//!
//! session.place_tile_smart(4, 2, session.primary_material());
//! session.undo_last_command();
//! ```

mod commands;
mod persist;
mod session;

pub use commands::ReplaceGrid;
pub use persist::{
    load_catalog_file, load_map_file, map_to_json, parse_map, save_catalog_file, save_map_file,
    PersistError,
};
pub use session::{EditorSession, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
