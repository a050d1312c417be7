//! The editor session.
//!
//! [`EditorSession`] is the explicitly constructed context object the UI
//! layer talks to: it owns the catalog, the grid, the undo history, the
//! event queue, the fill rng, and the primary/secondary material selection.
//! Several independent sessions can coexist, and tests construct hermetic
//! ones with [`EditorSession::with_seed`].

use std::mem;
use std::path::Path;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tileweave_autotile::resolve_placement;
use tileweave_core::{
    parse_catalog, Catalog, CellEdit, CommandHistory, EditorCommand, EventQueue, MapEvent,
    TileGrid,
};

use crate::commands::ReplaceGrid;
use crate::persist::{self, PersistError};

pub const DEFAULT_MAP_WIDTH: u32 = 30;
pub const DEFAULT_MAP_HEIGHT: u32 = 20;

/// One open map plus everything needed to edit it.
pub struct EditorSession {
    catalog: Catalog,
    grid: TileGrid,
    history: CommandHistory,
    events: EventQueue,
    rng: SmallRng,
    primary_material: u32,
    secondary_material: u32,
}

impl EditorSession {
    /// Session with a default-size map randomly filled from the catalog's
    /// first two entries.
    pub fn new(catalog: Catalog) -> Self {
        Self::build(catalog, SmallRng::from_entropy())
    }

    /// Session with a deterministic fill rng.
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self::build(catalog, SmallRng::seed_from_u64(seed))
    }

    fn build(catalog: Catalog, mut rng: SmallRng) -> Self {
        let fill = catalog.default_fill_ids();
        let grid = TileGrid::generate(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut rng, &fill);
        Self {
            catalog,
            grid,
            history: CommandHistory::new(),
            events: EventQueue::new(),
            rng,
            primary_material: fill[0],
            secondary_material: fill[1],
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Coordinates must be within `width()`/`height()`.
    pub fn tile_at(&self, x: u32, y: u32) -> u32 {
        self.grid.tile_at(x, y)
    }

    pub fn history_size(&self) -> usize {
        self.history.len()
    }

    /// Undo label of the command that would be undone next.
    pub fn last_command_description(&self) -> Option<&str> {
        self.history.last_description()
    }

    /// Take the events emitted since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        self.events.drain()
    }

    /// Apply `command` and push it onto the history.
    ///
    /// A command whose effects already happened during construction (a
    /// resolver transaction) passes through unchanged, since re-applying a
    /// spent command is a no-op.
    pub fn perform_command(&mut self, mut command: Box<dyn EditorCommand>) {
        command.apply(&mut self.grid, &mut self.events);
        self.history.push(command, &mut self.events);
    }

    /// Pop and undo the most recent command, if any.
    pub fn undo_last_command(&mut self) {
        self.history.undo_last(&mut self.grid, &mut self.events);
    }

    /// Drop the whole history without undoing anything.
    pub fn clear_command_history(&mut self) {
        self.history.clear();
        self.events.push(MapEvent::CommandListChanged);
    }

    /// Set one cell, no propagation. Coordinates must be in bounds.
    pub fn place_tile(&mut self, x: u32, y: u32, id: u32) {
        self.perform_command(Box::new(CellEdit::new(x, y, id)));
    }

    /// Set one cell in smart mode, patching incompatible neighbors.
    ///
    /// An interaction that changes nothing still pushes its (empty)
    /// transaction, occupying a history slot whose undo is a no-op.
    pub fn place_tile_smart(&mut self, x: u32, y: u32, id: u32) {
        let tx = resolve_placement(&self.catalog, &mut self.grid, &mut self.events, x, y, id);
        debug!(
            "smart placement of tile {id} at ({x}, {y}) produced {} edits",
            tx.len()
        );
        self.perform_command(Box::new(tx));
    }

    pub fn primary_material(&self) -> u32 {
        self.primary_material
    }

    pub fn secondary_material(&self) -> u32 {
        self.secondary_material
    }

    pub fn set_primary_material(&mut self, id: u32) {
        if self.catalog.get(id).is_none() {
            warn!("ignoring unknown material id {id}");
            return;
        }
        if self.primary_material != id {
            self.primary_material = id;
            self.events.push(MapEvent::MaterialSelectionChanged);
        }
    }

    pub fn set_secondary_material(&mut self, id: u32) {
        if self.catalog.get(id).is_none() {
            warn!("ignoring unknown material id {id}");
            return;
        }
        if self.secondary_material != id {
            self.secondary_material = id;
            self.events.push(MapEvent::MaterialSelectionChanged);
        }
    }

    /// Exchange the primary and secondary materials.
    pub fn swap_materials(&mut self) {
        mem::swap(&mut self.primary_material, &mut self.secondary_material);
        self.events.push(MapEvent::MaterialSelectionChanged);
    }

    /// Replace the map with a resized copy, as an undoable command.
    ///
    /// The overlapping sub-rectangle is preserved exactly; newly exposed
    /// cells are drawn from the catalog's first two entries.
    pub fn resize_map(&mut self, width: u32, height: u32) {
        let fill = self.catalog.default_fill_ids();
        let next = self.grid.resized(width, height, &mut self.rng, &fill);
        self.perform_command(Box::new(ReplaceGrid::new(next, "Resize Map")));
        info!("resized map to {width}x{height}");
    }

    /// Replace the map with a fresh random fill of the same size, as an
    /// undoable command.
    pub fn clear_map(&mut self) {
        let fill = self.catalog.default_fill_ids();
        let next = TileGrid::generate(self.width(), self.height(), &mut self.rng, &fill);
        self.perform_command(Box::new(ReplaceGrid::new(next, "Clear Map")));
    }

    /// Replace the map from a parsed document string.
    ///
    /// On any error the session is left untouched; on success the history
    /// is cleared wholesale, since its commands no longer apply.
    pub fn load_map_json(&mut self, json: &str) -> Result<(), PersistError> {
        let grid = persist::parse_map(json, &self.catalog)?;
        self.replace_map(grid);
        Ok(())
    }

    /// Replace the map from a JSON file.
    pub fn load_map(&mut self, path: &Path) -> Result<(), PersistError> {
        let grid = persist::load_map_file(path, &self.catalog)?;
        self.replace_map(grid);
        info!("loaded map from {}", path.display());
        Ok(())
    }

    /// Save the current map to a JSON file.
    pub fn save_map(&self, path: &Path) -> Result<(), PersistError> {
        persist::save_map_file(&self.grid, path)?;
        info!("saved map to {}", path.display());
        Ok(())
    }

    /// The current map as a document string.
    pub fn map_json(&self) -> Result<String, PersistError> {
        persist::map_to_json(&self.grid)
    }

    /// Replace the catalog from a parsed document string.
    ///
    /// A new catalog invalidates the map and the selection: the grid is
    /// regenerated at its current size from the new catalog's fill ids,
    /// the materials reset, and the history is cleared.
    pub fn load_catalog_json(&mut self, json: &str) -> Result<(), PersistError> {
        let catalog = parse_catalog(json)?;
        self.install_catalog(catalog);
        Ok(())
    }

    /// Replace the catalog from a JSON file.
    pub fn load_catalog(&mut self, path: &Path) -> Result<(), PersistError> {
        let catalog = persist::load_catalog_file(path)?;
        self.install_catalog(catalog);
        info!("loaded catalog from {}", path.display());
        Ok(())
    }

    fn replace_map(&mut self, grid: TileGrid) {
        self.grid = grid;
        self.history.clear();
        self.events.push(MapEvent::MapReplaced);
    }

    fn install_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        let fill = self.catalog.default_fill_ids();
        self.primary_material = fill[0];
        self.secondary_material = fill[1];
        let grid = TileGrid::generate(self.width(), self.height(), &mut self.rng, &fill);
        self.events.push(MapEvent::MaterialSelectionChanged);
        self.replace_map(grid);
    }
}
