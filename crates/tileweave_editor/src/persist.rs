//! Map and catalog persistence.
//!
//! Both documents are JSON. The map document is
//! `{"width": W, "height": H, "tiles": [[id,...]×H]×W}` with the outer array
//! indexed by X and the inner by Y; the catalog document is the
//! `{"tiles": [...]}` form defined in `tileweave_core`. Parsing is separated
//! from file IO so callers (and tests) can work on strings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tileweave_core::{catalog_to_json, parse_catalog, Catalog, CatalogError, TileGrid};

/// Errors that can occur when loading or saving maps and catalogs.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("map dimensions do not match the tile data")]
    DimensionMismatch,
    #[error("map references tile type id {0}, which is not in the catalog")]
    UnknownTileId(u32),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Serialize, Deserialize)]
struct MapDoc {
    width: u32,
    height: u32,
    tiles: Vec<Vec<u32>>,
}

/// Parse a map document and validate every cell id against `catalog`.
///
/// A cell referencing an id the catalog does not know is a fatal load
/// error naming that id; no partial grid is produced.
pub fn parse_map(json: &str, catalog: &Catalog) -> Result<TileGrid, PersistError> {
    let doc: MapDoc = serde_json::from_str(json).map_err(|e| PersistError::Parse(e.to_string()))?;
    if doc.tiles.len() as u32 != doc.width
        || doc.tiles.iter().any(|col| col.len() as u32 != doc.height)
    {
        return Err(PersistError::DimensionMismatch);
    }
    if let Some(&id) = doc
        .tiles
        .iter()
        .flatten()
        .find(|&&id| catalog.get(id).is_none())
    {
        return Err(PersistError::UnknownTileId(id));
    }
    TileGrid::from_columns(&doc.tiles).ok_or(PersistError::DimensionMismatch)
}

/// Serialize a grid to the map document.
pub fn map_to_json(grid: &TileGrid) -> Result<String, PersistError> {
    let doc = MapDoc {
        width: grid.width(),
        height: grid.height(),
        tiles: grid.to_columns(),
    };
    serde_json::to_string_pretty(&doc).map_err(|e| PersistError::Parse(e.to_string()))
}

/// Load a map from a JSON file.
pub fn load_map_file(path: &Path, catalog: &Catalog) -> Result<TileGrid, PersistError> {
    let content = std::fs::read_to_string(path).map_err(|e| PersistError::Io(e.to_string()))?;

    parse_map(&content, catalog)
}

/// Save a map to a JSON file.
pub fn save_map_file(grid: &TileGrid, path: &Path) -> Result<(), PersistError> {
    let content = map_to_json(grid)?;

    std::fs::write(path, content).map_err(|e| PersistError::Io(e.to_string()))?;

    Ok(())
}

/// Load a catalog from a JSON file.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, PersistError> {
    let content = std::fs::read_to_string(path).map_err(|e| PersistError::Io(e.to_string()))?;

    Ok(parse_catalog(&content)?)
}

/// Save a catalog to a JSON file.
pub fn save_catalog_file(catalog: &Catalog, path: &Path) -> Result<(), PersistError> {
    let content = catalog_to_json(catalog)?;

    std::fs::write(path, content).map_err(|e| PersistError::Io(e.to_string()))?;

    Ok(())
}
