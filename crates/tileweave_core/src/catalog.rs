//! The ordered, immutable tile type catalog and its JSON document form.
//!
//! Catalog iteration order is load order. The autotile resolver's "first
//! candidate" rule depends on it, so the order is part of the determinism
//! contract and is never re-sorted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tile::{EdgeSlot, TileType, NO_MATERIAL};

/// Tag marking the tile types shown in the basic palette.
pub const COMMON_TAG: &str = "COMMON";

/// Errors that can occur when building or parsing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no tile types")]
    Empty,
    #[error("duplicate tile type id {0}")]
    DuplicateId(u32),
    #[error("tile type id 0 is reserved for the empty cell")]
    ReservedId,
    #[error("parse error: {0}")]
    Parse(String),
}

/// Immutable, ordered set of tile types, loaded once per configuration.
#[derive(Debug, Clone)]
pub struct Catalog {
    tiles: Vec<TileType>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// Build a catalog from an ordered tile type list.
    ///
    /// Fails on an empty list, a duplicate id, or the reserved id 0; no
    /// partial catalog is produced.
    pub fn new(tiles: Vec<TileType>) -> Result<Self, CatalogError> {
        if tiles.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut by_id = HashMap::with_capacity(tiles.len());
        for (index, tile) in tiles.iter().enumerate() {
            if tile.id == NO_MATERIAL {
                return Err(CatalogError::ReservedId);
            }
            if by_id.insert(tile.id, index).is_some() {
                return Err(CatalogError::DuplicateId(tile.id));
            }
        }
        Ok(Self { tiles, by_id })
    }

    pub fn get(&self, id: u32) -> Option<&TileType> {
        self.by_id.get(&id).map(|&index| &self.tiles[index])
    }

    /// All tile types in load order.
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        // A constructed catalog is never empty, but clippy wants the pair.
        self.tiles.is_empty()
    }

    /// The ids used to fill freshly exposed cells: the catalog's first two
    /// entries, or the first entry twice for a single-tile catalog.
    pub fn default_fill_ids(&self) -> [u32; 2] {
        let first = self.tiles[0].id;
        let second = self.tiles.get(1).map_or(first, |t| t.id);
        [first, second]
    }

    /// Tile types tagged for the basic palette.
    pub fn basic_tile_types(&self) -> Vec<&TileType> {
        self.tiles.iter().filter(|t| t.has_tag(COMMON_TAG)).collect()
    }

    /// Tile types sharing any non-palette tag with `tile`.
    pub fn related_tile_types(&self, tile: &TileType) -> Vec<&TileType> {
        self.tiles
            .iter()
            .filter(|t| {
                tile.tags
                    .iter()
                    .any(|tag| tag != COMMON_TAG && t.has_tag(tag))
            })
            .collect()
    }

    /// Tile types carrying every tag in `tags`. An empty query matches
    /// nothing.
    pub fn tile_types_with_tags(&self, tags: &[String]) -> Vec<&TileType> {
        if tags.is_empty() {
            return Vec::new();
        }
        self.tiles
            .iter()
            .filter(|t| tags.iter().all(|tag| t.has_tag(tag)))
            .collect()
    }
}

/// Serialized form of one tile type, direction keys flattened to the
/// `w1`..`s2` fields. Absent fields mean "no key".
#[derive(Debug, Default, Serialize, Deserialize)]
struct TileTypeDoc {
    id: u32,
    name: String,
    texture: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    w1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    w2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    n1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    n2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    e1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    e2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s2: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDoc {
    tiles: Vec<TileTypeDoc>,
}

impl From<TileTypeDoc> for TileType {
    fn from(doc: TileTypeDoc) -> Self {
        let mut tile = TileType::new(doc.id, doc.name, doc.texture, doc.tags);
        tile.set_edge_key(EdgeSlot::W1, doc.w1);
        tile.set_edge_key(EdgeSlot::W2, doc.w2);
        tile.set_edge_key(EdgeSlot::N1, doc.n1);
        tile.set_edge_key(EdgeSlot::N2, doc.n2);
        tile.set_edge_key(EdgeSlot::E1, doc.e1);
        tile.set_edge_key(EdgeSlot::E2, doc.e2);
        tile.set_edge_key(EdgeSlot::S1, doc.s1);
        tile.set_edge_key(EdgeSlot::S2, doc.s2);
        tile
    }
}

impl From<&TileType> for TileTypeDoc {
    fn from(tile: &TileType) -> Self {
        let key = |slot: EdgeSlot| tile.edge_key(slot).map(str::to_string);
        TileTypeDoc {
            id: tile.id,
            name: tile.name.clone(),
            texture: tile.texture.clone(),
            tags: tile.tags.clone(),
            w1: key(EdgeSlot::W1),
            w2: key(EdgeSlot::W2),
            n1: key(EdgeSlot::N1),
            n2: key(EdgeSlot::N2),
            e1: key(EdgeSlot::E1),
            e2: key(EdgeSlot::E2),
            s1: key(EdgeSlot::S1),
            s2: key(EdgeSlot::S2),
        }
    }
}

/// Parse a catalog from its JSON document (`{"tiles": [...]}`)
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let doc: CatalogDoc =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
    Catalog::new(doc.tiles.into_iter().map(TileType::from).collect())
}

/// Serialize a catalog back to its JSON document.
pub fn catalog_to_json(catalog: &Catalog) -> Result<String, CatalogError> {
    let doc = CatalogDoc {
        tiles: catalog.tiles().iter().map(TileTypeDoc::from).collect(),
    };
    serde_json::to_string_pretty(&doc).map_err(|e| CatalogError::Parse(e.to_string()))
}
