//! Tile types and the directional compatibility model.
//!
//! Every tile type carries 8 optional sub-edge keys, two per cardinal side.
//! Splitting a side into two keys lets one texture expose two different
//! transition patterns along a single edge, which is what makes
//! diagonal-aware autotiling possible with only 8 scalar keys per tile.

use serde::{Deserialize, Serialize};

/// Reserved id meaning "no material". Never a valid catalog id and never
/// written to a grid cell.
pub const NO_MATERIAL: u32 = 0;

/// One of the 8 sub-edge key slots, two per cardinal side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeSlot {
    W1,
    W2,
    N1,
    N2,
    E1,
    E2,
    S1,
    S2,
}

impl EdgeSlot {
    pub const ALL: [EdgeSlot; 8] = [
        EdgeSlot::W1,
        EdgeSlot::W2,
        EdgeSlot::N1,
        EdgeSlot::N2,
        EdgeSlot::E1,
        EdgeSlot::E2,
        EdgeSlot::S1,
        EdgeSlot::S2,
    ];

    /// The slot this one is tested against on the adjacent tile.
    ///
    /// Each side's two slots swap-and-mirror onto the opposite side:
    /// (W1, E2), (W2, E1), (N1, S2), (N2, S1).
    pub fn mirror(self) -> EdgeSlot {
        match self {
            EdgeSlot::W1 => EdgeSlot::E2,
            EdgeSlot::W2 => EdgeSlot::E1,
            EdgeSlot::N1 => EdgeSlot::S2,
            EdgeSlot::N2 => EdgeSlot::S1,
            EdgeSlot::E1 => EdgeSlot::W2,
            EdgeSlot::E2 => EdgeSlot::W1,
            EdgeSlot::S1 => EdgeSlot::N2,
            EdgeSlot::S2 => EdgeSlot::N1,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One of the 4 cardinal adjacency relations between grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDir {
    West,
    North,
    East,
    South,
}

impl CardinalDir {
    /// Resolution order used by the autotile pass.
    pub const ALL: [CardinalDir; 4] = [
        CardinalDir::West,
        CardinalDir::North,
        CardinalDir::East,
        CardinalDir::South,
    ];

    /// Grid offset of the neighbor on this side. Origin (0,0) is top-left,
    /// so north is -y.
    pub fn offset(self) -> (i32, i32) {
        match self {
            CardinalDir::West => (-1, 0),
            CardinalDir::North => (0, -1),
            CardinalDir::East => (1, 0),
            CardinalDir::South => (0, 1),
        }
    }

    /// The two sub-edge slots on this side.
    pub fn slots(self) -> [EdgeSlot; 2] {
        match self {
            CardinalDir::West => [EdgeSlot::W1, EdgeSlot::W2],
            CardinalDir::North => [EdgeSlot::N1, EdgeSlot::N2],
            CardinalDir::East => [EdgeSlot::E1, EdgeSlot::E2],
            CardinalDir::South => [EdgeSlot::S1, EdgeSlot::S2],
        }
    }

    pub fn opposite(self) -> CardinalDir {
        match self {
            CardinalDir::West => CardinalDir::East,
            CardinalDir::North => CardinalDir::South,
            CardinalDir::East => CardinalDir::West,
            CardinalDir::South => CardinalDir::North,
        }
    }
}

/// One of the 4 diagonal adjacency relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagonalDir {
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

impl DiagonalDir {
    /// Resolution order used by the autotile pass.
    pub const ALL: [DiagonalDir; 4] = [
        DiagonalDir::NorthWest,
        DiagonalDir::NorthEast,
        DiagonalDir::SouthEast,
        DiagonalDir::SouthWest,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            DiagonalDir::NorthWest => (-1, -1),
            DiagonalDir::NorthEast => (1, -1),
            DiagonalDir::SouthEast => (1, 1),
            DiagonalDir::SouthWest => (-1, 1),
        }
    }

    /// The two cardinal cells flanking this diagonal, as (direction from
    /// the diagonal cell toward that flank, flank offset from the center).
    ///
    /// Whenever the diagonal cell is in bounds both flanks are too, since
    /// each flank shares one coordinate with the diagonal and one with the
    /// center.
    pub fn flanking(self) -> [(CardinalDir, (i32, i32)); 2] {
        match self {
            DiagonalDir::NorthWest => [(CardinalDir::East, (0, -1)), (CardinalDir::South, (-1, 0))],
            DiagonalDir::NorthEast => [(CardinalDir::West, (0, -1)), (CardinalDir::South, (1, 0))],
            DiagonalDir::SouthEast => [(CardinalDir::West, (0, 1)), (CardinalDir::North, (1, 0))],
            DiagonalDir::SouthWest => [(CardinalDir::East, (0, 1)), (CardinalDir::North, (-1, 0))],
        }
    }
}

/// A named, textured map-cell category with 8 directional compatibility keys.
///
/// `texture` is an opaque reference for the rendering collaborator and
/// `tags` are used for UI grouping; neither is interpreted by the
/// compatibility model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    pub id: u32,
    pub name: String,
    pub texture: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    edge_keys: [Option<String>; 8],
}

impl TileType {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        texture: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            texture: texture.into(),
            tags,
            edge_keys: Default::default(),
        }
    }

    pub fn edge_key(&self, slot: EdgeSlot) -> Option<&str> {
        self.edge_keys[slot.index()].as_deref()
    }

    pub fn set_edge_key(&mut self, slot: EdgeSlot, key: Option<String>) {
        self.edge_keys[slot.index()] = key;
    }

    /// Assign the same key to all 8 slots.
    pub fn set_all_edge_keys(&mut self, key: &str) {
        for slot in EdgeSlot::ALL {
            self.set_edge_key(slot, Some(key.to_string()));
        }
    }

    /// Builder form of [`set_edge_key`](Self::set_edge_key).
    pub fn with_edge_key(mut self, slot: EdgeSlot, key: &str) -> Self {
        self.set_edge_key(slot, Some(key.to_string()));
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Check whether `b` may sit on `a`'s `dir` side.
///
/// Both slot pairs of the side must hold present and equal keys; an absent
/// key on either tile makes the whole direction incompatible. Pure, no side
/// effects.
pub fn is_compatible(a: &TileType, dir: CardinalDir, b: &TileType) -> bool {
    dir.slots().into_iter().all(|slot| {
        match (a.edge_key(slot), b.edge_key(slot.mirror())) {
            (Some(key_a), Some(key_b)) => key_a == key_b,
            _ => false,
        }
    })
}

/// The subset of `candidates` for which [`is_compatible`]`(a, dir, ·)`
/// holds, preserving iteration order.
pub fn filter_compatible<'a>(
    a: &TileType,
    dir: CardinalDir,
    candidates: impl IntoIterator<Item = &'a TileType>,
) -> Vec<&'a TileType> {
    candidates
        .into_iter()
        .filter(|t| is_compatible(a, dir, t))
        .collect()
}
