//! The autotile propagation pass.
//!
//! One placement resolves in a fixed order: center, then the cardinal
//! neighbors west, north, east, south, then the diagonals NW, NE, SE, SW.
//! Candidate choice is always "first in catalog order", which makes the
//! output reproducible. The pass never fails: a slot with no satisfiable
//! candidate is left alone and the sweep continues.

use tileweave_core::{
    filter_compatible, is_compatible, CardinalDir, Catalog, CellEdit, DiagonalDir, EventQueue,
    TileGrid, TileType, Transaction,
};

/// Place `tile_id` at `(x, y)` and patch incompatible neighbors.
///
/// Cardinal neighbors that no longer fit the new center are replaced by the
/// first catalog entry that continues their current material — restricted,
/// when a cell exists two steps out in the same direction, to entries that
/// also sit against it (continuity across three cells). Diagonal neighbors
/// are then patched to agree with both flanking cardinals at once.
///
/// The returned transaction's edits are already applied to `grid` (children
/// apply as they are added, so later steps observe earlier repairs). A step
/// that would not change a cell's value contributes no child; resolving an
/// id already in place on a fully consistent cell therefore yields an empty
/// transaction.
pub fn resolve_placement(
    catalog: &Catalog,
    grid: &mut TileGrid,
    events: &mut EventQueue,
    x: u32,
    y: u32,
    tile_id: u32,
) -> Transaction {
    let mut tx = Transaction::new("Autotile");
    let Some(center) = catalog.get(tile_id) else {
        return tx;
    };
    if grid.tile_at(x, y) != tile_id {
        tx.add_edit(CellEdit::new(x, y, tile_id), grid, events);
    }
    let (cx, cy) = (x as i32, y as i32);

    for dir in CardinalDir::ALL {
        let (dx, dy) = dir.offset();
        let (nx, ny) = (cx + dx, cy + dy);
        let Some(occupant_id) = grid.get(nx, ny) else {
            continue;
        };
        let Some(occupant) = catalog.get(occupant_id) else {
            continue;
        };
        if is_compatible(center, dir, occupant) {
            continue;
        }
        // Entries whose `dir`-facing side continues the neighbor's current
        // material (equivalently: tiles the occupant accepts on its side
        // toward the center).
        let mut candidates = filter_compatible(occupant, dir.opposite(), catalog.tiles());
        if let Some(second) = grid
            .get(cx + 2 * dx, cy + 2 * dy)
            .and_then(|id| catalog.get(id))
        {
            candidates.retain(|t| is_compatible(t, dir, second));
        }
        if let Some(replacement) = candidates.first() {
            if replacement.id != occupant_id {
                tx.add_edit(CellEdit::new(nx as u32, ny as u32, replacement.id), grid, events);
            }
        }
    }

    for diag in DiagonalDir::ALL {
        let (dx, dy) = diag.offset();
        let (nx, ny) = (cx + dx, cy + dy);
        let Some(occupant_id) = grid.get(nx, ny) else {
            continue;
        };
        // Entries that agree with both flanking cardinal cells as they
        // stand after the cardinal sweep.
        let mut fits: Vec<&TileType> = catalog.tiles().iter().collect();
        for (check_dir, (ox, oy)) in diag.flanking() {
            match grid.get(cx + ox, cy + oy).and_then(|id| catalog.get(id)) {
                Some(flank) => fits.retain(|t| is_compatible(t, check_dir, flank)),
                None => fits.clear(),
            }
        }
        if fits.is_empty() || fits.iter().any(|t| t.id == occupant_id) {
            continue;
        }
        tx.add_edit(CellEdit::new(nx as u32, ny as u32, fits[0].id), grid, events);
    }

    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileweave_core::{EditorCommand, EdgeSlot};

    fn bare(id: u32, name: &str) -> TileType {
        TileType::new(id, name, format!("{name}.png"), Vec::new())
    }

    fn uniform(id: u32, name: &str, key: &str) -> TileType {
        let mut tile = bare(id, name);
        tile.set_all_edge_keys(key);
        tile
    }

    fn east_keyed(id: u32, name: &str, key: &str) -> TileType {
        bare(id, name)
            .with_edge_key(EdgeSlot::E1, key)
            .with_edge_key(EdgeSlot::E2, key)
    }

    fn west_keyed(id: u32, name: &str, key: &str) -> TileType {
        bare(id, name)
            .with_edge_key(EdgeSlot::W1, key)
            .with_edge_key(EdgeSlot::W2, key)
    }

    #[test]
    fn keyless_catalog_changes_only_the_center() {
        // grass(1) and dirt(2) carry no keys, so nothing ever matches and
        // placing dirt in the middle of grass leaves the neighbors alone.
        let catalog = Catalog::new(vec![bare(1, "grass"), bare(2, "dirt")]).unwrap();
        let mut grid = TileGrid::from_columns(&[vec![1], vec![1], vec![1]]).unwrap();
        let mut events = EventQueue::new();

        let tx = resolve_placement(&catalog, &mut grid, &mut events, 1, 0, 2);
        assert_eq!(grid.compact_string(), "[[1][2][1]]");
        assert_eq!(tx.len(), 1);
        assert_eq!(tx.edits()[0].position(), (1, 0));
    }

    #[test]
    fn incompatible_neighbor_becomes_the_first_transition_candidate() {
        // grass exposes "G" east, the transition tile accepts "G" on its
        // west and nothing on its east. Placing keyless dirt next to grass
        // swaps the grass for the transition tile.
        let catalog = Catalog::new(vec![
            east_keyed(1, "grass", "G"),
            west_keyed(3, "transition", "G"),
            bare(2, "dirt"),
        ])
        .unwrap();
        let mut grid = TileGrid::from_columns(&[vec![1], vec![2]]).unwrap();
        let mut events = EventQueue::new();

        let tx = resolve_placement(&catalog, &mut grid, &mut events, 1, 0, 2);
        assert_eq!(grid.compact_string(), "[[3][2]]");
        // Center already held dirt, so the only edit is the west repair.
        assert_eq!(tx.len(), 1);
        assert_eq!(tx.edits()[0].position(), (0, 0));
        assert_eq!(tx.edits()[0].new_id(), 3);
    }

    #[test]
    fn resolved_transition_does_not_thrash_on_repeat() {
        let catalog = Catalog::new(vec![
            east_keyed(1, "grass", "G"),
            west_keyed(3, "transition", "G"),
            bare(2, "dirt"),
        ])
        .unwrap();
        let mut grid = TileGrid::from_columns(&[vec![3], vec![2]]).unwrap();
        let mut events = EventQueue::new();

        // The transition tile's east side is keyless, so no candidate can
        // replace it and the repair is silently skipped.
        let tx = resolve_placement(&catalog, &mut grid, &mut events, 1, 0, 2);
        assert_eq!(grid.compact_string(), "[[3][2]]");
        assert!(tx.is_empty());
    }

    #[test]
    fn idempotent_when_cell_and_neighbors_are_consistent() {
        let catalog = Catalog::new(vec![uniform(1, "grass", "G")]).unwrap();
        let mut grid = TileGrid::filled(3, 3, 1);
        let mut events = EventQueue::new();

        let tx = resolve_placement(&catalog, &mut grid, &mut events, 1, 1, 1);
        assert!(tx.is_empty());
        assert_eq!(grid, TileGrid::filled(3, 3, 1));
        assert!(events.is_empty());
    }

    #[test]
    fn child_order_is_center_cardinals_then_diagonals() {
        // Catalog order: blend first so it wins every candidate search.
        // blend and land both speak "A" on all sides, rock speaks "B",
        // hole is keyless.
        let catalog = Catalog::new(vec![
            uniform(10, "blend", "A"),
            uniform(1, "land", "A"),
            uniform(2, "rock", "B"),
            bare(9, "hole"),
        ])
        .unwrap();
        let mut grid = TileGrid::filled(3, 3, 1);
        for (x, y) in [(0, 0), (2, 0), (2, 2), (0, 2)] {
            grid.set_tile(x, y, 9);
        }
        let mut events = EventQueue::new();

        // Placing rock breaks all four cardinals ("A" vs "B"); each is
        // repaired to blend (first candidate continuing "A"). The keyless
        // diagonal holes then disagree with their repaired flanks and are
        // patched to blend as well.
        let tx = resolve_placement(&catalog, &mut grid, &mut events, 1, 1, 2);
        let positions: Vec<(u32, u32)> = tx.edits().iter().map(|e| e.position()).collect();
        assert_eq!(
            positions,
            vec![
                (1, 1),         // center
                (0, 1),         // west
                (1, 0),         // north
                (2, 1),         // east
                (1, 2),         // south
                (0, 0),         // north-west
                (2, 0),         // north-east
                (2, 2),         // south-east
                (0, 2),         // south-west
            ]
        );
        for edit in &tx.edits()[1..] {
            assert_eq!(edit.new_id(), 10);
        }
        assert_eq!(grid.tile_at(1, 1), 2);
    }

    #[test]
    fn diagonal_already_in_the_fit_set_is_left_alone() {
        let catalog = Catalog::new(vec![uniform(10, "blend", "A"), uniform(1, "land", "A")])
            .unwrap();
        let mut grid = TileGrid::filled(3, 3, 1);
        let mut events = EventQueue::new();

        // All cardinals are compatible and each diagonal's occupant (land)
        // is itself in the fit set, so nothing moves even though blend
        // precedes land in catalog order.
        let tx = resolve_placement(&catalog, &mut grid, &mut events, 1, 1, 1);
        assert!(tx.is_empty());
    }

    #[test]
    fn second_ring_restriction_can_veto_every_candidate() {
        // rock(4) exposes "R" east; grass(1) "G" both ways; the transition
        // continues "G" only. With rock two steps west the restriction
        // empties the candidate set and the grass neighbor stays put.
        let rock = east_keyed(4, "rock", "R");
        let grass = east_keyed(1, "grass", "G")
            .with_edge_key(EdgeSlot::W1, "G")
            .with_edge_key(EdgeSlot::W2, "G");
        let transition = west_keyed(3, "transition", "G");
        let catalog = Catalog::new(vec![transition, grass, bare(2, "dirt"), rock]).unwrap();

        let mut grid = TileGrid::from_columns(&[vec![4], vec![1], vec![1]]).unwrap();
        let mut events = EventQueue::new();

        let tx = resolve_placement(&catalog, &mut grid, &mut events, 2, 0, 2);
        assert_eq!(grid.compact_string(), "[[4][1][2]]");
        assert_eq!(tx.len(), 1, "only the center changed");
    }

    #[test]
    fn second_ring_agreement_keeps_the_first_candidate() {
        // Same catalog, but the second-ring cell is grass too, so the
        // transition tile survives the restriction and replaces the
        // immediate neighbor.
        let grass = east_keyed(1, "grass", "G")
            .with_edge_key(EdgeSlot::W1, "G")
            .with_edge_key(EdgeSlot::W2, "G");
        let transition = west_keyed(3, "transition", "G");
        let catalog = Catalog::new(vec![transition, grass, bare(2, "dirt")]).unwrap();

        let mut grid = TileGrid::from_columns(&[vec![1], vec![1], vec![1]]).unwrap();
        let mut events = EventQueue::new();

        let tx = resolve_placement(&catalog, &mut grid, &mut events, 2, 0, 2);
        assert_eq!(grid.compact_string(), "[[1][3][2]]");
        let positions: Vec<(u32, u32)> = tx.edits().iter().map(|e| e.position()).collect();
        assert_eq!(positions, vec![(2, 0), (1, 0)]);
    }

    #[test]
    fn map_boundary_never_errors() {
        let catalog = Catalog::new(vec![uniform(1, "land", "A"), uniform(2, "rock", "B")])
            .unwrap();
        let mut grid = TileGrid::filled(1, 1, 1);
        let mut events = EventQueue::new();

        // Every neighbor of the only cell is off the map.
        let tx = resolve_placement(&catalog, &mut grid, &mut events, 0, 0, 2);
        assert_eq!(tx.len(), 1);
        assert_eq!(grid.tile_at(0, 0), 2);
    }

    #[test]
    fn undo_restores_the_exact_prior_grid() {
        let catalog = Catalog::new(vec![
            uniform(10, "blend", "A"),
            uniform(1, "land", "A"),
            uniform(2, "rock", "B"),
            bare(9, "hole"),
        ])
        .unwrap();
        let mut grid = TileGrid::filled(4, 4, 1);
        grid.set_tile(0, 0, 9);
        grid.set_tile(2, 2, 9);
        let before = grid.clone();
        let mut events = EventQueue::new();

        let mut tx = resolve_placement(&catalog, &mut grid, &mut events, 1, 1, 2);
        assert_ne!(grid, before);

        tx.undo(&mut grid, &mut events);
        assert_eq!(grid, before);
    }

    #[test]
    fn unknown_tile_id_yields_an_untouched_grid() {
        let catalog = Catalog::new(vec![bare(1, "grass")]).unwrap();
        let mut grid = TileGrid::filled(2, 2, 1);
        let mut events = EventQueue::new();

        let tx = resolve_placement(&catalog, &mut grid, &mut events, 0, 0, 42);
        assert!(tx.is_empty());
        assert_eq!(grid, TileGrid::filled(2, 2, 1));
    }
}
