//! The mutable tile grid.
//!
//! Cells are stored x-major (column by column) to match the map document's
//! outer-by-X layout. The grid is never resized in place; resize and clear
//! build a replacement grid and the caller swaps it in.

use rand::Rng;

/// `width × height` array of tile-type ids, origin (0,0) at top-left.
///
/// Single-cell accessors treat out-of-bounds coordinates as a caller
/// precondition (debug assertion, no defensive check on the hot edit path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl TileGrid {
    /// Grid with every cell set to `id`.
    pub fn filled(width: u32, height: u32, id: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![id; (width * height) as usize],
        }
    }

    /// Grid with every cell drawn from `fill_ids` at random.
    pub fn generate(width: u32, height: u32, rng: &mut impl Rng, fill_ids: &[u32; 2]) -> Self {
        let cells = (0..width * height)
            .map(|_| fill_ids[usize::from(rng.gen_bool(0.5))])
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a grid from column vectors (outer index X, inner Y). Returns
    /// `None` for an empty or ragged input.
    pub fn from_columns(columns: &[Vec<u32>]) -> Option<Self> {
        let width = columns.len() as u32;
        let height = columns.first()?.len() as u32;
        if height == 0 || columns.iter().any(|col| col.len() as u32 != height) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: columns.concat(),
        })
    }

    /// The column-vector form consumed by the map document.
    pub fn to_columns(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.height as usize)
            .map(|col| col.to_vec())
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            self.in_bounds(x as i32, y as i32),
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        (x * self.height + y) as usize
    }

    pub fn tile_at(&self, x: u32, y: u32) -> u32 {
        self.cells[self.index(x, y)]
    }

    pub fn set_tile(&mut self, x: u32, y: u32, id: u32) {
        let index = self.index(x, y);
        self.cells[index] = id;
    }

    /// Bounds-checked read for neighbor scans.
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if self.in_bounds(x, y) {
            Some(self.cells[(x as u32 * self.height + y as u32) as usize])
        } else {
            None
        }
    }

    /// A new grid of the requested size: the overlapping sub-rectangle is
    /// copied cell for cell, newly exposed cells are drawn from `fill_ids`.
    pub fn resized(
        &self,
        width: u32,
        height: u32,
        rng: &mut impl Rng,
        fill_ids: &[u32; 2],
    ) -> Self {
        let mut grid = Self::generate(width, height, rng, fill_ids);
        for x in 0..width.min(self.width) {
            for y in 0..height.min(self.height) {
                grid.set_tile(x, y, self.tile_at(x, y));
            }
        }
        grid
    }

    /// Compact bracket form, e.g. `[[1,2][8,10][9,3]]` (outer X, inner Y).
    /// Diagnostic and test aid.
    pub fn compact_string(&self) -> String {
        let mut out = String::from("[");
        for x in 0..self.width {
            out.push('[');
            for y in 0..self.height {
                out.push_str(&self.tile_at(x, y).to_string());
                if y + 1 < self.height {
                    out.push(',');
                }
            }
            out.push(']');
        }
        out.push(']');
        out
    }
}
