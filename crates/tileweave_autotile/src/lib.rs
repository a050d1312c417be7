//! Autotile propagation for tileweave
//!
//! Placing a tile in "smart mode" repairs its 8 neighbors in one
//! deterministic, greedy, non-backtracking sweep driven by the edge-key
//! compatibility model from `tileweave_core`. The pass produces a
//! `Transaction` whose edits are already applied, ready to be pushed onto
//! the undo history.

mod resolver;

pub use resolver::resolve_placement;
