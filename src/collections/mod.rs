//! Grid containers and cell sets

pub mod cell_mask;
pub mod grid;

pub use self::cell_mask::CellMask;
pub use self::grid::{Coord, Grid};

/// Flat index of a cell in a grid (`row * cols + col`)
pub type CellId = usize;
