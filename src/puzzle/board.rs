//! Precomputed geometry of a rectangular board

use crate::collections::{CellId, CellMask, Coord};

/// Index of a 2x2 block of cells on a `Board`
pub type BlockId = usize;

/// Neighbor and 2x2 block masks for every cell of a `rows` x `cols` grid.
///
/// A board is computed once per grid size and is read-only afterwards.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    neighbors: Vec<CellMask>,
    blocks: Vec<CellMask>,
    blocks_by_cell: Vec<Vec<BlockId>>,
}

impl Board {
    /// Panics if the grid has more cells than a `CellMask` can hold
    pub fn new(rows: usize, cols: usize) -> Self {
        let n = rows * cols;
        let neighbors: Vec<CellMask> = (0..n)
            .map(|i| {
                let coord = Coord::new(i / cols, i % cols);
                [(-1, 0), (1, 0), (0, -1), (0, 1)]
                    .iter()
                    .filter_map(|&(dr, dc)| coord.offset(dr, dc, rows, cols))
                    .map(|c| c.row() * cols + c.col())
                    .collect::<CellMask>()
            })
            .collect();

        let mut blocks: Vec<CellMask> = Vec::new();
        let mut blocks_by_cell = vec![Vec::new(); n];
        for r in 0..rows.saturating_sub(1) {
            for c in 0..cols.saturating_sub(1) {
                let id = blocks.len();
                let cells = [
                    r * cols + c,
                    r * cols + c + 1,
                    (r + 1) * cols + c,
                    (r + 1) * cols + c + 1,
                ];
                for &cell in &cells {
                    blocks_by_cell[cell].push(id);
                }
                blocks.push(cells.iter().copied().collect());
            }
        }

        Self {
            rows,
            cols,
            neighbors,
            blocks,
            blocks_by_cell,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn coord(&self, cell: CellId) -> Coord {
        Coord::new(cell / self.cols, cell % self.cols)
    }

    /// The cells sharing an edge with `cell`
    pub fn neighbors(&self, cell: CellId) -> CellMask {
        self.neighbors[cell]
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_mask(&self, block: BlockId) -> CellMask {
        self.blocks[block]
    }

    /// The 2x2 blocks that include `cell`
    pub fn blocks_touching(&self, cell: CellId) -> &[BlockId] {
        &self.blocks_by_cell[cell]
    }
}

#[cfg(test)]
mod tests {
    use crate::puzzle::board::Board;

    #[test]
    fn neighbor_counts() {
        let board = Board::new(3, 4);
        assert_eq!(2, board.neighbors(0).len());
        assert_eq!(3, board.neighbors(1).len());
        assert_eq!(4, board.neighbors(5).len());
        assert_eq!(2, board.neighbors(11).len());
        assert_eq!(vec![1, 4, 6, 9], board.neighbors(5).iter().collect::<Vec<_>>());
    }

    #[test]
    fn blocks() {
        let board = Board::new(3, 4);
        assert_eq!(6, board.block_count());
        assert_eq!(1, board.blocks_touching(0).len());
        assert_eq!(2, board.blocks_touching(1).len());
        assert_eq!(4, board.blocks_touching(5).len());
        assert_eq!(1, board.blocks_touching(11).len());
        let block = board.block_mask(board.blocks_touching(0)[0]);
        assert_eq!(vec![0, 1, 4, 5], block.iter().collect::<Vec<_>>());
    }

    #[test]
    fn single_row_has_no_blocks() {
        let board = Board::new(1, 9);
        assert_eq!(0, board.block_count());
        assert!(board.blocks_touching(4).is_empty());
        assert_eq!(1, board.neighbors(8).len());
    }
}
