//! Enumeration of every tetromino placement that fits inside a region

use std::ops::Index;

use ahash::AHashSet;

use crate::collections::{CellId, CellMask, Coord};
use crate::error::{Error, Result};
use crate::puzzle::board::{BlockId, Board};
use crate::puzzle::shape::{Shape, ShapeFamily};
use crate::puzzle::{RegionId, RegionMap};

/// One candidate tetromino: a shape family on four cells of one region
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    region: RegionId,
    family: ShapeFamily,
    mask: CellMask,
    adjacency: CellMask,
    blocks: Vec<BlockId>,
    cells: [CellId; 4],
}

impl Placement {
    fn new(board: &Board, region: RegionId, family: ShapeFamily, mask: CellMask) -> Self {
        let mut cells = [0; 4];
        let mut adjacency = CellMask::EMPTY;
        let mut blocks = Vec::new();
        for (slot, cell) in cells.iter_mut().zip(mask.iter()) {
            *slot = cell;
            adjacency |= board.neighbors(cell);
            blocks.extend_from_slice(board.blocks_touching(cell));
        }
        blocks.sort_unstable();
        blocks.dedup();
        Self {
            region,
            family,
            mask,
            adjacency: adjacency - mask,
            blocks,
            cells,
        }
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn family(&self) -> ShapeFamily {
        self.family
    }

    /// The four occupied cells
    pub fn mask(&self) -> CellMask {
        self.mask
    }

    /// The cells that share an edge with the placement but are not part of it
    pub fn adjacency(&self) -> CellMask {
        self.adjacency
    }

    /// The 2x2 blocks that contain at least one occupied cell
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// The occupied cells in ascending order
    pub fn cells(&self) -> &[CellId; 4] {
        &self.cells
    }
}

/// The placements available to every region of a region map
#[derive(Clone, Debug)]
pub struct Placements {
    board: Board,
    by_region: Vec<Vec<Placement>>,
}

impl Placements {
    /// Enumerates all placements of every shape variant in every region.
    ///
    /// Fails with `RegionInfeasible` if some region has no placement.
    pub fn enumerate(regions: &RegionMap) -> Result<Self> {
        let placements = Self::enumerate_unchecked(regions);
        if let Some(region) = placements.by_region.iter().position(Vec::is_empty) {
            debug!("Region {} has no placements", region);
            return Err(Error::RegionInfeasible { region });
        }
        Ok(placements)
    }

    /// Enumerates placements without checking that every region has one
    pub fn enumerate_unchecked(regions: &RegionMap) -> Self {
        let board = Board::new(regions.rows(), regions.cols());
        let mut by_region = vec![Vec::new(); regions.region_count()];
        let mut seen: AHashSet<_> = AHashSet::default();
        for anchor in 0..board.cell_count() {
            for &family in &ShapeFamily::ALL {
                for shape in family.variants() {
                    let mask = match place(&board, anchor, shape) {
                        Some(mask) => mask,
                        None => continue,
                    };
                    let region = match single_region(regions, mask) {
                        Some(region) => region,
                        None => continue,
                    };
                    if seen.insert((family, mask)) {
                        by_region[region].push(Placement::new(&board, region, family, mask));
                    }
                }
            }
        }
        debug!(
            "Enumerated {} placements for {} regions",
            seen.len(),
            by_region.len()
        );
        Self { board, by_region }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn region_count(&self) -> usize {
        self.by_region.len()
    }

    pub fn region(&self, region: RegionId) -> &[Placement] {
        &self.by_region[region]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.by_region.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_region.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for Placements {
    fn eq(&self, other: &Self) -> bool {
        self.by_region == other.by_region
    }
}

impl Index<RegionId> for Placements {
    type Output = [Placement];

    fn index(&self, region: RegionId) -> &Self::Output {
        self.region(region)
    }
}

/// Translates a shape so its bounding box starts at `anchor`
fn place(board: &Board, anchor: CellId, shape: &Shape) -> Option<CellMask> {
    let origin = board.coord(anchor);
    let mut mask = CellMask::EMPTY;
    for &(dr, dc) in shape.cells() {
        let coord: Coord = origin.offset(dr, dc, board.rows(), board.cols())?;
        mask.insert(coord.row() * board.cols() + coord.col());
    }
    Some(mask)
}

/// The region containing every cell of the mask, if there is one
fn single_region(regions: &RegionMap, mask: CellMask) -> Option<RegionId> {
    let mut cells = mask.iter();
    let region = regions.region_of(cells.next()?);
    if cells.all(|cell| regions.region_of(cell) == region) {
        Some(region)
    } else {
        None
    }
}
