//! Solve LITS region maps and certify uniqueness

pub use self::assignment::Assignment;

use rand::Rng;

use crate::puzzle::placement::{Placement, Placements};
use crate::puzzle::RegionId;

use self::search::search;

mod assignment;
mod search;

pub enum SolveResult {
    /// No assignment satisfies the rules
    Unsolvable,
    /// The region map has exactly one solution, as it should
    Solved(Assignment),
    /// Multiple solutions were found for the region map - this is not a proper puzzle
    MultipleSolutions,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }

    pub fn solved(&self) -> Option<&Assignment> {
        match self {
            SolveResult::Solved(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Backtracking search over the placements of every region.
///
/// Each step branches on the unassigned region with the fewest consistent
/// options. After a placement is committed, only the regions whose placements
/// share a 2x2 block with it or occupy a cell next to it are re-checked.
pub struct PlacementSolver<'a> {
    placements: &'a Placements,
    /// For each region and option, the other regions whose domains it can prune
    affected: Vec<Vec<Vec<RegionId>>>,
}

impl<'a> PlacementSolver<'a> {
    pub fn new(placements: &'a Placements) -> Self {
        let board = placements.board();
        let mut block_regions = vec![Vec::new(); board.block_count()];
        let mut cell_regions = vec![Vec::new(); board.cell_count()];
        for p in placements.iter() {
            for &block in p.blocks() {
                block_regions[block].push(p.region());
            }
            for cell in p.mask().iter() {
                cell_regions[cell].push(p.region());
            }
        }
        for regions in block_regions.iter_mut().chain(cell_regions.iter_mut()) {
            regions.dedup();
        }
        let affected = (0..placements.region_count())
            .map(|region| {
                placements
                    .region(region)
                    .iter()
                    .map(|p| affected_regions(p, &block_regions, &cell_regions))
                    .collect()
            })
            .collect();
        Self {
            placements,
            affected,
        }
    }

    /// Finds one solution, trying candidates in random order
    pub fn find_solution(&self, rng: &mut impl Rng) -> Option<Assignment> {
        search(self.placements, &self.affected, 1, Some(rng)).first
    }

    /// Finds the first solution in deterministic search order
    pub fn find_first(&self) -> Option<Assignment> {
        search(self.placements, &self.affected, 1, None).first
    }

    /// Counts solutions, stopping as soon as `limit` have been found
    pub fn count_solutions(&self, limit: usize) -> usize {
        search(self.placements, &self.affected, limit, None).count
    }

    pub fn solve(&self) -> SolveResult {
        let result = search(self.placements, &self.affected, 2, None);
        match (result.count, result.first) {
            (1, Some(assignment)) => SolveResult::Solved(assignment),
            (0, _) => SolveResult::Unsolvable,
            _ => SolveResult::MultipleSolutions,
        }
    }

    /// True if there is exactly one solution
    pub fn is_unique(&self) -> bool {
        self.count_solutions(2) == 1
    }
}

fn affected_regions(
    placement: &Placement,
    block_regions: &[Vec<RegionId>],
    cell_regions: &[Vec<RegionId>],
) -> Vec<RegionId> {
    let mut regions = Vec::new();
    for &block in placement.blocks() {
        regions.extend_from_slice(&block_regions[block]);
    }
    for cell in placement.adjacency().iter() {
        regions.extend_from_slice(&cell_regions[cell]);
    }
    regions.retain(|&r| r != placement.region());
    regions.sort_unstable();
    regions.dedup();
    regions
}
