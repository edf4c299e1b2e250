use std::mem;

use rand::seq::SliceRandom;
use rand::RngCore;
use vec_map::VecMap;

use crate::collections::CellMask;
use crate::puzzle::placement::{Placement, Placements};
use crate::puzzle::solve::Assignment;
use crate::puzzle::RegionId;

/// Index of a placement within its region's placement list
pub(crate) type OptionId = usize;

pub(crate) struct SearchResult {
    pub count: usize,
    pub first: Option<Assignment>,
}

/// Counts solutions up to `limit`, keeping the first one found.
///
/// With an rng the candidate order and MRV ties are randomized, otherwise the
/// search order is fully deterministic.
pub(crate) fn search(
    placements: &Placements,
    affected: &[Vec<Vec<RegionId>>],
    limit: usize,
    mut rng: Option<&mut dyn RngCore>,
) -> SearchResult {
    let mut result = SearchResult {
        count: 0,
        first: None,
    };
    if limit == 0 {
        return result;
    }
    let mut state = SearchState::new(placements, affected);
    let mut stack: Vec<Frame> = Vec::new();
    stack.push(state.next_frame(&mut rng));
    let mut nodes = 0_u64;
    let mut backtracks = 0_u64;

    while let Some(frame) = stack.last_mut() {
        if let Some(undo) = frame.applied.take() {
            state.undo(frame.region, undo);
        }
        let option = match frame.options.get(frame.cursor) {
            Some(&option) => option,
            None => {
                stack.pop();
                backtracks += 1;
                continue;
            }
        };
        frame.cursor += 1;
        nodes += 1;
        let (undo, consistent) = state.apply(frame.region, option);
        frame.applied = Some(undo);
        if !consistent {
            continue;
        }
        if state.is_complete() {
            result.count += 1;
            if result.first.is_none() {
                result.first = Some(state.assignment());
            }
            if result.count >= limit {
                break;
            }
            continue;
        }
        let next = state.next_frame(&mut rng);
        stack.push(next);
    }

    debug!(
        "Search found {} solution(s) (nodes={}, backtracks={})",
        result.count, nodes, backtracks
    );
    result
}

/// A region being branched on and the candidates left to try
struct Frame {
    region: RegionId,
    options: Vec<OptionId>,
    cursor: usize,
    applied: Option<Undo>,
}

/// Everything needed to take back one applied placement
struct Undo {
    filled: CellMask,
    family: usize,
    family_filled: CellMask,
    domains: Vec<(RegionId, Vec<OptionId>)>,
}

struct SearchState<'a> {
    placements: &'a Placements,
    affected: &'a [Vec<Vec<RegionId>>],
    filled: CellMask,
    family_filled: [CellMask; 4],
    chosen: VecMap<OptionId>,
    /// Options of each unassigned region that are consistent with the current state
    domains: Vec<Vec<OptionId>>,
}

impl<'a> SearchState<'a> {
    fn new(placements: &'a Placements, affected: &'a [Vec<Vec<RegionId>>]) -> Self {
        let domains = (0..placements.region_count())
            .map(|region| (0..placements.region(region).len()).collect())
            .collect();
        Self {
            placements,
            affected,
            filled: CellMask::EMPTY,
            family_filled: [CellMask::EMPTY; 4],
            chosen: VecMap::with_capacity(placements.region_count()),
            domains,
        }
    }

    fn placement(&self, region: RegionId, option: OptionId) -> &'a Placement {
        &self.placements.region(region)[option]
    }

    fn is_complete(&self) -> bool {
        self.chosen.len() == self.placements.region_count()
    }

    /// Whether `placement` can be added without filling a 2x2 block or touching
    /// a placed tetromino of the same family
    fn is_valid(&self, placement: &Placement) -> bool {
        let filled = self.filled | placement.mask();
        let board = self.placements.board();
        placement
            .blocks()
            .iter()
            .all(|&block| !filled.is_superset(&board.block_mask(block)))
            && !self.family_filled[placement.family().index()].intersects(&placement.adjacency())
    }

    /// Selects the unassigned region with the fewest remaining options
    fn next_frame(&self, rng: &mut Option<&mut dyn RngCore>) -> Frame {
        let unassigned = (0..self.domains.len()).filter(|r| !self.chosen.contains_key(*r));
        let region = match rng.as_mut() {
            Some(rng) => {
                let mut best = Vec::new();
                let mut best_len = usize::MAX;
                for region in unassigned {
                    let len = self.domains[region].len();
                    if len < best_len {
                        best.clear();
                        best_len = len;
                    }
                    if len == best_len {
                        best.push(region);
                    }
                }
                *best.choose(rng).unwrap_or(&0)
            }
            None => unassigned
                .min_by_key(|&region| self.domains[region].len())
                .unwrap_or(0),
        };
        let mut options = self.domains[region].clone();
        if let Some(rng) = rng.as_mut() {
            options.shuffle(rng);
        }
        trace!(
            "Branching on region {} with {} options (depth={})",
            region,
            options.len(),
            self.chosen.len()
        );
        Frame {
            region,
            options,
            cursor: 0,
            applied: None,
        }
    }

    /// Commits a placement and prunes the domains of the regions it affects.
    /// Returns false if some affected region is left without options.
    fn apply(&mut self, region: RegionId, option: OptionId) -> (Undo, bool) {
        let placement = self.placement(region, option);
        debug_assert!(self.is_valid(placement));
        let family = placement.family().index();
        let mut undo = Undo {
            filled: self.filled,
            family,
            family_filled: self.family_filled[family],
            domains: Vec::new(),
        };
        self.filled |= placement.mask();
        self.family_filled[family] |= placement.mask();
        self.chosen.insert(region, option);

        let affected = self.affected;
        for &other in &affected[region][option] {
            if self.chosen.contains_key(other) {
                continue;
            }
            let kept: Vec<OptionId> = self.domains[other]
                .iter()
                .copied()
                .filter(|&o| self.is_valid(self.placement(other, o)))
                .collect();
            if kept.len() == self.domains[other].len() {
                continue;
            }
            let empty = kept.is_empty();
            let previous = mem::replace(&mut self.domains[other], kept);
            undo.domains.push((other, previous));
            if empty {
                return (undo, false);
            }
        }
        (undo, true)
    }

    fn undo(&mut self, region: RegionId, undo: Undo) {
        self.filled = undo.filled;
        self.family_filled[undo.family] = undo.family_filled;
        self.chosen.remove(region);
        for (other, domain) in undo.domains {
            self.domains[other] = domain;
        }
    }

    fn assignment(&self) -> Assignment {
        Assignment::new(
            self.chosen
                .iter()
                .map(|(region, &option)| self.placement(region, option).clone())
                .collect(),
        )
    }
}
