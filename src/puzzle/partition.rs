//! Random partitioning of a grid into connected regions
//!
//! A random spanning tree is grown over the grid cells and then tree edges are
//! cut until every component is small enough. Each cut is chosen so that both
//! sides keep at least the minimum region size, so the components stay within
//! bounds by construction.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::collections::cell_mask::MAX_CELLS;
use crate::collections::{CellId, Grid};
use crate::error::{Error, Result};
use crate::puzzle::board::Board;
use crate::puzzle::RegionMap;

/// The smallest region that can hold a tetromino
pub const MIN_REGION_SIZE: usize = 4;

/// Inclusive bounds on the number of cells in a region
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionSizeBounds {
    pub min: usize,
    pub max: usize,
}

impl RegionSizeBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(self, size: usize) -> bool {
        self.min <= size && size <= self.max
    }

    /// Checks that regions with these bounds can tile a `rows` x `cols` grid at all
    pub fn validate(self, rows: usize, cols: usize) -> Result<()> {
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_parameters("rows and cols must be positive"));
        }
        if rows.checked_mul(cols).map_or(true, |cells| cells > MAX_CELLS) {
            return Err(Error::invalid_parameters(format!(
                "a {}x{} grid exceeds the maximum of {} cells",
                rows, cols, MAX_CELLS
            )));
        }
        if self.min < MIN_REGION_SIZE {
            return Err(Error::invalid_parameters(format!(
                "minimum region size must be at least {} to fit a tetromino",
                MIN_REGION_SIZE
            )));
        }
        if self.min > self.max {
            return Err(Error::invalid_parameters(format!(
                "minimum region size {} is greater than maximum region size {}",
                self.min, self.max
            )));
        }
        if rows * cols < self.min {
            return Err(Error::invalid_parameters(format!(
                "a {}x{} grid is too small for regions of at least {} cells",
                rows, cols, self.min
            )));
        }
        Ok(())
    }
}

/// Generates a random region map whose regions all have sizes within `bounds`.
///
/// Every attempt grows a fresh spanning tree. An attempt is abandoned as soon as
/// an oversized component cannot be split.
pub fn generate_regions(
    rows: usize,
    cols: usize,
    bounds: RegionSizeBounds,
    max_attempts: usize,
    rng: &mut impl Rng,
) -> Result<RegionMap> {
    bounds.validate(rows, cols)?;
    let board = Board::new(rows, cols);
    for attempt in 1..=max_attempts {
        let mut tree = SpanningTree::random(&board, rng);
        match tree.split_components(bounds, rng) {
            Some(components) => {
                trace!(
                    "Partitioned {}x{} grid into {} regions (attempt {})",
                    rows,
                    cols,
                    components.len(),
                    attempt
                );
                return label_components(rows, cols, components);
            }
            None => trace!("Spanning tree could not be split (attempt {})", attempt),
        }
    }
    debug!(
        "No region partition found for {}x{} grid, sizes {}..={}",
        rows, cols, bounds.min, bounds.max
    );
    Err(Error::RegionGenerationFailed {
        attempts: max_attempts,
    })
}

/// Assigns region ids in order of each component's first cell
fn label_components(
    rows: usize,
    cols: usize,
    mut components: Vec<Vec<CellId>>,
) -> Result<RegionMap> {
    for component in &mut components {
        component.sort_unstable();
    }
    components.sort_unstable_by_key(|c| c[0]);
    let mut grid = Grid::with_value(rows, cols, usize::MAX);
    for (region, component) in components.iter().enumerate() {
        for &cell in component {
            grid[cell] = region;
        }
    }
    if grid.iter().any(|&r| r == usize::MAX) {
        return Err(Error::invariant("partition left a cell without a region"));
    }
    RegionMap::new(grid)
}

struct SpanningTree {
    adjacency: Vec<Vec<CellId>>,
}

impl SpanningTree {
    /// Grows a spanning tree by randomized depth-first search
    fn random(board: &Board, rng: &mut impl Rng) -> Self {
        let n = board.cell_count();
        let mut adjacency = vec![Vec::new(); n];
        let mut seen = vec![false; n];
        let start = rng.gen_range(0, n);
        seen[start] = true;
        let mut stack = vec![start];
        while let Some(&cell) = stack.last() {
            let unseen: Vec<CellId> = board.neighbors(cell).iter().filter(|&c| !seen[c]).collect();
            match unseen.choose(rng) {
                Some(&next) => {
                    adjacency[cell].push(next);
                    adjacency[next].push(cell);
                    seen[next] = true;
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
        debug_assert!(seen.iter().all(|&s| s));
        Self { adjacency }
    }

    fn remove_edge(&mut self, a: CellId, b: CellId) {
        self.adjacency[a].retain(|&c| c != b);
        self.adjacency[b].retain(|&c| c != a);
    }

    /// Cuts tree edges until every component fits within `bounds`.
    /// Returns `None` if some oversized component has no valid cut.
    fn split_components(
        &mut self,
        bounds: RegionSizeBounds,
        rng: &mut impl Rng,
    ) -> Option<Vec<Vec<CellId>>> {
        let mut pending = vec![(0..self.adjacency.len()).collect::<Vec<_>>()];
        let mut done = Vec::new();
        while let Some(component) = pending.pop() {
            if component.len() <= bounds.max {
                done.push(component);
                continue;
            }
            let (a, b) = self.split(&component, bounds.min, rng)?;
            pending.push(a);
            pending.push(b);
        }
        if done.iter().any(|c| !bounds.contains(c.len())) {
            return None;
        }
        Some(done)
    }

    /// Removes one random tree edge of the component such that both sides have at
    /// least `min_size` cells and returns the two sides.
    fn split(
        &mut self,
        component: &[CellId],
        min_size: usize,
        rng: &mut impl Rng,
    ) -> Option<(Vec<CellId>, Vec<CellId>)> {
        let root = component[0];
        let (order, parents) = self.traverse(root, None);
        debug_assert_eq!(component.len(), order.len());

        let mut index_of = vec![usize::MAX; self.adjacency.len()];
        for (i, &cell) in order.iter().enumerate() {
            index_of[cell] = i;
        }
        let total = order.len();
        let mut subtree_size = vec![1; total];
        // children are always visited after their parent
        for i in (1..total).rev() {
            if let Some(p) = parents[i] {
                subtree_size[index_of[p]] += subtree_size[i];
            }
        }

        let candidates: Vec<usize> = (1..total)
            .filter(|&i| subtree_size[i] >= min_size && total - subtree_size[i] >= min_size)
            .collect();
        let &i = candidates.choose(rng)?;
        let child = order[i];
        let parent = parents[i]?;
        self.remove_edge(child, parent);

        let (side_a, _) = self.traverse(child, None);
        let (side_b, _) = self.traverse(parent, None);
        Some((side_a, side_b))
    }

    /// Depth-first traversal from `root`. Returns the visit order and, for each
    /// visited cell, its parent cell in the traversal.
    fn traverse(&self, root: CellId, from: Option<CellId>) -> (Vec<CellId>, Vec<Option<CellId>>) {
        let mut order = Vec::new();
        let mut parent = Vec::new();
        let mut stack = vec![(root, from)];
        while let Some((cell, p)) = stack.pop() {
            order.push(cell);
            parent.push(p);
            for &next in &self.adjacency[cell] {
                if Some(next) != p {
                    stack.push((next, Some(cell)));
                }
            }
        }
        (order, parent)
    }
}
