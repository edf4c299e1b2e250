use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::collections::cell_mask::MAX_CELLS;
use crate::collections::{CellId, CellMask, Grid};
use crate::error::{Error, ParseError, PuzzleFromFileError, Result};
use crate::puzzle::parse::parse_region_map;

/// Identifies a region. Region ids of a map are exactly `0..region_count`.
pub type RegionId = usize;

/// A partition of every grid cell into connected regions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMap {
    grid: Grid<RegionId>,
    regions: Vec<Vec<CellId>>,
}

impl RegionMap {
    /// Creates a region map, checking that the labeling is a partition into connected regions
    pub fn new(grid: Grid<RegionId>) -> Result<Self> {
        if grid.is_empty() {
            return Err(Error::invariant("region map has no cells"));
        }
        if grid.len() > MAX_CELLS {
            return Err(Error::invariant(format!(
                "region map has {} cells, more than the maximum of {}",
                grid.len(),
                MAX_CELLS
            )));
        }
        if let Some(&id) = grid.iter().find(|&&id| id >= grid.len()) {
            return Err(Error::invariant(format!("region id {} is out of range", id)));
        }
        let region_count = grid.iter().max().map_or(0, |&max| max + 1);
        let mut regions = vec![Vec::new(); region_count];
        for (cell, &region) in grid.iter().enumerate() {
            regions[region].push(cell);
        }
        if let Some(id) = regions.iter().position(Vec::is_empty) {
            return Err(Error::invariant(format!("region {} has no cells", id)));
        }
        let map = Self { grid, regions };
        for region in 0..region_count {
            if !map.is_connected(region) {
                return Err(Error::invariant(format!(
                    "region {} is not connected",
                    region
                )));
            }
        }
        Ok(map)
    }

    /// Creates a region map from rows of region ids
    pub fn from_rows(rows: Vec<Vec<RegionId>>) -> Result<Self> {
        let grid = Grid::from_rows(rows).map_err(|e| Error::invariant(e.to_string()))?;
        Self::new(grid)
    }

    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, PuzzleFromFileError> {
        let text = fs::read_to_string(path)?;
        let map = Self::parse(&text)?;
        Ok(map)
    }

    pub fn parse(s: &str) -> std::result::Result<Self, ParseError> {
        parse_region_map(s)
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn region_of(&self, cell: CellId) -> RegionId {
        self.grid[cell]
    }

    /// The cells of a region in ascending order
    pub fn cells(&self, region: RegionId) -> &[CellId] {
        &self.regions[region]
    }

    pub fn region_mask(&self, region: RegionId) -> CellMask {
        self.regions[region].iter().copied().collect()
    }

    pub fn region_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.regions.iter().map(Vec::len)
    }

    pub fn grid(&self) -> &Grid<RegionId> {
        &self.grid
    }

    fn is_connected(&self, region: RegionId) -> bool {
        let cells = &self.regions[region];
        let (rows, cols) = (self.rows(), self.cols());
        let mut seen = CellMask::single(cells[0]);
        let mut queue = VecDeque::from(vec![cells[0]]);
        while let Some(cell) = queue.pop_front() {
            let (r, c) = (cell / cols, cell % cols);
            let mut neighbors = Vec::with_capacity(4);
            if r > 0 {
                neighbors.push(cell - cols);
            }
            if r + 1 < rows {
                neighbors.push(cell + cols);
            }
            if c > 0 {
                neighbors.push(cell - 1);
            }
            if c + 1 < cols {
                neighbors.push(cell + 1);
            }
            for next in neighbors {
                if self.grid[next] == region && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen.len() == cells.len()
    }
}

impl fmt::Display for RegionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.rows(), self.cols())?;
        write!(f, "{}", self.grid)
    }
}

impl FromStr for RegionMap {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::puzzle::RegionMap;

    #[test]
    fn valid_map() {
        let map = RegionMap::from_rows(vec![vec![0, 0, 1], vec![0, 1, 1]]).unwrap();
        assert_eq!(2, map.region_count());
        assert_eq!(&[0, 1, 3], map.cells(0));
        assert_eq!(1, map.region_of(4));
        assert_eq!(vec![3, 3], map.region_sizes().collect::<Vec<_>>());
    }

    #[test]
    fn disconnected_region() {
        let result = RegionMap::from_rows(vec![vec![0, 1, 0], vec![1, 1, 1]]);
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn missing_region_id() {
        let result = RegionMap::from_rows(vec![vec![0, 0, 2], vec![0, 2, 2]]);
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn region_id_out_of_range() {
        let result = RegionMap::from_rows(vec![vec![0, 0, 0, usize::MAX]]);
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
        let result = RegionMap::from_rows(vec![vec![0, 0], vec![0, 100_000_000_000]]);
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
        let result = RegionMap::from_rows(vec![vec![0, 4], vec![0, 0]]);
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn ragged_rows() {
        let result = RegionMap::from_rows(vec![vec![0, 0, 0], vec![0, 0]]);
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn display_then_parse() {
        let map = RegionMap::from_rows(vec![vec![0, 0, 1], vec![2, 2, 1]]).unwrap();
        assert_eq!("2 3\n0 0 1\n2 2 1\n", map.to_string());
        assert_eq!(map, map.to_string().parse::<RegionMap>().unwrap());
    }
}
