//! LITS puzzles

pub use self::generate::{generate_puzzle, GenerateConfig};
pub use self::partition::{generate_regions, RegionSizeBounds, MIN_REGION_SIZE};
pub use self::placement::{Placement, Placements};
pub use self::region::{RegionId, RegionMap};
pub use self::shape::ShapeFamily;
pub use self::solve::{Assignment, PlacementSolver, SolveResult};

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use itertools::Itertools;
use rand::Rng;

use crate::collections::Grid;
use crate::error::Result;

pub mod board;
mod generate;
mod parse;
mod partition;
mod placement;
mod region;
pub mod shape;
pub mod solve;

/// A region map together with its verified solution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    regions: RegionMap,
    solution: Assignment,
}

impl Puzzle {
    /// Fails with `InvariantViolation` if `solution` does not solve `regions`
    pub fn new(regions: RegionMap, solution: Assignment) -> Result<Self> {
        solution.verify(&regions)?;
        Ok(Self { regions, solution })
    }

    pub fn generate(config: &GenerateConfig, rng: &mut impl Rng) -> Result<Self> {
        generate_puzzle(config, rng)
    }

    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn solution(&self) -> &Assignment {
        &self.solution
    }

    /// Which cells are shaded in the solution
    pub fn filled_grid(&self) -> Grid<bool> {
        let mut grid = Grid::with_value(self.regions.rows(), self.regions.cols(), false);
        for cell in self.solution.occupancy().iter() {
            grid[cell] = true;
        }
        grid
    }

    /// The family of the tetromino covering each cell
    pub fn shape_grid(&self) -> Grid<Option<ShapeFamily>> {
        let mut grid = Grid::with_value(self.regions.rows(), self.regions.cols(), None);
        for placement in self.solution.iter() {
            for &cell in placement.cells() {
                grid[cell] = Some(placement.family());
            }
        }
        grid
    }

    /// Writes the puzzle in the same text format as `Display`
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_string())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.regions)?;
        for row in self.shape_grid().iter_rows() {
            let line = row
                .iter()
                .map(|family| family.map_or('.', ShapeFamily::label))
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::puzzle::{Assignment, Placements, Puzzle, RegionMap, ShapeFamily};

    fn puzzle() -> Puzzle {
        let regions = RegionMap::from_rows(vec![vec![0, 0, 0, 0, 0, 1, 1, 1, 1]]).unwrap();
        let placements = Placements::enumerate(&regions).unwrap();
        let solution = Assignment::new(vec![
            placements[0][0].clone(),
            placements[1][0].clone(),
        ]);
        Puzzle::new(regions, solution).unwrap()
    }

    #[test]
    fn derived_grids() {
        let puzzle = puzzle();
        let filled: Vec<bool> = puzzle.filled_grid().to_vec();
        assert_eq!(
            vec![true, true, true, true, false, true, true, true, true],
            filled
        );
        let shapes = puzzle.shape_grid();
        assert_eq!(Some(ShapeFamily::I), shapes[0]);
        assert_eq!(None, shapes[4]);
    }

    #[test]
    fn display() {
        assert_eq!(
            "1 9\n0 0 0 0 0 1 1 1 1\n\nI I I I . I I I I\n",
            puzzle().to_string()
        );
    }

    #[test]
    fn invalid_solution() {
        let regions = RegionMap::from_rows(vec![vec![0, 0, 0, 0, 1, 1, 1, 1]]).unwrap();
        let placements = Placements::enumerate(&regions).unwrap();
        let solution = Assignment::new(vec![
            placements[0][0].clone(),
            placements[1][0].clone(),
        ]);
        assert!(Puzzle::new(regions, solution).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("puzzle.txt");
        let puzzle = puzzle();
        puzzle.save(&path).unwrap();
        assert_eq!(puzzle.to_string(), fs::read_to_string(&path).unwrap());
        assert_eq!(puzzle.regions(), &RegionMap::from_file(&path).unwrap());
    }
}
