use rand::Rng;

use crate::error::{Error, Result};
use crate::puzzle::partition::{generate_regions, RegionSizeBounds};
use crate::puzzle::placement::Placements;
use crate::puzzle::solve::{Assignment, PlacementSolver};
use crate::puzzle::{Puzzle, RegionMap};

const DEFAULT_ROWS: usize = 6;
const DEFAULT_COLS: usize = 7;
const DEFAULT_MIN_REGION_SIZE: usize = 5;
const DEFAULT_MAX_REGION_SIZE: usize = 9;
const DEFAULT_MAX_REGION_ATTEMPTS: usize = 2000;
const DEFAULT_MAX_PARTITION_ATTEMPTS: usize = 300;

/// Parameters for generating a puzzle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateConfig {
    pub rows: usize,
    pub cols: usize,
    pub min_region_size: usize,
    pub max_region_size: usize,
    /// Reject region maps with more than one solution
    pub ensure_unique: bool,
    /// How many region maps to try before giving up
    pub max_region_attempts: usize,
    /// How many spanning trees to try for each region map
    pub max_partition_attempts: usize,
}

impl GenerateConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn region_size_bounds(&self) -> RegionSizeBounds {
        RegionSizeBounds::new(self.min_region_size, self.max_region_size)
    }

    pub fn validate(&self) -> Result<()> {
        self.region_size_bounds().validate(self.rows, self.cols)?;
        if self.max_region_attempts == 0 || self.max_partition_attempts == 0 {
            return Err(Error::invalid_parameters("attempt limits must be positive"));
        }
        Ok(())
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            min_region_size: DEFAULT_MIN_REGION_SIZE,
            max_region_size: DEFAULT_MAX_REGION_SIZE,
            ensure_unique: true,
            max_region_attempts: DEFAULT_MAX_REGION_ATTEMPTS,
            max_partition_attempts: DEFAULT_MAX_PARTITION_ATTEMPTS,
        }
    }
}

/// Generates a puzzle, trying fresh region maps until one is solvable (and
/// uniquely solvable if required).
///
/// The search is complete, so a region map that fails once is never retried.
pub fn generate_puzzle(config: &GenerateConfig, rng: &mut impl Rng) -> Result<Puzzle> {
    config.validate()?;
    let mut last = None;
    for attempt in 1..=config.max_region_attempts {
        match try_generate(config, rng) {
            Ok(puzzle) => {
                info!(
                    "Generated {}x{} puzzle with {} regions (attempt {})",
                    config.rows,
                    config.cols,
                    puzzle.regions().region_count(),
                    attempt
                );
                return Ok(puzzle);
            }
            Err(e) if e.is_retryable() => {
                debug!("Attempt {} failed: {}", attempt, e);
                last = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    Err(Error::RetriesExhausted {
        attempts: config.max_region_attempts,
        last: Box::new(last.unwrap_or(Error::NoSolutionFound)),
    })
}

fn try_generate(config: &GenerateConfig, rng: &mut impl Rng) -> Result<Puzzle> {
    let regions = generate_regions(
        config.rows,
        config.cols,
        config.region_size_bounds(),
        config.max_partition_attempts,
        rng,
    )?;
    trace!("Region map:\n{}", regions.grid());
    let solution = solve_regions(&regions, config.ensure_unique, rng)?;
    Puzzle::new(regions, solution)
}

fn solve_regions(
    regions: &RegionMap,
    ensure_unique: bool,
    rng: &mut impl Rng,
) -> Result<Assignment> {
    let placements = Placements::enumerate(regions)?;
    let solver = PlacementSolver::new(&placements);
    let solution = solver.find_solution(rng).ok_or(Error::NoSolutionFound)?;
    if ensure_unique {
        let found = solver.count_solutions(2);
        if found != 1 {
            return Err(Error::NotUnique { found });
        }
    }
    Ok(solution)
}
