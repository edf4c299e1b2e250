use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use lits::error::Error;
use lits::puzzle::{PlacementSolver, Placements, Puzzle, RegionMap, SolveResult};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Expected {
    Unique,
    Multiple,
    Unsolvable,
}

#[test]
fn test_puzzles() -> Result<()> {
    test_puzzle_dir(project_path("res/test/puzzles/unique"), Expected::Unique)?;
    test_puzzle_dir(project_path("res/test/puzzles/multiple"), Expected::Multiple)?;
    test_puzzle_dir(project_path("res/test/puzzles/unsolvable"), Expected::Unsolvable)?;
    Ok(())
}

fn test_puzzle_dir(path: impl AsRef<Path>, expected: Expected) -> Result<()> {
    let mut files: Vec<_> = fs::read_dir(path)?.collect::<Result<_, _>>()?;
    files.sort_unstable_by_key(|f| f.path());
    assert!(!files.is_empty());
    for file in files {
        println!("Solving {}", file.path().display());
        let regions = RegionMap::from_file(&file.path())?;
        let outcome = match Placements::enumerate(&regions) {
            Ok(placements) => match PlacementSolver::new(&placements).solve() {
                SolveResult::Solved(solution) => {
                    Puzzle::new(regions.clone(), solution)?;
                    Expected::Unique
                }
                SolveResult::MultipleSolutions => Expected::Multiple,
                SolveResult::Unsolvable => Expected::Unsolvable,
            },
            Err(Error::RegionInfeasible { .. }) => Expected::Unsolvable,
            Err(e) => return Err(e.into()),
        };
        assert_eq!(expected, outcome, "{}", file.path().display());
    }
    Ok(())
}

#[test]
fn saved_puzzle_reads_back_as_its_region_map() -> Result<()> {
    let path = project_path("res/test/puzzles/unique/row-gap.txt");
    let regions = RegionMap::from_file(&path)?;
    let placements = Placements::enumerate(&regions)?;
    let solution = PlacementSolver::new(&placements)
        .find_first()
        .expect("no solution");
    let puzzle = Puzzle::new(regions, solution)?;

    let dir = tempfile::tempdir()?;
    let saved = dir.path().join("puzzle.txt");
    puzzle.save(&saved)?;
    assert_eq!(puzzle.regions(), &RegionMap::from_file(&saved)?);
    Ok(())
}

fn project_path(path: impl AsRef<Path>) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}
