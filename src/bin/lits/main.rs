#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use std::fs;
use std::path::Path;

use anyhow::Result;
use lits::error::Error;
use lits::puzzle::{PlacementSolver, Placements, Puzzle, RegionMap, SolveResult};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::options::{Generate, Options, Source};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    match options.source() {
        Source::File(path) => solve_file(path),
        Source::Generate(generate) => start_generate(generate, options.output_path()),
    }
}

fn start_generate(generate: &Generate, output_path: Option<&Path>) -> Result<()> {
    let mut rng = match generate.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if let Some(path) = output_path {
        fs::create_dir_all(path)?;
    }
    for i in 1..=generate.count {
        println!("Generating puzzle {}/{}", i, generate.count);
        let puzzle = Puzzle::generate(&generate.config, &mut rng)?;
        println!("{}", puzzle);
        if let Some(path) = output_path {
            let path = path.join(format!("puzzle{}.txt", i));
            puzzle.save(&path)?;
            println!("Saved puzzle to {}", path.display());
        }
    }
    Ok(())
}

fn solve_file(path: &Path) -> Result<()> {
    println!("Reading puzzle from \"{}\"", path.display());
    let regions = RegionMap::from_file(path)?;
    print!("{}", regions.grid());
    let placements = match Placements::enumerate(&regions) {
        Ok(placements) => placements,
        Err(Error::RegionInfeasible { region }) => {
            println!("Puzzle is not solvable: region {} fits no tetromino", region);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let result = PlacementSolver::new(&placements).solve();
    let msg = match result {
        SolveResult::Unsolvable => "Puzzle is not solvable",
        SolveResult::Solved(_) => "Puzzle solved",
        SolveResult::MultipleSolutions => "Puzzle has multiple solutions",
    };
    println!("{}", msg);
    if let SolveResult::Solved(solution) = result {
        println!("{}", Puzzle::new(regions, solution)?);
    }
    Ok(())
}
