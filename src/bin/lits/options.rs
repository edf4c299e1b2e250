use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use lits::puzzle::GenerateConfig;

#[derive(Clone)]
pub(crate) struct Options {
    output_path: Option<PathBuf>,
    source: Source,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("input") {
            Source::File(path.into())
        } else {
            let defaults = GenerateConfig::default();
            let config = GenerateConfig {
                rows: parse_value(matches, "rows", defaults.rows)?,
                cols: parse_value(matches, "cols", defaults.cols)?,
                min_region_size: parse_value(matches, "min_size", defaults.min_region_size)?,
                max_region_size: parse_value(matches, "max_size", defaults.max_region_size)?,
                ensure_unique: !matches.is_present("allow_multiple"),
                max_region_attempts: parse_value(
                    matches,
                    "max_attempts",
                    defaults.max_region_attempts,
                )?,
                max_partition_attempts: defaults.max_partition_attempts,
            };
            Source::Generate(Generate {
                count: parse_value(matches, "count", 1)?,
                seed: matches
                    .value_of("seed")
                    .map(|s| s.parse::<u64>())
                    .transpose()
                    .map_err(|e| anyhow!("invalid seed: {}", e))?,
                config,
            })
        };
        Ok(Self {
            output_path: matches.value_of("output_path").map(PathBuf::from),
            source,
        })
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn source(&self) -> &Source {
        &self.source
    }
}

#[derive(Clone)]
pub(crate) enum Source {
    File(PathBuf),
    Generate(Generate),
}

#[derive(Clone)]
pub(crate) struct Generate {
    pub count: u32,
    pub seed: Option<u64>,
    pub config: GenerateConfig,
}

fn parse_value<T>(matches: &ArgMatches<'_>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match matches.value_of(name) {
        None => Ok(default),
        Some(s) => s
            .parse::<T>()
            .map_err(|e| anyhow!("invalid value for {}: \"{}\" ({})", name, s, e)),
    }
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg, ArgGroup};

    App::new("LITS")
        .author("Cameron Steffen <cam.steffen94@gmail.com>")
        .about("Generate and solve LITS puzzles")
        .setting(AppSettings::ArgRequiredElseHelp)
        .group(
            ArgGroup::with_name("source")
                .args(&["generate", "input"])
                .required(true),
        )
        .arg(
            Arg::with_name("generate")
                .short("g")
                .long("generate")
                .help("generate LITS puzzle(s)")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .help("read a region map from a file and solve it")
                .display_order(1),
        )
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("rows")
                .takes_value(true)
                .value_name("ROWS")
                .requires("generate")
                .help("the number of rows of the generated puzzle"),
        )
        .arg(
            Arg::with_name("cols")
                .short("c")
                .long("cols")
                .takes_value(true)
                .value_name("COLS")
                .requires("generate")
                .help("the number of columns of the generated puzzle"),
        )
        .arg(
            Arg::with_name("min_size")
                .long("min-size")
                .takes_value(true)
                .value_name("CELLS")
                .requires("generate")
                .help("the minimum number of cells in a region"),
        )
        .arg(
            Arg::with_name("max_size")
                .long("max-size")
                .takes_value(true)
                .value_name("CELLS")
                .requires("generate")
                .help("the maximum number of cells in a region"),
        )
        .arg(
            Arg::with_name("count")
                .short("n")
                .long("count")
                .takes_value(true)
                .requires("generate")
                .help("the number of puzzles to generate"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .requires("generate")
                .help("seed the random number generator"),
        )
        .arg(
            Arg::with_name("allow_multiple")
                .long("allow-multiple")
                .requires("generate")
                .help("accept puzzles with more than one solution"),
        )
        .arg(
            Arg::with_name("max_attempts")
                .long("max-attempts")
                .takes_value(true)
                .requires("generate")
                .help("the number of region maps to try for each puzzle"),
        )
        .arg(
            Arg::with_name("output_path")
                .long("output-path")
                .short("o")
                .takes_value(true)
                .value_name("DIR")
                .requires("generate")
                .help("directory to save generated puzzles"),
        )
}
