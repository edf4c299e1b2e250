use std::fmt::{Display, Formatter};
use std::{fmt, io};

use thiserror::Error;

use crate::puzzle::RegionId;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while generating or solving puzzles
#[derive(Error, Debug)]
pub enum Error {
    /// The requested dimensions or region size bounds cannot produce a puzzle
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// No spanning tree could be cut into regions within the size bounds
    #[error("no region partition found after {attempts} attempts")]
    RegionGenerationFailed { attempts: usize },
    /// A region map contains a region that no tetromino fits in
    #[error("region {region} has no legal tetromino placement")]
    RegionInfeasible { region: RegionId },
    /// The search space was exhausted without finding a solution
    #[error("no solution exists for the region map")]
    NoSolutionFound,
    /// The region map does not have exactly one solution
    #[error("expected exactly one solution, found {}", describe_count(.found))]
    NotUnique { found: usize },
    /// A data structure was built in a way that breaks its contract. This is a bug.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// The generator used its whole retry budget
    #[error("failed to generate a puzzle after {attempts} attempts")]
    RetriesExhausted {
        attempts: usize,
        #[source]
        last: Box<Error>,
    },
}

impl Error {
    /// Returns true for the expected generation misses that a fresh random attempt may avoid
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RegionGenerationFailed { .. }
            | Error::RegionInfeasible { .. }
            | Error::NoSolutionFound
            | Error::NotUnique { .. } => true,
            Error::InvalidParameters(_)
            | Error::InvariantViolation(_)
            | Error::RetriesExhausted { .. } => false,
        }
    }

    pub(crate) fn invalid_parameters(msg: impl Into<String>) -> Self {
        Error::InvalidParameters(msg.into())
    }

    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Error::InvariantViolation(msg.into())
    }
}

fn describe_count(found: &usize) -> String {
    if *found >= 2 {
        "multiple".to_string()
    } else {
        found.to_string()
    }
}

#[derive(Error, Debug)]
pub enum PuzzleFromFileError {
    #[error("error reading puzzle file")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Invalid(#[from] Error),
}

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ParseError {
    kind: ParseErrorKind,
    token: Option<String>,
    line: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, token: impl Display, line: usize) -> Self {
        Self {
            kind,
            token: Some(token.to_string()),
            line: Some(line),
        }
    }

    pub(crate) fn at_line(kind: ParseErrorKind, line: usize) -> Self {
        Self {
            kind,
            token: None,
            line: Some(line),
        }
    }

    pub(crate) const fn from_kind(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            token: None,
            line: None,
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    InvalidDimensions,
    InvalidRegionId,
    InvalidRegionMap,
    RowLength,
    UnexpectedEnd,
    UnexpectedToken,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorKind::InvalidDimensions => "Invalid grid dimensions",
            ParseErrorKind::InvalidRegionId => "Invalid region ID",
            ParseErrorKind::InvalidRegionMap => "Invalid region map",
            ParseErrorKind::RowLength => "Wrong number of cells in row",
            ParseErrorKind::UnexpectedEnd => "Unexpected end",
            ParseErrorKind::UnexpectedToken => "Unexpected token",
        };
        write!(f, "{}", s)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(token) = &self.token {
            write!(f, ": \"{}\"", token)?;
        }
        if let Some(line) = &self.line {
            write!(f, " at line {}", line)?;
        }
        Ok(())
    }
}
