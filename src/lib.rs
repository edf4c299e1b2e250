//! Generate and solve LITS puzzles

#![warn(rust_2018_idioms)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod error;
pub mod puzzle;

pub use crate::error::{Error, Result};
