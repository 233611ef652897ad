//! Maze generation algorithms, each one a `Stepper` that carves passages into a fully walled
//! grid a little at a time until the passages form a spanning tree: every cell reachable from
//! every other cell by exactly one route.

use std::fmt;
use std::str::FromStr;

use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::stepper::Stepper;

pub mod kruskal;
pub mod prim;
pub mod recursive_backtracker;
pub mod wilson;

pub use self::kruskal::Kruskal;
pub use self::prim::Prim;
pub use self::recursive_backtracker::RecursiveBacktracker;
pub use self::wilson::{Wilson, WilsonState};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GeneratorKind {
    RecursiveBacktracker,
    Kruskal,
    Prim,
    Wilson,
}

pub const ALL_GENERATORS: [GeneratorKind; 4] = [GeneratorKind::RecursiveBacktracker,
                                                GeneratorKind::Kruskal,
                                                GeneratorKind::Prim,
                                                GeneratorKind::Wilson];

impl GeneratorKind {
    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::RecursiveBacktracker => "dfs",
            GeneratorKind::Kruskal => "kruskal",
            GeneratorKind::Prim => "prim",
            GeneratorKind::Wilson => "wilson",
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<GeneratorKind> {
        match s.to_lowercase().as_str() {
            "dfs" | "recursive-backtracker" | "recursive_backtracker" | "backtracker" => {
                Ok(GeneratorKind::RecursiveBacktracker)
            }
            "kruskal" => Ok(GeneratorKind::Kruskal),
            "prim" => Ok(GeneratorKind::Prim),
            "wilson" => Ok(GeneratorKind::Wilson),
            _ => Err(ErrorKind::UnknownAlgorithm(s.to_string()).into()),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A generation stepper plus what a display wants to know about it mid run.
pub trait MazeGenerator: Stepper {
    fn kind(&self) -> GeneratorKind;

    /// The cell the algorithm is working from, if it has one.
    fn current(&self) -> Option<GridCoordinate>;

    /// Cells in a transient state worth highlighting: the backtracking stack or the
    /// random walk in progress.
    fn active_cells(&self) -> Vec<GridCoordinate>;
}

/// Set up a generator over `grid`, which is expected to be fully walled.
/// `start` is the first cell in the maze for the algorithms that grow from a single cell, it
/// is ignored by Kruskal.
pub fn new_generator(kind: GeneratorKind,
                     grid: &mut Grid,
                     start: GridCoordinate,
                     rng: XorShiftRng)
                     -> Result<Box<dyn MazeGenerator>> {
    Ok(match kind {
        GeneratorKind::RecursiveBacktracker => Box::new(RecursiveBacktracker::new(grid, start, rng)?),
        GeneratorKind::Kruskal => Box::new(Kruskal::new(grid, rng)),
        GeneratorKind::Prim => Box::new(Prim::new(grid, start, rng)?),
        GeneratorKind::Wilson => Box::new(Wilson::new(grid, start, rng)?),
    })
}
