use log::{debug, info};
use rand::seq::SliceRandom;
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::generators::{GeneratorKind, MazeGenerator};
use crate::grid::Grid;
use crate::stepper::{ensure_grid_shape, StepResult, Stepper};
use crate::union_find::DisjointSet;

/// Randomised Kruskal's algorithm.
///
/// Every interior wall goes into a shuffled list and each cell starts in a set of its own.
/// One wall is taken from the list per step: if the cells either side of it are in different
/// sets the wall comes down and the sets merge, otherwise the wall stays since removing it
/// would close a loop. Done when the list runs out.
#[derive(Debug)]
pub struct Kruskal {
    shape: (usize, usize),
    walls: Vec<(GridCoordinate, GridCoordinate)>,
    sets: DisjointSet,
    complete: bool,
}

impl Kruskal {
    pub fn new(grid: &mut Grid, mut rng: XorShiftRng) -> Kruskal {
        grid.reset_visited();
        let mut walls = grid.all_walls();
        walls.shuffle(&mut rng);

        Kruskal {
            shape: grid.shape(),
            walls,
            sets: DisjointSet::new(grid.columns(), grid.rows()),
            complete: false,
        }
    }

    pub fn walls_remaining(&self) -> usize {
        self.walls.len()
    }
}

impl Stepper for Kruskal {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if self.complete {
            return Ok(StepResult::Complete);
        }
        ensure_grid_shape(self.shape, grid)?;

        match self.walls.pop() {
            Some((a, b)) => {
                if self.sets.union(a, b)? {
                    grid.remove_wall(a, b)?;
                    grid.set_visited(a, true)?;
                    grid.set_visited(b, true)?;
                } else {
                    debug!("keeping wall {} | {}", a, b);
                }
                Ok(StepResult::Continuing)
            }
            None => {
                info!("kruskal complete, {} passages carved", grid.links_count());
                self.complete = true;
                Ok(StepResult::Complete)
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.complete
    }
}

impl MazeGenerator for Kruskal {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Kruskal
    }

    fn current(&self) -> Option<GridCoordinate> {
        self.walls.last().map(|&(a, _)| a)
    }

    fn active_cells(&self) -> Vec<GridCoordinate> {
        self.walls.last().map_or_else(Vec::new, |&(a, b)| vec![a, b])
    }
}
