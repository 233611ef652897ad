use error_chain::bail;
use log::{debug, info};
use rand::Rng;
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::generators::{GeneratorKind, MazeGenerator};
use crate::grid::Grid;
use crate::stepper::{ensure_grid_shape, StepResult, Stepper};
use crate::utils::{self, CellBitSet};

/// Where Wilson's algorithm is between two steps.
#[derive(Debug, Clone, PartialEq)]
pub enum WilsonState {
    /// About to start a fresh random walk from a cell not yet in the maze.
    PickingStart,
    /// Part way through a loop erased random walk. `walk` never repeats a cell and ends at
    /// `current`.
    Walking {
        walk: Vec<GridCoordinate>,
        current: GridCoordinate,
    },
}

/// Wilson's algorithm, loop erased random walks.
///
/// One cell starts out in the maze. Repeatedly pick a cell outside the maze and wander at
/// random until the walk bumps into the maze. Whenever the walk crosses itself the loop it
/// just made is erased. On reaching the maze the walk is carved in as a passage. Every
/// spanning tree of the grid is equally likely to come out, unlike the other algorithms
/// which all have a bias. Slow to get going since the first walks have a single cell to
/// find.
#[derive(Debug)]
pub struct Wilson {
    shape: (usize, usize),
    remaining: Vec<GridCoordinate>,
    in_maze: CellBitSet,
    state: WilsonState,
    rng: XorShiftRng,
    complete: bool,
}

impl Wilson {
    pub fn new(grid: &mut Grid, start: GridCoordinate, rng: XorShiftRng) -> Result<Wilson> {
        if !grid.is_valid_coordinate(start) {
            bail!(ErrorKind::InvalidGridCoordinate(start));
        }
        grid.reset_visited();
        grid.set_visited(start, true)?;

        let mut in_maze = CellBitSet::for_grid(grid);
        in_maze.insert(start);
        let remaining: Vec<GridCoordinate> = grid.iter().filter(|coord| *coord != start).collect();

        Ok(Wilson {
            shape: grid.shape(),
            complete: remaining.is_empty(),
            remaining,
            in_maze,
            state: WilsonState::PickingStart,
            rng,
        })
    }

    pub fn state(&self) -> &WilsonState {
        &self.state
    }

    /// Cells not yet part of the maze.
    pub fn remaining(&self) -> &[GridCoordinate] {
        &self.remaining
    }

    fn pick_start(&mut self, grid: &mut Grid) -> Result<()> {
        let index = self.rng.gen_range(0..self.remaining.len());
        let start = self.remaining[index];
        grid.set_visited(start, true)?;
        debug!("random walk from {}", start);

        self.state = WilsonState::Walking {
            walk: vec![start],
            current: start,
        };
        Ok(())
    }

    fn walk(&mut self,
            grid: &mut Grid,
            mut walk: Vec<GridCoordinate>,
            current: GridCoordinate)
            -> Result<()> {
        let next = match grid.random_neighbour(current, true, &mut self.rng) {
            Some(next) => next,
            None => bail!(ErrorKind::InvalidGridCoordinate(current)),
        };

        if let Some(loop_start) = walk.iter().position(|&coord| coord == next) {
            debug!("erasing loop of {} cells back to {}", walk.len() - loop_start - 1, next);
            walk.truncate(loop_start + 1);
            self.state = WilsonState::Walking { walk, current: next };
        } else if self.in_maze.contains(next) {
            self.carve(grid, &walk, next)?;
            self.state = WilsonState::PickingStart;
        } else {
            walk.push(next);
            self.state = WilsonState::Walking { walk, current: next };
        }
        Ok(())
    }

    fn carve(&mut self, grid: &mut Grid, walk: &[GridCoordinate], maze_cell: GridCoordinate) -> Result<()> {
        for pair in walk.windows(2) {
            grid.remove_wall(pair[0], pair[1])?;
        }
        if let Some(&last) = walk.last() {
            grid.remove_wall(last, maze_cell)?;
        }

        let mut carved = utils::fnv_hashset(walk.len());
        for &coord in walk {
            grid.set_visited(coord, true)?;
            self.in_maze.insert(coord);
            carved.insert(coord);
        }
        self.remaining.retain(|coord| !carved.contains(coord));
        debug!("carved a walk of {} cells, {} cells remaining", walk.len(), self.remaining.len());
        Ok(())
    }
}

impl Stepper for Wilson {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if self.complete {
            return Ok(StepResult::Complete);
        }
        ensure_grid_shape(self.shape, grid)?;

        match std::mem::replace(&mut self.state, WilsonState::PickingStart) {
            WilsonState::PickingStart => self.pick_start(grid)?,
            WilsonState::Walking { walk, current } => self.walk(grid, walk, current)?,
        }

        if self.remaining.is_empty() {
            info!("wilson complete, {} cells in the maze", self.in_maze.len());
            self.complete = true;
            Ok(StepResult::Complete)
        } else {
            Ok(StepResult::Continuing)
        }
    }

    fn is_finished(&self) -> bool {
        self.complete
    }
}

impl MazeGenerator for Wilson {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Wilson
    }

    fn current(&self) -> Option<GridCoordinate> {
        match self.state {
            WilsonState::Walking { current, .. } => Some(current),
            WilsonState::PickingStart => None,
        }
    }

    fn active_cells(&self) -> Vec<GridCoordinate> {
        match self.state {
            WilsonState::Walking { ref walk, .. } => walk.clone(),
            WilsonState::PickingStart => vec![],
        }
    }
}
