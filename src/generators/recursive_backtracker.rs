use error_chain::bail;
use log::{debug, info};
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::generators::{GeneratorKind, MazeGenerator};
use crate::grid::Grid;
use crate::stepper::{ensure_grid_shape, StepResult, Stepper};

/// Recursive backtracker, a randomised depth first search run with an explicit stack.
///
/// From the current cell carve into a random unvisited neighbour and remember where we came
/// from. When the current cell has no unvisited neighbours pop back to the most recent cell
/// that might. The stack empties once every cell has been visited. Mazes come out with long
/// twisting corridors and few dead ends.
#[derive(Debug)]
pub struct RecursiveBacktracker {
    shape: (usize, usize),
    current: GridCoordinate,
    stack: Vec<GridCoordinate>,
    rng: XorShiftRng,
    complete: bool,
}

impl RecursiveBacktracker {
    pub fn new(grid: &mut Grid, start: GridCoordinate, rng: XorShiftRng) -> Result<RecursiveBacktracker> {
        if !grid.is_valid_coordinate(start) {
            bail!(ErrorKind::InvalidGridCoordinate(start));
        }
        grid.reset_visited();

        Ok(RecursiveBacktracker {
            shape: grid.shape(),
            current: start,
            stack: Vec::with_capacity(grid.size()),
            rng,
            complete: false,
        })
    }

    pub fn stack(&self) -> &[GridCoordinate] {
        &self.stack
    }
}

impl Stepper for RecursiveBacktracker {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if self.complete {
            return Ok(StepResult::Complete);
        }
        ensure_grid_shape(self.shape, grid)?;

        grid.set_visited(self.current, true)?;

        if let Some(next) = grid.random_neighbour(self.current, false, &mut self.rng) {
            self.stack.push(self.current);
            grid.remove_wall(self.current, next)?;
            grid.set_visited(next, true)?;
            self.current = next;
        } else if let Some(previous) = self.stack.pop() {
            debug!("backtracking from {} to {}", self.current, previous);
            self.current = previous;
        } else {
            info!("recursive backtracker complete, {} cells visited", grid.visited_count());
            self.complete = true;
            return Ok(StepResult::Complete);
        }
        Ok(StepResult::Continuing)
    }

    fn is_finished(&self) -> bool {
        self.complete
    }
}

impl MazeGenerator for RecursiveBacktracker {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::RecursiveBacktracker
    }

    fn current(&self) -> Option<GridCoordinate> {
        if self.complete { None } else { Some(self.current) }
    }

    fn active_cells(&self) -> Vec<GridCoordinate> {
        self.stack.clone()
    }
}

#[cfg(test)]
mod tests {

    use rand::SeedableRng;

    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    #[test]
    fn invalid_start_is_rejected() {
        let mut grid = Grid::new(ColumnsCount(3), RowsCount(3)).unwrap();
        let rng = XorShiftRng::seed_from_u64(1);
        assert!(RecursiveBacktracker::new(&mut grid, GridCoordinate::new(3, 0), rng).is_err());
    }

    #[test]
    fn every_step_carves_or_backtracks() {
        let (cols, rows) = (5, 4);
        let mut grid = Grid::new(ColumnsCount(cols), RowsCount(rows)).unwrap();
        let rng = XorShiftRng::seed_from_u64(11);
        let mut generator = RecursiveBacktracker::new(&mut grid, GridCoordinate::new(2, 2), rng).unwrap();

        let mut steps = 0;
        while generator.step(&mut grid).unwrap() == StepResult::Continuing {
            steps += 1;
            // the stack only ever holds the route back to the start
            assert!(generator.stack().len() < cols * rows);
        }
        // one carve into each of the other cells, one backtrack for each carve
        assert_eq!(steps, 2 * (cols * rows - 1));
        assert_eq!(grid.visited_count(), cols * rows);
        assert!(generator.stack().is_empty());
        assert_eq!(generator.current(), None);
    }

    #[test]
    fn single_cell_grid() {
        let mut grid = Grid::new(ColumnsCount(1), RowsCount(1)).unwrap();
        let rng = XorShiftRng::seed_from_u64(1);
        let mut generator = RecursiveBacktracker::new(&mut grid, GridCoordinate::new(0, 0), rng).unwrap();
        assert_eq!(generator.step(&mut grid).unwrap(), StepResult::Complete);
        assert!(grid.is_visited(GridCoordinate::new(0, 0)));
    }
}
