use crate::errors::*;
use crate::grid::Grid;

/// Outcome of advancing a stepper by one unit of work.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StepResult {
    Continuing,
    Complete,
    /// A solver ran out of cells to explore without reaching the goal.
    Failed,
}

impl StepResult {
    #[inline]
    pub fn is_finished(self) -> bool {
        self != StepResult::Continuing
    }
}

/// An algorithm that runs a little at a time, one call to `step` per tick of some outside
/// loop. Steppers never own the grid they work on, it is lent to every call. Once finished
/// every further `step` reports the same terminal result without touching the grid.
pub trait Stepper {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult>;

    fn is_finished(&self) -> bool;
}

/// Rejects a grid whose dimensions differ from the ones a stepper was set up with.
pub fn ensure_grid_shape(expected: (usize, usize), grid: &Grid) -> Result<()> {
    let found = grid.shape();
    if found == expected {
        Ok(())
    } else {
        Err(ErrorKind::GridSizeMismatch(expected, found).into())
    }
}

/// Step until finished. Returns the terminal result and the number of steps taken.
pub fn run_to_completion<S>(stepper: &mut S, grid: &mut Grid) -> Result<(StepResult, usize)>
    where S: Stepper + ?Sized
{
    let mut steps = 0;
    loop {
        let result = stepper.step(grid)?;
        steps += 1;
        if result.is_finished() {
            return Ok((result, steps));
        }
    }
}
