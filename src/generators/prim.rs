use error_chain::bail;
use log::{debug, info};
use rand::Rng;
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::generators::{GeneratorKind, MazeGenerator};
use crate::grid::Grid;
use crate::stepper::{ensure_grid_shape, StepResult, Stepper};

/// Randomised Prim's algorithm.
///
/// The maze grows outwards from the start cell. The frontier holds the walls between the
/// maze and the cells next to it. Each step takes out a random frontier wall and if exactly
/// one side of it is in the maze it is knocked down, pulling the other cell into the maze and
/// adding that cell's walls to the frontier. Mazes come out with lots of short dead ends
/// radiating from the start.
#[derive(Debug)]
pub struct Prim {
    shape: (usize, usize),
    frontier: Vec<(GridCoordinate, GridCoordinate)>,
    rng: XorShiftRng,
    complete: bool,
}

impl Prim {
    pub fn new(grid: &mut Grid, start: GridCoordinate, rng: XorShiftRng) -> Result<Prim> {
        if !grid.is_valid_coordinate(start) {
            bail!(ErrorKind::InvalidGridCoordinate(start));
        }
        grid.reset_visited();
        grid.set_visited(start, true)?;

        Ok(Prim {
            shape: grid.shape(),
            frontier: grid.walls_as_edges(start).into_vec(),
            rng,
            complete: false,
        })
    }

    pub fn frontier(&self) -> &[(GridCoordinate, GridCoordinate)] {
        &self.frontier
    }
}

impl Stepper for Prim {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if self.complete {
            return Ok(StepResult::Complete);
        }
        ensure_grid_shape(self.shape, grid)?;

        if self.frontier.is_empty() {
            info!("prim complete, {} cells in the maze", grid.visited_count());
            self.complete = true;
            return Ok(StepResult::Complete);
        }

        let index = self.rng.gen_range(0..self.frontier.len());
        let (a, b) = self.frontier.swap_remove(index);

        let outside = match (grid.is_visited(a), grid.is_visited(b)) {
            (true, false) => Some(b),
            (false, true) => Some(a),
            _ => None,
        };

        match outside {
            Some(new_cell) => {
                grid.remove_wall(a, b)?;
                grid.set_visited(new_cell, true)?;
                let new_walls = grid.walls_as_edges(new_cell)
                    .into_iter()
                    .filter(|&(_, neighbour)| !grid.is_visited(neighbour));
                self.frontier.extend(new_walls);
            }
            None => debug!("discarding frontier wall {} | {}", a, b),
        }
        Ok(StepResult::Continuing)
    }

    fn is_finished(&self) -> bool {
        self.complete
    }
}

impl MazeGenerator for Prim {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Prim
    }

    fn current(&self) -> Option<GridCoordinate> {
        None
    }

    fn active_cells(&self) -> Vec<GridCoordinate> {
        self.frontier.iter().map(|&(_, outer)| outer).collect()
    }
}
