use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::pathing::{MazeSolver, SearchProgress, SolverKind};
use crate::stepper::{StepResult, Stepper};

/// A* search guided by the Manhattan distance to the goal.
///
/// The `g`, `h` and `f` costs and the parent links live in the grid cells, cleared when the
/// solver is created. The open set is a min priority queue on `f = g + h`. The goal is
/// recognised as soon as it is discovered among the neighbours of the expanded cell rather
/// than when it is expanded itself.
#[derive(Debug)]
pub struct AStar {
    search: SearchProgress,
    open: BinaryHeap<Reverse<(OrderedFloat<f32>, GridCoordinate)>>,
}

impl AStar {
    pub fn new(grid: &mut Grid, start: GridCoordinate) -> Result<AStar> {
        let search = SearchProgress::new(grid, start)?;

        let h = heuristic(start, search.goal);
        let start_cell = grid.cell_mut(start).ok_or(ErrorKind::InvalidGridCoordinate(start))?;
        start_cell.g = 0.0;
        start_cell.h = h;
        start_cell.f = h;

        let mut open = BinaryHeap::new();
        open.push(Reverse((OrderedFloat(h), start)));
        Ok(AStar { search, open })
    }

    fn solved(&mut self, grid: &Grid) -> StepResult {
        self.search.solved_along(SolverKind::AStar,
                                 |coord| grid.cell(coord).and_then(|cell| cell.parent))
    }
}

fn heuristic(from: GridCoordinate, goal: GridCoordinate) -> f32 {
    from.manhattan_distance(goal) as f32
}

impl Stepper for AStar {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if let Some(result) = self.search.check(grid)? {
            return Ok(result);
        }

        // Outdated queue entries are skipped without spending a step on them.
        let (cell, cell_g) = loop {
            let Reverse((OrderedFloat(f), cell)) = match self.open.pop() {
                Some(entry) => entry,
                None => return Ok(self.search.failed(SolverKind::AStar)),
            };
            let (cell_g, cell_f) = match grid.cell(cell) {
                Some(c) => (c.g, c.f),
                None => return Err(ErrorKind::InvalidGridCoordinate(cell).into()),
            };
            if f <= cell_f && !self.search.visited.contains(cell) {
                break (cell, cell_g);
            }
        };
        self.search.current = Some(cell);
        self.search.visited.insert(cell);

        if cell == self.search.goal {
            return Ok(self.solved(grid));
        }

        let goal = self.search.goal;
        for neighbour in grid.open_neighbours(cell) {
            if self.search.visited.contains(neighbour) {
                continue;
            }
            let tentative_g = cell_g + 1.0;
            let neighbour_cell = grid.cell_mut(neighbour).ok_or(ErrorKind::InvalidGridCoordinate(neighbour))?;
            if tentative_g < neighbour_cell.g {
                neighbour_cell.g = tentative_g;
                neighbour_cell.h = heuristic(neighbour, goal);
                neighbour_cell.f = neighbour_cell.g + neighbour_cell.h;
                neighbour_cell.parent = Some(cell);

                if neighbour == goal {
                    self.search.visited.insert(neighbour);
                    self.search.current = Some(neighbour);
                    return Ok(self.solved(grid));
                }
                self.open.push(Reverse((OrderedFloat(neighbour_cell.f), neighbour)));
            }
        }
        Ok(StepResult::Continuing)
    }

    fn is_finished(&self) -> bool {
        self.search.outcome.is_some()
    }
}

impl MazeSolver for AStar {
    fn kind(&self) -> SolverKind {
        SolverKind::AStar
    }

    fn start(&self) -> GridCoordinate {
        self.search.start
    }

    fn goal(&self) -> GridCoordinate {
        self.search.goal
    }

    fn current(&self) -> Option<GridCoordinate> {
        self.search.current
    }

    fn visited(&self) -> Vec<GridCoordinate> {
        self.search.visited_cells()
    }

    fn path(&self) -> &[GridCoordinate] {
        &self.search.path
    }
}
