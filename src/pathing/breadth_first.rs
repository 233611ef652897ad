use std::collections::VecDeque;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::pathing::{MazeSolver, SearchProgress, SolverKind};
use crate::stepper::{StepResult, Stepper};

/// Breadth first search. Explores in rings of equal distance from the start so the first
/// route found to the goal has the fewest moves.
#[derive(Debug)]
pub struct BreadthFirst {
    search: SearchProgress,
    queue: VecDeque<GridCoordinate>,
}

impl BreadthFirst {
    pub fn new(grid: &mut Grid, start: GridCoordinate) -> Result<BreadthFirst> {
        let search = SearchProgress::new(grid, start)?;
        let mut queue = VecDeque::with_capacity(grid.columns().0 + grid.rows().0);
        queue.push_back(start);
        Ok(BreadthFirst { search, queue })
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl Stepper for BreadthFirst {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if let Some(result) = self.search.check(grid)? {
            return Ok(result);
        }

        let cell = match self.queue.pop_front() {
            Some(cell) => cell,
            None => return Ok(self.search.failed(SolverKind::BreadthFirst)),
        };
        if !self.search.visited.insert(cell) {
            return Ok(StepResult::Continuing);
        }
        self.search.current = Some(cell);

        if cell == self.search.goal {
            return Ok(self.search.solved(SolverKind::BreadthFirst));
        }

        for neighbour in grid.open_neighbours(cell) {
            if self.search.visited.contains(neighbour) {
                continue;
            }
            // First discovery wins, it is the closest to the start.
            let discovered = neighbour == self.search.start || self.search.parents.contains_key(&neighbour);
            if !discovered {
                self.search.parents.insert(neighbour, cell);
                self.queue.push_back(neighbour);
            }
        }
        Ok(StepResult::Continuing)
    }

    fn is_finished(&self) -> bool {
        self.search.outcome.is_some()
    }
}

impl MazeSolver for BreadthFirst {
    fn kind(&self) -> SolverKind {
        SolverKind::BreadthFirst
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

#[cfg(test)]
mod tests {

    use super::*;
    use crate::pathing::tests::open_grid;

    #[test]
    fn explores_in_rings() {
        let mut grid = open_grid(4, 4);
        let start = GridCoordinate::new(0, 0);
        let mut solver = BreadthFirst::new(&mut grid, start).unwrap();
        let mut last_distance = 0;
        while solver.step(&mut grid).unwrap() == StepResult::Continuing {
            let distance = solver.current().unwrap().manhattan_distance(start);
            assert!(distance >= last_distance);
            last_distance = distance;
        }
        assert_eq!(solver.path().len(), 7);
    }

    #[test]
    fn cells_are_queued_once() {
        let mut grid = open_grid(5, 5);
        let mut solver = BreadthFirst::new(&mut grid, GridCoordinate::new(0, 0)).unwrap();
        let mut steps = 0;
        while solver.step(&mut grid).unwrap() == StepResult::Continuing {
            steps += 1;
            assert!(solver.queued() <= 25);
        }
        // every step visits a new cell and the goal is the last of them
        assert_eq!(steps + 1, solver.visited().len());
        assert_eq!(solver.visited().len(), 25);
    }
}
