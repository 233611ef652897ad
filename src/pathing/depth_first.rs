use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::pathing::{MazeSolver, SearchProgress, SolverKind};
use crate::stepper::{StepResult, Stepper};

/// Depth first search with an explicit stack. Finds a route, not necessarily the shortest
/// one when the maze has loops.
#[derive(Debug)]
pub struct DepthFirst {
    search: SearchProgress,
    stack: Vec<GridCoordinate>,
}

impl DepthFirst {
    pub fn new(grid: &mut Grid, start: GridCoordinate) -> Result<DepthFirst> {
        let search = SearchProgress::new(grid, start)?;
        Ok(DepthFirst {
            search,
            stack: vec![start],
        })
    }
}

impl Stepper for DepthFirst {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if let Some(result) = self.search.check(grid)? {
            return Ok(result);
        }

        // A cell can be pushed once by each neighbour that saw it unvisited, later copies
        // are dropped here so every step expands a cell.
        let cell = loop {
            match self.stack.pop() {
                Some(cell) if self.search.visited.contains(cell) => continue,
                Some(cell) => break cell,
                None => return Ok(self.search.failed(SolverKind::DepthFirst)),
            }
        };
        self.search.visited.insert(cell);
        self.search.current = Some(cell);

        if cell == self.search.goal {
            return Ok(self.search.solved(SolverKind::DepthFirst));
        }

        for neighbour in grid.open_neighbours(cell) {
            if !self.search.visited.contains(neighbour) {
                self.search.parents.insert(neighbour, cell);
                self.stack.push(neighbour);
            }
        }
        Ok(StepResult::Continuing)
    }

    fn is_finished(&self) -> bool {
        self.search.outcome.is_some()
    }
}

impl MazeSolver for DepthFirst {
    fn kind(&self) -> SolverKind {
        SolverKind::DepthFirst
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
    fn dives_before_spreading() {
        let mut grid = open_grid(3, 3);
        let mut solver = DepthFirst::new(&mut grid, GridCoordinate::new(0, 0)).unwrap();
        let _ = solver.step(&mut grid).unwrap();
        assert_eq!(solver.current(), Some(GridCoordinate::new(0, 0)));
        // open neighbours are pushed right then bottom, so bottom comes off first
        let _ = solver.step(&mut grid).unwrap();
        assert_eq!(solver.current(), Some(GridCoordinate::new(0, 1)));
        let _ = solver.step(&mut grid).unwrap();
        assert_eq!(solver.current(), Some(GridCoordinate::new(0, 2)));
    }

    #[test]
    fn path_follows_passages() {
        let mut grid = open_grid(4, 3);
        let mut solver = DepthFirst::new(&mut grid, GridCoordinate::new(0, 0)).unwrap();
        while solver.step(&mut grid).unwrap() == StepResult::Continuing {}
        let path = solver.path();
        assert_eq!(path.first(), Some(&GridCoordinate::new(0, 0)));
        assert_eq!(path.last(), Some(&GridCoordinate::new(3, 2)));
        assert!(path.windows(2).all(|pair| grid.is_linked(pair[0], pair[1])));
    }
}
