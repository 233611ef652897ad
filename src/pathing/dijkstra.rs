use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::pathing::{MazeSolver, SearchProgress, SolverKind};
use crate::stepper::{StepResult, Stepper};
use crate::utils::{self, FnvHashMap};

/// Dijkstra's shortest path search, every move costing one.
///
/// Cells come off a min priority queue ordered by their distance from the start. A cell can
/// sit in the queue more than once if a shorter route to it turns up; the stale entries are
/// skipped when popped. The goal test happens when the goal comes off the queue.
#[derive(Debug)]
pub struct Dijkstra {
    search: SearchProgress,
    queue: BinaryHeap<Reverse<(u32, GridCoordinate)>>,
    distances: FnvHashMap<GridCoordinate, u32>,
}

impl Dijkstra {
    pub fn new(grid: &mut Grid, start: GridCoordinate) -> Result<Dijkstra> {
        let search = SearchProgress::new(grid, start)?;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start, 0);
        let mut queue = BinaryHeap::new();
        queue.push(Reverse((0, start)));

        Ok(Dijkstra {
            search,
            queue,
            distances,
        })
    }

    /// Distance from the start, None while the cell is still unreached.
    pub fn distance_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }
}

impl Stepper for Dijkstra {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if let Some(result) = self.search.check(grid)? {
            return Ok(result);
        }

        let (distance, cell) = loop {
            match self.queue.pop() {
                Some(Reverse((distance, cell))) => {
                    let best = self.distance_to(cell).unwrap_or(u32::MAX);
                    if distance <= best && !self.search.visited.contains(cell) {
                        break (distance, cell);
                    }
                }
                None => return Ok(self.search.failed(SolverKind::Dijkstra)),
            }
        };
        self.search.current = Some(cell);

        if cell == self.search.goal {
            self.search.visited.insert(cell);
            return Ok(self.search.solved(SolverKind::Dijkstra));
        }
        self.search.visited.insert(cell);

        let next_distance = distance + 1;
        for neighbour in grid.open_neighbours(cell) {
            if self.search.visited.contains(neighbour) {
                continue;
            }
            if next_distance < self.distance_to(neighbour).unwrap_or(u32::MAX) {
                self.distances.insert(neighbour, next_distance);
                self.search.parents.insert(neighbour, cell);
                self.queue.push(Reverse((next_distance, neighbour)));
            }
        }
        Ok(StepResult::Continuing)
    }

    fn is_finished(&self) -> bool {
        self.search.outcome.is_some()
    }
}

impl MazeSolver for Dijkstra {
    fn kind(&self) -> SolverKind {
        SolverKind::Dijkstra
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
