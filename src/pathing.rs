//! Maze solvers. Each solver is a `Stepper` searching from a start cell to the goal in the
//! bottom right corner, moving only through removed walls. Reaching the goal rebuilds the
//! path by following parent links back to the start.

use std::fmt;
use std::str::FromStr;

use error_chain::bail;
use log::info;
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::stepper::{ensure_grid_shape, StepResult, Stepper};
use crate::utils::{self, CellBitSet, FnvHashMap};

pub mod a_star;
pub mod breadth_first;
pub mod depth_first;
pub mod dijkstra;
pub mod random_mouse;

pub use self::a_star::AStar;
pub use self::breadth_first::BreadthFirst;
pub use self::depth_first::DepthFirst;
pub use self::dijkstra::Dijkstra;
pub use self::random_mouse::RandomMouse;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SolverKind {
    DepthFirst,
    BreadthFirst,
    Dijkstra,
    AStar,
    RandomMouse,
}

pub const ALL_SOLVERS: [SolverKind; 5] = [SolverKind::DepthFirst,
                                          SolverKind::BreadthFirst,
                                          SolverKind::Dijkstra,
                                          SolverKind::AStar,
                                          SolverKind::RandomMouse];

impl SolverKind {
    pub fn name(self) -> &'static str {
        match self {
            SolverKind::DepthFirst => "dfs",
            SolverKind::BreadthFirst => "bfs",
            SolverKind::Dijkstra => "dijkstra",
            SolverKind::AStar => "a_star",
            SolverKind::RandomMouse => "random",
        }
    }
}

impl FromStr for SolverKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<SolverKind> {
        match s.to_lowercase().as_str() {
            "dfs" => Ok(SolverKind::DepthFirst),
            "bfs" => Ok(SolverKind::BreadthFirst),
            "dijkstra" => Ok(SolverKind::Dijkstra),
            "a_star" | "astar" | "a*" => Ok(SolverKind::AStar),
            "random" | "random-mouse" | "random_mouse" => Ok(SolverKind::RandomMouse),
            _ => Err(ErrorKind::UnknownAlgorithm(s.to_string()).into()),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A solving stepper plus the search state a display wants to show.
pub trait MazeSolver: Stepper {
    fn kind(&self) -> SolverKind;

    fn start(&self) -> GridCoordinate;

    fn goal(&self) -> GridCoordinate;

    /// The cell most recently taken off the frontier.
    fn current(&self) -> Option<GridCoordinate>;

    /// Cells explored so far.
    fn visited(&self) -> Vec<GridCoordinate>;

    /// Start to goal inclusive once solved, empty before that or after failing.
    fn path(&self) -> &[GridCoordinate];

    fn is_solved(&self) -> bool {
        !self.path().is_empty()
    }
}

/// Set up a solver from `start` to the bottom right cell of `grid`. The random number
/// generator is only used by the random mouse.
pub fn new_solver(kind: SolverKind,
                  grid: &mut Grid,
                  start: GridCoordinate,
                  rng: XorShiftRng)
                  -> Result<Box<dyn MazeSolver>> {
    Ok(match kind {
        SolverKind::DepthFirst => Box::new(DepthFirst::new(grid, start)?),
        SolverKind::BreadthFirst => Box::new(BreadthFirst::new(grid, start)?),
        SolverKind::Dijkstra => Box::new(Dijkstra::new(grid, start)?),
        SolverKind::AStar => Box::new(AStar::new(grid, start)?),
        SolverKind::RandomMouse => Box::new(RandomMouse::new(grid, start, rng)?),
    })
}

/// Walk parent links back from `end` until `start`, returning the route start first.
/// None if the links do not lead back to `start`.
pub fn reconstruct_path<F>(start: GridCoordinate,
                           end: GridCoordinate,
                           cells_count: usize,
                           parent_of: F)
                           -> Option<Vec<GridCoordinate>>
    where F: Fn(GridCoordinate) -> Option<GridCoordinate>
{
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        // a route longer than the grid has looped
        if path.len() > cells_count {
            return None;
        }
        current = parent_of(current)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

/// Bookkeeping shared by the frontier based solvers: visited cells, parent links and how the
/// search ended.
#[derive(Debug, Clone)]
pub(crate) struct SearchProgress {
    pub shape: (usize, usize),
    pub start: GridCoordinate,
    pub goal: GridCoordinate,
    pub visited: CellBitSet,
    pub parents: FnvHashMap<GridCoordinate, GridCoordinate>,
    pub current: Option<GridCoordinate>,
    pub path: Vec<GridCoordinate>,
    pub outcome: Option<StepResult>,
}

impl SearchProgress {
    /// Also clears the per cell solver scratch left behind by any earlier solve.
    pub fn new(grid: &mut Grid, start: GridCoordinate) -> Result<SearchProgress> {
        if !grid.is_valid_coordinate(start) {
            bail!(ErrorKind::InvalidGridCoordinate(start));
        }
        grid.reset_solver_scratch();
        Ok(SearchProgress {
            shape: grid.shape(),
            start,
            goal: grid.bottom_right(),
            visited: CellBitSet::for_grid(grid),
            parents: utils::fnv_hashmap(grid.size()),
            current: None,
            path: vec![],
            outcome: None,
        })
    }

    /// The terminal result if the search is over, after checking the grid still fits.
    pub fn check(&self, grid: &Grid) -> Result<Option<StepResult>> {
        if self.outcome.is_some() {
            return Ok(self.outcome);
        }
        ensure_grid_shape(self.shape, grid)?;
        Ok(None)
    }

    pub fn solved(&mut self, solver: SolverKind) -> StepResult {
        let parents = std::mem::take(&mut self.parents);
        let result = self.solved_along(solver, |coord| parents.get(&coord).cloned());
        self.parents = parents;
        result
    }

    /// Finish at the goal, rebuilding the path from parent links kept outside the search.
    pub fn solved_along<F>(&mut self, solver: SolverKind, parent_of: F) -> StepResult
        where F: Fn(GridCoordinate) -> Option<GridCoordinate>
    {
        let cells_count = self.shape.0 * self.shape.1;
        match reconstruct_path(self.start, self.goal, cells_count, parent_of) {
            Some(path) => {
                info!("{} solved the maze, path of {} cells after visiting {}",
                      solver,
                      path.len(),
                      self.visited.len());
                self.path = path;
                self.finish(StepResult::Complete)
            }
            None => self.failed(solver),
        }
    }

    pub fn failed(&mut self, solver: SolverKind) -> StepResult {
        info!("{} found no path from {} to {}", solver, self.start, self.goal);
        self.path.clear();
        self.finish(StepResult::Failed)
    }

    fn finish(&mut self, result: StepResult) -> StepResult {
        self.outcome = Some(result);
        result
    }

    pub fn visited_cells(&self) -> Vec<GridCoordinate> {
        self.visited.iter().collect()
    }
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;

    use super::*;
    use crate::generators::{new_generator, ALL_GENERATORS};
    use crate::stepper::run_to_completion;
    use crate::units::{ColumnsCount, RowsCount};

    pub(crate) fn generated_maze(cols: usize, rows: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(ColumnsCount(cols), RowsCount(rows)).unwrap();
        let kind = ALL_GENERATORS[seed as usize % ALL_GENERATORS.len()];
        let rng = XorShiftRng::seed_from_u64(seed);
        let mut generator = new_generator(kind, &mut grid, GridCoordinate::new(0, 0), rng).unwrap();
        let _ = run_to_completion(&mut *generator, &mut grid).unwrap();
        grid
    }

    pub(crate) fn open_grid(cols: usize, rows: usize) -> Grid {
        let mut grid = Grid::new(ColumnsCount(cols), RowsCount(rows)).unwrap();
        for (a, b) in grid.all_walls() {
            grid.remove_wall(a, b).unwrap();
        }
        grid
    }

    fn solve(kind: SolverKind, grid: &mut Grid) -> (StepResult, Vec<GridCoordinate>) {
        let rng = XorShiftRng::seed_from_u64(17);
        let mut solver = new_solver(kind, grid, GridCoordinate::new(0, 0), rng).unwrap();
        let (result, _) = run_to_completion(&mut *solver, grid).unwrap();
        (result, solver.path().to_vec())
    }

    fn is_connected_route(grid: &Grid, path: &[GridCoordinate]) -> bool {
        path.first() == Some(&GridCoordinate::new(0, 0)) &&
        path.last() == Some(&grid.bottom_right()) &&
        path.windows(2).all(|pair| grid.is_linked(pair[0], pair[1]))
    }

    #[test]
    fn names() {
        assert_eq!("a_star".parse::<SolverKind>().unwrap(), SolverKind::AStar);
        assert_eq!("astar".parse::<SolverKind>().unwrap(), SolverKind::AStar);
        assert_eq!("BFS".parse::<SolverKind>().unwrap(), SolverKind::BreadthFirst);
        assert!("flood".parse::<SolverKind>().is_err());
        for kind in ALL_SOLVERS.iter() {
            assert_eq!(kind.name().parse::<SolverKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn path_reconstruction() {
        let gc = |x, y| GridCoordinate::new(x, y);
        let parent_of = |coord: GridCoordinate| match (coord.x, coord.y) {
            (2, 0) => Some(gc(1, 0)),
            (1, 0) => Some(gc(0, 0)),
            _ => None,
        };
        assert_eq!(reconstruct_path(gc(0, 0), gc(2, 0), 3, parent_of),
                   Some(vec![gc(0, 0), gc(1, 0), gc(2, 0)]));
        assert_eq!(reconstruct_path(gc(0, 0), gc(0, 0), 3, parent_of), Some(vec![gc(0, 0)]));
        assert_eq!(reconstruct_path(gc(0, 0), gc(0, 1), 3, parent_of), None);

        let looping = |coord: GridCoordinate| if coord == gc(1, 0) { Some(gc(2, 0)) } else { Some(gc(1, 0)) };
        assert_eq!(reconstruct_path(gc(0, 0), gc(2, 0), 3, looping), None);
    }

    #[test]
    fn every_solver_finds_a_route_through_a_perfect_maze() {
        for kind in ALL_SOLVERS.iter() {
            let mut grid = generated_maze(9, 7, 3);
            let (result, path) = solve(*kind, &mut grid);
            assert_eq!(result, StepResult::Complete, "{}", kind);
            assert!(is_connected_route(&grid, &path), "{}", kind);
        }
    }

    #[test]
    fn shortest_path_solvers_agree() {
        for seed in 0..8 {
            let mut grid = generated_maze(10, 10, seed);
            let (_, bfs) = solve(SolverKind::BreadthFirst, &mut grid);
            let (_, dijkstra) = solve(SolverKind::Dijkstra, &mut grid);
            let (_, a_star) = solve(SolverKind::AStar, &mut grid);
            let (_, dfs) = solve(SolverKind::DepthFirst, &mut grid);
            assert_eq!(bfs.len(), dijkstra.len());
            assert_eq!(bfs.len(), a_star.len());
            // a perfect maze has only the one route
            assert_eq!(bfs, dfs);
        }
    }

    #[test]
    fn open_grid_paths_are_manhattan_length() {
        let mut grid = open_grid(6, 4);
        for kind in &[SolverKind::BreadthFirst, SolverKind::Dijkstra, SolverKind::AStar] {
            let (result, path) = solve(*kind, &mut grid);
            assert_eq!(result, StepResult::Complete);
            // (cols - 1) + (rows - 1) moves
            assert_eq!(path.len() - 1, 5 + 3, "{}", kind);
            assert!(is_connected_route(&grid, &path));
        }
        let (_, path) = solve(SolverKind::DepthFirst, &mut grid);
        assert!(is_connected_route(&grid, &path));
    }

    #[test]
    fn walled_in_start_fails() {
        for kind in ALL_SOLVERS.iter() {
            let mut grid = Grid::new(ColumnsCount(3), RowsCount(3)).unwrap();
            let (result, path) = solve(*kind, &mut grid);
            assert_eq!(result, StepResult::Failed, "{}", kind);
            assert!(path.is_empty());
        }
    }

    #[test]
    fn unreachable_goal_fails() {
        let gc = |x, y| GridCoordinate::new(x, y);
        for kind in &[SolverKind::DepthFirst, SolverKind::BreadthFirst, SolverKind::Dijkstra, SolverKind::AStar] {
            let mut grid = Grid::new(ColumnsCount(3), RowsCount(3)).unwrap();
            grid.remove_wall(gc(0, 0), gc(1, 0)).unwrap();
            grid.remove_wall(gc(1, 0), gc(1, 1)).unwrap();
            grid.remove_wall(gc(1, 1), gc(0, 1)).unwrap();
            let (result, _) = solve(*kind, &mut grid);
            assert_eq!(result, StepResult::Failed, "{}", kind);
        }
    }

    #[test]
    fn single_cell_maze_is_solved_at_the_start() {
        for kind in ALL_SOLVERS.iter() {
            let mut grid = Grid::new(ColumnsCount(1), RowsCount(1)).unwrap();
            let (result, path) = solve(*kind, &mut grid);
            assert_eq!(result, StepResult::Complete, "{}", kind);
            assert_eq!(path, vec![GridCoordinate::new(0, 0)]);
        }
    }

    #[test]
    fn every_step_expands_a_new_cell() {
        for kind in &[SolverKind::DepthFirst, SolverKind::BreadthFirst, SolverKind::Dijkstra, SolverKind::AStar] {
            let mut grid = open_grid(5, 5);
            let rng = XorShiftRng::seed_from_u64(17);
            let mut solver = new_solver(*kind, &mut grid, GridCoordinate::new(0, 0), rng).unwrap();
            let mut expanded = 0;
            while solver.step(&mut grid).unwrap() == StepResult::Continuing {
                expanded += 1;
                assert_eq!(solver.visited().len(), expanded, "{}", kind);
            }
        }
    }

    #[test]
    fn every_solver_starts_from_clean_scratch() {
        for kind in ALL_SOLVERS.iter() {
            let mut grid = generated_maze(6, 6, 5);
            let (result, _) = solve(SolverKind::AStar, &mut grid);
            assert_eq!(result, StepResult::Complete);
            assert!(grid.cells().iter().any(|cell| cell.parent.is_some()));

            let rng = XorShiftRng::seed_from_u64(3);
            let _solver = new_solver(*kind, &mut grid, GridCoordinate::new(5, 0), rng).unwrap();
            let start_g = if *kind == SolverKind::AStar { 0.0 } else { std::f32::INFINITY };
            for cell in grid.cells() {
                if cell.coord == GridCoordinate::new(5, 0) {
                    assert_eq!(cell.g, start_g, "{}", kind);
                } else {
                    assert!(cell.g.is_infinite(), "{}", kind);
                }
                assert_eq!(cell.parent, None, "{}", kind);
            }
        }
    }

    #[test]
    fn finished_solvers_stay_finished() {
        for kind in ALL_SOLVERS.iter() {
            let mut grid = generated_maze(5, 5, 1);
            let rng = XorShiftRng::seed_from_u64(17);
            let mut solver = new_solver(*kind, &mut grid, GridCoordinate::new(0, 0), rng).unwrap();
            let (result, _) = run_to_completion(&mut *solver, &mut grid).unwrap();
            let path = solver.path().to_vec();
            assert_eq!(solver.step(&mut grid).unwrap(), result);
            assert_eq!(solver.path(), &path[..]);
            assert!(solver.is_solved());
        }
    }

    #[test]
    fn invalid_start_or_grid() {
        for kind in ALL_SOLVERS.iter() {
            let mut grid = generated_maze(4, 4, 2);
            let rng = XorShiftRng::seed_from_u64(17);
            assert!(new_solver(*kind, &mut grid, GridCoordinate::new(4, 0), rng.clone()).is_err());

            let mut solver = new_solver(*kind, &mut grid, GridCoordinate::new(0, 0), rng).unwrap();
            let mut other = generated_maze(5, 4, 2);
            assert!(solver.step(&mut other).is_err());
        }
    }

    #[test]
    fn quickcheck_bfs_and_a_star_agree() {
        fn p(seed: u64, cols: u8, rows: u8) -> TestResult {
            let (cols, rows) = (cols as usize % 12 + 1, rows as usize % 12 + 1);
            let mut grid = generated_maze(cols, rows, seed);
            let (bfs_result, bfs) = solve(SolverKind::BreadthFirst, &mut grid);
            let (a_star_result, a_star) = solve(SolverKind::AStar, &mut grid);
            TestResult::from_bool(bfs_result == StepResult::Complete &&
                                  a_star_result == StepResult::Complete &&
                                  bfs.len() == a_star.len())
        }
        quickcheck(p as fn(u64, u8, u8) -> TestResult);
    }
}
