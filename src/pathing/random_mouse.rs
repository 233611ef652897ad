use error_chain::bail;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;

use crate::cells::{GridCoordinate, WallSide, ALL_SIDES};
use crate::errors::*;
use crate::grid::Grid;
use crate::pathing::{MazeSolver, SolverKind};
use crate::stepper::{ensure_grid_shape, StepResult, Stepper};
use crate::utils::CellBitSet;

type SideSmallVec = SmallVec<[WallSide; 4]>;

/// The random mouse: no memory of the maze, just a direction of travel.
///
/// At every cell it carries on through a random open side, straight on being just one of the
/// choices, and only turns back at a dead end. It gets there eventually. The trail
/// behind it has its loops erased as it goes so that it doubles as the route once the goal
/// is reached.
#[derive(Debug)]
pub struct RandomMouse {
    shape: (usize, usize),
    start: GridCoordinate,
    goal: GridCoordinate,
    position: GridCoordinate,
    heading: Option<WallSide>,
    trail: Vec<GridCoordinate>,
    visited: CellBitSet,
    path: Vec<GridCoordinate>,
    rng: XorShiftRng,
    outcome: Option<StepResult>,
}

impl RandomMouse {
    pub fn new(grid: &mut Grid, start: GridCoordinate, rng: XorShiftRng) -> Result<RandomMouse> {
        if !grid.is_valid_coordinate(start) {
            bail!(ErrorKind::InvalidGridCoordinate(start));
        }
        grid.reset_solver_scratch();
        let mut visited = CellBitSet::for_grid(grid);
        visited.insert(start);

        Ok(RandomMouse {
            shape: grid.shape(),
            start,
            goal: grid.bottom_right(),
            position: start,
            heading: None,
            trail: vec![start],
            visited,
            path: vec![],
            rng,
            outcome: None,
        })
    }

    pub fn heading(&self) -> Option<WallSide> {
        self.heading
    }

    /// Any open side except the one it came in through, picked at random. Turning back only
    /// happens at a dead end.
    fn choose_heading(&mut self, open: &[WallSide]) -> Option<WallSide> {
        let back = match self.heading {
            Some(heading) => heading.opposite(),
            None => return open.choose(&mut self.rng).cloned(),
        };

        let onwards: SideSmallVec = open.iter().cloned().filter(|side| *side != back).collect();
        if let Some(side) = onwards.choose(&mut self.rng) {
            return Some(*side);
        }
        if open.contains(&back) {
            debug!("dead end at {}, turning back", self.position);
            return Some(back);
        }
        None
    }

    fn finish(&mut self, result: StepResult) -> StepResult {
        match result {
            StepResult::Complete => {
                info!("random mouse reached {} after exploring {} cells", self.goal, self.visited.len());
                self.path = self.trail.clone();
            }
            _ => info!("random mouse is walled in at {}", self.position),
        }
        self.outcome = Some(result);
        result
    }
}

impl Stepper for RandomMouse {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        if let Some(result) = self.outcome {
            return Ok(result);
        }
        ensure_grid_shape(self.shape, grid)?;

        if self.position == self.goal {
            return Ok(self.finish(StepResult::Complete));
        }

        let open: SideSmallVec = ALL_SIDES.iter()
            .cloned()
            .filter(|side| grid.is_neighbour_linked(self.position, *side))
            .collect();
        let (heading, next) = match self.choose_heading(&open) {
            Some(heading) => {
                match grid.neighbour_at_direction(self.position, heading) {
                    Some(next) => (heading, next),
                    None => return Ok(self.finish(StepResult::Failed)),
                }
            }
            None => return Ok(self.finish(StepResult::Failed)),
        };

        self.heading = Some(heading);
        self.position = next;
        self.visited.insert(next);
        match self.trail.iter().position(|&coord| coord == next) {
            Some(index) => self.trail.truncate(index + 1),
            None => self.trail.push(next),
        }

        if next == self.goal {
            Ok(self.finish(StepResult::Complete))
        } else {
            Ok(StepResult::Continuing)
        }
    }

    fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

impl MazeSolver for RandomMouse {
    fn kind(&self) -> SolverKind {
        SolverKind::RandomMouse
    }

    fn start(&self) -> GridCoordinate {
        self.start
    }

    fn goal(&self) -> GridCoordinate {
        self.goal
    }

    fn current(&self) -> Option<GridCoordinate> {
        Some(self.position)
    }

    fn visited(&self) -> Vec<GridCoordinate> {
        self.visited.iter().collect()
    }

    fn path(&self) -> &[GridCoordinate] {
        &self.path
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use rand::SeedableRng;

    use super::*;
    use crate::generators::ALL_GENERATORS;
    use crate::pathing::tests::{generated_maze, open_grid};
    use crate::units::{ColumnsCount, RowsCount};

    fn corridor(cols: usize) -> Grid {
        open_grid(cols, 1)
    }

    #[test]
    fn runs_straight_down_a_corridor() {
        let mut grid = corridor(6);
        let mut mouse = RandomMouse::new(&mut grid, GridCoordinate::new(0, 0), XorShiftRng::seed_from_u64(9)).unwrap();
        for x in 1..5 {
            assert_eq!(mouse.step(&mut grid).unwrap(), StepResult::Continuing);
            assert_eq!(mouse.current(), Some(GridCoordinate::new(x, 0)));
            assert_eq!(mouse.heading(), Some(WallSide::Right));
        }
        assert_eq!(mouse.step(&mut grid).unwrap(), StepResult::Complete);
        assert_eq!(mouse.path().len(), 6);
    }

    #[test]
    fn turns_back_at_dead_ends() {
        // start in the middle of a corridor whose goal end is to the right
        let mut grid = corridor(3);
        let start = GridCoordinate::new(1, 0);
        let mut found_dead_end = false;
        for seed in 0..20 {
            let mut mouse = RandomMouse::new(&mut grid, start, XorShiftRng::seed_from_u64(seed)).unwrap();
            if mouse.step(&mut grid).unwrap() == StepResult::Continuing {
                // went left into the dead end, must come straight back
                assert_eq!(mouse.current(), Some(GridCoordinate::new(0, 0)));
                assert_eq!(mouse.step(&mut grid).unwrap(), StepResult::Continuing);
                assert_eq!(mouse.heading(), Some(WallSide::Right));
                assert_eq!(mouse.current(), Some(start));
                // the excursion is erased from the trail
                assert_eq!(mouse.step(&mut grid).unwrap(), StepResult::Complete);
                assert_eq!(mouse.path(), &[start, GridCoordinate::new(2, 0)]);
                found_dead_end = true;
            }
        }
        assert!(found_dead_end);
    }

    #[test]
    fn walled_in_mouse_gives_up() {
        let mut grid = Grid::new(ColumnsCount(2), RowsCount(2)).unwrap();
        let mut mouse = RandomMouse::new(&mut grid, GridCoordinate::new(0, 0), XorShiftRng::seed_from_u64(9)).unwrap();
        assert_eq!(mouse.step(&mut grid).unwrap(), StepResult::Failed);
        assert!(mouse.path().is_empty());
    }

    #[test]
    fn takes_side_branches_at_junctions() {
        // a T junction at (1, 0): the corridor carries on right, the goal is down
        let gc = |x, y| GridCoordinate::new(x, y);
        let mut grid = Grid::new(ColumnsCount(3), RowsCount(2)).unwrap();
        grid.remove_wall(gc(0, 0), gc(1, 0)).unwrap();
        grid.remove_wall(gc(1, 0), gc(2, 0)).unwrap();
        grid.remove_wall(gc(1, 0), gc(1, 1)).unwrap();
        grid.remove_wall(gc(1, 1), gc(2, 1)).unwrap();

        let mut went_straight = false;
        let mut turned = false;
        for seed in 0..32 {
            let mut mouse = RandomMouse::new(&mut grid, gc(0, 0), XorShiftRng::seed_from_u64(seed)).unwrap();
            assert_eq!(mouse.step(&mut grid).unwrap(), StepResult::Continuing);
            assert_eq!(mouse.current(), Some(gc(1, 0)));
            let _ = mouse.step(&mut grid).unwrap();
            match mouse.current() {
                Some(coord) if coord == gc(2, 0) => went_straight = true,
                Some(coord) if coord == gc(1, 1) => turned = true,
                other => panic!("mouse turned back at a junction to {:?}", other),
            }
        }
        assert!(went_straight && turned);
    }

    #[test]
    fn reaches_the_goal_of_generated_mazes() {
        for (i, size) in (4..13).enumerate() {
            for seed in 0..ALL_GENERATORS.len() as u64 {
                let maze_seed = seed + 4 * i as u64;
                let mut grid = generated_maze(size, size, maze_seed);
                let start = GridCoordinate::new(0, 0);
                let mut mouse = RandomMouse::new(&mut grid, start, XorShiftRng::seed_from_u64(maze_seed)).unwrap();

                let mut result = StepResult::Continuing;
                for _ in 0..1_000_000 {
                    result = mouse.step(&mut grid).unwrap();
                    if result.is_finished() {
                        break;
                    }
                }
                assert_eq!(result, StepResult::Complete, "{0}x{0} maze, seed {1}", size, maze_seed);

                let path = mouse.path();
                assert_eq!(path.first(), Some(&start));
                assert_eq!(path.last(), Some(&grid.bottom_right()));
                assert!(path.windows(2).all(|pair| grid.is_linked(pair[0], pair[1])));
                assert_eq!(path.iter().unique().count(), path.len());
            }
        }
    }
}
