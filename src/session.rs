use std::fmt;

use error_chain::bail;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::generators::{new_generator, GeneratorKind, MazeGenerator};
use crate::grid::Grid;
use crate::grid_displays::{render_grid, SearchDisplay, StartEndPointsDisplay};
use crate::pathing::{new_solver, MazeSolver, SolverKind};
use crate::settings::Settings;
use crate::stepper::{StepResult, Stepper};
use crate::units::CellSize;
use crate::wall_matrix::WallMatrix;

/// Where a session is in its generate then solve life cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RunPhase {
    /// No algorithm running. The grid is fresh, loaded or left half carved by an abort.
    Idle,
    Generating,
    /// A finished maze waiting to be solved.
    Generated,
    Solving,
    Solved,
    Failed,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            RunPhase::Idle => "idle",
            RunPhase::Generating => "generating",
            RunPhase::Generated => "generated",
            RunPhase::Solving => "solving",
            RunPhase::Solved => "solved",
            RunPhase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Owns the grid and whichever stepper is working on it, one tick at a time. At most one
/// stepper is ever active so the grid has a single writer.
pub struct MazeSession {
    settings: Settings,
    grid: Grid,
    phase: RunPhase,
    generator: Option<Box<dyn MazeGenerator>>,
    solver: Option<Box<dyn MazeSolver>>,
    rng: XorShiftRng,
    ticks: usize,
}

impl fmt::Debug for MazeSession {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MazeSession")
            .field("settings", &self.settings)
            .field("shape", &self.grid.shape())
            .field("phase", &self.phase)
            .field("generator", &self.generator.as_ref().map(|g| g.kind()))
            .field("solver", &self.solver.as_ref().map(|s| s.kind()))
            .field("ticks", &self.ticks)
            .finish()
    }
}

impl MazeSession {
    /// An idle session over a fully walled grid sized from the settings.
    pub fn new(settings: Settings) -> Result<MazeSession> {
        let (columns, rows) = settings.grid_dimensions()?;
        let grid = Grid::new(columns, rows)?;
        Ok(MazeSession::with_grid(settings, grid))
    }

    fn with_grid(settings: Settings, grid: Grid) -> MazeSession {
        let rng = match settings.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        };
        MazeSession {
            settings,
            grid,
            phase: RunPhase::Idle,
            generator: None,
            solver: None,
            rng,
            ticks: 0,
        }
    }

    /// An idle session over a previously saved maze.
    pub fn from_wall_matrix(mut settings: Settings, matrix: &WallMatrix) -> Result<MazeSession> {
        let grid = matrix.to_grid()?;
        settings.cell_size = CellSize(matrix.cell_size);
        settings = settings.with_grid_dimensions(grid.columns(), grid.rows());
        Ok(MazeSession::with_grid(settings, grid))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Steps taken by any stepper since the session was created.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn generator(&self) -> Option<&dyn MazeGenerator> {
        self.generator.as_ref().map(|g| g.as_ref())
    }

    pub fn solver(&self) -> Option<&dyn MazeSolver> {
        self.solver.as_ref().map(|s| s.as_ref())
    }

    fn stepper_rng(&mut self) -> XorShiftRng {
        XorShiftRng::seed_from_u64(self.rng.gen())
    }

    /// Throw away the current maze and any running algorithm and start carving a new one.
    pub fn start_generation(&mut self, kind: GeneratorKind) -> Result<()> {
        let (columns, rows) = (self.grid.columns(), self.grid.rows());
        let mut grid = Grid::new(columns, rows)?;
        let rng = self.stepper_rng();
        let generator = new_generator(kind, &mut grid, self.settings.start, rng)?;

        self.grid = grid;
        self.generator = Some(generator);
        self.solver = None;
        self.settings.generator = kind;
        self.set_phase(RunPhase::Generating);
        Ok(())
    }

    /// Begin solving the current maze, replacing any earlier solve. Refused while a maze is
    /// still being generated.
    pub fn start_solving(&mut self, kind: SolverKind) -> Result<()> {
        if self.phase == RunPhase::Generating {
            warn!("refusing to start {} while generating", kind);
            bail!(ErrorKind::InvalidPhase("start solving", self.phase.to_string()));
        }
        let rng = self.stepper_rng();
        let solver = new_solver(kind, &mut self.grid, self.settings.start, rng)?;

        self.solver = Some(solver);
        self.settings.solver = kind;
        self.set_phase(RunPhase::Solving);
        Ok(())
    }

    /// Stop whatever is running. Walls already removed stay removed.
    pub fn abort(&mut self) {
        match self.phase {
            RunPhase::Generating => {
                self.generator = None;
                self.set_phase(RunPhase::Idle);
            }
            RunPhase::Solving => {
                self.solver = None;
                self.set_phase(RunPhase::Generated);
            }
            _ => {}
        }
    }

    /// Advance the active stepper by one step, if there is one.
    pub fn tick(&mut self) -> Result<RunPhase> {
        match self.phase {
            RunPhase::Generating => {
                let result = match self.generator {
                    Some(ref mut generator) => generator.step(&mut self.grid)?,
                    None => StepResult::Complete,
                };
                self.ticks += 1;
                if result.is_finished() {
                    self.generator = None;
                    self.set_phase(RunPhase::Generated);
                }
            }
            RunPhase::Solving => {
                let result = match self.solver {
                    Some(ref mut solver) => solver.step(&mut self.grid)?,
                    None => StepResult::Failed,
                };
                self.ticks += 1;
                match result {
                    StepResult::Complete => self.set_phase(RunPhase::Solved),
                    StepResult::Failed => self.set_phase(RunPhase::Failed),
                    StepResult::Continuing => {}
                }
            }
            _ => {}
        }
        Ok(self.phase)
    }

    /// Tick until the running algorithm finishes. Returns the number of ticks taken.
    pub fn run_to_completion(&mut self) -> Result<usize> {
        let start_ticks = self.ticks;
        while self.phase == RunPhase::Generating || self.phase == RunPhase::Solving {
            let _ = self.tick()?;
        }
        Ok(self.ticks - start_ticks)
    }

    pub fn export(&self) -> WallMatrix {
        WallMatrix::from_grid(&self.grid, self.settings.cell_size)
    }

    /// Replace the maze with a saved one, dropping any running algorithm. A malformed matrix
    /// leaves the session untouched.
    pub fn load(&mut self, matrix: &WallMatrix) -> Result<()> {
        let grid = matrix.to_grid()?;
        let mut settings = self.settings.clone();
        settings.cell_size = CellSize(matrix.cell_size);
        self.settings = settings.with_grid_dimensions(grid.columns(), grid.rows());
        self.grid = grid;
        self.generator = None;
        self.solver = None;
        self.set_phase(RunPhase::Idle);
        Ok(())
    }

    /// The path found by the last solve, empty unless solved.
    pub fn path(&self) -> &[GridCoordinate] {
        match self.solver {
            Some(ref solver) => solver.path(),
            None => &[],
        }
    }

    /// Text picture of the grid with whatever the active algorithm is up to.
    pub fn render(&self) -> String {
        if let Some(ref solver) = self.solver {
            let display = SearchDisplay::new(solver.current(), &solver.visited(), solver.path());
            return render_grid(&self.grid, Some(&display));
        }
        if let Some(ref generator) = self.generator {
            let display = SearchDisplay::new(generator.current(), &generator.active_cells(), &[]);
            return render_grid(&self.grid, Some(&display));
        }
        let ends = StartEndPointsDisplay::new(self.settings.start, self.grid.bottom_right());
        render_grid(&self.grid, Some(&ends))
    }

    fn set_phase(&mut self, phase: RunPhase) {
        if phase != self.phase {
            info!("{} -> {} after {} ticks", self.phase, phase, self.ticks);
            self.phase = phase;
        }
    }
}
