use std::time::Duration;

use error_chain::bail;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::generators::GeneratorKind;
use crate::pathing::SolverKind;
use crate::units::{CellSize, ColumnsCount, Height, RowsCount, Width};

pub const DEFAULT_CANVAS_WIDTH: usize = 800;
pub const DEFAULT_CANVAS_HEIGHT: usize = 800;
pub const DEFAULT_CELL_SIZE: usize = 20;
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 60;

/// Everything needed to set up a run: canvas and cell sizes, the algorithms and the random
/// seed. A `None` seed draws one from the operating system.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub width: Width,
    pub height: Height,
    pub cell_size: CellSize,
    pub frames_per_second: u32,
    pub generator: GeneratorKind,
    pub solver: SolverKind,
    pub seed: Option<u64>,
    pub start: GridCoordinate,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            width: Width(DEFAULT_CANVAS_WIDTH),
            height: Height(DEFAULT_CANVAS_HEIGHT),
            cell_size: CellSize(DEFAULT_CELL_SIZE),
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            generator: GeneratorKind::RecursiveBacktracker,
            solver: SolverKind::AStar,
            seed: None,
            start: GridCoordinate::new(0, 0),
        }
    }
}

impl Settings {
    /// Whole cells that fit on the canvas.
    pub fn grid_dimensions(&self) -> Result<(ColumnsCount, RowsCount)> {
        let (Width(width), Height(height), CellSize(cell_size)) = (self.width, self.height, self.cell_size);
        if cell_size == 0 {
            bail!(ErrorKind::InvalidSettings(String::from("cell size must be at least one pixel")));
        }
        if width < cell_size || height < cell_size {
            bail!(ErrorKind::InvalidSettings(format!("a {}x{} canvas cannot hold a {} pixel cell",
                                                     width,
                                                     height,
                                                     cell_size)));
        }
        Ok((ColumnsCount(width / cell_size), RowsCount(height / cell_size)))
    }

    /// Pause between two ticks, None when running flat out at zero frames per second.
    pub fn tick_delay(&self) -> Option<Duration> {
        match self.frames_per_second {
            0 => None,
            fps => Some(Duration::from_secs(1) / fps),
        }
    }

    /// Size the canvas to fit exactly `columns` by `rows` cells.
    pub fn with_grid_dimensions(mut self, columns: ColumnsCount, rows: RowsCount) -> Settings {
        self.width = Width(columns.0 * self.cell_size.0);
        self.height = Height(rows.0 * self.cell_size.0);
        self
    }
}
