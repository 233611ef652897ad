use std::io::{Read, Write};

use error_chain::bail;
use serde_derive::{Deserialize, Serialize};

use crate::cells::{GridCoordinate, WallSide};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{CellSize, ColumnsCount, RowsCount};

/// The persisted form of a maze: its dimensions, the pixel cell size it was drawn at and every
/// cell's wall flags. `walls` is indexed `[x][y]`, one inner list per column, four flags per
/// cell in Top, Right, Bottom, Left order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallMatrix {
    pub cols: usize,
    pub rows: usize,
    #[serde(rename = "cellSize")]
    pub cell_size: usize,
    pub walls: Vec<Vec<[bool; 4]>>,
}

impl WallMatrix {
    pub fn from_grid(grid: &Grid, cell_size: CellSize) -> WallMatrix {
        let (cols, rows) = grid.shape();
        let walls = (0..cols)
            .map(|x| {
                (0..rows)
                    .map(|y| {
                        grid.cell(GridCoordinate::new(x as u32, y as u32))
                            .map_or([true; 4], |cell| cell.walls)
                    })
                    .collect()
            })
            .collect();

        WallMatrix {
            cols,
            rows,
            cell_size: cell_size.0,
            walls,
        }
    }

    /// A fresh grid with these walls, nothing visited. The matrix is checked first: it must
    /// match its own dimensions exactly, keep the outer border closed and have both sides of
    /// every interior wall agree.
    pub fn to_grid(&self) -> Result<Grid> {
        self.validate()?;
        Grid::with_walls(ColumnsCount(self.cols), RowsCount(self.rows), |coord| {
            self.walls[coord.x as usize][coord.y as usize]
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            bail!(ErrorKind::MalformedWallMatrix(format!("empty {}x{} maze", self.cols, self.rows)));
        }
        if self.walls.len() != self.cols {
            bail!(ErrorKind::MalformedWallMatrix(format!("{} columns of walls for {} columns",
                                                         self.walls.len(),
                                                         self.cols)));
        }
        if let Some((x, column)) = self.walls.iter().enumerate().find(|(_, column)| column.len() != self.rows) {
            bail!(ErrorKind::MalformedWallMatrix(format!("column {} has {} cells, expected {}",
                                                         x,
                                                         column.len(),
                                                         self.rows)));
        }
        if self.cell_size == 0 {
            bail!(ErrorKind::MalformedWallMatrix(String::from("zero cell size")));
        }

        for x in 0..self.cols {
            for y in 0..self.rows {
                let walls = &self.walls[x][y];
                let border_open = (y == 0 && !walls[WallSide::Top.index()]) ||
                                  (x == self.cols - 1 && !walls[WallSide::Right.index()]) ||
                                  (y == self.rows - 1 && !walls[WallSide::Bottom.index()]) ||
                                  (x == 0 && !walls[WallSide::Left.index()]);
                if border_open {
                    bail!(ErrorKind::MalformedWallMatrix(format!("cell ({}, {}) is open to the outside", x, y)));
                }
                if x + 1 < self.cols &&
                   walls[WallSide::Right.index()] != self.walls[x + 1][y][WallSide::Left.index()] {
                    bail!(ErrorKind::MalformedWallMatrix(format!("cells ({}, {}) and ({}, {}) disagree on their wall",
                                                                 x, y, x + 1, y)));
                }
                if y + 1 < self.rows &&
                   walls[WallSide::Bottom.index()] != self.walls[x][y + 1][WallSide::Top.index()] {
                    bail!(ErrorKind::MalformedWallMatrix(format!("cells ({}, {}) and ({}, {}) disagree on their wall",
                                                                 x, y, x, y + 1)));
                }
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<WallMatrix> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<WallMatrix> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::generators::{new_generator, GeneratorKind};
    use crate::stepper::run_to_completion;

    fn maze(cols: usize, rows: usize) -> Grid {
        let mut grid = Grid::new(ColumnsCount(cols), RowsCount(rows)).unwrap();
        let rng = XorShiftRng::seed_from_u64(31);
        let mut generator = new_generator(GeneratorKind::Prim, &mut grid, GridCoordinate::new(0, 0), rng).unwrap();
        let _ = run_to_completion(&mut *generator, &mut grid).unwrap();
        grid
    }

    #[test]
    fn walls_are_indexed_by_column_then_row() {
        let mut grid = Grid::new(ColumnsCount(3), RowsCount(2)).unwrap();
        grid.remove_wall(GridCoordinate::new(2, 0), GridCoordinate::new(2, 1)).unwrap();
        let matrix = WallMatrix::from_grid(&grid, CellSize(20));
        assert_eq!(matrix.walls.len(), 3);
        assert_eq!(matrix.walls[0].len(), 2);
        assert_eq!(matrix.walls[2][0], [true, true, false, true]);
        assert_eq!(matrix.walls[2][1], [false, true, true, true]);
    }

    #[test]
    fn export_then_import_reproduces_the_maze() {
        let grid = maze(7, 4);
        let matrix = WallMatrix::from_grid(&grid, CellSize(20));
        let json = matrix.to_json().unwrap();
        let loaded = WallMatrix::from_json(&json).unwrap();
        assert_eq!(loaded, matrix);

        let reloaded = loaded.to_grid().unwrap();
        assert_eq!(WallMatrix::from_grid(&reloaded, CellSize(20)), matrix);
        assert_eq!(reloaded.links_count(), 27);
        assert_eq!(reloaded.visited_count(), 0);
    }

    #[test]
    fn json_field_names() {
        let grid = Grid::new(ColumnsCount(1), RowsCount(1)).unwrap();
        let json = WallMatrix::from_grid(&grid, CellSize(25)).to_json().unwrap();
        assert_eq!(json, r#"{"cols":1,"rows":1,"cellSize":25,"walls":[[[true,true,true,true]]]}"#);
    }

    #[test]
    fn reader_and_writer() {
        let matrix = WallMatrix::from_grid(&maze(3, 3), CellSize(10));
        let mut buffer = vec![];
        matrix.write_to(&mut buffer).unwrap();
        assert_eq!(WallMatrix::read_from(&buffer[..]).unwrap(), matrix);
    }

    #[test]
    fn malformed_matrices_are_rejected() {
        let good = WallMatrix::from_grid(&maze(3, 2), CellSize(20));
        assert!(good.to_grid().is_ok());

        let mut missing_column = good.clone();
        let _ = missing_column.walls.pop();
        assert!(missing_column.to_grid().is_err());

        let mut short_column = good.clone();
        let _ = short_column.walls[1].pop();
        assert!(short_column.to_grid().is_err());

        let mut wrong_dimensions = good.clone();
        wrong_dimensions.rows = 3;
        assert!(wrong_dimensions.to_grid().is_err());

        let mut open_border = good.clone();
        open_border.walls[0][0][WallSide::Left.index()] = false;
        assert!(open_border.to_grid().is_err());

        let mut one_sided = good.clone();
        one_sided.walls[0][0][WallSide::Right.index()] = !one_sided.walls[0][0][WallSide::Right.index()];
        assert!(one_sided.to_grid().is_err());

        let mut empty = good;
        empty.cols = 0;
        empty.walls.clear();
        assert!(empty.to_grid().is_err());
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(WallMatrix::from_json("{\"cols\": 2, \"rows\": 2").is_err());
        assert!(WallMatrix::from_json("{\"cols\": 1, \"rows\": 1, \"cellSize\": 20, \"walls\": [[[true, true]]]}")
            .is_err());
    }
}
