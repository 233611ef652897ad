use std::fmt;

use crate::cells::{GridCoordinate, WallSide};
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};
use crate::utils::FnvHashSet;

/// Supplies the three character body drawn inside each cell when a grid is rendered as text.
pub trait GridDisplay {
    /// Render the cell body for the cell at `coord`.
    fn render_cell_body(&self, coord: GridCoordinate) -> String;
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: GridCoordinate,
    end: GridCoordinate,
}
impl StartEndPointsDisplay {
    pub fn new(start: GridCoordinate, end: GridCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Snapshot of a search in progress: the frontier head, the explored cells and the
/// current best path. The head wins over the path which wins over explored cells.
#[derive(Debug)]
pub struct SearchDisplay {
    current: Option<GridCoordinate>,
    visited: FnvHashSet<GridCoordinate>,
    path: FnvHashSet<GridCoordinate>,
}
impl SearchDisplay {
    pub fn new(current: Option<GridCoordinate>,
               visited: &[GridCoordinate],
               path: &[GridCoordinate])
               -> SearchDisplay {
        SearchDisplay {
            current,
            visited: visited.iter().cloned().collect(),
            path: path.iter().cloned().collect(),
        }
    }
}
impl GridDisplay for SearchDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.current == Some(coord) {
            String::from(" @ ")
        } else if self.path.contains(&coord) {
            String::from(" . ")
        } else if self.visited.contains(&coord) {
            String::from(" ~ ")
        } else {
            String::from("   ")
        }
    }
}

/// Box drawing text rendering of the maze, with optional cell bodies.
pub fn render_grid(grid: &Grid, display: Option<&dyn GridDisplay>) -> String {
    const WALL_L: &str = "╴";
    const WALL_R: &str = "╶";
    const WALL_U: &str = "╵";
    const WALL_D: &str = "╷";
    const WALL_LR_3: &str = "───";
    const WALL_LR: &str = "─";
    const WALL_UD: &str = "│";
    const WALL_LD: &str = "┐";
    const WALL_RU: &str = "└";
    const WALL_LU: &str = "┘";
    const WALL_RD: &str = "┌";
    const WALL_LRU: &str = "┴";
    const WALL_LRD: &str = "┬";
    const WALL_LRUD: &str = "┼";
    const WALL_RUD: &str = "├";
    const WALL_LUD: &str = "┤";
    const EMPTY_BODY: &str = "   ";

    let ColumnsCount(columns_count) = grid.columns();
    let RowsCount(rows_count) = grid.rows();

    // The top boundary belongs to no row, render it up front.
    let mut output = String::from(WALL_RD);
    for x in 0..columns_count {
        let coord = GridCoordinate::new(x as u32, 0);
        output.push_str(WALL_LR_3);
        if grid.is_neighbour_linked(coord, WallSide::Right) {
            output.push_str(WALL_LR);
        } else if x == columns_count - 1 {
            output.push_str(WALL_LD);
        } else {
            output.push_str(WALL_LRD);
        }
    }
    output.push('\n');

    for (index_row, row) in grid.iter_row().enumerate() {
        let is_last_row = index_row == rows_count - 1;

        // Each row draws its west boundary, cell bodies with their east walls, then the
        // south walls. The north wall is the south wall of the row above.
        let mut middle_section = String::from(WALL_UD);
        let mut bottom_section = String::new();

        for (index_column, cell_coord) in row.into_iter().enumerate() {
            let is_last_column = index_column == columns_count - 1;
            let east_open = grid.is_neighbour_linked(cell_coord, WallSide::Right);
            let south_open = grid.is_neighbour_linked(cell_coord, WallSide::Bottom);

            match display {
                Some(displayer) => middle_section.push_str(&displayer.render_cell_body(cell_coord)),
                None => middle_section.push_str(EMPTY_BODY),
            }
            middle_section.push_str(if east_open { " " } else { WALL_UD });

            if index_column == 0 {
                bottom_section.push_str(if is_last_row {
                    WALL_RU
                } else if south_open {
                    WALL_UD
                } else {
                    WALL_RUD
                });
            }
            bottom_section.push_str(if south_open { EMPTY_BODY } else { WALL_LR_3 });

            let corner = match (is_last_row, is_last_column) {
                (true, true) => WALL_LU,
                (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                (false, false) => {
                    let access_se_from_east = grid.neighbour_at_direction(cell_coord, WallSide::Right)
                        .map_or(false, |c| grid.is_neighbour_linked(c, WallSide::Bottom));
                    let access_se_from_south = grid.neighbour_at_direction(cell_coord, WallSide::Bottom)
                        .map_or(false, |c| grid.is_neighbour_linked(c, WallSide::Right));
                    let show_right_section = !access_se_from_east;
                    let show_down_section = !access_se_from_south;
                    let show_up_section = !east_open;
                    let show_left_section = !south_open;

                    match (show_left_section, show_right_section, show_up_section, show_down_section) {
                        (true, true, true, true) => WALL_LRUD,
                        (true, true, true, false) => WALL_LRU,
                        (true, true, false, true) => WALL_LRD,
                        (true, false, true, true) => WALL_LUD,
                        (false, true, true, true) => WALL_RUD,
                        (true, true, false, false) => WALL_LR,
                        (false, false, true, true) => WALL_UD,
                        (false, true, true, false) => WALL_RU,
                        (true, false, false, true) => WALL_LD,
                        (true, false, true, false) => WALL_LU,
                        (false, true, false, true) => WALL_RD,
                        (true, false, false, false) => WALL_L,
                        (false, true, false, false) => WALL_R,
                        (false, false, true, false) => WALL_U,
                        (false, false, false, true) => WALL_D,
                        _ => " ",
                    }
                }
            };
            bottom_section.push_str(corner);
        }

        output.push_str(&middle_section);
        output.push('\n');
        output.push_str(&bottom_section);
        output.push('\n');
    }

    output
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_grid(self, None))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn single_walled_cell() {
        let g = Grid::new(ColumnsCount(1), RowsCount(1)).unwrap();
        assert_eq!(g.to_string(), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn open_passage_drops_the_wall() {
        let mut g = Grid::new(ColumnsCount(2), RowsCount(1)).unwrap();
        assert_eq!(g.to_string(), "┌───┬───┐\n│   │   │\n└───┴───┘\n");
        g.remove_wall(gc(0, 0), gc(1, 0)).unwrap();
        assert_eq!(g.to_string(), "┌───────┐\n│       │\n└───────┘\n");
    }

    #[test]
    fn vertical_passage() {
        let mut g = Grid::new(ColumnsCount(1), RowsCount(2)).unwrap();
        g.remove_wall(gc(0, 0), gc(0, 1)).unwrap();
        assert_eq!(g.to_string(), "┌───┐\n│   │\n│   │\n│   │\n└───┘\n");
    }

    #[test]
    fn cell_bodies() {
        let mut g = Grid::new(ColumnsCount(3), RowsCount(1)).unwrap();
        g.remove_wall(gc(0, 0), gc(1, 0)).unwrap();
        g.remove_wall(gc(1, 0), gc(2, 0)).unwrap();

        let ends = StartEndPointsDisplay::new(gc(0, 0), gc(2, 0));
        let text = render_grid(&g, Some(&ends));
        assert_eq!(text.lines().nth(1), Some("│ S       E │"));

        let path = PathDisplay::new(&[gc(0, 0), gc(1, 0)]);
        let text = render_grid(&g, Some(&path));
        assert_eq!(text.lines().nth(1), Some("│ .   .     │"));

        let search = SearchDisplay::new(Some(gc(2, 0)), &[gc(0, 0), gc(1, 0), gc(2, 0)], &[gc(0, 0)]);
        let text = render_grid(&g, Some(&search));
        assert_eq!(text.lines().nth(1), Some("│ .   ~   @ │"));
    }
}
