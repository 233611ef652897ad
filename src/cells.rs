use smallvec::SmallVec;
use std::fmt;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new((index % width) as u32, (index / width) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> GridCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        GridCoordinate::new(col as u32, row as u32)
    }

    /// Number of orthogonal moves between two coordinates.
    #[inline]
    pub fn manhattan_distance(&self, other: GridCoordinate) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        (dx + dy) as u32
    }

    /// The side of `self` that faces `other`, if the two are orthogonally adjacent.
    pub fn side_facing(&self, other: GridCoordinate) -> Option<WallSide> {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        match (dx, dy) {
            (0, -1) => Some(WallSide::Top),
            (1, 0) => Some(WallSide::Right),
            (0, 1) => Some(WallSide::Bottom),
            (-1, 0) => Some(WallSide::Left),
            _ => None,
        }
    }

    /// Creates a new coordinate offset one cell away in the given direction.
    /// Returns None if the coordinate would be negative. Callers still need to check the
    /// upper bounds against a grid.
    pub fn offset(&self, side: WallSide) -> Option<GridCoordinate> {
        let (x, y) = (self.x, self.y);
        match side {
            WallSide::Top => if y > 0 { Some(GridCoordinate::new(x, y - 1)) } else { None },
            WallSide::Right => Some(GridCoordinate::new(x + 1, y)),
            WallSide::Bottom => Some(GridCoordinate::new(x, y + 1)),
            WallSide::Left => if x > 0 { Some(GridCoordinate::new(x - 1, y)) } else { None },
        }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type EdgeSmallVec = SmallVec<[(GridCoordinate, GridCoordinate); 4]>;

/// The four walls of a square cell. The discriminant is the index into `Cell::walls`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WallSide {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

pub const ALL_SIDES: [WallSide; 4] = [WallSide::Top, WallSide::Right, WallSide::Bottom, WallSide::Left];

impl WallSide {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> WallSide {
        match self {
            WallSide::Top => WallSide::Bottom,
            WallSide::Right => WallSide::Left,
            WallSide::Bottom => WallSide::Top,
            WallSide::Left => WallSide::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub coord: GridCoordinate,
    /// Top, Right, Bottom, Left. `true` means the wall is standing.
    pub walls: [bool; 4],
    pub visited: bool,
    // Solve time scratch, reset before every solve.
    pub g: f32,
    pub h: f32,
    pub f: f32,
    pub parent: Option<GridCoordinate>,
}

impl Cell {
    pub fn new(coord: GridCoordinate) -> Cell {
        Cell::with_walls(coord, [true; 4])
    }

    pub fn with_walls(coord: GridCoordinate, walls: [bool; 4]) -> Cell {
        Cell {
            coord,
            walls,
            visited: false,
            g: f32::INFINITY,
            h: 0.0,
            f: f32::INFINITY,
            parent: None,
        }
    }

    #[inline]
    pub fn has_wall(&self, side: WallSide) -> bool {
        self.walls[side.index()]
    }

    pub fn reset_scratch(&mut self) {
        self.g = f32::INFINITY;
        self.h = 0.0;
        self.f = f32::INFINITY;
        self.parent = None;
    }
}
