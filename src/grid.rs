use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cells::{Cell, CoordinateSmallVec, EdgeSmallVec, GridCoordinate, WallSide, ALL_SIDES};
use crate::errors::*;
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{ColumnsCount, RowsCount};

/// Undirected graph of the open passages of a maze, one node per cell in row major order.
pub type PassageGraph = Graph<GridCoordinate, (), Undirected>;

/// A rectangular maze: `columns * rows` square cells, each carrying its own copy of the
/// four wall flags. Every wall mutation goes through `remove_wall` so that the flags on
/// both sides of a shared edge always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: ColumnsCount,
    rows: RowsCount,
    cells: Vec<Cell>,
}

impl Grid {
    /// A fully walled grid with no visited cells.
    pub fn new(columns: ColumnsCount, rows: RowsCount) -> Result<Grid> {
        Grid::with_walls(columns, rows, |_| [true; 4])
    }

    /// Builds a grid taking each cell's wall flags from `walls_at`.
    /// The caller is responsible for the flags of neighbouring cells agreeing.
    pub(crate) fn with_walls<F>(columns: ColumnsCount, rows: RowsCount, walls_at: F) -> Result<Grid>
        where F: Fn(GridCoordinate) -> [bool; 4]
    {
        let (ColumnsCount(cols), RowsCount(row_count)) = (columns, rows);
        if cols == 0 || row_count == 0 {
            return Err(ErrorKind::EmptyGrid(cols, row_count).into());
        }

        let cells = CellIter::new(columns, rows)
            .map(|coord| Cell::with_walls(coord, walls_at(coord)))
            .collect();

        Ok(Grid { columns, rows, cells })
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// `(columns, rows)` as plain numbers.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.columns.0, self.rows.0)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.columns.0 && (coord.y as usize) < self.rows.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, coord: GridCoordinate) -> Option<&mut Cell> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The goal cell of a solve: the bottom right corner.
    pub fn bottom_right(&self) -> GridCoordinate {
        GridCoordinate::new(self.columns.0 as u32 - 1, self.rows.0 as u32 - 1)
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        GridCoordinate::from_row_major_index(index, self.columns)
    }

    /// Invalid coordinates count as unvisited.
    #[inline]
    pub fn is_visited(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).map_or(false, |cell| cell.visited)
    }

    pub fn set_visited(&mut self, coord: GridCoordinate, visited: bool) -> Result<()> {
        let cell = self.cell_mut(coord).ok_or(ErrorKind::InvalidGridCoordinate(coord))?;
        cell.visited = visited;
        Ok(())
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.visited).count()
    }

    /// Clears the generation engine's visited flags.
    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    /// Clears the A* costs and parent links left behind by a previous solve.
    pub fn reset_solver_scratch(&mut self) {
        for cell in &mut self.cells {
            cell.reset_scratch();
        }
    }

    /// Stand every wall back up and forget all visits.
    pub fn reset_walls(&mut self) {
        for cell in &mut self.cells {
            cell.walls = [true; 4];
            cell.visited = false;
            cell.reset_scratch();
        }
    }

    /// Remove the wall between two orthogonally adjacent cells, clearing the flag on both
    /// sides of the shared edge.
    pub fn remove_wall(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        let a_index = self.grid_coordinate_to_index(a).ok_or(ErrorKind::InvalidGridCoordinate(a))?;
        let b_index = self.grid_coordinate_to_index(b).ok_or(ErrorKind::InvalidGridCoordinate(b))?;
        let side = a.side_facing(b).ok_or(ErrorKind::CellsNotAdjacent(a, b))?;

        self.cells[a_index].walls[side.index()] = false;
        self.cells[b_index].walls[side.opposite().index()] = false;
        Ok(())
    }

    /// Invalid coordinates are treated as solid rock: every wall is present.
    #[inline]
    pub fn has_wall(&self, coord: GridCoordinate, side: WallSide) -> bool {
        self.cell(coord).map_or(true, |cell| cell.has_wall(side))
    }

    /// Are two cells joined by a passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if !self.is_valid_coordinate(b) {
            return false;
        }
        a.side_facing(b).map_or(false, |side| !self.has_wall(a, side))
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, side: WallSide) -> bool {
        self.neighbour_at_direction(coord, side)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    pub fn neighbour_at_direction(&self, coord: GridCoordinate, side: WallSide) -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(side).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Cells to the top, right, bottom and left of a cell, whether or not a wall separates
    /// them.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        ALL_SIDES.iter()
            .filter_map(|side| self.neighbour_at_direction(coord, *side))
            .collect()
    }

    /// The neighbours a generator may expand into: unvisited ones only, or all of them when
    /// `include_visited` is set.
    pub fn candidate_neighbours(&self, coord: GridCoordinate, include_visited: bool) -> CoordinateSmallVec {
        ALL_SIDES.iter()
            .filter_map(|side| self.neighbour_at_direction(coord, *side))
            .filter(|neighbour| include_visited || !self.is_visited(*neighbour))
            .collect()
    }

    /// A uniformly random choice among `candidate_neighbours`, None when there are none.
    pub fn random_neighbour<R: Rng>(&self,
                                    coord: GridCoordinate,
                                    include_visited: bool,
                                    rng: &mut R)
                                    -> Option<GridCoordinate> {
        self.candidate_neighbours(coord, include_visited).choose(rng).cloned()
    }

    /// Neighbours reachable from a cell through an open passage.
    pub fn open_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        ALL_SIDES.iter()
            .filter(|side| !self.has_wall(coord, **side))
            .filter_map(|side| self.neighbour_at_direction(coord, *side))
            .collect()
    }

    /// The potential walls of a cell as `(cell, neighbour)` pairs in Top, Right, Bottom,
    /// Left order. No edge is produced towards the outside of the grid.
    pub fn walls_as_edges(&self, coord: GridCoordinate) -> EdgeSmallVec {
        ALL_SIDES.iter()
            .filter_map(|side| self.neighbour_at_direction(coord, *side))
            .map(|neighbour| (coord, neighbour))
            .collect()
    }

    /// Every interior wall of the grid exactly once, wall or passage alike.
    pub fn all_walls(&self) -> Vec<(GridCoordinate, GridCoordinate)> {
        let (cols, rows) = self.shape();
        let mut walls = Vec::with_capacity((cols - 1) * rows + cols * (rows - 1));
        for coord in self.iter() {
            for side in &[WallSide::Right, WallSide::Bottom] {
                if let Some(neighbour) = self.neighbour_at_direction(coord, *side) {
                    walls.push((coord, neighbour));
                }
            }
        }
        walls
    }

    /// Number of passages carved so far.
    pub fn links_count(&self) -> usize {
        self.iter()
            .map(|coord| {
                [WallSide::Right, WallSide::Bottom].iter()
                    .filter(|side| self.is_neighbour_linked(coord, **side))
                    .count()
            })
            .sum()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.columns, self.rows)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.columns, self.rows)
    }

    /// The passages as a petgraph graph. Node `i` is the cell with row major index `i`.
    pub fn passage_graph(&self) -> PassageGraph {
        let mut graph = Graph::with_capacity(self.size(), self.size());
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for coord in self.iter() {
            for side in &[WallSide::Right, WallSide::Bottom] {
                if let Some(neighbour) = self.neighbour_at_direction(coord, *side) {
                    if self.is_linked(coord, neighbour) {
                        let (a, b) = (self.node_index(coord), self.node_index(neighbour));
                        let _ = graph.add_edge(a, b, ());
                    }
                }
            }
        }
        graph
    }

    fn node_index(&self, coord: GridCoordinate) -> NodeIndex {
        NodeIndex::new(coord.y as usize * self.columns.0 + coord.x as usize)
    }

    /// Does every cell pair sharing an edge agree on the wall between them?
    pub fn walls_are_symmetric(&self) -> bool {
        self.iter().all(|coord| {
            [WallSide::Right, WallSide::Bottom].iter().all(|side| {
                match self.neighbour_at_direction(coord, *side) {
                    Some(neighbour) => {
                        self.has_wall(coord, *side) == self.has_wall(neighbour, side.opposite())
                    }
                    None => true,
                }
            })
        })
    }
}
