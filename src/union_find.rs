use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::units::{ColumnsCount, RowsCount};

/// Disjoint sets over the cells of a grid, each cell starting out in a set of its own.
/// Parents and ranks are stored by row major cell index.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    columns: usize,
    rows: usize,
    parents: Vec<usize>,
    ranks: Vec<u8>,
    sets_count: usize,
}

impl DisjointSet {
    pub fn new(columns: ColumnsCount, rows: RowsCount) -> DisjointSet {
        let cells_count = columns.0 * rows.0;
        DisjointSet {
            columns: columns.0,
            rows: rows.0,
            parents: (0..cells_count).collect(),
            ranks: vec![0; cells_count],
            sets_count: cells_count,
        }
    }

    fn index(&self, coord: GridCoordinate) -> Result<usize> {
        if (coord.x as usize) < self.columns && (coord.y as usize) < self.rows {
            Ok(coord.y as usize * self.columns + coord.x as usize)
        } else {
            Err(ErrorKind::InvalidGridCoordinate(coord).into())
        }
    }

    fn coordinate(&self, index: usize) -> GridCoordinate {
        GridCoordinate::new((index % self.columns) as u32, (index / self.columns) as u32)
    }

    fn find_root(&mut self, index: usize) -> usize {
        let mut root = index;
        while self.parents[root] != root {
            root = self.parents[root];
        }

        // Point everything on the way up straight at the root.
        let mut node = index;
        while self.parents[node] != root {
            let next = self.parents[node];
            self.parents[node] = root;
            node = next;
        }
        root
    }

    /// The representative of the set containing `coord`.
    pub fn find(&mut self, coord: GridCoordinate) -> Result<GridCoordinate> {
        let index = self.index(coord)?;
        let root = self.find_root(index);
        Ok(self.coordinate(root))
    }

    /// Merge the sets of `a` and `b`. Returns false if they were already one set.
    /// On equal ranks the root of `a` becomes the parent.
    pub fn union(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<bool> {
        let (a_index, b_index) = (self.index(a)?, self.index(b)?);
        let (a_root, b_root) = (self.find_root(a_index), self.find_root(b_index));
        if a_root == b_root {
            return Ok(false);
        }

        if self.ranks[a_root] < self.ranks[b_root] {
            self.parents[a_root] = b_root;
        } else if self.ranks[a_root] > self.ranks[b_root] {
            self.parents[b_root] = a_root;
        } else {
            self.parents[b_root] = a_root;
            self.ranks[a_root] += 1;
        }
        self.sets_count -= 1;
        Ok(true)
    }

    pub fn same_set(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    pub fn sets_count(&self) -> usize {
        self.sets_count
    }
}
