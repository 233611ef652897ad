use crate::cells::GridCoordinate;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Row major iteration over every coordinate of a grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    columns: ColumnsCount,
}

impl CellIter {
    pub(crate) fn new(columns: ColumnsCount, rows: RowsCount) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: columns.0 * rows.0,
            columns,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        (lower_bound, Some(lower_bound))
    }
}

/// Iterates the grid one row of coordinates at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    columns: ColumnsCount,
    rows: RowsCount,
}

impl RowIter {
    pub(crate) fn new(columns: ColumnsCount, rows: RowsCount) -> RowIter {
        RowIter {
            current_row: 0,
            columns,
            rows,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let RowsCount(rows_count) = self.rows;
        if self.current_row < rows_count {
            let ColumnsCount(length) = self.columns;
            let row = self.current_row;
            let coords = (0..length)
                .map(|i| GridCoordinate::from_row_column_indices(ColumnIndex(i), RowIndex(row)))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows.0 - self.current_row;
        (lower_bound, Some(lower_bound))
    }
}
