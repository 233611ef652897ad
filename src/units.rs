#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

/// Pixel dimensions of the canvas a caller draws the maze on.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Side length in pixels of one square cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellSize(pub usize);
