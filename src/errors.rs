// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get everything `error_chain!` creates.
#![allow(deprecated)]

use error_chain::*;

use crate::cells::GridCoordinate;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        EmptyGrid(cols: usize, rows: usize) {
            description("grid must have at least one cell")
            display("a {}x{} grid has no cells", cols, rows)
        }
        InvalidGridCoordinate(coord: GridCoordinate) {
            description("coordinate outside of the grid")
            display("coordinate {} lies outside the grid", coord)
        }
        CellsNotAdjacent(a: GridCoordinate, b: GridCoordinate) {
            description("cells are not orthogonally adjacent")
            display("cannot remove a wall between {} and {}: not adjacent", a, b)
        }
        GridSizeMismatch(expected: (usize, usize), found: (usize, usize)) {
            description("stepper used with a grid of a different size")
            display("stepper initialised for a {}x{} grid but stepped on a {}x{} grid",
                    expected.0, expected.1, found.0, found.1)
        }
        MalformedWallMatrix(reason: String) {
            description("malformed wall matrix")
            display("malformed wall matrix: {}", reason)
        }
        UnknownAlgorithm(name: String) {
            description("unknown algorithm name")
            display("unknown algorithm '{}'", name)
        }
        InvalidSettings(reason: String) {
            description("invalid settings")
            display("invalid settings: {}", reason)
        }
        InvalidPhase(request: &'static str, phase: String) {
            description("request not allowed in the current run phase")
            display("cannot {} while {}", request, phase)
        }
    }
}
