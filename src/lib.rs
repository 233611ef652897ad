//! **maze_steppers** generates and solves rectangular grid mazes one small step at a time, so
//! that an outside loop can animate the algorithms frame by frame.
//!
//! Generators: recursive backtracker, Kruskal, Prim and Wilson.
//! Solvers: depth first, breadth first, Dijkstra, A* and the random mouse.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod session;
pub mod settings;
pub mod stepper;
pub mod union_find;
pub mod units;
pub mod utils;
pub mod wall_matrix;
