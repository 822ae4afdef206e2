//! **kruskal_mazes** generates perfect mazes with randomised Kruskal and solves them step by step,
//! depth-first, breadth-first or by hand.

pub mod cells;
pub mod deque;
pub mod disjoint_set;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod logging;
pub mod manual;
pub mod pathing;
pub mod session;
pub mod units;
pub mod worklists;
mod utils;

pub use crate::grid::{LargeMazeGraph, MazeGraph, MediumMazeGraph, SmallMazeGraph};
pub use crate::session::{MazeSession, SolveMode, SolveState};
