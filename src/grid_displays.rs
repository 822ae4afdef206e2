use std::fmt;

use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, NodeStatus};
use crate::grid::{IndexType, MazeGraph};
use crate::units::{Height, Width};

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

/// Three characters for the room space of a cell.
/// The start and goal markers win over the traversal status.
pub fn cell_body<GridIndexType: IndexType>(maze: &MazeGraph<GridIndexType>,
                                           node: NodeIndex<GridIndexType>)
                                           -> &'static str {
    if node == maze.start() {
        return " S ";
    }
    if node == maze.goal() {
        return " E ";
    }
    match maze.status(node).unwrap_or_default() {
        NodeStatus::Unvisited => "   ",
        NodeStatus::Frontier => " + ",
        NodeStatus::Visited => " . ",
        NodeStatus::Current => " @ ",
        NodeStatus::OnSolutionPath => " * ",
    }
}

impl<GridIndexType: IndexType> fmt::Display for MazeGraph<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Width(columns_count) = self.width();
        let Height(rows_count) = self.height();

        let node = |x: usize, y: usize| {
            NodeIndex::<GridIndexType>::new(y * columns_count + x)
        };
        let open = |x: usize, y: usize, dir| self.is_neighbour_connected(node(x, y), dir);

        // The north most boundary. Every row after that draws its own southern walls.
        let top = (0..columns_count)
            .map(|x| {
                let corner = if open(x, 0, CompassPrimary::East) {
                    WALL_LR
                } else if x == columns_count - 1 {
                    WALL_LD
                } else {
                    WALL_LRD
                };
                format!("{}{}", WALL_LR_3, corner)
            })
            .join("");
        writeln!(f, "{}{}", WALL_RD, top)?;

        for y in 0..rows_count {
            let is_last_row = y == rows_count - 1;

            let mut middle = String::from(WALL_UD);
            let mut bottom = String::from(if is_last_row {
                WALL_RU
            } else if open(0, y, CompassPrimary::South) {
                WALL_UD
            } else {
                WALL_RUD
            });

            for x in 0..columns_count {
                let is_last_column = x == columns_count - 1;
                let east_open = open(x, y, CompassPrimary::East);
                let south_open = open(x, y, CompassPrimary::South);

                middle.push_str(cell_body(self, node(x, y)));
                middle.push_str(if east_open { " " } else { WALL_UD });

                bottom.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let show_left = !south_open;
                        let show_right = !open(x + 1, y, CompassPrimary::South);
                        let show_up = !east_open;
                        let show_down = !open(x, y + 1, CompassPrimary::East);

                        match (show_left, show_right, show_up, show_down) {
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
                            (false, false, false, false) => " ",
                        }
                    }
                };
                bottom.push_str(corner);
            }

            writeln!(f, "{}", middle)?;
            writeln!(f, "{}", bottom)?;
        }
        Ok(())
    }
}

/// Coordinates of the cells with the given status, row by row.
pub fn cells_with_status<GridIndexType: IndexType>(maze: &MazeGraph<GridIndexType>,
                                                   status: NodeStatus)
                                                   -> Vec<Cartesian2DCoordinate> {
    (0..maze.size())
        .map(NodeIndex::<GridIndexType>::new)
        .filter(|&node| maze.status(node) == Some(status))
        .filter_map(|node| maze.coordinate_of(node))
        .collect()
}
