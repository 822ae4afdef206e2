use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::cells::{CompassPrimary, NodeStatus};
use crate::errors::*;
use crate::grid::{IndexType, MazeGraph};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MoveOutcome {
    /// Stepped onto a cell not on the current trail.
    Moved,
    /// Stepped back onto the previous cell of the trail.
    Backtracked,
    /// A wall or the edge of the grid is in the way, or the walk is already over.
    Blocked,
    ReachedGoal,
}

/// A player walking the maze from the start, one cell at a time.
///
/// The trail is the route from the start to the cell before the current one. Stepping back onto
/// the last trail cell shortens the trail, so at the goal the trail plus the goal is the route taken
/// without its dead ends.
#[derive(Debug, Clone)]
pub struct ManualWalk<GridIndexType: IndexType> {
    current: NodeIndex<GridIndexType>,
    trail: Vec<NodeIndex<GridIndexType>>,
    finished: bool,
}

impl<GridIndexType: IndexType> ManualWalk<GridIndexType> {
    pub fn new(graph: &mut MazeGraph<GridIndexType>) -> Result<ManualWalk<GridIndexType>> {
        let mut walk = ManualWalk { current: graph.start(), trail: vec![], finished: false };
        graph.set_status(walk.current, NodeStatus::Current)?;
        if walk.current == graph.goal() {
            walk.finish(graph)?;
        }
        Ok(walk)
    }

    #[inline]
    pub fn current(&self) -> NodeIndex<GridIndexType> {
        self.current
    }

    #[inline]
    pub fn trail(&self) -> &[NodeIndex<GridIndexType>] {
        &self.trail
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The route from the start to the goal, once the goal is reached.
    pub fn solution(&self) -> Option<Vec<NodeIndex<GridIndexType>>> {
        if self.finished {
            let mut route = self.trail.clone();
            route.push(self.current);
            Some(route)
        } else {
            None
        }
    }

    /// Move one cell in `direction` if there is a passage that way.
    pub fn try_move(&mut self,
                    graph: &mut MazeGraph<GridIndexType>,
                    direction: CompassPrimary)
                    -> Result<MoveOutcome> {
        if self.finished {
            return Ok(MoveOutcome::Blocked);
        }

        let next = match graph.neighbour_at_direction(self.current, direction) {
            Some(next) if graph.is_connected(self.current, next) => next,
            _ => return Ok(MoveOutcome::Blocked),
        };

        let backtracking = self.trail.last() == Some(&next);
        if backtracking {
            let _ = self.trail.pop();
        } else {
            self.trail.push(self.current);
        }
        graph.set_status(self.current, NodeStatus::Visited)?;
        graph.set_status(next, NodeStatus::Current)?;
        self.current = next;

        if next == graph.goal() {
            self.finish(graph)?;
            return Ok(MoveOutcome::ReachedGoal);
        }

        Ok(if backtracking { MoveOutcome::Backtracked } else { MoveOutcome::Moved })
    }

    fn finish(&mut self, graph: &mut MazeGraph<GridIndexType>) -> Result<()> {
        self.finished = true;
        for &node in self.trail.iter().chain(Some(&self.current)) {
            graph.set_status(node, NodeStatus::OnSolutionPath)?;
        }
        debug!(route_len = self.trail.len() + 1, "player reached the goal");
        Ok(())
    }
}
