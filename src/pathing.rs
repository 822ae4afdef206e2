//! Step driven maze solving.
//!
//! A `Search` advances one unit of work per call to `step` so the caller can redraw the maze
//! between steps. Depth-first and breadth-first differ only in the worklist behind the frontier.
//! The wavefront variant of breadth-first expands a whole frontier layer per step.
//!
//! Every passage counts as one step for the search order. Edge weights only matter while the
//! maze is being generated.

use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::{debug, trace};

use crate::cells::NodeStatus;
use crate::errors::*;
use crate::grid::{IndexType, MazeGraph};
use crate::utils::{self, FnvHashMap};
use crate::worklists::{Queue, Stack, Worklist};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SearchOrder {
    DepthFirst,
    BreadthFirst,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum StepStatus {
    Continuing,
    Solved,
}

type Frontier<GridIndexType> = Box<dyn Worklist<NodeIndex<GridIndexType>>>;

pub struct Search<GridIndexType: IndexType> {
    order: SearchOrder,
    wavefront: bool,
    start: NodeIndex<GridIndexType>,
    goal: NodeIndex<GridIndexType>,
    frontier: Frontier<GridIndexType>,
    came_from: FnvHashMap<NodeIndex<GridIndexType>, EdgeIndex<GridIndexType>>,
    solution: Option<Vec<NodeIndex<GridIndexType>>>,
}

impl<GridIndexType: IndexType> fmt::Debug for Search<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Search :: order: {:?}, wavefront: {}, frontier: {:?}, reached: {}, solved: {}",
               self.order, self.wavefront, self.frontier, self.came_from.len(), self.is_solved())
    }
}

impl<GridIndexType: IndexType> Search<GridIndexType> {
    /// A fresh search from `graph.start()` to `graph.goal()`.
    ///
    /// The frontier holds just the start node, which is marked as `Frontier`. Statuses of other
    /// nodes are left alone, reset them first when reusing a graph.
    /// `wavefront` is ignored for depth-first searches.
    pub fn new(graph: &mut MazeGraph<GridIndexType>,
               order: SearchOrder,
               wavefront: bool)
               -> Result<Search<GridIndexType>> {
        let start = graph.start();
        let mut frontier = new_frontier(order);
        frontier.add(start);
        graph.set_status(start, NodeStatus::Frontier)?;

        Ok(Search {
            order,
            wavefront: wavefront && order == SearchOrder::BreadthFirst,
            start,
            goal: graph.goal(),
            frontier,
            came_from: utils::fnv_hashmap(graph.size()),
            solution: None,
        })
    }

    #[inline]
    pub fn order(&self) -> SearchOrder {
        self.order
    }

    #[inline]
    pub fn is_wavefront(&self) -> bool {
        self.wavefront
    }

    /// Switch between expanding one node and one layer per step. Breadth-first only.
    /// Returns whether wavefront stepping is now on.
    pub fn set_wavefront(&mut self, wavefront: bool) -> bool {
        self.wavefront = wavefront && self.order == SearchOrder::BreadthFirst;
        self.wavefront
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// The path from start to goal, once the goal has been reached.
    pub fn solution(&self) -> Option<&[NodeIndex<GridIndexType>]> {
        self.solution.as_deref()
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The edge a node was first reached through.
    pub fn predecessor(&self, node: NodeIndex<GridIndexType>) -> Option<EdgeIndex<GridIndexType>> {
        self.came_from.get(&node).cloned()
    }

    /// Advance the search by one node, or by one whole frontier layer in wavefront mode.
    ///
    /// Once solved every further call returns `Solved` straight away. An empty frontier before the
    /// goal is found means the goal is unreachable, which a generated maze never allows, and is
    /// reported as `EmptyCollection`.
    pub fn step(&mut self, graph: &mut MazeGraph<GridIndexType>) -> Result<StepStatus> {
        if self.is_solved() {
            return Ok(StepStatus::Solved);
        }

        if self.wavefront {
            self.step_wavefront(graph)
        } else {
            self.step_single(graph)
        }
    }

    fn step_single(&mut self, graph: &mut MazeGraph<GridIndexType>) -> Result<StepStatus> {
        let node = self.frontier.remove()?;
        trace!(node = node.index(), frontier = self.frontier.len(), "expanding node");

        if self.visit(graph, node)? {
            return Ok(StepStatus::Solved);
        }
        discover_neighbours(graph, node, &mut self.came_from, self.frontier.as_mut())?;
        Ok(StepStatus::Continuing)
    }

    fn step_wavefront(&mut self, graph: &mut MazeGraph<GridIndexType>) -> Result<StepStatus> {
        if self.frontier.is_empty() {
            return Err(ErrorKind::EmptyCollection.into());
        }
        trace!(layer = self.frontier.len(), "expanding wavefront");

        let mut next_layer: Queue<NodeIndex<GridIndexType>> = Queue::new();
        while !self.frontier.is_empty() {
            let node = self.frontier.remove()?;
            if self.visit(graph, node)? {
                return Ok(StepStatus::Solved);
            }
            discover_neighbours(graph, node, &mut self.came_from, &mut next_layer)?;
        }
        self.frontier = Box::new(next_layer);

        Ok(StepStatus::Continuing)
    }

    // Mark `node` visited. Returns true, with the solution recorded, if it is the goal.
    fn visit(&mut self, graph: &mut MazeGraph<GridIndexType>, node: NodeIndex<GridIndexType>) -> Result<bool> {
        graph.set_status(node, NodeStatus::Visited)?;
        if node != self.goal {
            return Ok(false);
        }

        let path = self.reconstruct(graph, node)?;
        for &path_node in &path {
            graph.set_status(path_node, NodeStatus::OnSolutionPath)?;
        }
        debug!(path_len = path.len(), reached = self.came_from.len() + 1, "search reached the goal");
        self.solution = Some(path);
        Ok(true)
    }

    /// Walk the predecessor edges back from `end` to the start.
    /// Returns the nodes in order from the start to `end`.
    pub fn reconstruct(&self,
                       graph: &MazeGraph<GridIndexType>,
                       end: NodeIndex<GridIndexType>)
                       -> Result<Vec<NodeIndex<GridIndexType>>> {
        let mut path = vec![end];
        let mut current = end;

        while current != self.start {
            let edge = self.came_from
                .get(&current)
                .ok_or_else(|| ErrorKind::BrokenPredecessorChain(current.index()))?;
            current = graph.other_endpoint(*edge, current)?;
            path.push(current);

            // A chain longer than the grid has looped back on itself.
            if path.len() > graph.size() {
                return Err(ErrorKind::BrokenPredecessorChain(current.index()).into());
            }
        }

        path.reverse();
        Ok(path)
    }
}

fn new_frontier<GridIndexType: IndexType>(order: SearchOrder) -> Frontier<GridIndexType> {
    match order {
        SearchOrder::DepthFirst => Box::new(Stack::new()),
        SearchOrder::BreadthFirst => Box::new(Queue::new()),
    }
}

// Queue every not yet reached neighbour of `node` and remember the edge that found it.
// Neighbours are marked on discovery so no node is ever queued twice.
fn discover_neighbours<GridIndexType: IndexType>(
    graph: &mut MazeGraph<GridIndexType>,
    node: NodeIndex<GridIndexType>,
    came_from: &mut FnvHashMap<NodeIndex<GridIndexType>, EdgeIndex<GridIndexType>>,
    worklist: &mut dyn Worklist<NodeIndex<GridIndexType>>)
    -> Result<()> {

    for edge in graph.incident_edges(node) {
        let other = graph.other_endpoint(edge, node)?;
        let status = graph.status(other).ok_or_else(|| ErrorKind::InvalidNode(other.index()))?;
        if !status.is_reached() {
            worklist.add(other);
            graph.set_status(other, NodeStatus::Frontier)?;
            let _ = came_from.insert(other, edge);
        }
    }
    Ok(())
}
