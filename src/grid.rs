use std::fmt;

use petgraph::Undirected;
pub use petgraph::graph::IndexType;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use rand::Rng;
use smallvec::SmallVec;
use tracing::debug;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, NodeStatus};
use crate::disjoint_set::Partition;
use crate::errors::*;
use crate::units::{self, EdgesCount, Height, NodesCount, Width};
use crate::utils::{self, FnvHashSet};

/// Edge weights are drawn from `0..MAX_EDGE_WEIGHT`.
pub const MAX_EDGE_WEIGHT: u8 = 100;

#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct EdgeWeight(pub u8);

pub type EdgeSmallVec<GridIndexType> = SmallVec<[EdgeIndex<GridIndexType>; 4]>;
pub type NodeSmallVec<GridIndexType> = SmallVec<[NodeIndex<GridIndexType>; 4]>;

/// A rectangular grid of cells, one graph node per cell, joined by weighted edges wherever
/// there is a passage.
///
/// Nodes and edges live in a petgraph `StableGraph` and are addressed by index. Removing an edge
/// detaches it from both of its endpoints and never renumbers any other edge or node, so the
/// candidate edge list built alongside the grid stays valid while walls are put back in.
pub struct MazeGraph<GridIndexType: IndexType = u32> {
    graph: StableGraph<NodeStatus, EdgeWeight, Undirected, GridIndexType>,
    width: Width,
    height: Height,
}

pub type SmallMazeGraph = MazeGraph<u8>;
pub type MediumMazeGraph = MazeGraph<u16>;
pub type LargeMazeGraph = MazeGraph<u32>;

/// Everything the grid builder produces: the fully connected grid, every edge in creation order
/// and a partition with each node in a group of its own.
pub struct GridBuild<GridIndexType: IndexType> {
    pub graph: MazeGraph<GridIndexType>,
    pub candidate_edges: Vec<EdgeIndex<GridIndexType>>,
    pub partition: Partition<GridIndexType>,
}

impl<GridIndexType: IndexType> fmt::Debug for MazeGraph<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGraph :: width: {}, height: {}, nodes: {}, edges: {}",
               self.width.0, self.height.0, self.graph.node_count(), self.graph.edge_count())
    }
}

impl<GridIndexType: IndexType> MazeGraph<GridIndexType> {
    /// A grid of unlinked cells, every cell with status `Unvisited`.
    ///
    /// Fails if either dimension is zero or if the cells or the edges a full grid would need
    /// do not fit in `GridIndexType`.
    pub fn new(width: Width, height: Height) -> Result<MazeGraph<GridIndexType>> {
        if width.0 == 0 || height.0 == 0 {
            return Err(ErrorKind::InvalidDimensions(width.0, height.0).into());
        }

        let (NodesCount(nodes), EdgesCount(edges)) = units::grid_graph_size(width, height)
            .ok_or_else(|| ErrorKind::GridTooLarge(width.0.saturating_mul(height.0), usize::MAX))?;
        let index_limit = <GridIndexType as IndexType>::max().index();
        if nodes >= index_limit || edges >= index_limit {
            return Err(ErrorKind::GridTooLarge(nodes, edges).into());
        }

        let mut graph = StableGraph::with_capacity(nodes, edges);
        for _ in 0..nodes {
            let _ = graph.add_node(NodeStatus::Unvisited);
        }

        Ok(MazeGraph { graph, width, height })
    }

    /// Build a grid where every pair of adjacent cells is connected, each edge with an independently
    /// drawn random weight.
    ///
    /// Cells are visited row by row, top to bottom, left to right. Each cell is linked to the cell
    /// above it and then to the cell to its left, so the candidate list comes back in a fixed order
    /// for any given random source.
    pub fn fully_connected<R: Rng>(width: Width,
                                   height: Height,
                                   rng: &mut R)
                                   -> Result<GridBuild<GridIndexType>> {
        let mut graph = MazeGraph::new(width, height)?;
        let (NodesCount(nodes), EdgesCount(edges)) = units::grid_graph_size(width, height)
            .ok_or_else(|| ErrorKind::GridTooLarge(width.0.saturating_mul(height.0), usize::MAX))?;

        let mut candidate_edges = Vec::with_capacity(edges);
        let mut partition = Partition::with_capacity(nodes);

        for y in 0..height.0 {
            for x in 0..width.0 {
                let node = NodeIndex::new(y * width.0 + x);
                partition.insert_singleton(node);

                if y > 0 {
                    let above = NodeIndex::new((y - 1) * width.0 + x);
                    let weight = EdgeWeight(rng.gen_range(0..MAX_EDGE_WEIGHT));
                    candidate_edges.push(graph.connect(node, above, weight));
                }
                if x > 0 {
                    let left = NodeIndex::new(y * width.0 + x - 1);
                    let weight = EdgeWeight(rng.gen_range(0..MAX_EDGE_WEIGHT));
                    candidate_edges.push(graph.connect(node, left, weight));
                }
            }
        }
        debug!(width = width.0, height = height.0, candidates = candidate_edges.len(),
               "built fully connected grid");

        Ok(GridBuild { graph, candidate_edges, partition })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of passages currently in the grid.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The top left cell, where every solve starts.
    #[inline]
    pub fn start(&self) -> NodeIndex<GridIndexType> {
        NodeIndex::new(0)
    }

    /// The bottom right cell.
    #[inline]
    pub fn goal(&self) -> NodeIndex<GridIndexType> {
        NodeIndex::new(self.size() - 1)
    }

    /// Convert a grid coordinate to its node. Returns None if the coordinate is outside the grid.
    pub fn node_at(&self, coord: Cartesian2DCoordinate) -> Option<NodeIndex<GridIndexType>> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < self.width.0 && y < self.height.0 {
            Some(NodeIndex::new(y * self.width.0 + x))
        } else {
            None
        }
    }

    pub fn coordinate_of(&self, node: NodeIndex<GridIndexType>) -> Option<Cartesian2DCoordinate> {
        if self.contains_node(node) {
            let index = node.index();
            Some(Cartesian2DCoordinate::new((index % self.width.0) as u32,
                                            (index / self.width.0) as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn contains_node(&self, node: NodeIndex<GridIndexType>) -> bool {
        self.graph.contains_node(node)
    }

    /// The cell next to `node` in the given direction, whether or not there is a passage to it.
    pub fn neighbour_at_direction(&self,
                                  node: NodeIndex<GridIndexType>,
                                  direction: CompassPrimary)
                                  -> Option<NodeIndex<GridIndexType>> {
        self.coordinate_of(node)
            .and_then(|coord| coord.offset(direction))
            .and_then(|neighbour_coord| self.node_at(neighbour_coord))
    }

    /// Join two cells with a new edge, registered with both endpoints.
    pub(crate) fn connect(&mut self,
                          a: NodeIndex<GridIndexType>,
                          b: NodeIndex<GridIndexType>,
                          weight: EdgeWeight)
                          -> EdgeIndex<GridIndexType> {
        self.graph.add_edge(a, b, weight)
    }

    /// Detach an edge from both of its endpoints. Returns false if the edge was already gone.
    pub(crate) fn remove_edge(&mut self, edge: EdgeIndex<GridIndexType>) -> bool {
        self.graph.remove_edge(edge).is_some()
    }

    /// Is there a passage between the two cells?
    /// False for invalid nodes, and for a node with itself.
    pub fn is_connected(&self, a: NodeIndex<GridIndexType>, b: NodeIndex<GridIndexType>) -> bool {
        self.contains_node(a) && self.contains_node(b) && self.graph.find_edge(a, b).is_some()
    }

    pub fn is_neighbour_connected(&self,
                                  node: NodeIndex<GridIndexType>,
                                  direction: CompassPrimary)
                                  -> bool {
        self.neighbour_at_direction(node, direction)
            .map_or(false, |neighbour| self.is_connected(node, neighbour))
    }

    pub fn edge_endpoints(&self,
                          edge: EdgeIndex<GridIndexType>)
                          -> Option<(NodeIndex<GridIndexType>, NodeIndex<GridIndexType>)> {
        self.graph.edge_endpoints(edge)
    }

    pub fn edge_weight(&self, edge: EdgeIndex<GridIndexType>) -> Option<EdgeWeight> {
        self.graph.edge_weight(edge).cloned()
    }

    /// The endpoint of `edge` that is not `node`.
    /// Asking about a node the edge does not touch is a caller bug.
    pub fn other_endpoint(&self,
                          edge: EdgeIndex<GridIndexType>,
                          node: NodeIndex<GridIndexType>)
                          -> Result<NodeIndex<GridIndexType>> {
        match self.edge_endpoints(edge) {
            Some((a, b)) if a == node => Ok(b),
            Some((a, b)) if b == node => Ok(a),
            _ => Err(ErrorKind::EdgeNotIncident(edge.index(), node.index()).into()),
        }
    }

    /// Edges currently attached to `node`. The order is fixed for a given build sequence.
    pub fn incident_edges(&self, node: NodeIndex<GridIndexType>) -> EdgeSmallVec<GridIndexType> {
        if self.contains_node(node) {
            self.graph.edges(node).map(|edge_ref| edge_ref.id()).collect()
        } else {
            EdgeSmallVec::new()
        }
    }

    /// Cells joined to `node` by a passage.
    pub fn links(&self, node: NodeIndex<GridIndexType>) -> NodeSmallVec<GridIndexType> {
        if self.contains_node(node) {
            self.graph.neighbors(node).collect()
        } else {
            NodeSmallVec::new()
        }
    }

    /// All passages as pairs of coordinates.
    pub fn iter_links<'a>(&'a self)
                          -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + 'a {
        self.graph.edge_indices().filter_map(move |edge| {
            let (a, b) = self.edge_endpoints(edge)?;
            Some((self.coordinate_of(a)?, self.coordinate_of(b)?))
        })
    }

    #[inline]
    pub fn status(&self, node: NodeIndex<GridIndexType>) -> Option<NodeStatus> {
        self.graph.node_weight(node).cloned()
    }

    pub(crate) fn set_status(&mut self,
                             node: NodeIndex<GridIndexType>,
                             status: NodeStatus)
                             -> Result<()> {
        let slot = self.graph
            .node_weight_mut(node)
            .ok_or_else(|| ErrorKind::InvalidNode(node.index()))?;
        *slot = status;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn remove_cell(&mut self, node: NodeIndex<GridIndexType>) {
        let _ = self.graph.remove_node(node);
    }

    /// Put every cell back to `Unvisited`.
    pub(crate) fn reset_statuses(&mut self) {
        let nodes = self.graph.node_indices().collect::<Vec<_>>();
        for node in nodes {
            if let Some(status) = self.graph.node_weight_mut(node) {
                *status = NodeStatus::Unvisited;
            }
        }
    }

    /// Every node reachable from `node` through passages, including `node` itself.
    pub fn reachable_from(&self, node: NodeIndex<GridIndexType>) -> FnvHashSet<NodeIndex<GridIndexType>> {
        let mut reached = utils::fnv_hashset(self.size());
        if !self.contains_node(node) {
            return reached;
        }

        let mut pending = vec![node];
        let _ = reached.insert(node);
        while let Some(current) = pending.pop() {
            for neighbour in self.graph.neighbors(current) {
                if reached.insert(neighbour) {
                    pending.push(neighbour);
                }
            }
        }
        reached
    }
}
