//! Union-find over maze nodes.
//!
//! The partition is a plain node -> representative mapping. There is no path compression and no
//! union by rank, so `find` walks the whole chain of representatives every time. On a maze grid the
//! chains stay short enough that this never shows up next to the cost of building the graph.

use petgraph::graph::{IndexType, NodeIndex};

use crate::errors::*;
use crate::utils::{self, FnvHashMap};

/// A node that was the root of its group when `find` returned it.
///
/// Only `Partition::find` can create one, so `union` can never be handed an arbitrary node.
/// It is deliberately neither `Copy` nor `Clone`: `union` consumes both handles, so a handle
/// cannot be reused after the merge that made it stale.
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct Representative<GridIndexType: IndexType>(NodeIndex<GridIndexType>);

impl<GridIndexType: IndexType> Representative<GridIndexType> {
    #[inline]
    pub fn node(&self) -> NodeIndex<GridIndexType> {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Partition<GridIndexType: IndexType> {
    representatives: FnvHashMap<NodeIndex<GridIndexType>, NodeIndex<GridIndexType>>,
}

impl<GridIndexType: IndexType> Partition<GridIndexType> {
    pub fn with_capacity(nodes_count: usize) -> Partition<GridIndexType> {
        Partition { representatives: utils::fnv_hashmap(nodes_count) }
    }

    /// Put `node` in a group of its own.
    pub fn insert_singleton(&mut self, node: NodeIndex<GridIndexType>) {
        let _ = self.representatives.insert(node, node);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeIndex<GridIndexType>) -> bool {
        self.representatives.contains_key(&node)
    }

    /// Follow representatives from `node` until reaching a node that is its own representative.
    ///
    /// Fails only if some node on the chain was never inserted, which is a bug in whoever built
    /// the partition.
    pub fn find(&self, node: NodeIndex<GridIndexType>) -> Result<Representative<GridIndexType>> {
        let mut current = node;
        loop {
            let rep = *self.representatives
                .get(&current)
                .ok_or_else(|| ErrorKind::NodeNotInPartition(current.index()))?;
            if rep == current {
                return Ok(Representative(current));
            }
            current = rep;
        }
    }

    /// Merge two groups by pointing the root `a` at the root `b`.
    ///
    /// Both roots are checked again, a handle taken before an unrelated merge may no longer be a root.
    pub fn union(&mut self,
                 a: Representative<GridIndexType>,
                 b: Representative<GridIndexType>)
                 -> Result<()> {
        let (root_a, root_b) = (a.node(), b.node());
        for root in &[root_a, root_b] {
            match self.representatives.get(root) {
                Some(rep) if rep == root => {}
                Some(_) => return Err(ErrorKind::StaleRepresentative(root.index()).into()),
                None => return Err(ErrorKind::NodeNotInPartition(root.index()).into()),
            }
        }

        let _ = self.representatives.insert(root_a, root_b);
        Ok(())
    }

    /// Number of disjoint groups.
    pub fn groups_count(&self) -> usize {
        self.representatives.iter().filter(|&(node, rep)| node == rep).count()
    }
}
