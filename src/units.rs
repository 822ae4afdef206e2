#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);

/// Seed for the edge weight random source. The same seed always builds the same maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Seed(pub u64);

/// Cell count and full candidate edge count of a `width * height` grid, before any pruning.
///
/// Every cell links up (except the first row) and left (except the first column), which gives
/// `w*(h-1) + h*(w-1)` edges. None if either count overflows `usize`.
pub fn grid_graph_size(Width(w): Width, Height(h): Height) -> Option<(NodesCount, EdgesCount)> {
    let nodes = w.checked_mul(h)?;
    let edges = w.checked_mul(h.saturating_sub(1))?
        .checked_add(h.checked_mul(w.saturating_sub(1))?)?;
    Some((NodesCount(nodes), EdgesCount(edges)))
}
