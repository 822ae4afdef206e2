use petgraph::graph::EdgeIndex;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tracing::debug;

use crate::disjoint_set::Partition;
use crate::errors::*;
use crate::grid::{IndexType, MazeGraph};
use crate::units::{Height, Seed, Width};

/// Generate a perfect maze with randomized Kruskal.
///
/// The grid starts fully connected with a random weight on every edge, the minimum spanning tree
/// of that graph is kept and every other edge is removed and becomes a wall. The same seed always
/// gives the same maze.
pub fn generate<GridIndexType>(width: Width,
                               height: Height,
                               seed: Seed)
                               -> Result<MazeGraph<GridIndexType>>
    where GridIndexType: IndexType
{
    let mut rng = XorShiftRng::seed_from_u64(seed.0);
    kruskal(width, height, &mut rng)
}

/// `generate` with a caller supplied random source.
pub fn kruskal<GridIndexType, R>(width: Width,
                                 height: Height,
                                 rng: &mut R)
                                 -> Result<MazeGraph<GridIndexType>>
    where GridIndexType: IndexType,
          R: Rng
{
    let build = MazeGraph::fully_connected(width, height, rng)?;
    let mut graph = build.graph;

    let mut kruskal = KruskalMaze::new(&graph, build.candidate_edges, build.partition);
    kruskal.run(&graph)?;
    let removed = kruskal.remove_leftover(&mut graph);

    debug!(width = width.0, height = height.0, passages = graph.links_count(), walls = removed,
           "generated kruskal maze");
    Ok(graph)
}

/// Randomized Kruskal's algorithm over a prepared grid.
///
/// Splits the candidate edges into the spanning tree and the leftovers. Leftovers are the edges
/// that would have closed a cycle plus whatever was never looked at once the tree was complete.
#[derive(Debug)]
pub struct KruskalMaze<GridIndexType: IndexType> {
    partition: Partition<GridIndexType>,
    worklist: Vec<EdgeIndex<GridIndexType>>,
    spanning: Vec<EdgeIndex<GridIndexType>>,
    leftover: Vec<EdgeIndex<GridIndexType>>,
}

impl<GridIndexType: IndexType> KruskalMaze<GridIndexType> {
    /// Orders the candidates by ascending weight. The sort is stable, equal weights keep their
    /// creation order, which is what makes a seeded maze reproducible.
    pub fn new(graph: &MazeGraph<GridIndexType>,
               mut candidate_edges: Vec<EdgeIndex<GridIndexType>>,
               partition: Partition<GridIndexType>)
               -> KruskalMaze<GridIndexType> {
        candidate_edges.sort_by_key(|&edge| graph.edge_weight(edge));

        KruskalMaze {
            partition,
            worklist: candidate_edges,
            spanning: vec![],
            leftover: vec![],
        }
    }

    /// Accept edges cheapest first until the tree spans every node in the partition.
    /// Returns the spanning tree edges in acceptance order.
    pub fn run(&mut self, graph: &MazeGraph<GridIndexType>) -> Result<&[EdgeIndex<GridIndexType>]> {
        let needed = self.partition.len().saturating_sub(1);
        let mut candidates = self.worklist.drain(..);

        while self.spanning.len() < needed {
            let edge = match candidates.next() {
                Some(edge) => edge,
                None => return Err(ErrorKind::DisconnectedGrid(self.spanning.len(), needed).into()),
            };
            let (a, b) = graph.edge_endpoints(edge)
                .ok_or_else(|| ErrorKind::InvalidEdge(edge.index()))?;

            let rep_a = self.partition.find(a)?;
            let rep_b = self.partition.find(b)?;
            if rep_a == rep_b {
                self.leftover.push(edge);
            } else {
                self.spanning.push(edge);
                self.partition.union(rep_a, rep_b)?;
            }
        }
        self.leftover.extend(candidates);

        Ok(&self.spanning)
    }

    /// Put the walls in: detach every leftover edge from both of its endpoints.
    /// Returns how many edges were removed.
    pub fn remove_leftover(&self, graph: &mut MazeGraph<GridIndexType>) -> usize {
        let mut removed = 0;
        for &edge in &self.leftover {
            if graph.remove_edge(edge) {
                removed += 1;
            }
        }
        removed
    }

    #[inline]
    pub fn spanning_edges(&self) -> &[EdgeIndex<GridIndexType>] {
        &self.spanning
    }

    #[inline]
    pub fn leftover_edges(&self) -> &[EdgeIndex<GridIndexType>] {
        &self.leftover
    }

    #[inline]
    pub fn partition(&self) -> &Partition<GridIndexType> {
        &self.partition
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use petgraph::graph::NodeIndex;
    use quickcheck::quickcheck;

    use super::*;
    use crate::cells::COMPASS_PRIMARY_DIRECTIONS;
    use crate::grid::EdgeWeight;

    fn maze(w: usize, h: usize, seed: u64) -> MazeGraph<u32> {
        generate(Width(w), Height(h), Seed(seed)).expect("maze generation failed")
    }

    fn sorted_links(g: &MazeGraph<u32>) -> Vec<(u32, u32, u32, u32)> {
        g.iter_links().map(|(a, b)| (a.x, a.y, b.x, b.y)).sorted().collect()
    }

    // 3 x 2 grid with hand picked weights:
    //   0 - 1 - 2
    //   |   |   |
    //   3 - 4 - 5
    fn hand_weighted_grid(weights: &[(usize, usize, u8)])
                          -> (MazeGraph<u32>, Vec<EdgeIndex<u32>>, Partition<u32>) {
        let mut g = MazeGraph::new(Width(3), Height(2)).unwrap();
        let mut partition = Partition::with_capacity(6);
        for i in 0..6 {
            partition.insert_singleton(NodeIndex::new(i));
        }
        let edges = weights.iter()
            .map(|&(a, b, w)| g.connect(NodeIndex::new(a), NodeIndex::new(b), EdgeWeight(w)))
            .collect();
        (g, edges, partition)
    }

    fn endpoint_indices(g: &MazeGraph<u32>, edges: &[EdgeIndex<u32>]) -> Vec<(usize, usize)> {
        edges.iter()
            .map(|&e| {
                let (a, b) = g.edge_endpoints(e).unwrap();
                (a.index(), b.index())
            })
            .collect()
    }

    #[test]
    fn cycle_closing_edges_are_rejected() {
        let (mut g, edges, partition) = hand_weighted_grid(&[(2, 5, 90),
                                                             (3, 4, 25),
                                                             (0, 1, 10),
                                                             (1, 4, 15),
                                                             (4, 5, 35),
                                                             (0, 3, 20),
                                                             (1, 2, 30)]);
        let mut kruskal = KruskalMaze::new(&g, edges, partition);
        let spanning = kruskal.run(&g).unwrap().to_vec();

        assert_eq!(endpoint_indices(&g, &spanning),
                   vec![(0, 1), (1, 4), (0, 3), (1, 2), (4, 5)]);
        // 3-4 closes the 0-1-4-3 loop, 2-5 is never examined.
        assert_eq!(endpoint_indices(&g, kruskal.leftover_edges()), vec![(3, 4), (2, 5)]);
        assert_eq!(kruskal.partition().groups_count(), 1);

        assert_eq!(kruskal.remove_leftover(&mut g), 2);
        assert_eq!(g.links_count(), 5);
        assert!(!g.is_connected(NodeIndex::new(3), NodeIndex::new(4)));
        assert!(!g.is_connected(NodeIndex::new(5), NodeIndex::new(2)));
        assert!(g.is_connected(NodeIndex::new(4), NodeIndex::new(1)));
    }

    #[test]
    fn equal_weights_keep_creation_order() {
        let (g, edges, partition) = hand_weighted_grid(&[(0, 1, 7),
                                                         (1, 2, 7),
                                                         (0, 3, 7),
                                                         (1, 4, 3),
                                                         (3, 4, 7),
                                                         (2, 5, 7),
                                                         (4, 5, 7)]);
        let mut kruskal = KruskalMaze::new(&g, edges, partition);
        let spanning = kruskal.run(&g).unwrap().to_vec();
        assert_eq!(endpoint_indices(&g, &spanning),
                   vec![(1, 4), (0, 1), (1, 2), (0, 3), (2, 5)]);
        assert_eq!(endpoint_indices(&g, kruskal.leftover_edges()), vec![(3, 4), (4, 5)]);
    }

    #[test]
    fn running_out_of_candidates_is_an_error() {
        // No edge reaches node 5.
        let (g, edges, partition) = hand_weighted_grid(&[(0, 1, 1), (1, 2, 2), (0, 3, 3), (3, 4, 4)]);
        let mut kruskal = KruskalMaze::new(&g, edges, partition);
        match kruskal.run(&g) {
            Err(Error(ErrorKind::DisconnectedGrid(4, 5), _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn spanning_and_leftover_partition_the_candidates() {
        let mut rng = XorShiftRng::seed_from_u64(5);
        let build = MazeGraph::<u32>::fully_connected(Width(7), Height(6), &mut rng).unwrap();
        let all = build.candidate_edges.iter().cloned().sorted().collect::<Vec<_>>();

        let mut kruskal = KruskalMaze::new(&build.graph, build.candidate_edges, build.partition);
        kruskal.run(&build.graph).unwrap();
        assert_eq!(kruskal.spanning_edges().len(), 7 * 6 - 1);

        let recombined = kruskal.spanning_edges()
            .iter()
            .chain(kruskal.leftover_edges())
            .cloned()
            .sorted()
            .collect::<Vec<_>>();
        assert_eq!(recombined, all);
    }

    #[test]
    fn small_regression_maze() {
        let g = maze(4, 3, 2024);
        assert_eq!(g.links_count(), 11);
        assert_eq!(g.reachable_from(g.start()).len(), 12);
    }

    #[test]
    fn large_maze() {
        let g = maze(100, 60, 1);
        assert_eq!(g.links_count(), 5999);
        assert_eq!(g.reachable_from(g.goal()).len(), 6000);
    }

    #[test]
    fn two_by_two_maze_has_three_passages() {
        let g = maze(2, 2, 8);
        assert_eq!(g.links_count(), 3);
    }

    #[test]
    fn single_cell_maze() {
        let g = maze(1, 1, 0);
        assert_eq!(g.links_count(), 0);
        assert_eq!(g.reachable_from(g.start()).len(), 1);
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(sorted_links(&maze(20, 15, 42)), sorted_links(&maze(20, 15, 42)));
        assert_eq!(sorted_links(&maze(3, 9, 7)), sorted_links(&maze(3, 9, 7)));
    }

    #[test]
    fn invalid_dimensions() {
        assert!(generate::<u32>(Width(0), Height(4), Seed(1)).is_err());
        assert!(generate::<u32>(Width(4), Height(0), Seed(1)).is_err());
    }

    #[test]
    fn walls_are_symmetric() {
        let g = maze(9, 7, 3);
        let mut incidences = 0;
        for i in 0..g.size() {
            let node = NodeIndex::new(i);
            incidences += g.incident_edges(node).len();
            for &dir in COMPASS_PRIMARY_DIRECTIONS.iter() {
                if let Some(neighbour) = g.neighbour_at_direction(node, dir) {
                    assert_eq!(g.is_connected(node, neighbour), g.is_connected(neighbour, node));
                }
            }
        }
        assert_eq!(incidences, 2 * g.links_count());
    }

    #[test]
    fn generated_mazes_are_spanning_trees() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 12 + 1, h as usize % 12 + 1);
            let g = maze(w, h, seed);
            g.links_count() == w * h - 1 && g.reachable_from(g.start()).len() == w * h
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }
}
