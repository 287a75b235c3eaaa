//! Implementation of a simple, undirected graph data structure with basic static and dynamic
//! functions.
//!
//! Vertices are the indices `0..n`. A deleted vertex keeps its index reserved, so copies that drop
//! vertices keep the numbering of the graph they were taken from.

use fxhash::FxHashSet;
use rand::Rng;

/// A simple undirected graph datastructure that supports dynamic behaviour.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct UGraph {
    adj_list: Vec<Option<FxHashSet<usize>>>,
    num_edges: usize,
}

impl UGraph {

    /// Creates a graph with `n` isolated vertices.
    pub fn new(n: usize) -> Self {
        UGraph {
            adj_list: vec![Some(FxHashSet::default()); n],
            num_edges: 0,
        }
    }

    /// Creates a graph with `n` vertices and the given edges. Self-loops and duplicates are
    /// ignored.
    pub fn from_edges<I: IntoIterator<Item=(usize, usize)>>(n: usize, edges: I) -> Self {
        let mut graph = UGraph::new(n);
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Creates a random simple graph with `n` vertices and `m` distinct edges. `m` is clamped to
    /// the number of possible edges.
    pub fn random<R: Rng>(n: usize, m: usize, rng: &mut R) -> Self {
        let mut graph = UGraph::new(n);
        let m = m.min(n * n.saturating_sub(1) / 2);
        while graph.num_edges() < m {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            graph.add_edge(u, v);
        }
        graph
    }
}

// Static functions
impl UGraph {

    /// Returns an `Iterator` over all nodes that have not yet been deleted, in increasing order.
    pub fn vertices(&self) -> impl Iterator<Item=usize> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .filter_map(|(i, adj)| adj.as_ref().map(|_| i))
    }

    /// Returns the number of nodes of `self`.
    pub fn num_nodes(&self) -> usize {
        self.vertices().count()
    }

    /// Returns the amount of reserved nodes of `self`. Deleted or not.
    pub fn num_reserved(&self) -> usize {
        self.adj_list.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn has_edges(&self) -> bool {
        self.num_edges > 0
    }

    /// Returns the neighborhood of `node`, or `None` if `node` was deleted or never existed.
    pub fn neighbors(&self, node: usize) -> Option<&FxHashSet<usize>> {
        self.adj_list.get(node).and_then(|adj| adj.as_ref())
    }

    /// Returns the degree of `node`, or `None` if `node` was deleted.
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.neighbors(node).map(|neighbors| neighbors.len())
    }

    /// Returns an iterator over all edges `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item=(usize, usize)> + '_ {
        self.adj_list
            .iter()
            .enumerate()
            .filter_map(|(i, adj)| adj.as_ref().map(|adj| (i, adj)))
            .flat_map(|(i, adj)| {
                adj.iter()
                    .filter(move |neigh| i < **neigh)
                    .map(move |neigh| (i, *neigh))
            })
    }

    /// Checks if `edge` exists.
    pub fn edge_exists(&self, edge: (usize, usize)) -> bool {
        self.neighbors(edge.0)
            .map(|neighs| neighs.contains(&edge.1))
            .unwrap_or(false)
    }

    /// Returns the node with the lowest index that has at least one neighbor.
    pub fn first_non_isolated(&self) -> Option<usize> {
        self.vertices().find(|node| self.degree(*node).unwrap_or(0) > 0)
    }

    /// Checks if `self` is empty (holds no undeleted nodes).
    pub fn is_empty(&self) -> bool {
        self.num_nodes() == 0
    }

    /// Returns the subgraph induced by `vertex_set`, where `vertex_set[i]` is renamed to `i`.
    pub fn induced_subgraph(&self, vertex_set: &[usize]) -> Self {
        let mut index_map = vec![None; self.num_reserved()];
        for (new, old) in vertex_set.iter().enumerate() {
            if let Some(slot) = index_map.get_mut(*old) {
                *slot = Some(new);
            }
        }
        let mut subgraph = UGraph::new(vertex_set.len());
        for (new_u, old_u) in vertex_set.iter().enumerate() {
            if let Some(neighbors) = self.neighbors(*old_u) {
                for old_v in neighbors {
                    if let Some(new_v) = index_map[*old_v] {
                        if new_u < new_v {
                            subgraph.add_edge(new_u, new_v);
                        }
                    }
                }
            }
        }
        subgraph
    }

    /// Returns a copy of `self` where all nodes in `node_set` and their edges are deleted. The
    /// remaining nodes keep their index.
    pub fn copy_without_vertices(&self, node_set: &FxHashSet<usize>) -> Self {
        let mut copy = self.clone();
        for node in node_set {
            copy.remove_vertex(*node);
        }
        copy
    }
}

// Dynamic functions
impl UGraph {

    /// Adds the edge `(u, v)`. Returns `false` if nothing was added, that is if `u == v`, the
    /// edge already exists or either node is deleted.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        if u == v || self.neighbors(u).is_none() || self.neighbors(v).is_none() {
            return false
        }
        let inserted = match self.adj_list[u] {
            Some(ref mut nu) => nu.insert(v),
            None => false,
        };
        if !inserted {
            return false
        }
        if let Some(ref mut nv) = self.adj_list[v] {
            nv.insert(u);
        }
        self.num_edges += 1;
        true
    }

    /// Removes the edge `(u, v)`. Returns `false` if the edge did not exist.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        let removed = match self.adj_list.get_mut(u) {
            Some(Some(nu)) => nu.remove(&v),
            _ => false,
        };
        if !removed {
            return false
        }
        if let Some(ref mut nv) = self.adj_list[v] {
            nv.remove(&u);
        }
        self.num_edges -= 1;
        true
    }

    /// Tries to delete `node` together with all incident edges.
    /// Returns the old neighborhood of `node` or `None` if nothing was deleted.
    pub fn remove_vertex(&mut self, node: usize) -> Option<FxHashSet<usize>> {
        let opt_neighbors = self.adj_list.get_mut(node).and_then(|adj| adj.take());
        if let Some(neighborhood) = opt_neighbors.as_ref() {
            for neighbor in neighborhood.iter() {
                if let Some(ref mut nn) = self.adj_list[*neighbor] {
                    nn.remove(&node);
                }
            }
            self.num_edges -= neighborhood.len();
        }
        opt_neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn path(n: usize) -> UGraph {
        UGraph::from_edges(n, (1..n).map(|i| (i - 1, i)))
    }

    #[test]
    fn add_remove_edge_test() {
        let mut graph = UGraph::new(4);
        assert!(graph.add_edge(0, 1));
        assert!(!graph.add_edge(1, 0));
        assert!(!graph.add_edge(2, 2));
        assert!(graph.add_edge(1, 2));
        assert_eq!(graph.num_edges(), 2);
        assert!(graph.edge_exists((1, 0)));
        assert!(graph.remove_edge(1, 0));
        assert!(!graph.remove_edge(0, 1));
        assert!(!graph.remove_edge(0, 3));
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    fn remove_vertex_test() {
        let mut graph = UGraph::from_edges(4, vec![(0, 1), (0, 2), (0, 3), (2, 3)]);
        let old = graph.remove_vertex(0);
        assert_eq!(old, Some(vec![1, 2, 3].into_iter().collect()));
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_reserved(), 4);
        assert!(graph.remove_vertex(0).is_none());
        assert!(!graph.add_edge(0, 1));
        assert_eq!(graph.degree(1), Some(0));
        assert_eq!(graph.first_non_isolated(), Some(2));
    }

    #[test]
    fn adjacency_matches_edges_test() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = UGraph::random(30, 80, &mut rng);
        assert_eq!(graph.num_edges(), 80);
        assert_eq!(graph.edges().count(), 80);
        let degree_sum: usize = graph.vertices().map(|v| graph.degree(v).unwrap()).sum();
        assert_eq!(degree_sum, 160);
        for (u, v) in graph.edges() {
            assert!(graph.neighbors(v).unwrap().contains(&u));
        }
    }

    #[test]
    fn random_clamp_test() {
        let mut rng = StdRng::seed_from_u64(1);
        let graph = UGraph::random(5, 100, &mut rng);
        assert_eq!(graph.num_edges(), 10);
    }

    #[test]
    fn induced_subgraph_test() {
        let graph = path(5);
        let sub = graph.induced_subgraph(&[4, 3, 1, 2]);
        assert_eq!(sub.num_nodes(), 4);
        let mut edges: Vec<_> = sub.edges().collect();
        edges.sort();
        // 4-3 -> 0-1, 1-2 -> 2-3, 3-2 -> 1-3
        assert_eq!(edges, vec![(0, 1), (1, 3), (2, 3)]);
    }

    #[test]
    fn copy_without_vertices_test() {
        let graph = path(5);
        let copy = graph.copy_without_vertices(&vec![1, 3].into_iter().collect());
        assert_eq!(copy.num_reserved(), 5);
        assert_eq!(copy.vertices().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert!(!copy.has_edges());
        assert_eq!(graph.num_edges(), 4);
    }

}
