//! A brute force search tree for vertex cover, used as a reference to cross-check the LP based
//! solver. Branches on both endpoints of an arbitrary edge, so the tree has at most `2^k` leaves.

use crate::graph::UGraph;
use fxhash::FxHashSet;

/// Returns a vertex cover of `graph` of size at most `k`, or `None` if there is none.
pub fn naive_vertex_cover(graph: &UGraph, k: isize) -> Option<FxHashSet<usize>> {
    naive_branch(graph, k, FxHashSet::default())
}

fn naive_branch(graph: &UGraph, k: isize, chosen: FxHashSet<usize>) -> Option<FxHashSet<usize>> {
    if k < 0 {
        return None
    }
    let (u, v) = match graph.edges().next() {
        Some(edge) => edge,
        None => return Some(chosen),
    };
    if k == 0 {
        return None
    }
    for node in [u, v] {
        let reduced = graph.copy_without_vertices(&std::iter::once(node).collect());
        let mut next = chosen.clone();
        next.insert(node);
        if let Some(cover) = naive_branch(&reduced, k - 1, next) {
            return Some(cover)
        }
    }
    None
}

/// Returns the size of a minimum vertex cover of `graph`.
pub fn naive_minimum_cover_size(graph: &UGraph) -> usize {
    (0..=graph.num_nodes())
        .find(|k| naive_vertex_cover(graph, *k as isize).is_some())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_test() {
        let path = UGraph::from_edges(4, vec![(0, 1), (1, 2), (2, 3)]);
        assert!(naive_vertex_cover(&path, 1).is_none());
        let cover = naive_vertex_cover(&path, 2).unwrap();
        assert_eq!(cover.len(), 2);
        assert_eq!(naive_minimum_cover_size(&path), 2);
        let triangle = UGraph::from_edges(3, vec![(0, 1), (1, 2), (0, 2)]);
        assert_eq!(naive_minimum_cover_size(&triangle), 2);
        assert_eq!(naive_minimum_cover_size(&UGraph::new(4)), 0);
        assert!(naive_vertex_cover(&UGraph::new(4), -1).is_none());
    }

}
