//! Half-integral solutions of the LP relaxation of vertex cover.
//!
//! The LP is solved combinatorially on the bipartite double cover `B(G)` of a graph `G(V,E)`: for
//! each node `v` in `V` there are two representatives, `v` on the left and `v + n` on the right,
//! and each edge `(u,v)` in `E` becomes the two edges `(u, v + n)` and `(v, u + n)`. Every
//! representative in a minimum vertex cover of `B(G)` contributes `1/2` to the value of its node,
//! which gives an optimal LP solution with values in `{0, 1/2, 1}`.
//!
//! By the theorem of Nemhauser and Trotter some minimum vertex cover of `G` contains all nodes of
//! value `1` and none of value `0`.

use crate::bipart_matching::BipartiteGraph;
use crate::cust_error::ProcessingError;
use crate::graph::UGraph;
use log::trace;

/// Tolerance used by `TryFrom<f64> for LpValue`.
pub const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum LpValue {
    Zero,
    Half,
    One,
}

impl LpValue {

    /// The value of a node of which `copies` representatives are in the double cover's cover.
    fn from_copies(copies: usize) -> Result<Self, ProcessingError> {
        match copies {
            0 => Ok(LpValue::Zero),
            1 => Ok(LpValue::Half),
            2 => Ok(LpValue::One),
            _ => Err(ProcessingError::InvariantViolation(format!(
                "{} representatives of one node in the double cover", copies
            ))),
        }
    }

    /// Returns the value in units of `1/2`.
    pub fn halves(self) -> usize {
        match self {
            LpValue::Zero => 0,
            LpValue::Half => 1,
            LpValue::One => 2,
        }
    }

    /// Converts to `f64` for callers that exchange LP values with float based tools.
    pub fn as_f64(self) -> f64 {
        self.halves() as f64 / 2.0
    }
}

/// Adapter for fractional LP values computed elsewhere, e.g. by a general LP solver. Values
/// within `EPSILON` of `0`, `1/2` or `1` are accepted, anything else is an `InvariantViolation`.
/// The solver itself builds values from cover counts and never goes through `f64`.
impl TryFrom<f64> for LpValue {
    type Error = ProcessingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.abs() < EPSILON {
            Ok(LpValue::Zero)
        } else if (value - 0.5).abs() < EPSILON {
            Ok(LpValue::Half)
        } else if (value - 1.0).abs() < EPSILON {
            Ok(LpValue::One)
        } else {
            Err(ProcessingError::InvariantViolation(format!("{} is not half-integral", value)))
        }
    }
}

/// An optimal half-integral LP solution, with one value per (undeleted) node of the graph it was
/// computed for.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HalfIntegralSolution {
    /// `(node, value)` sorted by node.
    values: Vec<(usize, LpValue)>,
    all_half: bool,
}

impl HalfIntegralSolution {

    /// Returns the value of `node`, or `None` if `node` is not part of the solved graph.
    pub fn value(&self, node: usize) -> Option<LpValue> {
        self.values
            .binary_search_by_key(&node, |(v, _)| *v)
            .ok()
            .map(|id| self.values[id].1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` if every node has value `1/2`, and no single node can be raised to `1` optimally.
    pub fn is_all_half(&self) -> bool {
        self.all_half
    }

    /// Returns the objective value times two.
    pub fn halves(&self) -> usize {
        self.values.iter().map(|(_, value)| value.halves()).sum()
    }

    pub fn objective(&self) -> f64 {
        self.halves() as f64 / 2.0
    }

    /// Returns the nodes with value `value`.
    pub fn nodes_valued(&self, value: LpValue) -> impl Iterator<Item=usize> + '_ {
        self.values
            .iter()
            .filter(move |(_, val)| *val == value)
            .map(|(node, _)| *node)
    }
}

/// The double cover of a graph, with the undeleted nodes renamed to `0..names.len()`.
pub(crate) struct DoubleCover {
    pub bipartite: BipartiteGraph,
    /// `names[i]` is the node of the origin graph represented by `i` and `i + names.len()`.
    pub names: Vec<usize>,
    /// Neighbors of each node, renamed.
    pub adjacency: Vec<Vec<usize>>,
}

impl From<&UGraph> for DoubleCover {

    fn from(graph: &UGraph) -> Self {
        let names: Vec<usize> = graph.vertices().collect();
        let n_pr = names.len();
        let mut old_new = vec![None; graph.num_reserved()];
        for (new, old) in names.iter().enumerate() {
            old_new[*old] = Some(new);
        }
        let adjacency: Vec<Vec<usize>> = names.iter()
            .map(|node| {
                let mut neighs: Vec<usize> = graph.neighbors(*node)
                    .into_iter()
                    .flatten()
                    .filter_map(|neigh| old_new[*neigh])
                    .collect();
                neighs.sort_unstable();
                neighs
            })
            .collect();
        let edges = adjacency.iter()
            .enumerate()
            .flat_map(|(u, neighs)| neighs.iter().map(move |v| (u, v + n_pr)));
        let bipartite = BipartiteGraph::new(n_pr, 2 * n_pr, edges);
        DoubleCover { bipartite, names, adjacency }
    }
}

impl DoubleCover {

    fn values_from_cover(&self, cover: &[usize]) -> Result<Vec<LpValue>, ProcessingError> {
        let n_pr = self.names.len();
        let mut copies = vec![0; n_pr];
        for node in cover {
            copies[node % n_pr] += 1;
        }
        copies.into_iter().map(LpValue::from_copies).collect()
    }

    fn to_solution(&self, values: Vec<LpValue>, all_half: bool) -> HalfIntegralSolution {
        HalfIntegralSolution {
            values: self.names.iter().copied().zip(values).collect(),
            all_half,
        }
    }

    /// Removes (`present == false`) or restores all edges at both representatives of `node`.
    fn set_node_edges(&mut self, node: usize, present: bool) {
        let n_pr = self.names.len();
        for &neigh in &self.adjacency[node] {
            if present {
                self.bipartite.add_edge(node, neigh + n_pr);
                self.bipartite.add_edge(neigh, node + n_pr);
            } else {
                self.bipartite.remove_edge(node, neigh + n_pr);
                self.bipartite.remove_edge(neigh, node + n_pr);
            }
        }
    }
}

/// Computes an optimal half-integral solution of the LP relaxation of vertex cover on `graph`.
///
/// If the double cover yields a node of value `0` or `1` that solution is returned. Otherwise
/// every node `v` is tested for tightness: with the edges of both representatives of `v`
/// removed, the cover of the double cover shrinks by exactly 2 iff some optimal solution sets
/// `v` to `1`. In that case the solution without those edges, with `v` set to `1`, is returned.
/// Only if no node is tight is the all-half solution reported as such.
pub fn solve_half_integral(graph: &UGraph) -> Result<HalfIntegralSolution, ProcessingError> {
    let mut double_cover = DoubleCover::from(graph);
    let cover = double_cover.bipartite.minimum_vertex_cover()?;
    let values = double_cover.values_from_cover(&cover)?;
    if values.iter().any(|value| *value != LpValue::Half) {
        return Ok(double_cover.to_solution(values, false))
    }
    let base = cover.len();
    for node in 0..double_cover.names.len() {
        double_cover.set_node_edges(node, false);
        let without = double_cover.bipartite.minimum_vertex_cover();
        double_cover.set_node_edges(node, true);
        let without = without?;
        if without.len() + 2 == base {
            trace!("node {} is tight and set to 1", double_cover.names[node]);
            let mut values = double_cover.values_from_cover(&without)?;
            values[node] = LpValue::One;
            return Ok(double_cover.to_solution(values, false))
        }
    }
    Ok(double_cover.to_solution(values, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cycle(n: usize) -> UGraph {
        UGraph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n)))
    }

    #[test]
    fn try_from_test() {
        assert_eq!(LpValue::try_from(0.0).unwrap(), LpValue::Zero);
        assert_eq!(LpValue::try_from(0.5000001).unwrap(), LpValue::Half);
        assert_eq!(LpValue::try_from(0.9999995).unwrap(), LpValue::One);
        assert!(LpValue::try_from(0.25).is_err());
        assert!(LpValue::try_from(1.5).is_err());
        assert_eq!(LpValue::Half.as_f64(), 0.5);
    }

    #[test]
    fn path_test() {
        let graph = UGraph::from_edges(3, vec![(0, 1), (1, 2)]);
        let solution = solve_half_integral(&graph).unwrap();
        assert!(!solution.is_all_half());
        assert_eq!(solution.value(1), Some(LpValue::One));
        assert_eq!(solution.value(0), Some(LpValue::Zero));
        assert_eq!(solution.halves(), 2);
        assert_eq!(solution.objective(), 1.0);
    }

    #[test]
    fn isolated_node_test() {
        let graph = UGraph::from_edges(3, vec![(0, 1)]);
        let solution = solve_half_integral(&graph).unwrap();
        assert!(!solution.is_all_half());
        assert_eq!(solution.value(2), Some(LpValue::Zero));
        assert_eq!(solution.halves(), 2);
    }

    #[test]
    fn odd_cycle_test() {
        for n in [3, 5, 7] {
            let solution = solve_half_integral(&cycle(n)).unwrap();
            assert!(solution.is_all_half());
            assert_eq!(solution.halves(), n);
            assert_eq!(solution.nodes_valued(LpValue::Half).count(), n);
        }
    }

    #[test]
    fn even_cycle_tight_node_test() {
        // All-half is optimal on an even cycle, but so is an integral solution.
        let solution = solve_half_integral(&cycle(4)).unwrap();
        assert!(!solution.is_all_half());
        assert_eq!(solution.halves(), 4);
        assert!(solution.nodes_valued(LpValue::One).count() > 0);
    }

    #[test]
    fn deleted_nodes_test() {
        let graph = cycle(6).copy_without_vertices(&vec![0].into_iter().collect());
        let solution = solve_half_integral(&graph).unwrap();
        assert_eq!(solution.len(), 5);
        assert_eq!(solution.value(0), None);
        assert_eq!(solution.halves(), 4);
    }

    #[test]
    fn empty_test() {
        let graph = UGraph::new(0);
        let solution = solve_half_integral(&graph).unwrap();
        assert!(solution.is_empty());
        assert!(solution.is_all_half());
        assert_eq!(solution.halves(), 0);
    }

    #[test]
    fn soundness_random_test() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let n = rng.gen_range(1..14);
            let m = rng.gen_range(0..(2 * n));
            let graph = UGraph::random(n, m, &mut rng);
            let solution = solve_half_integral(&graph).unwrap();
            // feasible
            for (u, v) in graph.edges() {
                let sum = solution.value(u).unwrap().halves() + solution.value(v).unwrap().halves();
                assert!(sum >= 2);
            }
            // optimal: twice the objective is the size of a minimum cover of the double cover
            let mut double_cover = DoubleCover::from(&graph);
            let cover = double_cover.bipartite.minimum_vertex_cover().unwrap();
            assert_eq!(solution.halves(), cover.len());
            if solution.is_all_half() {
                assert_eq!(solution.nodes_valued(LpValue::Half).count(), n);
            }
        }
    }

}
