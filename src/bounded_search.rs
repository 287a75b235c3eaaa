//! Implementation of a bounded search tree algorithm for the parameterized vertex cover problem.
//!
//! Every node of the search tree owns a graph, the remaining budget `k` and the nodes chosen so
//! far. Processing a tree node does the following:
//! 1. Computes an optimal half-integral LP solution of the graph. If its value exceeds `k` the
//!    tree node fails, as the LP value is a lower bound on any vertex cover.
//! 2. If the solution is not all-half, applies the LP reduction and starts over at 1.
//! 3. If no edge remains, the chosen nodes are a solution.
//! 4. Otherwise branches on the node `v` with the lowest index that has a neighbor: either `v` is
//!    in the solution (budget `k - 1`), or all of its neighbors are (budget `k - deg(v)`).
//!
//! On an all-half graph both branch steps lower `k - LP value` by at least `1/2`, so the size of
//! the tree only depends on `k`. The tree is traversed depth first with an explicit stack, the
//! first branch before the second.

use crate::cust_error::ProcessingError;
use crate::graph::UGraph;
use crate::kernelization::apply_lp_reduction;
use crate::lp_relaxation::solve_half_integral;
use fxhash::FxHashSet;
use log::{debug, trace};

/// Counters collected while searching.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct SolverStats {
    /// Search tree nodes taken from the stack.
    pub frames: usize,
    pub lp_solves: usize,
    pub reductions: usize,
    pub branches: usize,
}

#[derive(Debug, Clone)]
struct BranchState {
    graph: UGraph,
    k: isize,
    chosen: FxHashSet<usize>,
}

enum Outcome {
    Covered(FxHashSet<usize>),
    Pruned,
    /// Take the node, take its neighborhood.
    Branch(BranchState, BranchState),
}

#[derive(Debug, Default)]
pub struct VCSolver {
    stats: SolverStats,
}

impl VCSolver {

    pub fn new() -> Self {
        VCSolver::default()
    }

    /// Counters of all searches run by `self` so far.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Decides if `graph` has a vertex cover of size at most `k`.
    /// Returns such a cover, or `None` if there is none. A `ProcessingError` is only returned if
    /// an internal invariant broke.
    pub fn solve(&mut self, graph: &UGraph, k: isize) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        if k < 0 {
            return Ok(None)
        }
        let mut stack = vec![BranchState { graph: graph.clone(), k, chosen: FxHashSet::default() }];
        while let Some(state) = stack.pop() {
            self.stats.frames += 1;
            match self.process(state)? {
                Outcome::Covered(cover) => {
                    debug!("found cover of size {} for k = {}: {:?}", cover.len(), k, self.stats);
                    return Ok(Some(cover))
                },
                Outcome::Pruned => {},
                Outcome::Branch(take_node, take_neighbors) => {
                    stack.push(take_neighbors);
                    stack.push(take_node);
                },
            }
        }
        debug!("no cover of size at most {}: {:?}", k, self.stats);
        Ok(None)
    }

    fn process(&mut self, state: BranchState) -> Result<Outcome, ProcessingError> {
        let BranchState { mut graph, mut k, mut chosen } = state;
        loop {
            let solution = solve_half_integral(&graph)?;
            self.stats.lp_solves += 1;
            if solution.halves() as isize > 2 * k {
                trace!("pruned: LP value {} > k = {}", solution.objective(), k);
                return Ok(Outcome::Pruned)
            }
            if solution.is_all_half() {
                break
            }
            let reduction = apply_lp_reduction(&graph, &solution, k);
            self.stats.reductions += 1;
            chosen.extend(reduction.added);
            graph = reduction.graph;
            k = reduction.k;
        }
        let node = match graph.first_non_isolated() {
            Some(node) => node,
            None => return Ok(Outcome::Covered(chosen)),
        };
        let neighbors: FxHashSet<usize> = graph.neighbors(node)
            .cloned()
            .unwrap_or_default();
        self.stats.branches += 1;
        trace!("branching on node {} of degree {}, k = {}", node, neighbors.len(), k);

        let mut take_node = BranchState {
            graph: graph.copy_without_vertices(&std::iter::once(node).collect()),
            k: k - 1,
            chosen: chosen.clone(),
        };
        take_node.chosen.insert(node);

        let mut take_neighbors = BranchState {
            graph: graph.copy_without_vertices(&neighbors),
            k: k - neighbors.len() as isize,
            chosen,
        };
        take_neighbors.chosen.extend(neighbors);

        Ok(Outcome::Branch(take_node, take_neighbors))
    }
}

/// Returns a vertex cover of `graph` of size at most `k`, or `None` if there is none.
pub fn solve_vertex_cover(graph: &UGraph, k: isize) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
    VCSolver::new().solve(graph, k)
}

/// Returns a minimum vertex cover of `graph`. Tries all budgets upwards from the LP lower bound.
pub fn minimum_vertex_cover(graph: &UGraph) -> Result<FxHashSet<usize>, ProcessingError> {
    let mut solver = VCSolver::new();
    let lower = (solve_half_integral(graph)?.halves() + 1) / 2;
    for k in lower..=graph.num_nodes() {
        if let Some(cover) = solver.solve(graph, k as isize)? {
            return Ok(cover)
        }
    }
    Err(ProcessingError::InvariantViolation("the set of all nodes was rejected as a cover".to_owned()))
}
