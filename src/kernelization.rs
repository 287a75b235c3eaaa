//! The LP reduction rule of Nemhauser and Trotter: nodes of value `1` in an optimal
//! half-integral LP solution go to the solution, nodes of value `0` are removed. Some minimum
//! vertex cover agrees with both choices, so a cover of size at most `k` exists before the
//! reduction iff one of size at most `k - #ones` exists after it.

use crate::graph::UGraph;
use crate::lp_relaxation::{HalfIntegralSolution, LpValue};
use fxhash::FxHashSet;
use log::debug;

/// The outcome of one application of the LP reduction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Reduction {
    /// The remaining graph, numbered like the graph that was reduced.
    pub graph: UGraph,
    /// The remaining budget.
    pub k: isize,
    /// The nodes that were added to the solution, in increasing order.
    pub added: Vec<usize>,
}

/// Applies the LP reduction for `solution` to `graph` with budget `k`.
pub fn apply_lp_reduction(graph: &UGraph, solution: &HalfIntegralSolution, k: isize) -> Reduction {
    let added: Vec<usize> = solution.nodes_valued(LpValue::One).collect();
    let mut removed: FxHashSet<usize> = solution.nodes_valued(LpValue::Zero).collect();
    debug!("LP reduction: {} nodes to the solution, {} nodes removed", added.len(), removed.len());
    removed.extend(added.iter().copied());
    Reduction {
        graph: graph.copy_without_vertices(&removed),
        k: k - added.len() as isize,
        added,
    }
}
