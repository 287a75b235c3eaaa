use crate::bounded_search::solve_vertex_cover;
use crate::cust_error::{ImportError, ProcessingError};
use crate::graph::UGraph;
use fxhash::FxHashSet;
use std::io::{self, BufRead, Write};

/// A parameterized vertex cover instance: does `graph` have a vertex cover of size at most `k`?
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct VCInstance {
    pub name: String,
    pub k: isize,
    pub graph: UGraph,
}

impl VCInstance {

    pub fn new(name: &str, k: isize, graph: UGraph) -> Self {
        VCInstance {
            name: name.to_owned(),
            k,
            graph,
        }
    }

    /// Reads an instance. Blank lines are ignored, the remaining lines are:
    /// ```text
    /// <name>
    /// <k>
    /// <n>
    /// <u> <v>
    /// ...
    /// ```
    /// with one line per edge and nodes numbered from `0` to `n - 1`.
    pub fn read_instance<R: BufRead>(input: R) -> Result<Self, ImportError> {
        let mut lines = Vec::new();
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_owned());
            }
        }
        let mut lines = lines.into_iter();
        let name = lines.next().ok_or(ImportError::InputMalformedError)?;
        let k: isize = lines.next().ok_or(ImportError::InputMalformedError)?.parse()?;
        let n: usize = lines.next().ok_or(ImportError::InputMalformedError)?.parse()?;
        let mut graph = UGraph::new(n);
        for line in lines {
            let mut s = line.split_whitespace();
            let u: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            let v: usize = s.next().ok_or(ImportError::InputMalformedError)?.parse()?;
            if s.next().is_some() { return Err(ImportError::InputMalformedError); }
            if let Some(out) = [u, v].into_iter().find(|node| *node >= n) {
                return Err(ImportError::VertexOutOfRange(out));
            }
            graph.add_edge(u, v);
        }
        Ok(VCInstance { name, k, graph })
    }

    /// Solves `self`, see `solve_vertex_cover`.
    pub fn solve(&self) -> Result<Option<FxHashSet<usize>>, ProcessingError> {
        solve_vertex_cover(&self.graph, self.k)
    }

    /// Checks that `sol` is a vertex cover of `self.graph` with at most `self.k` nodes.
    pub fn validate_solution(&self, sol: &FxHashSet<usize>) -> Result<(), ProcessingError> {
        if sol.len() as isize > self.k {
            return Err(ProcessingError::InvalidSolution(format!(
                "{} nodes exceed the budget {}", sol.len(), self.k
            )))
        }
        if let Some(node) = sol.iter().find(|node| **node >= self.graph.num_reserved()) {
            return Err(ProcessingError::InvalidSolution(format!("unknown node {}", node)))
        }
        if let Some((u, v)) = self.graph.edges().find(|(u, v)| !(sol.contains(u) || sol.contains(v))) {
            return Err(ProcessingError::InvalidSolution(format!("edge ({}, {}) is not covered", u, v)))
        }
        Ok(())
    }

    /// Writes a solution to a `Write` type, one node per line in increasing order.
    pub fn write_solution<W: Write>(solution: &FxHashSet<usize>, mut out: W) -> Result<(), io::Error> {
        let mut nodes: Vec<usize> = solution.iter().copied().collect();
        nodes.sort_unstable();
        for node in nodes {
            writeln!(out, "{}", node)?;
        }
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_instance_test() {
        let input = Cursor::new("path\n2\n\n4\n0 1\n1 2\n2 3\n");
        let ins = VCInstance::read_instance(input);
        assert!(ins.is_ok());
        let ins = ins.unwrap();
        assert_eq!(ins.name, "path");
        assert_eq!(ins.k, 2);
        assert_eq!(ins.graph.num_nodes(), 4);
        assert_eq!(ins.graph.num_edges(), 3);
        let sol = ins.solve().unwrap().unwrap();
        assert!(ins.validate_solution(&sol).is_ok());
    }

    #[test]
    fn malformed_test() {
        assert!(matches!(VCInstance::read_instance(Cursor::new("g\n1\n")),
            Err(ImportError::InputMalformedError)));
        assert!(matches!(VCInstance::read_instance(Cursor::new("g\nx\n3\n")),
            Err(ImportError::BadIntError(_))));
        assert!(matches!(VCInstance::read_instance(Cursor::new("g\n1\n3\n0 1 2\n")),
            Err(ImportError::InputMalformedError)));
        assert!(matches!(VCInstance::read_instance(Cursor::new("g\n1\n3\n0 3\n")),
            Err(ImportError::VertexOutOfRange(3))));
    }

    #[test]
    fn validate_test() {
        let ins = VCInstance::new("triangle", 2, UGraph::from_edges(3, vec![(0, 1), (1, 2), (0, 2)]));
        assert!(ins.validate_solution(&vec![0, 1].into_iter().collect()).is_ok());
        assert!(ins.validate_solution(&vec![0].into_iter().collect()).is_err());
        assert!(ins.validate_solution(&vec![0, 1, 2].into_iter().collect()).is_err());
        assert!(ins.validate_solution(&vec![0, 7].into_iter().collect()).is_err());
    }

    #[test]
    fn write_solution_test() {
        let mut out = Vec::new();
        assert!(VCInstance::write_solution(&vec![3, 0, 2].into_iter().collect(), &mut out).is_ok());
        assert_eq!(String::from_utf8(out).unwrap(), "0\n2\n3\n");
    }

}
