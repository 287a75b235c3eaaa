//! Maximum matchings and minimum vertex covers of bipartite graphs.
//!
//! The vertices `0..left_size` form the left side, `left_size..n` the right side. A maximum
//! matching is grown in phases: every phase layers the graph by a breadth first search over
//! alternating edges, starting at the free left nodes, and then augments along a maximal set of
//! node disjoint shortest augmenting paths found by a depth first search through the layers.
//!
//! From a maximum matching a minimum vertex cover is read off with König's construction: mark
//! every node reachable from a free left node over alternating paths, the cover are the unmarked
//! left nodes and the marked right nodes.

use crate::cust_error::ProcessingError;
use fxhash::FxHashMap;
use log::trace;

/// An edge of a `BipartiteGraph` together with its matching state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MatchingEdge {
    pub u: usize,
    pub v: usize,
    pub in_matching: bool,
    /// Removed edges stay in the arena so they can be revived.
    alive: bool,
}

impl MatchingEdge {

    fn new(u: usize, v: usize) -> Self {
        MatchingEdge { u, v, in_matching: false, alive: true }
    }

    /// Given one node of the edge, returns the opposite node.
    pub fn other(&self, w: usize) -> usize {
        if w == self.u { self.v } else { self.u }
    }
}

#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    left_size: usize,
    n: usize,
    /// Edge arena, indexed by edge id.
    edges: Vec<MatchingEdge>,
    /// Edge id by `(min, max)` node pair.
    edge_ids: FxHashMap<(usize, usize), usize>,
    /// Ids of the alive edges incident to each node.
    incident: Vec<Vec<usize>>,
    free: Vec<bool>,
}

fn key(u: usize, v: usize) -> (usize, usize) {
    if u < v { (u, v) } else { (v, u) }
}

impl BipartiteGraph {

    /// Creates a bipartite graph on `n` nodes with `left_size` left nodes. Every edge must join a
    /// left and a right node.
    pub fn new<I: IntoIterator<Item=(usize, usize)>>(left_size: usize, n: usize, edges: I) -> Self {
        let mut graph = BipartiteGraph {
            left_size,
            n,
            edges: Vec::new(),
            edge_ids: FxHashMap::default(),
            incident: vec![Vec::new(); n],
            free: vec![true; n],
        };
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    pub fn num_nodes(&self) -> usize {
        self.n
    }

    pub fn is_left(&self, node: usize) -> bool {
        node < self.left_size
    }

    pub fn is_free(&self, node: usize) -> bool {
        self.free[node]
    }

    /// Adds the edge `(u, v)`, or revives it if it was removed before. Returns `false` if the
    /// edge is already present.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        debug_assert!(self.is_left(u) != self.is_left(v), "edge ({}, {}) is not bipartite", u, v);
        if let Some(&id) = self.edge_ids.get(&key(u, v)) {
            let edge = &mut self.edges[id];
            if edge.alive {
                return false
            }
            edge.alive = true;
            edge.in_matching = false;
            self.incident[u].push(id);
            self.incident[v].push(id);
            return true
        }
        let id = self.edges.len();
        self.edges.push(MatchingEdge::new(u, v));
        self.edge_ids.insert(key(u, v), id);
        self.incident[u].push(id);
        self.incident[v].push(id);
        true
    }

    /// Removes the edge `(u, v)`. If it was matched, both endpoints become free. Returns `false`
    /// if there was no such edge.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        let id = match self.edge_ids.get(&key(u, v)) {
            Some(&id) if self.edges[id].alive => id,
            _ => return false,
        };
        let edge = &mut self.edges[id];
        if edge.in_matching {
            edge.in_matching = false;
            self.free[u] = true;
            self.free[v] = true;
        }
        edge.alive = false;
        self.incident[u].retain(|e| *e != id);
        self.incident[v].retain(|e| *e != id);
        true
    }

    /// Returns the neighbors of `node` over alive edges whose matching state is `in_matching`.
    fn neighbors(&self, node: usize, in_matching: bool) -> impl Iterator<Item=usize> + '_ {
        self.incident[node]
            .iter()
            .map(move |id| &self.edges[*id])
            .filter(move |edge| edge.in_matching == in_matching)
            .map(move |edge| edge.other(node))
    }

    /// Returns the matched edges as `(left, right)` pairs.
    pub fn matching(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .filter(|edge| edge.alive && edge.in_matching)
            .map(|edge| if self.is_left(edge.u) { (edge.u, edge.v) } else { (edge.v, edge.u) })
            .collect()
    }

    pub fn matching_size(&self) -> usize {
        self.edges.iter().filter(|edge| edge.alive && edge.in_matching).count()
    }

    /// Grows the current matching until it is maximum.
    ///
    /// Returns an `InvariantViolation` if a phase reaches a free right node but finds no
    /// augmenting path.
    pub fn find_matching(&mut self) -> Result<(), ProcessingError> {
        let mut phases = 0;
        while let Some(mut layers) = self.find_layers() {
            let paths = self.find_paths_from_layers(&mut layers);
            phases += 1;
            trace!("matching phase {}: {} augmenting paths", phases, paths.len());
            if paths.is_empty() {
                return Err(ProcessingError::InvariantViolation(format!(
                    "matching phase {} reached a free node but found no augmenting path", phases
                )))
            }
            for path in paths {
                self.flip_along_path(&path);
            }
        }
        Ok(())
    }

    /// Assigns layers by a breadth first search from all free left nodes. Leaving an even layer
    /// only non-matching edges are used, leaving an odd layer only matching edges.
    ///
    /// Returns `None` if no free right node is reachable, i.e. the matching is maximum.
    /// Otherwise the search stops after the first layer holding a free node.
    fn find_layers(&self) -> Option<Vec<Option<usize>>> {
        let mut layers = vec![None; self.n];
        let mut current: Vec<usize> = (0..self.left_size).filter(|v| self.free[*v]).collect();
        let mut depth = 0;
        loop {
            let mut next = Vec::new();
            let mut found_free = false;
            for v in current {
                if layers[v].is_some() {
                    continue
                }
                layers[v] = Some(depth);
                if depth > 0 && self.free[v] {
                    found_free = true;
                }
                next.extend(self.neighbors(v, depth % 2 == 1).filter(|u| layers[*u].is_none()));
            }
            if found_free {
                return Some(layers)
            }
            if next.is_empty() {
                return None
            }
            current = next;
            depth += 1;
        }
    }

    /// Searches node disjoint augmenting paths starting at every node of layer 0.
    fn find_paths_from_layers(&self, layers: &mut [Option<usize>]) -> Vec<Vec<usize>> {
        let starts: Vec<usize> = (0..self.n).filter(|v| layers[*v] == Some(0)).collect();
        let mut paths = Vec::new();
        for v in starts {
            if let Some(path) = self.layers_dfs(v, layers) {
                paths.push(path);
            }
        }
        paths
    }

    /// Returns the neighbors of `v` one layer further down, in reverse order so that popping
    /// yields them in adjacency order.
    fn next_layer(&self, v: usize, layer: usize, layers: &[Option<usize>]) -> Vec<usize> {
        let mut candidates: Vec<usize> = self.neighbors(v, layer % 2 == 1)
            .filter(|u| layers[*u] == Some(layer + 1))
            .collect();
        candidates.reverse();
        candidates
    }

    /// Depth first search strictly from layer `i` to layer `i + 1`, with an explicit stack of
    /// `(node, layer, untried candidates)`. Every visited node is consumed (its layer is reset),
    /// so the found paths never share a node.
    /// Returns the path from `start` to a free node, or `None`.
    fn layers_dfs(&self, start: usize, layers: &mut [Option<usize>]) -> Option<Vec<usize>> {
        let mut stack: Vec<(usize, usize, Vec<usize>)> = Vec::new();
        if let Some(layer) = layers[start] {
            stack.push((start, layer, self.next_layer(start, layer, layers)));
        }
        loop {
            let next = match stack.last_mut() {
                Some(frame) => frame.2.pop(),
                None => return None,
            };
            if let Some(u) = next {
                if let Some(u_layer) = layers[u] {
                    let candidates = self.next_layer(u, u_layer, layers);
                    stack.push((u, u_layer, candidates));
                }
                continue
            }
            // all candidates of the top node failed
            let (v, layer) = match stack.last() {
                Some(frame) => (frame.0, frame.1),
                None => return None,
            };
            layers[v] = None;
            if self.free[v] && layer != 0 {
                let path: Vec<usize> = stack.iter().map(|(node, _, _)| *node).collect();
                for node in &path {
                    layers[*node] = None;
                }
                return Some(path)
            }
            stack.pop();
        }
    }

    /// Flips the matching state of every edge on `path` and marks both ends as matched.
    fn flip_along_path(&mut self, path: &[usize]) {
        for pair in path.windows(2) {
            if let Some(&id) = self.edge_ids.get(&key(pair[0], pair[1])) {
                self.edges[id].in_matching = !self.edges[id].in_matching;
            }
        }
        if let (Some(first), Some(last)) = (path.first(), path.last()) {
            self.free[*first] = false;
            self.free[*last] = false;
        }
    }

    /// Computes a maximum matching and derives a minimum vertex cover from it.
    ///
    /// Returns an `InvariantViolation` if the cover and the matching differ in size.
    pub fn minimum_vertex_cover(&mut self) -> Result<Vec<usize>, ProcessingError> {
        self.find_matching()?;
        let mut visited = vec![false; self.n];
        let mut stack: Vec<usize> = (0..self.left_size).filter(|v| self.free[*v]).collect();
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue
            }
            visited[v] = true;
            // left -> right over free edges, right -> left over matched edges
            stack.extend(self.neighbors(v, !self.is_left(v)).filter(|u| !visited[*u]));
        }
        let cover: Vec<usize> = (0..self.left_size)
            .filter(|v| !visited[*v])
            .chain((self.left_size..self.n).filter(|v| visited[*v]))
            .collect();
        let matching_size = self.matching_size();
        if cover.len() != matching_size {
            return Err(ProcessingError::InvariantViolation(format!(
                "bipartite cover of size {} but matching of size {}", cover.len(), matching_size
            )))
        }
        Ok(cover)
    }
}
