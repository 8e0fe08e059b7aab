use rustc_hash::FxHashMap;

use crate::types::adjacency::AdjacencyList;

pub mod adjacency;

/// A directed graph over dense vertex ids `0..vertex_count`, stored as one
/// adjacency list per vertex.
///
/// Graphs move between pipeline stages by value: ingestion, extraction and the
/// undirected transform each hand back a fresh `Graph`, and only the cleanup pass that
/// runs right after ingestion mutates one in place.
///
/// # Panics
/// Methods taking a vertex id panic when the id is not below `vertex_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// Number of vertices; valid ids are `0..vertex_count`
    vertex_count: usize,

    /// Out-neighbors of each vertex, indexed by vertex id
    adjacency: Vec<AdjacencyList>,
}

impl Graph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            adjacency: vec![AdjacencyList::new(); vertex_count],
        }
    }

    /// Builds a graph whose adjacency lists hold the targets in the order the edges are
    /// given. No cleanup is applied: self-loops and duplicates are kept.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new(vertex_count);
        // Front insertion reverses, so walk the edges backwards to keep their order
        for &(src, dst) in edges.iter().rev() {
            graph.add_edge(src, dst);
        }
        graph
    }

    /// Inserts the directed edge `src -> dst` at the front of `src`'s list.
    pub fn add_edge(&mut self, src: usize, dst: usize) {
        assert!(
            dst < self.vertex_count,
            "edge target {} out of range for {} vertices", dst, self.vertex_count
        );
        self.adjacency[src].push_front(dst);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Returns the adjacency list of `vertex`.
    pub fn neighbors(&self, vertex: usize) -> &AdjacencyList {
        &self.adjacency[vertex]
    }

    pub fn out_degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    /// Total number of directed edges stored in the adjacency lists.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(AdjacencyList::len).sum()
    }

    /// Lists every directed edge, grouped by source in vertex order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (src, list) in self.adjacency.iter().enumerate() {
            edges.extend(list.iter().map(|dst| (src, dst)));
        }
        edges
    }

    /// Removes self-loops and repeated targets from every adjacency list.
    ///
    /// The first occurrence of each target survives and relative order is kept, so
    /// calling `clean` a second time changes nothing.
    pub fn clean(&mut self) {
        for (vertex, list) in self.adjacency.iter_mut().enumerate() {
            list.remove_all(vertex);
            list.dedup();
        }
    }

    /// Induces the subgraph on `vertex_list` with fresh dense ids.
    ///
    /// The i-th distinct vertex of `vertex_list` becomes vertex `i` of the result. Only
    /// edges with both endpoints in the list are kept, remapped, in their original
    /// neighbor order.
    ///
    /// # Arguments
    ///
    /// * `vertex_list` - The vertices to keep, in the order that defines the new ids
    pub fn induce_subgraph(&self, vertex_list: &[usize]) -> Graph {
        // Map original ids to their position in the subgraph, ignoring repeats
        let mut local_index = FxHashMap::<usize, usize>::default();
        let mut members = Vec::with_capacity(vertex_list.len());
        for &vertex in vertex_list {
            if !local_index.contains_key(&vertex) {
                local_index.insert(vertex, members.len());
                members.push(vertex);
            }
        }

        // Rebuild each member's list, dropping edges that leave the vertex set
        let adjacency = members
            .iter()
            .map(|&vertex| {
                self.adjacency[vertex]
                    .iter()
                    .filter_map(|neighbor| local_index.get(&neighbor).copied())
                    .collect::<AdjacencyList>()
            })
            .collect::<Vec<_>>();

        Graph {
            vertex_count: members.len(),
            adjacency,
        }
    }

    /// Returns the graph with every edge `(u, v)` replaced by `(v, u)`.
    pub fn transpose(&self) -> Graph {
        let mut reversed = vec![Vec::<usize>::new(); self.vertex_count];
        for (src, list) in self.adjacency.iter().enumerate() {
            for dst in list.iter() {
                reversed[dst].push(src);
            }
        }

        Graph {
            vertex_count: self.vertex_count,
            adjacency: reversed.into_iter().map(AdjacencyList::from_iter).collect(),
        }
    }
}
