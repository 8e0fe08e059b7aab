use crate::types::Graph;

impl Graph {
    /// Turns the graph into its underlying undirected graph.
    ///
    /// Every edge `(u, v)` gains its reverse `(v, u)`, then the usual cleanup drops
    /// self-loops and repeated targets, so edges that were already reciprocal are stored
    /// once per direction.
    pub fn into_undirected(mut self) -> Graph {
        for (src, dst) in self.edges() {
            self.add_edge(dst, src);
        }
        self.clean();
        self
    }
}

/// Consumes a directed graph and returns its underlying undirected graph.
pub fn to_undirected(graph: Graph) -> Graph {
    graph.into_undirected()
}
