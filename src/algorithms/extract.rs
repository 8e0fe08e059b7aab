use crate::algorithms::scc::Components;
use crate::types::Graph;

impl Graph {
    /// Extracts the largest strongly connected component as a graph of its own.
    ///
    /// The component with the most vertices is chosen, the first one met in vertex order
    /// on ties. Its members are renumbered `0..size` keeping their relative order, and only
    /// edges between two members survive.
    ///
    /// # Arguments
    ///
    /// * `components` - Assignment computed on this graph
    ///
    /// # Panics
    ///
    /// Panics if `components` covers a different number of vertices than the graph.
    pub fn extract_largest_component(&self, components: &Components) -> Graph {
        assert_eq!(
            components.vertex_count(),
            self.vertex_count(),
            "component assignment does not match the graph"
        );

        let Some(largest) = components.largest() else {
            return Graph::new(0);
        };

        let members = (0..self.vertex_count())
            .filter(|&vertex| components.representative(vertex) == largest.representative)
            .collect::<Vec<_>>();
        self.induce_subgraph(&members)
    }
}

/// Returns the induced subgraph of the largest component of `graph`.
///
/// Callers skip this step when the graph is already strongly connected.
pub fn extract_largest_component(graph: &Graph, components: &Components) -> Graph {
    graph.extract_largest_component(components)
}
