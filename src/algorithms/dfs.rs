use crate::types::Graph;

impl Graph {
    /// Iterative depth-first search from `start_vertex`.
    ///
    /// Vertices are marked in `visited` when they are pushed on the work stack, so no
    /// vertex is pushed twice. Vertices already marked before the call are treated as
    /// absent from the graph: they are neither returned nor traversed.
    ///
    /// # Arguments
    ///
    /// * `start_vertex` - Vertex the search starts from; must not be pre-marked
    /// * `visited` - One flag per vertex, updated in place
    ///
    /// # Returns
    ///
    /// The vertices reached, in the order they were popped. Apart from `start_vertex`
    /// coming first, the order carries no guarantee.
    pub fn dfs(&self, start_vertex: usize, visited: &mut [bool]) -> Vec<usize> {
        let mut result = Vec::new();
        self.traverse(start_vertex, visited, |vertex| result.push(vertex));
        result
    }

    /// Returns every vertex reachable from `start_vertex`, itself included.
    pub fn reachable_from(&self, start_vertex: usize) -> Vec<usize> {
        let mut visited = vec![false; self.vertex_count()];
        self.dfs(start_vertex, &mut visited)
    }

    /// Counts the vertices a `dfs` from `start_vertex` would return, without collecting them.
    pub fn reach_count(&self, start_vertex: usize, visited: &mut [bool]) -> usize {
        let mut count = 0;
        self.traverse(start_vertex, visited, |_| count += 1);
        count
    }

    fn traverse<F>(&self, start_vertex: usize, visited: &mut [bool], mut on_visit: F)
    where
        F: FnMut(usize),
    {
        let mut stack = vec![start_vertex];
        visited[start_vertex] = true;

        while let Some(current) = stack.pop() {
            on_visit(current);

            for neighbor in self.neighbors(current).iter() {
                // Mark at push time so a vertex enters the stack at most once
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }
    }
}
