use serde::Serialize;

use crate::types::Graph;

/// Marks a vertex without a discovery number or component yet.
const UNASSIGNED: usize = usize::MAX;

/// Assignment of every vertex to a strongly connected component.
///
/// Each component is named by one of its members, its representative. Two vertices share
/// a representative exactly when they are mutually reachable. Which member represents a
/// component depends on the traversal; the grouping does not.
///
/// An assignment belongs to the graph it was computed on and is meaningless for any
/// other graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    assignment: Vec<usize>,
}

/// Size and representative of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentStat {
    pub representative: usize,
    pub size: usize,
}

/// Overview of a component assignment, as printed after the SCC pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentSummary {
    /// Number of distinct components
    pub component_count: usize,
    /// Largest component, the first one met in vertex order on ties
    pub largest: Option<ComponentStat>,
    /// Smallest component, the first one met in vertex order on ties
    pub smallest: Option<ComponentStat>,
}

impl Components {
    /// Wraps a raw assignment, one representative per vertex.
    ///
    /// # Panics
    /// Panics if a representative is not a valid vertex id.
    pub fn from_assignment(assignment: Vec<usize>) -> Self {
        let vertex_count = assignment.len();
        assert!(
            assignment.iter().all(|&representative| representative < vertex_count),
            "component representative out of range"
        );
        Self { assignment }
    }

    pub fn vertex_count(&self) -> usize {
        self.assignment.len()
    }

    /// Representative of the component holding `vertex`.
    pub fn representative(&self, vertex: usize) -> usize {
        self.assignment[vertex]
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// True when every vertex lies in the same component. Graphs with zero or one
    /// vertex are strongly connected.
    pub fn is_strongly_connected(&self) -> bool {
        match self.assignment.first() {
            Some(&first) => self.assignment.iter().all(|&representative| representative == first),
            None => true,
        }
    }

    /// Component sizes indexed by representative; non-representatives have size 0.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.assignment.len()];
        for &representative in &self.assignment {
            sizes[representative] += 1;
        }
        sizes
    }

    /// Vertices grouped per component.
    ///
    /// Groups come in the order their first vertex appears, and each group lists its
    /// vertices in increasing order.
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut group_of = vec![UNASSIGNED; self.assignment.len()];
        let mut groups = Vec::<Vec<usize>>::new();
        for (vertex, &representative) in self.assignment.iter().enumerate() {
            if group_of[representative] == UNASSIGNED {
                group_of[representative] = groups.len();
                groups.push(Vec::new());
            }
            groups[group_of[representative]].push(vertex);
        }
        groups
    }

    /// Largest component, ties going to the component met first in vertex order.
    pub fn largest(&self) -> Option<ComponentStat> {
        self.first_by(|candidate, best| candidate > best)
    }

    /// Smallest component, ties going to the component met first in vertex order.
    pub fn smallest(&self) -> Option<ComponentStat> {
        self.first_by(|candidate, best| candidate < best)
    }

    pub fn summary(&self) -> ComponentSummary {
        let sizes = self.sizes();
        ComponentSummary {
            component_count: sizes.iter().filter(|&&size| size > 0).count(),
            largest: self.largest(),
            smallest: self.smallest(),
        }
    }

    /// Scans components in order of first appearance and keeps the first one that
    /// `better` prefers over every earlier one.
    fn first_by<F>(&self, better: F) -> Option<ComponentStat>
    where
        F: Fn(usize, usize) -> bool,
    {
        let sizes = self.sizes();
        let mut best: Option<ComponentStat> = None;
        for &representative in &self.assignment {
            let size = sizes[representative];
            match best {
                Some(current) if !better(size, current.size) => {}
                _ => best = Some(ComponentStat { representative, size }),
            }
        }
        best
    }
}

/// Frame of the explicit depth-first stack that replaces recursion.
#[derive(Clone, Copy)]
enum State {
    /// First time the vertex is reached
    Start,
    /// Continue with the neighbor at this position of the adjacency list
    ProcessNeighbor(usize),
    /// Every neighbor is handled; the vertex may close a component
    Finish,
}

impl Graph {
    /// Computes strongly connected components with Gabow's path-based algorithm.
    ///
    /// # Algorithm
    ///
    /// Every vertex gets a discovery number and is pushed on two stacks: the membership
    /// stack, holding vertices whose component is still open, and the candidate stack,
    /// holding possible component roots. An edge to a vertex still on the membership
    /// stack merges everything discovered after it, which is done by popping candidates
    /// with a strictly greater discovery number. A vertex that is still the top
    /// candidate once all its edges are explored closes a component: the membership
    /// stack is popped down to it and every popped vertex gets it as representative.
    ///
    /// The search runs from every unvisited vertex in index order. Recursion is replaced
    /// by an explicit frame stack, so path length does not bound the usable graph size.
    ///
    /// # Complexity
    ///
    /// O(V + E) time, O(V) extra space.
    pub fn gabow(&self) -> Components {
        let vertex_count = self.vertex_count();

        let mut dfs_counter = 0usize;
        let mut dfs_numbers = vec![UNASSIGNED; vertex_count];
        let mut on_stack = vec![false; vertex_count];
        let mut components = vec![UNASSIGNED; vertex_count];
        let mut membership_stack = Vec::<usize>::new();
        let mut candidate_stack = Vec::<usize>::new();

        for root in 0..vertex_count {
            if dfs_numbers[root] != UNASSIGNED {
                continue;
            }

            let mut frames = vec![(root, State::Start)];
            while let Some((vertex, state)) = frames.pop() {
                match state {
                    State::Start => {
                        dfs_numbers[vertex] = dfs_counter;
                        dfs_counter += 1;
                        membership_stack.push(vertex);
                        candidate_stack.push(vertex);
                        on_stack[vertex] = true;
                        frames.push((vertex, State::ProcessNeighbor(0)));
                    }

                    State::ProcessNeighbor(position) => {
                        let Some(neighbor) = self.neighbors(vertex).get(position) else {
                            frames.push((vertex, State::Finish));
                            continue;
                        };

                        // Come back for the next neighbor after this one is handled
                        frames.push((vertex, State::ProcessNeighbor(position + 1)));

                        if dfs_numbers[neighbor] == UNASSIGNED {
                            frames.push((neighbor, State::Start));
                        } else if on_stack[neighbor] {
                            // Collapse every candidate discovered after the neighbor
                            while let Some(&top) = candidate_stack.last() {
                                if dfs_numbers[neighbor] < dfs_numbers[top] {
                                    candidate_stack.pop();
                                } else {
                                    break;
                                }
                            }
                        }
                    }

                    State::Finish => {
                        if candidate_stack.last() != Some(&vertex) {
                            continue;
                        }
                        candidate_stack.pop();
                        while let Some(member) = membership_stack.pop() {
                            on_stack[member] = false;
                            components[member] = vertex;
                            if member == vertex {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Components { assignment: components }
    }
}

/// Computes the strongly connected components of `graph`.
pub fn compute_components(graph: &Graph) -> Components {
    graph.gabow()
}

/// True when the assignment puts every vertex in one component.
pub fn is_strongly_connected(components: &Components) -> bool {
    components.is_strongly_connected()
}
