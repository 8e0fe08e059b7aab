use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use rayon::ThreadPoolBuilder;
use serde::Serialize;

use crate::algorithms::scc::Components;
use crate::types::Graph;

/// Configuration for component validation.
///
/// # Fields
///
/// * `thread_num` - Number of threads checking components in parallel
#[derive(Clone)]
pub struct ValidatorConfig {
    pub thread_num: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { thread_num: 1 }
    }
}

/// A component that failed the forward/backward reachability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentMismatch {
    pub representative: usize,
    pub size: usize,
    /// Members reached from the first member along edges
    pub forward_visited: usize,
    /// Members reached from the first member against edges
    pub backward_visited: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub components_checked: usize,
    /// Failing components, ordered by representative
    pub mismatches: Vec<ComponentMismatch>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Re-checks a component assignment independently of the algorithm that produced it.
///
/// Each component is induced as a graph of its own and searched from its first member
/// twice, once along the edges and once on the transposed graph. The component is
/// valid iff both searches reach all of its members, i.e. every member reaches and is
/// reached by that vertex inside the component.
///
/// Components are independent, so they are checked on a pool of
/// `validator_config.thread_num` threads.
///
/// # Panics
///
/// Panics if `components` covers a different number of vertices than the graph.
pub fn validate_components(
    graph: &Graph,
    components: &Components,
    validator_config: &ValidatorConfig,
) -> ValidationReport {
    assert_eq!(
        components.vertex_count(),
        graph.vertex_count(),
        "component assignment does not match the graph"
    );

    let groups = components.members();
    let check_all = || {
        groups
            .par_iter()
            .filter_map(|members| check_component(graph, components, members))
            .collect::<Vec<_>>()
    };

    let mut mismatches = match ThreadPoolBuilder::new()
        .num_threads(validator_config.thread_num.max(1))
        .build()
    {
        Ok(pool) => pool.install(check_all),
        // Fall back to the global pool if a dedicated one cannot be spawned
        Err(_) => check_all(),
    };
    mismatches.sort_by_key(|mismatch| mismatch.representative);

    ValidationReport {
        components_checked: groups.len(),
        mismatches,
    }
}

fn check_component(
    graph: &Graph,
    components: &Components,
    members: &[usize],
) -> Option<ComponentMismatch> {
    let subgraph = graph.induce_subgraph(members);
    let forward_visited = subgraph.reachable_from(0).len();
    let backward_visited = subgraph.transpose().reachable_from(0).len();

    if forward_visited == members.len() && backward_visited == members.len() {
        return None;
    }
    Some(ComponentMismatch {
        representative: components.representative(members[0]),
        size: members.len(),
        forward_visited,
        backward_visited,
    })
}
