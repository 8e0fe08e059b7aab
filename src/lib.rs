//! Strong connectivity and single-vertex resilience of large directed graphs.
//!
//! A dataset is ingested into a [`Graph`](types::Graph) over dense vertex ids, split into
//! strongly connected components with Gabow's algorithm, reduced to its largest component
//! when it is not strongly connected, made undirected and finally tested for surviving
//! the removal of any single vertex.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod ingest;
pub mod runner;
pub mod types;

pub use algorithms::bicon::is_biconnected;
pub use algorithms::extract::extract_largest_component;
pub use algorithms::scc::{compute_components, is_strongly_connected, Components};
pub use algorithms::undirected::to_undirected;
pub use algorithms::validate::validate_components;
pub use error::{BiconError, Result};
pub use ingest::ingest;
pub use types::Graph;
