pub mod bicon;
pub mod dfs;
pub mod extract;
pub mod scc;
pub mod undirected;
pub mod validate;
