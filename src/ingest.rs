use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::config::{DEFAULT_HEADER_LINES, READ_BUFFER_SIZE};
use crate::error::{BiconError, Result};
use crate::types::Graph;

/// A dataset after ingestion: the cleaned graph plus line counters.
#[derive(Debug)]
pub struct LoadedDataset {
    /// Graph over dense ids, self-loops and duplicate edges removed
    pub graph: Graph,

    /// Lines after the header that produced an edge
    pub edge_lines: usize,

    /// Lines after the header that did not hold two integers
    pub skipped_lines: usize,
}

/// Reads SNAP-style edge lists.
///
/// The first `header_lines` lines are skipped without inspection. Every other line is
/// expected to hold two non-negative integers, source then target, separated by any run
/// of non-digit characters (`"30\t1412"`, `"30 1412"` and `"30,1412"` all parse).
///
/// External vertex ids are renumbered densely in first-seen order, the source of a line
/// before its target. The renumbering table is dropped once the graph is built.
#[derive(Debug, Clone, Copy)]
pub struct DatasetReader {
    header_lines: usize,
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_LINES)
    }
}

impl DatasetReader {
    pub fn new(header_lines: usize) -> Self {
        Self { header_lines }
    }

    /// Loads the dataset at `path`.
    ///
    /// # Errors
    /// `BiconError::Open` if the file cannot be opened, `BiconError::Read` if reading
    /// fails part way. Malformed lines are not errors; they are counted in
    /// `skipped_lines`.
    pub fn load(&self, path: &Path) -> Result<LoadedDataset> {
        let file = File::open(path).map_err(|source| BiconError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        self.read_from(reader).map_err(|source| BiconError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds a dataset from any buffered source of edge-list text.
    pub fn read_from<R: BufRead>(&self, mut reader: R) -> io::Result<LoadedDataset> {
        let mut vertex_indexer = FxHashMap::<u64, usize>::default();
        let mut edges = Vec::<(usize, usize)>::new();
        let mut line = Vec::<u8>::new();
        let mut line_number = 0usize;
        let mut skipped_lines = 0usize;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_number += 1;
            if line_number <= self.header_lines {
                continue;
            }

            match parse_edge_line(&line) {
                Some((src, dst)) => {
                    let src = dense_index(&mut vertex_indexer, src);
                    let dst = dense_index(&mut vertex_indexer, dst);
                    edges.push((src, dst));
                }
                None => skipped_lines += 1,
            }
        }

        let mut graph = Graph::from_edges(vertex_indexer.len(), &edges);
        graph.clean();

        Ok(LoadedDataset {
            graph,
            edge_lines: edges.len(),
            skipped_lines,
        })
    }
}

/// Loads the dataset at `path` with the default four header lines and returns its graph.
pub fn ingest(path: &Path) -> Result<Graph> {
    DatasetReader::default().load(path).map(|dataset| dataset.graph)
}

/// Returns the dense index of `external_id`, assigning the next free one if it is new.
fn dense_index(vertex_indexer: &mut FxHashMap<u64, usize>, external_id: u64) -> usize {
    let next_index = vertex_indexer.len();
    *vertex_indexer.entry(external_id).or_insert(next_index)
}

/// Extracts the first two integers of a line.
///
/// Non-digit characters only separate numbers, so a leading `#` or trailing `\r` is
/// ignored. Returns `None` when the line holds fewer than two integers or a number
/// overflows `u64`.
pub fn parse_edge_line(line: &[u8]) -> Option<(u64, u64)> {
    let mut numbers = line
        .split(|byte| !byte.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .map(parse_digits);

    let src = numbers.next()??;
    let dst = numbers.next()??;
    Some((src, dst))
}

fn parse_digits(digits: &[u8]) -> Option<u64> {
    digits.iter().try_fold(0u64, |value, byte| {
        value.checked_mul(10)?.checked_add(u64::from(*byte - b'0'))
    })
}

#[cfg(test)]
mod test_ingest {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;
    use crate::types::test_type::targets;

    const HEADER: &str = "# Directed graph: example.txt\n# Example dataset\n# Nodes: 4 Edges: 5\n# FromNodeId\tToNodeId\n";

    fn read(text: &str) -> LoadedDataset {
        DatasetReader::default().read_from(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_parse_edge_line() {
        assert_eq!(parse_edge_line(b"30\t1412"), Some((30, 1412)));
        assert_eq!(parse_edge_line(b"30 1412\r\n"), Some((30, 1412)));
        assert_eq!(parse_edge_line(b"7,,  8 9"), Some((7, 8)));
        assert_eq!(parse_edge_line(b"  # 5 6"), Some((5, 6)));
        assert_eq!(parse_edge_line(b"42"), None);
        assert_eq!(parse_edge_line(b""), None);
        assert_eq!(parse_edge_line(b"99999999999999999999999 1"), None);
    }

    /// Ids are renumbered in first-seen order, source before target.
    #[test]
    fn test_dense_renumbering() {
        let dataset = read(&format!("{HEADER}100 7\n7 55\n55 100\n"));
        let graph = dataset.graph;

        // 100 -> 0, 7 -> 1, 55 -> 2
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(targets(&graph, 0), vec![1]);
        assert_eq!(targets(&graph, 1), vec![2]);
        assert_eq!(targets(&graph, 2), vec![0]);
        assert_eq!(dataset.edge_lines, 3);
        assert_eq!(dataset.skipped_lines, 0);
    }

    /// Duplicate edges collapse to one entry and self-loops disappear.
    #[test]
    fn test_duplicate_and_self_loop() {
        let dataset = read(&format!("{HEADER}1 2\n1 2\n3 3\n2 3\n"));
        let graph = dataset.graph;

        // 1 -> 0, 2 -> 1, 3 -> 2
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(targets(&graph, 0), vec![1]);
        assert!(!graph.neighbors(2).contains(2));
        assert_eq!(graph.out_degree(2), 0);
        assert_eq!(graph.edge_count(), 2);
    }

    /// Targets stay in file order after cleanup.
    #[test]
    fn test_neighbor_order_follows_file() {
        let graph = read(&format!("{HEADER}0 3\n0 1\n0 3\n0 2\n")).graph;
        // 0 -> 0, 3 -> 1, 1 -> 2, 2 -> 3
        assert_eq!(targets(&graph, 0), vec![1, 2, 3]);
    }

    /// The header is skipped even when it looks like edges, and bad lines are counted.
    #[test]
    fn test_header_and_malformed_lines() {
        let dataset = read("1 2\n3 4\n5 6\n7 8\n10 11\n\njunk\n11 10\n");

        assert_eq!(dataset.graph.vertex_count(), 2);
        assert_eq!(dataset.edge_lines, 2);
        assert_eq!(dataset.skipped_lines, 2);
    }

    #[test]
    fn test_custom_header_length() {
        let dataset = DatasetReader::new(0)
            .read_from(Cursor::new("1 2\n2 1\n"))
            .unwrap();
        assert_eq!(dataset.graph.vertex_count(), 2);
        assert_eq!(dataset.graph.edge_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let dataset = read("");
        assert_eq!(dataset.graph.vertex_count(), 0);
        assert_eq!(dataset.graph.edge_count(), 0);

        let header_only = read(HEADER);
        assert_eq!(header_only.graph.vertex_count(), 0);
    }

    /// Loads the example dataset shipped in `data/`.
    #[test]
    fn test_ingest_example_file() {
        let graph = ingest(Path::new("data/example.txt")).unwrap();

        assert_eq!(graph.vertex_count(), 8);
        assert_eq!(graph.edge_count(), 11);
        for vertex in 0..graph.vertex_count() {
            assert!(!graph.neighbors(vertex).contains(vertex));
        }
    }

    #[test]
    fn test_ingest_missing_file() {
        let err = ingest(&PathBuf::from("data/does-not-exist.txt")).unwrap_err();
        assert!(matches!(err, BiconError::Open { .. }));
    }
}
