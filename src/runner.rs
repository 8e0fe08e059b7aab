use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::algorithms::bicon::{BiconConfig, BiconReport, BiconVerdict};
use crate::algorithms::scc::{compute_components, ComponentSummary};
use crate::algorithms::validate::{validate_components, ValidationReport, ValidatorConfig};
use crate::config::RunConfig;
use crate::error::{BiconError, Result};
use crate::ingest::DatasetReader;
use crate::types::Graph;

/// Supplies the dataset files of a run.
pub trait DatasetSource {
    /// Returns the paths to analyze, in the order they should be processed.
    fn dataset_paths(&self) -> Result<Vec<PathBuf>>;
}

/// Every file in a directory with a given extension, sorted by name.
pub struct DirectorySource {
    directory: PathBuf,
    extension: String,
}

impl DirectorySource {
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }
}

impl DatasetSource for DirectorySource {
    fn dataset_paths(&self) -> Result<Vec<PathBuf>> {
        let list_error = |source| BiconError::ListDirectory {
            path: self.directory.clone(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.directory).map_err(list_error)? {
            let path = entry.map_err(list_error)?.path();
            let matches_extension = path
                .extension()
                .map_or(false, |extension| extension == self.extension.as_str());
            if path.is_file() && matches_extension {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

/// A fixed list of dataset paths.
pub struct ListSource {
    paths: Vec<PathBuf>,
}

impl ListSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl DatasetSource for ListSource {
    fn dataset_paths(&self) -> Result<Vec<PathBuf>> {
        Ok(self.paths.clone())
    }
}

impl RunConfig {
    /// The explicit dataset list inside `dataset_dir` if one is configured, otherwise a
    /// scan of `dataset_dir`.
    pub fn dataset_source(&self) -> Box<dyn DatasetSource> {
        if self.datasets.is_empty() {
            Box::new(DirectorySource::new(&self.dataset_dir, &self.extension))
        } else {
            Box::new(ListSource::new(
                self.datasets.iter().map(|name| self.dataset_dir.join(name)).collect(),
            ))
        }
    }
}

/// Results of the full pipeline on one graph.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Size of the ingested graph
    pub vertex_count: usize,
    pub edge_count: usize,

    /// Strongly connected components of the ingested graph
    pub components: ComponentSummary,
    pub strongly_connected: bool,

    /// Present when component validation was requested
    pub validation: Option<ValidationReport>,

    /// Size of the graph tested for biconnectivity: the whole graph if it is strongly
    /// connected, its largest component otherwise
    pub analyzed_vertex_count: usize,
    pub undirected_edge_count: usize,

    pub biconnectivity: BiconReport,

    /// SCC pass plus largest-component extraction
    pub scc_elapsed_ms: f64,
    /// Undirected transform plus biconnectivity test
    pub bicon_elapsed_ms: f64,
}

/// What happened to one dataset of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DatasetOutcome {
    Analyzed {
        dataset: String,
        skipped_lines: usize,
        report: AnalysisReport,
    },
    Skipped {
        dataset: String,
        reason: String,
    },
}

impl DatasetOutcome {
    pub fn dataset(&self) -> &str {
        match self {
            DatasetOutcome::Analyzed { dataset, .. } => dataset,
            DatasetOutcome::Skipped { dataset, .. } => dataset,
        }
    }
}

/// Runs strong connectivity, extraction and biconnectivity on `graph`.
///
/// # Steps
///
/// 1. Compute strongly connected components (and validate them if configured).
/// 2. If the graph is not strongly connected, keep only its largest component.
/// 3. Make the kept graph undirected.
/// 4. Test whether it survives the removal of any single vertex.
pub fn analyze_graph(graph: Graph, run_config: &RunConfig) -> AnalysisReport {
    let vertex_count = graph.vertex_count();
    let edge_count = graph.edge_count();

    // Step 1. Strong connectivity.
    if run_config.verbose {
        println!("Checking directed graph's strong connectivity...");
    }
    let scc_start = Instant::now();
    let components = compute_components(&graph);
    let summary = components.summary();
    let strongly_connected = components.is_strongly_connected();

    let validation = if run_config.validate_components {
        let validator_config = ValidatorConfig {
            thread_num: run_config.thread_num,
        };
        Some(validate_components(&graph, &components, &validator_config))
    } else {
        None
    };

    // Step 2. Keep the dominant component only.
    let graph = if strongly_connected {
        graph
    } else {
        if run_config.verbose {
            println!("-> Considering maximum strongly connected component...");
        }
        graph.extract_largest_component(&components)
    };
    let scc_elapsed = scc_start.elapsed();

    if run_config.verbose {
        report_components(&summary, validation.as_ref());
        println!("Testing two-connectivity of underlying graph...");
    }

    // Step 3 and 4. Undirected graph and single-vertex removals.
    let bicon_start = Instant::now();
    let analyzed_vertex_count = graph.vertex_count();
    let undirected = graph.into_undirected();
    let undirected_edge_count = undirected.edge_count();
    let bicon_config = BiconConfig {
        show_progress: run_config.show_progress,
    };
    let biconnectivity = undirected.check_biconnectivity(&bicon_config);
    let bicon_elapsed = bicon_start.elapsed();

    if run_config.verbose {
        match biconnectivity.verdict {
            BiconVerdict::Biconnected => println!("Result: Graph is 2-vertex strongly biconnected!"),
            BiconVerdict::Disconnected => {
                println!("Result: Graph is NOT 2-vertex strongly biconnected! (underlying graph is disconnected)")
            }
            BiconVerdict::CutVertex(vertex) => {
                println!("Result: Graph is NOT 2-vertex strongly biconnected! (removing vertex {} disconnects it)", vertex)
            }
        }
        println!("SCC Elapsed Time: {:.3} ms", scc_elapsed.as_secs_f64() * 1000.0);
        println!("Biconnectivity Elapsed Time: {:.3} ms", bicon_elapsed.as_secs_f64() * 1000.0);
    }

    AnalysisReport {
        vertex_count,
        edge_count,
        components: summary,
        strongly_connected,
        validation,
        analyzed_vertex_count,
        undirected_edge_count,
        biconnectivity,
        scc_elapsed_ms: scc_elapsed.as_secs_f64() * 1000.0,
        bicon_elapsed_ms: bicon_elapsed.as_secs_f64() * 1000.0,
    }
}

fn report_components(summary: &ComponentSummary, validation: Option<&ValidationReport>) {
    println!("Number of strongly connected components: {}", summary.component_count);
    if let Some(largest) = summary.largest {
        println!(
            "Largest strongly connected component size: {} (Representative vertex: {})",
            largest.size, largest.representative
        );
    }
    if let Some(smallest) = summary.smallest {
        println!(
            "Smallest strongly connected component size: {} (Representative vertex: {})",
            smallest.size, smallest.representative
        );
    }
    if let Some(validation) = validation {
        for mismatch in &validation.mismatches {
            println!(
                "Mismatch for component {} (forward: {}, backward: {}, size: {})",
                mismatch.representative, mismatch.forward_visited, mismatch.backward_visited, mismatch.size
            );
        }
        println!("Component validation: {}", if validation.is_valid() { "successful" } else { "failed" });
    }
}

/// Analyzes every dataset the source lists.
///
/// A dataset that cannot be loaded is reported as skipped and the run moves on.
///
/// # Errors
/// Only a failure of the source itself (e.g. an unreadable directory) aborts the run.
pub fn run(source: &dyn DatasetSource, run_config: &RunConfig) -> Result<Vec<DatasetOutcome>> {
    let reader = DatasetReader::new(run_config.header_lines);
    let mut outcomes = Vec::new();

    for path in source.dataset_paths()? {
        let dataset = dataset_name(&path);
        if run_config.verbose {
            println!("Loading dataset {}...", dataset);
        }

        let outcome = match reader.load(&path) {
            Ok(loaded) => {
                if run_config.verbose {
                    println!(
                        "Loaded {} vertices and {} edges ({} malformed lines skipped).",
                        loaded.graph.vertex_count(),
                        loaded.graph.edge_count(),
                        loaded.skipped_lines
                    );
                }
                DatasetOutcome::Analyzed {
                    dataset,
                    skipped_lines: loaded.skipped_lines,
                    report: analyze_graph(loaded.graph, run_config),
                }
            }
            Err(err) => {
                if run_config.verbose {
                    println!("Failed to load dataset: {}", err);
                }
                DatasetOutcome::Skipped {
                    dataset,
                    reason: err.to_string(),
                }
            }
        };
        if run_config.verbose {
            println!();
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Renders the outcomes of a run as a YAML document.
pub fn outcomes_to_yaml(outcomes: &[DatasetOutcome]) -> Result<String> {
    serde_yaml::to_string(outcomes).map_err(BiconError::Report)
}

fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod test_runner {
    use super::*;
    use crate::types::test_type::undirected;

    fn quiet_config() -> RunConfig {
        RunConfig {
            dataset_dir: PathBuf::from("data"),
            verbose: false,
            show_progress: false,
            ..RunConfig::default()
        }
    }

    /// The example dataset has components {10,20,30,40}, {50,60} and {70,80}; the first
    /// is kept and survives every single-vertex removal.
    #[test]
    fn test_analyze_example_dataset() {
        let config = RunConfig {
            validate_components: true,
            thread_num: 2,
            ..quiet_config()
        };
        let source = ListSource::new(vec![PathBuf::from("data/example.txt")]);
        let outcomes = run(&source, &config).unwrap();

        assert_eq!(outcomes.len(), 1);
        let DatasetOutcome::Analyzed { dataset, skipped_lines, report } = &outcomes[0] else {
            panic!("example dataset was skipped");
        };
        assert_eq!(dataset, "example.txt");
        assert_eq!(*skipped_lines, 0);
        assert_eq!(report.vertex_count, 8);
        assert_eq!(report.edge_count, 11);
        assert!(!report.strongly_connected);
        assert_eq!(report.components.component_count, 3);
        assert_eq!(report.components.largest.map(|stat| stat.size), Some(4));
        assert!(report.validation.as_ref().map_or(false, ValidationReport::is_valid));
        assert_eq!(report.analyzed_vertex_count, 4);
        assert_eq!(report.undirected_edge_count, 10);
        assert!(report.biconnectivity.is_biconnected());
    }

    /// A strongly connected path is analyzed whole and fails at its second vertex.
    #[test]
    fn test_analyze_path_dataset() {
        let source = ListSource::new(vec![PathBuf::from("data/path.txt")]);
        let outcomes = run(&source, &quiet_config()).unwrap();

        let DatasetOutcome::Analyzed { report, .. } = &outcomes[0] else {
            panic!("path dataset was skipped");
        };
        assert!(report.strongly_connected);
        assert!(report.validation.is_none());
        assert_eq!(report.analyzed_vertex_count, 4);
        assert_eq!(report.biconnectivity.verdict, BiconVerdict::CutVertex(1));
    }

    /// Missing files are skipped and the remaining datasets still run.
    #[test]
    fn test_missing_dataset_is_skipped() {
        let source = ListSource::new(vec![
            PathBuf::from("data/missing.txt"),
            PathBuf::from("data/path.txt"),
        ]);
        let outcomes = run(&source, &quiet_config()).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(&outcomes[0], DatasetOutcome::Skipped { dataset, .. } if dataset == "missing.txt"));
        assert_eq!(outcomes[1].dataset(), "path.txt");
    }

    #[test]
    fn test_directory_source() {
        let paths = DirectorySource::new("data", "txt").dataset_paths().unwrap();
        let names = paths.iter().map(|path| dataset_name(path)).collect::<Vec<_>>();
        assert_eq!(names, vec!["example.txt", "path.txt"]);

        let err = DirectorySource::new("data/no-such-dir", "txt").dataset_paths().unwrap_err();
        assert!(matches!(err, BiconError::ListDirectory { .. }));
    }

    #[test]
    fn test_config_dataset_source() {
        let config = RunConfig {
            datasets: vec![String::from("path.txt")],
            ..quiet_config()
        };
        let paths = config.dataset_source().dataset_paths().unwrap();
        assert_eq!(paths, vec![PathBuf::from("data/path.txt")]);
    }

    /// Every edge is a self-loop, so cleanup leaves three isolated vertices. Each stage
    /// still runs: three singleton components, the first kept, trivially biconnected.
    #[test]
    fn test_analyze_all_self_loops() {
        let text = "# Directed graph: loops.txt\n# Only self-loops\n# Nodes: 3 Edges: 3\n# FromNodeId\tToNodeId\n1 1\n2 2\n3 3\n";
        let dataset = DatasetReader::default()
            .read_from(std::io::Cursor::new(text))
            .unwrap();
        assert_eq!(dataset.graph.vertex_count(), 3);
        assert_eq!(dataset.graph.edge_count(), 0);

        let report = analyze_graph(dataset.graph, &quiet_config());
        assert_eq!(report.vertex_count, 3);
        assert_eq!(report.edge_count, 0);
        assert!(!report.strongly_connected);
        assert_eq!(report.components.component_count, 3);
        assert_eq!(report.analyzed_vertex_count, 1);
        assert_eq!(report.undirected_edge_count, 0);
        assert_eq!(report.biconnectivity.verdict, BiconVerdict::Biconnected);
    }

    #[test]
    fn test_analyze_empty_graph() {
        let report = analyze_graph(Graph::new(0), &quiet_config());
        assert!(report.strongly_connected);
        assert_eq!(report.components.component_count, 0);
        assert!(report.biconnectivity.is_biconnected());
    }

    /// Reports serialize to YAML with the outcome tag.
    #[test]
    fn test_outcome_yaml() {
        let report = analyze_graph(undirected(3, &[(0, 1), (1, 2), (2, 0)]), &quiet_config());
        let outcome = DatasetOutcome::Analyzed {
            dataset: String::from("triangle.txt"),
            skipped_lines: 0,
            report,
        };
        let yaml = outcomes_to_yaml(&[outcome]).unwrap();

        assert!(yaml.contains("status: analyzed"));
        assert!(yaml.contains("dataset: triangle.txt"));
        assert!(yaml.contains("verdict: biconnected"));
    }
}
