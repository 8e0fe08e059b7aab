use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BiconError, Result};

/// Capacity of the buffered reader used for dataset files.
pub const READ_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Number of leading comment lines in a SNAP edge-list file.
pub const DEFAULT_HEADER_LINES: usize = 4;

/// Settings for a batch run over one or more datasets.
///
/// Every field has a default, so a YAML file only needs to list what it changes:
///
/// ```yaml
/// dataset_dir: datasets
/// datasets: [Wiki-Vote.txt, p2p-Gnutella04.txt]
/// validate_components: true
/// thread_num: 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory holding the dataset files
    pub dataset_dir: PathBuf,

    /// Dataset file names inside `dataset_dir`; empty means every file with `extension`
    pub datasets: Vec<String>,

    /// File extension picked up when scanning `dataset_dir`
    pub extension: String,

    /// Leading lines of each file skipped as header
    pub header_lines: usize,

    /// Print a status line as each stage starts and ends
    pub verbose: bool,

    /// Draw progress bars for long stages
    pub show_progress: bool,

    /// Re-check every strongly connected component after the SCC pass
    pub validate_components: bool,

    /// Worker threads for component validation
    pub thread_num: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("datasets"),
            datasets: Vec::new(),
            extension: String::from("txt"),
            header_lines: DEFAULT_HEADER_LINES,
            verbose: true,
            show_progress: true,
            validate_components: false,
            thread_num: 1,
        }
    }
}

impl RunConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| BiconError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
}
