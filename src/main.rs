use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::Serialize;

use bicon::config::RunConfig;
use bicon::runner::{outcomes_to_yaml, run, DatasetOutcome};
use bicon::Result;

#[derive(Parser, Debug, Serialize)]
#[command(author, version, about)]
struct Args {
    /// YAML configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the edge-list datasets.
    #[arg(long)]
    dataset_dir: Option<PathBuf>,

    /// Dataset file inside the dataset directory (repeatable). Defaults to every file
    /// with the configured extension.
    #[arg(short, long)]
    dataset: Vec<String>,

    /// Number of header lines skipped in each dataset.
    #[arg(long)]
    header_lines: Option<usize>,

    /// Re-check every strongly connected component after the SCC pass.
    #[arg(short, long, default_value_t = false)]
    validate: bool,

    /// Threads used for component validation.
    #[arg(short = 'n', long)]
    thread_num: Option<usize>,

    /// Do not draw progress bars.
    #[arg(long, default_value_t = false)]
    no_progress: bool,

    /// Only print the final summary.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Print the full per-dataset report as YAML.
    #[arg(long, default_value_t = false)]
    yaml: bool,
}

fn build_config(args: &Args) -> Result<RunConfig> {
    let mut run_config = match &args.config {
        Some(path) => RunConfig::from_yaml_file(path)?,
        None => RunConfig::default(),
    };

    if let Some(dataset_dir) = &args.dataset_dir {
        run_config.dataset_dir = dataset_dir.clone();
    }
    if !args.dataset.is_empty() {
        run_config.datasets = args.dataset.clone();
    }
    if let Some(header_lines) = args.header_lines {
        run_config.header_lines = header_lines;
    }
    if let Some(thread_num) = args.thread_num {
        run_config.thread_num = thread_num;
    }
    run_config.validate_components |= args.validate;
    if args.no_progress || args.quiet {
        run_config.show_progress = false;
    }
    if args.quiet {
        run_config.verbose = false;
    }
    Ok(run_config)
}

fn execute(args: &Args) -> Result<()> {
    let run_config = build_config(args)?;
    let source = run_config.dataset_source();
    let outcomes = run(source.as_ref(), &run_config)?;

    if args.yaml {
        println!("{}", outcomes_to_yaml(&outcomes)?);
        return Ok(());
    }

    println!("Summary:");
    for outcome in &outcomes {
        match outcome {
            DatasetOutcome::Analyzed { dataset, report, .. } => println!(
                "  {}: {} vertices, {} SCCs, {}strongly connected, {} (SCC {:.3} ms, biconnectivity {:.3} ms)",
                dataset,
                report.vertex_count,
                report.components.component_count,
                if report.strongly_connected { "" } else { "not " },
                if report.biconnectivity.is_biconnected() {
                    "2-vertex strongly biconnected"
                } else {
                    "NOT 2-vertex strongly biconnected"
                },
                report.scc_elapsed_ms,
                report.bicon_elapsed_ms
            ),
            DatasetOutcome::Skipped { dataset, reason } => {
                println!("  {}: skipped ({})", dataset, reason)
            }
        }
    }
    Ok(())
}

fn main() {
    let args: Args = Args::parse();
    if let Err(err) = execute(&args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
