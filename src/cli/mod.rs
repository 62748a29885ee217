//! CLI module for repograph.
//!
//! Commands:
//! - analyze: build the dependency graph, print the importance summary and
//!   write the visualization

pub mod analyze;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "repograph")]
#[command(about = "repograph - dependency graphs and centrality for Python repositories", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a repository and write its dependency graph
    Analyze(AnalyzeArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct AnalyzeArgs {
    /// Repository root to analyze
    pub repository_path: PathBuf,

    /// YAML config file (defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (default: repo_visualization.html, or .dot with --static)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a static Graphviz DOT file instead of the interactive page
    #[arg(long = "static")]
    pub static_output: bool,

    /// Drop imports that do not resolve to a repository file
    #[arg(long)]
    pub no_external: bool,

    /// Entries per metric in the printed summary (overrides report.top_n)
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Exit code for a failed argument parse. Help and version requests are
/// successes; every usage error is a validation failure.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}
