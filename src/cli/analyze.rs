//! The `analyze` command.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::AnalyzeArgs;
use crate::config::Config;
use crate::present::{write_artifact, ArtifactFormat};

/// Run one analysis: load config, analyze, print, write the artifact.
///
/// Returns the path of the written artifact.
pub fn run(args: &AnalyzeArgs) -> Result<PathBuf> {
    let config = resolve_config(args)?;
    let format = if args.static_output {
        ArtifactFormat::Dot
    } else {
        ArtifactFormat::Html
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format.default_file_name()));

    let analysis = crate::analyze(&args.repository_path, &config)
        .with_context(|| format!("analysis of {} failed", args.repository_path.display()))?;

    println!("Found {} nodes", analysis.graph.node_count());
    println!("Found {} edges", analysis.graph.edge_count());

    let summary = analysis.summary(config.report.top_n);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        print!("{summary}");
    }

    if !analysis.warnings.is_empty() {
        eprintln!("\n{} warning(s):", analysis.warnings.len());
        for warning in &analysis.warnings {
            eprintln!("  {warning}");
        }
    }

    let contents = analysis.render(format)?;
    write_artifact(&output, &contents)?;
    println!("\nGraph written to {}", output.display());
    Ok(output)
}

/// Config file values, overridden by command-line flags.
fn resolve_config(args: &AnalyzeArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if args.no_external {
        config.analysis.include_external = false;
    }
    if let Some(top) = args.top {
        config.report.top_n = top;
    }
    Ok(config)
}
