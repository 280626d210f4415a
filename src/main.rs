//! `stig-mapper` — recognize cataloged technology versions in dependency,
//! container image, and language descriptions.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Load and validate the technology catalog ([`taxonomy`]).
//! 4. Optionally list checklist titles the catalog does not cover ([`taxonomy::coverage`]).
//! 5. Read each configured input stream ([`source`]).
//! 6. Classify every subject and fold the labels per key ([`classify`], [`aggregate`]).
//! 7. Write the JSON result and render the requested report ([`report`]).
//! 8. Exit `0`, or `1` when any input stream could not be read.

mod aggregate;
mod classify;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod source;
mod taxonomy;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use aggregate::Aggregator;
use classify::engine::ClassificationEngine;
use cli::{Cli, ReportFormat};
use config::{load_config, resolve};
use models::{AggregateResult, Stream};
use source::reader_for;
use taxonomy::coverage::uncovered;
use taxonomy::Taxonomy;

const STREAMS: [Stream; 3] = [Stream::Dependencies, Stream::Images, Stream::Languages];

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    // The catalog is loaded once and only borrowed from here on
    let catalog_path = resolve(
        &path,
        cli.catalog.as_deref().unwrap_or(config.catalog.path.as_path()),
    );
    let taxonomy = Taxonomy::load(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    if let Some(checklist) = &cli.checklist {
        let checklist = resolve(&path, checklist);
        let listing = std::fs::read_to_string(&checklist)
            .with_context(|| format!("reading checklist {}", checklist.display()))?;
        report::terminal::render_uncovered(&uncovered(&taxonomy, &listing), cli.quiet);
    }

    let requested: Vec<(Stream, PathBuf)> = STREAMS
        .iter()
        .filter_map(|&stream| {
            let override_path = match stream {
                Stream::Dependencies => cli.dependencies.as_deref(),
                Stream::Images => cli.images.as_deref(),
                Stream::Languages => cli.languages.as_deref(),
            };
            override_path
                .or_else(|| config.inputs.path_for(stream))
                .map(|p| (stream, resolve(&path, p)))
        })
        .collect();

    if requested.is_empty() {
        if cli.checklist.is_some() {
            return Ok(());
        }
        eprintln!(
            "No input streams configured; pass --dependencies, --images, or --languages (or set [inputs] in {})",
            path.join(".stig-mapper").join("config.toml").display()
        );
        std::process::exit(1);
    }

    // Read every stream up front; a failure stays confined to its stream
    let inputs: Vec<_> = requested
        .iter()
        .map(|(stream, file)| {
            let reader = reader_for(*stream);
            tracing::debug!(stream = %reader.stream(), path = %file.display(), "reading input");
            let subjects = reader.read(file);
            if let Ok(subjects) = &subjects {
                if !cli.quiet {
                    eprintln!(
                        "  {} {} {} entries",
                        "→".cyan(),
                        stream,
                        subjects.len()
                    );
                }
            }
            (*stream, subjects)
        })
        .collect();

    let total: usize = inputs
        .iter()
        .filter_map(|(_, subjects)| subjects.as_ref().ok())
        .map(Vec::len)
        .sum();

    let engine = ClassificationEngine::new(&taxonomy);
    let parallel = config.classification.parallel && !cli.sequential;
    let mut aggregator = Aggregator::new(engine).parallel(parallel);

    let pb = progress_bar(total, cli.quiet)?;
    if let Some(pb) = &pb {
        aggregator = aggregator.progress(pb.clone());
    }

    let results = aggregator.run(inputs);

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    if let Some(output) = cli.output.as_deref().or(config.output.path.as_deref()) {
        write_result(&results.result, &resolve(&path, output))?;
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&results, &path, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results.result)?);
        }
    }

    // Exit code: 1 if any input stream failed
    if results.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}

fn progress_bar(total: usize, quiet: bool) -> Result<Option<ProgressBar>> {
    if quiet {
        return Ok(None);
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(Some(pb))
}

fn write_result(result: &AggregateResult, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(output, json).with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(path = %output.display(), keys = result.len(), "result written");
    Ok(())
}
