//! retail-etl - extract, clean and load retail business data

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use retail_etl::clean;
use retail_etl::config::Config;
use retail_etl::connector::connector_for;
use retail_etl::load::{CsvLoader, Loader};
use retail_etl::report::{self, SourceSummary};
use retail_etl::source::SourceKind;

/// Extract, clean and centralise retail business data
#[derive(Parser, Debug)]
#[command(name = "retail-etl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sources to process, as `<kind>=<path>` pairs
    /// (e.g. users=raw/legacy_users.csv dates=raw/date_details.json)
    #[arg(required = true)]
    sources: Vec<String>,

    /// Directory destination tables are written to
    #[arg(short, long, default_value = "cleaned")]
    out_dir: PathBuf,

    /// Clean and report, but do not persist
    #[arg(long)]
    stats_only: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1), // at least one source failed
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let configs: Vec<Config> = cli
        .sources
        .iter()
        .map(|spec| parse_source_spec(spec))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .map(|(kind, path)| {
            Config::new(kind, path)
                .with_out_dir(cli.out_dir.clone())
                .with_stats_only(cli.stats_only)
        })
        .collect();

    let loader = CsvLoader::new(cli.out_dir);
    let mut summaries = Vec::new();
    let mut all_ok = true;

    // Sources are processed strictly one at a time; a strict cleaning
    // failure aborts that source's load but not the others.
    for config in configs {
        match process_source(&config, &loader) {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                tracing::error!(source = %config.source, "{:#}", e);
                eprintln!("Error: {:#}", e);
                all_ok = false;
            }
        }
    }

    if !summaries.is_empty() {
        println!("{}", report::render(&summaries));
    }

    Ok(all_ok)
}

fn process_source(config: &Config, loader: &CsvLoader) -> Result<SourceSummary> {
    let kind = config.source;
    tracing::info!(source = %kind, input = %config.input.display(), "processing source");

    let connector = connector_for(&config.input)?;
    let raw = connector
        .fetch()
        .with_context(|| format!("Failed to fetch {} source", kind))?;

    let result = clean::clean(kind, raw)
        .with_context(|| format!("Failed to clean {} table", kind))?;

    let summary = SourceSummary::new(kind, &result);
    if !config.stats_only {
        loader
            .persist(result.table, kind.destination())
            .with_context(|| format!("Failed to persist {}", kind.destination()))?;
    }
    Ok(summary)
}

fn parse_source_spec(spec: &str) -> Result<(SourceKind, PathBuf)> {
    let Some((kind, path)) = spec.split_once('=') else {
        bail!("Invalid source spec '{}': expected <kind>=<path>", spec);
    };
    let kind: SourceKind = kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .with_context(|| format!("Invalid source spec '{}'", spec))?;
    Ok((kind, PathBuf::from(path)))
}
