//! nearfind command-line interface
//!
//! Reads a query CSV and one location CSV per category, then reports the
//! closest locations of each category to every query point.

mod cli;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use nearfind::compute::pivot::RandomPivot;
use nearfind::{Config, FinderBuilder, Report, loader};
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;

    let queries = loader::load_queries(&config.queries)
        .with_context(|| format!("loading queries from {}", config.queries.display()))?;
    let finder = FinderBuilder::from_config(&config)
        .context("loading category files")?
        .build()?;
    log::info!(
        "answering {} queries against {} categories",
        queries.len(),
        finder.categories().len()
    );

    let answers = if config.workers > 1 {
        let seed = config.seed.unwrap_or_else(rand::random);
        finder.run_parallel(&queries, config.workers, seed)
    } else {
        let mut pivots = match config.seed {
            Some(seed) => RandomPivot::seeded(seed),
            None => RandomPivot::from_entropy(),
        };
        finder.run(&queries, &mut pivots)
    };

    let report = Report::new(config.format, config.precision);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            report.write(&answers, BufWriter::new(file))?;
            log::info!("wrote {} report to {}", report.format(), path.display());
        }
        None => report.write(&answers, io::stdout().lock())?,
    }
    Ok(())
}

/// Config file (or defaults) with command-line flags applied on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(queries) = &cli.queries {
        config.queries = queries.clone();
    }
    if !cli.categories.is_empty() {
        config.categories = cli.categories.clone();
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(unit) = cli.unit {
        config.unit = unit;
    }
    if let Some(metric) = cli.metric {
        config.metric = metric;
    }
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    config.validate()?;
    Ok(config)
}
