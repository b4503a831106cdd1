//! Command-line arguments.

use clap::Parser;
use nearfind::{CategorySource, DistanceMetric, DistanceUnit, OutputFormat};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "nearfind", version)]
#[command(about = "Find the closest locations of each category to a batch of query points")]
pub struct Cli {
    /// Configuration file (.json, or .toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Query CSV (Latitude, Longitude, Number of stores desired)
    #[arg(short, long)]
    pub queries: Option<PathBuf>,

    /// Category as NAME=FILE; repeat for several, in report order
    #[arg(long = "category", value_name = "NAME=FILE", value_parser = parse_category)]
    pub categories: Vec<CategorySource>,

    /// Output format: text, json or geojson
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Distance unit: miles, km or m
    #[arg(short, long)]
    pub unit: Option<DistanceUnit>,

    /// Distance metric: haversine, geodesic or rhumb
    #[arg(short, long)]
    pub metric: Option<DistanceMetric>,

    /// Decimal places for distances (0-10)
    #[arg(short, long)]
    pub precision: Option<usize>,

    /// Seed for pivot selection, for repeatable runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_category(s: &str) -> Result<CategorySource, String> {
    match s.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok(CategorySource::new(name.trim(), path.trim()))
        }
        _ => Err(format!("expected NAME=FILE, got '{s}'")),
    }
}
