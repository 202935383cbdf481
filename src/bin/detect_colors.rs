use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use logo_colors_wasm::{ClusterConfig, detect_with};
use serde::Serialize;

/// Detect the distinct colors of PNG and SVG logos.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input files (.png or .svg)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Maximum number of dominant colors for raster input
    #[arg(short = 'k', long)]
    max_colors: Option<usize>,

    /// Seed for reproducible clustering
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with clustering parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Detected<'a> {
    path: &'a PathBuf,
    count: usize,
    colors: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ClusterConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClusterConfig::default(),
    };
    if let Some(k) = args.max_colors {
        config.max_colors = k;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate().context("invalid clustering parameters")?;

    let mut detected = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let report = detect_with(input, &config)
            .with_context(|| format!("color detection failed for {}", input.display()))?;
        detected.push(Detected {
            path: input,
            count: report.count,
            colors: report.colors.into_iter().collect(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detected)?);
        return Ok(());
    }

    for item in &detected {
        println!("{}", item.path.display());
        println!("Total Colors Detected: {}", item.count);
        println!("Unique Colors List:");
        for color in &item.colors {
            println!("  {color}");
        }
    }
    Ok(())
}
