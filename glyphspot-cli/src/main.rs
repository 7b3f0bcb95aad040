use clap::Parser;
use glyphspot::raster::io::load_binary_image;
use glyphspot::{CompiledQuery, SpotConfig, Spotter};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Part-structured symbol spotting")]
struct Cli {
    /// Path to the query image (the symbol to look for).
    #[arg(short, long, value_name = "FILE")]
    query: PathBuf,
    /// Path to the target image to search.
    #[arg(short, long, value_name = "FILE")]
    target: PathBuf,
    /// Binarization threshold applied to both images.
    #[arg(long, default_value_t = 128)]
    threshold: u8,
    /// Treat pixels darker than the threshold as ink.
    #[arg(long)]
    ink_below: bool,
    /// Number of ranked candidates to report.
    #[arg(short, long, default_value_t = 10)]
    limit: usize,
    /// Landmark spacing along skeleton branches.
    #[arg(long, default_value_t = 3)]
    spacing: i32,
    /// Full extent of the local-minimum filter window (default: adaptive).
    #[arg(long)]
    window: Option<usize>,
    /// Enable tracing output for pipeline profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct RegionOut {
    row: usize,
    col: usize,
    width: usize,
    height: usize,
}

#[derive(Debug, Serialize)]
struct SpotOut {
    row: usize,
    col: usize,
    energy: f32,
    region: RegionOut,
}

#[derive(Debug, Serialize)]
struct Output {
    landmarks: usize,
    query_width: usize,
    query_height: usize,
    spots: Vec<SpotOut>,
}

fn run(cli: &Cli) -> Result<Output, Box<dyn std::error::Error>> {
    let query = load_binary_image(&cli.query, cli.threshold, cli.ink_below)?;
    let target = load_binary_image(&cli.target, cli.threshold, cli.ink_below)?;

    let cfg = SpotConfig {
        spacing: cli.spacing,
        minima_window: cli.window,
        limit: cli.limit,
        ..SpotConfig::default()
    };
    let compiled = CompiledQuery::compile(query.view(), &cfg)?;
    let landmarks = compiled.tree().len();
    let query_width = compiled.width();
    let query_height = compiled.height();

    let spotter = Spotter::new(compiled).with_config(cfg);
    let spotting = spotter.spot(target.view())?;

    Ok(Output {
        landmarks,
        query_width,
        query_height,
        spots: spotting
            .spots
            .iter()
            .map(|s| SpotOut {
                row: s.row,
                col: s.col,
                energy: s.energy,
                region: RegionOut {
                    row: s.region.row,
                    col: s.region.col,
                    width: s.region.width,
                    height: s.region.height,
                },
            })
            .collect(),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match run(&cli) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
