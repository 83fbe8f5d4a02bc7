mod cleaner;
mod config;
mod error;
mod loader;
mod models;
mod pipeline;
mod render;
mod report;
mod utils;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::AppConfig;
use crate::pipeline::Pipeline;

#[derive(Parser)]
#[command(
    name = "fb-report",
    about = "Generate HTML reports from Facebook Page and Post insight exports",
    version
)]
#[command(group(
    ArgGroup::new("input")
        .args(["pagecsv", "postcsv"])
        .required(true)
        .multiple(true)
))]
struct Cli {
    /// Facebook Page CSV data file
    #[arg(long, value_name = "FILE")]
    pagecsv: Option<PathBuf>,

    /// Facebook Post CSV data file
    #[arg(long, value_name = "FILE")]
    postcsv: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "fb_report=info,warn",
        1 => "fb_report=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;
    let pipeline = Pipeline::new(config.report);
    run(&cli, &pipeline)
}

/// Page first, then post. The first failure ends the run, so a missing page
/// file means the post file is never read.
fn run(cli: &Cli, pipeline: &Pipeline) -> Result<()> {
    if let Some(page_file) = &cli.pagecsv {
        let stats = pipeline.run_page(page_file)?;
        info!("Page report: {} days -> {:?}", stats.records, stats.output);
    }

    if let Some(post_file) = &cli.postcsv {
        let stats = pipeline.run_post(post_file)?;
        info!(
            "Post report: top {} of {} posts -> {:?}",
            stats.reported, stats.records, stats.output
        );
    }

    Ok(())
}
