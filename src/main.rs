//! Power Aggregator CLI
//!
//! Stacks the per-step power dumps of one run into a single VizSchema file.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use power_aggregator::commands::{execute_aggregate, validate_args, AggregateArgs};
use power_aggregator::utils::config::DEFAULT_FIELD_NAME;

/// Power Aggregator - combine per-step VizSchema power dumps
#[derive(Parser, Debug)]
#[command(name = "power-aggregator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Run identifier `a_b_c_tag_rank`; dumps are `a_b_c_tag_<step>.h5`
    run_id: String,

    /// Directory holding the dumps
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Field dataset to aggregate
    #[arg(short, long, env = "POWER_AGG_FIELD", default_value = DEFAULT_FIELD_NAME)]
    field: String,

    /// Output path for JSON run summary (optional)
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Print text summary to stdout
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("passed {} arguments", std::env::args().count());
    info!("1: {}", cli.run_id);

    let args = AggregateArgs {
        run_id: cli.run_id,
        input_dir: cli.dir,
        field: cli.field,
        summary_json: cli.summary_json,
        print_summary: cli.summary,
    };

    // Validate args first
    validate_args(&args)?;

    execute_aggregate(args)?;

    Ok(())
}
