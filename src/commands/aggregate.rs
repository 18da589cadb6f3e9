//! Aggregate command implementation.
//!
//! The aggregate command:
//! 1. Discovers and orders the per-step dumps
//! 2. Probes the first/last dump for time, zbar and spatial extent
//! 3. Stacks the field and reduces every step
//! 4. Writes the combined VizSchema file
//! 5. Copies runInfo from the last dump
//! 6. Optionally writes a JSON summary and prints a text summary

use crate::aggregator::aggregate_time_slices;
use crate::input::{discover_time_slices, probe_spatial_extent, probe_time_slices, RunId, TimeSlice};
use crate::output::{write_summary, OutputDocument, RunSummary, Vsh5Writer};
use crate::utils::config::{DEFAULT_FIELD_NAME, SCHEMA_VERSION};
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the aggregate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    /// Run identifier `a_b_c_tag_rank`
    pub run_id: String,

    /// Directory holding the dumps; the combined file is written here too
    pub input_dir: PathBuf,

    /// Field dataset to aggregate
    pub field: String,

    /// Output path for JSON summary (optional)
    pub summary_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            run_id: String::new(),
            input_dir: PathBuf::from("."),
            field: DEFAULT_FIELD_NAME.to_string(),
            summary_json: None,
            print_summary: false,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct AggregateReport {
    /// Combined `.vsh5` file
    pub output_path: PathBuf,

    /// Attributes and datasets copied from runInfo
    pub run_info_entries: usize,

    pub summary: RunSummary,
}

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// Any discovery, probe, read or write failure aborts the run. Only a
/// missing zbar attribute is tolerated.
pub fn execute_aggregate(args: AggregateArgs) -> Result<AggregateReport> {
    let start_time = Instant::now();

    let run_id = RunId::parse(&args.run_id).context("Invalid run id")?;
    let base_name = run_id.base_name();
    debug!(
        "Run id {} -> base name {} (tag {}, rank {})",
        run_id,
        base_name,
        run_id.dataset_tag(),
        run_id.rank()
    );

    // Step 1: Discover dumps
    info!("Step 1/5: Discovering '{}' dumps in {}...", base_name, args.input_dir.display());
    let slices = discover_time_slices(&args.input_dir, &base_name)
        .context("Failed to discover input files")?;

    info!("files in order:");
    for slice in &slices {
        info!("  [{}] {}", slice.step, slice.file_name());
    }

    // Step 2: Probe first/last dumps
    info!("Step 2/5: Probing metadata...");
    let time_info = probe_time_slices(&slices, &args.field).context("Failed to probe time slices")?;
    let extent = probe_spatial_extent(&slices[0], &args.field)
        .context("Failed to probe spatial extent")?;

    debug!(
        "{} files, t=[{}, {}], zbar={:?}, dz={}",
        time_info.file_count,
        time_info.min_time,
        time_info.max_time,
        time_info.zbar_bounds(),
        extent.step_size()
    );

    // Step 3: Stack and reduce
    info!("Step 3/5: Aggregating '{}' over {} steps...", args.field, slices.len());
    let (field, series) = aggregate_time_slices(&slices, &args.field, &extent)
        .context("Failed to aggregate field data")?;

    // Step 4: Write combined file
    info!("Step 4/5: Writing combined file...");
    let output_path = args.input_dir.join(run_id.output_file_name());
    let document = OutputDocument {
        field_name: args.field.clone(),
        info: time_info,
        extent,
        field,
        series,
    };

    let writer = Vsh5Writer::create(&output_path).context("Failed to create combined file")?;
    writer
        .write_document(&document)
        .context("Failed to write combined file")?;

    // Step 5: Provenance
    info!("Step 5/5: Copying runInfo...");
    let last = slices.last().context("No input files")?;
    let run_info_entries = writer
        .copy_run_info(&last.path)
        .context(format!("Failed to copy runInfo from {}", last.path.display()))?;

    let output_path = writer.close().context("Failed to close combined file")?;
    info!("✓ Combined file written to: {}", output_path.display());

    let summary = build_summary(&base_name, &output_path, &slices, &document);

    if let Some(json_path) = &args.summary_json {
        write_summary(&summary, json_path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", json_path.display());
    }

    if args.print_summary {
        print_text_summary(&summary);
    }

    let elapsed = start_time.elapsed();
    info!("Aggregation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(AggregateReport {
        output_path,
        run_info_entries,
        summary,
    })
}

/// Validate aggregate arguments
///
/// **Public** - can be called before execute_aggregate for early validation
pub fn validate_args(args: &AggregateArgs) -> Result<()> {
    RunId::parse(&args.run_id)?;

    if args.field.is_empty() {
        anyhow::bail!("Field name cannot be empty");
    }

    if args.field.contains('/') {
        anyhow::bail!("Field name must be a root-level dataset name (no '/')");
    }

    if !args.input_dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", args.input_dir.display());
    }

    Ok(())
}

fn build_summary(
    base_name: &str,
    output_path: &std::path::Path,
    slices: &[TimeSlice],
    document: &OutputDocument,
) -> RunSummary {
    RunSummary {
        version: SCHEMA_VERSION.to_string(),
        base_name: base_name.to_string(),
        field: document.field_name.clone(),
        output_file: output_path.display().to_string(),
        input_files: slices.iter().map(TimeSlice::file_name).collect(),
        file_count: document.info.file_count,
        time_bounds: [document.info.min_time, document.info.max_time],
        zbar_bounds: document.info.zbar_bounds().map(|(lo, hi)| [lo, hi]),
        extent: document.extent,
        step_size: document.extent.step_size(),
        energy: document.series.energy.clone(),
        peak_power: document.series.peak_power.clone(),
        generated_at: Utc::now().to_rfc3339(),
    }
}

fn print_text_summary(summary: &RunSummary) {
    println!("\n{}", "=".repeat(80));
    println!("AGGREGATION SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Series:      {}", summary.base_name);
    println!("Field:       {}", summary.field);
    println!("Steps:       {}", summary.file_count);
    println!("Time:        [{}, {}]", summary.time_bounds[0], summary.time_bounds[1]);
    match summary.zbar_bounds {
        Some([lo, hi]) => println!("Zbar:        [{}, {}]", lo, hi),
        None => println!("Zbar:        not present"),
    }
    println!(
        "Points:      {} over [{}, {}] (dz = {})",
        summary.extent.point_count, summary.extent.lower, summary.extent.upper, summary.step_size
    );
    if let Some((step, peak)) = summary.brightest_step() {
        println!("Peak power:  {} at step {}", peak, step);
    }
    println!("Output:      {}", summary.output_file);
    println!("{}", "=".repeat(80));
}
