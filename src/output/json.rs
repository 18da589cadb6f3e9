//! JSON run summary writer.
//!
//! A small sidecar describing what went into the combined file: the ordered
//! inputs, the probed bounds and the per-step series.

use crate::utils::error::OutputError;
use crate::input::SpatialExtent;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Series name (`a_b_c_tag`)
    pub base_name: String,

    /// Aggregated field name
    pub field: String,

    /// Combined `.vsh5` file
    pub output_file: String,

    /// Input dumps in processing order
    pub input_files: Vec<String>,

    pub file_count: usize,

    /// `[min, max]` simulation time
    pub time_bounds: [f64; 2],

    /// `[min, max]` zbar, when both ends were present
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub zbar_bounds: Option<[f64; 2]>,

    pub extent: SpatialExtent,

    /// Integration step used for Energy
    pub step_size: f64,

    pub energy: Vec<f64>,

    pub peak_power: Vec<f64>,

    /// Timestamp when the summary was generated
    pub generated_at: String,
}

impl RunSummary {
    /// Step with the highest peak power, if any
    pub fn brightest_step(&self) -> Option<(usize, f64)> {
        self.peak_power
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((i, p)),
            })
    }
}

/// Write a summary to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(summary: &RunSummary, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    validate_output_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, summary).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read a summary back from a JSON file
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<RunSummary, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let summary: RunSummary =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(summary)
}

/// Validate that output path is writable
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create parent directories if needed
pub fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
