//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing the run identifier
#[derive(Error, Debug)]
pub enum RunIdError {
    #[error("Run id '{id}' must have {expected} '_'-separated tokens, found {found}")]
    WrongTokenCount {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("Run id '{0}' contains an empty token")]
    EmptyToken(String),
}

/// Errors that can occur while locating and ordering input dumps
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to list directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("No files matching '{base_name}_*.h5' in {}", .dir.display())]
    NoFiles { base_name: String, dir: PathBuf },

    #[error("Cannot parse step index from file name: {0}")]
    InvalidStep(String),

    #[error("Step {step} appears more than once ({first} and {second})")]
    DuplicateStep {
        step: i64,
        first: String,
        second: String,
    },
}

/// Errors that can occur while probing the first/last dumps
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("Missing attribute '{attr}' on '{node}' in {}", .file.display())]
    MissingAttribute {
        file: PathBuf,
        node: String,
        attr: String,
    },

    #[error("Field '{field}' in {} has no points", .file.display())]
    EmptyField { file: PathBuf, field: String },

    #[error("Nothing to probe: empty file list")]
    NoSlices,
}

/// Errors that can occur while stacking per-step fields
#[derive(Error, Debug)]
pub enum AccumulateError {
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("Slice {index} has {found} points, expected {expected}")]
    ShapeMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Accumulator is full ({0} slices)")]
    Overflow(usize),

    #[error("Accumulator received {received} of {expected} slices")]
    Incomplete { expected: usize, received: usize },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Missing node '{node}' in {}", .file.display())]
    MissingNode { file: PathBuf, node: String },

    #[error("Attribute text is not valid HDF5 unicode: {0}")]
    InvalidText(String),
}
