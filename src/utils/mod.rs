//! Utility modules for configuration, error handling, and HDF5 value plumbing.

pub mod config;
pub mod error;
pub mod hdf5_values;

// Re-export commonly used error types for convenience
pub use error::{AccumulateError, DiscoveryError, OutputError, ProbeError, RunIdError};
