//! Input side of the pipeline.
//!
//! This module handles:
//! - Parsing the run identifier passed on the command line
//! - Locating and ordering the per-step dumps
//! - Probing the first/last dumps for time, zbar and spatial extent

pub mod discovery;
pub mod probe;
pub mod run_id;

// Re-export main types
pub use discovery::{discover_time_slices, parse_step_index, TimeSlice};
pub use probe::{probe_spatial_extent, probe_time_slices, SpatialExtent, TimeSliceInfo};
pub use run_id::RunId;
