//! Output writers for the combined VizSchema file and its run summary.
//!
//! This module handles:
//! - VizSchema descriptor attribute sets
//! - The combined `.vsh5` file
//! - Copying `runInfo` provenance
//! - JSON run summaries

pub mod json;
pub mod provenance;
pub mod schema;
pub mod vsh5;

// Re-export main functions
pub use json::{read_summary, validate_output_path, write_summary, RunSummary};
pub use provenance::copy_run_info;
pub use schema::{zonal_cells, AttrSet, UniformMesh, VsAttr};
pub use vsh5::{Node, NodeKind, OutputDocument, Vsh5Writer};
