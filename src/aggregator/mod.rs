//! Aggregation of per-step field dumps.
//!
//! This module turns the ordered dumps into:
//! - Stacked raw and peak-normalised 2D fields
//! - Per-step energy (spatial integral) and peak power

pub mod accumulator;
pub mod reduction;

// Re-export main types and functions
pub use accumulator::{aggregate_time_slices, Accumulator, AggregatedField, DerivedSeries};
pub use reduction::{normalize_by_peak, peak, trapezoid, SliceReduction};
