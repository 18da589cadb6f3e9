//! Power Aggregator
//!
//! Combine per-step VizSchema power dumps from a free-electron-laser run
//! into a single `.vsh5` file with stacked fields, per-step energy and
//! peak power, and the mesh descriptors VizSchema readers need.
//!
//! This crate provides the core implementation for the
//! `power-aggregator` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! power-aggregator fig7_main_0_integrated_0 --dir ./run
//! ```

pub mod aggregator;
pub mod commands;
pub mod input;
pub mod output;
pub mod utils;
