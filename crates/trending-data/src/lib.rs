//! Data layer for the trending video dashboard.
//!
//! Reads the videos CSV and category mapping, cleans and enriches the rows,
//! filters them, and computes the aggregates and findings the UI renders.

pub mod aggregator;
pub mod analysis;
pub mod cleaner;
pub mod enricher;
pub mod filter;
pub mod insights;
pub mod reader;

pub use trending_core as core;
