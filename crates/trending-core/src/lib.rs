//! Core types for the trending video dashboard.
//!
//! Holds the record models, error types, per-record metric and descriptive
//! statistics calculations, display formatting helpers and CLI settings
//! shared by the data and UI layers.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
