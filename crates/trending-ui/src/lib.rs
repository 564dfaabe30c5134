//! Terminal UI layer for the trending video dashboard.
//!
//! Provides themes, the header, tab bar, chart and findings components, the
//! overview and channels tabs, table views, and the application event loop
//! built on top of [`ratatui`].

pub mod app;
pub mod channels_view;
pub mod components;
pub mod overview_view;
pub mod table_view;
pub mod themes;

pub use trending_core as core;
