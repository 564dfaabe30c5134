pub mod charts;
pub mod findings;
pub mod header;
pub mod tab_bar;
