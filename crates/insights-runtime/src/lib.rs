//! Runtime layer for Content Insights.
//!
//! Owns the load-and-derive cache and assembles the dashboard report the
//! terminal UI renders.

pub mod data_manager;
pub mod reports;

pub use insights_core as core;
pub use insights_data as data;
