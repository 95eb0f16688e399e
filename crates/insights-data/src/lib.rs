//! Data layer for Content Insights.
//!
//! Reads the content-release CSV into a typed table, attaches calendar
//! fields (month, weekday, season) and provides the grouping, ranking and
//! date-window operations every dashboard view is built from.

pub mod aggregator;
pub mod deriver;
pub mod reader;

pub use insights_core as core;
