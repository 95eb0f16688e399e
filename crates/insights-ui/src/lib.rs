//! Terminal UI layer for Content Insights.
//!
//! Provides themes, the header component, chart and table views, and the
//! tabbed application event loop built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use insights_core as core;
