//! Shared model for Content Insights.
//!
//! Record and table types, the error taxonomy, calendar helpers, number
//! formatting and command-line settings used by every other crate.

pub mod calendar;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{InsightsError, Result};
pub use models::{Category, CategoryMap, Column, ContentTable, DerivedFields, Record, Season, Value};
