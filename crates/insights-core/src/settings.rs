use std::ffi::OsString;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::calendar::{self, Holiday};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for content-release viewership
#[derive(Parser, Debug, Clone)]
#[command(
    name = "content-insights",
    about = "Terminal dashboard for content-release viewership",
    version
)]
pub struct Settings {
    /// Content release CSV (Title, Content Type, Language Indicator, Release Date, Hours Viewed)
    #[arg(long, env = "CONTENT_INSIGHTS_DATA")]
    pub data_file: Option<PathBuf>,

    /// Tab shown on startup (1-9)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=9))]
    pub tab: u8,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Number of titles in the top content table
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(0..=100))]
    pub top_n: u16,

    /// Days either side of a holiday that count as a holiday release
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(0..=31))]
    pub holiday_window: u32,

    /// Holiday anchor date (YYYY-MM-DD); repeat for several, defaults to the 2023 holidays
    #[arg(long = "holiday", value_parser = parse_holiday)]
    pub holidays: Vec<NaiveDate>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.content-insights/logs/content-insights.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Parse an explicit argument list and apply `--debug`.
    pub fn load_from_args(args: Vec<OsString>) -> Self {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Holiday anchors to use: the ones given on the command line, or the
    /// default 2023 holidays when none were given.
    pub fn holiday_anchors(&self) -> Vec<Holiday> {
        if self.holidays.is_empty() {
            calendar::default_holidays()
        } else {
            self.holidays.iter().copied().map(Holiday::unnamed).collect()
        }
    }

    /// Zero-based index of the startup tab.
    pub fn initial_tab_index(&self) -> usize {
        usize::from(self.tab.saturating_sub(1))
    }
}

fn parse_holiday(value: &str) -> Result<NaiveDate, String> {
    calendar::parse_release_date(value)
        .ok_or_else(|| format!("expected a YYYY-MM-DD date, got {:?}", value))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
