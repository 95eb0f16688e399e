use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use insights_core::InsightsError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name looked for when no data file is given.
pub const DEFAULT_DATA_FILE: &str = "netflix_content_2023.csv";

const APP_DIR: &str = ".content-insights";
const LOG_FILE: &str = "content-insights.log";

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `~/.content-insights/`
pub fn app_dir() -> PathBuf {
    home_dir().join(APP_DIR)
}

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.content-insights/` directory hierarchy exists.
///
/// Creates `logs/` and `data/` below it, including any missing parents.
pub fn ensure_directories() -> anyhow::Result<()> {
    ensure_directories_in(&app_dir())
}

fn ensure_directories_in(app_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(app_dir.join("logs"))?;
    std::fs::create_dir_all(app_dir.join("data"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// `~/.content-insights/logs/content-insights.log`
pub fn default_log_file() -> PathBuf {
    app_dir().join("logs").join(LOG_FILE)
}

/// Map a `--log-level` name to a tracing filter directive.
fn filter_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber, appending to `log_file` (or
/// the default log file) with ANSI colours off.
///
/// The terminal belongs to the dashboard, so nothing is written to stderr.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let path = log_file.cloned().unwrap_or_else(default_log_file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_new(filter_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Resolve the source CSV.
///
/// An explicit path must exist. Otherwise the following are checked in order
/// and the first that exists wins:
/// 1. `./netflix_content_2023.csv`
/// 2. `~/.content-insights/data/netflix_content_2023.csv`
pub fn discover_data_path(explicit: Option<&Path>) -> Result<PathBuf, InsightsError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    discover_data_path_in(explicit, &cwd, &app_dir())
}

fn discover_data_path_in(
    explicit: Option<&Path>,
    cwd: &Path,
    app_dir: &Path,
) -> Result<PathBuf, InsightsError> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(InsightsError::DataPathNotFound(path.to_path_buf()))
        };
    }

    let candidates = [
        cwd.join(DEFAULT_DATA_FILE),
        app_dir.join("data").join(DEFAULT_DATA_FILE),
    ];
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| InsightsError::DataPathNotFound(PathBuf::from(DEFAULT_DATA_FILE)))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, "Title\n").expect("write file");
    }

    // ── ensure_directories ────────────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");
        let app = tmp.path().join(APP_DIR);

        ensure_directories_in(&app).expect("ensure_directories should succeed");

        assert!(app.join("logs").is_dir(), "logs subdir must exist");
        assert!(app.join("data").is_dir(), "data subdir must exist");
        // Running twice is harmless.
        ensure_directories_in(&app).expect("second run should succeed");
    }

    // ── filter_directive ──────────────────────────────────────────────────────

    #[test]
    fn test_filter_directive_mapping() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("INFO"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("ERROR"), "error");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("debug"), "debug");
        assert_eq!(filter_directive("nonsense"), "info");
    }

    #[test]
    fn test_default_log_file_location() {
        let path = default_log_file();
        assert!(path.ends_with(Path::new(APP_DIR).join("logs").join(LOG_FILE)));
    }

    // ── discover_data_path ────────────────────────────────────────────────────

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("releases.csv");
        touch(&file);

        let found = discover_data_path_in(Some(&file), tmp.path(), &tmp.path().join(APP_DIR));
        assert_eq!(found.unwrap(), file);
    }

    #[test]
    fn test_discover_explicit_missing_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("missing.csv");

        let result = discover_data_path_in(Some(&missing), tmp.path(), &tmp.path().join(APP_DIR));
        match result {
            Err(InsightsError::DataPathNotFound(p)) => assert_eq!(p, missing),
            other => panic!("expected DataPathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_prefers_working_directory() {
        let tmp = TempDir::new().expect("tempdir");
        let cwd = tmp.path().join("work");
        let app = tmp.path().join(APP_DIR);
        touch(&cwd.join(DEFAULT_DATA_FILE));
        touch(&app.join("data").join(DEFAULT_DATA_FILE));

        let found = discover_data_path_in(None, &cwd, &app).unwrap();
        assert_eq!(found, cwd.join(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_discover_falls_back_to_app_data_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let cwd = tmp.path().join("work");
        std::fs::create_dir_all(&cwd).unwrap();
        let app = tmp.path().join(APP_DIR);
        touch(&app.join("data").join(DEFAULT_DATA_FILE));

        let found = discover_data_path_in(None, &cwd, &app).unwrap();
        assert_eq!(found, app.join("data").join(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_discover_nothing_found() {
        let tmp = TempDir::new().expect("tempdir");
        let result = discover_data_path_in(None, tmp.path(), &tmp.path().join(APP_DIR));
        assert!(matches!(result, Err(InsightsError::DataPathNotFound(_))));
    }
}
