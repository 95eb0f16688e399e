//! Cached access to the derived content table.
//!
//! Loading and deriving is the only expensive step of a session, so the
//! manager keeps one derived table per source file version. A source is
//! identified by its canonical path, byte length and modification time; an
//! edited file therefore loads afresh, while repeated requests for the same
//! version share one [`Arc`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use insights_core::models::ContentTable;
use insights_core::{InsightsError, Result};
use insights_data::deriver::derive;
use insights_data::reader::load_table;

// ── SourceIdentity ────────────────────────────────────────────────────────────

/// Identifies one version of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceIdentity {
    pub path: PathBuf,
    pub len: u64,
    /// `None` on platforms that do not report modification times.
    pub modified: Option<SystemTime>,
}

impl SourceIdentity {
    /// Stat `path` and build its identity.
    pub fn of(path: &Path) -> Result<Self> {
        let to_read_error = |source| InsightsError::FileRead {
            path: path.to_path_buf(),
            source,
        };
        let canonical = path.canonicalize().map_err(to_read_error)?;
        let metadata = std::fs::metadata(&canonical).map_err(to_read_error)?;
        Ok(Self {
            path: canonical,
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Load-and-derive cache keyed by [`SourceIdentity`].
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use insights_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new();
/// let table = mgr.get_table(Path::new("netflix_content_2023.csv")).unwrap();
/// println!("{} titles", table.len());
/// ```
#[derive(Debug, Default)]
pub struct DataManager {
    cache: HashMap<SourceIdentity, Arc<ContentTable>>,
    /// Number of times a file was actually read and derived.
    loads: usize,
}

impl DataManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the derived table for `path`, loading it on first request.
    ///
    /// Errors from reading or parsing are returned unchanged and nothing is
    /// cached for a failed load.
    pub fn get_table(&mut self, path: &Path) -> Result<Arc<ContentTable>> {
        let identity = SourceIdentity::of(path)?;

        if let Some(table) = self.cache.get(&identity) {
            tracing::debug!(path = %identity.path.display(), "returning cached table");
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(derive(&load_table(&identity.path)?));
        self.loads += 1;
        tracing::info!(
            path = %identity.path.display(),
            records = table.len(),
            "content table loaded"
        );

        self.cache.insert(identity, Arc::clone(&table));
        Ok(table)
    }

    /// How many loads went to disk since construction.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Identities currently held in the cache.
    pub fn cached_sources(&self) -> impl Iterator<Item = &SourceIdentity> {
        self.cache.keys()
    }

    /// Drop every cached table.
    pub fn clear(&mut self) {
        self.cache.clear();
        tracing::debug!("table cache cleared");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
