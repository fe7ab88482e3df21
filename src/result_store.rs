//! Last-result store.
//!
//! Holds the most recent `ScanReport` per session so a later view can
//! render it. One slot per session: starting a new upload clears the slot
//! and a finished analysis replaces it. Reports are never merged.
//!
//! The store lives in memory; `save_json` / `load_json` snapshot it to a
//! file for front ends that do not stay resident (the CLI).

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::orchestrator::ScanReport;

/// Snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

// ═══════════════════════════════════════════════════════════
// ResultStore
// ═══════════════════════════════════════════════════════════

/// Thread-safe single-slot-per-session report store.
pub struct ResultStore {
    reports: RwLock<HashMap<Uuid, ScanReport>>,
}

impl ResultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(HashMap::new()),
        }
    }

    /// Clear the session's slot ahead of a new upload.
    pub fn begin_upload(&self, session: Uuid) {
        self.clear(session);
    }

    /// Store a finished report, replacing whatever the session held.
    pub fn record(&self, session: Uuid, report: ScanReport) {
        if let Ok(mut reports) = self.reports.write() {
            tracing::debug!(
                session = %session,
                run_id = %report.result.run_id,
                "Recording scan report"
            );
            reports.insert(session, report);
        }
    }

    /// The session's most recent report.
    pub fn last(&self, session: Uuid) -> Option<ScanReport> {
        self.reports
            .read()
            .ok()
            .and_then(|reports| reports.get(&session).cloned())
    }

    /// Remove the session's report.
    pub fn clear(&self, session: Uuid) {
        if let Ok(mut reports) = self.reports.write() {
            reports.remove(&session);
        }
    }

    /// Remove every report.
    pub fn clear_all(&self) {
        if let Ok(mut reports) = self.reports.write() {
            reports.clear();
        }
    }

    /// Number of sessions holding a report.
    pub fn len(&self) -> usize {
        self.reports.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether no session holds a report.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Snapshots ────────────────────────────────────────

    /// Write all reports to `path` as JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<(), ResultStoreError> {
        let reports = self
            .reports
            .read()
            .map_err(|_| ResultStoreError::LockPoisoned)?;
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            reports: &reports,
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a snapshot written by `save_json`. A missing file is an empty store.
    pub fn load_json(path: &Path) -> Result<Self, ResultStoreError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot = serde_json::from_str(&json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ResultStoreError::UnsupportedVersion(snapshot.version));
        }
        Ok(Self {
            reports: RwLock::new(snapshot.reports),
        })
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    reports: &'a HashMap<Uuid, ScanReport>,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    reports: HashMap<Uuid, ScanReport>,
}

// ═══════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════

/// Errors from result store snapshots.
#[derive(Debug, thiserror::Error)]
pub enum ResultStoreError {
    #[error("Result store lock poisoned")]
    LockPoisoned,
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),
    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
