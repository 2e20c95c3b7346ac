//! Assembly session: configuration plus the ingest report of one build.
//!
//! A [`Session`] is handed to exactly one [`NetworkBuilder`](crate::NetworkBuilder)
//! and travels with it; nothing here is process-global.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::builder::RecordKind;
use crate::Result;

// ============================================================================
// Configuration
// ============================================================================

/// Builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Derive organ associations from `<role>_organ` fields of AOP records.
    pub include_inline_organs: bool,
    /// Relationship-batch records need both endpoints already registered.
    /// When off, missing endpoints are registered as generic key events.
    pub strict_relationships: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            include_inline_organs: true,
            strict_relationships: true,
        }
    }
}

impl BuildConfig {
    /// Parse from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Ingest report
// ============================================================================

/// Per-batch-kind counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub accepted: usize,
    pub skipped: usize,
}

/// A binding record that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub kind: RecordKind,
    /// Position of the record in its batch.
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub batches: IndexMap<RecordKind, BatchStats>,
    pub skipped: Vec<SkippedRecord>,
}

impl IngestReport {
    pub fn record_accepted(&mut self, kind: RecordKind) {
        self.batches.entry(kind).or_default().accepted += 1;
    }

    pub fn record_skipped(&mut self, kind: RecordKind, index: usize, reason: impl Into<String>) {
        self.batches.entry(kind).or_default().skipped += 1;
        self.skipped.push(SkippedRecord { kind, index, reason: reason.into() });
    }

    pub fn stats(&self, kind: RecordKind) -> BatchStats {
        self.batches.get(&kind).copied().unwrap_or_default()
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.len()
    }
}

// ============================================================================
// Session
// ============================================================================

/// Session-scoped context for one assembly pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub config: BuildConfig,
    pub report: IngestReport,
}

impl Session {
    pub fn new(id: impl Into<String>, config: BuildConfig) -> Self {
        Self {
            id: id.into(),
            started_at: Utc::now(),
            config,
            report: IngestReport::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("default", BuildConfig::default())
    }
}
