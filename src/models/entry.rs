//! Per-file and per-mount entries read during collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One backup archive found on disk
///
/// Immutable once read; regenerated on every collection cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupEntry {
    /// File name without its directory
    pub file: String,
    /// Modification time
    pub modified: DateTime<Utc>,
    /// Whole days between modification and collection time
    pub age_days: i64,
    /// File size in bytes
    pub size_bytes: u64,
}

impl BackupEntry {
    /// Modification time formatted for display
    pub fn date_display(&self) -> String {
        self.modified.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Size formatted in MiB for display
    pub fn size_display(&self) -> String {
        format!("{:.2} MiB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

/// Whole days elapsed between a modification time and the collection time
pub fn age_in_days(modified: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(modified).num_days()
}

/// Disk usage for one mount point, as reported by `df -h`
///
/// The human-readable size columns are kept verbatim; only the usage
/// percentage is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub total: String,
    pub used: String,
    pub available: String,
    /// Usage percentage parsed from the `Use%` column
    pub usage_percent: u8,
}

impl StorageEntry {
    /// Usage formatted for display
    pub fn usage_display(&self) -> String {
        format!("{}%", self.usage_percent)
    }
}
