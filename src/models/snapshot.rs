//! Status snapshot assembled once per collection cycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{BackupEntry, StorageEntry};

/// Result of collecting one backup category
///
/// Serialized untagged so a healthy category is a plain list and a failed
/// one is an `{"error": ...}` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryReport {
    Entries(Vec<BackupEntry>),
    Failed { error: String },
}

impl CategoryReport {
    pub fn failed(error: impl Into<String>) -> Self {
        CategoryReport::Failed {
            error: error.into(),
        }
    }
}

/// Result of the disk usage collection for all monitored mounts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StorageReport {
    Mounts(BTreeMap<String, StorageEntry>),
    Failed { error: String },
}

impl StorageReport {
    pub fn failed(error: impl Into<String>) -> Self {
        StorageReport::Failed {
            error: error.into(),
        }
    }
}

/// One category section of a snapshot, with the thresholds it renders under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStatus {
    /// Category slug (e.g. "daily")
    pub name: String,
    /// Heading shown on the page (e.g. "Daily Backups")
    pub label: String,
    /// Ages up to this many days are OK
    pub ok_within_days: i64,
    /// Ages up to this many days are a warning; older is an alert
    pub warn_within_days: i64,
    pub report: CategoryReport,
}

/// Storage section of a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageStatus {
    /// Usage at or above this percentage is a warning
    pub warn_at_percent: u8,
    /// Usage at or above this percentage is an alert
    pub alert_at_percent: u8,
    pub report: StorageReport,
}

/// Fixed health flag carried by every snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    pub status: String,
}

impl Default for SystemHealth {
    fn default() -> Self {
        SystemHealth {
            status: "OK".to_string(),
        }
    }
}

/// The complete in-memory result of one collection cycle
///
/// Recreated wholesale each cycle; never diffed against a prior snapshot
/// and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Collection time
    pub timestamp: DateTime<Utc>,
    /// Category sections in configured order
    pub categories: Vec<CategoryStatus>,
    pub storage: StorageStatus,
    pub system_health: SystemHealth,
}

impl StatusSnapshot {
    /// Collection time formatted for the page header
    pub fn timestamp_display(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
