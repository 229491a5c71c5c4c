//! Backup Monitor - ZFS backup status dashboard
//!
//! A small daemon for the backup host, providing:
//! - Per-category backup archive scanning (daily/weekly/monthly)
//! - Disk usage cross-referencing via `df`
//! - A static HTML status page, republished on a fixed interval
//! - The same snapshot as JSON, plus Prometheus metrics

pub mod api;
pub mod collector;
pub mod config;
pub mod dns;
pub mod metrics;
pub mod models;
pub mod monitor;
pub mod render;

// Re-export commonly used types
pub use config::Settings;
pub use models::{
    BackupEntry, CategoryReport, MonitorError, MonitorResult, StatusLevel, StatusSnapshot,
    StorageEntry, StorageReport,
};
pub use monitor::StatusMonitor;

/// Version of the backup monitor
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
