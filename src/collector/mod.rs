//! Status collection
//!
//! Builds a [`StatusSnapshot`] from per-category directory scans and one
//! `df` invocation. A failure in any one section becomes that section's
//! error marker and never aborts the others.

mod backups;
mod storage;

pub use backups::*;
pub use storage::*;

use chrono::Utc;
use tracing::warn;

use crate::config::Settings;
use crate::models::{
    CategoryReport, CategoryStatus, StatusSnapshot, StorageReport, StorageStatus, SystemHealth,
};

/// Collect a complete status snapshot
pub async fn collect_snapshot(settings: &Settings) -> StatusSnapshot {
    let now = Utc::now();

    let mut categories = Vec::with_capacity(settings.categories.len());
    for category in &settings.categories {
        let report = match collect_category(category, settings.monitor.max_entries, now) {
            Ok(entries) => CategoryReport::Entries(entries),
            Err(e) => {
                warn!("Failed to collect category {}: {}", category.name, e);
                CategoryReport::failed(e.to_string())
            }
        };

        categories.push(CategoryStatus {
            name: category.name.clone(),
            label: category.label.clone(),
            ok_within_days: category.ok_within_days,
            warn_within_days: category.warn_within_days,
            report,
        });
    }

    let report = match collect_storage(&settings.storage).await {
        Ok(mounts) => StorageReport::Mounts(mounts),
        Err(e) => {
            warn!("Failed to collect disk usage: {}", e);
            StorageReport::failed(e.to_string())
        }
    };

    StatusSnapshot {
        timestamp: now,
        categories,
        storage: StorageStatus {
            warn_at_percent: settings.storage.warn_at_percent,
            alert_at_percent: settings.storage.alert_at_percent,
            report,
        },
        system_health: SystemHealth::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategorySettings;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_failed_category_does_not_affect_others() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tank_stage-daily-20240101.gz"), b"a").unwrap();

        let mut settings = Settings::default();
        settings.storage.mount_points = vec!["/".to_string()];
        settings.categories = vec![
            CategorySettings {
                name: "daily".to_string(),
                label: "Daily Backups".to_string(),
                directory: dir.path().to_path_buf(),
                pattern: "tank_stage-daily-*.gz".to_string(),
                ok_within_days: 1,
                warn_within_days: 2,
            },
            CategorySettings {
                name: "weekly".to_string(),
                label: "Weekly Backups".to_string(),
                directory: PathBuf::from("/nonexistent/zfs_backups"),
                pattern: "tank_stage-weekly-*.gz".to_string(),
                ok_within_days: 7,
                warn_within_days: 14,
            },
        ];

        let snapshot = collect_snapshot(&settings).await;

        assert_eq!(snapshot.categories.len(), 2);
        match &snapshot.categories[0].report {
            CategoryReport::Entries(entries) => assert_eq!(entries.len(), 1),
            CategoryReport::Failed { error } => panic!("daily should have entries: {}", error),
        }
        assert!(matches!(
            snapshot.categories[1].report,
            CategoryReport::Failed { .. }
        ));
        assert_eq!(snapshot.system_health.status, "OK");
    }
}
