//! Backup archive scanning

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::CategorySettings;
use crate::models::{age_in_days, BackupEntry, MonitorError, MonitorResult};

/// List backup archives for one category, newest first
///
/// Matches the category glob inside its directory, stats each file, and
/// returns at most `max_entries` entries sorted by descending modification
/// time, each with its age relative to `now`. A missing directory is an
/// error.
pub fn collect_category(
    settings: &CategorySettings,
    max_entries: usize,
    now: DateTime<Utc>,
) -> MonitorResult<Vec<BackupEntry>> {
    if !settings.directory.is_dir() {
        return Err(MonitorError::MissingDirectory {
            path: settings.directory.clone(),
        });
    }

    let pattern = settings.directory.join(&settings.pattern);
    let pattern = pattern.to_string_lossy();

    let mut entries = Vec::new();
    for path in glob::glob(&pattern)? {
        let path = path?;
        let metadata = std::fs::metadata(&path)?;
        if !metadata.is_file() {
            continue;
        }

        let modified: DateTime<Utc> = metadata.modified()?.into();
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        entries.push(BackupEntry {
            file,
            modified,
            age_days: age_in_days(modified, now),
            size_bytes: metadata.len(),
        });
    }

    newest_first(&mut entries, max_entries);
    debug!(
        "Category {} scan complete: {} entries",
        settings.name,
        entries.len()
    );
    Ok(entries)
}

/// Sort newest-first by modification time and truncate to `limit`
pub fn newest_first(entries: &mut Vec<BackupEntry>, limit: usize) {
    entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    entries.truncate(limit);
}
