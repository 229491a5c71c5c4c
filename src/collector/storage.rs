//! Disk usage collection via `df`

use std::collections::BTreeMap;
use tokio::process::Command;
use tracing::debug;

use crate::config::StorageSettings;
use crate::models::{MonitorError, MonitorResult, StorageEntry};

/// Run `df -h` once for all monitored mount points
pub async fn collect_storage(
    settings: &StorageSettings,
) -> MonitorResult<BTreeMap<String, StorageEntry>> {
    let output = Command::new("df")
        .arg("-h")
        .args(&settings.mount_points)
        .output()
        .await
        .map_err(|e| MonitorError::DiskUsage(format!("failed to run df: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MonitorError::DiskUsage(format!(
            "df exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let mounts = parse_df_output(&String::from_utf8_lossy(&output.stdout));
    debug!("Disk usage collected for {} mounts", mounts.len());
    Ok(mounts)
}

/// Parse tabular `df` output, keyed by the mount path in the last column
///
/// Columns are taken from the end of each whitespace-split line, so device
/// names containing spaces do not shift the mount point, size, or usage
/// fields. Rows without a parseable `Use%` column are skipped.
pub fn parse_df_output(output: &str) -> BTreeMap<String, StorageEntry> {
    let mut mounts = BTreeMap::new();

    for line in output.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 6 {
            continue;
        }

        let n = fields.len();
        let usage_percent = match fields[n - 2]
            .strip_suffix('%')
            .and_then(|v| v.parse::<u8>().ok())
        {
            Some(percent) => percent,
            None => continue,
        };

        mounts.insert(
            fields[n - 1].to_string(),
            StorageEntry {
                total: fields[n - 5].to_string(),
                used: fields[n - 4].to_string(),
                available: fields[n - 3].to_string(),
                usage_percent,
            },
        );
    }

    mounts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
/dev/sdb1       1.8T  812G  935G  47% /mnt/orico1
/dev/sdc1       1.8T  1.6T  118G  94% /mnt/orico2
";

    #[test]
    fn test_parse_df_output() {
        let mounts = parse_df_output(SAMPLE);
        assert_eq!(mounts.len(), 2);

        let orico1 = &mounts["/mnt/orico1"];
        assert_eq!(orico1.total, "1.8T");
        assert_eq!(orico1.used, "812G");
        assert_eq!(orico1.available, "935G");
        assert_eq!(orico1.usage_percent, 47);

        assert_eq!(mounts["/mnt/orico2"].usage_percent, 94);
    }

    #[test]
    fn test_parse_df_output_skips_malformed_rows() {
        let output = "\
Filesystem      Size  Used Avail Use% Mounted on
tmpfs           3.2G     0  3.2G   0% /dev/shm
none            1.0G  512M  512M    - /proc/fake
short line
";
        let mounts = parse_df_output(output);
        assert_eq!(mounts.len(), 1);
        assert_eq!(mounts["/dev/shm"].usage_percent, 0);
    }

    #[test]
    fn test_parse_df_output_keys_by_last_column() {
        // A device name containing spaces shifts the early columns but not
        // the ones indexed from the end.
        let output = "\
Filesystem      Size  Used Avail Use% Mounted on
//nas/zfs backups  2.0T  1.0T  1.0T  50% /mnt/nas
";
        let mounts = parse_df_output(output);
        let nas = &mounts["/mnt/nas"];
        assert_eq!(nas.total, "2.0T");
        assert_eq!(nas.usage_percent, 50);
    }

    #[tokio::test]
    async fn test_collect_storage_against_root() {
        let settings = StorageSettings {
            mount_points: vec!["/".to_string()],
            ..Default::default()
        };
        let mounts = collect_storage(&settings).await.unwrap();
        let root = &mounts["/"];
        assert!(root.usage_percent <= 100);
    }

    #[tokio::test]
    async fn test_collect_storage_unknown_mount_fails() {
        let settings = StorageSettings {
            mount_points: vec!["/nonexistent/mount".to_string()],
            ..Default::default()
        };
        let result = collect_storage(&settings).await;
        assert!(matches!(result, Err(MonitorError::DiskUsage(_))));
    }
}
