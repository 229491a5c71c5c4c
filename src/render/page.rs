//! HTML status page rendering
//!
//! Rendering is deterministic: the same snapshot always produces the same
//! document, byte for byte. All sections are driven by the snapshot data;
//! there is one table function per section type, not one per category.

use crate::models::{
    classify_age, classify_usage, CategoryReport, CategoryStatus, StatusSnapshot, StorageReport,
    StorageStatus,
};

const PAGE_STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
        .container { max-width: 1200px; margin: 0 auto; }
        .card { background: white; padding: 20px; margin: 10px 0; border-radius: 5px; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }
        .header { background: #2c3e50; color: white; padding: 20px; border-radius: 5px; margin-bottom: 20px; }
        table { width: 100%; border-collapse: collapse; margin: 10px 0; }
        th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background: #f8f9fa; }
        .alert { color: red; }
        .ok { color: green; }
        .warning { color: orange; }
        .error-row { color: red; font-style: italic; }
        .updated { font-size: 0.8em; color: #666; text-align: right; }";

/// Render the complete status page for one snapshot
///
/// `refresh_secs` becomes the client-side auto-refresh period and should
/// match the server-side collection interval.
pub fn render_page(snapshot: &StatusSnapshot, refresh_secs: u64) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         \x20   <title>ZFS Backup Monitor</title>\n\
         \x20   <meta http-equiv=\"refresh\" content=\"{}\">\n\
         \x20   <style>\n{}\n    </style>\n\
         </head>\n\
         <body>\n\
         <div class=\"container\">\n\
         <div class=\"header\">\n\
         \x20   <h1>ZFS Backup Monitor</h1>\n\
         \x20   <p class=\"updated\">Last updated: {}</p>\n\
         </div>\n",
        refresh_secs,
        PAGE_STYLE,
        snapshot.timestamp_display()
    );

    for category in &snapshot.categories {
        html.push_str(&render_category_card(category));
    }
    html.push_str(&render_storage_card(&snapshot.storage));

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Render one backup category as a card with a status table
fn render_category_card(category: &CategoryStatus) -> String {
    let mut card = format!(
        "<div class=\"card\">\n\
         <h2>{}</h2>\n\
         <table>\n\
         <tr><th>Backup File</th><th>Date</th><th>Age (days)</th><th>Size</th><th>Status</th></tr>\n",
        escape_html(&category.label)
    );

    match &category.report {
        CategoryReport::Entries(entries) => {
            for entry in entries {
                let level = classify_age(
                    entry.age_days,
                    category.ok_within_days,
                    category.warn_within_days,
                );
                card.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
                    escape_html(&entry.file),
                    entry.date_display(),
                    level.css_class(),
                    entry.age_days,
                    entry.size_display(),
                    level.css_class(),
                    level.label()
                ));
            }
        }
        CategoryReport::Failed { error } => {
            card.push_str(&format!(
                "<tr><td colspan=\"5\" class=\"error-row\">{}</td></tr>\n",
                escape_html(error)
            ));
        }
    }

    card.push_str("</table>\n</div>\n");
    card
}

/// Render the storage section as a card with a usage table
fn render_storage_card(storage: &StorageStatus) -> String {
    let mut card = String::from(
        "<div class=\"card\">\n\
         <h2>Storage Status</h2>\n\
         <table>\n\
         <tr><th>Mount Point</th><th>Total</th><th>Used</th><th>Available</th><th>Usage</th></tr>\n",
    );

    match &storage.report {
        StorageReport::Mounts(mounts) => {
            for (mount, entry) in mounts {
                let level = classify_usage(
                    entry.usage_percent,
                    storage.warn_at_percent,
                    storage.alert_at_percent,
                );
                card.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
                    escape_html(mount),
                    escape_html(&entry.total),
                    escape_html(&entry.used),
                    escape_html(&entry.available),
                    level.css_class(),
                    entry.usage_display()
                ));
            }
        }
        StorageReport::Failed { error } => {
            card.push_str(&format!(
                "<tr><td colspan=\"5\" class=\"error-row\">{}</td></tr>\n",
                escape_html(error)
            ));
        }
    }

    card.push_str("</table>\n</div>\n");
    card
}

/// Minimal HTML escaping for text interpolated into the page
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BackupEntry, StorageEntry, SystemHealth};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn category(name: &str, label: &str, ok: i64, warn: i64, report: CategoryReport) -> CategoryStatus {
        CategoryStatus {
            name: name.to_string(),
            label: label.to_string(),
            ok_within_days: ok,
            warn_within_days: warn,
            report,
        }
    }

    fn snapshot(categories: Vec<CategoryStatus>, report: StorageReport) -> StatusSnapshot {
        StatusSnapshot {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            categories,
            storage: StorageStatus {
                warn_at_percent: 80,
                alert_at_percent: 90,
                report,
            },
            system_health: SystemHealth::default(),
        }
    }

    fn daily_entry(age_days: i64) -> BackupEntry {
        BackupEntry {
            file: "tank_stage-daily-20240101.gz".to_string(),
            modified: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            age_days,
            size_bytes: 1024 * 1024,
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let snap = snapshot(
            vec![category(
                "daily",
                "Daily Backups",
                1,
                2,
                CategoryReport::Entries(vec![daily_entry(0)]),
            )],
            StorageReport::Mounts(BTreeMap::new()),
        );
        assert_eq!(render_page(&snap, 300), render_page(&snap, 300));
    }

    #[test]
    fn test_render_fresh_daily_backup_is_ok() {
        let snap = snapshot(
            vec![category(
                "daily",
                "Daily Backups",
                1,
                2,
                CategoryReport::Entries(vec![daily_entry(0)]),
            )],
            StorageReport::Mounts(BTreeMap::new()),
        );
        let html = render_page(&snap, 300);

        assert!(html.contains("<h2>Daily Backups</h2>"));
        assert!(html.contains("tank_stage-daily-20240101.gz"));
        assert!(html.contains("<td class=\"ok\">0</td>"));
        assert!(html.contains("<td class=\"ok\">OK</td>"));
    }

    #[test]
    fn test_render_stale_backup_is_alert() {
        let snap = snapshot(
            vec![category(
                "daily",
                "Daily Backups",
                1,
                2,
                CategoryReport::Entries(vec![daily_entry(5)]),
            )],
            StorageReport::Mounts(BTreeMap::new()),
        );
        let html = render_page(&snap, 300);
        assert!(html.contains("<td class=\"alert\">Alert</td>"));
    }

    #[test]
    fn test_render_failed_category_single_error_row() {
        let snap = snapshot(
            vec![
                category(
                    "daily",
                    "Daily Backups",
                    1,
                    2,
                    CategoryReport::failed("Backup directory not found: /mnt/orico1/zfs_backups"),
                ),
                category(
                    "weekly",
                    "Weekly Backups",
                    7,
                    14,
                    CategoryReport::Entries(vec![daily_entry(3)]),
                ),
            ],
            StorageReport::Mounts(BTreeMap::new()),
        );
        let html = render_page(&snap, 300);

        assert_eq!(html.matches("colspan=\"5\"").count(), 1);
        assert!(html.contains("Backup directory not found"));
        // The healthy category still renders normally
        assert!(html.contains("<td class=\"ok\">3</td>"));
    }

    #[test]
    fn test_render_storage_usage_classes() {
        let mut mounts = BTreeMap::new();
        for (mount, percent) in [("/mnt/a", 79u8), ("/mnt/b", 80), ("/mnt/c", 90)] {
            mounts.insert(
                mount.to_string(),
                StorageEntry {
                    total: "1.8T".to_string(),
                    used: "1T".to_string(),
                    available: "800G".to_string(),
                    usage_percent: percent,
                },
            );
        }
        let snap = snapshot(vec![], StorageReport::Mounts(mounts));
        let html = render_page(&snap, 300);

        assert!(html.contains("<td class=\"ok\">79%</td>"));
        assert!(html.contains("<td class=\"warning\">80%</td>"));
        assert!(html.contains("<td class=\"alert\">90%</td>"));
    }

    #[test]
    fn test_render_includes_refresh_directive_and_timestamp() {
        let snap = snapshot(vec![], StorageReport::failed("df exited with 1"));
        let html = render_page(&snap, 300);

        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"300\">"));
        assert!(html.contains("Last updated: 2024-01-01 12:00:00"));
        assert!(html.contains("df exited with 1"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">&</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }
}
