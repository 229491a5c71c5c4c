//! Monitor configuration settings

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main monitor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub monitor: MonitorSettings,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategorySettings>,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub dns: DnsSettings,
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,
    /// HTTP server port; when absent a fixed range is probed for the first
    /// bindable port
    #[serde(default)]
    pub port: Option<u16>,
    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_workers() -> usize {
    num_cpus::get()
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: None,
            workers: default_workers(),
        }
    }
}

/// Collection and publication settings
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSettings {
    /// Seconds between collection cycles; also the page auto-refresh period
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_sec: u64,
    /// Directory the rendered page is published to and served from
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Maximum entries listed per backup category
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_refresh_interval() -> u64 {
    300 // 5 minutes
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./web")
}

fn default_max_entries() -> usize {
    5
}

impl Default for MonitorSettings {
    fn default() -> Self {
        MonitorSettings {
            refresh_interval_sec: default_refresh_interval(),
            output_dir: default_output_dir(),
            max_entries: default_max_entries(),
        }
    }
}

/// One backup category: a directory, a glob, and its age thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySettings {
    /// Category slug (e.g. "daily")
    pub name: String,
    /// Heading shown on the page
    pub label: String,
    /// Directory scanned for archives
    pub directory: PathBuf,
    /// Glob pattern matched against file names in the directory
    pub pattern: String,
    /// Ages up to this many days are OK
    pub ok_within_days: i64,
    /// Ages up to this many days are a warning; older is an alert
    pub warn_within_days: i64,
}

fn default_categories() -> Vec<CategorySettings> {
    vec![
        CategorySettings {
            name: "daily".to_string(),
            label: "Daily Backups".to_string(),
            directory: PathBuf::from("/mnt/orico1/zfs_backups"),
            pattern: "tank_stage-daily-*.gz".to_string(),
            ok_within_days: 1,
            warn_within_days: 2,
        },
        CategorySettings {
            name: "weekly".to_string(),
            label: "Weekly Backups".to_string(),
            directory: PathBuf::from("/mnt/orico1/zfs_backups"),
            pattern: "tank_stage-weekly-*.gz".to_string(),
            ok_within_days: 7,
            warn_within_days: 14,
        },
        CategorySettings {
            name: "monthly".to_string(),
            label: "Monthly Backups".to_string(),
            directory: PathBuf::from("/mnt/orico2/zfs_backups"),
            pattern: "tank_stage-monthly-*.gz".to_string(),
            ok_within_days: 31,
            warn_within_days: 45,
        },
    ]
}

/// Disk usage settings
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Mount points passed to the disk usage utility in one invocation
    #[serde(default = "default_mount_points")]
    pub mount_points: Vec<String>,
    /// Usage at or above this percentage is a warning (default: 80)
    #[serde(default = "default_warn_at")]
    pub warn_at_percent: u8,
    /// Usage at or above this percentage is an alert (default: 90)
    #[serde(default = "default_alert_at")]
    pub alert_at_percent: u8,
}

fn default_mount_points() -> Vec<String> {
    vec!["/mnt/orico1".to_string(), "/mnt/orico2".to_string()]
}

fn default_warn_at() -> u8 {
    80
}

fn default_alert_at() -> u8 {
    90
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            mount_points: default_mount_points(),
            warn_at_percent: default_warn_at(),
            alert_at_percent: default_alert_at(),
        }
    }
}

/// DNS registration settings for the setup binary
///
/// The API token has no default and is never compiled in; supply it via the
/// config file or the BACKUP_MONITOR__DNS__API_TOKEN environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsSettings {
    /// Cloudflare zone name (e.g. "example.com")
    pub zone_name: Option<String>,
    /// Full record name to register (e.g. "backup-monitor.example.com")
    pub record_name: Option<String>,
    /// Cloudflare API token
    pub api_token: Option<String>,
    /// Cloudflare API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Public IP lookup service
    #[serde(default = "default_ip_service")]
    pub ip_service: String,
    /// Whether the record is proxied through Cloudflare
    #[serde(default = "default_true")]
    pub proxied: bool,
}

fn default_api_base() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

fn default_ip_service() -> String {
    "https://api.ipify.org".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DnsSettings {
    fn default() -> Self {
        DnsSettings {
            zone_name: None,
            record_name: None,
            api_token: None,
            api_base: default_api_base(),
            ip_service: default_ip_service(),
            proxied: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load settings from a specific config file path (without extension)
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_path = path.as_ref();

        let builder = Config::builder()
            // Add config file if it exists
            .add_source(File::with_name(config_path.to_str().unwrap_or("config")).required(false))
            // Add environment variables with prefix BACKUP_MONITOR_
            .add_source(Environment::with_prefix("BACKUP_MONITOR").separator("__"));

        builder.build()?.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings::default(),
            monitor: MonitorSettings::default(),
            categories: default_categories(),
            storage: StorageSettings::default(),
            dns: DnsSettings::default(),
        }
    }
}
