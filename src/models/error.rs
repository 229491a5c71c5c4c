//! Error types for the backup monitor

use std::path::PathBuf;
use thiserror::Error;

/// Monitor errors
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Backup directory not found: {}", .path.display())]
    MissingDirectory { path: PathBuf },

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Filesystem scan failed: {0}")]
    Scan(String),

    #[error("Disk usage command failed: {0}")]
    DiskUsage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("DNS setup error: {0}")]
    DnsSetup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convert from library errors
impl From<config::ConfigError> for MonitorError {
    fn from(err: config::ConfigError) -> Self {
        MonitorError::Config(err.to_string())
    }
}

impl From<glob::PatternError> for MonitorError {
    fn from(err: glob::PatternError) -> Self {
        MonitorError::InvalidPattern(err.to_string())
    }
}

impl From<glob::GlobError> for MonitorError {
    fn from(err: glob::GlobError) -> Self {
        MonitorError::Scan(err.to_string())
    }
}

impl From<reqwest::Error> for MonitorError {
    fn from(err: reqwest::Error) -> Self {
        MonitorError::Network(err.to_string())
    }
}

/// Result type for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
