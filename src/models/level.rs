//! Threshold classification for rendered rows

use serde::{Deserialize, Serialize};

/// Three-tier status used for row color coding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Ok,
    Warning,
    Alert,
}

impl StatusLevel {
    /// CSS class carried by the rendered cell
    pub fn css_class(self) -> &'static str {
        match self {
            StatusLevel::Ok => "ok",
            StatusLevel::Warning => "warning",
            StatusLevel::Alert => "alert",
        }
    }

    /// Label shown in the status column
    pub fn label(self) -> &'static str {
        match self {
            StatusLevel::Ok => "OK",
            StatusLevel::Warning => "Warning",
            StatusLevel::Alert => "Alert",
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.css_class())
    }
}

/// Classify a backup age against its category thresholds
///
/// Comparisons are inclusive: an age exactly at a threshold still counts
/// as the better level.
pub fn classify_age(age_days: i64, ok_within_days: i64, warn_within_days: i64) -> StatusLevel {
    if age_days <= ok_within_days {
        StatusLevel::Ok
    } else if age_days <= warn_within_days {
        StatusLevel::Warning
    } else {
        StatusLevel::Alert
    }
}

/// Classify disk usage against percent thresholds
pub fn classify_usage(percent: u8, warn_at: u8, alert_at: u8) -> StatusLevel {
    if percent < warn_at {
        StatusLevel::Ok
    } else if percent < alert_at {
        StatusLevel::Warning
    } else {
        StatusLevel::Alert
    }
}
