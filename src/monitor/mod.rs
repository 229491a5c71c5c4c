//! Background status refresh
//!
//! Owns the collect-render-publish cycle and a cache of the latest
//! snapshot for the JSON API.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error};

use crate::collector::collect_snapshot;
use crate::config::Settings;
use crate::metrics;
use crate::models::StatusSnapshot;
use crate::render::{publish_page, render_page};

/// Periodically collects status and publishes the rendered page
pub struct StatusMonitor {
    settings: Settings,
    latest: Arc<RwLock<Option<StatusSnapshot>>>,
}

impl StatusMonitor {
    /// Create a new monitor with the given settings
    pub fn new(settings: Settings) -> Self {
        StatusMonitor {
            settings,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// Latest collected snapshot, if a cycle has completed
    pub fn latest(&self) -> Option<StatusSnapshot> {
        self.latest.read().clone()
    }

    /// Run one collect-render-publish cycle
    ///
    /// Collection failures are already captured inside the snapshot as
    /// error markers; only a publish failure is handled here. Neither
    /// stops the refresh loop.
    pub async fn refresh(&self) {
        let started = std::time::Instant::now();

        let snapshot = collect_snapshot(&self.settings).await;
        metrics::record_collection_cycle(&snapshot);

        let html = render_page(&snapshot, self.settings.monitor.refresh_interval_sec);
        match publish_page(&html, &self.settings.monitor.output_dir) {
            Ok(path) => debug!("Published status page to {}", path.display()),
            Err(e) => {
                metrics::record_publish_failure();
                error!("Failed to publish status page: {}", e);
            }
        }

        *self.latest.write() = Some(snapshot);
        metrics::record_collection_duration(started.elapsed().as_secs_f64());
    }

    /// Start the background refresh task
    pub fn start_refreshing(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let interval_secs = self.settings.monitor.refresh_interval_sec;

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(interval_secs));

            loop {
                interval.tick().await;
                self.refresh().await;
            }
        })
    }
}
