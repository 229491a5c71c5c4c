//! Prometheus metrics integration

use actix_web::{get, HttpResponse};
use once_cell::sync::Lazy;
use prometheus::{
    opts, register_histogram, register_int_counter, register_int_gauge, Encoder, Histogram,
    HistogramOpts, IntCounter, IntGauge, TextEncoder,
};

use crate::models::{CategoryReport, StatusSnapshot, StorageReport};

// Define metrics
static COLLECTION_CYCLES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "collection_cycles_total",
        "Total number of status collection cycles"
    ))
    .expect("Failed to create collection cycles counter")
});

static COLLECTION_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "collection_errors_total",
        "Total number of failed sections across collection cycles"
    ))
    .expect("Failed to create collection errors counter")
});

static PUBLISH_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(opts!(
        "publish_failures_total",
        "Total number of failed page publications"
    ))
    .expect("Failed to create publish failures counter")
});

static LAST_COLLECTION_TIMESTAMP: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(opts!(
        "last_collection_unix_seconds",
        "Unix timestamp of the last completed collection cycle"
    ))
    .expect("Failed to create last collection gauge")
});

static COLLECTION_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(HistogramOpts::new(
        "collection_duration_seconds",
        "Duration of one collect-render-publish cycle in seconds"
    ))
    .expect("Failed to create collection duration histogram")
});

/// Initialize all metrics
pub fn init_metrics() {
    // Force lazy initialization
    Lazy::force(&COLLECTION_CYCLES_TOTAL);
    Lazy::force(&COLLECTION_ERRORS_TOTAL);
    Lazy::force(&PUBLISH_FAILURES_TOTAL);
    Lazy::force(&LAST_COLLECTION_TIMESTAMP);
    Lazy::force(&COLLECTION_DURATION);
}

/// Record one completed collection cycle and its failed sections
pub fn record_collection_cycle(snapshot: &StatusSnapshot) {
    COLLECTION_CYCLES_TOTAL.inc();
    LAST_COLLECTION_TIMESTAMP.set(snapshot.timestamp.timestamp());

    let mut failed_sections = snapshot
        .categories
        .iter()
        .filter(|c| matches!(c.report, CategoryReport::Failed { .. }))
        .count() as u64;
    if matches!(snapshot.storage.report, StorageReport::Failed { .. }) {
        failed_sections += 1;
    }
    COLLECTION_ERRORS_TOTAL.inc_by(failed_sections);
}

/// Record a failed page publication
pub fn record_publish_failure() {
    PUBLISH_FAILURES_TOTAL.inc();
}

/// Record the duration of one cycle
pub fn record_collection_duration(duration_secs: f64) {
    COLLECTION_DURATION.observe(duration_secs);
}

/// Prometheus metrics endpoint
#[get("/metrics")]
pub async fn metrics_endpoint() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(format!("Failed to encode metrics: {}", e));
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(buffer)
}
