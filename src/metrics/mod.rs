//! Prometheus metrics for the backup monitor

mod prometheus;

pub use prometheus::*;
