//! Backup Monitor - Main Entry Point
//!
//! Collects backup status once, starts the refresh loop, and serves the
//! published page over HTTP.

use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backup_monitor::api::{configure_routes, select_port, ApiState, AppState};
use backup_monitor::config::Settings;
use backup_monitor::metrics::{init_metrics, metrics_endpoint};
use backup_monitor::monitor::StatusMonitor;

#[derive(Debug, Parser)]
#[command(
    name = "backup-monitor",
    about = "Web status dashboard for ZFS backup archives",
    version
)]
struct Args {
    /// Path to the configuration file, without extension
    #[arg(long, default_value = "config")]
    config: String,
    /// Listen address, overriding the configuration
    #[arg(long)]
    host: Option<String>,
    /// Listen port, overriding the configuration and port probing
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging with RUST_LOG environment variable support
    // Default: info level for backup_monitor, warn for everything else
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,backup_monitor=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let args = Args::parse();

    // Load configuration
    let mut settings = Settings::load_from(&args.config).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}, using defaults", e);
        Settings::default()
    });
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = Some(port);
    }

    info!("Starting Backup Monitor v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Monitoring {} categories, refresh every {}s",
        settings.categories.len(),
        settings.monitor.refresh_interval_sec
    );

    // Initialize metrics
    init_metrics();

    // Initialize the status monitor; the first collection completes before
    // the listener starts, so the first HTTP response is never empty.
    let monitor = Arc::new(StatusMonitor::new(settings.clone()));
    monitor.refresh().await;
    let refresh_handle = Arc::clone(&monitor).start_refreshing();
    info!(
        "Status page published to {}",
        settings.monitor.output_dir.display()
    );

    // Create application state for the HTTP server
    let app_state = AppState::new();
    let api_state = ApiState::new(Arc::clone(&monitor));
    let output_dir = settings.monitor.output_dir.clone();

    // Start HTTP server
    let port = select_port(&settings.server.host, settings.server.port)?;
    let http_addr = format!("{}:{}", settings.server.host, port);
    info!("Starting HTTP server on http://{}", http_addr);

    let server = HttpServer::new(move || {
        App::new()
            // Add shared state
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(api_state.clone()))
            // Add middleware
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            // Add routes
            .configure(configure_routes)
            // Add metrics endpoint
            .service(metrics_endpoint)
            // Serve the published page directory as static content
            .service(Files::new("/", output_dir.clone()).index_file("index.html"))
    })
    .workers(settings.server.workers)
    .bind(&http_addr)?
    .run();

    // Keep the refresh handle alive for the lifetime of the server
    let _refresh_handle = refresh_handle;

    server.await
}
