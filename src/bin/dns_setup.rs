//! One-shot Cloudflare DNS registration for the backup monitor
//!
//! Looks up the configured zone, resolves the host's public IP, and
//! creates or updates the monitor's A record. Any failure exits nonzero.

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use backup_monitor::config::Settings;
use backup_monitor::dns::CloudflareClient;

#[derive(Debug, Parser)]
#[command(
    name = "backup-monitor-dns",
    about = "Register a DNS record for the backup monitor",
    version
)]
struct Args {
    /// Path to the configuration file, without extension
    #[arg(long, default_value = "config")]
    config: String,
    /// Zone name, overriding the configuration
    #[arg(long)]
    zone: Option<String>,
    /// Record name, overriding the configuration
    #[arg(long)]
    record: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,backup_monitor=info,backup_monitor_dns=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = Args::parse();
    let settings = Settings::load_from(&args.config).context("Failed to load configuration")?;
    let dns = settings.dns;

    let zone_name = args
        .zone
        .or(dns.zone_name)
        .context("No zone name configured (dns.zone_name or --zone)")?;
    let record_name = args
        .record
        .or(dns.record_name)
        .context("No record name configured (dns.record_name or --record)")?;
    let api_token = dns.api_token.context(
        "No API token configured (set dns.api_token or BACKUP_MONITOR__DNS__API_TOKEN)",
    )?;

    let client = CloudflareClient::new(api_token, dns.api_base);

    info!("Looking up zone {}", zone_name);
    let zone_id = match client.find_zone_id(&zone_name).await? {
        Some(id) => id,
        None => bail!("Could not find zone id for {}", zone_name),
    };

    let public_ip = client.lookup_public_ip(&dns.ip_service).await?;
    info!("Public IP: {}", public_ip);

    let action = client
        .upsert_a_record(&zone_id, &record_name, &public_ip, dns.proxied)
        .await?;
    info!("DNS record {}: {} -> {}", action, record_name, public_ip);

    println!("Monitor will be available at: https://{}", record_name);
    Ok(())
}
