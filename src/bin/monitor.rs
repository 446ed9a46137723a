use anyhow::{Context, Result};
use clap::Parser;
use epiwatch::utils::{init_from_config, StoreBackend};
use epiwatch::{
    Config, MemoryStore, OutbreakAlert, OutbreakDetector, ReportStore, RestStore, Severity,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Run the outbreak detection engine against the configured report store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config/production.toml")]
    config: String,

    /// Run a single detection pass, print alerts as JSON, and exit
    #[arg(long)]
    once: bool,

    /// Override the configured poll interval, in seconds
    #[arg(long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config = Config::from_file(&args.config)?;
    init_from_config(&config.logging);

    info!(
        "Starting {} monitor ({})",
        config.general.service_name, config.general.environment
    );

    let detection = config.detection.to_detection_config();
    let interval =
        Duration::from_secs(args.interval.unwrap_or(config.monitor.poll_interval_secs));

    match config.store.backend {
        StoreBackend::Memory => {
            warn!("Memory store backend starts empty; only useful for smoke runs");
            let store = Arc::new(MemoryStore::new());
            let detector = OutbreakDetector::with_config(store, detection);
            run(detector, args.once, interval).await
        }
        StoreBackend::Rest => {
            let api_key = std::env::var(&config.store.api_key_env).with_context(|| {
                format!("store api key env var {} not set", config.store.api_key_env)
            })?;
            let store = Arc::new(RestStore::new(
                &config.store.base_url,
                api_key,
                &config.store.table,
            )?);
            let detector = OutbreakDetector::with_config(store, detection);
            run(detector, args.once, interval).await
        }
    }
}

async fn run<S: ReportStore>(
    detector: OutbreakDetector<S>,
    once: bool,
    interval: Duration,
) -> Result<()> {
    if once {
        let alerts = detector.detect().await?;
        println!("{}", serde_json::to_string_pretty(&alerts)?);
        return Ok(());
    }

    info!("Polling for outbreaks every {}s", interval.as_secs());

    loop {
        match detector.detect().await {
            Ok(alerts) => {
                if alerts.is_empty() {
                    info!("No locations above threshold");
                }
                for alert in &alerts {
                    log_alert(alert);
                }
            }
            // Next poll retries from scratch; the engine itself never retries
            Err(e) => error!("Detection pass failed: {e}"),
        }

        tokio::time::sleep(interval).await;
    }
}

fn log_alert(alert: &OutbreakAlert) {
    match alert.severity {
        Severity::High => error!(
            location = %alert.location,
            risk = alert.risk_score,
            affected = alert.affected_subjects,
            symptoms = ?alert.top_symptoms,
            "HIGH severity outbreak alert"
        ),
        Severity::Medium => warn!(
            location = %alert.location,
            risk = alert.risk_score,
            affected = alert.affected_subjects,
            symptoms = ?alert.top_symptoms,
            "Medium severity outbreak alert"
        ),
        Severity::Low => info!(
            location = %alert.location,
            risk = alert.risk_score,
            affected = alert.affected_subjects,
            symptoms = ?alert.top_symptoms,
            "Low severity outbreak alert"
        ),
    }
}
