use chrono::{Duration, Utc};
use clap::Parser;
use epiwatch::{MemoryStore, OutbreakDetector, Report, ReportStore};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

const LOCATIONS: &[&str] = &["Hostel A", "Hostel B", "Hostel C", "Day Scholar"];

/// Baseline weeks are mostly healthy - mild complaints only
const BASELINE_SYMPTOMS: &[&str] = &["fatigue", "headache"];

const OUTBREAK_SYMPTOMS: &[&str] = &["fever", "cough", "headache", "body ache", "fatigue"];

/// Seed a synthetic week of normal activity plus a last-24h spike, then run
/// one detection pass and print the resulting alerts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Minimum reports per baseline day (all locations combined)
    #[arg(long, default_value_t = 2)]
    baseline_min: u32,

    /// Maximum reports per baseline day (all locations combined)
    #[arg(long, default_value_t = 3)]
    baseline_max: u32,

    /// Reports injected at the outbreak location over the last 24 hours
    #[arg(long, default_value_t = 8)]
    outbreak_reports: u32,

    /// Where the outbreak happens
    #[arg(long, default_value = "Hostel A")]
    outbreak_location: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("╔════════════════════════════════════════════════╗");
    println!("║         OUTBREAK DETECTION SIMULATOR           ║");
    println!("╚════════════════════════════════════════════════╝");
    println!();
    println!("Baseline: {}-{} reports/day across {} locations", args.baseline_min, args.baseline_max, LOCATIONS.len());
    println!("Outbreak: {} reports at {} in the last 24h", args.outbreak_reports, args.outbreak_location);
    println!();

    let store = Arc::new(MemoryStore::new());
    let now = Utc::now();
    let mut rng = rand::thread_rng();

    // Quiet baseline week: days 14 through 8 before now
    for days_ago in 8..=14 {
        let day = now - Duration::days(days_ago);
        let count = rng.gen_range(args.baseline_min..=args.baseline_max.max(args.baseline_min));

        for _ in 0..count {
            let location = LOCATIONS.choose(&mut rng).unwrap();
            let symptom_count = rng.gen_range(0..=1);
            let symptoms: Vec<String> = BASELINE_SYMPTOMS
                .choose_multiple(&mut rng, symptom_count)
                .map(|s| s.to_string())
                .collect();

            let report = Report {
                location: location.to_string(),
                timestamp: day + Duration::minutes(rng.gen_range(0..24 * 60)),
                symptoms,
                subject_id: format!("student-{:03}", rng.gen_range(0..40)),
                temperature: Some(round_tenth(rng.gen_range(36.5..37.2))),
            };
            report.validate()?;
            store.append(report).await?;
        }
    }

    // Anomalous spike spread over the last 24 hours
    for i in 0..args.outbreak_reports {
        let symptom_count = rng.gen_range(2..=4);
        let symptoms: Vec<String> = OUTBREAK_SYMPTOMS
            .choose_multiple(&mut rng, symptom_count)
            .map(|s| s.to_string())
            .collect();

        let report = Report {
            location: args.outbreak_location.clone(),
            timestamp: now - Duration::minutes(rng.gen_range(1..23 * 60)),
            symptoms,
            subject_id: format!("student-{:03}", i),
            temperature: Some(round_tenth(rng.gen_range(37.8..39.5))),
        };
        report.validate()?;
        store.append(report).await?;
    }

    println!("Seeded {} reports", store.len().await);
    println!();
    println!("Running detection...");
    println!();

    let detector = OutbreakDetector::new(Arc::clone(&store));
    let alerts = detector.detect_at(now).await?;

    if alerts.is_empty() {
        println!("No alerts - try a larger --outbreak-reports value");
        return Ok(());
    }

    for alert in &alerts {
        println!(
            "🚨 {} | severity {:?} | risk {:.1}% | {} affected | top symptoms: {}",
            alert.location,
            alert.severity,
            alert.risk_score,
            alert.affected_subjects,
            if alert.top_symptoms.is_empty() {
                "(none reported)".to_string()
            } else {
                alert.top_symptoms.join(", ")
            },
        );
        if let Some(debug) = &alert.debug {
            println!(
                "   baseline mean {:.2}, std dev {:.2}, current {} reports, z = {:.2}",
                debug.baseline_mean, debug.baseline_std_dev, debug.current_count, debug.z_score
            );
        }
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&alerts)?);

    Ok(())
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
