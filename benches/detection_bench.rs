use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use epiwatch::detection::{score_location, DetectionConfig};
use epiwatch::{compute_alerts, Report};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SYMPTOMS: &[&str] = &["fever", "cough", "headache", "fatigue", "sore throat"];

/// Deterministic synthetic report sets: a week of baseline activity plus a
/// current window, spread over `locations` locations.
fn synthetic_windows(locations: usize, current_reports: usize) -> (Vec<Report>, Vec<Report>) {
    let mut rng = StdRng::seed_from_u64(42);
    let now = Utc.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap();

    let mut baseline = Vec::new();
    for loc in 0..locations {
        for days_ago in 8..=14 {
            for _ in 0..rng.gen_range(1..4) {
                baseline.push(report(
                    &format!("Ward {loc}"),
                    now - Duration::days(days_ago) + Duration::minutes(rng.gen_range(0..1440)),
                    &format!("subject-{}", rng.gen_range(0..500)),
                    &mut rng,
                ));
            }
        }
    }

    let mut current = Vec::new();
    for _ in 0..current_reports {
        current.push(report(
            &format!("Ward {}", rng.gen_range(0..locations)),
            now - Duration::minutes(rng.gen_range(1..1440)),
            &format!("subject-{}", rng.gen_range(0..500)),
            &mut rng,
        ));
    }

    (baseline, current)
}

fn report(location: &str, timestamp: chrono::DateTime<Utc>, subject: &str, rng: &mut StdRng) -> Report {
    let count = rng.gen_range(0..3);
    Report {
        location: location.to_string(),
        timestamp,
        symptoms: (0..count)
            .map(|_| SYMPTOMS[rng.gen_range(0..SYMPTOMS.len())].to_string())
            .collect(),
        subject_id: subject.to_string(),
        temperature: None,
    }
}

/// Benchmark the full windowing-to-alerts pipeline
/// Called once per detection pass; input size scales with report volume
fn bench_compute_alerts(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap();
    let config = DetectionConfig::default();

    let mut group = c.benchmark_group("compute_alerts");
    for current_reports in [100usize, 1000, 5000].iter() {
        let (baseline, current) = synthetic_windows(20, *current_reports);
        group.bench_with_input(
            BenchmarkId::from_parameter(current_reports),
            current_reports,
            |b, _| {
                b.iter(|| {
                    black_box(compute_alerts(
                        black_box(&baseline),
                        black_box(&current),
                        now,
                        &config,
                    ));
                });
            },
        );
    }
    group.finish();
}

/// Benchmark scoring a single location
fn bench_score_location(c: &mut Criterion) {
    let daily_counts = [2, 3, 1, 2, 3, 2, 1];

    c.bench_function("score_location", |b| {
        b.iter(|| {
            black_box(score_location(black_box(&daily_counts), black_box(10)));
        });
    });
}

criterion_group!(benches, bench_compute_alerts, bench_score_location);
criterion_main!(benches);
