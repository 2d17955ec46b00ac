use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use trainload::dashboard::{DashboardEngine, DashboardInputs};
use trainload::load::LoadCalculator;
use trainload::models::{
    Activity, ActivityCategory, ActivityStatus, ChronicMethod, DailyLoad, ReadinessSample,
};

/// Performance benchmarks for the workload metrics
///
/// Input sizes range from a single week to several seasons of history.

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn create_history(days: u64) -> Vec<DailyLoad> {
    (0..days)
        .map(|offset| {
            let load = Decimal::from(200 + (offset * 37) % 600);
            DailyLoad::new(start_date() + Days::new(offset), load)
        })
        .collect()
}

fn create_activities(days: u64) -> Vec<Activity> {
    (0..days)
        .map(|offset| {
            let category = ActivityCategory::ALL[(offset % 13) as usize];
            let status = if offset % 5 == 4 {
                ActivityStatus::Planned
            } else {
                ActivityStatus::Done
            };
            Activity::new(
                offset.to_string(),
                start_date() + Days::new(offset),
                category,
                60 + (offset % 4) as u32 * 15,
                status,
            )
            .with_rating(dec!(6.5))
        })
        .collect()
}

fn bench_chronic_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("Chronic Baseline");
    let calculator = LoadCalculator::new();

    for &days in &[7u64, 28, 365, 1095] {
        let history = create_history(days);
        let today = start_date() + Days::new(days - 1);

        group.throughput(Throughput::Elements(days));
        for method in [ChronicMethod::TrailingAvg, ChronicMethod::Ewma] {
            group.bench_with_input(
                BenchmarkId::new(method.to_string(), days),
                &history,
                |b, history| {
                    b.iter(|| calculator.chronic_baseline(black_box(history), today, method));
                },
            );
        }
    }

    group.finish();
}

fn bench_daily_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("Daily Load Merge");
    let calculator = LoadCalculator::new();

    for &days in &[7u64, 90, 365] {
        let history = create_history(days);
        let activities = create_activities(days);

        group.throughput(Throughput::Elements(days));
        group.bench_with_input(
            BenchmarkId::new("daily_load", days),
            &(activities, history),
            |b, (activities, history)| {
                b.iter(|| calculator.daily_load(black_box(activities), black_box(history)));
            },
        );
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dashboard");
    let engine = DashboardEngine::new();

    for &days in &[28u64, 365] {
        let today = start_date() + Days::new(days - 1);
        let inputs = DashboardInputs {
            week_start: today - Days::new(3),
            week_end: today + Days::new(3),
            today,
            activities: create_activities(days),
            readiness: vec![ReadinessSample {
                date: today,
                value: dec!(7),
            }],
            history: create_history(days),
            method: None,
        };

        group.bench_with_input(BenchmarkId::new("compute", days), &inputs, |b, inputs| {
            b.iter(|| engine.compute(black_box(inputs)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_chronic_methods,
    bench_daily_merge,
    bench_dashboard
);
criterion_main!(benches);
