//! Performance benchmarks for the Attendance Classification Engine.
//!
//! Covers a single classification on each major path and bulk
//! verification over batches of 100 and 1000 records.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::classification::{classify, verify_bulk_status};
use attendance_engine::config::ClassificationPolicy;
use attendance_engine::models::{
    AttendanceRecord, AttendanceStatus, PunchPair, ShiftSchedule, ShiftType,
};
use chrono::{NaiveDate, NaiveDateTime};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
}

/// Builds `count` records cycling through on-time, tardy, undertime and NCNS punches.
fn create_records(count: usize) -> Vec<AttendanceRecord> {
    let schedule = ShiftSchedule::parse(ShiftType::Morning, "09:00", "17:00", Some(15)).unwrap();
    let patterns: [(Option<&str>, Option<&str>); 4] = [
        (Some("2024-01-15T08:55"), Some("2024-01-15T17:05")),
        (Some("2024-01-15T09:10"), Some("2024-01-15T17:00")),
        (Some("2024-01-15T09:00"), Some("2024-01-15T15:30")),
        (None, None),
    ];

    patterns
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, (time_in, time_out))| {
            AttendanceRecord::new(
                format!("att_{:04}", i + 1),
                Some(schedule.clone()),
                PunchPair::parse("2024-01-15", *time_in, *time_out).unwrap(),
            )
        })
        .collect()
}

fn bench_single_classification(c: &mut Criterion) {
    let day = ShiftSchedule::parse(ShiftType::Morning, "09:00", "17:00", Some(15)).unwrap();
    let night = ShiftSchedule::parse(ShiftType::Night, "22:00", "06:00", Some(15)).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let tardy_in = at("2024-01-15T09:05");
    let early_out = at("2024-01-15T15:30");
    let late_night_in = at("2024-01-15T22:40");

    let mut group = c.benchmark_group("single_classification");

    group.bench_function("day_shift_tardy_undertime", |b| {
        b.iter(|| {
            classify(
                black_box(Some(&day)),
                black_box(date),
                black_box(Some(tardy_in)),
                black_box(Some(early_out)),
            )
        })
    });

    group.bench_function("night_shift_missing_out", |b| {
        b.iter(|| {
            classify(
                black_box(Some(&night)),
                black_box(date),
                black_box(Some(late_night_in)),
                black_box(None),
            )
        })
    });

    group.bench_function("unscheduled", |b| {
        b.iter(|| classify(black_box(None), black_box(date), black_box(None), black_box(None)))
    });

    group.finish();
}

fn bench_bulk_verification(c: &mut Criterion) {
    let policy = ClassificationPolicy::default();
    let mut group = c.benchmark_group("bulk_verification");

    for size in [100usize, 1000] {
        let records = create_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| verify_bulk_status(black_box(records), AttendanceStatus::OnTime, &policy))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_classification, bench_bulk_verification);
criterion_main!(benches);
