//! Criterion benchmarks for indicator hot paths.
//!
//! Benchmarks:
//! 1. Rolling mean over long series
//! 2. RSI / Shifts training series
//! 3. Latest-value evaluation on the trailing window
//! 4. Multi-instrument training panel

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeMap;

use indicatorlab_core::{from_names, Indicator, IndicatorEngine, TimeSeries};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_log_prices(n: usize) -> TimeSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    TimeSeries::from_pairs(
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
                (base_date + chrono::Duration::days(i as i64), close.ln())
            })
            .collect::<Vec<_>>(),
    )
    .unwrap()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_rolling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_mean");
    for &n in &[1_000usize, 10_000] {
        let series = make_log_prices(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &series, |b, s| {
            b.iter(|| black_box(s.rolling(14).mean()))
        });
    }
    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let series = make_log_prices(5_000);
    let mut group = c.benchmark_group("training");
    for indicator in from_names(["rsi", "shifts_5"]).unwrap() {
        group.bench_function(indicator.name().to_string(), |b| {
            b.iter(|| black_box(indicator.training(&series)))
        });
    }
    group.finish();
}

fn bench_last(c: &mut Criterion) {
    let series = make_log_prices(5_000);
    let indicators = from_names(["rsi"]).unwrap();
    let rsi = &indicators[0];
    c.bench_function("rsi_last", |b| b.iter(|| black_box(rsi.last(&series))));
}

fn bench_panel(c: &mut Criterion) {
    let panel: BTreeMap<String, TimeSeries> = (0..50)
        .map(|i| (format!("SYM{i:02}"), make_log_prices(2_500)))
        .collect();
    let engine = IndicatorEngine::new(from_names(["rsi", "shifts_1", "shifts_5"]).unwrap());
    c.bench_function("training_panel_50x2500", |b| {
        b.iter(|| black_box(engine.training_panel(&panel)))
    });
}

criterion_group!(benches, bench_rolling, bench_training, bench_last, bench_panel);
criterion_main!(benches);
