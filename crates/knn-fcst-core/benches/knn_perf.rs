//! Performance benchmark for k-NN forecasting and grid-search selection
//!
//! Run with: cargo bench --bench knn_perf

use std::time::{Duration, Instant};

use knn_fcst_core::{SelectionConfig, Series};

fn generate_seasonal_series(n: usize, periods: &[usize]) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let trend = 100.0 + 0.01 * i as f64;
            let seasonal: f64 = periods
                .iter()
                .enumerate()
                .map(|(j, &p)| {
                    let amplitude = 10.0 / (j + 1) as f64;
                    amplitude * (2.0 * std::f64::consts::PI * i as f64 / p as f64).sin()
                })
                .sum();
            trend + seasonal + (i % 7) as f64 * 0.1 // small noise
        })
        .collect()
}

fn benchmark_fn<F, R>(name: &str, iterations: usize, mut f: F) -> Duration
where
    F: FnMut() -> R,
{
    // Warmup
    let _ = f();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = std::hint::black_box(f());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "{}: total={:?}, per_iter={:?}, iters={}",
        name, elapsed, per_iter, iterations
    );
    elapsed
}

fn main() {
    println!("=== k-NN Forecast Performance Benchmark ===\n");

    let series_lengths = [200, 500, 1000, 2000];
    let periods = vec![7, 30];
    let horizon = 5;

    println!("--- 1. Single Forecast Benchmarks ---\n");

    for &n in &series_lengths {
        let values = generate_seasonal_series(n + horizon, &periods);
        let series = Series::new(values).expect("benchmark series is finite");
        let (train, holdout) = series.split_holdout(horizon).expect("n > horizon");

        let iters = if n <= 1000 { 1000 } else { 100 };

        benchmark_fn(&format!("knn_forecast(n={}, k=5, l=7)", n), iters, || {
            knn_fcst_core::knn_forecast(train, 5, 7, holdout)
        });
    }

    println!("\n--- 2. Hyperparameter Selection Benchmarks ---\n");

    for &n in &series_lengths {
        let values = generate_seasonal_series(n, &periods);
        let iters = if n <= 500 { 10 } else { 1 };

        let sequential = SelectionConfig {
            parallel: false,
            ..SelectionConfig::default()
        };

        benchmark_fn(
            &format!("select_hyperparameters(n={}, sequential)", n),
            iters,
            || knn_fcst_core::select_hyperparameters_with(&values, horizon, &sequential),
        );

        benchmark_fn(
            &format!("select_hyperparameters(n={}, default)", n),
            iters,
            || knn_fcst_core::select_hyperparameters(&values, horizon),
        );
    }

    println!("\n--- 3. Scalability Test (many series) ---\n");

    let series_counts = [10, 100];
    let series_len = 200;

    for &n_series in &series_counts {
        let series_batch: Vec<Vec<f64>> = (0..n_series)
            .map(|seed| {
                (0..series_len)
                    .map(|i| {
                        50.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin()
                            + (seed % 100) as f64 * 0.01
                    })
                    .collect()
            })
            .collect();

        println!("Processing {} series (len={} each):", n_series, series_len);

        benchmark_fn(&format!("  forecast_holdout x{}", n_series), 1, || {
            series_batch
                .iter()
                .map(|s| knn_fcst_core::forecast_holdout(s, horizon))
                .filter(|r| r.is_ok())
                .count()
        });
    }

    println!("\n=== Benchmark Complete ===");
}
