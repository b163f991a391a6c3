//! Lightweight parse benchmark harness for local baselines.
//!
//! Run from repository root:
//! `cargo run -p gs1_toolchain_core --example parse_benchmark --release`

use std::fs;
use std::time::Instant;

use gs1_toolchain_core::{GS, ParseOptions, parse_with_options};

fn run_benchmark(label: &str, inputs: &[&str], options: &ParseOptions, iterations: usize) {
    let start = Instant::now();
    let mut segments = 0usize;
    let mut errors = 0usize;
    for _ in 0..iterations {
        for input in inputs {
            let result = parse_with_options(input, options);
            segments += result.segments.len();
            errors += result.errors.len();
        }
    }
    let elapsed = start.elapsed();
    let parses = iterations * inputs.len();

    println!("Benchmark: {label}");
    println!("  barcodes: {}, iterations: {iterations}", inputs.len());
    println!("  segments: {segments}, errors: {errors}");
    println!(
        "  parse: total={:?}, per_barcode={:.3} us",
        elapsed,
        elapsed.as_secs_f64() * 1_000_000.0 / parses as f64
    );
}

fn main() -> Result<(), String> {
    let iterations = std::env::var("GS1_BENCH_ITERS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(10_000);

    let path = "samples/barcodes.txt";
    let text =
        fs::read_to_string(path).map_err(|e| format!("failed to read sample '{path}': {e}"))?;
    let inputs: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    run_benchmark("lenient", &inputs, &ParseOptions::lenient(), iterations);
    run_benchmark("strict", &inputs, &ParseOptions::strict(), iterations);
    run_benchmark(
        "lenient+fnc1",
        &inputs,
        &ParseOptions::lenient().with_fnc1(GS),
        iterations,
    );
    Ok(())
}
