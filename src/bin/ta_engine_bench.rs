//! Benchmark binary for the rust-ta call engine.
//!
//! Usage:
//!     ta_engine_bench <data_file> <iterations> [config_file]
//!
//! Runs every registered function with its default parameters over the
//! `{"ohlcv": {...}}` columns of `data_file` and prints a JSON array of
//! timings to stdout. Progress goes to stderr through `tracing`; set
//! `RUST_LOG=debug` to see each dispatched call.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ta_engine::prelude::*;

#[derive(Debug, Deserialize)]
struct OhlcvData {
    ohlcv: OhlcvRaw,
}

#[derive(Debug, Deserialize)]
struct OhlcvRaw {
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
    #[serde(default)]
    open_interest: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
struct BenchmarkResult {
    name: String,
    group: Group,
    candles: usize,
    iterations: usize,
    lookback: usize,
    out_nb_element: usize,
    total_time_ms: f64,
    avg_time_ms: f64,
    min_time_ms: f64,
    max_time_ms: f64,
    throughput_candles_per_sec: f64,
}

fn load_ohlcv(path: &str) -> Result<OhlcvSeries<f64>> {
    let file = File::open(path).with_context(|| format!("failed to open data file {path}"))?;
    let data: OhlcvData = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse data file {path}"))?;
    let raw = data.ohlcv;
    let mut series = OhlcvSeries::from_series(
        raw.open.into(),
        raw.high.into(),
        raw.low.into(),
        raw.close.into(),
        raw.volume.into(),
    )?;
    if let Some(open_interest) = raw.open_interest {
        series = series.with_open_interest(open_interest.into())?;
    }

    let invalid = series.iter().filter(|bar| !bar.is_valid()).count();
    if invalid > 0 {
        warn!(path, invalid, "data file holds inconsistent bars");
    }
    Ok(series)
}

fn benchmark(def: &FunctionDef, request: &CallRequest, iterations: usize) -> Result<BenchmarkResult> {
    let candles = request.inputs.values().map(InputSeries::len).max().unwrap_or(0);
    let mut times = Vec::with_capacity(iterations);
    let mut last = None;

    for _ in 0..iterations {
        let start = Instant::now();
        let result = invoke(request).with_context(|| format!("{} failed", def.name))?;
        times.push(start.elapsed().as_secs_f64() * 1000.0);
        last = Some(result);
    }

    let out_nb_element = last.as_ref().map_or(0, |result| result.out_nb_element);
    let total_time: f64 = times.iter().sum();
    let avg_time = total_time / iterations as f64;
    let min_time = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max_time = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let throughput = if avg_time > 0.0 {
        (candles as f64 / avg_time) * 1000.0
    } else {
        0.0
    };

    Ok(BenchmarkResult {
        name: def.name.to_string(),
        group: def.group,
        candles,
        iterations,
        lookback: default_lookback(def.name)?,
        out_nb_element,
        total_time_ms: total_time,
        avg_time_ms: avg_time,
        min_time_ms: min_time,
        max_time_ms: max_time,
        throughput_candles_per_sec: throughput,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        bail!("usage: {} <data_file> <iterations> [config_file]", args[0]);
    }

    let data_file = &args[1];
    let iterations: usize = args[2]
        .parse()
        .with_context(|| format!("invalid iteration count {:?}", args[2]))?;
    if iterations == 0 {
        bail!("iteration count must be positive");
    }
    if let Some(config_file) = args.get(3) {
        EngineConfig::from_file(config_file)?.apply()?;
    }

    let series = load_ohlcv(data_file)?;
    info!(candles = series.len(), path = %data_file, "data loaded");

    let mut results = Vec::with_capacity(functions().len());
    for def in functions() {
        let mut request = CallRequest::new(def.name).prices(&series);
        for key in ["inReal", "inReal0"] {
            request = request.input(key, series.close().as_slice());
        }
        request = request.input("inReal1", series.open().as_slice());

        let result = benchmark(def, &request, iterations)?;
        info!(
            function = def.name,
            avg_ms = result.avg_time_ms,
            "benchmark finished"
        );
        results.push(result);
    }

    println!("{}", serde_json::to_string(&results)?);
    Ok(())
}
