//! Example: Generate spectrograms for many files in parallel
//!
//! Usage:
//!   cargo run --release --example batch_spectrogram -- \
//!       [--jobs N] [--json] [--window N] [--step N] <file1.wav> <file2.wav> ...
//!
//! Each `<file>.wav` produces `<file>.txt` next to it. Parallelism is
//! across files; each file is processed sequentially.

use rayon::prelude::*;
use serde::Serialize;
use spectrogram_dsp::{generate_spectrogram_file, SpectrogramConfig, SpectrogramReport};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Serialize)]
struct ItemOut {
    file: String,
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<SpectrogramReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn take_value(args: &mut Vec<String>, flag: &str) -> Result<usize, Box<dyn std::error::Error>> {
    if args.is_empty() {
        return Err(format!("{} requires a value", flag).into());
    }
    Ok(args.remove(0).parse::<usize>()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut config = SpectrogramConfig::default();
    let mut paths: Vec<String> = Vec::new();

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => jobs = Some(std::cmp::max(1, take_value(&mut args, "--jobs")?)),
            "--window" => config.window_size = take_value(&mut args, "--window")?,
            "--step" => config.frame_step = take_value(&mut args, "--step")?,
            "--help" | "-h" => {
                eprintln!(
                    "Usage: batch_spectrogram [--jobs N] [--json] [--window N] [--step N] <file1> <file2> ...\n\
                     \n\
                     --jobs N     Parallel workers (default: CPU-1)\n\
                     --json       Emit one JSON object per line (JSONL)\n\
                     --window N   Window size (default: 256)\n\
                     --step N     Frame step (default: 128)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let output = PathBuf::from(path).with_extension("txt");
                let result = generate_spectrogram_file(Path::new(path), &output, &config);
                let output = output.display().to_string();
                match result {
                    Ok(report) => ItemOut {
                        file: path.clone(),
                        output,
                        report: Some(report),
                        error: None,
                    },
                    Err(e) => ItemOut {
                        file: path.clone(),
                        output,
                        report: None,
                        error: Some(e.to_string()),
                    },
                }
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
            continue;
        }
        match (&o.report, &o.error) {
            (Some(report), _) => println!(
                "[{}/{}] {}: {} frames x {} bins -> {} ({:.2}ms)",
                idx + 1,
                outs.len(),
                o.file,
                report.num_frames,
                report.num_bins,
                o.output,
                report.metadata.processing_time_ms
            ),
            (None, error) => println!(
                "[{}/{}] {}: ERROR: {}",
                idx + 1,
                outs.len(),
                o.file,
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let ok = outs.iter().filter(|o| o.report.is_some()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
