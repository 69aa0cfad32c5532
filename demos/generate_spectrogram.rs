//! Example: Generate a text spectrogram from a mono 16-bit WAV file
//!
//! Usage:
//!   cargo run --release --example generate_spectrogram -- \
//!       <windowSize> <windowType> <dftSize> <frameStep> <in.wav> <out.txt>
//!
//! `windowType` is `hamming` for a Hamming window; anything else disables
//! windowing. `dftSize` is accepted for compatibility and ignored: the
//! transform length is always the window size.

use spectrogram_dsp::{generate_spectrogram_file, Advisory, SpectrogramConfig, WindowKind};
use std::env;
use std::path::Path;
use std::process::ExitCode;

fn parse_size(value: &str, name: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|e| format!("{} must be a non-negative integer, got {:?}: {}", name, value, e))
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 7 {
        eprintln!(
            "Usage: {} <windowSize> <windowType> <dftSize> <frameStep> <in.wav> <out.txt>",
            args.first().map(String::as_str).unwrap_or("generate_spectrogram")
        );
        return ExitCode::from(1);
    }

    let parsed = parse_size(&args[1], "windowSize")
        .and_then(|w| parse_size(&args[4], "frameStep").map(|s| (w, s)));
    let (window_size, frame_step) = match parsed {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    if args[3].parse::<usize>().ok() != Some(window_size) {
        log::info!(
            "dftSize {:?} ignored, transform length is the window size ({})",
            args[3],
            window_size
        );
    }

    let config = SpectrogramConfig {
        window: WindowKind::from_name(&args[2]),
        ..SpectrogramConfig::new(window_size, frame_step)
    };

    match generate_spectrogram_file(Path::new(&args[5]), Path::new(&args[6]), &config) {
        Ok(report) => {
            for advisory in &report.advisories {
                match advisory {
                    Advisory::TooManyFrames { num_frames, .. } => {
                        eprintln!("Warning: too many frames ({}), this may take a while", num_frames)
                    }
                }
            }
            eprintln!(
                "Wrote {} frames x {} bins to {} in {:.2} ms",
                report.num_frames,
                report.num_bins,
                args[6],
                report.metadata.processing_time_ms
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
