//! # Spectrogram DSP
//!
//! Turns a mono sequence of audio samples into a time-frequency magnitude
//! representation: the signal is cut into fixed-length frames, each frame
//! is windowed and transformed with a discrete Fourier transform, and the
//! positive-frequency half of every spectrum is encoded in decibels.
//!
//! ## Quick Start
//!
//! ```no_run
//! use spectrogram_dsp::{generate_spectrogram_file, SpectrogramConfig};
//! use std::path::Path;
//!
//! let config = SpectrogramConfig::new(512, 256);
//! let report = generate_spectrogram_file(Path::new("tone.wav"), Path::new("tone.txt"), &config)?;
//! println!("{} frames x {} bins", report.num_frames, report.num_bins);
//! # Ok::<(), spectrogram_dsp::SpectrogramError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! AudioSource → validate → Framer { Window → DFT → dB encoder } → RowSink
//! ```
//!
//! Every emitted row has exactly `window_size / 2` values and the number of
//! rows is always `(num_samples - window_size) / frame_step + 1`. A run
//! either writes every row or fails before writing any.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod synthesis;

use std::path::Path;
use std::time::Instant;

// Re-export main types
pub use analysis::metadata::SpectrogramMetadata;
pub use analysis::result::{Advisory, Spectrogram, SpectrogramReport};
pub use config::{SpectrogramConfig, TransformKind, WindowKind, WindowingScope};
pub use error::SpectrogramError;
pub use io::sink::{RowSink, TextRowWriter};
pub use io::AudioSource;

use error::try_reserve;
use features::framer::{compute_rows_parallel, Framer};

/// Check the source and parameters, returning the frame count. Nothing is
/// written.
fn prepare(source: &AudioSource, config: &SpectrogramConfig) -> Result<usize, SpectrogramError> {
    if source.sample_rate == 0 {
        return Err(SpectrogramError::InvalidParameters(
            "Invalid sample rate".to_string(),
        ));
    }
    config.validate(source.num_samples())
}

fn advisories_for(num_frames: usize, config: &SpectrogramConfig) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    if num_frames > config.frame_warning_threshold {
        log::warn!(
            "Too many frames ({}), processing may take a long time",
            num_frames
        );
        advisories.push(Advisory::TooManyFrames {
            num_frames,
            threshold: config.frame_warning_threshold,
        });
    }
    advisories
}

/// Drive the framer over the whole signal, handing each row to `emit`
fn for_each_row<F>(
    source: &AudioSource,
    config: &SpectrogramConfig,
    mut emit: F,
) -> Result<(), SpectrogramError>
where
    F: FnMut(&[f64]) -> Result<(), SpectrogramError>,
{
    if config.parallel {
        for row in compute_rows_parallel(&source.samples, config)? {
            emit(&row)?;
        }
        return Ok(());
    }

    let mut row = Vec::with_capacity(config.num_bins());
    match config.windowing_scope {
        WindowingScope::PerFrameCopy => {
            let mut framer = Framer::per_frame_copy(&source.samples, config)?;
            while framer.next_into(&mut row) {
                emit(&row)?;
            }
        }
        WindowingScope::Shared => {
            // private working buffer; windowing mutates it across frames
            let mut working = Vec::new();
            try_reserve(&mut working, source.num_samples(), "samples")?;
            working.extend_from_slice(&source.samples);

            let mut framer = Framer::shared(&mut working, config)?;
            while framer.next_into(&mut row) {
                emit(&row)?;
            }
        }
    }
    Ok(())
}

fn metadata_for(
    source: &AudioSource,
    config: &SpectrogramConfig,
    start_time: Instant,
) -> SpectrogramMetadata {
    SpectrogramMetadata {
        sample_rate: source.sample_rate,
        num_samples: source.num_samples(),
        duration_seconds: source.duration_seconds(),
        processing_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
        window: config.window,
        windowing_scope: config.windowing_scope,
        transform: config.transform,
        ..SpectrogramMetadata::default()
    }
}

/// Compute the full spectrogram of `source` in memory
///
/// # Errors
///
/// Returns `SpectrogramError` if the parameters do not fit the signal or
/// working buffers cannot be allocated.
///
/// A frame count above `config.frame_warning_threshold` is logged and
/// recorded in [`Spectrogram::advisories`].
///
/// # Example
///
/// ```
/// use spectrogram_dsp::{compute_spectrogram, AudioSource, SpectrogramConfig};
///
/// let source = AudioSource::from_pcm16(&[0; 1000], 8000);
/// let spectrogram = compute_spectrogram(&source, &SpectrogramConfig::new(256, 128))?;
/// assert_eq!(spectrogram.num_frames(), 6);
/// assert_eq!(spectrogram.rows[0].len(), 128);
/// # Ok::<(), spectrogram_dsp::SpectrogramError>(())
/// ```
pub fn compute_spectrogram(
    source: &AudioSource,
    config: &SpectrogramConfig,
) -> Result<Spectrogram, SpectrogramError> {
    let num_frames = prepare(source, config)?;
    let advisories = advisories_for(num_frames, config);

    let rows = if config.parallel {
        // already owned and in frame order
        compute_rows_parallel(&source.samples, config)?
    } else {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        try_reserve(&mut rows, num_frames, "rows")?;
        for_each_row(source, config, |row| rows.write_row(row))?;
        rows
    };

    Ok(Spectrogram {
        rows,
        advisories,
        window_size: config.window_size,
        frame_step: config.frame_step,
        sample_rate: source.sample_rate,
    })
}

/// Generate the spectrogram of `source` and write every row to `sink`
///
/// Parameters are validated before the first row is written, so an
/// invalid configuration leaves the sink untouched. A frame count above
/// `config.frame_warning_threshold` is logged and reported as an
/// [`Advisory`], not an error.
///
/// # Errors
///
/// * [`SpectrogramError::InvalidParameters`] for a zero window size or
///   frame step, a window larger than the signal, or parallel execution
///   with shared windowing
/// * [`SpectrogramError::AllocationFailure`] if working buffers cannot be
///   obtained
/// * Any error raised by the sink
pub fn generate_spectrogram(
    source: &AudioSource,
    sink: &mut dyn RowSink,
    config: &SpectrogramConfig,
) -> Result<SpectrogramReport, SpectrogramError> {
    let start_time = Instant::now();

    log::debug!(
        "Starting spectrogram: {} samples at {} Hz, window={} ({}), step={}, scope={:?}, transform={:?}",
        source.num_samples(),
        source.sample_rate,
        config.window_size,
        config.window.name(),
        config.frame_step,
        config.windowing_scope,
        config.transform
    );

    let num_frames = prepare(source, config)?;
    let advisories = advisories_for(num_frames, config);

    for_each_row(source, config, |row| sink.write_row(row))?;
    sink.finish()?;

    let metadata = metadata_for(source, config, start_time);
    log::debug!(
        "Wrote {} frames in {:.2} ms",
        num_frames,
        metadata.processing_time_ms
    );

    Ok(SpectrogramReport {
        num_frames,
        num_bins: config.num_bins(),
        advisories,
        metadata,
    })
}

/// Decode `input`, generate its spectrogram and write it as text to `output`
///
/// The output file is only created once the source has been decoded and
/// the parameters validated, and it is written atomically: on failure no
/// partial file is left behind.
///
/// # Errors
///
/// * [`SpectrogramError::SourceUnavailable`] if `input` cannot be read
/// * [`SpectrogramError::SinkUnavailable`] if `output` cannot be created
/// * [`SpectrogramError::WriteFailure`] if writing the rows fails
/// * Everything [`generate_spectrogram`] can return
pub fn generate_spectrogram_file(
    input: &Path,
    output: &Path,
    config: &SpectrogramConfig,
) -> Result<SpectrogramReport, SpectrogramError> {
    let source = io::decoder::decode_audio(input)?;

    // fail before the sink exists
    prepare(&source, config)?;

    io::sink::write_rows_atomically(output, |writer| {
        generate_spectrogram(&source, writer, config)
    })
}
