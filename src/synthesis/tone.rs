//! Parametric test tone generator
//!
//! Produces mono 16-bit samples of a sine, square, triangle or sawtooth
//! wave. Sample `i` is evaluated at `t = i / sample_rate` and quantized as
//! `value * 32767`, truncated toward zero.
//!
//! # Example
//!
//! ```
//! use spectrogram_dsp::synthesis::tone::{generate_tone, ToneSpec, Waveform};
//!
//! let spec = ToneSpec {
//!     sample_rate: 8000,
//!     frequency: 1000.0,
//!     amplitude: 0.5,
//!     duration_seconds: 0.01,
//!     waveform: Waveform::Sine,
//! };
//! let samples = generate_tone(&spec)?;
//! assert_eq!(samples.len(), 80);
//! # Ok::<(), spectrogram_dsp::SpectrogramError>(())
//! ```

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{try_reserve, SpectrogramError};

/// Largest number of samples a single tone may have
pub const MAX_TONE_SAMPLES: usize = 1_000_000_000;

/// Full-scale value for 16-bit quantization
const PCM16_FULL_SCALE: f64 = 32767.0;

/// Tone shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Waveform {
    /// `A · sin(2πft)`
    Sine,
    /// `+A` for the first half of each period, `-A` for the second
    Square,
    /// Symmetric triangle between `-A` and `+A`
    Triangle,
    /// Rising ramp centered on zero
    Sawtooth,
}

impl FromStr for Waveform {
    type Err = SpectrogramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "triangle" => Ok(Waveform::Triangle),
            "sawtooth" => Ok(Waveform::Sawtooth),
            other => Err(SpectrogramError::InvalidParameters(format!(
                "Unsupported wave type {}",
                other
            ))),
        }
    }
}

impl Waveform {
    /// Unit-amplitude value at phase `ft` (cycles elapsed)
    pub fn value_at(&self, cycles: f64) -> f64 {
        match self {
            Waveform::Sine => (2.0 * PI * cycles).sin(),
            Waveform::Square => {
                if cycles % 1.0 < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 2.0 * (2.0 * (cycles - (cycles + 0.5).floor())).abs() - 1.0,
            Waveform::Sawtooth => 2.0 * (cycles - (cycles + 0.5).floor()),
        }
    }
}

/// Tone parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Sample rate in Hz (> 0)
    pub sample_rate: u32,
    /// Frequency in Hz (>= 0)
    pub frequency: f64,
    /// Peak amplitude as a fraction of full scale (> 0, normally <= 1)
    pub amplitude: f64,
    /// Length in seconds (> 0)
    pub duration_seconds: f64,
    /// Tone shape
    pub waveform: Waveform,
}

impl ToneSpec {
    /// Number of samples this tone produces
    pub fn sample_count(&self) -> usize {
        (self.duration_seconds * self.sample_rate as f64) as usize
    }

    fn validate(&self) -> Result<usize, SpectrogramError> {
        if self.sample_rate == 0
            || !(self.frequency >= 0.0)
            || !(self.amplitude > 0.0)
            || !(self.duration_seconds > 0.0)
        {
            return Err(SpectrogramError::InvalidParameters(
                "Sample rate, amplitude and duration must be positive, frequency non-negative"
                    .to_string(),
            ));
        }
        let count = self.sample_count();
        if count > MAX_TONE_SAMPLES {
            return Err(SpectrogramError::InvalidParameters(format!(
                "Sample count too large ({} > {})",
                count, MAX_TONE_SAMPLES
            )));
        }
        Ok(count)
    }
}

/// Generate 16-bit samples for `spec`
///
/// # Errors
///
/// * [`SpectrogramError::InvalidParameters`] for non-positive parameters or
///   more than [`MAX_TONE_SAMPLES`] samples
/// * [`SpectrogramError::AllocationFailure`] if the sample buffer cannot be
///   reserved
pub fn generate_tone(spec: &ToneSpec) -> Result<Vec<i16>, SpectrogramError> {
    let count = spec.validate()?;
    log::debug!(
        "Generating {:?} tone: {} Hz, amplitude {}, {} samples at {} Hz",
        spec.waveform,
        spec.frequency,
        spec.amplitude,
        count,
        spec.sample_rate
    );

    let mut samples = Vec::new();
    try_reserve(&mut samples, count, "tone samples")?;

    let rate = spec.sample_rate as f64;
    samples.extend((0..count).map(|i| {
        let time = i as f64 / rate;
        let value = spec.amplitude * spec.waveform.value_at(spec.frequency * time);
        (value * PCM16_FULL_SCALE) as i16
    }));
    Ok(samples)
}
