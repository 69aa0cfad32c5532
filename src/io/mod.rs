//! Audio sources and row sinks
//!
//! Decoding with Symphonia on the input side, text rows on the output side.

pub mod decoder;
pub mod sink;

use serde::{Deserialize, Serialize};

/// Bit depth of the integer samples this crate reads
pub const PCM16_BITS: u16 = 16;

/// A single-channel signal loaded into memory
///
/// Amplitudes are the raw integer sample values widened to `f64`
/// (a full-scale 16-bit sample is `32767.0`), not normalized to `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSource {
    /// Amplitude samples in time order
    pub samples: Vec<f64>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample of the encoded source
    pub bits_per_sample: u16,
}

impl AudioSource {
    /// Wrap 16-bit PCM samples
    ///
    /// # Example
    ///
    /// ```
    /// use spectrogram_dsp::AudioSource;
    ///
    /// let source = AudioSource::from_pcm16(&[0, 16384, -32768], 8000);
    /// assert_eq!(source.samples, vec![0.0, 16384.0, -32768.0]);
    /// assert_eq!(source.bits_per_sample, 16);
    /// ```
    pub fn from_pcm16(samples: &[i16], sample_rate: u32) -> Self {
        Self {
            samples: samples.iter().map(|&s| s as f64).collect(),
            sample_rate,
            bits_per_sample: PCM16_BITS,
        }
    }

    /// Number of samples
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Signal duration in seconds, zero for an unknown sample rate
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
