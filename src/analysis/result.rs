//! Spectrogram result types

use serde::{Deserialize, Serialize};

use super::metadata::SpectrogramMetadata;
use crate::features::magnitude;

/// Magnitude rows for a whole signal, frame 0 first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrogram {
    /// One row of `window_size / 2` decibel values per frame
    pub rows: Vec<Vec<f64>>,

    /// Frame length in samples
    pub window_size: usize,

    /// Samples between frame starts
    pub frame_step: usize,

    /// Sample rate of the source in Hz
    pub sample_rate: u32,

    /// Advisory diagnostics raised while computing the rows
    pub advisories: Vec<Advisory>,
}

impl Spectrogram {
    /// Number of frames (rows)
    pub fn num_frames(&self) -> usize {
        self.rows.len()
    }

    /// Number of frequency bins per row
    pub fn num_bins(&self) -> usize {
        magnitude::num_bins(self.window_size)
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_to_hz(&self, bin: usize) -> f64 {
        bin as f64 * self.sample_rate as f64 / self.window_size as f64
    }

    /// Start time of `frame` in seconds
    pub fn frame_to_seconds(&self, frame: usize) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        frame as f64 * self.frame_step as f64 / self.sample_rate as f64
    }

    /// Bin with the largest value in `frame`, if the row is not empty
    pub fn peak_bin(&self, frame: usize) -> Option<usize> {
        let row = self.rows.get(frame)?;
        row.iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(bin, _)| bin)
    }
}

/// Non-fatal diagnostics raised during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Advisory {
    /// Frame count exceeds the configured threshold; the run may be slow
    TooManyFrames {
        /// Frames the run produces
        num_frames: usize,
        /// Configured threshold
        threshold: usize,
    },
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrogramReport {
    /// Rows written to the sink
    pub num_frames: usize,

    /// Values per row
    pub num_bins: usize,

    /// Advisory diagnostics, empty for an unremarkable run
    pub advisories: Vec<Advisory>,

    /// Run metadata
    pub metadata: SpectrogramMetadata,
}
