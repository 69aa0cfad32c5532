//! Run metadata

use serde::{Deserialize, Serialize};

use crate::config::{TransformKind, WindowKind, WindowingScope};

/// Metadata describing one spectrogram run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrogramMetadata {
    /// Crate version that produced the rows
    pub algorithm_version: String,

    /// Sample rate of the source in Hz
    pub sample_rate: u32,

    /// Number of input samples
    pub num_samples: usize,

    /// Source duration in seconds
    pub duration_seconds: f64,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f64,

    /// Window applied to each frame
    pub window: WindowKind,

    /// Windowing scope used
    pub windowing_scope: WindowingScope,

    /// Transform algorithm used
    pub transform: TransformKind,
}

impl Default for SpectrogramMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            sample_rate: 0,
            num_samples: 0,
            duration_seconds: 0.0,
            processing_time_ms: 0.0,
            window: WindowKind::default(),
            windowing_scope: WindowingScope::default(),
            transform: TransformKind::default(),
        }
    }
}
