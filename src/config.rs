//! Configuration parameters for spectrogram generation

use serde::{Deserialize, Serialize};

use crate::error::SpectrogramError;
use crate::features::framer::frame_count;
use crate::features::magnitude;

pub use crate::features::dft::TransformKind;
pub use crate::features::window::WindowKind;

/// Frame count above which a run is reported as potentially slow
pub const DEFAULT_FRAME_WARNING_THRESHOLD: usize = 30_000;

/// Where windowing writes its tapered samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowingScope {
    /// Window the shared sample buffer in place. Overlapping frames see
    /// samples already tapered by earlier frames. Kept for compatibility with
    /// existing spectrogram text files.
    Shared,
    /// Window a private copy of every frame; the sample buffer is never
    /// mutated and frames are independent of each other.
    PerFrameCopy,
}

impl Default for WindowingScope {
    fn default() -> Self {
        WindowingScope::PerFrameCopy
    }
}

/// Spectrogram configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrogramConfig {
    /// Samples per frame, also the transform length (default: 256)
    pub window_size: usize,

    /// Samples between the starts of consecutive frames (default: 128)
    pub frame_step: usize,

    /// Window applied to each frame (default: Hamming)
    pub window: WindowKind,

    /// Whether windowing mutates the shared buffer or a per-frame copy
    /// (default: PerFrameCopy)
    pub windowing_scope: WindowingScope,

    /// Transform algorithm (default: Direct)
    pub transform: TransformKind,

    /// Compute frames on the rayon pool (default: false)
    /// Only valid with [`WindowingScope::PerFrameCopy`]; row order is preserved.
    pub parallel: bool,

    /// Frame count above which an advisory is raised (default: 30000)
    pub frame_warning_threshold: usize,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            window_size: 256,
            frame_step: 128,
            window: WindowKind::Hamming,
            windowing_scope: WindowingScope::PerFrameCopy,
            transform: TransformKind::Direct,
            parallel: false,
            frame_warning_threshold: DEFAULT_FRAME_WARNING_THRESHOLD,
        }
    }
}

impl SpectrogramConfig {
    /// Config for the given window size and frame step, other fields default
    pub fn new(window_size: usize, frame_step: usize) -> Self {
        Self {
            window_size,
            frame_step,
            ..Self::default()
        }
    }

    /// Check the parameters against a signal of `num_samples` samples
    ///
    /// Returns the number of frames the run will produce.
    ///
    /// # Errors
    ///
    /// [`SpectrogramError::InvalidParameters`] when the window size or
    /// frame step is zero, the window is larger than the signal, or
    /// parallel execution is requested together with shared windowing.
    pub fn validate(&self, num_samples: usize) -> Result<usize, SpectrogramError> {
        if self.parallel && self.windowing_scope == WindowingScope::Shared {
            return Err(SpectrogramError::InvalidParameters(
                "Parallel frame processing requires per-frame-copy windowing".to_string(),
            ));
        }
        frame_count(num_samples, self.window_size, self.frame_step)
    }

    /// Number of magnitude values in every row
    pub fn num_bins(&self) -> usize {
        magnitude::num_bins(self.window_size)
    }
}
