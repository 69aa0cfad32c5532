//! Frame tapering (window functions)
//!
//! Multiplies every sample of a frame by a weight `w(i)` to reduce spectral
//! leakage before the transform. Windowing happens in place and never
//! allocates.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window applied to each frame before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    /// Hamming window: `w(i) = 0.54 - 0.46 * cos(2πi / (N - 1))`
    Hamming,
    /// Pass-through, samples are left unchanged
    None,
}

impl WindowKind {
    /// Resolve a window by name
    ///
    /// Only the exact name `"hamming"` selects the Hamming window; any other
    /// name falls back to pass-through.
    ///
    /// # Example
    ///
    /// ```
    /// use spectrogram_dsp::features::window::WindowKind;
    ///
    /// assert_eq!(WindowKind::from_name("hamming"), WindowKind::Hamming);
    /// assert_eq!(WindowKind::from_name("rectangular"), WindowKind::None);
    /// ```
    pub fn from_name(name: &str) -> Self {
        if name == "hamming" {
            WindowKind::Hamming
        } else {
            WindowKind::None
        }
    }

    /// Canonical name of this window
    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::Hamming => "hamming",
            WindowKind::None => "none",
        }
    }
}

impl Default for WindowKind {
    fn default() -> Self {
        WindowKind::Hamming
    }
}

/// Hamming weight for position `i` of a frame of length `n`
///
/// A single-sample frame has no taper: `w(0) = 1`.
pub fn hamming_weight(i: usize, n: usize) -> f64 {
    if n <= 1 {
        return 1.0;
    }
    0.54 - 0.46 * (2.0 * PI * i as f64 / (n - 1) as f64).cos()
}

/// Apply `kind` to `frame` in place
pub fn apply_window(frame: &mut [f64], kind: WindowKind) {
    match kind {
        WindowKind::Hamming => {
            let n = frame.len();
            for (i, sample) in frame.iter_mut().enumerate() {
                *sample *= hamming_weight(i, n);
            }
        }
        WindowKind::None => {}
    }
}
