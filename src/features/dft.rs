//! Discrete Fourier transform of real frames
//!
//! Two interchangeable implementations behind the [`Transform`] trait:
//!
//! - [`DirectDft`]: the O(N²) definition, accumulating cosine and sine terms
//!   pairwise in `f64` for every output bin
//! - [`FastDft`]: rustfft's mixed-radix planner, valid for any `N` including
//!   non powers of two; matches [`DirectDft`] within floating-point tolerance
//!
//! For output bin `k` of an `N`-sample frame:
//!
//! ```text
//! real[k] = Σ input[n] · cos(-2πkn / N)
//! imag[k] = Σ input[n] · sin(-2πkn / N)
//! ```

use std::f64::consts::PI;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::error::{try_reserve, SpectrogramError};

pub use rustfft::num_complex::Complex64;

/// Which transform algorithm computes each frame's spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    /// Direct O(N²) evaluation of the DFT definition
    Direct,
    /// Fast transform (rustfft), equivalent output within tolerance
    Fast,
}

impl Default for TransformKind {
    fn default() -> Self {
        TransformKind::Direct
    }
}

/// A fixed-length real-to-complex transform
pub trait Transform: Send {
    /// Frame length this transform was built for
    fn frame_len(&self) -> usize;

    /// Compute the spectrum of `input` into `output`
    ///
    /// Both slices must be exactly [`Transform::frame_len`] long.
    fn process(&mut self, input: &[f64], output: &mut [Complex64]);
}

/// Direct evaluation of the DFT definition
#[derive(Debug, Clone)]
pub struct DirectDft {
    len: usize,
}

impl DirectDft {
    /// Create a direct transform for frames of `len` samples (`len > 0`)
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "DFT length must be > 0");
        Self { len }
    }
}

impl Transform for DirectDft {
    fn frame_len(&self) -> usize {
        self.len
    }

    fn process(&mut self, input: &[f64], output: &mut [Complex64]) {
        let n_len = self.len;
        debug_assert_eq!(input.len(), n_len);
        debug_assert_eq!(output.len(), n_len);

        for (k, bin) in output.iter_mut().enumerate() {
            let mut real = 0.0f64;
            let mut imag = 0.0f64;
            for (n, &x) in input.iter().enumerate() {
                let angle = -2.0 * PI * k as f64 * n as f64 / n_len as f64;
                real += x * angle.cos();
                imag += x * angle.sin();
            }
            *bin = Complex64::new(real, imag);
        }
    }
}

/// Fast transform backed by a rustfft plan
pub struct FastDft {
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl FastDft {
    /// Plan a forward transform for frames of `len` samples
    pub fn new(len: usize) -> Result<Self, SpectrogramError> {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(len);

        let scratch_len = fft.get_inplace_scratch_len();
        let mut scratch = Vec::new();
        try_reserve(&mut scratch, scratch_len, "FFT scratch")?;
        scratch.resize(scratch_len, Complex64::new(0.0, 0.0));

        Ok(Self { fft, scratch })
    }
}

impl Transform for FastDft {
    fn frame_len(&self) -> usize {
        self.fft.len()
    }

    fn process(&mut self, input: &[f64], output: &mut [Complex64]) {
        debug_assert_eq!(input.len(), output.len());
        for (out, &x) in output.iter_mut().zip(input) {
            *out = Complex64::new(x, 0.0);
        }
        self.fft.process_with_scratch(output, &mut self.scratch);
    }
}

/// Build the transform selected by `kind` for frames of `len` samples
pub fn make_transform(
    kind: TransformKind,
    len: usize,
) -> Result<Box<dyn Transform>, SpectrogramError> {
    if len == 0 {
        return Err(SpectrogramError::InvalidParameters(
            "Transform length must be > 0".to_string(),
        ));
    }
    Ok(match kind {
        TransformKind::Direct => Box::new(DirectDft::new(len)),
        TransformKind::Fast => Box::new(FastDft::new(len)?),
    })
}

/// Allocate a zeroed spectrum buffer of `len` bins
pub fn spectrum_buffer(len: usize) -> Result<Vec<Complex64>, SpectrogramError> {
    let mut spectrum = Vec::new();
    try_reserve(&mut spectrum, len, "DFT output")?;
    spectrum.resize(len, Complex64::new(0.0, 0.0));
    Ok(spectrum)
}

/// One-shot direct DFT of `input`
///
/// # Example
///
/// ```
/// use spectrogram_dsp::features::dft::compute_dft;
///
/// let spectrum = compute_dft(&[1.0, 0.0, 0.0, 0.0]);
/// assert_eq!(spectrum.len(), 4);
/// assert!(spectrum.iter().all(|c| (c.re - 1.0).abs() < 1e-12 && c.im.abs() < 1e-12));
/// ```
pub fn compute_dft(input: &[f64]) -> Vec<Complex64> {
    if input.is_empty() {
        return Vec::new();
    }
    let mut output = vec![Complex64::new(0.0, 0.0); input.len()];
    DirectDft::new(input.len()).process(input, &mut output);
    output
}
