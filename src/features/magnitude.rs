//! Magnitude to decibel encoding
//!
//! Keeps the positive-frequency half of a spectrum (`N / 2` bins, floor
//! division) and maps each bin to `20 · log10(|X[k]| + 1e-6)`.

use crate::features::dft::Complex64;

/// Additive floor keeping `log10` finite for silent bins
pub const MAGNITUDE_FLOOR: f64 = 1e-6;

/// Decibel value of a silent bin, `20 · log10(1e-6)`
pub const SILENCE_DB: f64 = -120.0;

/// Number of bins kept from an `n`-point spectrum
pub fn num_bins(n: usize) -> usize {
    n / 2
}

/// Convert a linear magnitude to decibels
#[inline]
pub fn magnitude_to_db(magnitude: f64) -> f64 {
    20.0 * (magnitude + MAGNITUDE_FLOOR).log10()
}

/// Encode the positive-frequency half of `spectrum` into `row`
///
/// `row` is cleared first so it can be reused across frames.
pub fn encode_row_into(spectrum: &[Complex64], row: &mut Vec<f64>) {
    row.clear();
    row.extend(spectrum[..num_bins(spectrum.len())].iter().map(|c| {
        // explicit sum of squares rather than hypot
        let magnitude = (c.re * c.re + c.im * c.im).sqrt();
        magnitude_to_db(magnitude)
    }));
}

/// Encode the positive-frequency half of `spectrum` as a new row
///
/// # Example
///
/// ```
/// use spectrogram_dsp::features::dft::Complex64;
/// use spectrogram_dsp::features::magnitude::encode_row;
///
/// let row = encode_row(&[Complex64::new(0.0, 0.0); 5]);
/// assert_eq!(row.len(), 2);
/// assert!((row[0] + 120.0).abs() < 1e-9);
/// ```
pub fn encode_row(spectrum: &[Complex64]) -> Vec<f64> {
    let mut row = Vec::with_capacity(num_bins(spectrum.len()));
    encode_row_into(spectrum, &mut row);
    row
}
