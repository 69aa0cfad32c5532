//! Frame stepping over a sample sequence
//!
//! [`Framer`] is a lazy iterator of magnitude rows. For frame `i` it takes
//! the `window_size` samples starting at `i * frame_step`, applies the
//! window, runs the transform and encodes the positive-frequency half in
//! decibels:
//!
//! ```text
//! num_frames = (num_samples - window_size) / frame_step + 1
//! ```
//!
//! With [`WindowingScope::Shared`] the window is applied to the caller's
//! buffer in place, so when `frame_step < window_size` later frames see
//! samples already tapered by earlier ones. [`WindowingScope::PerFrameCopy`]
//! windows a private copy and leaves the buffer untouched.

use rayon::prelude::*;

use crate::config::{SpectrogramConfig, WindowingScope};
use crate::error::{try_reserve, SpectrogramError};
use crate::features::dft::{make_transform, spectrum_buffer, Complex64, Transform};
use crate::features::magnitude::{encode_row, encode_row_into};
use crate::features::window::{apply_window, WindowKind};

/// Number of frames produced for the given signal length and parameters
///
/// # Errors
///
/// [`SpectrogramError::InvalidParameters`] if `window_size` or `frame_step`
/// is zero or the window does not fit in the signal.
///
/// # Example
///
/// ```
/// use spectrogram_dsp::features::framer::frame_count;
///
/// assert_eq!(frame_count(1000, 256, 128)?, 6);
/// # Ok::<(), spectrogram_dsp::SpectrogramError>(())
/// ```
pub fn frame_count(
    num_samples: usize,
    window_size: usize,
    frame_step: usize,
) -> Result<usize, SpectrogramError> {
    if window_size == 0 {
        return Err(SpectrogramError::InvalidParameters(
            "Window size must be > 0".to_string(),
        ));
    }
    if frame_step == 0 {
        return Err(SpectrogramError::InvalidParameters(
            "Frame step must be > 0".to_string(),
        ));
    }
    if window_size > num_samples {
        return Err(SpectrogramError::InvalidParameters(format!(
            "Window size ({}) larger than input size ({})",
            window_size, num_samples
        )));
    }
    Ok((num_samples - window_size) / frame_step + 1)
}

enum FrameSource<'a> {
    Shared(&'a mut [f64]),
    Copied { samples: &'a [f64], frame: Vec<f64> },
}

/// Lazy iterator of magnitude rows, frame 0 first
pub struct Framer<'a> {
    source: FrameSource<'a>,
    window: WindowKind,
    window_size: usize,
    frame_step: usize,
    transform: Box<dyn Transform>,
    spectrum: Vec<Complex64>,
    next_frame: usize,
    num_frames: usize,
}

impl<'a> Framer<'a> {
    /// Framer that windows `samples` in place
    pub fn shared(
        samples: &'a mut [f64],
        config: &SpectrogramConfig,
    ) -> Result<Self, SpectrogramError> {
        let num_frames = config.validate(samples.len())?;
        Self::build(FrameSource::Shared(samples), config, num_frames)
    }

    /// Framer that windows a private copy of each frame
    pub fn per_frame_copy(
        samples: &'a [f64],
        config: &SpectrogramConfig,
    ) -> Result<Self, SpectrogramError> {
        let num_frames = config.validate(samples.len())?;
        let mut frame = Vec::new();
        try_reserve(&mut frame, config.window_size, "frame copy")?;
        frame.resize(config.window_size, 0.0);
        Self::build(FrameSource::Copied { samples, frame }, config, num_frames)
    }

    fn build(
        source: FrameSource<'a>,
        config: &SpectrogramConfig,
        num_frames: usize,
    ) -> Result<Self, SpectrogramError> {
        Ok(Self {
            source,
            window: config.window,
            window_size: config.window_size,
            frame_step: config.frame_step,
            transform: make_transform(config.transform, config.window_size)?,
            spectrum: spectrum_buffer(config.window_size)?,
            next_frame: 0,
            num_frames,
        })
    }

    /// Compute the next row into `row`, returning `false` once all frames
    /// have been produced
    pub fn next_into(&mut self, row: &mut Vec<f64>) -> bool {
        if self.next_frame >= self.num_frames {
            return false;
        }
        let start = self.next_frame * self.frame_step;
        let end = start + self.window_size;

        match &mut self.source {
            FrameSource::Shared(samples) => {
                let frame = &mut samples[start..end];
                apply_window(frame, self.window);
                self.transform.process(frame, &mut self.spectrum);
            }
            FrameSource::Copied { samples, frame } => {
                frame.copy_from_slice(&samples[start..end]);
                apply_window(frame, self.window);
                self.transform.process(frame, &mut self.spectrum);
            }
        }

        encode_row_into(&self.spectrum, row);
        self.next_frame += 1;
        true
    }
}

impl Iterator for Framer<'_> {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut row = Vec::with_capacity(self.window_size / 2);
        if self.next_into(&mut row) {
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_frames - self.next_frame;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Framer<'_> {}

/// Compute every row on the rayon pool, windowing per-frame copies
///
/// Rows come back in frame-index order, identical to sequential
/// [`Framer::per_frame_copy`] output.
pub fn compute_rows_parallel(
    samples: &[f64],
    config: &SpectrogramConfig,
) -> Result<Vec<Vec<f64>>, SpectrogramError> {
    if config.windowing_scope != WindowingScope::PerFrameCopy {
        return Err(SpectrogramError::InvalidParameters(
            "Parallel frame processing requires per-frame-copy windowing".to_string(),
        ));
    }
    let num_frames = config.validate(samples.len())?;

    log::debug!(
        "Computing {} frames in parallel on {} threads",
        num_frames,
        rayon::current_num_threads()
    );

    (0..num_frames)
        .into_par_iter()
        .map_init(
            || -> Result<(Box<dyn Transform>, Vec<f64>, Vec<Complex64>), SpectrogramError> {
                Ok((
                    make_transform(config.transform, config.window_size)?,
                    vec![0.0; config.window_size],
                    spectrum_buffer(config.window_size)?,
                ))
            },
            |state, i| -> Result<Vec<f64>, SpectrogramError> {
                let (transform, frame, spectrum) = state.as_mut().map_err(|e| e.clone())?;
                let start = i * config.frame_step;
                frame.copy_from_slice(&samples[start..start + config.window_size]);
                apply_window(frame, config.window);
                transform.process(frame, spectrum);
                Ok(encode_row(spectrum))
            },
        )
        .collect()
}
