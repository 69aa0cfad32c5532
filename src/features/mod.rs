//! Spectrogram building blocks
//!
//! Applied per frame, in this order:
//! - Windowing (Hamming or pass-through)
//! - Discrete Fourier transform (direct or fast)
//! - Magnitude to decibel encoding
//!
//! [`framer`] steps across the signal and chains the three.

pub mod dft;
pub mod framer;
pub mod magnitude;
pub mod window;
