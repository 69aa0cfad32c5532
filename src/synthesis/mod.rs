//! Signal synthesis
//!
//! Closed-form test tones used to feed the spectrogram pipeline.

pub mod tone;
