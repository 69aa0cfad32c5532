//! Spectrogram results and run reports
//!
//! - Result types (rows, advisories, report)
//! - Metadata

pub mod metadata;
pub mod result;
