//! Error types for spectrogram generation

use std::fmt;

/// Errors that can occur while generating a spectrogram
///
/// None of these are retried. Every variant stops processing at the point
/// of detection and is handed back to the caller.
#[derive(Debug, Clone)]
pub enum SpectrogramError {
    /// Audio source cannot be opened, probed or decoded
    SourceUnavailable(String),

    /// Output sink cannot be created
    SinkUnavailable(String),

    /// Window size, frame step or derived frame count violate preconditions
    InvalidParameters(String),

    /// Working buffer for samples or transform scratch space could not be obtained
    AllocationFailure(String),

    /// Writing a row to the sink failed part way
    WriteFailure(String),
}

impl fmt::Display for SpectrogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectrogramError::SourceUnavailable(msg) => write!(f, "Source unavailable: {}", msg),
            SpectrogramError::SinkUnavailable(msg) => write!(f, "Sink unavailable: {}", msg),
            SpectrogramError::InvalidParameters(msg) => write!(f, "Invalid parameters: {}", msg),
            SpectrogramError::AllocationFailure(msg) => write!(f, "Allocation failure: {}", msg),
            SpectrogramError::WriteFailure(msg) => write!(f, "Write failure: {}", msg),
        }
    }
}

impl std::error::Error for SpectrogramError {}

/// Reserve exactly `additional` slots in `buf`, mapping failure to
/// [`SpectrogramError::AllocationFailure`].
pub(crate) fn try_reserve<T>(
    buf: &mut Vec<T>,
    additional: usize,
    what: &str,
) -> Result<(), SpectrogramError> {
    buf.try_reserve_exact(additional).map_err(|e| {
        SpectrogramError::AllocationFailure(format!(
            "cannot reserve {} elements for {}: {}",
            additional, what, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = SpectrogramError::InvalidParameters("frame step must be > 0".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: frame step must be > 0");

        let err = SpectrogramError::SinkUnavailable("out.txt".to_string());
        assert_eq!(err.to_string(), "Sink unavailable: out.txt");
    }

    #[test]
    fn test_try_reserve_reports_allocation_failure() {
        let mut buf: Vec<f64> = Vec::new();
        let result = try_reserve(&mut buf, usize::MAX, "samples");
        match result {
            Err(SpectrogramError::AllocationFailure(msg)) => assert!(msg.contains("samples")),
            other => panic!("expected allocation failure, got {:?}", other),
        }

        assert!(try_reserve(&mut buf, 16, "samples").is_ok());
        assert!(buf.capacity() >= 16);
    }
}
