//! Row sinks
//!
//! The text format is one line per frame: every magnitude printed with six
//! fractional digits and followed by a single space, then `\n`. No header,
//! no trailing metadata.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::SpectrogramError;

/// Destination for magnitude rows, in frame order
pub trait RowSink {
    /// Accept one magnitude row
    fn write_row(&mut self, row: &[f64]) -> Result<(), SpectrogramError>;

    /// Flush anything buffered; called once after the last row
    fn finish(&mut self) -> Result<(), SpectrogramError> {
        Ok(())
    }
}

/// In-memory sink
impl RowSink for Vec<Vec<f64>> {
    fn write_row(&mut self, row: &[f64]) -> Result<(), SpectrogramError> {
        self.push(row.to_vec());
        Ok(())
    }
}

/// Format a row as one line of text, terminator included
///
/// # Example
///
/// ```
/// use spectrogram_dsp::io::sink::format_row;
///
/// assert_eq!(format_row(&[-120.0, 3.25]), "-120.000000 3.250000 \n");
/// ```
pub fn format_row(row: &[f64]) -> String {
    let mut line = String::with_capacity(row.len() * 12 + 1);
    for value in row {
        // writing into a String cannot fail
        let _ = write!(line, "{:.6} ", value);
    }
    line.push('\n');
    line
}

/// Writes rows as text to any [`Write`]
pub struct TextRowWriter<W: Write> {
    inner: BufWriter<W>,
    rows_written: usize,
}

impl<W: Write> TextRowWriter<W> {
    /// Wrap `inner` in a buffered text writer
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            rows_written: 0,
        }
    }

    /// Rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W, SpectrogramError> {
        self.inner
            .into_inner()
            .map_err(|e| SpectrogramError::WriteFailure(e.error().to_string()))
    }
}

impl<W: Write> RowSink for TextRowWriter<W> {
    fn write_row(&mut self, row: &[f64]) -> Result<(), SpectrogramError> {
        self.inner
            .write_all(format_row(row).as_bytes())
            .map_err(|e| {
                SpectrogramError::WriteFailure(format!(
                    "row {}: {}",
                    self.rows_written, e
                ))
            })?;
        self.rows_written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SpectrogramError> {
        self.inner
            .flush()
            .map_err(|e| SpectrogramError::WriteFailure(format!("flush: {}", e)))
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

/// Write a text spectrogram to `path` so that it only appears complete
///
/// Rows go to a sibling `<path>.partial` file which is renamed over `path`
/// once `fill` and the final flush succeed. On any failure the partial
/// file is removed and `path` is left as it was.
pub fn write_rows_atomically<T, F>(path: &Path, fill: F) -> Result<T, SpectrogramError>
where
    F: FnOnce(&mut TextRowWriter<File>) -> Result<T, SpectrogramError>,
{
    let tmp = partial_path(path);
    let file = File::create(&tmp).map_err(|e| {
        SpectrogramError::SinkUnavailable(format!("cannot create {}: {}", tmp.display(), e))
    })?;

    let mut writer = TextRowWriter::new(file);
    let result = fill(&mut writer).and_then(|value| {
        writer.finish()?;
        let file = writer.into_inner()?;
        file.sync_all()
            .map_err(|e| SpectrogramError::WriteFailure(format!("sync: {}", e)))?;
        Ok(value)
    });

    match result {
        Ok(value) => {
            fs::rename(&tmp, path).map_err(|e| {
                let _ = fs::remove_file(&tmp);
                SpectrogramError::SinkUnavailable(format!(
                    "cannot move output into {}: {}",
                    path.display(),
                    e
                ))
            })?;
            Ok(value)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}
