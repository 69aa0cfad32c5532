//! Audio decoding using Symphonia
//!
//! Reads a mono 16-bit integer PCM file into an [`AudioSource`]. Any
//! container Symphonia can probe is accepted as long as the default track
//! has one channel and 16-bit integer samples.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{try_reserve, SpectrogramError};
use crate::io::{AudioSource, PCM16_BITS};

/// Decode audio file to an in-memory sample sequence
///
/// # Arguments
///
/// * `path` - Path to audio file (WAV, or any other container holding
///   mono 16-bit PCM)
///
/// # Errors
///
/// * [`SpectrogramError::SourceUnavailable`] if the file cannot be opened,
///   probed or decoded
/// * [`SpectrogramError::InvalidParameters`] if the track is not mono or
///   not 16-bit integer PCM
/// * [`SpectrogramError::AllocationFailure`] if the sample buffer cannot be
///   reserved
pub fn decode_audio(path: &Path) -> Result<AudioSource, SpectrogramError> {
    log::debug!("Decoding audio file: {}", path.display());

    let file = File::open(path).map_err(|e| {
        SpectrogramError::SourceUnavailable(format!("cannot open {}: {}", path.display(), e))
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| {
            SpectrogramError::SourceUnavailable(format!(
                "cannot probe {}: {}",
                path.display(),
                e
            ))
        })?;
    let mut format = probed.format;

    let track = format.default_track().ok_or_else(|| {
        SpectrogramError::SourceUnavailable(format!("no audio track in {}", path.display()))
    })?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params.sample_rate.ok_or_else(|| {
        SpectrogramError::SourceUnavailable(format!("unknown sample rate in {}", path.display()))
    })?;

    let channels = codec_params.channels.map(|c| c.count()).unwrap_or(1);
    if channels != 1 {
        return Err(SpectrogramError::InvalidParameters(format!(
            "expected mono audio, {} has {} channels",
            path.display(),
            channels
        )));
    }

    if let Some(bits) = codec_params.bits_per_sample {
        if bits != PCM16_BITS as u32 {
            return Err(SpectrogramError::InvalidParameters(format!(
                "expected 16-bit samples, {} has {} bits per sample",
                path.display(),
                bits
            )));
        }
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| SpectrogramError::SourceUnavailable(format!("cannot create decoder: {}", e)))?;

    let mut samples: Vec<f64> = Vec::new();
    if let Some(n_frames) = codec_params.n_frames {
        try_reserve(&mut samples, n_frames as usize, "samples")?;
    }

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(SpectrogramError::SourceUnavailable(format!(
                    "error reading packet: {}",
                    e
                )))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| SpectrogramError::SourceUnavailable(format!("decode error: {}", e)))?;

        match decoded {
            AudioBufferRef::S16(buf) => {
                let chan = buf.chan(0);
                try_reserve(&mut samples, chan.len(), "samples")?;
                samples.extend(chan.iter().map(|&s| s as f64));
            }
            _ => {
                return Err(SpectrogramError::InvalidParameters(format!(
                    "{} does not contain 16-bit integer samples",
                    path.display()
                )))
            }
        }
    }

    log::debug!(
        "Decoded {} samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        path.display()
    );

    Ok(AudioSource {
        samples,
        sample_rate,
        bits_per_sample: PCM16_BITS,
    })
}
