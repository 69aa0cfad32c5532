//! Integration tests for spectrogram generation

use spectrogram_dsp::io::decoder::decode_audio;
use spectrogram_dsp::io::sink::format_row;
use spectrogram_dsp::synthesis::tone::{generate_tone, ToneSpec, Waveform};
use spectrogram_dsp::{
    compute_spectrogram, generate_spectrogram, generate_spectrogram_file, Advisory, AudioSource,
    SpectrogramConfig, SpectrogramError, TextRowWriter, TransformKind, WindowKind,
    WindowingScope,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-test scratch directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "spectrogram-dsp-{}-{}",
        name,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create scratch directory");
    dir
}

/// Write integer samples as a WAV file
fn write_wav_with_depth(
    path: &Path,
    samples: &[i32],
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("Failed to create WAV");
    for &s in samples {
        writer.write_sample(s).expect("Failed to write sample");
    }
    writer.finalize().expect("Failed to finalize WAV");
}

/// Write 16-bit samples as a WAV file
fn write_wav(path: &Path, samples: &[i16], sample_rate: u32, channels: u16) {
    let widened: Vec<i32> = samples.iter().map(|&s| s as i32).collect();
    write_wav_with_depth(path, &widened, sample_rate, channels, 16);
}

fn sine(sample_rate: u32, frequency: f64, duration_seconds: f64) -> Vec<i16> {
    generate_tone(&ToneSpec {
        sample_rate,
        frequency,
        amplitude: 0.8,
        duration_seconds,
        waveform: Waveform::Sine,
    })
    .expect("Failed to generate tone")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_and_row_width() {
        let source = AudioSource::from_pcm16(&vec![100; 1000], 8000);
        let spectrogram = compute_spectrogram(&source, &SpectrogramConfig::new(256, 128)).unwrap();
        assert_eq!(spectrogram.num_frames(), 6);
        assert!(spectrogram.rows.iter().all(|row| row.len() == 128));
    }

    #[test]
    fn test_silence_is_minus_120_db() {
        let source = AudioSource::from_pcm16(&vec![0; 2048], 8000);
        let spectrogram = compute_spectrogram(&source, &SpectrogramConfig::new(512, 512)).unwrap();
        for row in &spectrogram.rows {
            for &value in row {
                assert!((value + 120.0).abs() < 1e-9, "got {}", value);
            }
        }
    }

    #[test]
    fn test_integer_bin_tone_peaks_at_its_bin() {
        // 1000 Hz at 8000 Hz with a 64-sample window lands exactly on bin 8
        let samples = sine(8000, 1000.0, 0.1);
        let source = AudioSource::from_pcm16(&samples, 8000);
        let config = SpectrogramConfig {
            window: WindowKind::None,
            ..SpectrogramConfig::new(64, 64)
        };

        let spectrogram = compute_spectrogram(&source, &config).unwrap();
        for frame in 0..spectrogram.num_frames() {
            assert_eq!(spectrogram.peak_bin(frame), Some(8));
            let row = &spectrogram.rows[frame];
            for (bin, &value) in row.iter().enumerate() {
                if bin != 8 {
                    assert!(row[8] - value > 60.0, "bin {} too close to peak: {}", bin, value);
                }
            }
        }
        assert!((spectrogram.bin_to_hz(8) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_hamming_tone_still_peaks_at_its_bin() {
        let samples = sine(16000, 2000.0, 0.25);
        let source = AudioSource::from_pcm16(&samples, 16000);
        let spectrogram = compute_spectrogram(&source, &SpectrogramConfig::new(256, 100)).unwrap();

        // 2000 Hz / (16000 Hz / 256) = bin 32
        for frame in 0..spectrogram.num_frames() {
            assert_eq!(spectrogram.peak_bin(frame), Some(32));
        }
    }

    #[test]
    fn test_window_larger_than_signal_writes_nothing() {
        let source = AudioSource::from_pcm16(&vec![1; 100], 8000);
        let mut sink: Vec<Vec<f64>> = Vec::new();
        let result = generate_spectrogram(&source, &mut sink, &SpectrogramConfig::new(128, 64));
        assert!(matches!(result, Err(SpectrogramError::InvalidParameters(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_zero_frame_step_rejected() {
        let source = AudioSource::from_pcm16(&vec![1; 100], 8000);
        let result = compute_spectrogram(&source, &SpectrogramConfig::new(16, 0));
        assert!(matches!(result, Err(SpectrogramError::InvalidParameters(_))));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let samples = sine(8000, 440.0, 0.3);
        let source = AudioSource::from_pcm16(&samples, 8000);
        let config = SpectrogramConfig::new(200, 75);

        let first = compute_spectrogram(&source, &config).unwrap();
        let second = compute_spectrogram(&source, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_scope_does_not_touch_caller_source() {
        let samples = sine(8000, 440.0, 0.1);
        let source = AudioSource::from_pcm16(&samples, 8000);
        let before = source.clone();
        let config = SpectrogramConfig {
            windowing_scope: WindowingScope::Shared,
            ..SpectrogramConfig::new(100, 50)
        };

        let shared = compute_spectrogram(&source, &config).unwrap();
        assert_eq!(source, before);

        let copied = compute_spectrogram(&source, &SpectrogramConfig::new(100, 50)).unwrap();
        assert_eq!(shared.num_frames(), copied.num_frames());
        assert_eq!(shared.rows[0], copied.rows[0]);
        assert_ne!(shared.rows[1], copied.rows[1]);
    }

    #[test]
    fn test_parallel_preserves_row_order() {
        let samples = sine(8000, 1234.0, 0.5);
        let source = AudioSource::from_pcm16(&samples, 8000);
        let sequential = compute_spectrogram(&source, &SpectrogramConfig::new(128, 32)).unwrap();
        let parallel = compute_spectrogram(
            &source,
            &SpectrogramConfig {
                parallel: true,
                ..SpectrogramConfig::new(128, 32)
            },
        )
        .unwrap();
        assert_eq!(parallel.num_frames(), (4000 - 128) / 32 + 1);
        assert!(parallel.rows.iter().all(|row| row.len() == 64));
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_fast_transform_within_tolerance() {
        let samples = sine(8000, 700.0, 0.2);
        let source = AudioSource::from_pcm16(&samples, 8000);
        let direct = compute_spectrogram(&source, &SpectrogramConfig::new(150, 60)).unwrap();
        let fast = compute_spectrogram(
            &source,
            &SpectrogramConfig {
                transform: TransformKind::Fast,
                ..SpectrogramConfig::new(150, 60)
            },
        )
        .unwrap();

        for (d_row, f_row) in direct.rows.iter().zip(&fast.rows) {
            for (d, f) in d_row.iter().zip(f_row) {
                assert!((d - f).abs() <= 1e-6 * d.abs().max(1.0), "direct {} fast {}", d, f);
            }
        }
    }

    #[test]
    fn test_too_many_frames_is_advisory() {
        let source = AudioSource::from_pcm16(&vec![7; 30_010], 8000);
        let config = SpectrogramConfig::new(2, 1);
        let mut sink: Vec<Vec<f64>> = Vec::new();

        let report = generate_spectrogram(&source, &mut sink, &config).unwrap();
        assert_eq!(report.num_frames, 30_009);
        assert_eq!(sink.len(), 30_009);
        assert_eq!(
            report.advisories,
            vec![Advisory::TooManyFrames {
                num_frames: 30_009,
                threshold: 30_000
            }]
        );
    }

    #[test]
    fn test_in_memory_spectrogram_carries_advisories() {
        let source = AudioSource::from_pcm16(&vec![7; 30_010], 8000);
        let spectrogram = compute_spectrogram(&source, &SpectrogramConfig::new(2, 1)).unwrap();
        assert_eq!(spectrogram.num_frames(), 30_009);
        assert_eq!(
            spectrogram.advisories,
            vec![Advisory::TooManyFrames {
                num_frames: 30_009,
                threshold: 30_000
            }]
        );

        let short = compute_spectrogram(&source, &SpectrogramConfig::new(256, 128)).unwrap();
        assert!(short.advisories.is_empty());
    }

    #[test]
    fn test_text_sink_output_format() {
        let source = AudioSource::from_pcm16(&vec![0; 8], 8000);
        let mut writer = TextRowWriter::new(Vec::new());
        let report =
            generate_spectrogram(&source, &mut writer, &SpectrogramConfig::new(4, 4)).unwrap();
        assert_eq!(report.num_frames, 2);
        assert_eq!(report.num_bins, 2);
        assert_eq!(report.metadata.num_samples, 8);

        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "-120.000000 -120.000000 \n-120.000000 -120.000000 \n");
    }

    #[test]
    fn test_decode_wav_round_trips_samples() {
        let dir = scratch_dir("decode");
        let wav = dir.join("tone.wav");
        let samples = sine(22050, 441.0, 0.05);
        write_wav(&wav, &samples, 22050, 1);

        let source = decode_audio(&wav).unwrap();
        assert_eq!(source.sample_rate, 22050);
        assert_eq!(source.bits_per_sample, 16);
        assert_eq!(source, AudioSource::from_pcm16(&samples, 22050));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_decode_rejects_stereo() {
        let dir = scratch_dir("stereo");
        let wav = dir.join("stereo.wav");
        write_wav(&wav, &[0, 0, 1, 1, 2, 2], 8000, 2);

        assert!(matches!(
            decode_audio(&wav),
            Err(SpectrogramError::InvalidParameters(_))
        ));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_decode_rejects_24_bit() {
        let dir = scratch_dir("depth24");
        let wav = dir.join("depth24.wav");
        write_wav_with_depth(&wav, &[0, 1 << 20, -(1 << 20), 42], 8000, 1, 24);

        assert!(matches!(
            decode_audio(&wav),
            Err(SpectrogramError::InvalidParameters(_))
        ));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_pipeline_matches_in_memory_rows() {
        let dir = scratch_dir("pipeline");
        let wav = dir.join("tone.wav");
        let out = dir.join("tone.txt");
        let samples = sine(8000, 500.0, 0.25);
        write_wav(&wav, &samples, 8000, 1);

        let config = SpectrogramConfig::new(256, 128);
        let report = generate_spectrogram_file(&wav, &out, &config).unwrap();

        let expected = compute_spectrogram(&AudioSource::from_pcm16(&samples, 8000), &config)
            .unwrap();
        let expected_text: String = expected.rows.iter().map(|row| format_row(row)).collect();

        assert_eq!(report.num_frames, expected.num_frames());
        assert_eq!(fs::read_to_string(&out).unwrap(), expected_text);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_pipeline_is_byte_identical_across_runs() {
        let dir = scratch_dir("idempotent");
        let wav = dir.join("tone.wav");
        let first = dir.join("first.txt");
        let second = dir.join("second.txt");
        write_wav(&wav, &sine(8000, 300.0, 0.2), 8000, 1);

        let config = SpectrogramConfig {
            windowing_scope: WindowingScope::Shared,
            ..SpectrogramConfig::new(128, 64)
        };
        generate_spectrogram_file(&wav, &first, &config).unwrap();
        generate_spectrogram_file(&wav, &second, &config).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_pipeline_validation_failure_creates_no_output() {
        let dir = scratch_dir("invalid");
        let wav = dir.join("short.wav");
        let out = dir.join("short.txt");
        write_wav(&wav, &[1; 100], 8000, 1);

        let result = generate_spectrogram_file(&wav, &out, &SpectrogramConfig::new(256, 128));
        assert!(matches!(result, Err(SpectrogramError::InvalidParameters(_))));
        assert!(!out.exists());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_pipeline_missing_source() {
        let dir = scratch_dir("missing");
        let out = dir.join("out.txt");
        let result = generate_spectrogram_file(&dir.join("absent.wav"), &out, &SpectrogramConfig::default());
        assert!(matches!(result, Err(SpectrogramError::SourceUnavailable(_))));
        assert!(!out.exists());

        fs::remove_dir_all(&dir).ok();
    }
}
