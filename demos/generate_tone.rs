//! Example: Write a test tone as a mono 16-bit WAV file
//!
//! Usage:
//!   cargo run --example generate_tone -- \
//!       <sampleRate> <bitDepth> <waveType> <frequency> <amplitude> <duration> <out.wav>
//!
//! `waveType` is one of `sine`, `square`, `triangle`, `sawtooth`. Only a
//! bit depth of 16 is supported.

use spectrogram_dsp::synthesis::tone::{generate_tone, ToneSpec, Waveform};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 8 {
        eprintln!(
            "Usage: {} <sampleRate> <bitDepth> <waveType> <frequency> <amplitude> <duration> <outputFile>",
            args.first().map(String::as_str).unwrap_or("generate_tone")
        );
        std::process::exit(1);
    }

    let bit_depth: u16 = args[2].parse()?;
    if bit_depth != 16 {
        eprintln!("Error: only 16-bit output is supported, got {}", bit_depth);
        std::process::exit(1);
    }

    let spec = ToneSpec {
        sample_rate: args[1].parse()?,
        waveform: args[3].parse::<Waveform>()?,
        frequency: args[4].parse()?,
        amplitude: args[5].parse()?,
        duration_seconds: args[6].parse()?,
    };
    let samples = generate_tone(&spec)?;

    let wav_spec = hound::WavSpec {
        channels: 1,
        sample_rate: spec.sample_rate,
        bits_per_sample: bit_depth,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&args[7], wav_spec)?;
    for &s in &samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;

    println!("WAV file successfully generated: {}", args[7]);
    Ok(())
}
