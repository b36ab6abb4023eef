//! WAV file ingestion helpers.
//!
//! Utilities for replaying recorded audio through a session: decode a WAV
//! file to mono PCM16 at a target rate, and pack samples back into the
//! little-endian byte frames the window ingests.

use std::path::Path;

/// Errors from WAV decoding.
#[derive(Debug, thiserror::Error)]
pub enum WavError {
    #[error("failed to read wav: {0}")]
    Read(#[from] hound::Error),
    #[error("unsupported wav format: {0}")]
    Unsupported(String),
}

/// Read a WAV file as mono i16 samples at `target_rate_hz`.
///
/// Multi-channel input is downmixed by averaging; sample rates are adapted
/// with linear interpolation.
pub fn read_wav_mono(path: &Path, target_rate_hz: u32) -> Result<Vec<i16>, WavError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(WavError::Unsupported(format!(
            "{:?} {} bits",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let channels = spec.channels.max(1) as usize;
    let raw: Vec<i16> = reader
        .samples::<i16>()
        .collect::<Result<_, _>>()?;

    let mono = downmix_mono(&raw, channels);
    let resampled = resample_linear(&mono, spec.sample_rate, target_rate_hz);
    Ok(resampled.iter().map(|&v| f32_to_sample(v)).collect())
}

/// Pack i16 samples into little-endian PCM16 bytes.
pub fn pcm16_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Downmix interleaved frames to mono f32 in [-1, 1] by averaging.
///
/// A truncated file can leave the last frame short; averaging over the
/// actual frame length keeps that sample unbiased.
fn downmix_mono(raw: &[i16], channels: usize) -> Vec<f32> {
    let channels = channels.max(1);
    let mut mono = Vec::with_capacity(raw.len() / channels);
    for frame in raw.chunks(channels) {
        let sum: i32 = frame.iter().map(|&s| s as i32).sum();
        let avg = sum as f32 / frame.len() as f32;
        mono.push(avg / 32768.0);
    }
    mono
}

/// Resample audio using linear interpolation.
fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate {
        return samples.to_vec();
    }
    let ratio = to_rate as f64 / from_rate as f64;
    let new_len = (samples.len() as f64 * ratio) as usize;
    let mut output = Vec::with_capacity(new_len);
    for i in 0..new_len {
        let src_idx = i as f64 / ratio;
        let idx = src_idx.floor() as usize;
        let frac = src_idx.fract() as f32;
        let sample = if idx + 1 < samples.len() {
            samples[idx] * (1.0 - frac) + samples[idx + 1] * frac
        } else if idx < samples.len() {
            samples[idx]
        } else {
            0.0
        };
        output.push(sample);
    }
    output
}

fn f32_to_sample(v: f32) -> i16 {
    (v * 32768.0).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}
