//! The rolling sample window.
//!
//! Samples are stored as `i16` to keep the window memory-bounded; reads can
//! convert to `f32` in [-1, 1] for engines that want floating-point input.

use std::collections::VecDeque;

use crate::{ConfigError, InvalidFrameError};

/// Full-scale divisor for i16 -> f32 conversion. -32768 maps to exactly
/// -1.0, +32767 to 32767/32768; the result never exceeds 1.0.
const I16_FULL_SCALE: f32 = 32768.0;

/// Configuration for a [`RollingWindow`].
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// How much audio the window retains, in milliseconds.
    pub window_ms: u32,
    /// Sample rate of the incoming PCM16 frames.
    pub sample_rate_hz: u32,
    /// Channel count. Only mono (1) is supported.
    pub channels: u16,
    /// Tail duration used by [`RollingWindow::tail`] when none is given.
    pub default_tail_ms: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_ms: 3000,
            sample_rate_hz: 16000,
            channels: 1,
            default_tail_ms: 2000,
        }
    }
}

/// A bounded rolling window of PCM16 mono samples.
///
/// Appending past capacity evicts the oldest samples, so memory stays
/// constant regardless of how much audio flows through. A monotonic
/// ever-seen counter survives both eviction and [`clear`](Self::clear).
#[derive(Debug)]
pub struct RollingWindow {
    config: WindowConfig,
    capacity_samples: usize,
    samples: VecDeque<i16>,
    total_samples: u64,
}

impl RollingWindow {
    /// Create a window from the given configuration.
    pub fn new(config: WindowConfig) -> Result<Self, ConfigError> {
        if config.window_ms == 0 {
            return Err(ConfigError::WindowDuration);
        }
        if config.sample_rate_hz == 0 {
            return Err(ConfigError::SampleRate);
        }
        if config.channels != 1 {
            return Err(ConfigError::Channels(config.channels));
        }

        let capacity_samples =
            (config.sample_rate_hz as u64 * config.window_ms as u64 / 1000) as usize;

        Ok(Self {
            config,
            capacity_samples,
            samples: VecDeque::with_capacity(capacity_samples),
            total_samples: 0,
        })
    }

    // --- Append & read ---

    /// Append a little-endian PCM16 mono frame.
    ///
    /// Returns the number of samples appended. Oldest samples beyond
    /// capacity are evicted. The ever-seen counter grows by the decoded
    /// sample count whether or not anything was evicted.
    pub fn append(&mut self, pcm16_le: &[u8]) -> Result<usize, InvalidFrameError> {
        if pcm16_le.len() % 2 != 0 {
            return Err(InvalidFrameError(pcm16_le.len()));
        }

        // A sub-millisecond window can compute to zero capacity; it stores
        // nothing, but decoded samples still count as seen.
        if self.capacity_samples > 0 {
            for pair in pcm16_le.chunks_exact(2) {
                if self.samples.len() == self.capacity_samples {
                    self.samples.pop_front();
                }
                self.samples.push_back(i16::from_le_bytes([pair[0], pair[1]]));
            }
        }

        let appended = pcm16_le.len() / 2;
        self.total_samples += appended as u64;
        Ok(appended)
    }

    /// The most recent `ms` of samples, oldest-first.
    ///
    /// `None` uses the configured default tail. Never returns more samples
    /// than are currently present.
    pub fn tail(&self, ms: Option<u32>) -> Vec<i16> {
        let take = self.tail_len(ms);
        self.samples
            .iter()
            .skip(self.samples.len() - take)
            .copied()
            .collect()
    }

    /// Like [`tail`](Self::tail), converted to f32 in [-1, 1].
    pub fn tail_f32(&self, ms: Option<u32>) -> Vec<f32> {
        let take = self.tail_len(ms);
        self.samples
            .iter()
            .skip(self.samples.len() - take)
            .map(|&s| sample_to_f32(s))
            .collect()
    }

    /// Everything currently in the window, oldest-first.
    pub fn full(&self) -> Vec<i16> {
        self.samples.iter().copied().collect()
    }

    /// Like [`full`](Self::full), converted to f32 in [-1, 1].
    pub fn full_f32(&self) -> Vec<f32> {
        self.samples.iter().map(|&s| sample_to_f32(s)).collect()
    }

    /// Drop everything in the window.
    ///
    /// The ever-seen counter is intentionally left untouched.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    // --- Queries ---

    /// Maximum number of samples the window retains.
    pub fn capacity_samples(&self) -> usize {
        self.capacity_samples
    }

    /// Number of samples currently stored (<= capacity).
    pub fn current_samples(&self) -> usize {
        self.samples.len()
    }

    /// Duration currently held, in milliseconds (floored).
    pub fn current_duration_ms(&self) -> u64 {
        1000 * self.samples.len() as u64 / self.config.sample_rate_hz as u64
    }

    /// Samples ever appended to this window (monotonic, survives clear).
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    fn tail_len(&self, ms: Option<u32>) -> usize {
        let ms = ms.unwrap_or(self.config.default_tail_ms);
        let wanted = (self.config.sample_rate_hz as u64 * ms as u64 / 1000) as usize;
        wanted.min(self.samples.len())
    }
}

fn sample_to_f32(s: i16) -> f32 {
    s as f32 / I16_FULL_SCALE
}
