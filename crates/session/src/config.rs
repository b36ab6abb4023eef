use murmur_audio::WindowConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a [`TranscriptionSession`](crate::TranscriptionSession).
///
/// Supplied at construction; sessions never read the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sample rate of incoming PCM16 frames.
    pub sample_rate_hz: u32,
    /// How much recent audio the rolling window retains.
    pub window_ms: u32,
    /// Tail duration decoded for partial hypotheses.
    pub tail_ms: u32,
    /// Cadence at which partial hypotheses are recomputed.
    pub stride_ms: u32,
    /// Emit PARTIAL events between finals. Off by default (final-only).
    pub emit_partials: bool,
    /// Bound on the inbound event queue; producers suspend when full.
    pub queue_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 16000,
            window_ms: 3000,
            tail_ms: 2000,
            stride_ms: 400,
            emit_partials: false,
            queue_capacity: 512,
        }
    }
}

impl SessionConfig {
    /// Stride length in samples, never zero.
    pub(crate) fn stride_samples(&self) -> usize {
        ((self.sample_rate_hz as u64 * self.stride_ms as u64 / 1000).max(1)) as usize
    }

    pub(crate) fn window_config(&self) -> WindowConfig {
        WindowConfig {
            window_ms: self.window_ms,
            sample_rate_hz: self.sample_rate_hz,
            channels: 1,
            default_tail_ms: self.tail_ms,
        }
    }
}
