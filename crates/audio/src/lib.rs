//! Bounded rolling buffer for PCM16 mono audio.
//!
//! The [`RollingWindow`] keeps only the most recent `window_ms` worth of
//! samples, evicting oldest-first as new frames arrive. Reads come in two
//! resolutions: the full window (for finalization) or a tail of the latest
//! N milliseconds (for low-latency partial decoding).

mod wav;
mod window;

pub use wav::{pcm16_bytes, read_wav_mono, WavError};
pub use window::{RollingWindow, WindowConfig};

/// Invalid window construction parameters.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("window duration must be greater than zero")]
    WindowDuration,
    #[error("sample rate must be greater than zero")]
    SampleRate,
    #[error("only mono audio is supported (channels=1), got {0}")]
    Channels(u16),
}

/// A frame whose byte length is not a whole number of PCM16 samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("frame of {0} bytes is not a whole number of PCM16 samples")]
pub struct InvalidFrameError(pub usize);
