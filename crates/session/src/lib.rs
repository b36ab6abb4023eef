//! Event-driven streaming transcription sessions.
//!
//! A [`TranscriptionSession`] turns an ordered queue of audio/control
//! events into an ordered stream of [`TranscriptEvent`]s. It owns a
//! bounded rolling window of recent audio, invokes a
//! [`RecognitionEngine`] on a fixed sample-count cadence for partial
//! hypotheses, and finalizes the full window on FLUSH/END. Successive
//! hypotheses are merged by the greedy suffix/prefix [`stitch`]er so the
//! running text only grows within an utterance segment.
//!
//! Sessions are independent single-threaded actors: one bounded queue, one
//! consumer loop, at most one engine call in flight per session.

mod config;
mod event;
mod session;
mod stitch;

pub use config::SessionConfig;
pub use event::TranscriptEvent;
pub use session::{SessionHandle, TranscriptionSession};
pub use stitch::stitch;

pub use murmur_audio::{ConfigError, InvalidFrameError};
pub use murmur_stt::{EngineError, RecognitionEngine};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Invalid construction parameters. Fatal, raised before any event is
    /// processed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Malformed audio frame. Reported per event; the session keeps
    /// processing subsequent events.
    #[error(transparent)]
    InvalidFrame(#[from] InvalidFrameError),
    /// The engine failed while producing the authoritative hypothesis for
    /// an utterance segment. Session state is cleared before this
    /// surfaces.
    #[error("recognition engine failed: {0}")]
    Engine(#[from] EngineError),
    /// The session has terminated and no longer accepts events.
    #[error("session ended")]
    Ended,
}
