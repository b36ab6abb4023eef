//! Recognition engine boundary for streaming transcription.
//!
//! The engine is an opaque collaborator: mono f32 waveform in, text
//! hypothesis out. Sessions hold it behind [`RecognitionEngine`] so
//! model-backed, remote, and stubbed engines are interchangeable.

mod engine;
mod stub;

pub use engine::{BlockingEngine, RecognitionEngine};
pub use stub::{DurationEngine, FailingEngine, FixedTextEngine};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("recognition failed: {0}")]
    Recognition(String),
    #[error("invalid audio format")]
    InvalidAudioFormat,
}

pub type Result<T> = std::result::Result<T, EngineError>;
