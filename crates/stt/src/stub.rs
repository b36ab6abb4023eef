//! Deterministic stub engines for tests and wiring.

use async_trait::async_trait;

use crate::RecognitionEngine;

/// Returns the same hypothesis for every call.
pub struct FixedTextEngine(pub String);

impl FixedTextEngine {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

#[async_trait]
impl RecognitionEngine for FixedTextEngine {
    async fn recognize(&self, _waveform: &[f32], _sample_rate_hz: u32) -> crate::Result<String> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Returns the input duration as text, e.g. `"50ms"` for 50 ms of audio.
///
/// A deterministic function of input length, useful for exercising cadence
/// and windowing behavior without any model.
#[derive(Default)]
pub struct DurationEngine;

#[async_trait]
impl RecognitionEngine for DurationEngine {
    async fn recognize(&self, waveform: &[f32], sample_rate_hz: u32) -> crate::Result<String> {
        if sample_rate_hz == 0 {
            return Err(crate::EngineError::InvalidAudioFormat);
        }
        let ms = 1000 * waveform.len() as u64 / sample_rate_hz as u64;
        Ok(format!("{ms}ms"))
    }

    fn name(&self) -> &str {
        "duration"
    }
}

/// Fails every call with a recognition error.
pub struct FailingEngine;

#[async_trait]
impl RecognitionEngine for FailingEngine {
    async fn recognize(&self, _waveform: &[f32], _sample_rate_hz: u32) -> crate::Result<String> {
        Err(crate::EngineError::Recognition("stub failure".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
