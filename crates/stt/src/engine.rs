use std::sync::Arc;

use async_trait::async_trait;

/// Opaque speech recognizer: waveform in, text hypothesis out.
///
/// Calls may be arbitrarily slow; a session never runs two of its own calls
/// concurrently, but one engine may serve many sessions at once, so
/// implementations must be `Send + Sync`.
#[async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Transcribe a mono f32 waveform in [-1, 1].
    async fn recognize(&self, waveform: &[f32], sample_rate_hz: u32) -> crate::Result<String>;

    /// Human-readable engine name, for logs.
    fn name(&self) -> &str {
        "engine"
    }
}

/// Adapter that runs a synchronous recognizer on the blocking thread pool.
///
/// Most model bindings expose a blocking `&[f32] -> String` call; wrapping
/// them here keeps the async session loop from stalling the runtime.
pub struct BlockingEngine<F> {
    recognize: Arc<F>,
    name: String,
}

impl<F> BlockingEngine<F>
where
    F: Fn(&[f32], u32) -> crate::Result<String> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, recognize: F) -> Self {
        Self {
            recognize: Arc::new(recognize),
            name: name.into(),
        }
    }
}

#[async_trait]
impl<F> RecognitionEngine for BlockingEngine<F>
where
    F: Fn(&[f32], u32) -> crate::Result<String> + Send + Sync + 'static,
{
    async fn recognize(&self, waveform: &[f32], sample_rate_hz: u32) -> crate::Result<String> {
        tracing::debug!(engine = %self.name, samples = waveform.len(), "dispatching blocking recognition");
        let recognize = Arc::clone(&self.recognize);
        let waveform = waveform.to_vec();
        tokio::task::spawn_blocking(move || recognize(&waveform, sample_rate_hz))
            .await
            .map_err(|e| crate::EngineError::Recognition(e.to_string()))?
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blocking_engine_runs_closure() {
        let engine = BlockingEngine::new("len", |waveform: &[f32], _sr| {
            Ok(format!("{} samples", waveform.len()))
        });
        let text = engine.recognize(&[0.0; 160], 16000).await.unwrap();
        assert_eq!(text, "160 samples");
        assert_eq!(engine.name(), "len");
    }

    #[tokio::test]
    async fn test_blocking_engine_propagates_error() {
        let engine = BlockingEngine::new("bad", |_: &[f32], _| {
            Err(crate::EngineError::InvalidAudioFormat)
        });
        let err = engine.recognize(&[], 16000).await.unwrap_err();
        assert!(matches!(err, crate::EngineError::InvalidAudioFormat));
    }
}
