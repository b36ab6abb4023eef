//! The transcription session state machine.
//!
//! One session is a single-threaded actor: a bounded queue of inbound
//! audio/control events feeds one consumer loop that never overlaps two
//! engine invocations. Sessions share nothing, so no cross-session locking
//! exists anywhere in this crate.

use std::sync::Arc;

use async_stream::stream;
use futures::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use murmur_audio::RollingWindow;
use murmur_stt::{EngineError, RecognitionEngine};

use crate::stitch::stitch;
use crate::{SessionConfig, SessionError, TranscriptEvent};

/// Inbound events, consumed strictly in arrival order.
#[derive(Debug)]
enum Input {
    /// Little-endian PCM16 mono frame.
    Audio(Vec<u8>),
    /// Finalize the current utterance segment; the session stays open.
    Flush,
    /// Finalize, then terminate the session.
    End,
}

/// Outcome of one engine invocation.
enum Recognized {
    /// Trimmed hypothesis text, possibly empty.
    Text(String),
    /// The session was aborted mid-call; the call was abandoned.
    Aborted,
}

/// Producer-side handle to a running session.
///
/// Cloneable. `feed_audio` suspends while the session's queue is full,
/// applying backpressure to the audio source. Dropping every handle without
/// calling [`end`](Self::end) synthesizes an implicit END so buffered audio
/// is finalized exactly once (e.g. on abrupt transport disconnect).
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Input>,
    cancel: CancellationToken,
}

impl SessionHandle {
    /// Queue a little-endian PCM16 mono frame.
    pub async fn feed_audio(&self, frame: impl Into<Vec<u8>>) -> Result<(), SessionError> {
        self.send(Input::Audio(frame.into())).await
    }

    /// Queue a FLUSH control event.
    pub async fn flush(&self) -> Result<(), SessionError> {
        self.send(Input::Flush).await
    }

    /// Queue an END control event.
    pub async fn end(&self) -> Result<(), SessionError> {
        self.send(Input::End).await
    }

    /// Abandon the session immediately.
    ///
    /// Any in-flight engine call is dropped, no FINAL is emitted, and the
    /// output stream terminates.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    async fn send(&self, input: Input) -> Result<(), SessionError> {
        self.tx.send(input).await.map_err(|_| SessionError::Ended)
    }
}

/// Streaming transcription session for one utterance.
///
/// Construct with [`new`](Self::new), then call [`run`](Self::run) and
/// consume the returned stream while feeding the [`SessionHandle`].
pub struct TranscriptionSession {
    utterance_id: String,
    config: SessionConfig,
    engine: Arc<dyn RecognitionEngine>,
    window: RollingWindow,
    stride_samples: usize,
    since_emit: usize,
    hypothesis: String,
    revision: u64,
    rx: mpsc::Receiver<Input>,
    cancel: CancellationToken,
}

impl TranscriptionSession {
    /// Build a session for the given utterance id.
    ///
    /// Fails with [`SessionError::Config`] on invalid audio parameters.
    pub fn new(
        utterance_id: impl Into<String>,
        engine: Arc<dyn RecognitionEngine>,
        config: SessionConfig,
    ) -> Result<(SessionHandle, Self), SessionError> {
        let window = RollingWindow::new(config.window_config())?;
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let cancel = CancellationToken::new();

        let handle = SessionHandle {
            tx,
            cancel: cancel.clone(),
        };
        let session = Self {
            utterance_id: utterance_id.into(),
            stride_samples: config.stride_samples(),
            config,
            engine,
            window,
            since_emit: 0,
            hypothesis: String::new(),
            revision: 0,
            rx,
            cancel,
        };
        Ok((handle, session))
    }

    /// Like [`new`](Self::new) with a generated v4 utterance id.
    pub fn with_random_id(
        engine: Arc<dyn RecognitionEngine>,
        config: SessionConfig,
    ) -> Result<(SessionHandle, Self), SessionError> {
        Self::new(Uuid::new_v4().to_string(), engine, config)
    }

    pub fn utterance_id(&self) -> &str {
        &self.utterance_id
    }

    /// Consume events and yield transcript events in order.
    ///
    /// `Err` items carry two severities: [`SessionError::InvalidFrame`] is
    /// non-terminal and the stream continues, while [`SessionError::Engine`]
    /// means the authoritative decode for an utterance segment failed.
    /// State is cleared before that error surfaces, and the stream
    /// terminates only when the failure happened on END.
    pub fn run(mut self) -> impl Stream<Item = Result<TranscriptEvent, SessionError>> {
        stream! {
            tracing::debug!(
                utterance = %self.utterance_id,
                engine = self.engine.name(),
                "session started"
            );

            'session: loop {
                let input = tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => {
                        tracing::debug!(utterance = %self.utterance_id, "session aborted");
                        break 'session;
                    }
                    // A closed queue means every handle is gone; finalize
                    // once via an implicit END.
                    input = self.rx.recv() => input.unwrap_or(Input::End),
                };

                match input {
                    Input::Audio(frame) => {
                        let appended = match self.window.append(&frame) {
                            Ok(n) => n,
                            Err(err) => {
                                tracing::warn!(
                                    utterance = %self.utterance_id,
                                    %err,
                                    "rejected audio frame"
                                );
                                yield Err(SessionError::InvalidFrame(err));
                                continue;
                            }
                        };
                        if !self.config.emit_partials {
                            continue;
                        }

                        self.since_emit += appended;
                        // A large frame can cross several stride boundaries;
                        // each cycle re-reads the then-current tail.
                        while self.since_emit >= self.stride_samples {
                            self.since_emit -= self.stride_samples;
                            let tail = self.window.tail_f32(None);
                            match self.recognize(tail).await {
                                Ok(Recognized::Aborted) => break 'session,
                                Ok(Recognized::Text(text)) if !text.is_empty() => {
                                    self.hypothesis = stitch(&self.hypothesis, &text);
                                    yield Ok(self.next_event(false));
                                }
                                Ok(Recognized::Text(_)) => {}
                                Err(err) => {
                                    // Partials are advisory; a failed decode
                                    // is skipped, the FINAL still covers this
                                    // audio.
                                    tracing::warn!(
                                        utterance = %self.utterance_id,
                                        %err,
                                        "partial recognition failed"
                                    );
                                }
                            }
                        }
                    }

                    control @ (Input::Flush | Input::End) => {
                        let ending = matches!(control, Input::End);
                        let full = self.window.full_f32();

                        let text = if full.is_empty() {
                            String::new()
                        } else {
                            match self.recognize(full).await {
                                Ok(Recognized::Aborted) => break 'session,
                                Ok(Recognized::Text(text)) => text,
                                Err(err) => {
                                    // The authoritative decode failed. Clear
                                    // state first so the next utterance does
                                    // not inherit a corrupted window.
                                    self.reset_utterance();
                                    yield Err(SessionError::Engine(err));
                                    if ending {
                                        break 'session;
                                    }
                                    continue;
                                }
                            }
                        };

                        if !text.is_empty() {
                            self.hypothesis = stitch(&self.hypothesis, &text);
                        }
                        if !self.hypothesis.is_empty() {
                            yield Ok(self.next_event(true));
                        }
                        self.reset_utterance();

                        if ending {
                            tracing::debug!(utterance = %self.utterance_id, "session ended");
                            break 'session;
                        }
                    }
                }
            }
        }
    }

    /// Invoke the engine, abandoning the call if the session is aborted.
    async fn recognize(&self, waveform: Vec<f32>) -> Result<Recognized, EngineError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Ok(Recognized::Aborted),
            result = self.engine.recognize(&waveform, self.config.sample_rate_hz) => {
                result.map(|text| Recognized::Text(text.trim().to_string()))
            }
        }
    }

    fn next_event(&mut self, is_final: bool) -> TranscriptEvent {
        self.revision += 1;
        TranscriptEvent {
            utterance_id: self.utterance_id.clone(),
            revision: self.revision,
            text: self.hypothesis.clone(),
            is_final,
        }
    }

    /// Reset per-segment state after a FINAL (or a failed one).
    fn reset_utterance(&mut self) {
        self.window.clear();
        self.since_emit = 0;
        self.hypothesis.clear();
    }
}
