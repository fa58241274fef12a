use super::cheer;
use super::local::{LocalSpeech, SynthEngine};
use crate::tts::wav;
use bytes::Bytes;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// How an utterance request ended up being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// Played the remote recording.
    Remote,
    /// Fell back to on-device synthesis.
    Local,
    /// Nothing played: failure with silent fallback, or superseded.
    Silent,
    /// The sink refused to start playback (autoplay policy).
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Local,
    Silent,
}

#[derive(Debug, Clone)]
pub struct SpeakOptions {
    pub prefer_remote: bool,
    pub remote_timeout: Duration,
    pub fallback: Fallback,
}

impl Default for SpeakOptions {
    fn default() -> Self {
        Self {
            prefer_remote: true,
            remote_timeout: Duration::from_secs(5),
            fallback: Fallback::Silent,
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("tts http {0}")]
    Status(u16),
    #[error("tts transport: {0}")]
    Transport(String),
    #[error("tts timed out")]
    TimedOut,
}

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("playback blocked by autoplay policy")]
    AutoplayBlocked,
    #[error("playback failed: {0}")]
    Failed(String),
}

/// Fetches a WAV recording for a word from the TTS gateway.
pub trait FetchWav: Send + Sync {
    fn fetch(
        &self,
        text: &str,
        voice: &str,
        speed: f64,
    ) -> impl Future<Output = Result<Bytes, FetchError>> + Send;
}

/// Plays decoded WAV audio. `stop` silences the current playback, if any.
pub trait PlaybackSink: Send + Sync {
    fn play(&self, audio: Arc<Bytes>) -> impl Future<Output = Result<(), PlayError>> + Send;
    fn stop(&self);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    voice: String,
    speed_bits: u64,
}

impl CacheKey {
    fn new(text: &str, voice: &str, speed: f64) -> Self {
        Self {
            text: text.to_string(),
            voice: voice.to_string(),
            speed_bits: speed.to_bits(),
        }
    }
}

/// Orchestrates read-aloud requests: remote recording first (cached per
/// word/voice/speed), on-device synthesis or silence as fallback. Each new
/// request supersedes the previous one; at most one playback is honored at a
/// time.
pub struct SpeechPlayer<F, P, E>
where
    F: FetchWav,
    P: PlaybackSink,
    E: SynthEngine,
{
    fetch: F,
    sink: P,
    local: LocalSpeech<E>,
    voice: String,
    speed: f64,
    cache: DashMap<CacheKey, Arc<Bytes>>,
    seq: AtomicU64,
    active: watch::Sender<u64>,
}

impl<F, P, E> SpeechPlayer<F, P, E>
where
    F: FetchWav,
    P: PlaybackSink,
    E: SynthEngine,
{
    pub fn new(fetch: F, sink: P, engine: E, voice: impl Into<String>, speed: f64) -> Self {
        Self {
            fetch,
            sink,
            local: LocalSpeech::new(engine),
            voice: voice.into(),
            speed,
            cache: DashMap::new(),
            seq: AtomicU64::new(0),
            active: watch::channel(0).0,
        }
    }

    /// Speak `text`, superseding any in-flight request.
    pub async fn speak(&self, text: &str, opts: &SpeakOptions) -> SpeakOutcome {
        let seq = self.begin_request();
        debug!(text, seq, "Speak requested");

        if opts.prefer_remote {
            match self.fetch_remote(text, seq, opts.remote_timeout).await {
                Ok(Some(audio)) => {
                    if self.superseded(seq) {
                        return SpeakOutcome::Silent;
                    }
                    match self.sink.play(audio).await {
                        Ok(()) => {
                            if self.superseded(seq) {
                                // A newer request arrived while we were
                                // starting up; make sure nothing overlaps.
                                self.sink.stop();
                                return SpeakOutcome::Silent;
                            }
                            return SpeakOutcome::Remote;
                        }
                        Err(PlayError::AutoplayBlocked) => {
                            debug!(text, "Playback blocked by autoplay policy");
                            return SpeakOutcome::Blocked;
                        }
                        Err(e) => {
                            warn!(text, error = %e, "Playback failed, trying fallback");
                        }
                    }
                }
                // Superseded mid-fetch.
                Ok(None) => return SpeakOutcome::Silent,
                Err(e) => {
                    debug!(text, error = %e, "Remote fetch failed, trying fallback");
                }
            }
        }

        if !self.superseded(seq) && opts.fallback == Fallback::Local {
            self.local.speak_chinese(text);
            return SpeakOutcome::Local;
        }
        SpeakOutcome::Silent
    }

    /// Warm the audio cache for `text` without playing anything.
    pub async fn prefetch(&self, text: &str) -> Result<(), FetchError> {
        let key = CacheKey::new(text, &self.voice, self.speed);
        if self.cache.contains_key(&key) {
            return Ok(());
        }
        let audio = self.fetch.fetch(text, &self.voice, self.speed).await?;
        self.cache.insert(key, Arc::new(audio));
        Ok(())
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Play the round-completion jingle through the sink.
    pub async fn play_cheer(&self) -> Result<(), PlayError> {
        let audio = wav::from_samples(&cheer::cheer_samples(cheer::SAMPLE_RATE), cheer::SAMPLE_RATE);
        self.sink.play(Arc::new(Bytes::from(audio))).await
    }

    /// Bump the sequence counter, signal anything in flight, and silence the
    /// outputs. Returns this request's sequence number.
    fn begin_request(&self) -> u64 {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.active.send_replace(seq);
        self.sink.stop();
        self.local.cancel();
        seq
    }

    fn superseded(&self, seq: u64) -> bool {
        *self.active.borrow() != seq
    }

    /// Fetch the recording, honoring the cache, the timeout, and the
    /// supersede signal. `Ok(None)` means a newer request took over.
    async fn fetch_remote(
        &self,
        text: &str,
        seq: u64,
        timeout: Duration,
    ) -> Result<Option<Arc<Bytes>>, FetchError> {
        let key = CacheKey::new(text, &self.voice, self.speed);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Some(hit.value().clone()));
        }

        let mut active = self.active.subscribe();
        let superseded = async {
            loop {
                if *active.borrow_and_update() != seq {
                    return;
                }
                if active.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        };

        let fetched = tokio::select! {
            res = tokio::time::timeout(timeout, self.fetch.fetch(text, &self.voice, self.speed)) => {
                match res {
                    Ok(Ok(bytes)) => bytes,
                    Ok(Err(e)) => return Err(e),
                    Err(_) => return Err(FetchError::TimedOut),
                }
            }
            _ = superseded => return Ok(None),
        };

        let audio = Arc::new(fetched);
        self.cache.insert(key, audio.clone());
        Ok(Some(audio))
    }
}
