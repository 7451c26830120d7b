//! Live capture session over a platform-provided frequency source.
//!
//! The session runs a sampling loop whose lifetime is tied to an explicit
//! stop signal, not to garbage collection: `stop` (or dropping the session)
//! flips a watch channel, the loop winds down, and the source is closed on
//! every exit path — stop, sampling error, or panic-free task completion.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use sonara_core::models::audio::AudioFeatures;

use crate::error::AudioError;
use crate::features::features_from_transcript;

/// Human voice band; dominant-frequency samples outside it are artifacts.
pub const MIN_VOICE_HZ: f64 = 85.0;
pub const MAX_VOICE_HZ: f64 = 255.0;

/// Rolling window of pitch samples kept for the variation estimate.
pub const PITCH_HISTORY_LIMIT: usize = 100;

/// A platform-provided microphone/stream handle delivering frequency-domain
/// samples. Device permissions and hardware access live behind this trait.
#[async_trait]
pub trait FrequencySource: Send + Sync {
    /// The dominant frequency (Hz) of the current analysis window.
    async fn sample(&self) -> Result<f64, AudioError>;

    /// Release the underlying capture resource. Must be idempotent.
    async fn close(&self);
}

#[derive(Debug, Default)]
struct PitchHistory {
    samples: VecDeque<f64>,
    last_valid: Option<f64>,
}

impl PitchHistory {
    /// Record a sample. Out-of-band values are replaced by the previous
    /// valid sample rather than entering the history raw; with no prior
    /// valid sample they are dropped.
    fn push(&mut self, raw_hz: f64) {
        let value = if (MIN_VOICE_HZ..=MAX_VOICE_HZ).contains(&raw_hz) {
            self.last_valid = Some(raw_hz);
            raw_hz
        } else {
            match self.last_valid {
                Some(previous) => previous,
                None => return,
            }
        };
        if self.samples.len() == PITCH_HISTORY_LIMIT {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// Sample standard deviation of the window; `0.0` below two samples.
    fn stddev(&self) -> f64 {
        let n = self.samples.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.samples.iter().sum::<f64>() / n as f64;
        let variance = self
            .samples
            .iter()
            .map(|s| (s - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        variance.sqrt()
    }
}

/// An active capture session.
pub struct CaptureSession {
    history: Arc<Mutex<PitchHistory>>,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl CaptureSession {
    /// Start sampling `source` every `sample_interval`.
    pub fn start(source: Arc<dyn FrequencySource>, sample_interval: Duration) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let history = Arc::new(Mutex::new(PitchHistory::default()));
        let task_history = Arc::clone(&history);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sample_interval);
            loop {
                tokio::select! {
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        match source.sample().await {
                            Ok(hz) => {
                                task_history
                                    .lock()
                                    .unwrap_or_else(PoisonError::into_inner)
                                    .push(hz);
                            }
                            Err(e) => {
                                warn!(error = %e, "frequency sampling failed, ending capture");
                                break;
                            }
                        }
                    }
                }
            }
            source.close().await;
            info!("capture session closed");
        });

        Self {
            history,
            stop: stop_tx,
            task,
        }
    }

    /// Features for the text spoken so far, with pitch statistics taken from
    /// the live history instead of the transcript defaults.
    pub fn current_features(&self, transcript: &str, duration_ms: u64) -> AudioFeatures {
        let mut features = features_from_transcript(transcript, duration_ms);
        let history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mean) = history.mean() {
            features.pitch_hz = mean;
        }
        features.pitch_variation = history.stddev();
        features
    }

    /// Signal the loop to stop and wait for the source to be released.
    pub async fn stop(mut self) {
        let _ = self.stop.send(true);
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "capture task did not shut down cleanly");
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        // A dropped session still winds the loop down; the task closes the
        // source when it observes the signal.
        let _ = self.stop.send(true);
    }
}
