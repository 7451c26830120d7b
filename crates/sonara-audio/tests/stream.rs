use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use sonara_audio::error::AudioError;
use sonara_audio::stream::{CaptureSession, FrequencySource};

/// Cycles through a fixed sample sequence, repeating the final value.
struct FakeSource {
    samples: Vec<f64>,
    cursor: AtomicUsize,
    closed: Arc<AtomicBool>,
}

impl FakeSource {
    fn new(samples: Vec<f64>, closed: Arc<AtomicBool>) -> Self {
        Self {
            samples,
            cursor: AtomicUsize::new(0),
            closed,
        }
    }
}

#[async_trait]
impl FrequencySource for FakeSource {
    async fn sample(&self) -> Result<f64, AudioError> {
        let i = self.cursor.fetch_add(1, Ordering::SeqCst);
        let i = i.min(self.samples.len() - 1);
        Ok(self.samples[i])
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

struct FailingSource {
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl FrequencySource for FailingSource {
    async fn sample(&self) -> Result<f64, AudioError> {
        Err(AudioError::Capture("device unplugged".into()))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn live_history_overrides_pitch_defaults() {
    let closed = Arc::new(AtomicBool::new(false));
    let source = Arc::new(FakeSource::new(vec![140.0, 160.0], closed.clone()));

    let session = CaptureSession::start(source, Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(60)).await;

    let features = session.current_features("still talking along here", 10_000);
    // History is 140 then repeated 160s; the mean sits strictly between.
    assert!(features.pitch_hz > 140.0 && features.pitch_hz < 161.0);
    assert!(features.pitch_variation > 0.0);

    session.stop().await;
    assert!(closed.load(Ordering::SeqCst), "source must be released on stop");
}

#[tokio::test]
async fn out_of_band_samples_reuse_previous_valid_pitch() {
    let closed = Arc::new(AtomicBool::new(false));
    // 150 is valid; 500 and 40 are outside the voice band and must be
    // replaced by the previous valid sample.
    let source = Arc::new(FakeSource::new(vec![150.0, 500.0, 40.0], closed.clone()));

    let session = CaptureSession::start(source, Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(60)).await;

    let features = session.current_features("words", 5_000);
    assert!((features.pitch_hz - 150.0).abs() < 1e-9);
    assert_eq!(features.pitch_variation, 0.0);

    session.stop().await;
}

#[tokio::test]
async fn sampling_failure_still_releases_the_source() {
    let closed = Arc::new(AtomicBool::new(false));
    let session = CaptureSession::start(
        Arc::new(FailingSource {
            closed: closed.clone(),
        }),
        Duration::from_millis(5),
    );

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(
        closed.load(Ordering::SeqCst),
        "source must be released when sampling errors end the loop"
    );

    session.stop().await;
}

#[tokio::test]
async fn dropping_a_session_releases_the_source() {
    let closed = Arc::new(AtomicBool::new(false));
    let source = Arc::new(FakeSource::new(vec![150.0], closed.clone()));

    let session = CaptureSession::start(source, Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(20)).await;
    drop(session);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(closed.load(Ordering::SeqCst), "source must be released on drop");
}
