use std::path::{Path, PathBuf};
use std::time::Duration;

use image::GrayImage;
use storage::SharedParticipantStore;
use storage::models::CheckInOutcome;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::{QrError, ScanError};
use crate::qr::decode_qr_image;

pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(250);

/// A device that can hand out a stream of frames.
pub trait Camera: Send + Sync {
    fn acquire(&self) -> Result<Box<dyn FrameSource>, ScanError>;
}

/// An acquired frame stream. Implementations release the underlying device
/// in `Drop`.
pub trait FrameSource: Send {
    /// `Ok(None)` means no frame is ready yet.
    fn next_frame(&mut self) -> Result<Option<GrayImage>, ScanError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Detected(String),
    Cancelled,
}

/// Polls a camera until a QR code is read or the scan is cancelled.
#[derive(Debug, Clone, Copy)]
pub struct QrScanner {
    interval: Duration,
}

impl Default for QrScanner {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_INTERVAL)
    }
}

impl QrScanner {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub async fn scan(&self, camera: &dyn Camera, cancel: CancellationToken) -> Result<ScanOutcome, ScanError> {
        let mut source = camera.acquire()?;
        tracing::info!("Camera acquired, scanning every {:?}", self.interval);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Scan cancelled");
                    return Ok(ScanOutcome::Cancelled);
                }
                _ = ticker.tick() => {
                    let Some(frame) = source.next_frame()? else {
                        continue;
                    };
                    // Decoding is CPU-bound; keep it off the async worker.
                    let decode = tokio::task::spawn_blocking(move || decode_qr_image(&frame));
                    let decoded = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            tracing::info!("Scan cancelled while decoding");
                            return Ok(ScanOutcome::Cancelled);
                        }
                        joined = decode => joined,
                    };
                    match decoded {
                        Ok(Ok(payload)) => {
                            tracing::info!("QR code detected: {}", payload);
                            return Ok(ScanOutcome::Detected(payload));
                        }
                        Ok(Err(QrError::NotFound)) => {}
                        Ok(Err(e)) => tracing::debug!("Unreadable frame: {}", e),
                        Err(e) => tracing::warn!("Frame decode task failed: {}", e),
                    }
                }
            }
        }
    }
}

/// Serves a single still image as every frame.
#[derive(Debug, Clone)]
pub struct ImageFileCamera {
    path: PathBuf,
}

impl ImageFileCamera {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Camera for ImageFileCamera {
    fn acquire(&self) -> Result<Box<dyn FrameSource>, ScanError> {
        let frame = image::open(&self.path)
            .map_err(|e| ScanError::CameraUnavailable(format!("{}: {}", self.path.display(), e)))?
            .to_luma8();
        Ok(Box::new(StillFrame { frame }))
    }
}

struct StillFrame {
    frame: GrayImage,
}

impl FrameSource for StillFrame {
    fn next_frame(&mut self) -> Result<Option<GrayImage>, ScanError> {
        Ok(Some(self.frame.clone()))
    }
}

/// Check in the participant whose id was read from a QR code.
pub async fn check_in_scanned(store: &SharedParticipantStore, payload: &str) -> storage::Result<CheckInOutcome> {
    let outcome = store.write().await.check_in(payload).await?;
    match &outcome {
        CheckInOutcome::CheckedIn(record) => tracing::info!("Checked in {}", record.id),
        CheckInOutcome::AlreadyCheckedIn(record) => tracing::info!("{} was already checked in", record.id),
        CheckInOutcome::NotFound => tracing::warn!("Scanned code '{}' matches no participant", payload.trim()),
    }
    Ok(outcome)
}
