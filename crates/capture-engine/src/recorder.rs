//! Capture orchestration and the frame counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use framegrab_common::{FramegrabError, FramegrabResult};
use framegrab_platform_core::{DisplayServer, Frame, ScreenDimensions};

use crate::backend::{platform_backend, CaptureBackend};

/// Captures single frames of the primary display and counts completions.
///
/// The counter is owned by the recorder instance rather than being process
/// global, so tests construct a fresh recorder with a fake backend and get
/// a fresh counter. It is updated with an atomic fetch-and-increment; the
/// host may drive one recorder from multiple worker threads.
pub struct Recorder {
    backend: Box<dyn CaptureBackend>,
    frames_captured: AtomicU64,
}

impl Recorder {
    /// Create a recorder over an explicit backend (tests inject fakes here).
    pub fn new(backend: Box<dyn CaptureBackend>) -> Self {
        Self {
            backend,
            frames_captured: AtomicU64::new(0),
        }
    }

    /// Create a recorder over the build target's native backend.
    pub fn system() -> Self {
        Self::new(platform_backend())
    }

    /// The primary display's current dimensions, re-queried from the OS on
    /// every call.
    pub fn screen_dimensions(&self) -> FramegrabResult<ScreenDimensions> {
        self.backend.query_dimensions()
    }

    /// Capture one frame of the primary display.
    ///
    /// Queries the current dimensions, runs the platform capture
    /// synchronously, and increments the frame counter strictly after the
    /// capture completes. A failure at any step leaves the counter
    /// untouched and returns no partial buffer.
    pub fn next_frame(&self) -> FramegrabResult<Frame> {
        let dimensions = self.backend.query_dimensions()?;
        let frame = self.backend.capture_frame(dimensions)?;

        let total = self.frames_captured.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(%frame, total, "captured frame");
        Ok(frame)
    }

    /// Capture one frame, giving up after `timeout`.
    ///
    /// The capture runs on a helper thread; if the native API stalls past
    /// the deadline this returns `Timeout` while the abandoned capture runs
    /// to completion in the background. A capture that completes after the
    /// caller gave up still counts as completed.
    pub fn next_frame_timeout(self: &Arc<Self>, timeout: Duration) -> FramegrabResult<Frame> {
        let recorder = Arc::clone(self);
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("framegrab-capture".to_string())
            .spawn(move || {
                let _ = tx.send(recorder.next_frame());
            })?;

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(FramegrabError::timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(FramegrabError::capture_unavailable(
                "capture thread exited without reporting a result",
            )),
        }
    }

    /// Total completed captures since this recorder was created.
    pub fn frames_count(&self) -> u64 {
        self.frames_captured.load(Ordering::SeqCst)
    }

    /// The display server family behind this recorder's backend.
    pub fn display_server(&self) -> DisplayServer {
        self.backend.display_server()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    struct MockBackend {
        dimensions: ScreenDimensions,
        fail_query: Arc<AtomicBool>,
        fail_capture: Arc<AtomicBool>,
        capture_delay: Option<Duration>,
    }

    impl MockBackend {
        fn fixed(width: u32, height: u32) -> Self {
            Self {
                dimensions: ScreenDimensions::new(width, height),
                fail_query: Arc::new(AtomicBool::new(false)),
                fail_capture: Arc::new(AtomicBool::new(false)),
                capture_delay: None,
            }
        }
    }

    impl CaptureBackend for MockBackend {
        fn query_dimensions(&self) -> FramegrabResult<ScreenDimensions> {
            if self.fail_query.load(Ordering::SeqCst) {
                return Err(FramegrabError::display_query("mock headless session"));
            }
            Ok(self.dimensions)
        }

        fn capture_frame(&self, dimensions: ScreenDimensions) -> FramegrabResult<Frame> {
            if self.fail_capture.load(Ordering::SeqCst) {
                return Err(FramegrabError::capture_unavailable(
                    "mock display disconnected",
                ));
            }
            if let Some(delay) = self.capture_delay {
                thread::sleep(delay);
            }
            Frame::from_rgb(dimensions, vec![0x7F; dimensions.frame_len()])
        }

        fn display_server(&self) -> DisplayServer {
            DisplayServer::Unknown
        }
    }

    #[test]
    fn dimension_query_is_positive_and_idempotent() {
        let recorder = Recorder::new(Box::new(MockBackend::fixed(1920, 1080)));
        let first = recorder.screen_dimensions().unwrap();
        let second = recorder.screen_dimensions().unwrap();
        assert!(first.width > 0 && first.height > 0);
        assert_eq!(first, second);
        // Dimension queries alone never move the counter.
        assert_eq!(recorder.frames_count(), 0);
    }

    #[test]
    fn frames_match_the_normalized_size_contract() {
        let recorder = Recorder::new(Box::new(MockBackend::fixed(1920, 1080)));
        let frame = recorder.next_frame().unwrap();
        assert_eq!(frame.len(), 1920 * 1080 * 3);
        assert_eq!(frame.dimensions(), ScreenDimensions::new(1920, 1080));
    }

    #[test]
    fn counter_increments_once_per_successful_capture() {
        let recorder = Recorder::new(Box::new(MockBackend::fixed(64, 48)));
        assert_eq!(recorder.frames_count(), 0);
        for expected in 1..=5 {
            recorder.next_frame().unwrap();
            assert_eq!(recorder.frames_count(), expected);
        }
    }

    #[test]
    fn failed_capture_does_not_increment_counter() {
        let backend = MockBackend::fixed(64, 48);
        let fail_capture = Arc::clone(&backend.fail_capture);
        let recorder = Recorder::new(Box::new(backend));

        recorder.next_frame().unwrap();
        recorder.next_frame().unwrap();
        assert_eq!(recorder.frames_count(), 2);

        fail_capture.store(true, Ordering::SeqCst);
        let err = recorder.next_frame().unwrap_err();
        assert!(matches!(err, FramegrabError::CaptureUnavailable { .. }));
        assert_eq!(recorder.frames_count(), 2);

        fail_capture.store(false, Ordering::SeqCst);
        recorder.next_frame().unwrap();
        assert_eq!(recorder.frames_count(), 3);
    }

    #[test]
    fn failed_dimension_query_aborts_before_capture() {
        let backend = MockBackend::fixed(64, 48);
        backend.fail_query.store(true, Ordering::SeqCst);
        let recorder = Recorder::new(Box::new(backend));

        let err = recorder.next_frame().unwrap_err();
        assert!(matches!(err, FramegrabError::DisplayQuery { .. }));
        assert_eq!(recorder.frames_count(), 0);
    }

    #[test]
    fn concurrent_captures_never_lose_counts() {
        const THREADS: usize = 8;
        const CAPTURES_PER_THREAD: usize = 25;

        let recorder = Arc::new(Recorder::new(Box::new(MockBackend::fixed(32, 32))));
        let mut handles = Vec::new();
        for _ in 0..THREADS {
            let recorder = Arc::clone(&recorder);
            handles.push(thread::spawn(move || {
                for _ in 0..CAPTURES_PER_THREAD {
                    recorder.next_frame().unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(recorder.frames_count(), (THREADS * CAPTURES_PER_THREAD) as u64);
    }

    #[test]
    fn slow_capture_times_out() {
        let mut backend = MockBackend::fixed(32, 32);
        backend.capture_delay = Some(Duration::from_millis(250));
        let recorder = Arc::new(Recorder::new(Box::new(backend)));

        let err = recorder
            .next_frame_timeout(Duration::from_millis(10))
            .unwrap_err();
        assert!(matches!(err, FramegrabError::Timeout { .. }));
    }

    #[test]
    fn fast_capture_beats_the_deadline() {
        let recorder = Arc::new(Recorder::new(Box::new(MockBackend::fixed(32, 32))));
        let frame = recorder
            .next_frame_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(frame.len(), 32 * 32 * 3);
        assert_eq!(recorder.frames_count(), 1);
    }
}
