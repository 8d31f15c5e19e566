//! Frame-rate monitoring
//!
//! [`FrameStats`] is an optional observer: the application owns it as a
//! `Box<dyn FrameObserver>` and nothing in the animation code depends on it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Receives frame boundaries from the frame driver
pub trait FrameObserver {
    /// A frame is about to be simulated and drawn
    fn frame_begin(&mut self, now: Instant);

    /// The frame has been submitted
    fn frame_end(&mut self, now: Instant);

    /// Short human-readable summary, if one is available yet
    fn summary(&self) -> Option<String> {
        None
    }
}

/// Frame timings over a sliding window
#[derive(Debug)]
pub struct FrameStats {
    window: Duration,
    /// (end of frame, frame duration)
    samples: VecDeque<(Instant, Duration)>,
    frame_start: Option<Instant>,
    last_report: Option<Instant>,
}

/// Snapshot of [`FrameStats`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSummary {
    pub fps: f32,
    pub avg_ms: f32,
    pub min_ms: f32,
    pub max_ms: f32,
}

impl FrameStats {
    /// Stats over the last second
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            samples: VecDeque::new(),
            frame_start: None,
            last_report: None,
        }
    }

    /// Record a finished frame that took `duration` and ended at `now`
    pub fn record(&mut self, now: Instant, duration: Duration) {
        self.samples.push_back((now, duration));
        while let Some(&(end, _)) = self.samples.front() {
            if now.duration_since(end) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }

        let report_due = self
            .last_report
            .map_or(true, |last| now.duration_since(last) >= self.window);
        if report_due {
            if let Some(summary) = self.snapshot() {
                log::debug!(
                    "{:.0} fps ({:.2} ms avg, {:.2}-{:.2} ms)",
                    summary.fps, summary.avg_ms, summary.min_ms, summary.max_ms
                );
            }
            self.last_report = Some(now);
        }
    }

    /// Current numbers, `None` before the first frame
    pub fn snapshot(&self) -> Option<FrameSummary> {
        if self.samples.is_empty() {
            return None;
        }

        let count = self.samples.len() as f32;
        let mut total = 0.0f32;
        let mut min_ms = f32::MAX;
        let mut max_ms = 0.0f32;
        for (_, duration) in &self.samples {
            let ms = duration.as_secs_f32() * 1000.0;
            total += ms;
            min_ms = min_ms.min(ms);
            max_ms = max_ms.max(ms);
        }

        Some(FrameSummary {
            fps: count / self.window.as_secs_f32(),
            avg_ms: total / count,
            min_ms,
            max_ms,
        })
    }

    /// Number of frames in the window
    pub fn frame_count(&self) -> usize {
        self.samples.len()
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameObserver for FrameStats {
    fn frame_begin(&mut self, now: Instant) {
        self.frame_start = Some(now);
    }

    fn frame_end(&mut self, now: Instant) {
        if let Some(start) = self.frame_start.take() {
            self.record(now, now.saturating_duration_since(start));
        }
    }

    fn summary(&self) -> Option<String> {
        self.snapshot()
            .map(|s| format!("{:.0} FPS | {:.1} ms ({:.1}-{:.1})", s.fps, s.avg_ms, s.min_ms, s.max_ms))
    }
}
