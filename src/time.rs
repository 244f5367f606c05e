//! Frame timing for the window runner.

use std::time::{Duration, Instant};

/// How often the FPS estimate refreshes.
const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Counts frames and periodically recomputes an FPS estimate.
///
/// The sketch itself is tick-driven and never reads the wall clock;
/// this exists so the runner can log frame statistics.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    frames: u64,
    window_start: Instant,
    window_frames: u64,
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frames: 0,
            window_start: now,
            window_frames: 0,
            fps: 0.0,
        }
    }

    /// Record one presented frame. Returns the refreshed FPS estimate
    /// when a measurement window just closed, `None` otherwise.
    pub fn tick(&mut self) -> Option<f32> {
        self.frames += 1;

        let now = Instant::now();
        let window = now.duration_since(self.window_start);
        if window >= FPS_WINDOW {
            self.fps = (self.frames - self.window_frames) as f32 / window.as_secs_f32();
            self.window_frames = self.frames;
            self.window_start = now;
            return Some(self.fps);
        }
        None
    }

    /// Total frames recorded.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Most recent FPS estimate; zero before the first window closes.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time since the clock was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
