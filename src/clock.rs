//! Injectable time sources.
//!
//! The profiler and debouncer never read the system time directly. They ask a
//! [`Clock`] for the current monotonic time in milliseconds, and profiling
//! loops advance through a [`FrameScheduler`]. Tests swap in [`ManualClock`]
//! and [`ManualFrameScheduler`] to make every interval exact.
//!
//! # Example
//!
//! ```rust
//! use wobblaz_motion::clock::{Clock, ManualClock};
//!
//! let clock = ManualClock::new(0.0);
//! let observer = clock.clone();
//!
//! clock.advance(16.0);
//! assert_eq!(observer.now_ms(), 16.0);
//! ```

use std::{
    cell::Cell,
    rc::Rc,
    thread,
    time::{Duration, Instant},
};

/// A monotonic millisecond clock (`performance.now`-equivalent).
pub trait Clock {
    /// Returns the current time in milliseconds.
    ///
    /// Only differences between two readings are meaningful.
    fn now_ms(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Wall clock backed by [`Instant`], measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose zero is the current instant.
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// profiler and advance another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Creates a manual clock reading `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    /// Sets the current time.
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    /// Moves the clock forward by `delta_ms`.
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Frame-scheduling primitive (`requestAnimationFrame`-equivalent).
///
/// `next_frame` returns once the next frame is due.
pub trait FrameScheduler {
    /// Waits for the next frame.
    fn next_frame(&mut self);
}

/// Scheduler that advances a [`ManualClock`] by a scripted interval sequence.
///
/// The sequence repeats once exhausted.
#[derive(Debug, Clone)]
pub struct ManualFrameScheduler {
    clock: ManualClock,
    intervals: Vec<f64>,
    cursor: usize,
}

impl ManualFrameScheduler {
    /// Creates a scheduler that advances `clock` by `interval_ms` every frame.
    pub fn uniform(clock: ManualClock, interval_ms: f64) -> Self {
        Self::from_intervals(clock, vec![interval_ms])
    }

    /// Creates a scheduler that replays `intervals` (milliseconds) in order.
    ///
    /// An empty sequence falls back to the 60 FPS frame time.
    pub fn from_intervals(clock: ManualClock, intervals: Vec<f64>) -> Self {
        let intervals = if intervals.is_empty() {
            vec![crate::profiler::IDEAL_FRAME_TIME]
        } else {
            intervals
        };
        Self { clock, intervals, cursor: 0 }
    }

    /// Number of frames scheduled so far.
    pub fn frames_scheduled(&self) -> usize {
        self.cursor
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn next_frame(&mut self) {
        let interval = self.intervals[self.cursor % self.intervals.len()];
        self.clock.advance(interval);
        self.cursor += 1;
    }
}

/// Scheduler that sleeps the current thread for a fixed frame time.
///
/// Useful for smoke-testing the profiler against [`SystemClock`].
#[derive(Debug, Clone, Copy)]
pub struct SleepFrameScheduler {
    frame_time: Duration,
}

impl SleepFrameScheduler {
    /// Creates a scheduler targeting `fps` frames per second.
    ///
    /// Falls back to 60 FPS when the target is non-positive, non-finite, or
    /// so small that its frame time does not fit in a [`Duration`].
    pub fn with_target_fps(fps: f64) -> Self {
        let fallback = Duration::from_secs_f64(1.0 / 60.0);
        let frame_time = if fps.is_finite() && fps > 0.0 {
            Duration::try_from_secs_f64(1.0 / fps).unwrap_or(fallback)
        } else {
            fallback
        };
        Self { frame_time }
    }

    /// The sleep duration per frame.
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}

impl FrameScheduler for SleepFrameScheduler {
    fn next_frame(&mut self) {
        thread::sleep(self.frame_time);
    }
}
