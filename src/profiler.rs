//! Animation frame profiling and budget reports.
//!
//! [`AnimationProfiler`] measures the real frame cadence of a running
//! animation and grades it against a named [`PerformanceBudget`].
//!
//! # Overview
//!
//! A profiler moves through three states:
//!
//! 1. **Idle**: nothing recorded yet.
//! 2. **Running**: [`start`](AnimationProfiler::start) was called; every
//!    [`record_frame`](AnimationProfiler::record_frame) appends the time
//!    since the previous frame.
//! 3. **Stopped**: [`stop`](AnimationProfiler::stop) froze the intervals into
//!    a [`PerformanceMetrics`] snapshot.
//!
//! Calls made in the wrong state are no-ops; nothing here panics or returns
//! an error, so instrumentation can stay in hot animation loops.
//!
//! # Example: Manual Clock
//!
//! ```rust
//! use wobblaz_motion::{clock::ManualClock, AnimationProfiler};
//!
//! let clock = ManualClock::new(0.0);
//! let mut profiler = AnimationProfiler::with_clock(clock.clone());
//!
//! profiler.start("fade-in");
//! for _ in 0..60 {
//!     clock.advance(16.0);
//!     profiler.record_frame();
//! }
//! let metrics = profiler.stop();
//!
//! assert_eq!(metrics.total_frames, 60);
//! assert!(metrics.is_performant);
//!
//! let report = profiler.generate_report("micro");
//! assert!(report.passed);
//! ```
//!
//! # Example: Frame Scheduler
//!
//! ```rust
//! use wobblaz_motion::{
//!     clock::{ManualClock, ManualFrameScheduler},
//!     AnimationProfiler,
//! };
//!
//! let clock = ManualClock::new(0.0);
//! let mut scheduler = ManualFrameScheduler::uniform(clock.clone(), 50.0);
//! let mut profiler = AnimationProfiler::with_clock(clock);
//!
//! let metrics = profiler.measure("slow-slide", 30, &mut scheduler);
//! assert!(metrics.is_poor);
//!
//! let report = profiler.generate_report("transition");
//! assert!(!report.passed);
//! assert!(report.recommendations.iter().any(|r| r.contains("FPS")));
//! ```

use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    budget::{BudgetRegistry, PerformanceBudget, DEFAULT_BUDGET},
    clock::{Clock, FrameScheduler, SystemClock},
    error::{MotionError, Result},
    stats::FrameStats,
};

/// Frame time at 60 FPS, in milliseconds.
pub const IDEAL_FRAME_TIME: f64 = 1000.0 / 60.0;

/// A frame counts as janky once it exceeds the ideal frame time by this factor.
pub const JANK_TOLERANCE: f64 = 1.2;

/// Absorbs floating-point noise when comparing an average frame time against a
/// budget's `max_frame_time`, in milliseconds.
pub const FRAME_TIME_EPSILON: f64 = 1e-6;

/// Thresholds used to derive jank and the performant/poor verdicts.
///
/// # Example
///
/// ```rust
/// use wobblaz_motion::profiler::ProfilerThresholds;
///
/// let thresholds = ProfilerThresholds::default().with_performant(50.0, 8.0);
/// assert_eq!(thresholds.performant_fps, 50.0);
/// assert_eq!(thresholds.poor_fps, 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfilerThresholds {
    /// Reference frame time in milliseconds.
    pub ideal_frame_time: f64,
    /// Multiplier on `ideal_frame_time` above which a frame is janky.
    pub jank_tolerance: f64,
    /// Minimum FPS for `is_performant`.
    pub performant_fps: f64,
    /// Jank score must stay below this for `is_performant`.
    pub performant_max_jank: f64,
    /// FPS below this makes a run `is_poor`.
    pub poor_fps: f64,
    /// Jank score above this makes a run `is_poor`.
    pub poor_jank: f64,
}

impl Default for ProfilerThresholds {
    fn default() -> Self {
        Self {
            ideal_frame_time: IDEAL_FRAME_TIME,
            jank_tolerance: JANK_TOLERANCE,
            performant_fps: 55.0,
            performant_max_jank: 5.0,
            poor_fps: 30.0,
            poor_jank: 50.0,
        }
    }
}

impl ProfilerThresholds {
    /// Creates the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reference frame time and jank tolerance.
    pub fn with_jank_definition(mut self, ideal_frame_time: f64, jank_tolerance: f64) -> Self {
        self.ideal_frame_time = ideal_frame_time;
        self.jank_tolerance = jank_tolerance;
        self
    }

    /// Sets the `is_performant` thresholds.
    pub fn with_performant(mut self, min_fps: f64, max_jank: f64) -> Self {
        self.performant_fps = min_fps;
        self.performant_max_jank = max_jank;
        self
    }

    /// Sets the `is_poor` thresholds.
    pub fn with_poor(mut self, below_fps: f64, above_jank: f64) -> Self {
        self.poor_fps = below_fps;
        self.poor_jank = above_jank;
        self
    }
}

/// Jank score of an interval sequence, in `[0, 100]`.
///
/// A frame is janky when it runs longer than `ideal_frame_time *
/// jank_tolerance`. Each janky frame weighs the number of ideal frame slots
/// it consumed, so one 50ms stall counts three times as much as a frame that
/// just missed its slot. The score is the weighted janky share of all
/// frames, capped at 100.
pub fn jank_score(intervals: &[f64], thresholds: &ProfilerThresholds) -> f64 {
    if intervals.is_empty() || thresholds.ideal_frame_time <= 0.0 {
        return 0.0;
    }

    let limit = thresholds.ideal_frame_time * thresholds.jank_tolerance;
    let weight: f64 = intervals
        .iter()
        .filter(|interval| **interval > limit)
        .map(|interval| interval / thresholds.ideal_frame_time)
        .sum();

    (100.0 * weight / intervals.len() as f64).min(100.0)
}

/// Snapshot of one profiling session.
///
/// Computed once by [`AnimationProfiler::stop`] and never mutated. All times
/// are in milliseconds. `Default` is the empty snapshot used before any
/// session has stopped.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerformanceMetrics {
    /// Frames per second: `1000 / average_frame_time`.
    pub fps: f64,
    /// Weighted janky-frame percentage (see [`jank_score`]).
    pub jank_score: f64,
    /// High FPS and low jank.
    pub is_performant: bool,
    /// Low FPS or heavy jank.
    pub is_poor: bool,
    /// Population variance of the frame intervals.
    pub frame_variance: f64,
    /// Longest single interval.
    pub longest_frame: f64,
    /// First interval: time from `start` to the first recorded frame.
    pub animation_latency: f64,
    /// Number of recorded intervals.
    pub total_frames: usize,
    /// Frames the ideal cadence would have produced but the run did not,
    /// rounding the expected count to the nearest frame.
    pub dropped_frames: usize,
    /// Mean interval.
    pub average_frame_time: f64,
    /// Sum of all intervals.
    pub total_duration: f64,
    /// Memory growth in megabytes, when samples were recorded.
    pub memory_increase: Option<f64>,
}

impl PerformanceMetrics {
    /// Creates metrics from raw frame intervals.
    ///
    /// # Arguments
    ///
    /// * `intervals` - Frame intervals in recording order
    /// * `memory_increase` - Memory growth in megabytes, if measured
    /// * `thresholds` - Jank and verdict thresholds
    pub fn from_intervals(
        intervals: &[f64],
        memory_increase: Option<f64>,
        thresholds: &ProfilerThresholds,
    ) -> Self {
        let stats = FrameStats::from_intervals(intervals);

        let fps = if stats.mean > 0.0 { 1000.0 / stats.mean } else { 0.0 };
        let jank_score = jank_score(intervals, thresholds);

        let dropped_frames = if thresholds.ideal_frame_time > 0.0 {
            let expected = (stats.total / thresholds.ideal_frame_time).round() as usize;
            expected.saturating_sub(stats.count)
        } else {
            0
        };

        let has_frames = stats.count > 0;
        let is_performant = has_frames
            && fps >= thresholds.performant_fps
            && jank_score < thresholds.performant_max_jank;
        let is_poor =
            has_frames && (fps < thresholds.poor_fps || jank_score > thresholds.poor_jank);

        Self {
            fps,
            jank_score,
            is_performant,
            is_poor,
            frame_variance: stats.variance,
            longest_frame: stats.max,
            animation_latency: intervals.first().copied().unwrap_or(0.0),
            total_frames: stats.count,
            dropped_frames,
            average_frame_time: stats.mean,
            total_duration: stats.total,
            memory_increase,
        }
    }

    /// Returns a formatted summary string.
    ///
    /// # Example Output
    ///
    /// ```text
    /// Animation Metrics (60 frames over 1000.20ms):
    /// FPS: 59.99
    /// Jank Score: 0.00%
    /// Frame Variance: 0.00
    /// Longest Frame: 16.67ms
    /// Latency: 16.67ms
    /// Dropped Frames: 0
    /// ```
    pub fn summary(&self) -> String {
        format!(
            "Animation Metrics ({} frames over {:.2}ms):\n\
             FPS: {:.2}\n\
             Jank Score: {:.2}%\n\
             Frame Variance: {:.2}\n\
             Longest Frame: {:.2}ms\n\
             Latency: {:.2}ms\n\
             Dropped Frames: {}",
            self.total_frames,
            self.total_duration,
            self.fps,
            self.jank_score,
            self.frame_variance,
            self.longest_frame,
            self.animation_latency,
            self.dropped_frames
        )
    }
}

bitflags! {
    /// Budget thresholds a report failed.
    ///
    /// ```rust
    /// use wobblaz_motion::profiler::BudgetViolations;
    ///
    /// let failed = BudgetViolations::FRAME_TIME | BudgetViolations::JANK;
    /// assert!(failed.contains(BudgetViolations::JANK));
    /// assert!(!failed.contains(BudgetViolations::MEMORY));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct BudgetViolations: u8 {
        /// Average frame time over `max_frame_time`.
        const FRAME_TIME = 0b001;

        /// Jank score over `max_jank_percentage`.
        const JANK       = 0b010;

        /// Memory growth over `max_memory_increase`.
        const MEMORY     = 0b100;
    }
}

/// Metrics graded against a named budget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerformanceReport {
    /// Name the report was requested for.
    pub animation_type: String,
    /// The graded snapshot.
    pub metrics: PerformanceMetrics,
    /// The budget applied.
    pub budget: PerformanceBudget,
    /// Whether frames were recorded and every threshold held.
    pub passed: bool,
    /// Thresholds that failed.
    pub violations: BudgetViolations,
    /// Advisory messages, one per problem found.
    pub recommendations: Vec<String>,
}

impl PerformanceReport {
    /// Grades `metrics` against `budget`.
    pub fn grade(animation_type: &str, metrics: PerformanceMetrics, budget: PerformanceBudget) -> Self {
        let mut violations = BudgetViolations::empty();
        let mut recommendations = Vec::new();

        if metrics.total_frames == 0 {
            recommendations.push(
                "No frames were recorded; call start, record_frame and stop before generating a report."
                    .to_string(),
            );
        } else {
            if metrics.average_frame_time > budget.max_frame_time + FRAME_TIME_EPSILON {
                violations |= BudgetViolations::FRAME_TIME;
                recommendations.push(format!(
                    "FPS {:.1} is below the {:.0} FPS target (average frame {:.2}ms, budget {:.2}ms); \
                     animate transform and opacity only and keep layout reads out of frame callbacks.",
                    metrics.fps, budget.target_fps, metrics.average_frame_time, budget.max_frame_time
                ));
            }

            if metrics.jank_score > budget.max_jank_percentage {
                violations |= BudgetViolations::JANK;
                recommendations.push(format!(
                    "High jank score {:.1}% exceeds the {:.1}% allowance; spread expensive work across \
                     frames or animate fewer elements at once.",
                    metrics.jank_score, budget.max_jank_percentage
                ));
            }

            if let Some(increase) = metrics.memory_increase {
                if increase > budget.max_memory_increase {
                    violations |= BudgetViolations::MEMORY;
                    recommendations.push(format!(
                        "Memory grew by {:.2}MB, over the {:.2}MB allowance; release per-frame \
                         allocations and detach listeners when the animation ends.",
                        increase, budget.max_memory_increase
                    ));
                }
            }

            if metrics.longest_frame > budget.max_frame_time * 2.0 {
                recommendations.push(format!(
                    "Longest frame took {:.2}ms; look for blocking work in a single frame.",
                    metrics.longest_frame
                ));
            }

            if metrics.dropped_frames > 0 {
                recommendations.push(format!(
                    "{} frames were dropped against the ideal frame cadence.",
                    metrics.dropped_frames
                ));
            }
        }

        let passed = metrics.total_frames > 0 && violations.is_empty();

        Self {
            animation_type: animation_type.to_string(),
            metrics,
            budget,
            passed,
            violations,
            recommendations,
        }
    }

    /// Asserts that the report passed its budget.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::BudgetExceeded`] carrying the recommendations
    /// if the report did not pass.
    pub fn assert_passed(&self) -> Result<()> {
        if self.passed {
            return Ok(());
        }
        Err(MotionError::BudgetExceeded {
            animation_type: self.animation_type.clone(),
            details: self.recommendations.join(" "),
        })
    }

    /// Returns a formatted summary string.
    pub fn summary(&self) -> String {
        let verdict = if self.passed { "PASSED" } else { "FAILED" };
        let mut out = format!(
            "Performance Report '{}': {}\n{}",
            self.animation_type,
            verdict,
            self.metrics.summary()
        );
        for recommendation in &self.recommendations {
            out.push_str("\n  - ");
            out.push_str(recommendation);
        }
        out
    }
}

/// Lifecycle state of an [`AnimationProfiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilerState {
    /// No session started yet.
    Idle,
    /// Recording frames.
    Running,
    /// Session finished; metrics available.
    Stopped,
}

/// Frame-timing collector for one animation at a time.
///
/// Each instance owns a single session. Starting again discards whatever the
/// previous session recorded; profile concurrent animations with separate
/// instances.
#[derive(Debug, Clone)]
pub struct AnimationProfiler<C: Clock = SystemClock> {
    clock: C,
    budgets: BudgetRegistry,
    thresholds: ProfilerThresholds,
    state: ProfilerState,
    label: Option<String>,
    last_frame_time: f64,
    intervals: Vec<f64>,
    memory_baseline: Option<f64>,
    memory_latest: Option<f64>,
    metrics: Option<PerformanceMetrics>,
}

impl AnimationProfiler<SystemClock> {
    /// Creates a profiler backed by the system clock and built-in budgets.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for AnimationProfiler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> AnimationProfiler<C> {
    /// Creates a profiler reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            budgets: BudgetRegistry::default(),
            thresholds: ProfilerThresholds::default(),
            state: ProfilerState::Idle,
            label: None,
            last_frame_time: 0.0,
            intervals: Vec::new(),
            memory_baseline: None,
            memory_latest: None,
            metrics: None,
        }
    }

    /// Replaces the budget registry used by reports.
    pub fn with_budgets(mut self, budgets: BudgetRegistry) -> Self {
        self.budgets = budgets;
        self
    }

    /// Replaces the jank and verdict thresholds.
    pub fn with_thresholds(mut self, thresholds: ProfilerThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// The budget registry used by reports.
    pub fn budgets(&self) -> &BudgetRegistry {
        &self.budgets
    }

    /// Mutable access to the budget registry, for registering custom budgets.
    pub fn budgets_mut(&mut self) -> &mut BudgetRegistry {
        &mut self.budgets
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProfilerState {
        self.state
    }

    /// Label of the current or last session.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Intervals recorded in the current or last session.
    pub fn intervals(&self) -> &[f64] {
        &self.intervals
    }

    /// Starts a new session labelled `label`.
    ///
    /// Clears the interval buffer and memory samples and takes the current
    /// time as the last frame time, so the first interval measures latency
    /// from this call. A session already running is discarded.
    pub fn start(&mut self, label: &str) {
        if self.state == ProfilerState::Running {
            log::debug!(
                "discarding in-flight profiling session '{}' after {} frames",
                self.label.as_deref().unwrap_or_default(),
                self.intervals.len()
            );
        }

        let now = self.clock.now_ms();
        self.state = ProfilerState::Running;
        self.label = Some(label.to_string());
        self.last_frame_time = now;
        self.intervals.clear();
        self.memory_baseline = None;
        self.memory_latest = None;

        log::debug!("profiling session '{}' started", label);
    }

    /// Records one frame: the time since the previous frame (or since `start`).
    ///
    /// No-op unless a session is running.
    pub fn record_frame(&mut self) {
        if self.state != ProfilerState::Running {
            return;
        }
        let now = self.clock.now_ms();
        self.intervals.push(now - self.last_frame_time);
        self.last_frame_time = now;
    }

    /// Records a memory usage sample in megabytes.
    ///
    /// The first sample of a session is the baseline; the reported increase
    /// is the latest sample minus the baseline. No-op unless a session is
    /// running.
    pub fn record_memory_usage(&mut self, megabytes: f64) {
        if self.state != ProfilerState::Running || !megabytes.is_finite() {
            return;
        }
        if self.memory_baseline.is_none() {
            self.memory_baseline = Some(megabytes);
        }
        self.memory_latest = Some(megabytes);
    }

    /// Ends the session and returns its metrics.
    ///
    /// Stopping an already stopped profiler returns the same snapshot again
    /// without recomputing. Stopping an idle profiler returns empty metrics.
    pub fn stop(&mut self) -> PerformanceMetrics {
        match self.state {
            ProfilerState::Idle => PerformanceMetrics::default(),
            ProfilerState::Stopped => self.metrics.clone().unwrap_or_default(),
            ProfilerState::Running => {
                let memory_increase = self
                    .memory_baseline
                    .zip(self.memory_latest)
                    .map(|(baseline, latest)| latest - baseline);
                let metrics = PerformanceMetrics::from_intervals(
                    &self.intervals,
                    memory_increase,
                    &self.thresholds,
                );

                log::debug!(
                    "profiling session '{}' stopped: {} frames, {:.1} fps, jank {:.1}%",
                    self.label.as_deref().unwrap_or_default(),
                    metrics.total_frames,
                    metrics.fps,
                    metrics.jank_score
                );

                self.state = ProfilerState::Stopped;
                self.metrics = Some(metrics.clone());
                metrics
            }
        }
    }

    /// The most recently computed metrics, if any session has stopped.
    pub fn metrics(&self) -> Option<&PerformanceMetrics> {
        self.metrics.as_ref()
    }

    /// Runs a complete session of `frames` frames driven by `scheduler`.
    pub fn measure<S: FrameScheduler>(
        &mut self,
        label: &str,
        frames: usize,
        scheduler: &mut S,
    ) -> PerformanceMetrics {
        self.start(label);
        for _ in 0..frames {
            scheduler.next_frame();
            self.record_frame();
        }
        self.stop()
    }

    /// Grades the last computed metrics against the budget named `animation_type`.
    ///
    /// Unknown names are graded against the `transition` budget. Before any
    /// session has stopped, the empty metrics are graded and the report fails
    /// with a recommendation to record frames.
    pub fn generate_report(&self, animation_type: &str) -> PerformanceReport {
        let budget = match self.budgets.get(animation_type) {
            Some(budget) => *budget,
            None => {
                log::warn!(
                    "no performance budget named '{}', falling back to '{}'",
                    animation_type,
                    DEFAULT_BUDGET
                );
                self.budgets
                    .get(DEFAULT_BUDGET)
                    .copied()
                    .unwrap_or_else(PerformanceBudget::transition)
            }
        };

        self.report_against(animation_type, budget)
    }

    /// Like [`generate_report`](Self::generate_report), but unknown names are errors.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::UnknownBudget`] if no budget is registered under
    /// `animation_type`.
    pub fn try_generate_report(&self, animation_type: &str) -> Result<PerformanceReport> {
        let budget = *self.budgets.require(animation_type)?;
        Ok(self.report_against(animation_type, budget))
    }

    fn report_against(&self, animation_type: &str, budget: PerformanceBudget) -> PerformanceReport {
        let metrics = self.metrics.clone().unwrap_or_default();
        let report = PerformanceReport::grade(animation_type, metrics, budget);
        if !report.passed {
            log::debug!(
                "animation '{}' failed its budget: {:?}",
                animation_type,
                report.violations
            );
        }
        report
    }
}
