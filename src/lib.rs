//! # wobblaz_motion
//!
//! Gesture recognition and animation profiling for the Wibbly Wobblaz
//! interaction layer.
//!
//! ## Overview
//!
//! `wobblaz_motion` is the host-independent core behind the landing page's
//! touch and motion effects:
//!
//! - **Swipe recognition**: classify a pointer press/release pair as a
//!   directional swipe, with live progress while the pointer is down
//! - **Animation profiling**: record frame intervals, derive FPS, jank and
//!   dropped frames, and grade a run against a named performance budget
//! - **Debouncing**: a polled, last-call-wins state machine for gesture handlers
//! - **Haptics**: named vibration patterns over a pluggable driver
//! - **Motion helpers**: magnetic hover, pointer-following gradients,
//!   parallax and staggered entrances
//!
//! Time is always read through a [`Clock`](clock::Clock), so every behaviour
//! can be driven deterministically with a [`ManualClock`](clock::ManualClock).
//!
//! ## Quick Start
//!
//! ### Recognising a Swipe
//!
//! ```rust
//! use wobblaz_motion::{create_swipe_gesture, SwipeDirection, TouchPoint};
//!
//! let start = TouchPoint::new(200.0, 300.0, 0.0);
//! let end = TouchPoint::new(40.0, 310.0, 180.0);
//!
//! let gesture = create_swipe_gesture(start, end, None).expect("fast, long motion");
//! assert_eq!(gesture.direction(), SwipeDirection::Left);
//! assert!(gesture.velocity() > 0.3);
//! ```
//!
//! ### Profiling an Animation
//!
//! ```rust
//! use wobblaz_motion::{
//!     clock::{ManualClock, ManualFrameScheduler},
//!     AnimationProfiler,
//! };
//!
//! let clock = ManualClock::new(0.0);
//! let mut frames = ManualFrameScheduler::uniform(clock.clone(), 1000.0 / 60.0);
//! let mut profiler = AnimationProfiler::with_clock(clock);
//!
//! let metrics = profiler.measure("hero-fade", 60, &mut frames);
//! assert!(metrics.is_performant);
//!
//! let report = profiler.generate_report("micro");
//! assert!(report.passed, "{}", report.summary());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/deserialize configs, budgets and reports, and load
//!   [`MotionConfig`] from JSON
//! - `full`: Enable all features
//!
//! ## Architecture
//!
//! 1. **Time** (`clock`): injectable clocks and frame schedulers
//! 2. **Recognition** (`gesture`, `input`, `swipe`): pure swipe maths, host
//!    event normalisation and pointer tracking
//! 3. **Measurement** (`stats`, `budget`, `profiler`): frame statistics,
//!    budgets and reports
//! 4. **Effects** (`debounce`, `haptics`, `physics`): the small stateful
//!    helpers the page wires to gestures
//! 5. **Configuration** (`config`): one aggregate for every tunable

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

mod error;

pub mod budget;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod gesture;
pub mod haptics;
pub mod input;
pub mod physics;
pub mod profiler;
pub mod stats;
pub mod swipe;

// Public API exports
pub use budget::{BudgetRegistry, PerformanceBudget};
pub use clock::{Clock, FrameScheduler, ManualClock, SystemClock};
pub use config::MotionConfig;
pub use debounce::{debounce_gesture, Debouncer};
pub use error::{MotionError, Result};
pub use gesture::{
    calculate_distance, calculate_gesture_progress, calculate_velocity, clamp_velocity,
    create_swipe_gesture, get_swipe_direction, is_valid_swipe_gesture, GestureConfig,
    SwipeDirection, SwipeGesture, TouchPoint,
};
pub use haptics::{HapticFeedback, HapticPattern, HapticRegistry, VibrationDriver};
pub use input::{extract_touch_point, EventBus, EventSource, InputEvent, PointerEvent, Subscription};
pub use profiler::{
    AnimationProfiler, BudgetViolations, PerformanceMetrics, PerformanceReport,
    ProfilerThresholds,
};
pub use stats::FrameStats;
pub use swipe::{SwipeBinding, SwipeNavigator, SwipeTracker};
