//! Swipe gesture recognition over raw pointer samples.
//!
//! This module converts pairs of [`TouchPoint`] samples into classified
//! [`SwipeGesture`]s under a [`GestureConfig`]. Every function here is pure
//! and total: degenerate input (identical points, zero or negative elapsed
//! time, NaN velocities) is normalised instead of reported, because these
//! functions run on every pointer move.
//!
//! # Overview
//!
//! - [`calculate_distance`], [`calculate_velocity`]: numeric primitives
//! - [`get_swipe_direction`]: dominant-axis classification
//! - [`is_valid_swipe_gesture`]: distance, velocity and duration gates
//! - [`create_swipe_gesture`]: the only way to obtain a [`SwipeGesture`]
//! - [`calculate_gesture_progress`]: live feedback while a swipe is in flight
//! - [`clamp_velocity`]: normalisation before velocity drives a transform
//!
//! # Example
//!
//! ```rust
//! use wobblaz_motion::gesture::{create_swipe_gesture, SwipeDirection, TouchPoint};
//!
//! let start = TouchPoint::new(0.0, 0.0, 0.0);
//! let end = TouchPoint::new(0.0, 100.0, 200.0);
//!
//! let gesture = create_swipe_gesture(start, end, None).expect("valid swipe");
//! assert_eq!(gesture.direction(), SwipeDirection::Down);
//! assert_eq!(gesture.velocity(), 0.5);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

/// Default minimum swipe distance in pixels.
pub const DEFAULT_MIN_DISTANCE: f64 = 50.0;

/// Default minimum swipe velocity in pixels per millisecond.
pub const DEFAULT_MIN_VELOCITY: f64 = 0.3;

/// Default maximum swipe duration in milliseconds.
pub const DEFAULT_MAX_DURATION: f64 = 1000.0;

/// Default gap in milliseconds after which an in-flight touch is abandoned.
pub const DEFAULT_TOUCH_TIMEOUT: f64 = 300.0;

/// Default upper bound for [`clamp_velocity`].
pub const DEFAULT_MAX_VELOCITY: f64 = 2.0;

/// One sampled pointer position.
///
/// Coordinates are in screen pixels with `+y` pointing down; `timestamp` is
/// in milliseconds from any monotonic origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchPoint {
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
    /// Sample time in milliseconds.
    pub timestamp: f64,
}

impl TouchPoint {
    /// Creates a touch point.
    pub fn new(x: f64, y: f64, timestamp: f64) -> Self {
        Self { x, y, timestamp }
    }

    /// The origin point stamped with `timestamp`.
    pub fn origin(timestamp: f64) -> Self {
        Self::new(0.0, 0.0, timestamp)
    }
}

/// Thresholds for swipe recognition.
///
/// # Example
///
/// ```rust
/// use wobblaz_motion::gesture::GestureConfig;
///
/// let config = GestureConfig::default()
///     .with_min_distance(80.0)
///     .with_max_duration(600.0);
///
/// assert_eq!(config.min_distance, 80.0);
/// assert_eq!(config.min_velocity, 0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Minimum travel in pixels.
    pub min_distance: f64,
    /// Minimum average speed in pixels per millisecond.
    pub min_velocity: f64,
    /// Maximum duration in milliseconds.
    pub max_duration: f64,
    /// Maximum gap between consecutive samples of one touch, in milliseconds.
    pub touch_timeout: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            min_velocity: DEFAULT_MIN_VELOCITY,
            max_duration: DEFAULT_MAX_DURATION,
            touch_timeout: DEFAULT_TOUCH_TIMEOUT,
        }
    }
}

impl GestureConfig {
    /// Creates a configuration with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum travel in pixels.
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Sets the minimum velocity in pixels per millisecond.
    pub fn with_min_velocity(mut self, min_velocity: f64) -> Self {
        self.min_velocity = min_velocity;
        self
    }

    /// Sets the maximum duration in milliseconds.
    pub fn with_max_duration(mut self, max_duration: f64) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// Sets the touch timeout in milliseconds.
    pub fn with_touch_timeout(mut self, touch_timeout: f64) -> Self {
        self.touch_timeout = touch_timeout;
        self
    }

    /// Checks that every threshold is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min_distance", self.min_distance),
            ("min_velocity", self.min_velocity),
            ("max_duration", self.max_duration),
            ("touch_timeout", self.touch_timeout),
        ];

        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(MotionError::InvalidConfig { field: field.to_string(), value });
            }
        }

        Ok(())
    }
}

/// Direction of a classified swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SwipeDirection {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
}

impl SwipeDirection {
    /// Lowercase name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Whether the direction lies on the x axis.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// A swipe that passed every recognition gate.
///
/// There is no public constructor: instances come only from
/// [`create_swipe_gesture`], so holding a `SwipeGesture` proves the motion
/// met its thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SwipeGesture {
    direction: SwipeDirection,
    velocity: f64,
    distance: f64,
    start_point: TouchPoint,
    end_point: TouchPoint,
    duration: f64,
}

impl SwipeGesture {
    /// Dominant direction of travel.
    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    /// Average speed in pixels per millisecond.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Straight-line travel in pixels.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// First sample of the swipe.
    pub fn start_point(&self) -> TouchPoint {
        self.start_point
    }

    /// Last sample of the swipe.
    pub fn end_point(&self) -> TouchPoint {
        self.end_point
    }

    /// Elapsed time in milliseconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// Euclidean distance between two points.
pub fn calculate_distance(start: TouchPoint, end: TouchPoint) -> f64 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    (dx * dx + dy * dy).sqrt()
}

/// Average speed in pixels per millisecond.
///
/// Returns `0.0` when `end` is not strictly after `start`, so out-of-order
/// or duplicated timestamps never produce infinity or NaN.
///
/// # Example
///
/// ```rust
/// use wobblaz_motion::gesture::{calculate_velocity, TouchPoint};
///
/// let start = TouchPoint::new(0.0, 0.0, 100.0);
/// let end = TouchPoint::new(30.0, 40.0, 200.0);
/// assert_eq!(calculate_velocity(start, end), 0.5);
///
/// // Same timestamp: no division by zero.
/// assert_eq!(calculate_velocity(start, TouchPoint::new(30.0, 40.0, 100.0)), 0.0);
/// ```
pub fn calculate_velocity(start: TouchPoint, end: TouchPoint) -> f64 {
    let elapsed = end.timestamp - start.timestamp;
    if elapsed > 0.0 {
        calculate_distance(start, end) / elapsed
    } else {
        0.0
    }
}

/// Classifies the dominant axis of travel.
///
/// Horizontal wins only when `|dx| > |dy|` strictly; equal magnitudes
/// resolve vertically.
pub fn get_swipe_direction(start: TouchPoint, end: TouchPoint) -> SwipeDirection {
    let dx = end.x - start.x;
    let dy = end.y - start.y;

    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    } else if dy > 0.0 {
        SwipeDirection::Down
    } else {
        SwipeDirection::Up
    }
}

/// Whether the motion passes all three gates.
///
/// Distance must reach `min_distance`, velocity must reach `min_velocity`
/// and duration must not exceed `max_duration`. A fast but short flick and a
/// long but slow drag are both rejected.
pub fn is_valid_swipe_gesture(start: TouchPoint, end: TouchPoint, config: &GestureConfig) -> bool {
    let distance = calculate_distance(start, end);
    let velocity = calculate_velocity(start, end);
    let duration = end.timestamp - start.timestamp;

    distance >= config.min_distance
        && velocity >= config.min_velocity
        && duration <= config.max_duration
}

/// Builds a [`SwipeGesture`] if the motion is valid.
///
/// `None` for `config` uses [`GestureConfig::default`]. Returns `None` for
/// any motion rejected by [`is_valid_swipe_gesture`].
pub fn create_swipe_gesture(
    start: TouchPoint,
    end: TouchPoint,
    config: Option<&GestureConfig>,
) -> Option<SwipeGesture> {
    let default_config;
    let config = match config {
        Some(config) => config,
        None => {
            default_config = GestureConfig::default();
            &default_config
        }
    };

    if !is_valid_swipe_gesture(start, end, config) {
        return None;
    }

    Some(SwipeGesture {
        direction: get_swipe_direction(start, end),
        velocity: calculate_velocity(start, end),
        distance: calculate_distance(start, end),
        start_point: start,
        end_point: end,
        duration: end.timestamp - start.timestamp,
    })
}

/// Fraction of `min_distance` covered so far, in `[0, 1]`.
///
/// A non-positive `min_distance` means any motion completes the gesture.
pub fn calculate_gesture_progress(
    start: TouchPoint,
    current: TouchPoint,
    config: &GestureConfig,
) -> f64 {
    if config.min_distance <= 0.0 {
        return 1.0;
    }
    (calculate_distance(start, current) / config.min_distance).min(1.0)
}

/// Clamps a velocity into `[0, max]`.
///
/// Negative velocities and NaN become `0.0`.
///
/// # Example
///
/// ```rust
/// use wobblaz_motion::gesture::clamp_velocity;
///
/// assert_eq!(clamp_velocity(-5.0, 2.0), 0.0);
/// assert_eq!(clamp_velocity(5.0, 2.0), 2.0);
/// assert_eq!(clamp_velocity(1.0, 2.0), 1.0);
/// ```
pub fn clamp_velocity(velocity: f64, max: f64) -> f64 {
    if velocity.is_nan() || velocity <= 0.0 {
        return 0.0;
    }
    let max = if max.is_nan() { 0.0 } else { max.max(0.0) };
    velocity.min(max)
}

/// [`clamp_velocity`] with [`DEFAULT_MAX_VELOCITY`].
pub fn clamp_velocity_default(velocity: f64) -> f64 {
    clamp_velocity(velocity, DEFAULT_MAX_VELOCITY)
}
