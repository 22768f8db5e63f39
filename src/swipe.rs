//! Swipe tracking and swipe-driven navigation.
//!
//! [`SwipeTracker`] follows one pointer from down to up, reporting live
//! progress and classifying the release through
//! [`create_swipe_gesture`](crate::gesture::create_swipe_gesture).
//! [`SwipeNavigator`] turns gestures into index changes for a carousel or
//! section pager, and [`SwipeBinding`] wires a tracker to an
//! [`EventSource`].
//!
//! # Example
//!
//! ```rust
//! use wobblaz_motion::{
//!     gesture::{GestureConfig, TouchPoint},
//!     swipe::{SwipeNavigator, SwipeTracker},
//! };
//!
//! let mut tracker = SwipeTracker::new(GestureConfig::default());
//! let mut pager = SwipeNavigator::new(4);
//!
//! tracker.begin(TouchPoint::new(300.0, 100.0, 0.0));
//! assert_eq!(tracker.update(TouchPoint::new(275.0, 100.0, 40.0)), 0.5);
//!
//! let gesture = tracker.end(TouchPoint::new(180.0, 104.0, 160.0)).unwrap();
//! assert_eq!(pager.apply(&gesture), Some(1));
//! ```

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    clock::Clock,
    gesture::{
        calculate_gesture_progress, create_swipe_gesture, GestureConfig, SwipeDirection,
        SwipeGesture, TouchPoint,
    },
    input::{extract_touch_point, EventKind, EventSource, InputEvent, Subscription},
};

/// Follows a single pointer from press to release.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    config: GestureConfig,
    start: Option<TouchPoint>,
    last: Option<TouchPoint>,
    progress: f64,
}

impl SwipeTracker {
    /// Creates an idle tracker.
    pub fn new(config: GestureConfig) -> Self {
        Self { config, start: None, last: None, progress: 0.0 }
    }

    /// The thresholds in use.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a pointer is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Progress reported by the last [`update`](Self::update).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Starts tracking at `point`, abandoning any previous pointer.
    pub fn begin(&mut self, point: TouchPoint) {
        self.start = Some(point);
        self.last = Some(point);
        self.progress = 0.0;
    }

    /// Feeds an intermediate sample and returns progress in `[0, 1]`.
    ///
    /// Returns `0.0` when nothing is tracked or when the sample arrives more
    /// than `touch_timeout` after the previous one (the gesture is abandoned).
    pub fn update(&mut self, point: TouchPoint) -> f64 {
        let Some(start) = self.accept(point) else {
            return 0.0;
        };
        self.last = Some(point);
        self.progress = calculate_gesture_progress(start, point, &self.config);
        self.progress
    }

    /// Finishes tracking at `point` and classifies the motion.
    ///
    /// The tracker is idle afterwards whether or not a gesture was recognised.
    pub fn end(&mut self, point: TouchPoint) -> Option<SwipeGesture> {
        let start = self.accept(point)?;
        self.reset();
        create_swipe_gesture(start, point, Some(&self.config))
    }

    /// Abandons the current pointer.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn accept(&mut self, point: TouchPoint) -> Option<TouchPoint> {
        let start = self.start?;
        let last = self.last.unwrap_or(start);
        if point.timestamp - last.timestamp > self.config.touch_timeout {
            log::debug!(
                "swipe abandoned: {:.0}ms gap exceeds {:.0}ms touch timeout",
                point.timestamp - last.timestamp,
                self.config.touch_timeout
            );
            self.reset();
            return None;
        }
        Some(start)
    }

    fn reset(&mut self) {
        self.start = None;
        self.last = None;
        self.progress = 0.0;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

/// Which swipe directions a [`SwipeNavigator`] responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAxis {
    /// Left and right swipes.
    Horizontal,
    /// Up and down swipes.
    Vertical,
    /// Any swipe.
    Both,
}

impl SwipeAxis {
    fn accepts(self, direction: SwipeDirection) -> bool {
        match self {
            Self::Horizontal => direction.is_horizontal(),
            Self::Vertical => !direction.is_horizontal(),
            Self::Both => true,
        }
    }
}

/// Index over `len` items, moved by swipes.
///
/// Swiping left or up advances; swiping right or down goes back. Without
/// wrapping, swipes past either end are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeNavigator {
    index: usize,
    len: usize,
    wrap: bool,
    axis: SwipeAxis,
}

impl SwipeNavigator {
    /// Creates a horizontal, non-wrapping navigator at index 0.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len, wrap: false, axis: SwipeAxis::Horizontal }
    }

    /// Enables or disables wrap-around at the ends.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Restricts which swipes are honoured.
    pub fn with_axis(mut self, axis: SwipeAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Current index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Applies a gesture. Returns the new index if it changed.
    pub fn apply(&mut self, gesture: &SwipeGesture) -> Option<usize> {
        let direction = gesture.direction();
        if !self.axis.accepts(direction) {
            return None;
        }
        match direction {
            SwipeDirection::Left | SwipeDirection::Up => self.next(),
            SwipeDirection::Right | SwipeDirection::Down => self.previous(),
        }
    }

    /// Advances one item. Returns the new index if it changed.
    pub fn next(&mut self) -> Option<usize> {
        if self.len < 2 {
            return None;
        }
        let target = if self.index + 1 < self.len {
            self.index + 1
        } else if self.wrap {
            0
        } else {
            return None;
        };
        self.index = target;
        Some(target)
    }

    /// Goes back one item. Returns the new index if it changed.
    pub fn previous(&mut self) -> Option<usize> {
        if self.len < 2 {
            return None;
        }
        let target = if self.index > 0 {
            self.index - 1
        } else if self.wrap {
            self.len - 1
        } else {
            return None;
        };
        self.index = target;
        Some(target)
    }

    /// Jumps to `index`. Returns whether it was in range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }
}

/// A [`SwipeTracker`] subscribed to pointer events.
///
/// Dropping the binding unsubscribes its handlers.
pub struct SwipeBinding {
    tracker: Rc<RefCell<SwipeTracker>>,
    _subscriptions: Vec<Subscription>,
}

impl SwipeBinding {
    /// Subscribes a tracker to `source` and calls `on_swipe` for every
    /// recognised gesture.
    ///
    /// Pointer samples are normalised with
    /// [`extract_touch_point`](crate::input::extract_touch_point) using `clock`.
    pub fn attach<S, C, H>(source: &S, config: GestureConfig, clock: C, on_swipe: H) -> Self
    where
        S: EventSource,
        C: Clock + 'static,
        H: FnMut(SwipeGesture) + 'static,
    {
        let tracker = Rc::new(RefCell::new(SwipeTracker::new(config)));
        let clock = Rc::new(clock);
        let mut on_swipe = on_swipe;
        let mut subscriptions = Vec::with_capacity(4);

        let (t, c) = (Rc::clone(&tracker), Rc::clone(&clock));
        subscriptions.push(source.subscribe(
            EventKind::PointerDown,
            Box::new(move |event: &InputEvent| {
                if let Some(pointer) = event.pointer() {
                    t.borrow_mut().begin(extract_touch_point(pointer, &c));
                }
            }),
        ));

        let (t, c) = (Rc::clone(&tracker), Rc::clone(&clock));
        subscriptions.push(source.subscribe(
            EventKind::PointerMove,
            Box::new(move |event: &InputEvent| {
                if let Some(pointer) = event.pointer() {
                    t.borrow_mut().update(extract_touch_point(pointer, &c));
                }
            }),
        ));

        let (t, c) = (Rc::clone(&tracker), Rc::clone(&clock));
        subscriptions.push(source.subscribe(
            EventKind::PointerUp,
            Box::new(move |event: &InputEvent| {
                let Some(pointer) = event.pointer() else {
                    return;
                };
                let gesture = t.borrow_mut().end(extract_touch_point(pointer, &c));
                if let Some(gesture) = gesture {
                    on_swipe(gesture);
                }
            }),
        ));

        let t = Rc::clone(&tracker);
        subscriptions.push(source.subscribe(
            EventKind::PointerCancel,
            Box::new(move |_: &InputEvent| t.borrow_mut().cancel()),
        ));

        Self { tracker, _subscriptions: subscriptions }
    }

    /// Live progress of the tracked pointer.
    pub fn progress(&self) -> f64 {
        self.tracker.borrow().progress()
    }

    /// Whether a pointer is currently tracked.
    pub fn is_tracking(&self) -> bool {
        self.tracker.borrow().is_tracking()
    }
}

impl fmt::Debug for SwipeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeBinding")
            .field("tracker", &*self.tracker.borrow())
            .field("subscriptions", &self._subscriptions.len())
            .finish()
    }
}
