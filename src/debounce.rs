//! Trailing-edge debounce as an explicit state machine.
//!
//! A [`Debouncer`] owns at most one pending call. Every [`call`](Debouncer::call)
//! replaces the pending arguments and pushes the deadline out to
//! `now + wait`; the callback runs only once a [`poll`](Debouncer::poll)
//! observes that the deadline has passed. There is no background timer: the
//! host polls from its event loop or frame callback, and tests advance a
//! [`ManualClock`](crate::clock::ManualClock).
//!
//! # Example
//!
//! ```rust
//! use wobblaz_motion::{clock::ManualClock, debounce::debounce_gesture};
//!
//! let clock = ManualClock::new(0.0);
//! let mut fired = Vec::new();
//! {
//!     let mut debounced = debounce_gesture(|x: i32| fired.push(x), 100.0, clock.clone());
//!
//!     debounced.call(1);
//!     clock.advance(50.0);
//!     debounced.call(2);
//!     clock.advance(50.0);
//!     assert!(!debounced.poll()); // only 50ms since the last call
//!
//!     clock.advance(50.0);
//!     assert!(debounced.poll());
//! }
//! assert_eq!(fired, vec![2]);
//! ```

use std::fmt;

use crate::clock::Clock;

/// Whether a debounced call is waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// Nothing scheduled.
    Idle,
    /// A call is waiting for its deadline.
    Pending,
}

struct PendingCall<T> {
    args: T,
    deadline: f64,
}

/// Last-call-wins debouncer around `callback`.
pub struct Debouncer<T, F, C>
where
    F: FnMut(T),
    C: Clock,
{
    callback: F,
    wait_ms: f64,
    clock: C,
    pending: Option<PendingCall<T>>,
}

impl<T, F, C> Debouncer<T, F, C>
where
    F: FnMut(T),
    C: Clock,
{
    /// Wraps `callback` with a quiet period of `wait_ms` milliseconds.
    ///
    /// Negative or NaN waits are treated as zero.
    pub fn new(callback: F, wait_ms: f64, clock: C) -> Self {
        let wait_ms = if wait_ms > 0.0 { wait_ms } else { 0.0 };
        Self { callback, wait_ms, clock, pending: None }
    }

    /// Schedules `args`, replacing any pending call and restarting the wait.
    pub fn call(&mut self, args: T) {
        let deadline = self.clock.now_ms() + self.wait_ms;
        self.pending = Some(PendingCall { args, deadline });
    }

    /// Drops the pending call. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Fires the pending call if its deadline has passed.
    ///
    /// Returns whether the callback ran.
    pub fn poll(&mut self) -> bool {
        let due = match &self.pending {
            Some(pending) => self.clock.now_ms() >= pending.deadline,
            None => false,
        };
        if due {
            self.fire()
        } else {
            false
        }
    }

    /// Fires the pending call immediately, ignoring the deadline.
    ///
    /// Returns whether the callback ran.
    pub fn flush(&mut self) -> bool {
        self.fire()
    }

    /// Current state.
    pub fn state(&self) -> DebounceState {
        if self.pending.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }

    /// Whether a call is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time at which the pending call becomes due.
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// The configured quiet period in milliseconds.
    pub fn wait_ms(&self) -> f64 {
        self.wait_ms
    }

    fn fire(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                (self.callback)(pending.args);
                true
            }
            None => false,
        }
    }
}

impl<T, F, C> fmt::Debug for Debouncer<T, F, C>
where
    F: FnMut(T),
    C: Clock,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait_ms", &self.wait_ms)
            .field("state", &self.state())
            .field("deadline", &self.deadline())
            .finish()
    }
}

/// Wraps `callback` in a [`Debouncer`] with a quiet period of `wait_ms`.
pub fn debounce_gesture<T, F, C>(callback: F, wait_ms: f64, clock: C) -> Debouncer<T, F, C>
where
    F: FnMut(T),
    C: Clock,
{
    Debouncer::new(callback, wait_ms, clock)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::clock::ManualClock;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl FnMut(u32)) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |value| sink.borrow_mut().push(value))
    }

    #[test]
    fn test_only_last_call_fires() {
        let clock = ManualClock::new(0.0);
        let (calls, callback) = recorder();
        let mut debounced = debounce_gesture(callback, 100.0, clock.clone());

        for value in 0..5 {
            debounced.call(value);
            clock.advance(20.0);
            assert!(!debounced.poll());
        }

        clock.advance(100.0);
        assert!(debounced.poll());
        assert_eq!(*calls.borrow(), vec![4]);
        assert_eq!(debounced.state(), DebounceState::Idle);
    }

    #[test]
    fn test_fires_exactly_at_deadline() {
        let clock = ManualClock::new(10.0);
        let (calls, callback) = recorder();
        let mut debounced = Debouncer::new(callback, 50.0, clock.clone());

        debounced.call(7);
        assert_eq!(debounced.deadline(), Some(60.0));

        clock.set(60.0);
        assert!(debounced.poll());
        assert!(!debounced.poll());
        assert_eq!(*calls.borrow(), vec![7]);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let clock = ManualClock::new(0.0);
        let (calls, callback) = recorder();
        let mut debounced = Debouncer::new(callback, 30.0, clock.clone());

        debounced.call(1);
        assert!(debounced.is_pending());
        assert!(debounced.cancel());
        assert!(!debounced.cancel());

        clock.advance(100.0);
        assert!(!debounced.poll());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_flush_ignores_deadline() {
        let clock = ManualClock::new(0.0);
        let (calls, callback) = recorder();
        let mut debounced = Debouncer::new(callback, 1_000.0, clock);

        assert!(!debounced.flush());
        debounced.call(3);
        assert!(debounced.flush());
        assert_eq!(*calls.borrow(), vec![3]);
    }

    #[test]
    fn test_negative_wait_is_zero() {
        let clock = ManualClock::new(0.0);
        let (calls, callback) = recorder();
        let mut debounced = Debouncer::new(callback, -5.0, clock);

        assert_eq!(debounced.wait_ms(), 0.0);
        debounced.call(9);
        assert!(debounced.poll());
        assert_eq!(*calls.borrow(), vec![9]);
    }

    #[test]
    fn test_debug_output() {
        let debounced = Debouncer::new(|_: u32| {}, 25.0, ManualClock::new(0.0));
        let debug = format!("{:?}", debounced);

        assert!(debug.contains("Idle"));
        assert!(debug.contains("25"));
    }
}
