//! Pointer input shapes and a typed event source.
//!
//! Host integrations translate native touch and mouse events into
//! [`PointerEvent`]s and publish them as [`InputEvent`]s through an
//! [`EventSource`]. Consumers subscribe per [`EventKind`] and get back a
//! [`Subscription`] guard; dropping the guard (or calling
//! [`Subscription::unsubscribe`]) detaches the handler.
//!
//! # Example
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//!
//! use wobblaz_motion::input::{EventBus, EventKind, EventSource, InputEvent, PointerEvent};
//!
//! let bus = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&seen);
//! let subscription = bus.subscribe(
//!     EventKind::PointerDown,
//!     Box::new(move |_event| counter.set(counter.get() + 1)),
//! );
//!
//! bus.emit(&InputEvent::PointerDown(PointerEvent::mouse(10.0, 20.0, 0.0)));
//! subscription.unsubscribe();
//! bus.emit(&InputEvent::PointerDown(PointerEvent::mouse(10.0, 20.0, 5.0)));
//!
//! assert_eq!(seen.get(), 1);
//! ```

use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};

use crate::{clock::Clock, gesture::TouchPoint};

/// Represents a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// One finger in contact with the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContact {
    /// Host-assigned identifier, stable for the life of the contact.
    pub id: u32,
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
}

impl TouchContact {
    /// Creates a touch contact.
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// A raw pointer event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// A touch event.
    Touch {
        /// Contacts currently on the surface.
        touches: Vec<TouchContact>,
        /// Contacts that changed in this event. On touch end, the lifted
        /// finger appears here and no longer in `touches`.
        changed_touches: Vec<TouchContact>,
        /// Event time in milliseconds.
        timestamp: f64,
    },
    /// A mouse event.
    Mouse {
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
        /// Button involved, if any.
        button: Option<MouseButton>,
        /// Event time in milliseconds.
        timestamp: f64,
    },
    /// An event of unrecognised shape (synthetic or malformed).
    Other,
}

impl PointerEvent {
    /// A single-finger touch event.
    pub fn touch(x: f64, y: f64, timestamp: f64) -> Self {
        Self::Touch {
            touches: vec![TouchContact::new(0, x, y)],
            changed_touches: Vec::new(),
            timestamp,
        }
    }

    /// A touch-end event for the finger lifted at `(x, y)`.
    pub fn touch_end(x: f64, y: f64, timestamp: f64) -> Self {
        Self::Touch {
            touches: Vec::new(),
            changed_touches: vec![TouchContact::new(0, x, y)],
            timestamp,
        }
    }

    /// A left-button mouse event.
    pub fn mouse(x: f64, y: f64, timestamp: f64) -> Self {
        Self::Mouse { x, y, button: Some(MouseButton::Left), timestamp }
    }
}

/// Normalises a pointer event into a [`TouchPoint`].
///
/// Touch events use their first active contact, falling back to the first
/// changed contact (touch end). Mouse events use the pointer position.
/// Anything else degrades to the origin stamped with `clock`'s current time;
/// this never fails.
///
/// # Example
///
/// ```rust
/// use wobblaz_motion::{
///     clock::ManualClock,
///     input::{extract_touch_point, PointerEvent},
/// };
///
/// let clock = ManualClock::new(42.0);
///
/// let point = extract_touch_point(&PointerEvent::touch(12.0, 34.0, 7.0), &clock);
/// assert_eq!((point.x, point.y, point.timestamp), (12.0, 34.0, 7.0));
///
/// let fallback = extract_touch_point(&PointerEvent::Other, &clock);
/// assert_eq!((fallback.x, fallback.y, fallback.timestamp), (0.0, 0.0, 42.0));
/// ```
pub fn extract_touch_point<C: Clock>(event: &PointerEvent, clock: &C) -> TouchPoint {
    match event {
        PointerEvent::Touch { touches, changed_touches, timestamp } => touches
            .first()
            .or_else(|| changed_touches.first())
            .map(|contact| TouchPoint::new(contact.x, contact.y, *timestamp))
            .unwrap_or_else(|| TouchPoint::origin(clock.now_ms())),
        PointerEvent::Mouse { x, y, timestamp, .. } => TouchPoint::new(*x, *y, *timestamp),
        PointerEvent::Other => TouchPoint::origin(clock.now_ms()),
    }
}

/// Discriminant of an [`InputEvent`], used as a subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer pressed or finger down.
    PointerDown,
    /// Pointer or finger moved.
    PointerMove,
    /// Pointer released or finger lifted.
    PointerUp,
    /// Gesture interrupted by the host.
    PointerCancel,
    /// Page scrolled.
    Scroll,
    /// Viewport resized.
    Resize,
    /// Component attached.
    Mount,
}

/// A typed lifecycle or pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed or finger down.
    PointerDown(PointerEvent),
    /// Pointer or finger moved.
    PointerMove(PointerEvent),
    /// Pointer released or finger lifted.
    PointerUp(PointerEvent),
    /// Gesture interrupted by the host.
    PointerCancel(PointerEvent),
    /// Page scrolled to `offset` pixels.
    Scroll {
        /// Vertical scroll offset in pixels.
        offset: f64,
    },
    /// Viewport resized.
    Resize {
        /// New width in pixels.
        width: f64,
        /// New height in pixels.
        height: f64,
    },
    /// Component attached.
    Mount,
}

impl InputEvent {
    /// The subscription key for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerUp(_) => EventKind::PointerUp,
            Self::PointerCancel(_) => EventKind::PointerCancel,
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Resize { .. } => EventKind::Resize,
            Self::Mount => EventKind::Mount,
        }
    }

    /// The pointer payload, for pointer events.
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::PointerDown(pointer)
            | Self::PointerMove(pointer)
            | Self::PointerUp(pointer)
            | Self::PointerCancel(pointer) => Some(pointer),
            _ => None,
        }
    }
}

/// Boxed event handler.
pub type EventHandler = Box<dyn FnMut(&InputEvent)>;

/// Something that publishes [`InputEvent`]s.
pub trait EventSource {
    /// Registers `handler` for events of `kind`.
    ///
    /// The handler stays attached until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Subscription;
}

/// Guard that detaches a handler when dropped.
#[must_use = "dropping a Subscription detaches its handler immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps a detach callback.
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self { detach: Some(Box::new(detach)) }
    }

    /// Detaches the handler now.
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Keeps the handler attached for the lifetime of the source.
    pub fn forget(mut self) {
        self.detach = None;
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

struct Entry {
    id: u64,
    kind: EventKind,
    handler: EventHandler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
    emitting: bool,
    // Detached while their handlers were checked out by `emit`.
    deferred_removals: Vec<u64>,
    // Emitted from inside a handler; delivered before the outer `emit` returns.
    queued: VecDeque<InputEvent>,
}

impl Registry {
    // The caller drops the returned entry after releasing the borrow, since
    // a handler may own a `Subscription` whose drop re-enters the registry.
    fn remove(&mut self, id: u64) -> Option<Entry> {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => Some(self.entries.remove(index)),
            None => {
                if self.emitting {
                    self.deferred_removals.push(id);
                }
                None
            }
        }
    }
}

/// In-process [`EventSource`].
///
/// Handlers may subscribe or unsubscribe from inside a handler; such changes
/// take effect from the next event delivered.
///
/// An `emit` made from inside a handler is not delivered immediately. The
/// event is queued, the nested call returns 0, and the outer `emit` delivers
/// it once the current event has reached every handler. Queued events are
/// delivered in the order they were emitted.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every handler subscribed to its kind, then any
    /// events those handlers emitted.
    ///
    /// Returns the number of handler invocations, counting queued events
    /// delivered by this call. A nested call returns 0.
    pub fn emit(&self, event: &InputEvent) -> usize {
        {
            let mut registry = self.registry.borrow_mut();
            if registry.emitting {
                registry.queued.push_back(event.clone());
                return 0;
            }
            registry.emitting = true;
        }

        let mut delivered = self.deliver(event);
        loop {
            let next = self.registry.borrow_mut().queued.pop_front();
            match next {
                Some(queued) => delivered += self.deliver(&queued),
                None => break,
            }
        }

        self.registry.borrow_mut().emitting = false;
        delivered
    }

    fn deliver(&self, event: &InputEvent) -> usize {
        let kind = event.kind();
        let mut active = std::mem::take(&mut self.registry.borrow_mut().entries);

        let mut delivered = 0;
        for entry in active.iter_mut().filter(|entry| entry.kind == kind) {
            (entry.handler)(event);
            delivered += 1;
        }

        let detached: Vec<Entry> = {
            let mut registry = self.registry.borrow_mut();
            let removed = std::mem::take(&mut registry.deferred_removals);
            let (mut kept, detached): (Vec<Entry>, Vec<Entry>) =
                active.into_iter().partition(|entry| !removed.contains(&entry.id));
            kept.append(&mut registry.entries);
            registry.entries = kept;
            detached
        };
        drop(detached);

        delivered
    }

    /// Number of attached handlers across all kinds.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

impl EventSource for EventBus {
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push(Entry { id, kind, handler });
            id
        };

        let weak: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                let removed = registry.borrow_mut().remove(id);
                drop(removed);
            }
        })
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.registry.borrow().entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_extract_touch_first_contact() {
        let clock = ManualClock::new(0.0);
        let event = PointerEvent::Touch {
            touches: vec![TouchContact::new(3, 5.0, 6.0), TouchContact::new(4, 50.0, 60.0)],
            changed_touches: Vec::new(),
            timestamp: 12.0,
        };

        assert_eq!(extract_touch_point(&event, &clock), TouchPoint::new(5.0, 6.0, 12.0));
    }

    #[test]
    fn test_extract_touch_end_uses_changed_touches() {
        let clock = ManualClock::new(0.0);
        let event = PointerEvent::touch_end(9.0, 8.0, 30.0);

        assert_eq!(extract_touch_point(&event, &clock), TouchPoint::new(9.0, 8.0, 30.0));
    }

    #[test]
    fn test_extract_mouse() {
        let clock = ManualClock::new(0.0);
        let event = PointerEvent::Mouse { x: 1.5, y: 2.5, button: None, timestamp: 4.0 };

        assert_eq!(extract_touch_point(&event, &clock), TouchPoint::new(1.5, 2.5, 4.0));
    }

    #[test]
    fn test_extract_fallback_to_origin() {
        let clock = ManualClock::new(99.0);
        let empty_touch = PointerEvent::Touch {
            touches: Vec::new(),
            changed_touches: Vec::new(),
            timestamp: 1.0,
        };

        assert_eq!(extract_touch_point(&PointerEvent::Other, &clock), TouchPoint::origin(99.0));
        assert_eq!(extract_touch_point(&empty_touch, &clock), TouchPoint::origin(99.0));
    }

    #[test]
    fn test_event_kind_and_pointer() {
        let event = InputEvent::PointerMove(PointerEvent::mouse(0.0, 0.0, 0.0));
        assert_eq!(event.kind(), EventKind::PointerMove);
        assert!(event.pointer().is_some());

        let scroll = InputEvent::Scroll { offset: 120.0 };
        assert_eq!(scroll.kind(), EventKind::Scroll);
        assert!(scroll.pointer().is_none());
    }

    #[test]
    fn test_bus_routes_by_kind() {
        let bus = EventBus::new();
        let downs = Rc::new(Cell::new(0));
        let moves = Rc::new(Cell::new(0));

        let d = Rc::clone(&downs);
        let _down = bus.subscribe(EventKind::PointerDown, Box::new(move |_| d.set(d.get() + 1)));
        let m = Rc::clone(&moves);
        let _move = bus.subscribe(EventKind::PointerMove, Box::new(move |_| m.set(m.get() + 1)));

        assert_eq!(bus.emit(&InputEvent::PointerDown(PointerEvent::Other)), 1);
        assert_eq!(bus.emit(&InputEvent::PointerMove(PointerEvent::Other)), 1);
        assert_eq!(bus.emit(&InputEvent::PointerMove(PointerEvent::Other)), 1);
        assert_eq!(bus.emit(&InputEvent::Mount), 0);

        assert_eq!(downs.get(), 1);
        assert_eq!(moves.get(), 2);
    }

    #[test]
    fn test_subscription_drop_detaches() {
        let bus = EventBus::new();
        {
            let _subscription = bus.subscribe(EventKind::Mount, Box::new(|_| {}));
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_forget_keeps_handler() {
        let bus = EventBus::new();
        bus.subscribe(EventKind::Mount, Box::new(|_| {})).forget();

        assert_eq!(bus.emit(&InputEvent::Mount), 1);
    }

    #[test]
    fn test_unsubscribe_inside_handler() {
        let bus = EventBus::new();
        let calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let c = Rc::clone(&calls);
        let s = Rc::clone(&slot);
        let subscription = bus.subscribe(
            EventKind::Mount,
            Box::new(move |_| {
                c.set(c.get() + 1);
                if let Some(subscription) = s.borrow_mut().take() {
                    subscription.unsubscribe();
                }
            }),
        );
        *slot.borrow_mut() = Some(subscription);

        bus.emit(&InputEvent::Mount);
        bus.emit(&InputEvent::Mount);

        assert_eq!(calls.get(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_emit_from_handler_delivered_after_outer_event() {
        let bus = EventBus::new();
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let nested_return = Rc::new(Cell::new(usize::MAX));

        let inner_bus = bus.clone();
        let o = Rc::clone(&order);
        let r = Rc::clone(&nested_return);
        let _down = bus.subscribe(
            EventKind::PointerDown,
            Box::new(move |_| {
                o.borrow_mut().push("down-first");
                r.set(inner_bus.emit(&InputEvent::Mount));
            }),
        );
        let o = Rc::clone(&order);
        let _down_late = bus.subscribe(
            EventKind::PointerDown,
            Box::new(move |_| o.borrow_mut().push("down-second")),
        );
        let o = Rc::clone(&order);
        let _mount = bus.subscribe(
            EventKind::Mount,
            Box::new(move |_| o.borrow_mut().push("mount")),
        );

        assert_eq!(bus.emit(&InputEvent::PointerDown(PointerEvent::Other)), 3);
        assert_eq!(nested_return.get(), 0);
        assert_eq!(*order.borrow(), vec!["down-first", "down-second", "mount"]);

        // The bus is usable again once the outer emit returns.
        assert_eq!(bus.emit(&InputEvent::Mount), 1);
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let bus = EventBus::new();
        let subscription = bus.subscribe(EventKind::Mount, Box::new(|_| {}));
        drop(bus);
        subscription.unsubscribe();
    }
}
