//! Demonstrates swipe recognition wired to a carousel.
//!
//! This example shows how to:
//! - Classify raw touch point pairs
//! - Drive a `SwipeNavigator` from pointer events on an `EventBus`
//! - Debounce gesture side effects and play haptic patterns
//!
//! Run with: cargo run --example swipe_demo

use std::{cell::RefCell, rc::Rc};

use wobblaz_motion::{
    create_swipe_gesture, debounce_gesture,
    haptics::NullDriver,
    physics::{stagger_delay, GradientFollow, MagneticHover, Rect},
    EventBus, GestureConfig, HapticFeedback, InputEvent, ManualClock, PointerEvent, SwipeBinding,
    SwipeNavigator, TouchPoint,
};

fn main() {
    println!("=== Swipe Demo ===\n");

    demo_classification();
    demo_carousel();
    demo_hover_effects();
}

fn demo_classification() {
    println!("--- Demo 1: Classification ---");

    let start = TouchPoint::new(0.0, 0.0, 0.0);
    let samples = [
        ("quick flick", TouchPoint::new(-140.0, 12.0, 120.0)),
        ("slow drag", TouchPoint::new(0.0, 200.0, 900.0)),
        ("tap", TouchPoint::new(3.0, 2.0, 80.0)),
        ("long press", TouchPoint::new(300.0, 0.0, 1_400.0)),
    ];

    for (name, end) in samples {
        match create_swipe_gesture(start, end, None) {
            Some(gesture) => println!(
                "{:<11} → {} ({:.0}px at {:.2}px/ms)",
                name,
                gesture.direction().as_str(),
                gesture.distance(),
                gesture.velocity()
            ),
            None => println!("{:<11} → rejected", name),
        }
    }
    println!();
}

fn demo_carousel() {
    println!("--- Demo 2: Carousel ---");

    let bus = EventBus::new();
    let clock = ManualClock::new(0.0);
    let carousel = Rc::new(RefCell::new(SwipeNavigator::new(4).with_wrap(true)));

    let mut haptics = HapticFeedback::new(NullDriver);
    let feedback = Rc::new(RefCell::new(debounce_gesture(
        move |index: usize| {
            let played = haptics.trigger("selection");
            println!("  settled on slide {} (haptic played: {})", index, played);
        },
        120.0,
        clock.clone(),
    )));

    let nav = Rc::clone(&carousel);
    let settle = Rc::clone(&feedback);
    let _binding = SwipeBinding::attach(&bus, GestureConfig::default(), clock.clone(), move |g| {
        if let Some(index) = nav.borrow_mut().apply(&g) {
            println!("  swipe {} → slide {}", g.direction().as_str(), index);
            settle.borrow_mut().call(index);
        }
    });

    let swipes = [(300.0, 60.0), (300.0, 60.0), (60.0, 300.0), (300.0, 40.0)];
    let mut t = 0.0;
    for (from, to) in swipes {
        bus.emit(&InputEvent::PointerDown(PointerEvent::touch(from, 200.0, t)));
        bus.emit(&InputEvent::PointerUp(PointerEvent::touch_end(to, 204.0, t + 150.0)));
        t += 400.0;
        clock.set(t);
        feedback.borrow_mut().poll();
    }
    println!("  final slide: {}\n", carousel.borrow().index());
}

fn demo_hover_effects() {
    println!("--- Demo 3: Hover Effects ---");

    let card = Rect::new(100.0, 100.0, 240.0, 160.0);
    let magnet = MagneticHover::default();
    let target = magnet.target_offset((250.0, 150.0), card.center());

    let mut offset = (0.0, 0.0);
    for _ in 0..5 {
        offset = magnet.step(offset, target);
    }
    println!("  magnetic offset after 5 frames: ({:.2}, {:.2})", offset.0, offset.1);

    let mut gradient = GradientFollow::new(0.5);
    let (px, py) = gradient.position((310.0, 120.0), card);
    println!("  gradient focus: {:.1}% {:.1}%", px, py);

    let delays: Vec<f64> = (0..6).map(|i| stagger_delay(i, 100.0, 60.0, 300.0)).collect();
    println!("  stagger delays: {:?}", delays);
}
