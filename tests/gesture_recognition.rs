//! Integration tests for swipe recognition.
//!
//! These tests exercise the public recognizer functions through the crate
//! root exports, the way a host page would call them.

use wobblaz_motion::{
    calculate_distance, calculate_gesture_progress, calculate_velocity, clamp_velocity,
    create_swipe_gesture, get_swipe_direction, gesture::clamp_velocity_default,
    is_valid_swipe_gesture, GestureConfig, SwipeDirection, TouchPoint,
};

fn point(x: f64, y: f64, timestamp: f64) -> TouchPoint {
    TouchPoint::new(x, y, timestamp)
}

#[test]
fn test_distance_symmetric_and_zero_on_self() {
    let samples = [
        (point(0.0, 0.0, 0.0), point(3.0, 4.0, 10.0)),
        (point(-20.0, 15.0, 5.0), point(40.0, -5.0, 90.0)),
        (point(1e6, 1e6, 0.0), point(-1e6, 0.5, 1.0)),
    ];

    for (a, b) in samples {
        assert_eq!(calculate_distance(a, b), calculate_distance(b, a));
        assert_eq!(calculate_distance(a, a), 0.0);
    }
    assert_eq!(calculate_distance(samples[0].0, samples[0].1), 5.0);
}

#[test]
fn test_velocity_never_non_finite() {
    let start = point(0.0, 0.0, 100.0);

    for end_time in [100.0, 99.0, 0.0, -500.0] {
        let velocity = calculate_velocity(start, point(300.0, 0.0, end_time));
        assert_eq!(velocity, 0.0);
        assert!(velocity.is_finite());
    }
}

#[test]
fn test_valid_swipe_requires_all_three_gates() {
    let config = GestureConfig::default();
    let start = point(0.0, 0.0, 0.0);

    // Too short: fast and quick, but only 40px.
    assert!(!is_valid_swipe_gesture(start, point(40.0, 0.0, 50.0), &config));
    // Too slow: long and within 1000ms, but 0.1px/ms.
    assert!(!is_valid_swipe_gesture(start, point(90.0, 0.0, 900.0), &config));
    // Too long: far and fast, but takes 1500ms.
    assert!(!is_valid_swipe_gesture(start, point(600.0, 0.0, 1_500.0), &config));

    assert!(is_valid_swipe_gesture(start, point(100.0, 0.0, 200.0), &config));
}

#[test]
fn test_create_matches_validity_and_direction() {
    let config = GestureConfig::default();
    let start = point(50.0, 50.0, 0.0);
    let ends = [
        point(200.0, 60.0, 150.0),
        point(-80.0, 40.0, 150.0),
        point(55.0, 260.0, 300.0),
        point(45.0, -100.0, 200.0),
        point(60.0, 60.0, 20.0),
        point(400.0, 50.0, 2_000.0),
    ];

    for end in ends {
        match create_swipe_gesture(start, end, Some(&config)) {
            Some(gesture) => {
                assert!(is_valid_swipe_gesture(start, end, &config));
                assert_eq!(gesture.direction(), get_swipe_direction(start, end));
            }
            None => assert!(!is_valid_swipe_gesture(start, end, &config)),
        }
    }
}

#[test]
fn test_diagonal_tie_resolves_vertical() {
    let direction = get_swipe_direction(point(0.0, 0.0, 0.0), point(10.0, 10.0, 100.0));
    assert_eq!(direction, SwipeDirection::Down);

    let direction = get_swipe_direction(point(0.0, 0.0, 0.0), point(-10.0, -10.0, 100.0));
    assert_eq!(direction, SwipeDirection::Up);
}

#[test]
fn test_reference_downward_swipe() {
    let gesture =
        create_swipe_gesture(point(0.0, 0.0, 0.0), point(0.0, 100.0, 200.0), None).unwrap();

    assert_eq!(gesture.distance(), 100.0);
    assert_eq!(gesture.velocity(), 0.5);
    assert_eq!(gesture.duration(), 200.0);
    assert_eq!(gesture.direction(), SwipeDirection::Down);
    assert_eq!(gesture.direction().as_str(), "down");
}

#[test]
fn test_custom_config_loosens_thresholds() {
    let config = GestureConfig::default().with_min_distance(20.0).with_min_velocity(0.1);
    let start = point(0.0, 0.0, 0.0);
    let end = point(-30.0, 0.0, 250.0);

    assert!(create_swipe_gesture(start, end, None).is_none());
    let gesture = create_swipe_gesture(start, end, Some(&config)).unwrap();
    assert_eq!(gesture.direction(), SwipeDirection::Left);
}

#[test]
fn test_progress_is_bounded() {
    let config = GestureConfig::default();
    let start = point(0.0, 0.0, 0.0);

    assert_eq!(calculate_gesture_progress(start, start, &config), 0.0);
    assert_eq!(calculate_gesture_progress(start, point(25.0, 0.0, 10.0), &config), 0.5);
    assert_eq!(calculate_gesture_progress(start, point(0.0, 500.0, 10.0), &config), 1.0);
}

#[test]
fn test_clamp_velocity_examples() {
    assert_eq!(clamp_velocity_default(-5.0), 0.0);
    assert_eq!(clamp_velocity(5.0, 2.0), 2.0);
    assert_eq!(clamp_velocity_default(1.0), 1.0);
}
