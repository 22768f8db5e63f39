//! Integration tests for animation profiling and budget reports.
//!
//! Every session is driven by a `ManualFrameScheduler` so frame timing is
//! exact and the tests never sleep.

use approx::assert_relative_eq;
use wobblaz_motion::{
    budget::PerformanceBudget,
    clock::{ManualClock, ManualFrameScheduler},
    profiler::ProfilerState,
    AnimationProfiler, BudgetViolations, FrameScheduler, MotionError,
};

fn profiler_with(intervals: Vec<f64>) -> (AnimationProfiler<ManualClock>, ManualFrameScheduler) {
    let clock = ManualClock::new(0.0);
    let scheduler = ManualFrameScheduler::from_intervals(clock.clone(), intervals);
    (AnimationProfiler::with_clock(clock), scheduler)
}

#[test]
fn test_steady_sixty_fps_passes_strict_budgets() {
    let (mut profiler, mut frames) = profiler_with(vec![16.67]);

    let metrics = profiler.measure("button-hover", 60, &mut frames);
    assert_relative_eq!(metrics.fps, 60.0, epsilon = 0.5);
    assert!(metrics.is_performant);
    assert!(!metrics.is_poor);

    for budget in ["micro", "hover", "scroll", "transition", "complex"] {
        let report = profiler.generate_report(budget);
        assert!(report.passed, "{}", report.summary());
        assert!(report.violations.is_empty());
    }
}

#[test]
fn test_slow_animation_fails_with_recommendations() {
    let (mut profiler, mut frames) = profiler_with(vec![50.0]);

    let metrics = profiler.measure("page-wipe", 30, &mut frames);
    assert!(metrics.fps < 30.0);
    assert!(metrics.jank_score > 50.0);
    assert!(metrics.is_poor);

    let report = profiler.generate_report("transition");
    assert!(!report.passed);
    assert!(report.violations.contains(BudgetViolations::FRAME_TIME | BudgetViolations::JANK));
    assert!(report.recommendations.iter().any(|r| r.contains("FPS")));
    assert!(report.recommendations.iter().any(|r| r.contains("jank")));

    match report.assert_passed() {
        Err(MotionError::BudgetExceeded { animation_type, details }) => {
            assert_eq!(animation_type, "transition");
            assert!(!details.is_empty());
        }
        other => panic!("expected BudgetExceeded, got {:?}", other),
    }
}

#[test]
fn test_stutter_burst_metrics() {
    let mut intervals = vec![16.0; 50];
    intervals.extend(vec![40.0; 10]);
    let (mut profiler, mut frames) = profiler_with(intervals);

    let metrics = profiler.measure("carousel", 60, &mut frames);

    assert!(metrics.jank_score > 10.0);
    assert!(metrics.frame_variance > 5.0);
    assert!(metrics.longest_frame > 35.0);
    assert_eq!(metrics.total_frames, 60);
}

#[test]
fn test_first_frame_latency() {
    let mut intervals = vec![25.0];
    intervals.extend(vec![16.0; 29]);
    let (mut profiler, mut frames) = profiler_with(intervals);

    let metrics = profiler.measure("modal-open", 30, &mut frames);
    assert_eq!(metrics.animation_latency, 25.0);
}

#[test]
fn test_transition_budget_independent_of_metrics() {
    let (profiler, _) = profiler_with(vec![]);
    assert_eq!(profiler.generate_report("transition").budget.max_frame_time, 33.33);

    let (mut profiler, mut frames) = profiler_with(vec![90.0]);
    profiler.measure("anything", 10, &mut frames);
    assert_eq!(profiler.generate_report("transition").budget.max_frame_time, 33.33);
}

#[test]
fn test_stop_is_idempotent() {
    let (mut profiler, mut frames) = profiler_with(vec![16.0, 22.0, 18.0]);

    let first = profiler.measure("wiggle", 9, &mut frames);
    let second = profiler.stop();
    let third = profiler.stop();

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(profiler.state(), ProfilerState::Stopped);
}

#[test]
fn test_report_before_any_session_fails() {
    let (profiler, _) = profiler_with(vec![]);

    let report = profiler.generate_report("micro");
    assert!(!report.passed);
    assert_eq!(report.metrics.total_frames, 0);
    assert_eq!(report.recommendations.len(), 1);
}

#[test]
fn test_unknown_budget_handling() {
    let (mut profiler, mut frames) = profiler_with(vec![16.67]);
    profiler.measure("blob", 30, &mut frames);

    let report = profiler.generate_report("blob-morph");
    assert_eq!(report.animation_type, "blob-morph");
    assert_eq!(report.budget, PerformanceBudget::transition());

    assert!(matches!(
        profiler.try_generate_report("blob-morph"),
        Err(MotionError::UnknownBudget(ref name)) if name == "blob-morph"
    ));
}

#[test]
fn test_custom_budget_and_memory() {
    let (mut profiler, mut frames) = profiler_with(vec![16.0]);
    profiler
        .budgets_mut()
        .register("blob-morph", PerformanceBudget::for_fps(60.0, 5.0, 2.0))
        .unwrap();

    profiler.start("blob-morph");
    profiler.record_memory_usage(48.0);
    for _ in 0..60 {
        frames.next_frame();
        profiler.record_frame();
    }
    profiler.record_memory_usage(51.5);
    let metrics = profiler.stop();
    assert_eq!(metrics.memory_increase, Some(3.5));

    let report = profiler.try_generate_report("blob-morph").unwrap();
    assert!(!report.passed);
    assert_eq!(report.violations, BudgetViolations::MEMORY);
    assert!(report.recommendations.iter().any(|r| r.contains("Memory")));
}

#[test]
fn test_restart_discards_previous_buffer() {
    let (mut profiler, mut frames) = profiler_with(vec![50.0]);
    profiler.measure("first", 10, &mut frames);

    profiler.start("second");
    assert!(profiler.intervals().is_empty());
    assert_eq!(profiler.label(), Some("second"));
    // Last completed snapshot stays available until the next stop.
    assert_eq!(profiler.metrics().map(|m| m.total_frames), Some(10));

    let metrics = profiler.stop();
    assert_eq!(metrics.total_frames, 0);
}
