//! Demonstrates frame profiling and budget reports.
//!
//! This example shows how to:
//! - Profile scripted frame sequences with a manual clock
//! - Grade runs against the built-in budgets
//! - Register a custom budget and track memory growth
//! - Smoke-test against the wall clock with a sleeping scheduler
//!
//! Run with: cargo run --example profile_demo

use wobblaz_motion::{
    budget::{fps_to_frame_budget, PerformanceBudget, BUILTIN_BUDGETS},
    clock::{ManualClock, ManualFrameScheduler, SleepFrameScheduler},
    stats::FrameStats,
    AnimationProfiler, FrameScheduler, Result,
};

fn main() -> Result<()> {
    println!("=== Animation Profiler Demo ===\n");

    // Demo 1: Smooth vs. stuttering runs
    demo_scripted_runs();

    // Demo 2: Custom budget with memory tracking
    demo_custom_budget()?;

    // Demo 3: Wall clock
    demo_wall_clock();

    // Demo 4: Budget table
    demo_budget_table();

    Ok(())
}

fn demo_scripted_runs() {
    println!("--- Demo 1: Scripted Runs ---");

    let runs: [(&str, Vec<f64>); 3] = [
        ("smooth-fade", vec![16.67]),
        ("stutter-slide", [vec![16.0; 5], vec![40.0]].concat()),
        ("heavy-wipe", vec![50.0]),
    ];

    for (label, intervals) in runs {
        let clock = ManualClock::new(0.0);
        let mut frames = ManualFrameScheduler::from_intervals(clock.clone(), intervals);
        let mut profiler = AnimationProfiler::with_clock(clock);

        profiler.measure(label, 60, &mut frames);
        let stats = FrameStats::from_intervals(profiler.intervals());
        println!("{}", stats.summary());

        let report = profiler.generate_report("scroll");
        println!("{}\n", report.summary());
    }
}

fn demo_custom_budget() -> Result<()> {
    println!("--- Demo 2: Custom Budget ---");

    let clock = ManualClock::new(0.0);
    let mut frames = ManualFrameScheduler::uniform(clock.clone(), 20.0);
    let mut profiler = AnimationProfiler::with_clock(clock);
    profiler
        .budgets_mut()
        .register("blob-morph", PerformanceBudget::for_fps(45.0, 8.0, 4.0))?;

    profiler.start("blob-morph");
    profiler.record_memory_usage(62.0);
    for frame in 0..45 {
        frames.next_frame();
        profiler.record_frame();
        if frame % 15 == 0 {
            profiler.record_memory_usage(62.0 + f64::from(frame) * 0.05);
        }
    }
    profiler.stop();

    let report = profiler.try_generate_report("blob-morph")?;
    println!("{}", report.summary());
    match report.assert_passed() {
        Ok(()) => println!("✓ within budget\n"),
        Err(err) => println!("✗ {}\n", err),
    }

    Ok(())
}

fn demo_wall_clock() {
    println!("--- Demo 3: Wall Clock ---");

    let mut frames = SleepFrameScheduler::with_target_fps(60.0);
    let mut profiler = AnimationProfiler::new();
    let metrics = profiler.measure("sleep-loop", 30, &mut frames);

    println!(
        "Slept {:?} per frame, measured {:.1} FPS (latency {:.2}ms)\n",
        frames.frame_time(),
        metrics.fps,
        metrics.animation_latency
    );
}

fn demo_budget_table() {
    println!("--- Demo 4: Built-in Budgets ---");

    let profiler = AnimationProfiler::new();
    for name in BUILTIN_BUDGETS {
        if let Some(budget) = profiler.budgets().get(name) {
            println!(
                "{:<10} {:>3} FPS  {:>6.2}ms (exact {:.3}ms)  jank ≤ {:>4.1}%  memory ≤ {}MB",
                name,
                budget.target_fps,
                budget.max_frame_time,
                fps_to_frame_budget(budget.target_fps),
                budget.max_jank_percentage,
                budget.max_memory_increase
            );
        }
    }
}
