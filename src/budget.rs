//! Named performance budgets.
//!
//! A [`PerformanceBudget`] is the frame-time, jank and memory allowance for
//! one kind of animation. Budgets live in a caller-owned [`BudgetRegistry`]
//! that starts out with five built-in profiles, ordered from strictest to
//! most lenient:
//!
//! | name | target FPS | max frame time | max jank % | max memory increase |
//! |---|---|---|---|---|
//! | `micro` | 60 | 16.67ms | 2 | 1 MB |
//! | `hover` | 60 | 16.67ms | 5 | 2 MB |
//! | `scroll` | 60 | 16.67ms | 5 | 5 MB |
//! | `transition` | 30 | 33.33ms | 10 | 5 MB |
//! | `complex` | 24 | 41.67ms | 15 | 10 MB |
//!
//! # Example
//!
//! ```rust
//! use wobblaz_motion::budget::{BudgetRegistry, PerformanceBudget};
//!
//! let mut registry = BudgetRegistry::default();
//! registry
//!     .register("carousel", PerformanceBudget::new(45.0, 22.22, 8.0, 4.0))
//!     .unwrap();
//!
//! assert_eq!(registry.get("transition").unwrap().max_frame_time, 33.33);
//! assert_eq!(registry.get("carousel").unwrap().target_fps, 45.0);
//! ```

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

/// Name of the budget used when a requested name is not registered.
pub const DEFAULT_BUDGET: &str = "transition";

/// Names of the built-in budgets, strictest first.
pub const BUILTIN_BUDGETS: [&str; 5] = ["micro", "hover", "scroll", "transition", "complex"];

/// Frame-time, jank and memory allowance for one kind of animation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerformanceBudget {
    /// Frame rate the animation should sustain.
    pub target_fps: f64,
    /// Longest acceptable average frame time in milliseconds.
    pub max_frame_time: f64,
    /// Highest acceptable jank score (percent).
    pub max_jank_percentage: f64,
    /// Largest acceptable memory growth during the run, in megabytes.
    pub max_memory_increase: f64,
}

impl PerformanceBudget {
    /// Creates a budget.
    pub fn new(
        target_fps: f64,
        max_frame_time: f64,
        max_jank_percentage: f64,
        max_memory_increase: f64,
    ) -> Self {
        Self { target_fps, max_frame_time, max_jank_percentage, max_memory_increase }
    }

    /// Creates a budget whose frame time is derived from `target_fps`.
    ///
    /// Unlike the built-in profiles, the frame time is not rounded.
    pub fn for_fps(target_fps: f64, max_jank_percentage: f64, max_memory_increase: f64) -> Self {
        Self::new(
            target_fps,
            fps_to_frame_budget(target_fps),
            max_jank_percentage,
            max_memory_increase,
        )
    }

    /// Tightest budget: 60 FPS, almost no jank.
    pub fn micro() -> Self {
        Self::new(60.0, 16.67, 2.0, 1.0)
    }

    /// Pointer hover effects at 60 FPS.
    pub fn hover() -> Self {
        Self::new(60.0, 16.67, 5.0, 2.0)
    }

    /// Scroll-linked effects at 60 FPS.
    pub fn scroll() -> Self {
        Self::new(60.0, 16.67, 5.0, 5.0)
    }

    /// Page and section transitions with a 30 FPS allowance.
    pub fn transition() -> Self {
        Self::new(30.0, 33.33, 10.0, 5.0)
    }

    /// Heavy multi-element choreography; the most lenient built-in.
    pub fn complex() -> Self {
        Self::new(24.0, 41.67, 15.0, 10.0)
    }

    /// Checks that every field is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("target_fps", self.target_fps),
            ("max_frame_time", self.max_frame_time),
            ("max_jank_percentage", self.max_jank_percentage),
            ("max_memory_increase", self.max_memory_increase),
        ];

        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(MotionError::InvalidConfig { field: field.to_string(), value });
            }
        }

        Ok(())
    }
}

/// Frame time in milliseconds for a target frame rate.
///
/// Returns `0.0` for a non-positive or non-finite target.
///
/// # Example
///
/// ```rust
/// use wobblaz_motion::budget::fps_to_frame_budget;
///
/// // 60 FPS = 16.67ms per frame
/// assert!((fps_to_frame_budget(60.0) - 16.666).abs() < 0.01);
/// ```
pub fn fps_to_frame_budget(fps_target: f64) -> f64 {
    if fps_target.is_finite() && fps_target > 0.0 {
        1000.0 / fps_target
    } else {
        0.0
    }
}

/// Caller-owned mapping from animation type to budget.
///
/// `BudgetRegistry::default()` contains the built-in profiles. Custom entries
/// added with [`register`](Self::register) are visible only through this
/// registry instance.
#[derive(Debug, Clone)]
pub struct BudgetRegistry {
    budgets: HashMap<String, PerformanceBudget>,
    /// Registration order for iteration.
    order: Vec<String>,
}

impl Default for BudgetRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        let builtins = [
            PerformanceBudget::micro(),
            PerformanceBudget::hover(),
            PerformanceBudget::scroll(),
            PerformanceBudget::transition(),
            PerformanceBudget::complex(),
        ];
        for (name, budget) in BUILTIN_BUDGETS.iter().zip(builtins) {
            registry.insert(name, budget);
        }
        registry
    }
}

impl BudgetRegistry {
    /// Creates a registry holding the built-in budgets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with no budgets at all.
    pub fn empty() -> Self {
        Self { budgets: HashMap::new(), order: Vec::new() }
    }

    /// Adds or replaces the budget registered under `name`.
    ///
    /// Returns the budget previously registered under that name, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidConfig`] if the budget fails
    /// [`PerformanceBudget::validate`]; the registry is left unchanged.
    pub fn register(
        &mut self,
        name: &str,
        budget: PerformanceBudget,
    ) -> Result<Option<PerformanceBudget>> {
        budget.validate()?;

        let previous = self.insert(name, budget);
        if previous.is_some() {
            log::debug!("performance budget '{}' replaced", name);
        }
        Ok(previous)
    }

    /// Looks up a budget by name.
    pub fn get(&self, name: &str) -> Option<&PerformanceBudget> {
        self.budgets.get(name)
    }

    /// Looks up a budget by name, reporting unknown names as errors.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::UnknownBudget`] if nothing is registered under `name`.
    pub fn require(&self, name: &str) -> Result<&PerformanceBudget> {
        self.get(name)
            .ok_or_else(|| MotionError::UnknownBudget(name.to_string()))
    }

    /// Returns whether a budget is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.budgets.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Number of registered budgets.
    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    fn insert(&mut self, name: &str, budget: PerformanceBudget) -> Option<PerformanceBudget> {
        let name = name.to_string();
        if !self.budgets.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.budgets.insert(name, budget)
    }
}
