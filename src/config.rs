//! Aggregate configuration for the motion layer.
//!
//! [`MotionConfig`] bundles every tunable in one value so a host can keep it
//! in a single JSON document. Missing sections fall back to their defaults.
//!
//! # Example
//!
//! ```rust
//! use wobblaz_motion::{config::MotionConfig, gesture::GestureConfig};
//!
//! let config = MotionConfig::default()
//!     .with_gesture(GestureConfig::default().with_min_distance(80.0))
//!     .with_debounce_ms(150.0);
//!
//! config.validate().unwrap();
//! let profiler = config.profiler().unwrap();
//! assert!(profiler.budgets().contains("transition"));
//! ```

use std::collections::BTreeMap;
#[cfg(feature = "serde")]
use std::{fs, path::Path};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    budget::{BudgetRegistry, PerformanceBudget},
    error::{MotionError, Result},
    gesture::GestureConfig,
    haptics::{HapticPattern, HapticRegistry},
    physics::MagneticHover,
    profiler::{AnimationProfiler, ProfilerThresholds},
};

/// Default quiet period for debounced gesture handlers, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: f64 = 100.0;

/// Every tunable of the motion layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Swipe recognition thresholds.
    pub gesture: GestureConfig,
    /// Jank and quality thresholds for the profiler.
    pub profiler: ProfilerThresholds,
    /// Budgets registered on top of the built-ins, replacing same-named ones.
    pub budgets: BTreeMap<String, PerformanceBudget>,
    /// Haptic patterns registered on top of the built-ins.
    pub haptics: BTreeMap<String, HapticPattern>,
    /// Whether haptic feedback starts enabled.
    pub haptics_enabled: bool,
    /// Magnetic hover tuning.
    pub magnetic: MagneticHover,
    /// Quiet period for debounced gesture handlers, in milliseconds.
    pub debounce_ms: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            profiler: ProfilerThresholds::default(),
            budgets: BTreeMap::new(),
            haptics: BTreeMap::new(),
            haptics_enabled: true,
            magnetic: MagneticHover::default(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl MotionConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gesture thresholds.
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Sets the profiler thresholds.
    pub fn with_profiler(mut self, profiler: ProfilerThresholds) -> Self {
        self.profiler = profiler;
        self
    }

    /// Adds a custom budget.
    pub fn with_budget(mut self, name: impl Into<String>, budget: PerformanceBudget) -> Self {
        self.budgets.insert(name.into(), budget);
        self
    }

    /// Adds a custom haptic pattern.
    pub fn with_haptic(mut self, name: impl Into<String>, pattern: HapticPattern) -> Self {
        self.haptics.insert(name.into(), pattern);
        self
    }

    /// Sets whether haptics start enabled.
    pub fn with_haptics_enabled(mut self, enabled: bool) -> Self {
        self.haptics_enabled = enabled;
        self
    }

    /// Sets the debounce quiet period.
    pub fn with_debounce_ms(mut self, debounce_ms: f64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidConfig`] for the first out-of-range
    /// value, or [`MotionError::InvalidPattern`] for an unusable haptic
    /// pattern.
    pub fn validate(&self) -> Result<()> {
        self.gesture.validate()?;

        let positive = [
            ("profiler.ideal_frame_time", self.profiler.ideal_frame_time),
            ("profiler.jank_tolerance", self.profiler.jank_tolerance),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, value));
            }
        }

        if !(self.debounce_ms.is_finite() && self.debounce_ms >= 0.0) {
            return Err(invalid("debounce_ms", self.debounce_ms));
        }
        if !(self.magnetic.radius.is_finite() && self.magnetic.radius >= 0.0) {
            return Err(invalid("magnetic.radius", self.magnetic.radius));
        }
        if !(self.magnetic.smoothing > 0.0 && self.magnetic.smoothing <= 1.0) {
            return Err(invalid("magnetic.smoothing", self.magnetic.smoothing));
        }

        self.budget_registry()?;
        self.haptic_registry()?;
        Ok(())
    }

    /// Built-in budgets plus the configured ones.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidConfig`] if a configured budget is invalid.
    pub fn budget_registry(&self) -> Result<BudgetRegistry> {
        let mut registry = BudgetRegistry::default();
        for (name, budget) in &self.budgets {
            registry.register(name, *budget)?;
        }
        Ok(registry)
    }

    /// Built-in haptic patterns plus the configured ones.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidPattern`] if a configured pattern is unusable.
    pub fn haptic_registry(&self) -> Result<HapticRegistry> {
        let mut registry = HapticRegistry::default();
        for (name, pattern) in &self.haptics {
            registry.register(name, pattern.clone())?;
        }
        Ok(registry)
    }

    /// A wall-clock profiler using these thresholds and budgets.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidConfig`] if a configured budget is invalid.
    pub fn profiler(&self) -> Result<AnimationProfiler> {
        Ok(AnimationProfiler::new()
            .with_thresholds(self.profiler)
            .with_budgets(self.budget_registry()?))
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::Config`] for malformed JSON, otherwise whatever
    /// [`validate`](Self::validate) reports.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "loaded motion config: {} custom budgets, {} custom haptic patterns",
            config.budgets.len(),
            config.haptics.len()
        );
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_json_str`](Self::from_json_str).
    #[cfg(feature = "serde")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::Config`] if serialization fails.
    #[cfg(feature = "serde")]
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn invalid(field: &str, value: f64) -> MotionError {
    MotionError::InvalidConfig { field: field.to_string(), value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MotionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert!(config.haptics_enabled);
    }

    #[test]
    fn test_invalid_gesture_rejected() {
        let config =
            MotionConfig::default().with_gesture(GestureConfig::default().with_min_distance(0.0));

        match config.validate() {
            Err(MotionError::InvalidConfig { field, .. }) => assert_eq!(field, "min_distance"),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_debounce_rejected() {
        let config = MotionConfig::default().with_debounce_ms(-1.0);
        assert!(matches!(config.validate(), Err(MotionError::InvalidConfig { .. })));
    }

    #[test]
    fn test_invalid_profiler_thresholds() {
        let config = MotionConfig::default()
            .with_profiler(ProfilerThresholds::default().with_jank_definition(0.0, 1.2));

        match config.validate() {
            Err(MotionError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "profiler.ideal_frame_time")
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_budgets_registered() {
        let config = MotionConfig::default()
            .with_budget("hero", PerformanceBudget::for_fps(60.0, 3.0, 2.0))
            .with_budget("micro", PerformanceBudget::new(120.0, 8.33, 1.0, 1.0));

        let registry = config.budget_registry().unwrap();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.get("micro").unwrap().target_fps, 120.0);

        let profiler = config.profiler().unwrap();
        assert!(profiler.budgets().contains("hero"));
    }

    #[test]
    fn test_invalid_custom_budget() {
        let config =
            MotionConfig::default().with_budget("broken", PerformanceBudget::new(60.0, -1.0, 5.0, 1.0));
        assert!(config.profiler().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_haptics() {
        let config = MotionConfig::default().with_haptic("wobble", vec![15, 30, 15].into());
        let registry = config.haptic_registry().unwrap();
        assert_eq!(registry.get("wobble").unwrap().durations(), &[15, 30, 15]);

        let silent = MotionConfig::default().with_haptic("mute", vec![0].into());
        assert!(matches!(silent.validate(), Err(MotionError::InvalidPattern(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MotionConfig::from_json_str(r#"{ "gesture": { "min_distance": 75.0 } }"#)
            .unwrap();

        assert_eq!(config.gesture.min_distance, 75.0);
        assert_eq!(config.gesture.min_velocity, 0.3);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            MotionConfig::from_json_str("{ not json"),
            Err(MotionError::Config(_))
        ));
    }
}
