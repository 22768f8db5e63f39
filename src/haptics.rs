//! Named vibration patterns and a dispatcher over the host vibration API.
//!
//! Patterns alternate vibrate and pause durations in milliseconds, the same
//! layout the browser vibration API takes. A [`HapticRegistry`] maps names to
//! patterns and starts out with the built-ins listed on
//! [`BUILTIN_PATTERNS`]. [`HapticFeedback`] looks patterns up and hands them
//! to a [`VibrationDriver`].
//!
//! # Example
//!
//! ```rust
//! use wobblaz_motion::haptics::{HapticFeedback, HapticPattern, HapticRegistry, NullDriver};
//!
//! let mut registry = HapticRegistry::default();
//! registry.register("wobble", HapticPattern::new(vec![15, 30, 15, 30, 15])).unwrap();
//!
//! let mut haptics = HapticFeedback::new(NullDriver).with_registry(registry);
//!
//! // No vibration hardware: dispatch is a quiet no-op.
//! assert!(!haptics.trigger("wobble"));
//! ```

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

/// Built-in pattern names with their durations.
pub const BUILTIN_PATTERNS: [(&str, &[u32]); 7] = [
    ("light", &[10]),
    ("medium", &[20]),
    ("heavy", &[30]),
    ("success", &[10, 50, 10]),
    ("warning", &[20, 100, 20]),
    ("error", &[30, 50, 30, 50, 30]),
    ("selection", &[5]),
];

/// Alternating vibrate/pause durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct HapticPattern(Vec<u32>);

impl HapticPattern {
    /// Creates a pattern from raw durations.
    pub fn new(durations: Vec<u32>) -> Self {
        Self(durations)
    }

    /// Looks up a built-in pattern by name.
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN_PATTERNS
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, durations)| Self(durations.to_vec()))
    }

    /// Raw durations.
    pub fn durations(&self) -> &[u32] {
        &self.0
    }

    /// Sum of all vibrate and pause segments.
    pub fn total_duration(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, d| acc.saturating_add(*d))
    }

    /// Whether the pattern never actually vibrates.
    pub fn is_silent(&self) -> bool {
        self.0.iter().step_by(2).all(|d| *d == 0)
    }
}

impl From<Vec<u32>> for HapticPattern {
    fn from(durations: Vec<u32>) -> Self {
        Self::new(durations)
    }
}

/// Caller-owned mapping from name to [`HapticPattern`].
#[derive(Debug, Clone)]
pub struct HapticRegistry {
    patterns: HashMap<String, HapticPattern>,
}

impl Default for HapticRegistry {
    fn default() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(name, durations)| (name.to_string(), HapticPattern(durations.to_vec())))
            .collect();
        Self { patterns }
    }
}

impl HapticRegistry {
    /// Creates a registry with no patterns.
    pub fn empty() -> Self {
        Self { patterns: HashMap::new() }
    }

    /// Adds or replaces a pattern. Returns the replaced pattern, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidPattern`] if the pattern is empty or
    /// never vibrates.
    pub fn register(
        &mut self,
        name: &str,
        pattern: HapticPattern,
    ) -> Result<Option<HapticPattern>> {
        if pattern.durations().is_empty() || pattern.is_silent() {
            return Err(MotionError::InvalidPattern(name.to_string()));
        }
        let previous = self.patterns.insert(name.to_string(), pattern);
        if previous.is_some() {
            log::debug!("haptic pattern '{}' replaced", name);
        }
        Ok(previous)
    }

    /// Looks up a pattern.
    pub fn get(&self, name: &str) -> Option<&HapticPattern> {
        self.patterns.get(name)
    }

    /// Looks up a pattern, reporting unknown names as errors.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::UnknownPattern`] if `name` is not registered.
    pub fn require(&self, name: &str) -> Result<&HapticPattern> {
        self.get(name)
            .ok_or_else(|| MotionError::UnknownPattern(name.to_string()))
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Host vibration API.
pub trait VibrationDriver {
    /// Whether the device can vibrate at all.
    fn is_supported(&self) -> bool;

    /// Plays `pattern`. Returns whether the host accepted it.
    fn vibrate(&mut self, pattern: &[u32]) -> bool;

    /// Stops any running vibration.
    fn cancel(&mut self) {
        self.vibrate(&[0]);
    }
}

/// Driver for hosts without vibration support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDriver;

impl VibrationDriver for NullDriver {
    fn is_supported(&self) -> bool {
        false
    }

    fn vibrate(&mut self, _pattern: &[u32]) -> bool {
        false
    }

    fn cancel(&mut self) {}
}

/// Plays named patterns through a [`VibrationDriver`].
#[derive(Debug)]
pub struct HapticFeedback<D: VibrationDriver> {
    driver: D,
    registry: HapticRegistry,
    enabled: bool,
}

impl<D: VibrationDriver> HapticFeedback<D> {
    /// Creates an enabled dispatcher over the built-in patterns.
    pub fn new(driver: D) -> Self {
        Self { driver, registry: HapticRegistry::default(), enabled: true }
    }

    /// Replaces the pattern registry.
    pub fn with_registry(mut self, registry: HapticRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the initial enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Enables or disables dispatch. Disabling stops any running vibration.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.driver.cancel();
        }
        self.enabled = enabled;
    }

    /// Whether dispatch is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a pattern would reach the hardware.
    pub fn is_available(&self) -> bool {
        self.enabled && self.driver.is_supported()
    }

    /// The pattern registry.
    pub fn registry(&self) -> &HapticRegistry {
        &self.registry
    }

    /// Mutable access to the pattern registry.
    pub fn registry_mut(&mut self) -> &mut HapticRegistry {
        &mut self.registry
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Plays the pattern registered under `name`.
    ///
    /// Returns whether it was played. Unknown names are logged and ignored.
    pub fn trigger(&mut self, name: &str) -> bool {
        match self.try_trigger(name) {
            Ok(played) => played,
            Err(err) => {
                log::warn!("{}", err);
                false
            }
        }
    }

    /// Plays the pattern registered under `name`.
    ///
    /// Returns `Ok(false)` when disabled or unsupported.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::UnknownPattern`] if `name` is not registered.
    pub fn try_trigger(&mut self, name: &str) -> Result<bool> {
        let pattern = self.registry.require(name)?;
        if !(self.enabled && self.driver.is_supported()) {
            return Ok(false);
        }
        Ok(self.driver.vibrate(pattern.durations()))
    }

    /// Plays an unregistered pattern.
    pub fn play(&mut self, pattern: &HapticPattern) -> bool {
        if !self.is_available() || pattern.is_silent() {
            return false;
        }
        self.driver.vibrate(pattern.durations())
    }

    /// Stops any running vibration.
    pub fn stop(&mut self) {
        if self.driver.is_supported() {
            self.driver.cancel();
        }
    }
}
