//! Small motion helpers used by hover, scroll and entrance effects.
//!
//! Everything here is pure arithmetic over `f64`. Stateful helpers keep only
//! their smoothed output between calls; the host decides when to call them,
//! usually once per animation frame.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear interpolation from `start` to `end` by `t`.
///
/// `t` is not clamped.
///
/// # Example
///
/// ```rust
/// use wobblaz_motion::physics::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
/// ```
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Restricts `value` to `[min, max]`.
///
/// NaN passes through. Unlike [`f64::clamp`], never panics when `min > max`;
/// `min` wins in that case.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let capped = if value > max { max } else { value };
    if capped < min {
        min
    } else {
        capped
    }
}

/// Axis-aligned element bounds in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Centre point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Pulls an element toward the pointer while it is within `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct MagneticHover {
    /// Fraction of the pointer offset the element follows.
    pub strength: f64,
    /// Distance from the centre beyond which there is no pull.
    pub radius: f64,
    /// Per-step interpolation factor in `(0, 1]`.
    pub smoothing: f64,
}

impl Default for MagneticHover {
    fn default() -> Self {
        Self { strength: 0.3, radius: 100.0, smoothing: 0.15 }
    }
}

impl MagneticHover {
    /// Sets the pull strength.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Sets the capture radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the smoothing factor.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Offset the element should settle at for this pointer position.
    ///
    /// Zero when the pointer is farther than `radius` from `center`.
    pub fn target_offset(&self, pointer: (f64, f64), center: (f64, f64)) -> (f64, f64) {
        let dx = pointer.0 - center.0;
        let dy = pointer.1 - center.1;
        if dx.hypot(dy) > self.radius {
            return (0.0, 0.0);
        }
        (dx * self.strength, dy * self.strength)
    }

    /// Moves `offset` one smoothing step toward `target`.
    pub fn step(&self, offset: (f64, f64), target: (f64, f64)) -> (f64, f64) {
        let t = clamp(self.smoothing, 0.0, 1.0);
        (lerp(offset.0, target.0, t), lerp(offset.1, target.1, t))
    }
}

/// Tracks the pointer as a percentage position inside an element, for
/// pointer-following gradients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientFollow {
    smoothing: f64,
    current: (f64, f64),
}

impl Default for GradientFollow {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl GradientFollow {
    /// Starts centred at (50%, 50%).
    pub fn new(smoothing: f64) -> Self {
        Self { smoothing: clamp(smoothing, 0.0, 1.0), current: (50.0, 50.0) }
    }

    /// Last smoothed position.
    pub fn current(&self) -> (f64, f64) {
        self.current
    }

    /// Feeds a pointer position and returns the smoothed `(pct_x, pct_y)`,
    /// each in `[0, 100]`.
    ///
    /// A zero-sized rect targets the centre.
    pub fn position(&mut self, pointer: (f64, f64), rect: Rect) -> (f64, f64) {
        let target = (
            percent_along(pointer.0 - rect.x, rect.width),
            percent_along(pointer.1 - rect.y, rect.height),
        );
        self.current = (
            lerp(self.current.0, target.0, self.smoothing),
            lerp(self.current.1, target.1, self.smoothing),
        );
        self.current
    }

    /// Jumps back to the centre.
    pub fn reset(&mut self) {
        self.current = (50.0, 50.0);
    }
}

fn percent_along(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        clamp(offset / extent * 100.0, 0.0, 100.0)
    } else {
        50.0
    }
}

/// Vertical translation for a layer scrolling at `speed` times the page.
pub fn parallax_offset(scroll: f64, speed: f64) -> f64 {
    scroll * speed
}

/// Entrance delay for the `index`th item of a staggered group, capped at `max`.
///
/// # Example
///
/// ```rust
/// use wobblaz_motion::physics::stagger_delay;
///
/// assert_eq!(stagger_delay(0, 100.0, 50.0, 300.0), 100.0);
/// assert_eq!(stagger_delay(3, 100.0, 50.0, 300.0), 250.0);
/// assert_eq!(stagger_delay(10, 100.0, 50.0, 300.0), 300.0);
/// ```
pub fn stagger_delay(index: usize, base: f64, step: f64, max: f64) -> f64 {
    (base + index as f64 * step).min(max)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(3.0, 9.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 9.0, 1.0), 9.0);
        assert_eq!(lerp(3.0, 9.0, 0.5), 6.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.4, 0.0, 1.0), 0.4);
        assert_eq!(clamp(5.0, 3.0, 1.0), 3.0);
        assert!(clamp(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_magnetic_within_radius() {
        let magnet = MagneticHover::default();
        let offset = magnet.target_offset((130.0, 90.0), (100.0, 100.0));

        assert_relative_eq!(offset.0, 9.0);
        assert_relative_eq!(offset.1, -3.0);
    }

    #[test]
    fn test_magnetic_outside_radius() {
        let magnet = MagneticHover::default().with_radius(20.0);
        assert_eq!(magnet.target_offset((130.0, 100.0), (100.0, 100.0)), (0.0, 0.0));
    }

    #[test]
    fn test_magnetic_step_converges() {
        let magnet = MagneticHover::default().with_smoothing(0.5);
        let target = (10.0, -4.0);

        let mut offset = (0.0, 0.0);
        offset = magnet.step(offset, target);
        assert_eq!(offset, (5.0, -2.0));

        for _ in 0..60 {
            offset = magnet.step(offset, target);
        }
        assert_relative_eq!(offset.0, 10.0, epsilon = 1e-9);
        assert_relative_eq!(offset.1, -4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_gradient_clamped_and_smoothed() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        let mut follow = GradientFollow::new(1.0);

        assert_eq!(follow.position((150.0, 175.0), rect), (25.0, 75.0));
        assert_eq!(follow.position((900.0, -50.0), rect), (100.0, 0.0));

        let mut smooth = GradientFollow::new(0.5);
        assert_eq!(smooth.position((300.0, 200.0), rect), (75.0, 75.0));
        smooth.reset();
        assert_eq!(smooth.current(), (50.0, 50.0));
    }

    #[test]
    fn test_gradient_zero_sized_rect() {
        let mut follow = GradientFollow::new(1.0);
        assert_eq!(follow.position((10.0, 10.0), Rect::default()), (50.0, 50.0));
    }

    #[test]
    fn test_parallax_and_stagger() {
        assert_eq!(parallax_offset(400.0, 0.5), 200.0);
        assert_eq!(parallax_offset(400.0, -0.25), -100.0);
        assert_eq!(stagger_delay(2, 0.0, 80.0, 1_000.0), 160.0);
    }

    #[test]
    fn test_rect_center() {
        assert_eq!(Rect::new(10.0, 20.0, 100.0, 40.0).center(), (60.0, 40.0));
    }
}
