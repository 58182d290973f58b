use crate::foundation::math::{GAP_EPSILON, TAU};

pub use kurbo::{BezPath, Point, Vec2};

/// An angular position expressed as a fraction of one full wheel rotation.
///
/// Values are always kept in `[0, 1)`; constructing a `Turn` from any real number
/// takes it modulo 1. Serialized as a bare number.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Turn(f64);

impl Turn {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f64) -> Self {
        let r = value.rem_euclid(1.0);
        // rem_euclid of a tiny negative value rounds up to exactly 1.0
        if r >= 1.0 { Self(0.0) } else { Self(r + 0.0) }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0 * TAU
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Shift by `delta` turns (either sign), wrapping cyclically.
    pub fn offset(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    /// Forward (increasing angle) gap from `self` to `to`, in `[0, 1)`.
    ///
    /// Gaps within [`GAP_EPSILON`] of a full turn are rounding noise from a
    /// position that sits marginally behind `self` and collapse to `0`.
    pub fn forward_to(self, to: Turn) -> f64 {
        let gap = (to.0 - self.0).rem_euclid(1.0);
        if gap >= 1.0 - GAP_EPSILON { 0.0 } else { gap }
    }

    /// Shortest cyclic distance in either direction, in `[0, 0.5]`.
    pub fn distance(self, other: Turn) -> f64 {
        let fwd = self.forward_to(other);
        fwd.min(1.0 - fwd)
    }
}

impl From<f64> for Turn {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Turn> for f64 {
    fn from(value: Turn) -> Self {
        value.0
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Point at `radius` from the wheel centre and `turns` around it.
///
/// `turns` is not wrapped, so callers may pass an unnormalized angle.
pub fn polar_point(radius: f64, turns: f64) -> Point {
    let theta = turns * TAU;
    Point::new(radius * theta.cos(), radius * theta.sin())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
