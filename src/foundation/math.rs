use kurbo::Point;

pub(crate) const TAU: f64 = std::f64::consts::TAU;

/// Tolerance applied to cyclic gap comparisons, in turns.
pub(crate) const GAP_EPSILON: f64 = 1e-9;

/// Absolute tolerance for contour closure checks, scaled by the wheel size.
pub(crate) const CLOSURE_EPSILON: f64 = 1e-9;

/// `a >= b` allowing `b` to exceed `a` by rounding noise.
pub(crate) fn at_least(a: f64, b: f64) -> bool {
    a + GAP_EPSILON >= b
}

/// Whether two points coincide relative to `scale` (typically the outer radius).
pub(crate) fn points_coincide(a: Point, b: Point, scale: f64) -> bool {
    a.distance(b) <= CLOSURE_EPSILON * scale.abs().max(1.0)
}

/// Polar angle of `p`, in turns within `[0, 1)`.
pub(crate) fn turns_of(p: Point) -> f64 {
    let t = p.y.atan2(p.x) / TAU;
    if t < 0.0 { t + 1.0 } else { t }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
