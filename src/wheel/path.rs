use crate::foundation::{
    core::{BezPath, Point, Vec2},
    error::{GrooveError, GrooveResult},
    math::{CLOSURE_EPSILON, TAU, points_coincide, turns_of},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One drawing instruction of a groove contour.
///
/// Every variant except [`PathPrimitive::MoveTo`] starts at the previous
/// primitive's end point. Angles grow in the direction of increasing turns.
pub enum PathPrimitive {
    /// Start of the contour.
    MoveTo(Point),
    /// Straight line.
    LineTo(Point),
    /// SVG-style elliptical arc; `x_rotation` is in radians.
    EllipticalArcTo {
        /// Semi-axes before rotation.
        radii: Vec2,
        /// Rotation of the ellipse's first axis, radians.
        x_rotation: f64,
        /// Take the longer of the two candidate arcs.
        large_arc: bool,
        /// Travel in the direction of increasing angle.
        sweep: bool,
        /// End point.
        to: Point,
    },
    /// Arc of a circle centred on the wheel axis, at most half a turn long.
    CircularArcTo {
        /// Circle radius.
        radius: f64,
        /// Angular length in turns, positive towards increasing angle.
        sweep_turns: f64,
        /// End point.
        to: Point,
    },
    /// Cubic Bézier.
    CubicTo {
        /// First control point.
        c1: Point,
        /// Second control point.
        c2: Point,
        /// End point.
        to: Point,
    },
}

impl PathPrimitive {
    pub fn end_point(&self) -> Point {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => p,
            Self::EllipticalArcTo { to, .. }
            | Self::CircularArcTo { to, .. }
            | Self::CubicTo { to, .. } => to,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Closed groove contour of one wheel.
pub struct GroovePath {
    primitives: Vec<PathPrimitive>,
    /// Largest radius reached; scales closure tolerances.
    scale: f64,
}

impl GroovePath {
    pub(crate) fn new(primitives: Vec<PathPrimitive>, scale: f64) -> Self {
        Self { primitives, scale }
    }

    pub fn primitives(&self) -> &[PathPrimitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn start_point(&self) -> Option<Point> {
        match self.primitives.first() {
            Some(PathPrimitive::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn end_point(&self) -> Option<Point> {
        self.primitives.last().map(PathPrimitive::end_point)
    }

    /// Verify the contour is a single closed loop.
    ///
    /// Checks that the path opens with its only `MoveTo`, that every circular arc
    /// starts and ends on its circle and sweeps to its stored end point, and that
    /// the last end point returns to the start.
    pub fn check_closed(&self) -> GrooveResult<()> {
        let Some(start) = self.start_point() else {
            return Err(GrooveError::validation("groove path must begin with MoveTo"));
        };
        let mut current = start;
        for (idx, prim) in self.primitives.iter().enumerate().skip(1) {
            match *prim {
                PathPrimitive::MoveTo(_) => {
                    return Err(GrooveError::validation(format!(
                        "groove path breaks at primitive {idx}"
                    )));
                }
                PathPrimitive::CircularArcTo {
                    radius,
                    sweep_turns,
                    to,
                } => {
                    let on_circle = (current.to_vec2().hypot() - radius).abs()
                        <= CLOSURE_EPSILON * self.scale.max(1.0);
                    let expected = arc_end(current, radius, sweep_turns);
                    if !on_circle || !points_coincide(expected, to, self.scale) {
                        return Err(GrooveError::validation(format!(
                            "circular arc {idx} does not continue from its predecessor"
                        )));
                    }
                }
                _ => {}
            }
            current = prim.end_point();
        }
        if !points_coincide(current, start, self.scale) {
            return Err(GrooveError::validation(format!(
                "groove path ends at ({:.6}, {:.6}) instead of its start ({:.6}, {:.6})",
                current.x, current.y, start.x, start.y
            )));
        }
        Ok(())
    }

    /// Flatten arcs into cubic Béziers (within `tolerance`) and close the path.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        let mut path = BezPath::new();
        let mut current = Point::ORIGIN;
        for prim in &self.primitives {
            match *prim {
                PathPrimitive::MoveTo(p) => path.move_to(p),
                PathPrimitive::LineTo(p) => path.line_to(p),
                PathPrimitive::EllipticalArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let svg_arc = kurbo::SvgArc {
                        from: current,
                        to,
                        radii,
                        x_rotation,
                        large_arc,
                        sweep,
                    };
                    match kurbo::Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => {
                            arc.to_cubic_beziers(tolerance, |p1, p2, p| path.curve_to(p1, p2, p))
                        }
                        None => path.line_to(to),
                    }
                }
                PathPrimitive::CircularArcTo {
                    radius,
                    sweep_turns,
                    ..
                } => {
                    let arc = kurbo::Arc {
                        center: Point::ORIGIN,
                        radii: Vec2::new(radius, radius),
                        start_angle: turns_of(current) * TAU,
                        sweep_angle: sweep_turns * TAU,
                        x_rotation: 0.0,
                    };
                    arc.to_cubic_beziers(tolerance, |p1, p2, p| path.curve_to(p1, p2, p));
                }
                PathPrimitive::CubicTo { c1, c2, to } => path.curve_to(c1, c2, to),
            }
            current = prim.end_point();
        }
        path.close_path();
        path
    }
}

/// Where an arc around the origin starting at `from` ends.
fn arc_end(from: Point, radius: f64, sweep_turns: f64) -> Point {
    crate::foundation::core::polar_point(radius, turns_of(from) + sweep_turns)
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/path.rs"]
mod tests;
