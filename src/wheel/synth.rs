use crate::{
    config::WheelConfig,
    foundation::{
        core::{Point, Turn, Vec2, polar_point},
        error::{GrooveError, GrooveResult},
        math::{GAP_EPSILON, TAU},
    },
    wheel::{
        path::{GroovePath, PathPrimitive},
        trigger::{GrooveForm, Trigger, TriggerSet, WheelSpec},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Angular stretch of the groove with a single radius behaviour.
pub struct PathSegment {
    pub start_angle: Turn,
    pub end_angle: Turn,
    pub form: GrooveForm,
    pub fall_depth: f64,
}

/// Stay, rise and fall segments for every trigger, in trigger order.
pub fn derive_segments(set: &TriggerSet) -> Vec<PathSegment> {
    let mut out = Vec::with_capacity(set.len() * 3);
    for (i, t) in set.triggers().iter().enumerate() {
        let prev = set.predecessor(i);
        out.push(PathSegment {
            start_angle: prev.position,
            end_angle: t.rise_start(),
            form: GrooveForm::Stay,
            fall_depth: 0.0,
        });
        out.push(PathSegment {
            start_angle: t.rise_start(),
            end_angle: t.position,
            form: t.profile,
            fall_depth: t.fall_depth,
        });
        out.push(PathSegment {
            start_angle: t.position,
            end_angle: t.position,
            form: GrooveForm::Fall,
            fall_depth: t.fall_depth,
        });
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Turns a validated [`TriggerSet`] into a closed groove contour.
pub struct PathSynthesizer {
    base_radius: f64,
    max_single_arc_span: f64,
}

impl PathSynthesizer {
    pub fn new(base_radius: f64, max_single_arc_span: f64) -> GrooveResult<Self> {
        if !base_radius.is_finite() || base_radius <= 0.0 {
            return Err(GrooveError::validation("base_radius must be finite and > 0"));
        }
        // the cubic constructions need the curved span below half a turn
        if !max_single_arc_span.is_finite()
            || max_single_arc_span <= 0.0
            || max_single_arc_span >= 0.5
        {
            return Err(GrooveError::validation(
                "max_single_arc_span must be in (0, 0.5) turns",
            ));
        }
        Ok(Self {
            base_radius,
            max_single_arc_span,
        })
    }

    pub fn for_wheel(spec: &WheelSpec, config: &WheelConfig) -> GrooveResult<Self> {
        Self::new(spec.base_radius, config.max_single_arc_span)
    }

    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    /// Emit the contour: a `MoveTo` at the last trigger, then per trigger the
    /// stay arc, the rise and the fall.
    ///
    /// Fails if the emitted primitives do not form one closed loop.
    #[tracing::instrument(skip(self, set), fields(n = set.len()))]
    pub fn synthesize(&self, set: &TriggerSet) -> GrooveResult<GroovePath> {
        let triggers = set.triggers();
        let Some(last) = triggers.last() else {
            return Err(GrooveError::degenerate("cannot synthesize an empty trigger set"));
        };

        let mut prims = Vec::with_capacity(triggers.len() * 4 + 1);
        prims.push(PathPrimitive::MoveTo(self.base_point(last.position.value())));
        let mut deepest = 0.0f64;

        for (i, t) in triggers.iter().enumerate() {
            let rise_start = t.position.value() - t.rise_length.value();
            let stay = set.stay_span(i);
            if stay > GAP_EPSILON {
                push_circular_arc(&mut prims, self.base_radius, rise_start - stay, stay);
            }
            self.emit_rise(&mut prims, t, rise_start);
            prims.push(PathPrimitive::LineTo(self.base_point(t.position.value())));
            deepest = deepest.max(t.fall_depth);
        }

        let path = GroovePath::new(prims, self.base_radius + deepest);
        path.check_closed()?;
        tracing::debug!(primitives = path.len(), "synthesized groove");
        Ok(path)
    }

    fn base_point(&self, turns: f64) -> Point {
        polar_point(self.base_radius, turns)
    }

    fn emit_rise(&self, prims: &mut Vec<PathPrimitive>, t: &Trigger, rise_start: f64) {
        let r0 = self.base_radius;
        let r1 = r0 + t.fall_depth;
        let span = t.rise_length.value();
        let end = t.position.value();

        if span <= GAP_EPSILON {
            prims.push(PathPrimitive::LineTo(polar_point(r1, end)));
            return;
        }
        if t.fall_depth == 0.0 {
            push_circular_arc(prims, r0, rise_start, span);
            return;
        }

        if t.profile == GrooveForm::Linear {
            linear_rise(prims, (r0, r1), rise_start, span, end, self.max_single_arc_span);
            return;
        }

        let curved = span.min(self.max_single_arc_span);
        let bend = if curved < span {
            rise_start + curved
        } else {
            end
        };
        let to = polar_point(r1, bend);

        match t.profile {
            GrooveForm::Ellipse => prims.push(ellipse_rise(r0, r1, rise_start, curved, to)),
            GrooveForm::Cubic => prims.push(cubic_rise(r0, r1, rise_start, curved, to)),
            GrooveForm::OffsetCubic => prims.push(offset_cubic_rise(r0, r1, rise_start, curved, to)),
            // Linear is emitted above; Stay and Fall are rejected by Trigger::validate
            GrooveForm::Linear | GrooveForm::Stay | GrooveForm::Fall => {
                prims.push(PathPrimitive::LineTo(polar_point(r1, end)));
                return;
            }
        }

        if curved < span {
            push_circular_arc(prims, r1, bend, span - curved);
        }
    }
}

/// Archimedean ramp `r = r0 + (r1 - r0) * (angle - start) / span`, as one cubic
/// per piece of at most `max_piece` turns.
///
/// Controls follow the spiral's tangent at both ends with the circular-arc handle
/// length, so a piece never dips inside the circle it starts on.
fn linear_rise(
    prims: &mut Vec<PathPrimitive>,
    (r0, r1): (f64, f64),
    start: f64,
    span: f64,
    end: f64,
    max_piece: f64,
) {
    let count = (span / max_piece - GAP_EPSILON).ceil().max(1.0) as usize;
    let step = span / count as f64;
    // dr / dangle, angle in radians
    let slope = (r1 - r0) / (span * TAU);
    let handle = 4.0 / 3.0 * (step * TAU / 4.0).tan();

    let mut from = (r0, start);
    for k in 1..=count {
        let to = if k == count {
            (r1, end)
        } else {
            let at = start + step * k as f64;
            (r0 + (r1 - r0) * (at - start) / span, at)
        };
        let p0 = polar_point(from.0, from.1);
        let p3 = polar_point(to.0, to.1);
        prims.push(PathPrimitive::CubicTo {
            c1: p0 + spiral_tangent(from.0, slope, from.1) * handle,
            c2: p3 - spiral_tangent(to.0, slope, to.1) * handle,
            to: p3,
        });
        from = to;
    }
}

/// Derivative of a spiral point with respect to its angle in radians.
fn spiral_tangent(radius: f64, slope: f64, turns: f64) -> Vec2 {
    let (sin, cos) = (turns * TAU).sin_cos();
    Vec2::new(slope * cos - radius * sin, slope * sin + radius * cos)
}

/// Elliptical arc with the long axis (`r1`) along the span's mid angle.
fn ellipse_rise(r0: f64, r1: f64, start: f64, span: f64, to: Point) -> PathPrimitive {
    PathPrimitive::EllipticalArcTo {
        radii: Vec2::new(r1, r0),
        x_rotation: (start + span / 2.0) * TAU,
        large_arc: false,
        sweep: true,
        to,
    }
}

/// Cubic leaving tangent to the base circle and arriving tangent to the raised circle.
///
/// Both control points sit on the ray at the mid angle, where the two tangents cross it.
fn cubic_rise(r0: f64, r1: f64, start: f64, span: f64, to: Point) -> PathPrimitive {
    let half = span / 2.0;
    let secant = (half * TAU).cos().recip();
    PathPrimitive::CubicTo {
        c1: polar_point(r0 * secant, start + half),
        c2: polar_point(r1 * secant, start + half),
        to,
    }
}

/// Like [`cubic_rise`], with the controls on the rays at 1/3 of the span from the
/// start and 1/4 of the span before the end.
fn offset_cubic_rise(r0: f64, r1: f64, start: f64, span: f64, to: Point) -> PathPrimitive {
    let lead = span / 3.0;
    let trail = span / 4.0;
    PathPrimitive::CubicTo {
        c1: polar_point(r0 / (lead * TAU).cos(), start + lead),
        c2: polar_point(r1 / (trail * TAU).cos(), start + span - trail),
        to,
    }
}

/// Arc around the axis from `start` over `sweep` turns, split so no piece exceeds half a turn.
fn push_circular_arc(prims: &mut Vec<PathPrimitive>, radius: f64, start: f64, sweep: f64) {
    let pieces = if sweep > 0.5 { 2 } else { 1 };
    let step = sweep / f64::from(pieces);
    for k in 1..=pieces {
        let at = if k == pieces {
            start + sweep
        } else {
            start + step * f64::from(k)
        };
        prims.push(PathPrimitive::CircularArcTo {
            radius,
            sweep_turns: step,
            to: polar_point(radius, at),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/synth.rs"]
mod tests;
