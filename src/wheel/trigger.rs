use crate::foundation::{
    core::Turn,
    error::{GrooveError, GrooveResult},
    math::at_least,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// How the groove radius behaves across one segment.
pub enum GrooveForm {
    /// Constant base radius.
    Stay,
    /// Instantaneous radial drop back to base radius.
    Fall,
    /// Radius grows linearly with angle across the whole rise.
    Linear,
    /// Elliptical arc, extended by an elevated circular arc on wide rises.
    Ellipse,
    /// Symmetric cubic Bézier built on the span's mid angle.
    Cubic,
    /// Asymmetric cubic Bézier built on the 1/3 and 1/4 angles of the span.
    OffsetCubic,
}

impl GrooveForm {
    /// Forms that may be used as a trigger's rise profile.
    pub const RISE_FORMS: [GrooveForm; 4] = [
        GrooveForm::Linear,
        GrooveForm::Ellipse,
        GrooveForm::Cubic,
        GrooveForm::OffsetCubic,
    ];

    pub fn is_rise(self) -> bool {
        !matches!(self, Self::Stay | Self::Fall)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stay => "stay",
            Self::Fall => "fall",
            Self::Linear => "linear",
            Self::Ellipse => "ellipse",
            Self::Cubic => "cubic",
            Self::OffsetCubic => "offset-cubic",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One lift event on a wheel.
pub struct Trigger {
    /// Angle at which the follower drops (the audible moment).
    pub position: Turn,
    /// Shape of the rise leading up to `position`.
    pub profile: GrooveForm,
    /// Angular length of the rise, ending at `position`.
    pub rise_length: Turn,
    /// Radial lift above the base radius reached at `position`.
    pub fall_depth: f64,
}

impl Trigger {
    pub fn new(
        position: Turn,
        profile: GrooveForm,
        rise_length: Turn,
        fall_depth: f64,
    ) -> GrooveResult<Self> {
        let t = Self {
            position,
            profile,
            rise_length,
            fall_depth,
        };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> GrooveResult<()> {
        if !self.position.is_finite() || !self.rise_length.is_finite() {
            return Err(GrooveError::validation(
                "trigger position and rise_length must be finite",
            ));
        }
        if !self.profile.is_rise() {
            return Err(GrooveError::validation(format!(
                "trigger at {} uses '{}' as its rise profile",
                self.position,
                self.profile.as_str()
            )));
        }
        if !self.fall_depth.is_finite() || self.fall_depth < 0.0 {
            return Err(GrooveError::validation(format!(
                "trigger at {} must have a finite fall_depth >= 0",
                self.position
            )));
        }
        Ok(())
    }

    /// Angle where the rise begins.
    pub fn rise_start(&self) -> Turn {
        self.position.offset(-self.rise_length.value())
    }
}

/// Forward gap from each position's cyclic predecessor, index-aligned with `positions`.
///
/// `positions` must be sorted. A lone position is a full turn away from itself.
pub(crate) fn cyclic_gaps(positions: &[Turn]) -> Vec<f64> {
    let n = positions.len();
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| positions[(i + n - 1) % n].forward_to(positions[i]))
        .collect()
}

/// Whether every cyclically-consecutive pair of sorted positions is at least `min_gap` apart.
pub(crate) fn is_separated(positions: &[Turn], min_gap: f64) -> bool {
    !positions.is_empty() && cyclic_gaps(positions).into_iter().all(|g| at_least(g, min_gap))
}

/// Return a new sequence sorted by angle.
pub(crate) fn sorted_positions(positions: &[Turn]) -> Vec<Turn> {
    let mut out = positions.to_vec();
    out.sort_by(|a, b| a.value().total_cmp(&b.value()));
    out
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Position-sorted triggers destined for one wheel.
///
/// Only obtainable through [`TriggerSet::new`], which proves that no rise reaches
/// back into the previous trigger: the stay between consecutive triggers is never
/// shorter than the construction's `min_gap`.
pub struct TriggerSet {
    triggers: Vec<Trigger>,
    min_gap: f64,
}

impl TriggerSet {
    pub fn new(triggers: impl IntoIterator<Item = Trigger>, min_gap: f64) -> GrooveResult<Self> {
        if !min_gap.is_finite() || min_gap < 0.0 {
            return Err(GrooveError::validation(
                "trigger set min_gap must be finite and >= 0",
            ));
        }
        let mut triggers: Vec<Trigger> = triggers.into_iter().collect();
        if triggers.is_empty() {
            return Err(GrooveError::degenerate("trigger set must not be empty"));
        }
        for t in &triggers {
            t.validate()?;
        }
        triggers.sort_by(|a, b| a.position.value().total_cmp(&b.position.value()));

        let positions: Vec<Turn> = triggers.iter().map(|t| t.position).collect();
        let gaps = cyclic_gaps(&positions);
        for (i, (t, gap)) in triggers.iter().zip(&gaps).enumerate() {
            if triggers.len() > 1 && *gap == 0.0 {
                return Err(GrooveError::degenerate(format!(
                    "duplicate trigger position {}",
                    t.position
                )));
            }
            let stay = gap - t.rise_length.value();
            if !at_least(stay, min_gap) {
                let prev = &triggers[(i + triggers.len() - 1) % triggers.len()];
                return Err(GrooveError::validation(format!(
                    "rise of trigger at {} leaves {stay:.4} turns after trigger at {} (minimum {min_gap:.4})",
                    t.position, prev.position
                )));
            }
        }

        Ok(Self { triggers, min_gap })
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn min_gap(&self) -> f64 {
        self.min_gap
    }

    pub fn positions(&self) -> Vec<Turn> {
        self.triggers.iter().map(|t| t.position).collect()
    }

    /// Deepest fall among the triggers.
    pub fn max_fall_depth(&self) -> f64 {
        self.triggers.iter().map(|t| t.fall_depth).fold(0.0, f64::max)
    }

    /// Trigger preceding index `i` cyclically.
    pub(crate) fn predecessor(&self, i: usize) -> &Trigger {
        let n = self.triggers.len();
        &self.triggers[(i + n - 1) % n]
    }

    /// Angular length of the base-radius stay in front of trigger `i`, in turns.
    pub(crate) fn stay_span(&self, i: usize) -> f64 {
        let t = &self.triggers[i];
        let gap = if self.triggers.len() == 1 {
            1.0
        } else {
            self.predecessor(i).position.forward_to(t.position)
        };
        (gap - t.rise_length.value()).max(0.0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Physical dimensions of one wheel together with its triggers.
pub struct WheelSpec {
    /// Radius the follower rests on between triggers.
    pub base_radius: f64,
    /// Side of the square hole for the axle.
    pub axis_cutout_size: f64,
    /// Largest fall any wheel may use; sizes the drawing canvas.
    pub max_fall_allowance: f64,
    /// Triggers cut into this wheel.
    pub triggers: TriggerSet,
}

impl WheelSpec {
    pub fn new(
        base_radius: f64,
        axis_cutout_size: f64,
        max_fall_allowance: f64,
        triggers: TriggerSet,
    ) -> GrooveResult<Self> {
        let spec = Self {
            base_radius,
            axis_cutout_size,
            max_fall_allowance,
            triggers,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> GrooveResult<()> {
        if !self.base_radius.is_finite() || self.base_radius <= 0.0 {
            return Err(GrooveError::validation("base_radius must be finite and > 0"));
        }
        if !self.axis_cutout_size.is_finite() || self.axis_cutout_size < 0.0 {
            return Err(GrooveError::validation(
                "axis_cutout_size must be finite and >= 0",
            ));
        }
        // the cutout's corners must stay inside the base circle
        if self.axis_cutout_size * std::f64::consts::FRAC_1_SQRT_2 >= self.base_radius {
            return Err(GrooveError::validation(
                "axis_cutout_size does not fit inside base_radius",
            ));
        }
        if !self.max_fall_allowance.is_finite() || self.max_fall_allowance <= 0.0 {
            return Err(GrooveError::validation(
                "max_fall_allowance must be finite and > 0",
            ));
        }
        let deepest = self.triggers.max_fall_depth();
        if deepest > self.max_fall_allowance {
            return Err(GrooveError::validation(format!(
                "fall depth {deepest} exceeds max_fall_allowance {}",
                self.max_fall_allowance
            )));
        }
        Ok(())
    }

    /// Radius of the circle enclosing every possible groove of this wheel.
    pub fn outer_radius(&self) -> f64 {
        self.base_radius + self.max_fall_allowance
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/trigger.rs"]
mod tests;
