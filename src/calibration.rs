//! Test wheels for tuning fall depths and rest margins on a real machine.
//!
//! These do not come from a loop: triggers are laid out directly, so the sets are
//! validated with a zero minimum gap (a rise may fill its whole gap).

use crate::{
    config::WheelConfig,
    document::WheelLabels,
    foundation::{
        core::Turn,
        error::{GrooveError, GrooveResult},
    },
    wheel::{
        path::GroovePath,
        synth::PathSynthesizer,
        trigger::{GrooveForm, Trigger, TriggerSet, WheelSpec},
    },
};

/// Rise of the first trigger in each [`fall_sweep`] group.
const GROUP_LEAD_RISE: f64 = 1.0 / 16.0;
/// Space left after each [`fall_sweep`] group.
const GROUP_PAUSE: f64 = 1.0 / 8.0;

/// One trigger per beat; trigger `i` leaves a rest of `i * max_rest / beats`
/// before it, so the first rise fills its whole beat.
pub fn rest_sweep(
    beats: usize,
    max_rest: f64,
    fall: f64,
    form: GrooveForm,
) -> GrooveResult<TriggerSet> {
    if beats < 2 {
        return Err(GrooveError::validation("rest sweep needs at least 2 beats"));
    }
    if !max_rest.is_finite() || !(0.0..1.0).contains(&max_rest) {
        return Err(GrooveError::validation("rest sweep max_rest must be in [0, 1)"));
    }
    let n = beats as f64;
    let triggers = (0..beats)
        .map(|i| {
            let i = i as f64;
            let rise = (1.0 - i * max_rest) / n;
            Trigger::new(Turn::new(i / n), form, Turn::new(rise), fall)
        })
        .collect::<GrooveResult<Vec<_>>>()?;
    TriggerSet::new(triggers, 0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// One group of a [`fall_sweep`]: fall depth and the rest left before each rise.
pub struct FallGroup {
    pub fall: f64,
    /// `0` lets every rise fill its whole gap.
    pub rest: f64,
}

/// One group of triggers per [`FallGroup`].
///
/// A group opens with a short lead trigger, then one trigger per entry of
/// `spacings`, each `1 / spacing` turns after the previous one and rising for
/// that distance minus the group's rest. Groups are separated by an eighth of a
/// turn.
pub fn fall_sweep(
    groups: &[FallGroup],
    spacings: &[u32],
    form: GrooveForm,
) -> GrooveResult<TriggerSet> {
    if groups.is_empty() {
        return Err(GrooveError::degenerate("fall sweep needs at least one group"));
    }
    if spacings.contains(&0) {
        return Err(GrooveError::validation("fall sweep spacings must be > 0"));
    }
    if let Some(g) = groups.iter().find(|g| !g.rest.is_finite() || g.rest < 0.0) {
        return Err(GrooveError::validation(format!(
            "fall sweep rest must be finite and >= 0, got {}",
            g.rest
        )));
    }

    let per_group: f64 = spacings.iter().map(|d| 1.0 / f64::from(*d)).sum::<f64>() + GROUP_PAUSE;
    if per_group * groups.len() as f64 > 1.0 {
        return Err(GrooveError::validation(format!(
            "{} groups of {} triggers do not fit on one turn",
            groups.len(),
            spacings.len() + 1
        )));
    }

    let mut triggers = Vec::with_capacity(groups.len() * (spacings.len() + 1));
    let mut pos = 0.0;
    for group in groups {
        triggers.push(Trigger::new(
            Turn::new(pos),
            form,
            Turn::new(GROUP_LEAD_RISE),
            group.fall,
        )?);
        for &d in spacings {
            let step = 1.0 / f64::from(d);
            if group.rest >= step {
                return Err(GrooveError::validation(format!(
                    "fall sweep rest {} leaves no rise for spacing 1/{d}",
                    group.rest
                )));
            }
            pos += step;
            triggers.push(Trigger::new(
                Turn::new(pos),
                form,
                Turn::new(step - group.rest),
                group.fall,
            )?);
        }
        pos += GROUP_PAUSE;
    }
    TriggerSet::new(triggers, 0.0)
}

#[derive(Clone, Debug)]
/// A calibration wheel ready to be drawn.
pub struct CalibrationWheel {
    /// File stem.
    pub name: String,
    pub labels: WheelLabels,
    pub spec: WheelSpec,
    pub path: GroovePath,
}

fn calibration_wheel(
    name: &str,
    info: String,
    base_radius: f64,
    set: TriggerSet,
    config: &WheelConfig,
) -> GrooveResult<CalibrationWheel> {
    let allowance = config.max_fall_allowance.max(set.max_fall_depth());
    let spec = WheelSpec::new(base_radius, config.axis_cutout_size, allowance, set)?;
    let path = PathSynthesizer::new(base_radius, config.max_single_arc_span)?
        .synthesize(&spec.triggers)?;
    Ok(CalibrationWheel {
        name: name.to_string(),
        labels: WheelLabels {
            title: name.to_string(),
            subtitle: String::new(),
            info,
        },
        spec,
        path,
    })
}

/// The standard calibration set: a fall sweep and two rest sweeps, all drawn
/// with `config.groove_form`.
#[tracing::instrument(skip(config))]
pub fn standard_wheels(config: &WheelConfig) -> GrooveResult<Vec<CalibrationWheel>> {
    config.validate()?;
    let rest = 1.0 / 50.0;
    // the deepest group runs without rest for comparison
    let groups = [
        FallGroup { fall: 8.0, rest },
        FallGroup { fall: 10.0, rest },
        FallGroup { fall: 14.0, rest: 0.0 },
    ];
    let info = groups
        .iter()
        .map(|g| format!("Fall = {} mm, rest {}", g.fall, g.rest))
        .collect::<Vec<_>>()
        .join("\n");

    let mut out = vec![calibration_wheel(
        "Test Wheel 1",
        info,
        config.base_radius,
        fall_sweep(&groups, &[12, 16, 24], config.groove_form)?,
        config,
    )?];
    for (i, fall) in [16.0, 13.0].into_iter().enumerate() {
        out.push(calibration_wheel(
            &format!("Test Wheel {}", i + 2),
            format!("Fall = {fall} mm"),
            config.base_radius + 5.0,
            rest_sweep(16, 1.0 / 32.0, fall, config.groove_form)?,
            config,
        )?);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/unit/calibration.rs"]
mod tests;
