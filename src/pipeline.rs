use rayon::prelude::*;

use crate::{
    config::WheelConfig,
    document::WheelLabels,
    foundation::{
        core::Turn,
        error::{GrooveError, GrooveResult},
    },
    timeline::source::LoopSource,
    wheel::{
        assign::{WheelLayout, disentangle},
        path::GroovePath,
        synth::{PathSegment, PathSynthesizer, derive_segments},
        trigger::{Trigger, TriggerSet, WheelSpec, cyclic_gaps},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Which wheel of a channel this is.
pub enum WheelRole {
    /// The channel fits on one wheel.
    Single,
    /// First of two wheels.
    First,
    /// Second of two wheels.
    Second,
}

impl WheelRole {
    pub fn caption(self) -> &'static str {
        match self {
            Self::Single => "single wheel",
            Self::First => "Wheel 1",
            Self::Second => "Wheel 2",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A finished wheel: dimensions, triggers, segments and the closed groove.
pub struct Wheel {
    pub channel: String,
    pub role: WheelRole,
    pub spec: WheelSpec,
    pub segments: Vec<PathSegment>,
    pub path: GroovePath,
}

impl Wheel {
    /// Labels printed on this wheel when it comes from `source`.
    pub fn labels(&self, source: &LoopSource) -> WheelLabels {
        WheelLabels {
            title: source.title.clone(),
            subtitle: format!("{}\n{}", source.label(&self.channel), self.role.caption()),
            info: source.info(),
        }
    }

    /// File stem used when writing this wheel: label and caption on one line.
    pub fn file_stem(&self, source: &LoopSource) -> String {
        format!("{} {}", source.label(&self.channel), self.role.caption())
    }
}

#[derive(Clone, Debug)]
/// How channels are spread over threads.
pub struct BuildThreading {
    /// Process channels on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Worker count for the pool; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for BuildThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Outcome for one channel; failures are kept so callers can skip or abort.
#[derive(Debug)]
pub struct ChannelWheels {
    pub channel: String,
    pub result: GrooveResult<Vec<Wheel>>,
}

/// Triggers for sorted `positions` on one wheel.
///
/// Each rise fills the gap to the previous trigger minus `rest_margin`, capped at
/// `max_rise_length`; form and fall depth come from `config`.
pub fn triggers_for(positions: &[Turn], config: &WheelConfig) -> GrooveResult<TriggerSet> {
    let gaps = cyclic_gaps(positions);
    let triggers = positions
        .iter()
        .zip(gaps)
        .map(|(pos, gap)| {
            let rise = (gap - config.rest_margin)
                .rem_euclid(1.0)
                .min(config.max_rise_length);
            Trigger::new(*pos, config.groove_form, Turn::new(rise), config.fall_depth)
        })
        .collect::<GrooveResult<Vec<_>>>()?;
    TriggerSet::new(triggers, config.rest_margin)
}

/// Build and synthesize one wheel from its positions.
pub fn build_wheel(
    channel: &str,
    role: WheelRole,
    positions: &[Turn],
    config: &WheelConfig,
) -> GrooveResult<Wheel> {
    let set = triggers_for(positions, config)?;
    let spec = WheelSpec::new(
        config.base_radius,
        config.axis_cutout_size,
        config.max_fall_allowance,
        set,
    )?;
    let path = PathSynthesizer::for_wheel(&spec, config)?.synthesize(&spec.triggers)?;
    let segments = derive_segments(&spec.triggers);
    Ok(Wheel {
        channel: channel.to_string(),
        role,
        spec,
        segments,
        path,
    })
}

/// Disentangle one channel and build its one or two wheels.
#[tracing::instrument(skip(positions, config), fields(n = positions.len()))]
pub fn build_channel(
    channel: &str,
    positions: &[Turn],
    config: &WheelConfig,
) -> GrooveResult<Vec<Wheel>> {
    match disentangle(channel, positions, config)? {
        WheelLayout::Single(all) => Ok(vec![build_wheel(
            channel,
            WheelRole::Single,
            &all,
            config,
        )?]),
        WheelLayout::Dual { first, second } => Ok(vec![
            build_wheel(channel, WheelRole::First, &first, config)?,
            build_wheel(channel, WheelRole::Second, &second, config)?,
        ]),
    }
}

/// Build every channel of `source`, keeping per-channel failures.
///
/// Results are in channel-id order regardless of threading.
#[tracing::instrument(skip(source, config, threading), fields(title = %source.title))]
pub fn build_channels(
    source: &LoopSource,
    config: &WheelConfig,
    threading: &BuildThreading,
) -> GrooveResult<Vec<ChannelWheels>> {
    config.validate()?;
    source.validate()?;
    let timeline = source.timeline()?;
    let channels = timeline.normalize_all(&source.channels)?;
    let channels: Vec<(String, Vec<Turn>)> = channels.into_iter().collect();

    let build = |(channel, positions): &(String, Vec<Turn>)| ChannelWheels {
        channel: channel.clone(),
        result: build_channel(channel, positions, config),
    };

    let out = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| channels.par_iter().map(build).collect::<Vec<_>>())
    } else {
        channels.iter().map(build).collect::<Vec<_>>()
    };

    tracing::debug!(
        channels = out.len(),
        failed = out.iter().filter(|c| c.result.is_err()).count(),
        "built channels"
    );
    Ok(out)
}

/// Build every wheel of `source`; the first failing channel aborts the run.
pub fn build_wheels(source: &LoopSource, config: &WheelConfig) -> GrooveResult<Vec<Wheel>> {
    let mut wheels = Vec::new();
    for channel in build_channels(source, config, &BuildThreading::default())? {
        wheels.extend(channel.result?);
    }
    Ok(wheels)
}

fn build_thread_pool(threads: Option<usize>) -> GrooveResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GrooveError::validation(
            "build threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GrooveError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
