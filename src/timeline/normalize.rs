use std::collections::BTreeMap;

use crate::foundation::{
    core::Turn,
    error::{GrooveError, GrooveResult},
    math::GAP_EPSILON,
};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Maps raw event ticks onto cyclic wheel positions.
///
/// One wheel rotation spans `cycle_beats` beats of `ticks_per_beat` ticks each.
pub struct TriggerTimeline {
    cycle_beats: f64,
    ticks_per_beat: f64,
}

impl TriggerTimeline {
    pub fn new(cycle_beats: f64, ticks_per_beat: f64) -> GrooveResult<Self> {
        if !cycle_beats.is_finite() || cycle_beats <= 0.0 {
            return Err(GrooveError::degenerate(format!(
                "timeline cycle must span a positive number of beats, got {cycle_beats}"
            )));
        }
        if !ticks_per_beat.is_finite() || ticks_per_beat <= 0.0 {
            return Err(GrooveError::degenerate(format!(
                "tick resolution must be positive, got {ticks_per_beat}"
            )));
        }
        Ok(Self {
            cycle_beats,
            ticks_per_beat,
        })
    }

    pub fn cycle_beats(&self) -> f64 {
        self.cycle_beats
    }

    pub fn ticks_per_beat(&self) -> f64 {
        self.ticks_per_beat
    }

    pub fn turn_of(&self, tick: f64) -> Turn {
        Turn::new(tick / self.ticks_per_beat / self.cycle_beats)
    }

    /// Ascending wheel positions for one channel's raw ticks.
    ///
    /// Two ticks landing on the same position are reported, not merged.
    #[tracing::instrument(skip(self, ticks), fields(n = ticks.len()))]
    pub fn normalize(&self, channel: &str, ticks: &[f64]) -> GrooveResult<Vec<Turn>> {
        if ticks.is_empty() {
            return Err(GrooveError::degenerate(format!(
                "channel '{channel}' has no events"
            )));
        }
        if let Some(bad) = ticks.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(GrooveError::degenerate(format!(
                "channel '{channel}' has an invalid timestamp {bad}"
            )));
        }

        let mut turns: Vec<Turn> = ticks.iter().map(|t| self.turn_of(*t)).collect();
        turns.sort_by(|a, b| a.value().total_cmp(&b.value()));

        let n = turns.len();
        if n > 1 {
            for i in 0..n {
                let prev = turns[(i + n - 1) % n];
                if prev.distance(turns[i]) < GAP_EPSILON {
                    return Err(GrooveError::degenerate(format!(
                        "channel '{channel}' has two events at position {}",
                        turns[i]
                    )));
                }
            }
        }
        Ok(turns)
    }

    /// Normalize every channel, stopping at the first failure.
    pub fn normalize_all(
        &self,
        channels: &BTreeMap<String, Vec<f64>>,
    ) -> GrooveResult<BTreeMap<String, Vec<Turn>>> {
        channels
            .iter()
            .map(|(id, ticks)| Ok((id.clone(), self.normalize(id, ticks)?)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/normalize.rs"]
mod tests;
