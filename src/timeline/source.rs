use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{GrooveError, GrooveResult},
    timeline::normalize::TriggerTimeline,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Musical meter, e.g. 4/4 or 6/8.
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A rhythmic loop exported from a sequencer: one list of onset ticks per channel.
///
/// Ticks count from the loop start at `ticks_per_beat` per quarter note.
pub struct LoopSource {
    /// Loop name, printed on every wheel.
    pub title: String,
    /// Tempo in beats of the time signature per minute.
    pub bpm: f64,
    /// Meter of the loop.
    pub time_signature: TimeSignature,
    /// Tick resolution per quarter note.
    pub ticks_per_beat: u32,
    /// Loop length in bars; inferred from the last event when absent.
    #[serde(default)]
    pub num_bars: Option<u32>,
    /// Onset ticks per channel id.
    pub channels: BTreeMap<String, Vec<f64>>,
    /// Display names per channel id.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl LoopSource {
    pub fn from_json_str(text: &str) -> GrooveResult<Self> {
        let source: Self =
            serde_json::from_str(text).map_err(|e| GrooveError::serde(e.to_string()))?;
        source.validate()?;
        Ok(source)
    }

    pub fn from_json_file(path: &Path) -> GrooveResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read loop '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> GrooveResult<()> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(GrooveError::validation("bpm must be finite and > 0"));
        }
        if self.time_signature.numerator == 0 || self.time_signature.denominator == 0 {
            return Err(GrooveError::validation(
                "time signature numerator and denominator must be > 0",
            ));
        }
        if self.ticks_per_beat == 0 {
            return Err(GrooveError::degenerate("ticks_per_beat must be > 0"));
        }
        if self.num_bars == Some(0) {
            return Err(GrooveError::degenerate("num_bars must be > 0"));
        }
        if self.channels.is_empty() {
            return Err(GrooveError::degenerate("loop has no channels"));
        }
        Ok(())
    }

    /// Ticks per beat of the time signature's denominator.
    pub fn ticks_per_signature_beat(&self) -> f64 {
        f64::from(self.ticks_per_beat) * 4.0 / f64::from(self.time_signature.denominator)
    }

    /// Loop length in bars: the explicit value, or the bar holding the last event.
    pub fn bars(&self) -> u32 {
        if let Some(n) = self.num_bars {
            return n;
        }
        let per_beat = self.ticks_per_signature_beat();
        let last_beat = self
            .channels
            .values()
            .flatten()
            .copied()
            .filter(|t| t.is_finite())
            .fold(0.0f64, f64::max)
            / per_beat;
        let bar = (last_beat / f64::from(self.time_signature.numerator)).floor() as u32;
        bar.saturating_add(1)
    }

    pub fn cycle_beats(&self) -> f64 {
        f64::from(self.bars()) * f64::from(self.time_signature.numerator)
    }

    pub fn timeline(&self) -> GrooveResult<TriggerTimeline> {
        TriggerTimeline::new(self.cycle_beats(), self.ticks_per_signature_beat())
    }

    /// Wheel revolutions per minute needed to play the loop at its tempo.
    pub fn rpm(&self) -> f64 {
        self.bpm / self.cycle_beats()
    }

    pub fn label<'a>(&'a self, channel: &'a str) -> &'a str {
        self.labels.get(channel).map(String::as_str).unwrap_or(channel)
    }

    /// Multi-line summary printed beside the axle.
    pub fn info(&self) -> String {
        format!(
            "{} bars\n{} BPM\n{}/{}\n{:.2} rpm",
            self.bars(),
            self.bpm,
            self.time_signature.numerator,
            self.time_signature.denominator,
            self.rpm()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/source.rs"]
mod tests;
