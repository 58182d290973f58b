use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{GrooveError, GrooveResult},
    wheel::trigger::GrooveForm,
};

/// Largest search ceiling accepted; 2^30 assignments is already far beyond useful.
pub const MAX_SEARCH_SIZE_LIMIT: usize = 30;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Options shared by assignment, synthesis and the wheel pipeline.
///
/// Angular values are in turns, lengths in millimetres. Every field has a
/// default, so a JSON file only needs to name what it overrides.
pub struct WheelConfig {
    /// Smallest gap between consecutive triggers on one wheel.
    pub minimum_separation: f64,
    /// Widest rise drawn as a single curve before an elevated arc takes over.
    pub max_single_arc_span: f64,
    /// Flat stretch kept in front of every rise.
    pub rest_margin: f64,
    /// Upper bound on a generated rise length.
    pub max_rise_length: f64,
    /// Deepest fall any wheel may use.
    pub max_fall_allowance: f64,
    /// Radius the follower rests on.
    pub base_radius: f64,
    /// Side of the square axle hole.
    pub axis_cutout_size: f64,
    /// Fall depth given to generated triggers.
    pub fall_depth: f64,
    /// Rise profile given to generated triggers.
    pub groove_form: GrooveForm,
    /// Most triggers a channel may have when a two-wheel search is needed.
    pub max_search_size: usize,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            minimum_separation: 1.0 / 16.0,
            max_single_arc_span: 1.0 / 16.0,
            rest_margin: 1.0 / 100.0,
            max_rise_length: 0.2,
            max_fall_allowance: 20.0,
            base_radius: 50.0,
            axis_cutout_size: 7.375,
            fall_depth: 10.0,
            groove_form: GrooveForm::Ellipse,
            max_search_size: 20,
        }
    }
}

impl WheelConfig {
    pub fn validate(&self) -> GrooveResult<()> {
        for (name, value) in [
            ("minimum_separation", self.minimum_separation),
            ("max_single_arc_span", self.max_single_arc_span),
        ] {
            if !value.is_finite() || value <= 0.0 || value >= 0.5 {
                return Err(GrooveError::validation(format!(
                    "{name} must be in (0, 0.5) turns"
                )));
            }
        }
        if !self.rest_margin.is_finite()
            || self.rest_margin < 0.0
            || self.rest_margin >= self.minimum_separation
        {
            return Err(GrooveError::validation(
                "rest_margin must be in [0, minimum_separation)",
            ));
        }
        if !self.max_rise_length.is_finite()
            || self.max_rise_length <= 0.0
            || self.max_rise_length >= 1.0
        {
            return Err(GrooveError::validation(
                "max_rise_length must be in (0, 1) turns",
            ));
        }
        for (name, value) in [
            ("max_fall_allowance", self.max_fall_allowance),
            ("base_radius", self.base_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GrooveError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.axis_cutout_size.is_finite() || self.axis_cutout_size < 0.0 {
            return Err(GrooveError::validation(
                "axis_cutout_size must be finite and >= 0",
            ));
        }
        if !self.fall_depth.is_finite()
            || self.fall_depth < 0.0
            || self.fall_depth > self.max_fall_allowance
        {
            return Err(GrooveError::validation(
                "fall_depth must be in [0, max_fall_allowance]",
            ));
        }
        if !self.groove_form.is_rise() {
            return Err(GrooveError::validation(format!(
                "groove_form '{}' is not a rise profile",
                self.groove_form.as_str()
            )));
        }
        if self.max_search_size == 0 || self.max_search_size > MAX_SEARCH_SIZE_LIMIT {
            return Err(GrooveError::validation(format!(
                "max_search_size must be in 1..={MAX_SEARCH_SIZE_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Read a JSON config file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> GrooveResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| GrooveError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
