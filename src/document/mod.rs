//! Drawable SVG output for a synthesized wheel.
//!
//! This is the outer boundary of the crate: it decorates the groove with the axle
//! cutout and printed labels and serializes the result. Nothing here feeds back
//! into assignment or synthesis.

mod path_data;

use std::path::Path;

use anyhow::Context as _;
use svg::{
    Document,
    node::element::{Path as SvgPath, Rectangle, Text},
};

use crate::{
    foundation::error::GrooveResult,
    wheel::{path::GroovePath, trigger::WheelSpec},
};

pub use path_data::path_data;

/// Millimetres to CSS pixels at 96 dpi.
pub const PX_PER_MM: f64 = 3.7795275591;

/// Line height as a multiple of font size.
const LINE_SPACING: f64 = 4.0 / 3.0;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Text printed on a wheel.
pub struct WheelLabels {
    /// Large first line beside the axle, usually the loop name.
    pub title: String,
    /// Lines under the title (channel, wheel number); may be empty.
    pub subtitle: String,
    /// Block on the other side of the axle (tempo, bars); may be empty.
    pub info: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Colours, stroke and font used when drawing a wheel.
pub struct DocumentStyle {
    pub px_per_mm: f64,
    /// Stroke colour of lines meant to be cut.
    pub cut_stroke_color: String,
    /// Stroke width of cut lines, in millimetres.
    pub cut_stroke_width_mm: f64,
    /// Fill colour of engraved text.
    pub label_color: String,
    pub font_family: String,
    /// Title font size in millimetres; subtitle and info scale from it.
    pub title_size_mm: f64,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            px_per_mm: PX_PER_MM,
            cut_stroke_color: "#000000".to_string(),
            cut_stroke_width_mm: 0.01,
            label_color: "#ff0000".to_string(),
            font_family: "monospace".to_string(),
            title_size_mm: 3.0,
        }
    }
}

impl DocumentStyle {
    fn title_px(&self) -> f64 {
        self.title_size_mm * self.px_per_mm
    }

    fn subtitle_px(&self) -> f64 {
        self.title_px() * 0.75
    }

    fn info_px(&self) -> f64 {
        self.title_px() * 0.5
    }
}

/// One wheel ready to be drawn: groove, axle cutout and labels on a square canvas.
pub struct WheelDocument<'a> {
    spec: &'a WheelSpec,
    path: &'a GroovePath,
    labels: WheelLabels,
    style: DocumentStyle,
}

impl<'a> WheelDocument<'a> {
    pub fn new(spec: &'a WheelSpec, path: &'a GroovePath, labels: WheelLabels) -> Self {
        Self {
            spec,
            path,
            labels,
            style: DocumentStyle::default(),
        }
    }

    pub fn with_style(mut self, style: DocumentStyle) -> Self {
        self.style = style;
        self
    }

    /// Side of the square canvas in pixels; fits the deepest allowed fall.
    pub fn canvas_size_px(&self) -> f64 {
        self.spec.outer_radius() * 2.0 * self.style.px_per_mm
    }

    pub fn to_svg(&self) -> Document {
        let size = self.canvas_size_px();
        let scale = self.style.px_per_mm;
        let stroke_width = self.style.cut_stroke_width_mm * scale;
        let side = self.spec.axis_cutout_size * scale;

        let axis = Rectangle::new()
            .set("x", -side / 2.0)
            .set("y", -side / 2.0)
            .set("width", side)
            .set("height", side)
            .set("fill", "none")
            .set("stroke", self.style.cut_stroke_color.as_str())
            .set("stroke-width", stroke_width);

        let groove = SvgPath::new()
            .set("fill", "none")
            .set("stroke", self.style.cut_stroke_color.as_str())
            .set("stroke-width", stroke_width)
            .set("d", path_data(self.path, scale));

        let mut doc = Document::new()
            .set("width", size)
            .set("height", size)
            .set(
                "viewBox",
                format!("{} {} {} {}", -size / 2.0, -size / 2.0, size, size),
            )
            .add(axis)
            .add(groove);
        for text in self.label_elements(side) {
            doc = doc.add(text);
        }
        doc
    }

    pub fn to_svg_string(&self) -> String {
        self.to_svg().to_string()
    }

    /// Write the SVG to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> GrooveResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        svg::save(path, &self.to_svg())
            .with_context(|| format!("write svg '{}'", path.display()))?;
        Ok(())
    }

    /// Title and subtitle stacked right of the axle, info block left of it.
    fn label_elements(&self, side: f64) -> Vec<Text> {
        let style = &self.style;
        let mut out = Vec::new();
        let sub_lines: Vec<&str> = self.labels.subtitle.lines().collect();

        // vertically centre the title + subtitle block on the axle
        let block_height = if sub_lines.is_empty() {
            style.title_px()
        } else {
            style.title_px() * LINE_SPACING
                + (sub_lines.len() - 1) as f64 * style.subtitle_px() * LINE_SPACING
                + style.subtitle_px()
        };
        let mut y = -block_height / 2.0;

        if !self.labels.title.is_empty() {
            out.push(self.text_line(&self.labels.title, side, y, style.title_px(), "start", false));
        }
        y += style.title_px() * LINE_SPACING;
        for line in &sub_lines {
            out.push(self.text_line(line, side, y, style.subtitle_px(), "start", true));
            y += style.subtitle_px() * LINE_SPACING;
        }

        let info_lines: Vec<&str> = self.labels.info.lines().collect();
        let info_height = info_lines.len().saturating_sub(1) as f64
            * style.info_px()
            * LINE_SPACING
            + style.info_px();
        let mut y = -info_height / 2.0;
        for line in info_lines {
            out.push(self.text_line(line, -side, y, style.info_px(), "end", false));
            y += style.info_px() * LINE_SPACING;
        }
        out
    }

    fn text_line(&self, content: &str, x: f64, y: f64, size: f64, anchor: &str, italic: bool) -> Text {
        let text = Text::new(content)
            .set("x", x)
            .set("y", y)
            .set("font-size", size)
            .set("font-family", self.style.font_family.as_str())
            .set("fill", self.style.label_color.as_str())
            .set("text-anchor", anchor)
            .set("dominant-baseline", "hanging");
        if italic {
            text.set("font-style", "italic")
        } else {
            text
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/document.rs"]
mod tests;
