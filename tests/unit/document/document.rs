use super::*;
use crate::{
    foundation::core::Turn,
    wheel::{
        synth::PathSynthesizer,
        trigger::{GrooveForm, Trigger, TriggerSet},
    },
};

fn fixture() -> (WheelSpec, GroovePath) {
    let triggers = [0.0, 0.25, 0.5, 0.75]
        .iter()
        .map(|p| Trigger::new(Turn::new(*p), GrooveForm::Ellipse, Turn::new(0.1), 12.0).unwrap());
    let set = TriggerSet::new(triggers, 0.01).unwrap();
    let spec = WheelSpec::new(50.0, 7.375, 20.0, set).unwrap();
    let path = PathSynthesizer::new(50.0, 1.0 / 16.0)
        .unwrap()
        .synthesize(&spec.triggers)
        .unwrap();
    (spec, path)
}

fn labels() -> WheelLabels {
    WheelLabels {
        title: "rheel".to_string(),
        subtitle: "Kick\nsingle wheel".to_string(),
        info: "4 bars\n120 BPM".to_string(),
    }
}

#[test]
fn canvas_fits_the_largest_allowed_fall() {
    let (spec, path) = fixture();
    let doc = WheelDocument::new(&spec, &path, labels());
    assert!((doc.canvas_size_px() - 140.0 * PX_PER_MM).abs() < 1e-9);

    let doc = doc.with_style(DocumentStyle {
        px_per_mm: 1.0,
        ..DocumentStyle::default()
    });
    assert_eq!(doc.canvas_size_px(), 140.0);
}

#[test]
fn svg_contains_axle_groove_and_labels() {
    let (spec, path) = fixture();
    let svg = WheelDocument::new(&spec, &path, labels())
        .with_style(DocumentStyle {
            px_per_mm: 1.0,
            ..DocumentStyle::default()
        })
        .to_svg_string();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("viewBox=\"-70 -70 140 140\""));
    assert!(svg.contains("<rect"));
    assert!(svg.contains("<path"));
    assert!(svg.contains("rheel"));
    assert!(svg.contains("single wheel"));
    assert!(svg.contains("120 BPM"));
    assert_eq!(svg.matches("<text").count(), 5);
    assert!(svg.contains("font-style=\"italic\""));
}

#[test]
fn path_data_keeps_arcs_and_closes() {
    let (_, path) = fixture();
    let element = SvgPath::new().set("d", path_data(&path, 1.0)).to_string();
    assert!(element.contains("d=\"M"));
    assert!(element.contains('A'));
    assert!(element.contains('z') || element.contains('Z'));
}

#[test]
fn empty_labels_emit_no_text() {
    let (spec, path) = fixture();
    let svg = WheelDocument::new(&spec, &path, WheelLabels::default()).to_svg_string();
    assert_eq!(svg.matches("<text").count(), 0);
}

#[test]
fn save_creates_parent_directories() {
    let (spec, path) = fixture();
    let out = std::path::PathBuf::from("target")
        .join("document_unit")
        .join("nested")
        .join("wheel.svg");
    let _ = std::fs::remove_file(&out);
    WheelDocument::new(&spec, &path, labels()).save(&out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("<path"));
}
