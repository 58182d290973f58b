use super::*;

fn values(turns: &[Turn]) -> Vec<f64> {
    turns.iter().map(|t| t.value()).collect()
}

#[test]
fn ticks_map_to_sorted_fractions_of_the_cycle() {
    // two bars of 4/4 at 480 ticks per beat
    let tl = TriggerTimeline::new(8.0, 480.0).unwrap();
    let turns = tl.normalize("kick", &[1920.0, 0.0, 960.0, 2880.0]).unwrap();
    assert_eq!(values(&turns), vec![0.0, 0.25, 0.5, 0.75]);
}

#[test]
fn event_at_cycle_end_wraps_to_zero() {
    let tl = TriggerTimeline::new(4.0, 100.0).unwrap();
    let turns = tl.normalize("x", &[400.0, 100.0]).unwrap();
    assert_eq!(values(&turns), vec![0.0, 0.25]);
}

#[test]
fn identical_positions_are_reported() {
    let tl = TriggerTimeline::new(4.0, 100.0).unwrap();
    let err = tl.normalize("snare", &[0.0, 200.0, 400.0]).unwrap_err();
    assert!(matches!(err, GrooveError::Degenerate(ref m) if m.contains("snare")));
}

#[test]
fn degenerate_timelines_and_channels_fail() {
    assert!(TriggerTimeline::new(0.0, 480.0).is_err());
    assert!(TriggerTimeline::new(4.0, 0.0).is_err());
    assert!(TriggerTimeline::new(f64::NAN, 480.0).is_err());

    let tl = TriggerTimeline::new(4.0, 480.0).unwrap();
    assert!(tl.normalize("x", &[]).is_err());
    assert!(tl.normalize("x", &[-1.0]).is_err());
    assert!(tl.normalize("x", &[f64::INFINITY]).is_err());
}

#[test]
fn normalize_all_keeps_channel_order() {
    let tl = TriggerTimeline::new(4.0, 1.0).unwrap();
    let mut channels = BTreeMap::new();
    channels.insert("b".to_string(), vec![2.0]);
    channels.insert("a".to_string(), vec![1.0, 3.0]);
    let out = tl.normalize_all(&channels).unwrap();
    let keys: Vec<&String> = out.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(values(&out["a"]), vec![0.25, 0.75]);
}
