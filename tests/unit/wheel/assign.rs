use super::*;

fn turns(values: &[f64]) -> Vec<Turn> {
    values.iter().copied().map(Turn::new).collect()
}

fn values(turns: &[Turn]) -> Vec<f64> {
    turns.iter().map(|t| t.value()).collect()
}

#[test]
fn evenly_spaced_triggers_stay_on_one_wheel() {
    let cfg = WheelConfig::default();
    let layout = disentangle("kick", &turns(&[0.75, 0.0, 0.5, 0.25]), &cfg).unwrap();
    assert_eq!(layout, WheelLayout::Single(turns(&[0.0, 0.25, 0.5, 0.75])));
    assert_eq!(layout.wheel_count(), 1);
}

#[test]
fn close_pairs_are_split_by_alternation() {
    let cfg = WheelConfig::default();
    let layout = disentangle("snare", &turns(&[0.0, 0.04, 0.5, 0.54]), &cfg).unwrap();
    match layout {
        WheelLayout::Dual { first, second } => {
            assert_eq!(values(&first), vec![0.0, 0.5]);
            assert_eq!(values(&second), vec![0.04, 0.54]);
        }
        other => panic!("expected two wheels, got {other:?}"),
    }
}

#[test]
fn two_close_triggers_get_one_wheel_each() {
    let cfg = WheelConfig::default();
    let layout = disentangle("hat", &turns(&[0.12, 0.1]), &cfg).unwrap();
    assert_eq!(
        layout,
        WheelLayout::Dual {
            first: turns(&[0.1]),
            second: turns(&[0.12]),
        }
    );
}

#[test]
fn three_in_one_window_is_infeasible_without_search() {
    let cfg = WheelConfig {
        // a search would be refused, so only the pre-test can answer
        max_search_size: 1,
        ..WheelConfig::default()
    };
    let err = disentangle("bell", &turns(&[0.0, 0.02, 0.04, 0.06]), &cfg).unwrap_err();
    assert_eq!(err.channel(), Some("bell"));
}

#[test]
fn odd_cycle_is_infeasible_after_search() {
    let cfg = WheelConfig {
        minimum_separation: 0.3,
        rest_margin: 0.0,
        ..WheelConfig::default()
    };
    let err = disentangle("ride", &turns(&[0.0, 0.2, 0.4, 0.6, 0.8]), &cfg).unwrap_err();
    match err {
        GrooveError::Infeasible { channel, reason } => {
            assert_eq!(channel, "ride");
            assert!(reason.contains("32"));
        }
        other => panic!("expected infeasible, got {other:?}"),
    }
}

#[test]
fn search_size_ceiling_fails_fast() {
    let mut raw = Vec::new();
    for k in 0..11 {
        raw.push(k as f64 / 11.0);
        raw.push(k as f64 / 11.0 + 0.03);
    }
    let cfg = WheelConfig::default();
    assert!(matches!(
        disentangle("tom", &turns(&raw), &cfg),
        Err(GrooveError::Degenerate(_))
    ));

    let roomy = WheelConfig {
        max_search_size: 22,
        ..WheelConfig::default()
    };
    let layout = disentangle("tom", &turns(&raw), &roomy).unwrap();
    assert_eq!(layout.wheel_count(), 2);
}

#[test]
fn oversized_search_setting_is_capped_at_the_hard_limit() {
    let mut raw = Vec::new();
    for k in 0..32 {
        raw.push(k as f64 / 32.0);
        raw.push(k as f64 / 32.0 + 0.001);
    }
    for max_search_size in [31, 64, usize::MAX] {
        let cfg = WheelConfig {
            minimum_separation: 1.0 / 64.0,
            max_search_size,
            ..WheelConfig::default()
        };
        match disentangle("ride", &turns(&raw), &cfg) {
            Err(GrooveError::Degenerate(msg)) => {
                assert!(msg.contains(&format!("limit of {MAX_SEARCH_SIZE_LIMIT}")), "{msg}");
            }
            other => panic!("expected the search limit to refuse, got {other:?}"),
        }
    }
}

#[test]
fn empty_and_duplicate_channels_are_degenerate() {
    let cfg = WheelConfig::default();
    assert!(matches!(
        disentangle("x", &[], &cfg),
        Err(GrooveError::Degenerate(_))
    ));
    assert!(matches!(
        disentangle("x", &turns(&[0.3, 0.6, 0.3]), &cfg),
        Err(GrooveError::Degenerate(_))
    ));
}

#[test]
fn single_position_is_a_single_wheel() {
    let cfg = WheelConfig::default();
    let layout = disentangle("x", &turns(&[0.7]), &cfg).unwrap();
    assert!(layout.is_single());
    assert_eq!(layout.wheels(), vec![turns(&[0.7]).as_slice()]);
}

#[test]
fn disentangle_is_deterministic() {
    let cfg = WheelConfig::default();
    let input = turns(&[0.0, 0.05, 0.2, 0.26, 0.5, 0.55, 0.8, 0.83]);
    let a = disentangle("x", &input, &cfg).unwrap();
    let b = disentangle("x", &input, &cfg).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.wheel_count(), 2);
}
