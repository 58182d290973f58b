use super::*;

fn trig(pos: f64, rise: f64) -> Trigger {
    Trigger::new(Turn::new(pos), GrooveForm::Ellipse, Turn::new(rise), 10.0).unwrap()
}

#[test]
fn trigger_rejects_structural_profiles_and_negative_falls() {
    assert!(Trigger::new(Turn::ZERO, GrooveForm::Stay, Turn::new(0.1), 1.0).is_err());
    assert!(Trigger::new(Turn::ZERO, GrooveForm::Fall, Turn::new(0.1), 1.0).is_err());
    assert!(Trigger::new(Turn::ZERO, GrooveForm::Linear, Turn::new(0.1), -1.0).is_err());
    assert!(Trigger::new(Turn::ZERO, GrooveForm::Cubic, Turn::new(0.1), f64::NAN).is_err());
    for form in GrooveForm::RISE_FORMS {
        assert!(Trigger::new(Turn::ZERO, form, Turn::new(0.1), 0.0).is_ok());
    }
}

#[test]
fn rise_start_wraps_backwards() {
    let t = trig(0.02, 0.05);
    assert!((t.rise_start().value() - 0.97).abs() < 1e-12);
}

#[test]
fn trigger_set_sorts_into_a_new_sequence() {
    let input = vec![trig(0.5, 0.1), trig(0.0, 0.1), trig(0.25, 0.1)];
    let set = TriggerSet::new(input.clone(), 1.0 / 16.0).unwrap();
    let positions: Vec<f64> = set.positions().iter().map(|p| p.value()).collect();
    assert_eq!(positions, vec![0.0, 0.25, 0.5]);
    assert_eq!(input[0].position.value(), 0.5);
}

#[test]
fn trigger_set_rejects_empty_and_duplicates() {
    assert!(matches!(
        TriggerSet::new(Vec::new(), 0.0),
        Err(GrooveError::Degenerate(_))
    ));
    assert!(matches!(
        TriggerSet::new(vec![trig(0.3, 0.01), trig(0.3, 0.01)], 0.0),
        Err(GrooveError::Degenerate(_))
    ));
}

#[test]
fn trigger_set_rejects_rises_reaching_into_predecessor() {
    // rise of 0.2 starts before the previous trigger at 0.0
    let err = TriggerSet::new(vec![trig(0.0, 0.05), trig(0.1, 0.2)], 0.0).unwrap_err();
    assert!(matches!(err, GrooveError::Validation(_)));

    // stay of 0.05 is shorter than the requested 1/16
    assert!(TriggerSet::new(vec![trig(0.0, 0.05), trig(0.1, 0.05)], 1.0 / 16.0).is_err());
    assert!(TriggerSet::new(vec![trig(0.0, 0.05), trig(0.1, 0.05)], 0.05).is_ok());
}

#[test]
fn single_trigger_stays_for_the_rest_of_the_turn() {
    let set = TriggerSet::new(vec![trig(0.4, 0.2)], 0.0).unwrap();
    assert!((set.stay_span(0) - 0.8).abs() < 1e-12);

    let flat = TriggerSet::new(vec![trig(0.4, 0.0)], 0.0).unwrap();
    assert_eq!(flat.stay_span(0), 1.0);
}

#[test]
fn cyclic_gap_helpers_wrap_around() {
    let positions = [Turn::new(0.0), Turn::new(0.25), Turn::new(0.9)];
    let gaps = cyclic_gaps(&positions);
    assert!((gaps[0] - 0.1).abs() < 1e-12);
    assert!((gaps[1] - 0.25).abs() < 1e-12);
    assert!((gaps[2] - 0.65).abs() < 1e-12);
    assert!(is_separated(&positions, 0.1));
    assert!(!is_separated(&positions, 0.11));
    assert!(!is_separated(&[], 0.1));
    assert_eq!(cyclic_gaps(&[Turn::new(0.3)]), vec![1.0]);
}

#[test]
fn wheel_spec_checks_dimensions() {
    let set = TriggerSet::new(vec![trig(0.0, 0.1)], 0.0).unwrap();
    assert!(WheelSpec::new(50.0, 7.375, 20.0, set.clone()).is_ok());
    assert!(WheelSpec::new(0.0, 7.375, 20.0, set.clone()).is_err());
    assert!(WheelSpec::new(5.0, 7.375, 20.0, set.clone()).is_err());
    // fall of 10 exceeds an allowance of 5
    assert!(WheelSpec::new(50.0, 7.375, 5.0, set.clone()).is_err());
    let spec = WheelSpec::new(50.0, 7.375, 20.0, set).unwrap();
    assert_eq!(spec.outer_radius(), 70.0);
}
