use super::*;

#[test]
fn rest_sweep_grows_the_rest_per_beat() {
    let set = rest_sweep(16, 1.0 / 32.0, 16.0, GrooveForm::Ellipse).unwrap();
    assert_eq!(set.len(), 16);
    assert_eq!(set.min_gap(), 0.0);
    let rises: Vec<f64> = set
        .triggers()
        .iter()
        .map(|t| t.rise_length.value())
        .collect();
    assert!((rises[0] - 1.0 / 16.0).abs() < 1e-12);
    assert!(rises.windows(2).all(|w| w[1] < w[0]));
    let last_rest = 1.0 / 16.0 - rises[15];
    assert!((last_rest - 15.0 / 32.0 / 16.0).abs() < 1e-12);
}

#[test]
fn rest_sweep_rejects_bad_input() {
    assert!(rest_sweep(1, 0.1, 10.0, GrooveForm::Ellipse).is_err());
    assert!(rest_sweep(8, 1.0, 10.0, GrooveForm::Ellipse).is_err());
    assert!(rest_sweep(8, 0.1, -1.0, GrooveForm::Ellipse).is_err());
    assert!(rest_sweep(8, 0.1, 10.0, GrooveForm::Fall).is_err());
}

fn groups(falls: &[f64], rest: f64) -> Vec<FallGroup> {
    falls.iter().map(|&fall| FallGroup { fall, rest }).collect()
}

#[test]
fn fall_sweep_lays_out_groups_per_fall() {
    let set = fall_sweep(&groups(&[8.0, 10.0, 14.0], 1.0 / 50.0), &[12, 16, 24], GrooveForm::Ellipse)
        .unwrap();
    assert_eq!(set.len(), 12);
    let falls: Vec<f64> = set.triggers().iter().map(|t| t.fall_depth).collect();
    assert_eq!(&falls[..4], &[8.0; 4]);
    assert_eq!(&falls[8..], &[14.0; 4]);
    // second group opens after the first group plus the pause
    let second = set.triggers()[4].position.value();
    assert!((second - 0.3125).abs() < 1e-12);
    assert_eq!(set.max_fall_depth(), 14.0);
}

#[test]
fn fall_sweep_rest_applies_per_group() {
    let mut gs = groups(&[8.0, 14.0], 1.0 / 50.0);
    gs[1].rest = 0.0;
    let set = fall_sweep(&gs, &[12, 16], GrooveForm::Ellipse).unwrap();
    let rises: Vec<f64> = set
        .triggers()
        .iter()
        .map(|t| t.rise_length.value())
        .collect();
    assert!((rises[1] - (1.0 / 12.0 - 1.0 / 50.0)).abs() < 1e-12);
    // the rest-free group rises over the whole spacing
    assert!((rises[4] - 1.0 / 12.0).abs() < 1e-12);
    assert!((rises[5] - 1.0 / 16.0).abs() < 1e-12);
}

#[test]
fn fall_sweep_uses_the_requested_form() {
    for form in GrooveForm::RISE_FORMS {
        let set = fall_sweep(&groups(&[8.0], 0.01), &[12, 16], form).unwrap();
        assert!(set.triggers().iter().all(|t| t.profile == form));
    }
    assert!(fall_sweep(&groups(&[8.0], 0.01), &[12], GrooveForm::Stay).is_err());
}

#[test]
fn fall_sweep_rejects_groups_that_overflow_the_turn() {
    let err = fall_sweep(&groups(&[8.0, 10.0, 12.0, 14.0], 0.01), &[4, 4], GrooveForm::Ellipse)
        .unwrap_err();
    assert!(matches!(err, GrooveError::Validation(_)));
    assert!(fall_sweep(&[], &[12], GrooveForm::Ellipse).is_err());
    assert!(fall_sweep(&groups(&[8.0], 0.01), &[0], GrooveForm::Ellipse).is_err());
    assert!(fall_sweep(&groups(&[8.0], 0.5), &[12], GrooveForm::Ellipse).is_err());
    assert!(fall_sweep(&groups(&[8.0], -0.1), &[12], GrooveForm::Ellipse).is_err());
}

#[test]
fn standard_wheels_are_closed_and_fit_their_canvas() {
    let wheels = standard_wheels(&WheelConfig::default()).unwrap();
    let names: Vec<&str> = wheels.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["Test Wheel 1", "Test Wheel 2", "Test Wheel 3"]);
    for wheel in &wheels {
        wheel.path.check_closed().unwrap();
        assert!(wheel.spec.triggers.max_fall_depth() <= wheel.spec.max_fall_allowance);
    }
    assert_eq!(wheels[1].labels.info, "Fall = 16 mm");
    assert!(wheels[0].labels.info.ends_with("Fall = 14 mm, rest 0"));

    let linear = WheelConfig {
        groove_form: GrooveForm::Linear,
        ..WheelConfig::default()
    };
    for wheel in standard_wheels(&linear).unwrap() {
        wheel.path.check_closed().unwrap();
        assert!(wheel.spec.triggers.triggers().iter().all(|t| t.profile == GrooveForm::Linear));
    }
    assert_eq!(wheels[1].spec.base_radius, 55.0);
}
