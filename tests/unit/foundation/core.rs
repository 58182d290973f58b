use super::*;

#[test]
fn turn_wraps_into_unit_interval() {
    assert_eq!(Turn::new(1.25).value(), 0.25);
    assert_eq!(Turn::new(-0.25).value(), 0.75);
    assert_eq!(Turn::new(1.0).value(), 0.0);
    assert_eq!(Turn::new(-1e-20).value(), 0.0);
}

#[test]
fn forward_gap_and_distance_are_cyclic() {
    let a = Turn::new(0.9);
    let b = Turn::new(0.1);
    assert!((a.forward_to(b) - 0.2).abs() < 1e-12);
    assert!((b.forward_to(a) - 0.8).abs() < 1e-12);
    assert!((a.distance(b) - 0.2).abs() < 1e-12);
    assert!((b.distance(a) - 0.2).abs() < 1e-12);
    assert_eq!(a.forward_to(a), 0.0);
}

#[test]
fn forward_gap_snaps_rounding_noise_to_zero() {
    let a = Turn::new(0.5);
    let b = Turn::new(0.5 - 1e-12);
    assert_eq!(a.forward_to(b), 0.0);
}

#[test]
fn turn_serializes_as_number_and_normalizes_on_read() {
    let json = serde_json::to_string(&Turn::new(0.5)).unwrap();
    assert_eq!(json, "0.5");
    let t: Turn = serde_json::from_str("1.75").unwrap();
    assert_eq!(t.value(), 0.75);
}

#[test]
fn polar_point_follows_angle_direction() {
    let p = polar_point(10.0, 0.25);
    assert!(p.x.abs() < 1e-9);
    assert!((p.y - 10.0).abs() < 1e-9);
    let q = polar_point(2.0, 0.0);
    assert_eq!(q, Point::new(2.0, 0.0));
}
