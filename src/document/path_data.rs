use svg::node::element::path::{Data, Parameters};

use crate::{
    foundation::math::TAU,
    wheel::path::{GroovePath, PathPrimitive},
};

fn params(values: &[f64]) -> Parameters {
    values
        .iter()
        .map(|v| *v as f32)
        .collect::<Vec<f32>>()
        .into()
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// SVG path data for `path`, with every length multiplied by `scale`.
///
/// Arcs stay arcs (`A` commands) instead of being flattened, and the contour is
/// closed with `Z`.
pub fn path_data(path: &GroovePath, scale: f64) -> Data {
    let mut data = Data::new();
    for prim in path.primitives() {
        data = match *prim {
            PathPrimitive::MoveTo(p) => data.move_to(params(&[p.x * scale, p.y * scale])),
            PathPrimitive::LineTo(p) => data.line_to(params(&[p.x * scale, p.y * scale])),
            PathPrimitive::EllipticalArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => data.elliptical_arc_to(params(&[
                radii.x * scale,
                radii.y * scale,
                x_rotation * 360.0 / TAU,
                flag(large_arc),
                flag(sweep),
                to.x * scale,
                to.y * scale,
            ])),
            PathPrimitive::CircularArcTo {
                radius,
                sweep_turns,
                to,
            } => data.elliptical_arc_to(params(&[
                radius * scale,
                radius * scale,
                0.0,
                flag(sweep_turns.abs() > 0.5),
                flag(sweep_turns >= 0.0),
                to.x * scale,
                to.y * scale,
            ])),
            PathPrimitive::CubicTo { c1, c2, to } => data.cubic_curve_to(params(&[
                c1.x * scale,
                c1.y * scale,
                c2.x * scale,
                c2.y * scale,
                to.x * scale,
                to.y * scale,
            ])),
        };
    }
    data.close()
}
