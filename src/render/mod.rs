//! Drawing of a simulation frame, independent of the graphics backend.

use std::f32::consts::PI;

use ultraviolet::Vec2;

use crate::bodies::{Simulation, VectorExt};


/// Angle between the arrow shaft and each barb.
pub const ARROW_ANGLE: f32 = PI / 6.0;

/// Something that can draw filled circles and arrows in surface pixels.
pub trait Painter {
    fn clear(&mut self);
    fn draw_circle(&mut self, center: Vec2, radius: f32);
    fn draw_arrow(&mut self, from: Vec2, to: Vec2);
}

/// Line segments of an arrow: the shaft, then the two barbs at `to`.
///
/// Barbs are a tenth of the shaft long and open `ARROW_ANGLE` either side of
/// it.
pub fn arrow_segments(from: Vec2, to: Vec2) -> [(Vec2, Vec2); 3] {
    let shaft = to - from;
    let angle = shaft.y.atan2(shaft.x);
    let length = shaft.mag() / 10.0;

    let barb = |offset: f32| {
        let (sin, cos) = (angle + offset).sin_cos();
        to - Vec2::new(cos, sin) * length
    };

    [
        (from, to),
        (to, barb(ARROW_ANGLE)),
        (to, barb(-ARROW_ANGLE)),
    ]
}

/// Paints one frame: a disc per body and an arrow per force it felt during
/// the last step.
///
/// `origin` is the surface position of the simulation origin, normally the
/// surface centre.
pub fn draw_scene<P: Painter>(simulation: &Simulation, painter: &mut P, origin: Vec2) {
    let force_scale = simulation.config().force_scale;

    painter.clear();
    for body in simulation.bodies() {
        let center = body.position.to_screen() + origin;
        painter.draw_circle(center, body.radius);
        for force in &body.forces {
            painter.draw_arrow(center, center + force.to_screen() * force_scale);
        }
    }
}
