//! Vector math for the simulation.
//!
//! Bodies move in the plane but carry a full 3D vector so cross products stay
//! meaningful; `z` is zero for everything the simulation creates.

use ultraviolet::{Vec2, Vec3};

pub type Vector3 = Vec3;

/// The vector operations the physics step is written against.
///
/// `dot` and `cross` come straight from ultraviolet.
pub trait VectorExt: Sized {
    /// A vector in the simulation plane.
    fn planar(x: f32, y: f32) -> Self;

    fn magnitude(&self) -> f32;

    /// NaN components for the zero vector.
    fn versor(&self) -> Self;

    fn scale(&self, k: f32) -> Self;

    fn distance_to(&self, other: Self) -> f32;

    fn to_screen(&self) -> Vec2;
}

impl VectorExt for Vec3 {
    fn planar(x: f32, y: f32) -> Self {
        Vec3::new(x, y, 0.0)
    }

    fn magnitude(&self) -> f32 {
        self.mag()
    }

    fn versor(&self) -> Self {
        let magnitude = self.magnitude();
        Vec3::new(self.x / magnitude, self.y / magnitude, self.z / magnitude)
    }

    fn scale(&self, k: f32) -> Self {
        *self * k
    }

    fn distance_to(&self, other: Self) -> f32 {
        (other - *self).magnitude()
    }

    fn to_screen(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
