use crate::bodies::vector::{Vector3, VectorExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    /// Moved by pointer input only, never integrated.
    PointerControlled,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vector3,
    pub velocity: Vector3,
    pub mass: f32,
    pub radius: f32,
    pub kind: BodyKind,
    /// Per-pair forces from the last step. Only read when drawing.
    pub forces: Vec<Vector3>,
}

impl Body {
    pub fn new(position: Vector3, velocity: Vector3, mass: f32, radius: f32) -> Self {
        Self {
            position,
            velocity,
            mass,
            radius,
            kind: BodyKind::Dynamic,
            forces: Vec::new(),
        }
    }

    pub fn pointer(position: Vector3, mass: f32, radius: f32) -> Self {
        Self {
            kind: BodyKind::PointerControlled,
            ..Self::new(position, Vector3::zero(), mass, radius)
        }
    }

    pub fn is_pointer(&self) -> bool {
        self.kind == BodyKind::PointerControlled
    }

    pub fn momentum(&self) -> Vector3 {
        self.velocity * self.mass
    }
}

/// Pull on `target` toward `source`. NaN when the two coincide.
pub fn gravitational_force(
    target: Vector3,
    target_mass: f32,
    source: Vector3,
    source_mass: f32,
    g: f32,
) -> Vector3 {
    let r = target - source;
    let distance = r.magnitude();
    r.versor().scale(-1.0) * (g * target_mass * source_mass / (distance * distance))
}

/// Advances `bodies[id]` by `dt_millis` against every other body in the slice.
/// Velocity is updated before position; overlaps are resolved afterwards.
pub fn step_body(bodies: &mut [Body], id: BodyId, g: f32, dt_millis: f32) {
    let index = id.0;
    if bodies[index].is_pointer() {
        return;
    }

    let dt = dt_millis / 1000.0;
    let (position, mass) = (bodies[index].position, bodies[index].mass);

    let forces: Vec<Vector3> = bodies
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .map(|(_, other)| gravitational_force(position, mass, other.position, other.mass, g))
        .collect();
    let force_sum = forces.iter().fold(Vector3::zero(), |sum, force| sum + *force);

    let acceleration = force_sum * (1.0 / mass);
    let velocity = bodies[index].velocity + acceleration * dt;
    let tentative = position + velocity * dt;

    let (position, velocity) = resolve_collisions(bodies, id, tentative, velocity);

    let body = &mut bodies[index];
    body.velocity = velocity;
    body.position = position;
    body.forces = forces;
}

// Corrections are sequential: each overlap test sees the previous result.
// Colliding partners get the shared velocity written into them too.
pub fn resolve_collisions(
    bodies: &mut [Body],
    id: BodyId,
    tentative: Vector3,
    velocity: Vector3,
) -> (Vector3, Vector3) {
    let index = id.0;
    let (mass, radius) = (bodies[index].mass, bodies[index].radius);
    let mut position = tentative;
    let mut velocity = velocity;

    for (other_index, other) in bodies.iter_mut().enumerate() {
        if other_index == index {
            continue;
        }

        let contact = radius + other.radius;
        let separation = position.distance_to(other.position);
        if separation < contact {
            position += (position - other.position).versor() * (contact - separation);

            let momentum = velocity * mass + other.velocity * other.mass;
            velocity = momentum * (1.0 / (mass + other.mass));
            other.velocity = velocity;
        }
    }

    (position, velocity)
}
