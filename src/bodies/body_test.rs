use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::bodies::body::{
    gravitational_force, resolve_collisions, step_body, Body, BodyId, BodyKind,
};
use crate::bodies::vector::{Vector3, VectorExt};
use crate::config::G;

fn at_rest(x: f32, y: f32, mass: f32, radius: f32) -> Body {
    Body::new(Vector3::planar(x, y), Vector3::zero(), mass, radius)
}

#[test]
fn test_new_body_is_dynamic() {
    let body = at_rest(1.0, 2.0, 10.0, 3.0);

    assert_eq!(body.kind, BodyKind::Dynamic);
    assert!(!body.is_pointer());
    assert!(body.forces.is_empty());
}

#[test]
fn test_pointer_body_starts_still() {
    let body = Body::pointer(Vector3::planar(4.0, 4.0), 1000.0, 50.0);

    assert!(body.is_pointer());
    assert_eq!(body.velocity, Vector3::zero());
    assert_eq!(body.mass, 1000.0);
}

#[test]
fn test_momentum() {
    let body = Body::new(Vector3::zero(), Vector3::planar(3.0, 4.0), 2.0, 1.0);
    assert_eq!(body.momentum(), Vector3::planar(6.0, 8.0));
}

#[test]
fn test_force_is_attractive() {
    let a = Vector3::planar(0.0, 0.0);
    let b = Vector3::planar(10.0, -10.0);

    let on_a = gravitational_force(a, 5.0, b, 7.0, G);
    let on_b = gravitational_force(b, 7.0, a, 5.0, G);

    // each force points toward the other body
    assert!(on_a.dot(b - a) > 0.0);
    assert!(on_b.dot(a - b) > 0.0);
}

#[test]
fn test_force_magnitude_follows_inverse_square() {
    let force = gravitational_force(Vector3::zero(), 100.0, Vector3::planar(0.0, 20.0), 40.0, G);

    // 0.5 * 100 * 40 / 400
    assert_relative_eq!(force.magnitude(), 5.0, epsilon = 1e-5);
    assert_abs_diff_eq!(force.x, 0.0);
    assert!(force.y > 0.0);
}

#[test]
fn test_pairwise_forces_are_equal_and_opposite() {
    let bodies = [
        at_rest(-30.0, 12.0, 120.0, 1.0),
        at_rest(45.0, -8.0, 300.0, 1.0),
        at_rest(5.0, 60.0, 75.0, 1.0),
    ];

    let mut net = Vector3::zero();
    for (i, a) in bodies.iter().enumerate() {
        for (j, b) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            let on_a = gravitational_force(a.position, a.mass, b.position, b.mass, G);
            let on_b = gravitational_force(b.position, b.mass, a.position, a.mass, G);
            assert_relative_eq!(on_a.x, -on_b.x, epsilon = 1e-4);
            assert_relative_eq!(on_a.y, -on_b.y, epsilon = 1e-4);
            net += on_a;
        }
    }

    // internal forces cancel, so they cannot change total momentum
    assert_abs_diff_eq!(net.x, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(net.y, 0.0, epsilon = 1e-4);
}

#[test]
fn test_coincident_bodies_give_nan() {
    let force = gravitational_force(Vector3::zero(), 1.0, Vector3::zero(), 1.0, G);
    assert!(force.x.is_nan());
}

#[test]
fn test_collision_shares_momentum_and_separates_to_contact() {
    let mut bodies = vec![
        Body::new(Vector3::planar(0.0, 0.0), Vector3::planar(1.0, 0.0), 2.0, 5.0),
        Body::new(Vector3::planar(6.0, 0.0), Vector3::planar(-1.0, 2.0), 3.0, 5.0),
    ];
    let tentative = bodies[0].position;
    let velocity = bodies[0].velocity;

    let (position, velocity) = resolve_collisions(&mut bodies, BodyId(0), tentative, velocity);

    // (2 * v1 + 3 * v2) / 5
    assert_relative_eq!(velocity.x, -0.2, epsilon = 1e-6);
    assert_relative_eq!(velocity.y, 1.2, epsilon = 1e-6);
    assert_eq!(bodies[1].velocity, velocity);

    assert_relative_eq!(position.distance_to(bodies[1].position), 10.0, epsilon = 1e-5);
    assert_eq!(position, Vector3::planar(-4.0, 0.0));
}

#[test]
fn test_collision_of_resting_equal_bodies() {
    let mut bodies = vec![at_rest(-5.0, 0.0, 100.0, 10.0), at_rest(5.0, 0.0, 100.0, 10.0)];
    let tentative = bodies[0].position;

    let (position, velocity) =
        resolve_collisions(&mut bodies, BodyId(0), tentative, Vector3::zero());

    assert_eq!(position.distance_to(bodies[1].position), 20.0);
    assert_eq!(velocity, Vector3::zero());
    assert_eq!(bodies[1].velocity, Vector3::zero());
}

#[test]
fn test_no_collision_when_apart() {
    let mut bodies = vec![
        Body::new(Vector3::zero(), Vector3::planar(1.0, 1.0), 1.0, 1.0),
        Body::new(Vector3::planar(3.0, 0.0), Vector3::planar(-4.0, 0.0), 1.0, 1.0),
    ];

    let (position, velocity) =
        resolve_collisions(&mut bodies, BodyId(0), Vector3::zero(), Vector3::planar(1.0, 1.0));

    assert_eq!(position, Vector3::zero());
    assert_eq!(velocity, Vector3::planar(1.0, 1.0));
    assert_eq!(bodies[1].velocity, Vector3::planar(-4.0, 0.0));
}

#[test]
fn test_step_resolves_overlap_after_integration() {
    let mut bodies = vec![at_rest(-5.0, 0.0, 100.0, 10.0), at_rest(5.0, 0.0, 100.0, 10.0)];

    step_body(&mut bodies, BodyId(0), G, 1000.0);

    // pulled 0.5 toward the partner, then pushed back out to contact
    assert_relative_eq!(bodies[0].position.distance_to(bodies[1].position), 20.0, epsilon = 1e-5);
    assert_relative_eq!(bodies[0].position.x, -15.0, epsilon = 1e-5);
    assert_eq!(bodies[0].velocity, bodies[1].velocity);
    assert_relative_eq!(bodies[0].velocity.x, 0.25, epsilon = 1e-6);
    assert_eq!(bodies[1].position, Vector3::planar(5.0, 0.0));
}

#[test]
fn test_step_accelerates_toward_pointer() {
    let mut bodies = vec![
        Body::pointer(Vector3::planar(100.0, 0.0), 1000.0, 50.0),
        at_rest(0.0, 0.0, 100.0, 10.0),
    ];

    step_body(&mut bodies, BodyId(1), G, 1000.0);

    let light = &bodies[1];
    assert!(light.velocity.x > 0.0);
    assert_abs_diff_eq!(light.velocity.y, 0.0);
    // G * 1000 / 100²
    assert_relative_eq!(light.velocity.magnitude(), 0.05, epsilon = 1e-6);
    assert_relative_eq!(light.position.x, 0.05, epsilon = 1e-6);

    assert_eq!(light.forces.len(), 1);
    assert_relative_eq!(light.forces[0].x, 5.0, epsilon = 1e-5);
}

#[test]
fn test_step_scales_with_dt() {
    let mut bodies = vec![
        Body::pointer(Vector3::planar(100.0, 0.0), 1000.0, 50.0),
        at_rest(0.0, 0.0, 100.0, 10.0),
    ];

    step_body(&mut bodies, BodyId(1), G, 500.0);

    assert_relative_eq!(bodies[1].velocity.x, 0.025, epsilon = 1e-6);
    assert_relative_eq!(bodies[1].position.x, 0.0125, epsilon = 1e-6);
}

#[test]
fn test_pointer_step_is_a_no_op() {
    let mut bodies = vec![
        Body::pointer(Vector3::planar(10.0, 10.0), 1000.0, 50.0),
        at_rest(200.0, 0.0, 400.0, 10.0),
    ];

    step_body(&mut bodies, BodyId(0), G, 1000.0);

    assert_eq!(bodies[0].position, Vector3::planar(10.0, 10.0));
    assert_eq!(bodies[0].velocity, Vector3::zero());
    assert!(bodies[0].forces.is_empty());
}

#[test]
fn test_collision_with_pointer_moves_neither_pointer_position() {
    let mut bodies = vec![
        Body::pointer(Vector3::zero(), 1000.0, 50.0),
        Body::new(Vector3::planar(30.0, 0.0), Vector3::planar(2.0, 0.0), 100.0, 10.0),
    ];

    step_body(&mut bodies, BodyId(1), G, 1000.0);

    assert_eq!(bodies[0].position, Vector3::zero());
    assert_relative_eq!(bodies[1].position.x, 60.0, epsilon = 1e-4);
    // the pointer takes the shared velocity but never integrates it
    assert_eq!(bodies[0].velocity, bodies[1].velocity);
    step_body(&mut bodies, BodyId(0), G, 1000.0);
    assert_eq!(bodies[0].position, Vector3::zero());
}

#[test]
fn test_later_collisions_see_corrected_position() {
    // the first correction pushes the mover straight into the second partner
    let mut bodies = vec![
        at_rest(0.0, 0.0, 1.0, 5.0),
        at_rest(4.0, 0.0, 1.0, 5.0),
        at_rest(-12.0, 0.0, 1.0, 5.0),
    ];

    let (position, _) =
        resolve_collisions(&mut bodies, BodyId(0), Vector3::zero(), Vector3::zero());

    // pushed to -6 by the body at 4, then to -2 by the body at -12
    assert_relative_eq!(position.x, -2.0, epsilon = 1e-5);
    assert_relative_eq!(position.distance_to(bodies[2].position), 10.0, epsilon = 1e-5);
}
