//! Behavior of a single physics step

use baubles_core::engine::{Body, PhysicsParams};
use baubles_core::integrator::step;
use baubles_core::tests::test_helpers::{
    approx_eq_f32, approx_eq_vec3, bodies_identical, damping_only, far_target, pair_on_x,
};
use glam::Vec3;

#[test]
fn test_zero_dt_leaves_state_unchanged() {
    // Grid spaced wider than the contact distance so nothing collides
    let mut bodies = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            let pos = Vec3::new(i as f32 * 3.0 - 4.5, j as f32 * 3.0 - 4.5, 1.0);
            let vel = Vec3::new(j as f32 + 1.0, -(i as f32) - 1.0, 0.5);
            bodies.push(Body::new(pos, vel));
        }
    }
    let before = bodies.clone();

    step(&mut bodies, &PhysicsParams::REFERENCE, Vec3::new(0.2, 0.1, 0.0), 0.0);

    assert!(bodies_identical(&before, &bodies), "dt = 0 must be a no-op");
}

#[test]
fn test_overlapping_pair_is_pushed_to_contact_distance() {
    let mut bodies = pair_on_x(Vec3::ZERO, 1.2);
    let before = bodies.clone();

    step(&mut bodies, &PhysicsParams::REFERENCE, far_target(), 0.0);

    let dist = bodies[0].pos.distance(bodies[1].pos);
    assert!(approx_eq_f32(dist, 2.0, 1e-6), "distance was {}", dist);

    // Each body moves (2r - d) / 2 = 0.4
    let moved_a = before[0].pos.distance(bodies[0].pos);
    let moved_b = before[1].pos.distance(bodies[1].pos);
    assert!(approx_eq_f32(moved_a, 0.4, 1e-6));
    assert!(approx_eq_f32(moved_b, 0.4, 1e-6));
    assert!(bodies[0].pos.x < before[0].pos.x, "a should move away from b");
    assert!(bodies[1].pos.x > before[1].pos.x, "b should move away from a");
}

#[test]
fn test_separation_along_diagonal_axis() {
    let axis = Vec3::new(1.0, 2.0, -2.0).normalize();
    let mut bodies = vec![Body::at(Vec3::ZERO), Body::at(axis * 0.5)];
    let params = PhysicsParams::collisions_only(1.0);

    step(&mut bodies, &params, far_target(), 0.0);

    let delta = bodies[1].pos - bodies[0].pos;
    assert!(approx_eq_f32(delta.length(), 2.0, 1e-5));
    assert!(approx_eq_vec3(delta.normalize(), axis, 1e-5));
    // Midpoint is preserved by the symmetric correction
    assert!(approx_eq_vec3(
        (bodies[0].pos + bodies[1].pos) * 0.5,
        axis * 0.25,
        1e-5
    ));
}

#[test]
fn test_collision_conserves_normal_momentum() {
    let normal_dir = Vec3::new(0.6, 0.8, 0.0);
    let mut bodies = vec![
        Body::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 0.5)),
        Body::new(normal_dir * 1.5, Vec3::new(-1.0, 0.5, 3.0)),
    ];
    let before = bodies.clone();
    let params = PhysicsParams::collisions_only(1.0);

    step(&mut bodies, &params, far_target(), 0.01);

    // Correction is symmetric along the center line, so the normal keeps
    // its direction
    let n = (before[0].pos - before[1].pos).normalize();
    let sum_before = before[0].vel.dot(n) + before[1].vel.dot(n);
    let sum_after = bodies[0].vel.dot(n) + bodies[1].vel.dot(n);
    assert!(approx_eq_f32(sum_before, sum_after, 1e-5));

    // Normal components swapped
    assert!(approx_eq_f32(bodies[0].vel.dot(n), before[1].vel.dot(n), 1e-5));
    assert!(approx_eq_f32(bodies[1].vel.dot(n), before[0].vel.dot(n), 1e-5));

    // Tangential components untouched
    for (b, a) in bodies.iter().zip(&before) {
        let tangent_after = b.vel - n * b.vel.dot(n);
        let tangent_before = a.vel - n * a.vel.dot(n);
        assert!(approx_eq_vec3(tangent_after, tangent_before, 1e-5));
    }
}

#[test]
fn test_head_on_collision_reverses_approach() {
    let mut bodies = vec![
        Body::new(Vec3::new(-0.9, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)),
        Body::new(Vec3::new(0.9, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0)),
    ];
    step(&mut bodies, &PhysicsParams::collisions_only(1.0), far_target(), 0.01);

    assert_eq!(bodies[0].vel, Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(bodies[1].vel, Vec3::new(2.0, 0.0, 0.0));
    assert!(bodies[0].pos.distance(bodies[1].pos) > 2.0);
}

fn attraction_only() -> PhysicsParams {
    PhysicsParams {
        attraction_radius_sq: 9.0,
        attraction_strength: 200.0,
        ..PhysicsParams::collisions_only(1.0)
    }
}

#[test]
fn test_attraction_threshold_is_exclusive() {
    let mut bodies = vec![Body::at(Vec3::new(3.0, 0.0, 0.0))];
    step(&mut bodies, &attraction_only(), Vec3::ZERO, 0.01);

    assert_eq!(bodies[0].vel, Vec3::ZERO, "squared distance 9 must not attract");
}

#[test]
fn test_attraction_just_inside_threshold() {
    let mut bodies = vec![Body::at(Vec3::new(8.999_f32.sqrt(), 0.0, 0.0))];
    let dt = 0.01;
    step(&mut bodies, &attraction_only(), Vec3::ZERO, dt);

    let vel = bodies[0].vel;
    assert!(vel.x < 0.0, "impulse should point at the target, got {:?}", vel);
    assert!(approx_eq_f32(vel.length(), dt * 200.0, 1e-4));
    assert!(approx_eq_f32(vel.y, 0.0, 1e-6) && approx_eq_f32(vel.z, 0.0, 1e-6));
}

#[test]
fn test_negative_strength_repels() {
    let params = PhysicsParams {
        attraction_strength: -200.0,
        ..attraction_only()
    };
    let mut bodies = vec![Body::at(Vec3::new(1.0, 0.0, 0.0))];
    step(&mut bodies, &params, Vec3::ZERO, 0.01);

    assert!(bodies[0].vel.x > 0.0);
}

#[test]
fn test_damping_scales_speed() {
    let mut bodies = vec![Body::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0))];
    let dt = 0.1;
    step(&mut bodies, &damping_only(0.65), far_target(), dt);

    let expected = 5.0 * (1.0 - 0.65 * dt);
    assert!(approx_eq_f32(bodies[0].vel.length(), expected, 1e-5));
}

#[test]
fn test_damping_stops_body_at_critical_dt() {
    let mut bodies = vec![Body::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0))];
    step(&mut bodies, &damping_only(0.65), far_target(), 1.0 / 0.65);

    assert!(bodies[0].vel.length() < 1e-5, "got {:?}", bodies[0].vel);
}

#[test]
fn test_damping_flips_velocity_past_critical_dt() {
    let mut bodies = vec![Body::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0))];
    step(&mut bodies, &damping_only(0.65), far_target(), 2.0 / 0.65);

    // Factor 1 - 2 = -1: the velocity is reversed, not clamped
    assert!(approx_eq_vec3(bodies[0].vel, Vec3::new(-3.0, -4.0, 0.0), 1e-4));
}

#[test]
fn test_gravity_pushes_up() {
    let params = PhysicsParams {
        gravity: Vec3::new(0.0, 2.0, 0.0),
        ..PhysicsParams::collisions_only(1.0)
    };
    let mut bodies = vec![Body::at(Vec3::ZERO)];
    step(&mut bodies, &params, far_target(), 0.5);

    assert_eq!(bodies[0].vel, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(bodies[0].pos, Vec3::new(0.0, 0.5, 0.0));
}

#[test]
fn test_positions_integrate_after_collisions() {
    // Velocity after the swap is what moves the bodies
    let mut bodies = vec![
        Body::new(Vec3::new(-0.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
        Body::new(Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO),
    ];
    step(&mut bodies, &PhysicsParams::collisions_only(1.0), far_target(), 0.5);

    assert!(approx_eq_vec3(bodies[0].pos, Vec3::new(-1.0, 0.0, 0.0), 1e-6));
    assert!(approx_eq_vec3(bodies[1].pos, Vec3::new(1.5, 0.0, 0.0), 1e-6));
}
