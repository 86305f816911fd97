use crate::collision::resolve_collisions;
use crate::engine::{Body, PhysicsParams};
use glam::Vec3;

/// Advance the bodies by one frame of length `dt`.
///
/// Velocities are updated first (attraction, centering, gravity, damping, in
/// that order), then overlapping pairs are resolved, then positions are
/// integrated with explicit Euler. `dt` is used as given: large values can
/// tunnel or flip the damping factor negative.
pub fn step(bodies: &mut [Body], params: &PhysicsParams, target: Vec3, dt: f32) {
    for body in bodies.iter_mut() {
        apply_forces(body, params, target, dt);
    }

    // Pairs counted here are pre-integration; FrameStats reports the
    // post-step overlap count instead
    resolve_collisions(bodies, params.contact_distance());

    for body in bodies.iter_mut() {
        body.pos += body.vel * dt;
    }
}

/// Accumulate the per-body velocity terms
pub fn apply_forces(body: &mut Body, params: &PhysicsParams, target: Vec3, dt: f32) {
    let to_target = target - body.pos;
    if to_target.length_squared() < params.attraction_radius_sq {
        body.vel += to_target.normalize_or_zero() * (dt * params.attraction_strength);
    }

    let centering = body.pos.normalize_or_zero() * params.centering_strength;
    body.vel += centering * (dt * params.centering_scale);

    body.vel += params.gravity * dt;

    body.vel *= 1.0 - params.linear_damping * dt;
}
