use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A sphere in the simulation. All bodies share the radius in [`PhysicsParams`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec3,
    pub vel: Vec3,
}

impl Body {
    /// A body at rest at `pos`
    pub fn at(pos: Vec3) -> Self {
        Self { pos, vel: Vec3::ZERO }
    }

    pub fn new(pos: Vec3, vel: Vec3) -> Self {
        Self { pos, vel }
    }
}

/// Constants driving the per-frame step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub radius: f32,
    /// Squared distance below which the attractor pulls a body
    pub attraction_radius_sq: f32,
    /// Positive pulls toward the target, negative pushes away
    pub attraction_strength: f32,
    pub centering_strength: f32,
    /// Extra factor on the centering term, applied on top of dt
    pub centering_scale: f32,
    pub gravity: Vec3,
    pub linear_damping: f32,
}

impl PhysicsParams {
    pub const REFERENCE: Self = Self {
        radius: 1.0,
        attraction_radius_sq: 9.0,
        attraction_strength: 200.0,
        centering_strength: -80.0,
        centering_scale: 0.1,
        gravity: Vec3::new(0.0, 2.0, 0.0),
        linear_damping: 0.65,
    };

    /// Params with every force switched off, only collisions remain.
    /// Damping stays as given so callers can opt into it.
    pub fn collisions_only(radius: f32) -> Self {
        Self {
            radius,
            attraction_radius_sq: 0.0,
            attraction_strength: 0.0,
            centering_strength: 0.0,
            centering_scale: 0.0,
            gravity: Vec3::ZERO,
            linear_damping: 0.0,
        }
    }

    /// Minimum allowed distance between two centers
    pub fn contact_distance(&self) -> f32 {
        self.radius * 2.0
    }
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// The set of simulated bodies together with the constants acting on them
#[derive(Debug, Clone, Default)]
pub struct World {
    pub bodies: Vec<Body>,
    pub params: PhysicsParams,
}

impl World {
    pub fn with_bodies(bodies: Vec<Body>, params: PhysicsParams) -> Self {
        Self { bodies, params }
    }

    /// Advance every body by one frame toward `target`
    pub fn step(&mut self, target: Vec3, dt: f32) {
        crate::integrator::step(&mut self.bodies, &self.params, target, dt);
    }

    /// Sum of `0.5 * |v|^2` over all bodies (unit mass)
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.vel.length_squared())
            .sum()
    }

    /// Number of body pairs currently closer than the contact distance
    pub fn overlapping_pairs(&self) -> usize {
        let contact = self.params.contact_distance();
        let mut count = 0;
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                if self.bodies[i].pos.distance(self.bodies[j].pos) < contact {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of bodies inside the attraction radius of `target`
    pub fn attracted_count(&self, target: Vec3) -> usize {
        self.bodies
            .iter()
            .filter(|b| (target - b.pos).length_squared() < self.params.attraction_radius_sq)
            .count()
    }
}
