//! Pairwise sphere contact handling
//!
//! Overlapping pairs are pushed apart symmetrically and then exchange the
//! velocity components along the contact normal, which is an elastic
//! collision between equal masses.

use crate::engine::Body;

/// Resolve a single pair. Returns true if the pair was overlapping.
pub fn resolve_pair(a: &mut Body, b: &mut Body, contact_distance: f32) -> bool {
    let delta = a.pos - b.pos;
    let dist = delta.length();
    if dist >= contact_distance {
        return false;
    }

    // Coincident centers give a zero normal, so neither body moves
    let overlap = contact_distance - dist;
    let correction = delta.normalize_or_zero() * (overlap / 2.0);
    a.pos += correction;
    b.pos -= correction;

    let normal = (a.pos - b.pos).normalize_or_zero();
    let va = a.vel.dot(normal);
    let vb = b.vel.dot(normal);

    // Add the normal delta rather than rebuilding the vector so the
    // tangential part is kept bit for bit
    a.vel += normal * (vb - va);
    b.vel += normal * (va - vb);

    true
}

/// Resolve every pair `(i, j)` with `i < j` in index order.
/// Returns the number of pairs that were overlapping when visited.
pub fn resolve_collisions(bodies: &mut [Body], contact_distance: f32) -> usize {
    let mut resolved = 0;
    for i in 0..bodies.len() {
        // Split so we can hold `i` and every `j > i` mutably at once
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b, contact_distance) {
                resolved += 1;
            }
        }
    }
    resolved
}
