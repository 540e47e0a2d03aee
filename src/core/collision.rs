//! Pairwise elastic-collision math.
//!
//! Stateless functions over a pair of particles: a predicate deciding whether
//! the pair is actually colliding this step, and the momentum-conserving
//! velocity update. The update is a pure function returning both new
//! velocities so the caller can assign them atomically; no partially-mutated
//! pair state is ever observable.

use crate::core::particle::{Particle, DIM};

#[inline]
fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
fn sub(a: &[f64; DIM], b: &[f64; DIM]) -> [f64; DIM] {
    let mut out = [0.0; DIM];
    for (k, o) in out.iter_mut().enumerate() {
        *o = a[k] - b[k];
    }
    out
}

/// True iff `a` and `b` overlap AND are strictly closing on each other.
///
/// Both conditions are required: overlap alone must not trigger a response,
/// otherwise a pair already inside each other's radius but separating (or in
/// lockstep) would re-collide every step. Coincident centers or identical
/// velocities give a zero closing product and therefore never collide.
pub fn particles_approaching(a: &Particle, b: &Particle) -> bool {
    let dr = sub(&a.r, &b.r);
    let dv = sub(&a.v, &b.v);
    let r_sum = a.radius + b.radius;
    dot(&dr, &dr) <= r_sum * r_sum && dot(&dv, &dr) < 0.0
}

/// Elastic collision response: the post-collision velocities of `(a, b)`.
///
/// Applies the standard 2D two-body impulse
///
/// ```text
/// v_a' = v_a - ((v_a - v_b)·(r_a - r_b) / |r_a - r_b|^2) (r_a - r_b) (2 m_b / (m_a + m_b))
/// ```
///
/// and the mirror-image update for `b`, both computed from the pre-collision
/// velocities. Symmetric in argument order and conserves momentum and kinetic
/// energy whenever `m_a + m_b > 0`.
///
/// Degenerate pairs are no-ops rather than errors: coincident centers have no
/// contact normal, and a pair with zero combined mass carries no momentum to
/// exchange. Either way the current velocities are returned unchanged.
pub fn collision_velocities(a: &Particle, b: &Particle) -> ([f64; DIM], [f64; DIM]) {
    let dr = sub(&a.r, &b.r);
    let dist_sq = dot(&dr, &dr);
    let total_mass = a.mass + b.mass;
    if dist_sq == 0.0 || total_mass == 0.0 {
        return (a.v, b.v);
    }

    let dv = sub(&a.v, &b.v);
    // (v_a - v_b)·(r_a - r_b) == (v_b - v_a)·(r_b - r_a), so one dot product
    // serves both halves of the update.
    let closing = dot(&dv, &dr) / dist_sq;

    let scale_a = closing * 2.0 * b.mass / total_mass;
    let scale_b = closing * 2.0 * a.mass / total_mass;

    let mut va = a.v;
    let mut vb = b.v;
    for k in 0..DIM {
        va[k] -= scale_a * dr[k];
        vb[k] += scale_b * dr[k];
    }
    (va, vb)
}
