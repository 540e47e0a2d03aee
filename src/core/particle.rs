use crate::error::{Error, Result};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// X axis index into position/velocity vectors.
pub const AXIS_X: usize = 0;
/// Y axis index into position/velocity vectors.
pub const AXIS_Y: usize = 1;

/// A gas particle: fixed shape and mass, mutable kinematics.
///
/// Fields:
/// - `species`: index of the particle's species, used to select its histogram
/// - `r`: position [x, y] in container coordinates
/// - `v`: velocity [vx, vy] in distance per step
/// - `radius`: disc radius (> 0), fixed for the particle's lifetime
/// - `mass`: mass (>= 0, zero permitted), fixed for the particle's lifetime
/// - `color`: opaque display token, never interpreted by the physics
#[derive(Debug, Clone)]
pub struct Particle {
    /// Species index (must match a histogram slot in the owning simulation).
    pub species: usize,
    /// Position (x, y).
    pub r: [f64; DIM],
    /// Velocity (vx, vy).
    pub v: [f64; DIM],
    /// Disc radius (> 0).
    pub radius: f64,
    /// Mass (>= 0).
    pub mass: f64,
    /// Display color token.
    pub color: String,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` is non-positive, `mass` is
    ///   negative, or any position/velocity component is NaN/inf.
    pub fn new(
        species: usize,
        r: [f64; DIM],
        v: [f64; DIM],
        color: impl Into<String>,
        radius: f64,
        mass: f64,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !mass.is_finite() || mass < 0.0 {
            return Err(Error::InvalidParam("mass must be finite and >= 0".into()));
        }
        if !r.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            species,
            r,
            v,
            radius,
            mass,
            color: color.into(),
        })
    }

    /// Advance the particle by one step of free flight: `r += v`.
    #[inline]
    pub fn advance(&mut self) {
        for (rk, vk) in self.r.iter_mut().zip(&self.v) {
            *rk += vk;
        }
    }

    /// Reflect off an axis-aligned wall if the particle is touching it.
    ///
    /// `axis` selects the coordinate perpendicular to the wall (`AXIS_X` for a
    /// vertical wall, `AXIS_Y` for a horizontal one) and `wall_pos` is the
    /// wall's coordinate on that axis. The velocity component flips iff the
    /// particle is within its radius of the wall AND moving toward it; the
    /// sign test on `(r - wall) * v` keeps a particle already past the wall
    /// plane from being flipped back into it every step.
    pub fn resolve_wall_collision(&mut self, axis: usize, wall_pos: f64) {
        let gap = self.r[axis] - wall_pos;
        if gap.abs() <= self.radius && gap * self.v[axis] < 0.0 {
            self.v[axis] = -self.v[axis];
        }
    }

    /// Current speed: `|v|`.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.v[AXIS_X].hypot(self.v[AXIS_Y])
    }

    /// Kinetic energy: `1/2 m |v|^2` (diagnostic).
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        let vsq: f64 = self.v.iter().map(|&c| c * c).sum();
        0.5 * self.mass * vsq
    }
}
