use crate::core::collision::{collision_velocities, particles_approaching};
use crate::core::config::SimulationConfig;
use crate::core::histogram::SpeedHistogram;
use crate::core::particle::{Particle, AXIS_X, AXIS_Y, DIM};
use crate::error::Result;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// The ideal-gas simulation: a fixed particle population in a rectangular
/// container, advanced one discrete frame at a time.
///
/// Each [`step`](Simulation::step) runs the same four phases in strict order:
/// free-flight integration, wall resolution, the O(n²) pairwise collision
/// sweep, and the per-species histogram refresh. The engine owns its state
/// exclusively; external readers only see committed post-step state.
#[derive(Debug)]
pub struct Simulation {
    top_left: [f64; DIM],
    box_width: f64,
    box_height: f64,
    pub particles: Vec<Particle>,
    histograms: Vec<SpeedHistogram>,
}

impl Simulation {
    /// Build a simulation from a validated configuration.
    ///
    /// The whole config is checked up front (fail fast on contract
    /// violations); afterwards particles are placed uniformly over the
    /// container interior with per-axis initial speeds drawn uniformly from
    /// `±radius * max_speed_factor`, using a `StdRng` seeded from
    /// `config.seed` (or from the thread rng when no seed is given).
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng: StdRng = match config.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        // Indices are exactly {0..n} after validation, so the sorted species
        // table lines up with histogram slot = species index.
        let mut by_index: Vec<_> = config.species.iter().collect();
        by_index.sort_by_key(|sp| sp.species);
        let histograms = by_index
            .iter()
            .map(|sp| SpeedHistogram::new(config.bucket_count, config.bucket_width, sp.color.clone()))
            .collect::<Result<Vec<_>>>()?;

        let [left, top] = config.top_left;
        let mut particles = Vec::with_capacity(config.total_count());
        for sp in &config.species {
            let v_max = sp.radius * config.max_speed_factor;
            for _ in 0..sp.count {
                let r = [
                    rng.random_range(left..=left + config.box_width),
                    rng.random_range(top..=top + config.box_height),
                ];
                let v = [
                    rng.random_range(-v_max..=v_max),
                    rng.random_range(-v_max..=v_max),
                ];
                particles.push(Particle::new(sp.species, r, v, sp.color.clone(), sp.radius, sp.mass)?);
            }
        }

        let mut sim = Self {
            top_left: config.top_left,
            box_width: config.box_width,
            box_height: config.box_height,
            particles,
            histograms,
        };
        // Start with histograms describing the initial population rather than
        // all-zero tables.
        sim.refresh_histograms();
        Ok(sim)
    }

    /// Advance the simulation by one frame.
    ///
    /// Phase order is part of the contract:
    /// 1. every particle moves by its velocity;
    /// 2. every particle is tested against all four walls (independent
    ///    per-axis flips, so a corner hit reverses both components);
    /// 3. every unordered pair i<j is visited exactly once in a single
    ///    forward sweep, resolving a pair with whatever velocities its two
    ///    particles hold at visitation time -- a particle in two
    ///    near-simultaneous collisions sees the second one computed from its
    ///    post-first-collision velocity, and pairs are never reprocessed;
    /// 4. every histogram is reset and repopulated from the current speeds.
    ///
    /// Total: no phase can fail at runtime.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.advance();
        }

        let (x_min, x_max) = (self.top_left[AXIS_X], self.top_left[AXIS_X] + self.box_width);
        let (y_min, y_max) = (self.top_left[AXIS_Y], self.top_left[AXIS_Y] + self.box_height);
        for p in &mut self.particles {
            p.resolve_wall_collision(AXIS_X, x_min);
            p.resolve_wall_collision(AXIS_X, x_max);
            p.resolve_wall_collision(AXIS_Y, y_min);
            p.resolve_wall_collision(AXIS_Y, y_max);
        }

        let n = self.particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.particles.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if particles_approaching(a, b) {
                    let (va, vb) = collision_velocities(a, b);
                    a.v = va;
                    b.v = vb;
                }
            }
        }

        self.refresh_histograms();
    }

    fn refresh_histograms(&mut self) {
        for h in &mut self.histograms {
            h.reset();
        }
        for p in &self.particles {
            self.histograms[p.species].count(p);
        }
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Read-only view of the per-species speed histograms, slot = species.
    pub fn histograms(&self) -> &[SpeedHistogram] {
        &self.histograms
    }

    /// The histogram for one species, if it exists.
    pub fn histogram(&self, species: usize) -> Option<&SpeedHistogram> {
        self.histograms.get(species)
    }

    /// Top-left corner of the container.
    pub fn top_left(&self) -> [f64; DIM] {
        self.top_left
    }

    /// Container width.
    pub fn box_width(&self) -> f64 {
        self.box_width
    }

    /// Container height.
    pub fn box_height(&self) -> f64 {
        self.box_height
    }

    /// Total kinetic energy (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Total momentum vector (diagnostic).
    pub fn momentum(&self) -> [f64; DIM] {
        let mut total = [0.0; DIM];
        for p in &self.particles {
            for (tk, vk) in total.iter_mut().zip(&p.v) {
                *tk += p.mass * vk;
            }
        }
        total
    }
}
