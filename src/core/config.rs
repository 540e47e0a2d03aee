use crate::core::particle::DIM;
use crate::error::{Error, Result};

/// One particle species: shared geometry, mass, display color and population.
#[derive(Debug, Clone)]
pub struct SpeciesConfig {
    /// Species index; the set of indices across a config must be exactly
    /// `0..species.len()` so every particle has a matching histogram slot.
    pub species: usize,
    /// Display color token (opaque to the physics).
    pub color: String,
    /// Disc radius for every particle of this species (> 0).
    pub radius: f64,
    /// Mass for every particle of this species (>= 0).
    pub mass: f64,
    /// Number of particles to create.
    pub count: usize,
}

impl SpeciesConfig {
    /// Convenience constructor used by the default experiment and tests.
    pub fn new(
        species: usize,
        color: impl Into<String>,
        radius: f64,
        mass: f64,
        count: usize,
    ) -> Self {
        Self {
            species,
            color: color.into(),
            radius,
            mass,
            count,
        }
    }
}

/// Full construction input for a [`Simulation`](crate::core::Simulation).
///
/// Everything is supplied once at construction and is not reloadable. The
/// container is the axis-aligned rectangle from `top_left` spanning
/// `box_width` by `box_height`. Initial velocities are sampled per axis from
/// `[-radius * max_speed_factor, +radius * max_speed_factor]`.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Top-left corner of the container.
    pub top_left: [f64; DIM],
    /// Container width (> 0).
    pub box_width: f64,
    /// Container height (> 0).
    pub box_height: f64,
    /// Particle species table (non-empty).
    pub species: Vec<SpeciesConfig>,
    /// Number of speed buckets per histogram (> 0).
    pub bucket_count: usize,
    /// Width of each speed bucket (> 0).
    pub bucket_width: f64,
    /// Initial-velocity scale: per-axis speeds start within
    /// `±radius * max_speed_factor`.
    pub max_speed_factor: f64,
    /// RNG seed for reproducible placement; `None` for a nondeterministic run.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    /// The built-in four-species experiment: heavy large red discs, light
    /// small blue ones, and two dense species in a 600x600 container with an
    /// 8-bucket histogram of width 0.5.
    fn default() -> Self {
        Self {
            top_left: [0.0, 0.0],
            box_width: 600.0,
            box_height: 600.0,
            species: vec![
                SpeciesConfig::new(0, "red", 20.0, 100.0, 20),
                SpeciesConfig::new(1, "blue", 10.0, 50.0, 10),
                SpeciesConfig::new(2, "green", 10.0, 500.0, 5),
                SpeciesConfig::new(3, "yellow", 20.0, 500.0, 5),
            ],
            bucket_count: 8,
            bucket_width: 0.5,
            max_speed_factor: 0.2,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Check every construction contract, failing fast on the first violation.
    ///
    /// Errors: `Error::InvalidParam` describing the offending field. A config
    /// that passes here cannot produce a runtime failure later: every species
    /// index has a histogram, every particle constructor argument is valid,
    /// and every sampling range is well-formed.
    pub fn validate(&self) -> Result<()> {
        if !self.top_left.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidParam("top_left must be finite".into()));
        }
        if !self.box_width.is_finite() || self.box_width <= 0.0 {
            return Err(Error::InvalidParam(
                "box_width must be finite and > 0".into(),
            ));
        }
        if !self.box_height.is_finite() || self.box_height <= 0.0 {
            return Err(Error::InvalidParam(
                "box_height must be finite and > 0".into(),
            ));
        }
        if self.species.is_empty() {
            return Err(Error::InvalidParam(
                "at least one particle species is required".into(),
            ));
        }

        // Species indices must be exactly {0..n}: each one names a histogram
        // slot, and a particle with no histogram is a contract violation we
        // refuse at construction rather than discover mid-run.
        let n = self.species.len();
        let mut seen = vec![false; n];
        for sp in &self.species {
            if sp.species >= n {
                return Err(Error::InvalidParam(format!(
                    "species index {} out of range (expected 0..{})",
                    sp.species, n
                )));
            }
            if seen[sp.species] {
                return Err(Error::InvalidParam(format!(
                    "duplicate species index {}",
                    sp.species
                )));
            }
            seen[sp.species] = true;

            if !sp.radius.is_finite() || sp.radius <= 0.0 {
                return Err(Error::InvalidParam(format!(
                    "species {}: radius must be finite and > 0",
                    sp.species
                )));
            }
            if !sp.mass.is_finite() || sp.mass < 0.0 {
                return Err(Error::InvalidParam(format!(
                    "species {}: mass must be finite and >= 0",
                    sp.species
                )));
            }
        }

        if self.bucket_count == 0 {
            return Err(Error::InvalidParam("bucket_count must be > 0".into()));
        }
        if !self.bucket_width.is_finite() || self.bucket_width <= 0.0 {
            return Err(Error::InvalidParam(
                "bucket_width must be finite and > 0".into(),
            ));
        }
        if !self.max_speed_factor.is_finite() || self.max_speed_factor < 0.0 {
            return Err(Error::InvalidParam(
                "max_speed_factor must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Total particle population across all species.
    pub fn total_count(&self) -> usize {
        self.species.iter().map(|sp| sp.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_count(), 40);
    }

    #[test]
    fn rejects_bad_container() {
        let mut config = SimulationConfig::default();
        config.box_width = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.box_height = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_species_table() {
        let mut config = SimulationConfig::default();
        config.species.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_species_index_without_histogram() {
        let mut config = SimulationConfig::default();
        config.species[3].species = 7;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn rejects_duplicate_species_index() {
        let mut config = SimulationConfig::default();
        config.species[1].species = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_bad_species_parameters() {
        let mut config = SimulationConfig::default();
        config.species[0].radius = -1.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.species[0].mass = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_mass_species_is_valid() {
        let mut config = SimulationConfig::default();
        config.species[0].mass = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_histogram_shape() {
        let mut config = SimulationConfig::default();
        config.bucket_count = 0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.bucket_width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_speed_factor() {
        let mut config = SimulationConfig::default();
        config.max_speed_factor = -0.1;
        assert!(config.validate().is_err());
    }
}
