use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

pub mod core;
pub mod error;

use crate::core::particle::DIM;
use crate::core::{Simulation, SimulationConfig, SpeciesConfig};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// IdealGas Python-facing wrapper around the Rust simulation core.
///
/// API:
/// - __new__(box_width, box_height, species, top_left=(0, 0), bucket_count=8,
///   bucket_width=0.5, max_speed_factor=0.2, seed=None)
/// - step() / step_many(n)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
/// - get_species() / get_radii() / get_colors() -> per-particle draw inputs
/// - get_speed_histogram(species) -> {"edges", "counts", "total", "color"}
///
/// The wrapper holds the only reference to the simulation state, so readers
/// always observe committed post-step state.
#[pyclass]
pub struct IdealGas {
    sim: Simulation,
}

#[pymethods]
impl IdealGas {
    /// Initialize a new ideal-gas simulation in a rectangular container.
    ///
    /// Parameters
    /// - box_width, box_height: container dimensions (floats, > 0)
    /// - species: list of (color, radius, mass, count) tuples; the species
    ///   index is the position in this list
    /// - top_left: container top-left corner (default origin)
    /// - bucket_count, bucket_width: speed-histogram shape
    /// - max_speed_factor: initial per-axis speeds are uniform in
    ///   [-radius * factor, +radius * factor]
    /// - seed: RNG seed (int) for reproducibility; None for nondeterministic
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (
        box_width,
        box_height,
        species,
        top_left=(0.0, 0.0),
        bucket_count=8,
        bucket_width=0.5,
        max_speed_factor=0.2,
        seed=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        box_width: f64,
        box_height: f64,
        species: Vec<(String, f64, f64, usize)>,
        top_left: (f64, f64),
        bucket_count: usize,
        bucket_width: f64,
        max_speed_factor: f64,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let species = species
            .into_iter()
            .enumerate()
            .map(|(i, (color, radius, mass, count))| SpeciesConfig::new(i, color, radius, mass, count))
            .collect();
        let config = SimulationConfig {
            top_left: [top_left.0, top_left.1],
            box_width,
            box_height,
            species,
            bucket_count,
            bucket_width,
            max_speed_factor,
            seed,
        };
        let sim = Simulation::new(&config).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance the simulation by one frame (releases the GIL during computation).
    fn step(&mut self, py: Python<'_>) {
        py.allow_threads(|| self.sim.step());
    }

    /// Advance the simulation by `n` frames (releases the GIL during computation).
    #[pyo3(signature = (n=1))]
    fn step_many(&mut self, py: Python<'_>, n: usize) {
        py.allow_threads(|| {
            for _ in 0..n {
                self.sim.step();
            }
        });
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let n = self.sim.num_particles();
        let mut arr = Array2::<f64>::zeros((n, DIM));
        for (i, p) in self.sim.particles.iter().enumerate() {
            for k in 0..DIM {
                arr[[i, k]] = p.r[k];
            }
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let n = self.sim.num_particles();
        let mut arr = Array2::<f64>::zeros((n, DIM));
        for (i, p) in self.sim.particles.iter().enumerate() {
            for k in 0..DIM {
                arr[[i, k]] = p.v[k];
            }
        }
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Return the per-particle species index, aligned with get_positions().
    fn get_species(&self) -> Vec<usize> {
        self.sim.particles.iter().map(|p| p.species).collect()
    }

    /// Return the per-particle radius, aligned with get_positions().
    fn get_radii(&self) -> Vec<f64> {
        self.sim.particles.iter().map(|p| p.radius).collect()
    }

    /// Return the per-particle display color token, aligned with get_positions().
    fn get_colors(&self) -> Vec<String> {
        self.sim.particles.iter().map(|p| p.color.clone()).collect()
    }

    /// Return one species' speed histogram.
    ///
    /// Returns: dict {"edges": np.ndarray of bucket_count + 1 boundaries,
    /// "counts": np.ndarray of bucket frequencies, "total": int, "color": str}.
    /// The renderer divides counts by total to normalize bar heights.
    ///
    /// Errors: raises ValueError for an unknown species index.
    fn get_speed_histogram<'py>(&self, py: Python<'py>, species: usize) -> PyResult<Py<PyDict>> {
        let hist = self
            .sim
            .histogram(species)
            .ok_or_else(|| py_err(format!("unknown species index {species}")))?;
        let out = PyDict::new(py);
        out.set_item("edges", hist.bucket_edges().into_pyarray(py))?;
        out.set_item("counts", hist.frequencies().to_vec().into_pyarray(py))?;
        out.set_item("total", hist.total())?;
        out.set_item("color", hist.color())?;
        Ok(out.into())
    }

    /// Return the container bounds as ((left, top), width, height).
    fn get_bounds(&self) -> ((f64, f64), f64, f64) {
        let [left, top] = self.sim.top_left();
        ((left, top), self.sim.box_width(), self.sim.box_height())
    }

    /// Number of particles.
    fn num_particles(&self) -> usize {
        self.sim.num_particles()
    }

    /// Total kinetic energy of the gas (diagnostic).
    fn kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }
}

/// The idealgas Python module entry point.
#[pymodule]
fn idealgas(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<IdealGas>()?;
    Ok(())
}
