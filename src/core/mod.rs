//! Core simulation types for the 2D ideal-gas model.
//!
//! This module holds the physics engine proper: particle state and kinematics,
//! the pairwise elastic-collision math, the per-species speed histograms, and
//! the `Simulation` driver that advances the whole system one discrete frame
//! at a time. Rendering and input live outside the crate and only read the
//! views exposed here.

pub mod collision;
pub mod config;
pub mod histogram;
pub mod particle;
pub mod sim;

pub use config::{SimulationConfig, SpeciesConfig};
pub use histogram::SpeedHistogram;
pub use particle::Particle;
pub use sim::Simulation;
