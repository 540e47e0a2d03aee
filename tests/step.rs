use idealgas::core::particle::{AXIS_X, AXIS_Y};
use idealgas::core::{Simulation, SimulationConfig, SpeciesConfig};
use idealgas::error::Result;

/// A small container with `count` identical discs, seeded so tests can stage
/// particle states deterministically before stepping.
fn small_sim(count: usize) -> Result<Simulation> {
    let config = SimulationConfig {
        species: vec![SpeciesConfig::new(0, "red", 10.0, 1.0, count)],
        seed: Some(1),
        ..SimulationConfig::default()
    };
    Simulation::new(&config)
}

/// With nothing within colliding distance of a wall or another particle, a
/// step is pure free flight: positions shift by exactly one velocity step and
/// velocities are untouched.
#[test]
fn free_flight_step_only_translates() -> Result<()> {
    let mut sim = small_sim(2)?;
    sim.particles[0].r = [100.0, 100.0];
    sim.particles[0].v = [1.0, 2.0];
    sim.particles[1].r = [400.0, 400.0];
    sim.particles[1].v = [-2.0, 1.0];

    sim.step();

    assert_eq!(sim.particles[0].r, [101.0, 102.0]);
    assert_eq!(sim.particles[0].v, [1.0, 2.0]);
    assert_eq!(sim.particles[1].r, [398.0, 401.0]);
    assert_eq!(sim.particles[1].v, [-2.0, 1.0]);
    Ok(())
}

/// A particle driven into a corner flips both velocity components in the same
/// step, one per axis.
#[test]
fn corner_hit_reverses_both_axes() -> Result<()> {
    let mut sim = small_sim(1)?;
    sim.particles[0].r = [5.0, 5.0];
    sim.particles[0].v = [-3.0, -4.0];

    sim.step();

    // After moving to (2, 1) the particle is within its radius of both the
    // x=0 and y=0 walls and moving toward each.
    assert_eq!(sim.particles[0].r, [2.0, 1.0]);
    assert_eq!(sim.particles[0].v, [3.0, 4.0]);
    Ok(())
}

/// A wall contact flips only the axis perpendicular to the wall.
#[test]
fn wall_hit_flips_one_axis() -> Result<()> {
    let mut sim = small_sim(1)?;
    sim.particles[0].r = [592.0, 300.0];
    sim.particles[0].v = [4.0, 1.5];

    sim.step();

    // At (596, 301.5) the particle is within its radius of the x=600 wall.
    assert_eq!(sim.particles[0].v, [-4.0, 1.5]);
    assert_eq!(sim.particles[0].r, [596.0, 301.5]);
    Ok(())
}

/// The pairwise phase resolves an approaching pair with the elastic impulse,
/// evaluated at the post-integration positions.
#[test]
fn approaching_pair_collides_during_step() -> Result<()> {
    let mut sim = small_sim(2)?;
    // Chosen so the particles land on (301, 302) and (305, 306) after the
    // integration phase, where they overlap and close at dot = -36.
    sim.particles[0].r = [298.0, 298.0];
    sim.particles[0].v = [3.0, 4.0];
    sim.particles[1].r = [306.0, 307.0];
    sim.particles[1].v = [-1.0, -1.0];
    let momentum_before = sim.momentum();

    sim.step();

    let tol = 1e-12;
    let va = sim.particles[0].v;
    let vb = sim.particles[1].v;
    assert!((va[AXIS_X] + 1.5).abs() < tol && (va[AXIS_Y] + 0.5).abs() < tol, "va = {va:?}");
    assert!((vb[AXIS_X] - 3.5).abs() < tol && (vb[AXIS_Y] - 3.5).abs() < tol, "vb = {vb:?}");

    // No wall was touched, so the collision left total momentum intact.
    let momentum_after = sim.momentum();
    for k in 0..2 {
        assert!((momentum_after[k] - momentum_before[k]).abs() < tol);
    }

    // The histogram refresh ran after the collision: speeds ~1.58 and ~4.95
    // fall in bucket 3 and the overflow bucket of an 8 x 0.5 table.
    let hist = sim.histogram(0).expect("species 0 histogram");
    assert_eq!(hist.frequencies()[3], 1);
    assert_eq!(hist.frequencies()[7], 1);
    assert_eq!(hist.total(), 2);
    Ok(())
}

/// A separating pair inside each other's radius must not re-collide.
#[test]
fn receding_overlap_is_left_alone() -> Result<()> {
    let mut sim = small_sim(2)?;
    sim.particles[0].r = [300.0, 300.0];
    sim.particles[0].v = [-1.0, 0.0];
    sim.particles[1].r = [305.0, 300.0];
    sim.particles[1].v = [1.0, 0.0];

    sim.step();

    assert_eq!(sim.particles[0].v, [-1.0, 0.0]);
    assert_eq!(sim.particles[1].v, [1.0, 0.0]);
    Ok(())
}

/// Identical seeds give identical trajectories, step after step.
#[test]
fn seeded_runs_are_reproducible() -> Result<()> {
    let config = SimulationConfig {
        seed: Some(4242),
        ..SimulationConfig::default()
    };
    let mut a = Simulation::new(&config)?;
    let mut b = Simulation::new(&config)?;

    for _ in 0..50 {
        a.step();
        b.step();
    }
    for (pa, pb) in a.particles.iter().zip(&b.particles) {
        assert_eq!(pa.r, pb.r);
        assert_eq!(pa.v, pb.v);
    }
    Ok(())
}
