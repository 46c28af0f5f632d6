//! The two-pass simulation pipeline.
//!
//! Each step runs two strictly ordered passes over the particle store.
//! Pass 1 estimates every particle's density from the settled position
//! snapshot; pass 2 derives pressure and viscosity forces from those
//! fresh densities, integrates, and resolves wall collisions. A pass
//! owns the fields it writes (density in pass 1, velocity and position
//! in pass 2) and reads only the snapshot published by the previous
//! swap, so no lane can see another lane's same-pass write.

use bevy::prelude::*;

use super::dispatch::dispatch;
use super::kernel::SphKernels;
use super::params::{SphParams, SphUniform};
use super::particle::{seed_particles, ParticleRecord, ParticleStore, Seeding};
use super::spatial::neighbors;

/// Pairs closer than this have no usable force direction; their pair
/// contributions are skipped for the frame.
const MIN_SEPARATION: f32 = 1e-6;

/// The fluid simulation: the particle store plus the frame scheduler
/// that drives the two passes.
#[derive(Resource)]
pub struct FluidSimulation {
    store: ParticleStore,
    frame: u64,
}

impl FluidSimulation {
    /// Creates a simulation seeded per the placement policy.
    pub fn new(params: &SphParams, seeding: Seeding) -> Self {
        Self::from_records(seed_particles(params, seeding))
    }

    /// Creates a simulation from explicit initial records.
    pub fn from_records(records: Vec<ParticleRecord>) -> Self {
        Self {
            store: ParticleStore::new(records),
            frame: 0,
        }
    }

    /// Re-seeds the store in place; the particle count stays fixed.
    pub fn reseed(&mut self, params: &SphParams, seeding: Seeding) {
        self.store.reset(seed_particles(params, seeding));
        self.frame = 0;
    }

    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    /// Frames completed since creation or the last reseed.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The settled particle state. Valid for reading between steps;
    /// presentation consumes exactly this view.
    pub fn particles(&self) -> &[ParticleRecord] {
        self.store.records()
    }

    /// Mean density over the store, for diagnostics.
    pub fn average_density(&self) -> f32 {
        let records = self.store.records();
        if records.is_empty() {
            return 0.0;
        }
        records.iter().map(|r| r.density).sum::<f32>() / records.len() as f32
    }

    /// Advances one rendered frame: `steps_per_frame` full two-pass steps.
    pub fn step(&mut self, params: &SphParams) {
        let uniform = SphUniform::from_params(params);
        for _ in 0..params.steps_per_frame {
            self.run_passes(&uniform, params.group_size);
        }
        self.frame += 1;
    }

    fn run_passes(&mut self, uniform: &SphUniform, group_size: usize) {
        if self.store.is_empty() {
            return;
        }

        // Pass 1: densities from the settled position snapshot. The
        // dispatch returns only once every write has landed; the swap
        // then publishes them for pass 2.
        let (front, back) = self.store.split();
        dispatch(front, back, group_size, |i, snapshot| {
            estimate_density(i, snapshot, uniform)
        });
        self.store.swap();

        // Pass 2: forces from the fresh densities, integration, walls.
        let (front, back) = self.store.split();
        dispatch(front, back, group_size, |i, snapshot| {
            integrate_forces(i, snapshot, uniform)
        });
        self.store.swap();
    }
}

/// Density Estimator: accumulates poly6-weighted mass over every
/// particle within the smoothing radius, the lane's own included, so an
/// isolated particle keeps its well-defined self-contribution.
pub(crate) fn estimate_density(
    i: usize,
    snapshot: &[ParticleRecord],
    u: &SphUniform,
) -> ParticleRecord {
    let record = snapshot[i];
    let center = record.position();

    let mut density = 0.0;
    for neighbor in neighbors(snapshot, center, u.smoothing_radius) {
        density += u.particle_mass
            * SphKernels::poly6_with_coeff(neighbor.dist_sq, u.smoothing_radius, u.poly6_coeff);
    }

    ParticleRecord { density, ..record }
}

/// Symmetrized pressure force a neighbor with `pressure_j` exerts on a
/// particle with `pressure_i`, for `offset` running from the neighbor to
/// the particle. Antisymmetric in the offset, so the paired `i → j` and
/// `j → i` contributions cancel when the densities match.
pub(crate) fn pressure_pair_force(
    pressure_i: f32,
    pressure_j: f32,
    density_j: f32,
    offset: Vec2,
    u: &SphUniform,
) -> Vec2 {
    let gradient =
        SphKernels::spiky_gradient_with_coeff(offset, u.smoothing_radius, u.spiky_grad_coeff);
    gradient * (-u.particle_mass * (pressure_i + pressure_j) / (2.0 * density_j))
}

/// Force & Integrator: pressure and viscosity forces from the fresh
/// densities, gravity, semi-implicit Euler integration, the speed clamp
/// and wall resolution.
pub(crate) fn integrate_forces(
    i: usize,
    snapshot: &[ParticleRecord],
    u: &SphUniform,
) -> ParticleRecord {
    let record = snapshot[i];
    let position = record.position();
    let velocity = record.velocity();
    let pressure_i = u.pressure(record.density);

    let mut pressure_force = Vec2::ZERO;
    let mut viscosity_force = Vec2::ZERO;

    for neighbor in neighbors(snapshot, position, u.smoothing_radius) {
        if neighbor.index == i || neighbor.dist_sq < MIN_SEPARATION * MIN_SEPARATION {
            continue;
        }

        let other = &snapshot[neighbor.index];
        let density_j = other.density.max(u.density_floor);
        let pressure_j = u.pressure(other.density);

        pressure_force += pressure_pair_force(pressure_i, pressure_j, density_j, neighbor.offset, u);

        let laplacian = SphKernels::viscosity_laplacian_with_coeff(
            neighbor.dist_sq.sqrt(),
            u.smoothing_radius,
            u.visc_lap_coeff,
        );
        viscosity_force +=
            (other.velocity() - velocity) * (u.viscosity * u.particle_mass / density_j * laplacian);
    }

    // Gravity enters as a force density, so the division below hands the
    // plain acceleration back regardless of how compressed the lane is.
    let external_force = Vec2::from(u.gravity) * record.density;

    let density_i = record.density.max(u.density_floor);
    let acceleration = (pressure_force + viscosity_force + external_force) / density_i;

    // Semi-implicit Euler: velocity first, position from the new velocity
    let mut velocity = clamp_speed(velocity + acceleration * u.time_step, u.max_speed);
    let mut position = position + velocity * u.time_step;
    resolve_walls(&mut position, &mut velocity, u);

    ParticleRecord {
        position: position.to_array(),
        velocity: velocity.to_array(),
        ..record
    }
}

/// Clamps a velocity to `max_speed`, preserving its direction.
fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Per-axis wall resolution: clamp back into `[0, extent)` and reflect
/// the velocity component, scaled by the damping factor.
fn resolve_walls(position: &mut Vec2, velocity: &mut Vec2, u: &SphUniform) {
    let domain = Vec2::from(u.domain);

    if position.x < 0.0 {
        position.x = 0.0;
        velocity.x = -velocity.x * u.damping;
    } else if position.x >= domain.x {
        position.x = domain.x.next_down();
        velocity.x = -velocity.x * u.damping;
    }

    if position.y < 0.0 {
        position.y = 0.0;
        velocity.y = -velocity.y * u.damping;
    } else if position.y >= domain.y {
        position.y = domain.y.next_down();
        velocity.y = -velocity.y * u.damping;
    }
}
