//! The particle store: record layout, ping-pong buffers and seeding.
//!
//! Records live in one contiguous block per buffer, in the exact layout
//! the rendering side consumes, so a compute backend could bind either
//! buffer as-is.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::params::SphParams;

/// A single particle record.
///
/// `#[repr(C)]`, plain floats, 24 bytes: the storage-buffer layout
/// shared between simulation and presentation. Pressure is derived from
/// `density` each frame and never persisted.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleRecord {
    /// Position in the simulation domain.
    pub position: [f32; 2],
    /// Velocity, bounded by the configured maximum speed.
    pub velocity: [f32; 2],
    /// Local density, recomputed every frame; stale in between.
    pub density: f32,
    /// Keeps the record stride a multiple of the vec2 alignment.
    pub _padding: f32,
}

impl ParticleRecord {
    /// A record at rest at the given position, density not yet estimated.
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position: position.to_array(),
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::from(self.velocity)
    }
}

/// Initial-placement policy for the particle store.
#[derive(Clone, Copy, Debug)]
pub enum Seeding {
    /// Deterministic placement from a fixed seed.
    Fixed(u64),
    /// Fresh entropy from the operating system on every run.
    Entropy,
}

/// Seeds `particle_count` records uniformly over the domain, at rest.
pub fn seed_particles(params: &SphParams, seeding: Seeding) -> Vec<ParticleRecord> {
    let mut rng = match seeding {
        Seeding::Fixed(seed) => StdRng::seed_from_u64(seed),
        Seeding::Entropy => StdRng::from_os_rng(),
    };

    (0..params.particle_count)
        .map(|_| {
            let x = rng.random_range(0.0..params.domain.x);
            let y = rng.random_range(0.0..params.domain.y);
            ParticleRecord::at_rest(Vec2::new(x, y))
        })
        .collect()
}

/// Double-buffered particle storage.
///
/// Every pass reads `front` immutably and writes `back`, one lane per
/// record; [`ParticleStore::swap`] then publishes the pass. A lane can
/// therefore never observe another lane's write from the same pass.
pub struct ParticleStore {
    front: Vec<ParticleRecord>,
    back: Vec<ParticleRecord>,
}

impl ParticleStore {
    pub fn new(records: Vec<ParticleRecord>) -> Self {
        let back = records.clone();
        Self { front: records, back }
    }

    /// Number of particles; fixed for the store's lifetime.
    pub fn len(&self) -> usize {
        self.front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// The settled state of the last completed pass.
    pub fn records(&self) -> &[ParticleRecord] {
        &self.front
    }

    /// Views for one pass: the immutable snapshot every lane reads and
    /// the back buffer the pass writes into.
    pub fn split(&mut self) -> (&[ParticleRecord], &mut [ParticleRecord]) {
        (&self.front, &mut self.back)
    }

    /// Publishes the back buffer as the new settled state.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Replaces the contents of both buffers.
    pub fn reset(&mut self, records: Vec<ParticleRecord>) {
        self.back = records.clone();
        self.front = records;
    }
}
