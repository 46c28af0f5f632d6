//! Ripple - 2D SPH fluid simulation for Bevy
//!
//! This library simulates a fluid as a fixed set of particles using
//! Smoothed Particle Hydrodynamics, stepped in two strictly separated
//! data-parallel passes per frame and rendered as one point per
//! particle.
//!
//! # Features
//!
//! - **Classic SPH**: poly6 density estimation, symmetrized pressure
//!   forces, Laplacian viscosity, a linear equation of state
//! - **Two-phase stepping**: density pass, barrier, force pass over a
//!   double-buffered particle store; results are independent of lane
//!   scheduling
//! - **Bounded dynamics**: exact speed clamping and damped wall
//!   reflection keep every particle inside the domain
//! - **Pluggable seeding**: deterministic fixed-seed or entropy-based
//!   initial placement
//! - **Point rendering**: one circle per particle, optionally tinted by
//!   speed
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use ripple::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SphPlugin::with_params(
//!             SphParams::default().with_particle_count(512),
//!         ))
//!         .run();
//! }
//! ```

pub mod fluid;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::fluid::prelude::*;
}
