//! 2D Smoothed Particle Hydrodynamics simulation for Bevy.
//!
//! A fixed population of particles interacts through a smoothing kernel:
//! densities are estimated from neighbors, an equation of state turns
//! density into pressure, and pressure, viscosity and gravity forces
//! drive the integration. Every step runs as two data-parallel passes
//! over a double-buffered particle store with a hard barrier in
//! between, so neighbor-dependent reads always see a settled snapshot.
//!
//! # Architecture
//!
//! - [`params`]: simulation parameters, validation, equation of state
//! - [`kernel`]: the 2D smoothing kernels
//! - [`particle`]: particle records, ping-pong storage, seeding
//! - [`spatial`]: neighbor enumeration (brute-force all-pairs scan)
//! - [`dispatch`]: grouped data-parallel pass execution
//! - [`simulation`]: the two pass kernels and the frame scheduler
//! - [`render`]: point presentation of the particle state
//! - [`plugin`]: Bevy plugin for easy integration
//!
//! # Example
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use ripple::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SphPlugin::default().seeded(Seeding::Entropy))
//!         .run();
//! }
//! ```

pub mod dispatch;
pub mod kernel;
pub mod params;
pub mod particle;
pub mod plugin;
pub mod render;
pub mod simulation;
pub mod spatial;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::dispatch::*;
    pub use super::kernel::*;
    pub use super::params::*;
    pub use super::particle::*;
    pub use super::plugin::*;
    pub use super::render::*;
    pub use super::simulation::*;
    pub use super::spatial::*;
}
