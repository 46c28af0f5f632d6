//! Bevy plugin wiring for the fluid simulation.

use bevy::prelude::*;

use super::dispatch::group_count;
use super::params::SphParams;
use super::particle::Seeding;
use super::render::{spawn_particle_visuals, sync_particle_visuals, FluidRenderConfig};
use super::simulation::FluidSimulation;

/// Adds the SPH simulation and its point rendering to an app.
///
/// An invalid configuration is fatal: the plugin aborts with a
/// diagnostic during startup rather than running a simulation the
/// kernels cannot handle.
pub struct SphPlugin {
    pub params: SphParams,
    pub seeding: Seeding,
}

impl Default for SphPlugin {
    fn default() -> Self {
        Self {
            params: SphParams::default(),
            seeding: Seeding::Fixed(0),
        }
    }
}

impl SphPlugin {
    /// Uses the given parameters with the default seeding policy.
    pub fn with_params(params: SphParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Selects the initial-placement policy.
    pub fn seeded(mut self, seeding: Seeding) -> Self {
        self.seeding = seeding;
        self
    }
}

/// Runtime control over the simulation loop.
#[derive(Resource, Default)]
pub struct SimControl {
    /// While set, the scheduler skips frames until unpaused.
    pub paused: bool,
    step_requested: bool,
}

impl SimControl {
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Requests a single step while paused.
    pub fn request_step(&mut self) {
        self.step_requested = true;
    }

    fn take_step_request(&mut self) -> bool {
        std::mem::take(&mut self.step_requested)
    }
}

impl Plugin for SphPlugin {
    fn build(&self, app: &mut App) {
        if let Err(message) = self.params.validate() {
            panic!("invalid simulation parameters: {message}");
        }

        let simulation = FluidSimulation::new(&self.params, self.seeding);
        info!(
            "seeded {} particles over {}x{}, {} groups of {} lanes ({:?})",
            simulation.particle_count(),
            self.params.domain.x,
            self.params.domain.y,
            group_count(self.params.particle_count, self.params.group_size),
            self.params.group_size,
            self.seeding,
        );

        app.register_type::<SphParams>()
            .register_type::<FluidRenderConfig>()
            .insert_resource(self.params.clone())
            .insert_resource(simulation)
            .init_resource::<FluidRenderConfig>()
            .init_resource::<SimControl>();

        app.add_systems(Startup, spawn_particle_visuals);
        // Presentation strictly follows the completed frame
        app.add_systems(Update, (step_simulation, sync_particle_visuals).chain());
    }
}

/// Frame scheduler entry point: advances the simulation unless paused.
fn step_simulation(
    params: Res<SphParams>,
    mut control: ResMut<SimControl>,
    mut simulation: ResMut<FluidSimulation>,
) {
    if control.paused && !control.take_step_request() {
        return;
    }
    simulation.step(&params);
}
