//! Presentation: one visual point per particle.
//!
//! Rendering is strictly read-only over the settled particle state and
//! runs after both simulation passes have completed for the frame.

use bevy::prelude::*;

use super::params::SphParams;
use super::simulation::FluidSimulation;

/// Configuration for particle presentation.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct FluidRenderConfig {
    /// Diameter of a rendered particle, in world units.
    pub point_size: f32,

    /// Base color used when speed coloring is off.
    pub base_color: Color,

    /// Tint each particle by its speed relative to the configured
    /// maximum: blue at rest, red at full speed.
    pub speed_coloring: bool,
}

impl Default for FluidRenderConfig {
    fn default() -> Self {
        Self {
            point_size: 20.0,
            base_color: Color::srgb(0.2, 0.5, 0.9),
            speed_coloring: true,
        }
    }
}

/// Index of the particle record a visual entity tracks.
#[derive(Component, Clone, Copy, Debug)]
pub struct ParticleVisual(pub usize);

/// Maps a speed to a display color: blue at rest, red at `max_speed`.
pub fn speed_to_color(velocity: Vec2, max_speed: f32) -> Color {
    let t = (velocity.length() / max_speed).clamp(0.0, 1.0);

    let slow = Color::srgb(0.2, 0.4, 0.9).to_linear();
    let fast = Color::srgb(0.9, 0.3, 0.2).to_linear();

    Color::linear_rgba(
        slow.red + (fast.red - slow.red) * t,
        slow.green + (fast.green - slow.green) * t,
        slow.blue + (fast.blue - slow.blue) * t,
        1.0,
    )
}

/// Spawns one circle per particle. Each visual owns its material so
/// speed coloring can tint particles independently.
pub fn spawn_particle_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<FluidRenderConfig>,
    simulation: Res<FluidSimulation>,
) {
    let mesh = meshes.add(Circle::new(config.point_size * 0.5));

    for (index, record) in simulation.particles().iter().enumerate() {
        let position = record.position();
        commands.spawn((
            ParticleVisual(index),
            Mesh2d(mesh.clone()),
            MeshMaterial2d(materials.add(config.base_color)),
            Transform::from_xyz(position.x, position.y, 0.0),
        ));
    }
}

/// Syncs visual transforms, and colors when enabled, from the settled
/// particle state.
pub fn sync_particle_visuals(
    simulation: Res<FluidSimulation>,
    params: Res<SphParams>,
    config: Res<FluidRenderConfig>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut visuals: Query<(&ParticleVisual, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
) {
    let records = simulation.particles();

    for (visual, mut transform, material) in visuals.iter_mut() {
        let Some(record) = records.get(visual.0) else {
            continue;
        };

        let position = record.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;

        if config.speed_coloring {
            if let Some(material) = materials.get_mut(&material.0) {
                material.color = speed_to_color(record.velocity(), params.max_speed);
            }
        }
    }
}
