//! Ripple - SPH fluid simulation demo
//!
//! Rains 1024 particles into a 600×600 box and lets them splash under
//! gravity. Space pauses, S steps while paused, R re-seeds.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use ripple::prelude::*;

fn main() {
    let params = SphParams::default();
    let domain = params.domain;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ripple - SPH Fluid Simulation".to_string(),
                resolution: WindowResolution::new(domain.x as u32, domain.y as u32),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SphPlugin::with_params(params))
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (handle_input, update_overlay))
        .run();
}

/// Marker for the overlay text.
#[derive(Component)]
struct OverlayText;

/// Sets up the camera over the domain and the debug overlay.
fn setup_scene(mut commands: Commands, params: Res<SphParams>) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(params.domain.x * 0.5, params.domain.y * 0.5, 0.0),
    ));

    commands.spawn((
        Text::new("Ripple"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        OverlayText,
    ));
}

/// Keyboard control of the simulation loop.
fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    params: Res<SphParams>,
    mut control: ResMut<SimControl>,
    mut simulation: ResMut<FluidSimulation>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        control.toggle_pause();
    }

    if keyboard.just_pressed(KeyCode::KeyS) && control.paused {
        control.request_step();
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        simulation.reseed(&params, Seeding::Fixed(0));
    }
}

/// Refreshes the debug overlay.
fn update_overlay(
    control: Res<SimControl>,
    simulation: Res<FluidSimulation>,
    mut overlay: Query<&mut Text, With<OverlayText>>,
) {
    for mut text in overlay.iter_mut() {
        let status = if control.paused { "paused" } else { "running" };
        text.0 = format!(
            "Ripple ({status})\n\n\
             Space - pause/resume\n\
             S - step while paused\n\
             R - reset\n\n\
             particles: {}\n\
             frame: {}\n\
             mean density: {:.4}",
            simulation.particle_count(),
            simulation.frame(),
            simulation.average_density(),
        );
    }
}
