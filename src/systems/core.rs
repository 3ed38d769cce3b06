use bevy::input::mouse::MouseWheel;
use bevy::math::DVec2;
use bevy::prelude::MessageReader;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::input::EguiWantsInput;

use crate::components::*;
use crate::config::{COMPRESS_FACTOR, SPREAD_FACTOR, SimConfig};
use crate::diagnostics::{self, DiagnosticsReadout};
use crate::physics;
use crate::registry::{self, MASS_PALETTE};
use crate::resources::*;

/// Creates the camera and body assets, then generates and displays the
/// initial galaxies.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<SimConfig>,
    mut galaxies: ResMut<Galaxies>,
) {
    commands.spawn(Camera2d);

    let assets = BodyAssets {
        mesh: meshes.add(Circle::new(BODY_RADIUS)),
        palette: MASS_PALETTE
            .iter()
            .map(|&(r, g, b)| materials.add(ColorMaterial::from(Color::srgb_u8(r, g, b))))
            .collect(),
    };

    galaxies.0 = registry::generate_all(&config);
    spawn_body_entities(&mut commands, &assets, &galaxies);

    let marker_mesh = meshes.add(Circle::new(CENTER_GRAB_RADIUS as f32));
    for (i, center) in config.centers.iter().enumerate() {
        let color = if i == 0 {
            Color::WHITE
        } else {
            Color::srgb(1.0, 1.0, 0.0)
        };
        commands.spawn((
            Mesh2d(marker_mesh.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from(color))),
            Transform::from_translation(center.as_vec2().extend(1.0)),
            CenterMarker(i),
        ));
    }

    commands.insert_resource(assets);
}

/// Spawns one display entity per registry body, colored by mass class.
pub fn spawn_body_entities(commands: &mut Commands, assets: &BodyAssets, galaxies: &Galaxies) {
    for (galaxy, registry) in galaxies.0.iter().enumerate() {
        for (index, body) in registry.bodies.iter().enumerate() {
            commands.spawn((
                Mesh2d(assets.mesh.clone()),
                MeshMaterial2d(assets.palette[body.mass_class()].clone()),
                Transform::from_translation(body.position.as_vec2().extend(0.0)),
                BodyRef { galaxy, index },
            ));
        }
    }
}

/// Applies one structural edit to the configuration. Returns the new
/// configuration and whether the edit also resumes a paused simulation.
pub fn apply_edit(config: &SimConfig, command: &SimCommand) -> (SimConfig, bool) {
    match command {
        SimCommand::Restart => (config.clone(), true),
        SimCommand::Compress => (config.scale_rings(COMPRESS_FACTOR), false),
        SimCommand::Spread => (config.scale_rings(SPREAD_FACTOR), false),
        SimCommand::RingDelta { ring, delta } => (config.adjust_ring_count(*ring, *delta), false),
        SimCommand::ApplyParameters(params) => (config.apply_params(*params), true),
    }
}

/// Drains queued edits, folds them into the configuration, and regenerates
/// every registry from scratch. Runs before the integrator each tick, so a
/// step only ever sees the old registries or the new ones, never a mix.
pub fn apply_pending_edits(
    mut edits: ResMut<PendingEdits>,
    mut config: ResMut<SimConfig>,
    mut galaxies: ResMut<Galaxies>,
    mut control: ResMut<SimControl>,
    mut respawn: ResMut<RespawnBodies>,
) {
    if edits.commands.is_empty() {
        return;
    }

    for command in edits.commands.drain(..) {
        let (next, unpause) = apply_edit(&config, &command);
        *config = next;
        if unpause {
            control.paused = false;
        }
    }

    galaxies.0 = registry::generate_all(&config);
    respawn.pending = true;
    info!(
        "regenerated {} galaxies, {} satellites",
        galaxies.0.len(),
        galaxies.satellite_count()
    );
}

/// Advances the physics by one fixed step unless paused.
pub fn step_simulation(
    mut galaxies: ResMut<Galaxies>,
    config: Res<SimConfig>,
    control: Res<SimControl>,
) {
    if control.paused {
        return;
    }
    physics::step(&mut galaxies.0, &config.params, control.coupling);
}

/// Recomputes the conserved-quantity readout from the current registries.
/// Angular momentum is taken about the mean of the configured centers.
pub fn update_diagnostics(
    galaxies: Res<Galaxies>,
    config: Res<SimConfig>,
    mut readout: ResMut<DiagnosticsReadout>,
) {
    let center = if config.centers.is_empty() {
        DVec2::ZERO
    } else {
        config.centers.iter().sum::<DVec2>() / config.centers.len() as f64
    };

    readout.angular_momentum = diagnostics::angular_momentum(&galaxies.0, center);
    readout.kinetic_energy = diagnostics::kinetic_energy(&galaxies.0);
    readout.potential_energy =
        diagnostics::potential_energy(&galaxies.0, config.params.g, config.params.epsilon);
    readout.satellites = galaxies.satellite_count();
}

/// Rebuilds the body entities after a regeneration.
pub fn respawn_body_entities(
    mut commands: Commands,
    mut respawn: ResMut<RespawnBodies>,
    galaxies: Res<Galaxies>,
    assets: Res<BodyAssets>,
    query: Query<Entity, With<BodyRef>>,
) {
    if !respawn.pending {
        return;
    }
    respawn.pending = false;

    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
    spawn_body_entities(&mut commands, &assets, &galaxies);
}

/// Copies registry positions into display transforms. Entities whose slot
/// no longer exists (mid-respawn) are left alone until the rebuild lands.
pub fn sync_body_transforms(
    galaxies: Res<Galaxies>,
    mut query: Query<(&BodyRef, &mut Transform)>,
) {
    for (body_ref, mut transform) in query.iter_mut() {
        if let Some(body) = galaxies
            .0
            .get(body_ref.galaxy)
            .and_then(|registry| registry.bodies.get(body_ref.index))
        {
            transform.translation = body.position.as_vec2().extend(0.0);
        }
    }
}

/// Keeps each center marker on its configured (possibly dragged) center.
pub fn sync_center_markers(
    config: Res<SimConfig>,
    mut query: Query<(&CenterMarker, &mut Transform, &mut Visibility)>,
) {
    for (marker, mut transform, mut visibility) in query.iter_mut() {
        match config.centers.get(marker.0) {
            Some(center) => {
                *visibility = Visibility::Inherited;
                transform.translation = center.as_vec2().extend(1.0);
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Left-drag on a center marker moves that galaxy's configured center.
/// Live bodies keep orbiting the old spot; only the next regeneration uses
/// the new position.
pub fn drag_centers(
    mouse: Res<ButtonInput<MouseButton>>,
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut config: ResMut<SimConfig>,
    mut drag: ResMut<CenterDrag>,
    egui_input: Res<EguiWantsInput>,
) {
    if egui_input.wants_any_pointer_input() {
        return;
    }

    let cursor = window
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .and_then(|viewport_pos| {
            let (camera, camera_transform) = camera.single().ok()?;
            camera
                .viewport_to_world_2d(camera_transform, viewport_pos)
                .ok()
        })
        .map(|world| world.as_dvec2());

    let Some(cursor) = cursor else {
        drag.active = None;
        return;
    };

    if mouse.just_pressed(MouseButton::Left) {
        drag.active = config
            .centers
            .iter()
            .position(|center| (*center - cursor).length() < CENTER_GRAB_RADIUS)
            .map(|galaxy| (galaxy, config.centers[galaxy] - cursor));
    }

    if mouse.pressed(MouseButton::Left) {
        if let Some((galaxy, offset)) = drag.active {
            let next = config.move_center(galaxy, cursor + offset);
            *config = next;
        }
    } else {
        drag.active = None;
    }
}

/// `P` toggles pause, `R` resumes.
pub fn pause_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut control: ResMut<SimControl>) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        control.paused = !control.paused;
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        control.paused = false;
    }
}

/// Keyboard pan and wheel/keyboard zoom, blocked while the UI has focus.
pub fn camera_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut query: Query<&mut Transform, With<Camera>>,
    time: Res<Time>,
    egui_input: Res<EguiWantsInput>,
) {
    if egui_input.wants_any_pointer_input() {
        return;
    }

    if let Ok(mut transform) = query.single_mut() {
        let mut scale = transform.scale.x;

        let mut direction = Vec3::ZERO;
        if keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA) {
            direction.x -= 1.0;
        }
        if keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD) {
            direction.x += 1.0;
        }
        if keyboard.pressed(KeyCode::ArrowUp) || keyboard.pressed(KeyCode::KeyW) {
            direction.y += 1.0;
        }
        if keyboard.pressed(KeyCode::ArrowDown) || keyboard.pressed(KeyCode::KeyS) {
            direction.y -= 1.0;
        }
        if direction.length_squared() > 0.0 {
            transform.translation += direction.normalize() * 500.0 * scale * time.delta_secs();
        }

        for event in mouse_wheel.read() {
            if event.y > 0.0 {
                scale /= 1.1;
            } else if event.y < 0.0 {
                scale *= 1.1;
            }
        }

        let zoom_speed = 1.0 * time.delta_secs();
        if keyboard.pressed(KeyCode::KeyZ) {
            scale *= 1.0 - zoom_speed;
        }
        if keyboard.pressed(KeyCode::KeyX) {
            scale *= 1.0 + zoom_speed;
        }

        transform.scale = Vec3::splat(scale.clamp(0.1, 10.0));
    }
}
