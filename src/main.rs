mod components;
mod config;
mod diagnostics;
mod physics;
mod registry;
mod resources;
mod systems;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

use crate::config::SimConfig;
use crate::diagnostics::DiagnosticsReadout;
use crate::resources::{
    CenterDrag, Galaxies, PendingEdits, RespawnBodies, SimControl, TICK_HZ,
};
use crate::systems::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Galaxy Simulation".into(),
                resolution: WindowResolution::new(1000, 1000),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<SimConfig>()
        .init_resource::<Galaxies>()
        .init_resource::<SimControl>()
        .init_resource::<PendingEdits>()
        .init_resource::<RespawnBodies>()
        .init_resource::<CenterDrag>()
        .init_resource::<DiagnosticsReadout>()
        .add_systems(EguiPrimaryContextPass, ui_controls)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                respawn_body_entities,
                sync_body_transforms,
                sync_center_markers,
                drag_centers,
                pause_shortcuts,
                camera_controls,
            )
                .chain(),
        )
        .add_systems(
            FixedUpdate,
            (apply_pending_edits, step_simulation, update_diagnostics).chain(),
        )
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .run();
}
