use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_egui::egui;

use crate::config::{SimConfig, SimParams};
use crate::diagnostics::DiagnosticsReadout;
use crate::physics::CouplingOrder;
use crate::resources::{PendingEdits, SimCommand, SimControl};

pub fn ui_controls(
    mut contexts: EguiContexts,
    config: Res<SimConfig>,
    mut control: ResMut<SimControl>,
    mut edits: ResMut<PendingEdits>,
    readout: Res<DiagnosticsReadout>,
    mut draft: Local<Option<SimParams>>,
    mut frames_rendered: Local<usize>,
) {
    if *frames_rendered < 5 {
        *frames_rendered += 1;
        return;
    }

    let draft = draft.get_or_insert(config.params);

    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Window::new("Galaxy Controls")
            .default_pos(egui::pos2(10.0, 10.0))
            .max_size([340.0, 640.0])
            .vscroll(true)
            .show(ctx, |ui| {
                ui.heading("Settings");
                egui::Grid::new("params").num_columns(2).show(ui, |ui| {
                    ui.label("G");
                    ui.add(egui::DragValue::new(&mut draft.g).speed(0.05).range(0.0..=100.0));
                    ui.end_row();
                    ui.label("Center mass");
                    ui.add(
                        egui::DragValue::new(&mut draft.central_mass)
                            .speed(100.0)
                            .range(0.0..=1_000_000.0),
                    );
                    ui.end_row();
                    ui.label("Speed mult");
                    ui.add(
                        egui::DragValue::new(&mut draft.speed_multiplier)
                            .speed(0.05)
                            .range(0.0..=10.0),
                    );
                    ui.end_row();
                    ui.label("dt");
                    ui.add(egui::DragValue::new(&mut draft.dt).speed(0.01).range(0.001..=5.0));
                    ui.end_row();
                    ui.label("Epsilon");
                    ui.add(egui::DragValue::new(&mut draft.epsilon).speed(1.0).range(0.0..=500.0));
                    ui.end_row();
                    ui.label("Ring factor");
                    ui.add(
                        egui::DragValue::new(&mut draft.ring_factor)
                            .speed(0.1)
                            .range(0.1..=20.0),
                    );
                    ui.end_row();
                    ui.label("Bodies per ring");
                    ui.add(egui::DragValue::new(&mut draft.bodies_per_ring).range(0..=200));
                    ui.end_row();
                    ui.label("Galaxy distance");
                    ui.add(
                        egui::DragValue::new(&mut draft.galaxy_distance)
                            .speed(5.0)
                            .range(0.0..=2000.0),
                    );
                    ui.end_row();
                });
                ui.checkbox(&mut draft.two_galaxies, "Two galaxies");
                if ui.button("Apply Settings").clicked() {
                    edits.commands.push(SimCommand::ApplyParameters(*draft));
                }

                ui.separator();
                ui.heading("Controls");
                ui.horizontal(|ui| {
                    let pause_label = if control.paused { "Resume" } else { "Pause" };
                    if ui.button(pause_label).clicked() {
                        control.paused = !control.paused;
                    }
                    if ui.button("Restart").clicked() {
                        edits.commands.push(SimCommand::Restart);
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("Compress Rings").clicked() {
                        edits.commands.push(SimCommand::Compress);
                    }
                    if ui.button("Spread Rings").clicked() {
                        edits.commands.push(SimCommand::Spread);
                    }
                });
                egui::ComboBox::from_label("Coupling order")
                    .selected_text(match control.coupling {
                        CouplingOrder::Sequential => "Sequential",
                        CouplingOrder::Snapshot => "Snapshot",
                    })
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut control.coupling,
                            CouplingOrder::Sequential,
                            "Sequential",
                        );
                        ui.selectable_value(
                            &mut control.coupling,
                            CouplingOrder::Snapshot,
                            "Snapshot",
                        );
                    });

                ui.separator();
                ui.heading("Rings");
                for (i, ring) in config.rings.iter().enumerate() {
                    ui.horizontal(|ui| {
                        if ui.small_button("+").clicked() {
                            edits.commands.push(SimCommand::RingDelta { ring: i, delta: 1 });
                        }
                        if ui.small_button("-").clicked() {
                            edits.commands.push(SimCommand::RingDelta { ring: i, delta: -1 });
                        }
                        ui.label(format!(
                            "ring {i}: {} bodies, r = {:.1}",
                            ring.count, ring.radius
                        ));
                    });
                }

                ui.separator();
                ui.heading("Diagnostics");
                ui.label(format!("Angular momentum: {:.0}", readout.angular_momentum));
                ui.label(format!(
                    "Total energy: {:.0}",
                    readout.kinetic_energy + readout.potential_energy
                ));
                ui.label(format!("Kinetic: {:.0}", readout.kinetic_energy));
                ui.label(format!("Potential: {:.0}", readout.potential_energy));
                ui.label(format!("Satellites: {}", readout.satellites));
                if control.paused {
                    ui.label("Paused (P toggles, R resumes)");
                }
            });
    }
}
