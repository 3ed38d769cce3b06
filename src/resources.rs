use bevy::math::DVec2;
use bevy::prelude::*;

use crate::config::SimParams;
use crate::physics::CouplingOrder;
use crate::registry::Registry;

/// Grab radius (world units) for dragging a galaxy-center marker.
pub const CENTER_GRAB_RADIUS: f64 = 8.0;
/// Display radius of a body circle.
pub const BODY_RADIUS: f32 = 3.0;
/// Physics ticks per second; each tick advances the simulation by `dt`.
pub const TICK_HZ: f64 = 60.0;

/// The live registries, one per galaxy. Replaced wholesale by the
/// reconfiguration system; the integrator never sees a partial rebuild.
#[derive(Resource, Default)]
pub struct Galaxies(pub Vec<Registry>);

impl Galaxies {
    pub fn satellite_count(&self) -> usize {
        self.0.iter().map(Registry::satellite_count).sum()
    }
}

/// Pause flag and the cross-galaxy coupling order the integrator runs with.
#[derive(Resource)]
pub struct SimControl {
    pub paused: bool,
    pub coupling: CouplingOrder,
}

impl Default for SimControl {
    fn default() -> Self {
        Self {
            paused: false,
            coupling: CouplingOrder::Sequential,
        }
    }
}

/// A discrete structural edit. Every variant replaces the registries
/// wholesale via regeneration; none of them mutates a live registry.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    Restart,
    Compress,
    Spread,
    RingDelta { ring: usize, delta: i32 },
    ApplyParameters(SimParams),
}

/// Commands queued by the UI, drained once per physics tick before the
/// integrator runs.
#[derive(Resource, Default)]
pub struct PendingEdits {
    pub commands: Vec<SimCommand>,
}

/// Set after any regeneration so the display layer rebuilds its body
/// entities to match the new registries.
#[derive(Resource, Default)]
pub struct RespawnBodies {
    pub pending: bool,
}

/// In-progress center drag: which galaxy, and the cursor-to-center offset
/// captured at grab time.
#[derive(Resource, Default)]
pub struct CenterDrag {
    pub active: Option<(usize, DVec2)>,
}

/// Shared circle mesh plus one material per mass class, created at startup.
#[derive(Resource)]
pub struct BodyAssets {
    pub mesh: Handle<Mesh>,
    pub palette: Vec<Handle<ColorMaterial>>,
}
