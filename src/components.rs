use bevy::prelude::*;

/// Ties a display entity to one body slot in one registry.
#[derive(Component, Clone, Copy)]
pub struct BodyRef {
    pub galaxy: usize,
    pub index: usize,
}

/// Draggable marker showing a galaxy's configured center. Moving it only
/// changes where the next regeneration places that galaxy.
#[derive(Component, Clone, Copy)]
pub struct CenterMarker(pub usize);
