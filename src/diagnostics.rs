use bevy::math::DVec2;
use bevy::prelude::*;

use crate::registry::Registry;

/// The scalars the stats readout shows, recomputed every tick. Purely
/// derived from registry state; nothing feeds back into the integrator.
#[derive(Resource, Default, Clone, Copy)]
pub struct DiagnosticsReadout {
    pub angular_momentum: f64,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub satellites: usize,
}

/// Total angular momentum about `center`: `Σ m (rx·vy − ry·vx)`.
pub fn angular_momentum(registries: &[Registry], center: DVec2) -> f64 {
    registries
        .iter()
        .flat_map(|registry| &registry.bodies)
        .map(|body| {
            let r = body.position - center;
            body.mass * r.perp_dot(body.velocity)
        })
        .sum()
}

/// Total kinetic energy: `Σ ½ m |v|²`.
pub fn kinetic_energy(registries: &[Registry]) -> f64 {
    registries
        .iter()
        .flat_map(|registry| &registry.bodies)
        .map(|body| 0.5 * body.mass * body.velocity.length_squared())
        .sum()
}

/// Total potential energy over unique unordered pairs, within and across
/// registries: `Σ_{i<j} −G m_i m_j / (r + ε)`. The softened form matches
/// the force law exactly (`F = −dU/dr`); coincident pairs contribute zero.
pub fn potential_energy(registries: &[Registry], g: f64, epsilon: f64) -> f64 {
    let bodies: Vec<_> = registries
        .iter()
        .flat_map(|registry| &registry.bodies)
        .collect();

    let mut total = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r = (b.position - a.position).length();
            if r == 0.0 {
                continue;
            }
            total += -g * a.mass * b.mass / (r + epsilon);
        }
    }
    total
}
