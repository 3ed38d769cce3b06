use bevy::math::DVec2;

use crate::config::SimParams;
use crate::registry::{Body, Registry};

/// Which positions a registry's cross-galaxy force terms see while the
/// registries are advanced one after another within a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouplingOrder {
    /// Registries advance in index order; a later registry's sweep sees the
    /// earlier registries' already-updated positions. Matches the reference
    /// trajectories and is the default.
    Sequential,
    /// Every force term reads a common pre-step snapshot of all registries.
    Snapshot,
}

/// Gravitational force exerted on `a` by `b`, softened by adding `epsilon`
/// to the separation before squaring. Coincident bodies exert no force on
/// each other; the singularity is absorbed, not an error.
pub fn force(a: &Body, b: &Body, g: f64, epsilon: f64) -> DVec2 {
    let delta = b.position - a.position;
    let r = delta.length();
    if r == 0.0 {
        return DVec2::ZERO;
    }
    let magnitude = g * a.mass * b.mass / ((r + epsilon) * (r + epsilon));
    delta / r * magnitude
}

/// Net force on `body` from every body in `others` except the one at
/// `skip` (the body's own index, or `None` for a foreign registry).
fn net_force(body: &Body, others: &[Body], skip: Option<usize>, g: f64, epsilon: f64) -> DVec2 {
    others
        .iter()
        .enumerate()
        .filter(|(j, _)| Some(*j) != skip)
        .map(|(_, other)| force(body, other, g, epsilon))
        .sum()
}

/// Advances one registry by `dt` against a set of foreign registries.
/// Forces for the whole registry are accumulated from its start-of-step
/// positions before any body is touched, then each body gets the
/// semi-implicit Euler update: velocity first, position from the new
/// velocity.
fn step_registry(registry: &mut Registry, foreign: &[&Registry], params: &SimParams) {
    let SimParams { g, epsilon, dt, .. } = *params;

    let forces: Vec<DVec2> = registry
        .bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let mut total = net_force(body, &registry.bodies, Some(i), g, epsilon);
            for other in foreign {
                total += net_force(body, &other.bodies, None, g, epsilon);
            }
            total
        })
        .collect();

    for (body, f) in registry.bodies.iter_mut().zip(&forces) {
        body.velocity += *f / body.mass * dt;
        body.position += body.velocity * dt;
    }
}

/// Advances all registries by one fixed step of `params.dt`.
pub fn step(registries: &mut [Registry], params: &SimParams, order: CouplingOrder) {
    match order {
        CouplingOrder::Sequential => {
            for i in 0..registries.len() {
                let (before, rest) = registries.split_at_mut(i);
                if let Some((current, after)) = rest.split_first_mut() {
                    let foreign: Vec<&Registry> =
                        before.iter().chain(after.iter()).collect();
                    step_registry(current, &foreign, params);
                }
            }
        }
        CouplingOrder::Snapshot => {
            let snapshot: Vec<Registry> = registries.to_vec();
            for (i, registry) in registries.iter_mut().enumerate() {
                let foreign: Vec<&Registry> = snapshot
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, r)| r)
                    .collect();
                // Own-registry forces still read the live (pre-step) bodies;
                // only the cross terms switch to the snapshot.
                step_registry(registry, &foreign, params);
            }
        }
    }
}
