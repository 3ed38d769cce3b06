use bevy::math::DVec2;
use bevy::prelude::*;

/// Tunable physics parameters, applied as a whole set on regeneration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub g: f64,
    pub epsilon: f64,
    pub dt: f64,
    pub central_mass: f64,
    pub speed_multiplier: f64,
    pub ring_factor: f64,
    pub bodies_per_ring: u32,
    pub galaxy_distance: f64,
    pub two_galaxies: bool,
}

// --- Simulation Defaults ---
/// Default gravitational constant.
pub const DEFAULT_G: f64 = 1.0;
/// Default softening length added to separation before squaring.
pub const DEFAULT_EPSILON: f64 = 50.0;
/// Default fixed timestep for physics.
pub const DEFAULT_DT: f64 = 0.5;
/// Default central (nucleus) mass.
pub const DEFAULT_CENTRAL_MASS: f64 = 10_000.0;
/// Default multiplier applied to every ring's tangential speed.
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;
/// Default scaling of the canonical ring radii.
pub const DEFAULT_RING_FACTOR: f64 = 3.0;
/// Default number of bodies per ring.
pub const DEFAULT_BODIES_PER_RING: u32 = 20;
/// Default distance between the two galaxy centers.
pub const DEFAULT_GALAXY_DISTANCE: f64 = 200.0;

/// Canonical (radius, tangential speed) table the ring set is built from.
/// Radii are scaled by the ring factor, speeds by the speed multiplier.
pub const RING_TABLE: [(f64, f64); 10] = [
    (10.0, 10.0),
    (20.0, 8.2),
    (30.0, 7.1),
    (40.0, 6.3),
    (50.0, 5.8),
    (60.0, 5.2),
    (70.0, 4.6),
    (80.0, 4.0),
    (90.0, 3.5),
    (100.0, 3.0),
];

/// Radius scaling applied by the Compress edit.
pub const COMPRESS_FACTOR: f64 = 0.9;
/// Radius scaling applied by the Spread edit.
pub const SPREAD_FACTOR: f64 = 1.1;

impl Default for SimParams {
    fn default() -> Self {
        Self {
            g: DEFAULT_G,
            epsilon: DEFAULT_EPSILON,
            dt: DEFAULT_DT,
            central_mass: DEFAULT_CENTRAL_MASS,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            ring_factor: DEFAULT_RING_FACTOR,
            bodies_per_ring: DEFAULT_BODIES_PER_RING,
            galaxy_distance: DEFAULT_GALAXY_DISTANCE,
            two_galaxies: true,
        }
    }
}

/// One circular layer of bodies sharing an initial radius and speed.
#[derive(Clone, Copy, PartialEq)]
pub struct Ring {
    pub count: u32,
    pub radius: f64,
    pub orbital_speed: f64,
}

/// Full structural configuration: parameters, the shared ring set, and one
/// center per galaxy. Edits produce a new value; nothing here is mutated by
/// the integrator.
#[derive(Resource, Clone, PartialEq)]
pub struct SimConfig {
    pub params: SimParams,
    pub rings: Vec<Ring>,
    pub centers: Vec<DVec2>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_params(SimParams::default())
    }
}

impl SimConfig {
    /// Builds rings from the canonical table and places centers on the x
    /// axis, `galaxy_distance` apart (or a single center at the origin).
    pub fn from_params(params: SimParams) -> Self {
        let rings = RING_TABLE
            .iter()
            .map(|&(radius, speed)| Ring {
                count: params.bodies_per_ring,
                radius: radius * params.ring_factor,
                orbital_speed: speed * params.speed_multiplier,
            })
            .collect();

        let centers = if params.two_galaxies {
            let half = params.galaxy_distance / 2.0;
            vec![DVec2::new(-half, 0.0), DVec2::new(half, 0.0)]
        } else {
            vec![DVec2::ZERO]
        };

        Self {
            params,
            rings,
            centers,
        }
    }

    /// Scales every ring radius; compress passes 0.9, spread 1.1.
    pub fn scale_rings(&self, factor: f64) -> Self {
        let mut next = self.clone();
        for ring in &mut next.rings {
            ring.radius *= factor;
        }
        next
    }

    /// Adjusts one ring's body count by `delta`, floored at zero.
    /// Out-of-range indices leave the configuration unchanged.
    pub fn adjust_ring_count(&self, ring_index: usize, delta: i32) -> Self {
        let mut next = self.clone();
        if let Some(ring) = next.rings.get_mut(ring_index) {
            ring.count = ring.count.saturating_add_signed(delta);
        }
        next
    }

    /// Replaces the parameter set and rebuilds rings and centers from it.
    /// Any dragged center positions are discarded, as in a fresh start.
    pub fn apply_params(&self, params: SimParams) -> Self {
        Self::from_params(params)
    }

    /// Moves one galaxy's configured center. Only future regenerations see
    /// the new position; live registries are untouched.
    pub fn move_center(&self, galaxy: usize, center: DVec2) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.centers.get_mut(galaxy) {
            *slot = center;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_params_scales_ring_table() {
        let config = SimConfig::from_params(SimParams {
            ring_factor: 2.0,
            speed_multiplier: 3.0,
            bodies_per_ring: 7,
            ..SimParams::default()
        });

        assert_eq!(config.rings.len(), RING_TABLE.len());
        assert_eq!(config.rings[0].count, 7);
        assert_eq!(config.rings[0].radius, 20.0);
        assert_eq!(config.rings[0].orbital_speed, 30.0);
        assert_eq!(config.rings[9].radius, 200.0);
    }

    #[test]
    fn two_galaxy_centers_straddle_origin() {
        let config = SimConfig::from_params(SimParams {
            galaxy_distance: 300.0,
            two_galaxies: true,
            ..SimParams::default()
        });
        assert_eq!(config.centers, vec![
            DVec2::new(-150.0, 0.0),
            DVec2::new(150.0, 0.0)
        ]);

        let single = SimConfig::from_params(SimParams {
            two_galaxies: false,
            ..SimParams::default()
        });
        assert_eq!(single.centers, vec![DVec2::ZERO]);
    }

    #[test]
    fn ring_count_floors_at_zero() {
        let config = SimConfig::default();
        let emptied = config.adjust_ring_count(3, -(config.rings[3].count as i32) - 5);
        assert_eq!(emptied.rings[3].count, 0);
        let restored = emptied.adjust_ring_count(3, 2);
        assert_eq!(restored.rings[3].count, 2);
    }

    #[test]
    fn adjust_out_of_range_is_a_no_op() {
        let config = SimConfig::default();
        let same = config.adjust_ring_count(usize::MAX, 1);
        assert!(same == config);
    }

    #[test]
    fn compress_then_inverse_restores_radii() {
        let config = SimConfig::default();
        let round_trip = config
            .scale_rings(COMPRESS_FACTOR)
            .scale_rings(1.0 / COMPRESS_FACTOR);
        for (a, b) in round_trip.rings.iter().zip(config.rings.iter()) {
            assert!((a.radius - b.radius).abs() < 1e-12);
        }
    }

    #[test]
    fn moved_center_survives_edits_but_not_apply_params() {
        let config = SimConfig::default();
        let dragged = config.move_center(1, DVec2::new(40.0, -25.0));
        assert_eq!(dragged.centers[1], DVec2::new(40.0, -25.0));

        let compressed = dragged.scale_rings(COMPRESS_FACTOR);
        assert_eq!(compressed.centers[1], DVec2::new(40.0, -25.0));

        let reapplied = dragged.apply_params(dragged.params);
        assert_eq!(reapplied.centers[1].x, DEFAULT_GALAXY_DISTANCE / 2.0);
    }
}
