use bevy::math::DVec2;

use crate::config::{Ring, SimConfig};

/// Base unit the 26 mass classes are multiples of.
pub const BASE_MASS: f64 = 1.0;

/// RGB palette indexed by mass class; class `i` weighs `(i + 1) * BASE_MASS`.
pub const MASS_PALETTE: [(u8, u8, u8); 26] = [
    (255, 0, 0),
    (255, 50, 0),
    (255, 101, 0),
    (255, 152, 0),
    (255, 203, 0),
    (255, 254, 0),
    (204, 255, 0),
    (153, 255, 0),
    (102, 255, 0),
    (51, 255, 0),
    (0, 255, 0),
    (0, 255, 50),
    (0, 255, 101),
    (0, 255, 152),
    (0, 255, 203),
    (0, 255, 254),
    (0, 204, 255),
    (0, 153, 255),
    (0, 102, 255),
    (0, 51, 255),
    (0, 0, 255),
    (50, 0, 255),
    (101, 0, 255),
    (152, 0, 255),
    (203, 0, 255),
    (254, 0, 255),
];

/// A point mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
}

impl Body {
    /// Palette index for this body's mass, clamped into the 26 classes.
    /// Ring bodies land exactly on their class; the heavy central body
    /// clamps to the last one.
    pub fn mass_class(&self) -> usize {
        let class = (self.mass / BASE_MASS) as i64 - 1;
        class.clamp(0, MASS_PALETTE.len() as i64 - 1) as usize
    }
}

/// All bodies of one galaxy, in generation order: ring 0 first, the central
/// body last. Replaced wholesale on every structural edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    pub bodies: Vec<Body>,
    /// Center the registry was generated around. Fixed for the registry's
    /// lifetime even if the configured center is dragged afterwards.
    pub center: DVec2,
}

impl Registry {
    /// Bodies excluding the central one.
    pub fn satellite_count(&self) -> usize {
        self.bodies.len().saturating_sub(1)
    }
}

/// Builds one galaxy: each ring's bodies on circular counter-clockwise
/// orbits, then the central body at `center` with zero velocity.
///
/// Ring body `i` of `count` sits at angle `2π/count · i + π/count`; the
/// half-step offset keeps any body off angle zero. Mass classes cycle
/// through the palette in creation order, with the counter starting at zero
/// for every call, so identical inputs give bit-identical registries.
pub fn generate(center: DVec2, rings: &[Ring], central_mass: f64) -> Registry {
    let mut bodies = Vec::with_capacity(
        rings.iter().map(|r| r.count as usize).sum::<usize>() + 1,
    );
    let mut class_index = 0usize;

    for ring in rings {
        for i in 0..ring.count {
            let angle = std::f64::consts::TAU / ring.count as f64 * i as f64
                + std::f64::consts::PI / ring.count as f64;
            let (sin, cos) = angle.sin_cos();
            bodies.push(Body {
                position: center + ring.radius * DVec2::new(cos, sin),
                velocity: ring.orbital_speed * DVec2::new(-sin, cos),
                mass: (class_index % MASS_PALETTE.len() + 1) as f64 * BASE_MASS,
            });
            class_index += 1;
        }
    }

    bodies.push(Body {
        position: center,
        velocity: DVec2::ZERO,
        mass: central_mass,
    });

    Registry { bodies, center }
}

/// Regenerates every galaxy from the configuration, one registry per
/// configured center.
pub fn generate_all(config: &SimConfig) -> Vec<Registry> {
    config
        .centers
        .iter()
        .map(|&center| generate(center, &config.rings, config.params.central_mass))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{COMPRESS_FACTOR, SimParams};

    fn one_ring(count: u32) -> Vec<Ring> {
        vec![Ring {
            count,
            radius: 30.0,
            orbital_speed: 5.0,
        }]
    }

    #[test]
    fn body_count_is_ring_sum_plus_central() {
        let config = SimConfig::default();
        let registry = generate(DVec2::ZERO, &config.rings, config.params.central_mass);
        let expected: usize = config.rings.iter().map(|r| r.count as usize).sum();
        assert_eq!(registry.bodies.len(), expected + 1);
        assert_eq!(registry.satellite_count(), expected);
    }

    #[test]
    fn central_body_is_last_at_rest() {
        let registry = generate(DVec2::new(7.0, -3.0), &one_ring(4), 10_000.0);
        let central = registry.bodies.last().unwrap();
        assert_eq!(central.position, DVec2::new(7.0, -3.0));
        assert_eq!(central.velocity, DVec2::ZERO);
        assert_eq!(central.mass, 10_000.0);
    }

    #[test]
    fn ring_bodies_sit_on_the_radius_with_tangential_velocity() {
        let center = DVec2::new(100.0, 50.0);
        let registry = generate(center, &one_ring(6), 10_000.0);

        for body in &registry.bodies[..6] {
            let offset = body.position - center;
            assert!((offset.length() - 30.0).abs() < 1e-12);
            assert!((body.velocity.length() - 5.0).abs() < 1e-12);
            // Tangential: velocity perpendicular to the radial offset,
            // counter-clockwise (positive cross product).
            assert!(offset.dot(body.velocity).abs() < 1e-9);
            assert!(offset.perp_dot(body.velocity) > 0.0);
        }
    }

    #[test]
    fn first_body_is_half_step_off_angle_zero() {
        let registry = generate(DVec2::ZERO, &one_ring(4), 1.0);
        let angle = registry.bodies[0]
            .position
            .y
            .atan2(registry.bodies[0].position.x);
        assert!((angle - std::f64::consts::PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn mass_classes_cycle_across_rings() {
        let rings = vec![
            Ring {
                count: 20,
                radius: 10.0,
                orbital_speed: 1.0,
            },
            Ring {
                count: 10,
                radius: 20.0,
                orbital_speed: 1.0,
            },
        ];
        let registry = generate(DVec2::ZERO, &rings, 10_000.0);

        // Counter runs across ring boundaries: body 20 (first of ring 1)
        // continues at class 20, and body 26 wraps back to class 0.
        assert_eq!(registry.bodies[0].mass_class(), 0);
        assert_eq!(registry.bodies[19].mass_class(), 19);
        assert_eq!(registry.bodies[20].mass_class(), 20);
        assert_eq!(registry.bodies[26].mass_class(), 0);
        assert_eq!(registry.bodies[26].mass, BASE_MASS);
    }

    #[test]
    fn central_mass_clamps_to_last_class() {
        let registry = generate(DVec2::ZERO, &one_ring(1), 10_000.0);
        assert_eq!(registry.bodies.last().unwrap().mass_class(), 25);
    }

    #[test]
    fn generation_is_deterministic() {
        let config = SimConfig::from_params(SimParams::default());
        let a = generate_all(&config);
        let b = generate_all(&config);
        assert_eq!(a, b);
    }

    #[test]
    fn compress_then_inverse_regenerates_the_same_registry() {
        let config = SimConfig::default();
        let original = generate_all(&config);
        let round_trip = generate_all(
            &config
                .scale_rings(COMPRESS_FACTOR)
                .scale_rings(1.0 / COMPRESS_FACTOR),
        );

        for (a, b) in original.iter().zip(&round_trip) {
            assert_eq!(a.bodies.len(), b.bodies.len());
            for (x, y) in a.bodies.iter().zip(&b.bodies) {
                assert!((x.position - y.position).length() < 1e-9);
                assert_eq!(x.velocity, y.velocity);
                assert_eq!(x.mass, y.mass);
            }
        }
    }

    #[test]
    fn one_registry_per_center() {
        let config = SimConfig::default();
        let registries = generate_all(&config);
        assert_eq!(registries.len(), 2);
        assert_eq!(registries[0].center, config.centers[0]);
        assert_eq!(registries[1].center, config.centers[1]);
    }
}
