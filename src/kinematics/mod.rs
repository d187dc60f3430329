//! Closed-form orbital kinematics plus incremental spin.
//!
//! Planet positions are a pure function of elapsed simulated time. Spins and
//! satellite revolutions are running accumulators that advance once per tick,
//! so two scenes only agree if they were ticked identically.

#[cfg(test)]
mod proptest_kinematics;

use std::f64::consts::TAU;

use bevy::math::DVec3;

use crate::registry::{BodyClass, BodyDescriptor, BodyRegistry};
use crate::scene::{Placement, PlacementGraph, SceneConfig};

/// Spin per tick for planets and satellites, before dividing by the period.
pub const SPIN_RATE: f64 = 0.01;

/// Spin per tick for the star.
pub const STAR_SPIN_RATE: f64 = 0.001;

/// Satellite revolution per tick, before dividing by the period.
pub const REVOLUTION_RATE: f64 = 0.02;

/// Maps elapsed simulated time and body parameters to transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub distance_scale: f64,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

impl Kinematics {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            distance_scale: config.distance_scale,
        }
    }

    /// Orbital angle in radians, or `None` for a body without an orbit.
    pub fn orbital_angle(body: &BodyDescriptor, elapsed: f64, time_scale: f64) -> Option<f64> {
        body.orbital_period
            .map(|period| elapsed * TAU / period * time_scale)
    }

    /// Position of a planet relative to the star.
    ///
    /// The y term tilts the orbit by lifting one half and lowering the other
    /// in proportion to `inclination`. It is a visual approximation, not a
    /// rotation of the orbital plane; orbits stay slightly elongated in y.
    pub fn orbital_position(
        &self,
        body: &BodyDescriptor,
        elapsed: f64,
        time_scale: f64,
    ) -> Option<DVec3> {
        let angle = Self::orbital_angle(body, elapsed, time_scale)?;
        let distance = body.distance? * self.distance_scale;
        let (sin, cos) = angle.sin_cos();
        Some(DVec3::new(
            distance * cos,
            sin * distance * body.inclination,
            distance * sin,
        ))
    }

    /// Self-rotation added per tick. Negative for retrograde bodies, zero
    /// when the rotation period is unknown.
    pub fn spin_increment(body: &BodyDescriptor, time_scale: f64) -> f64 {
        let rate = match body.class() {
            BodyClass::Star => STAR_SPIN_RATE,
            BodyClass::Planet | BodyClass::Satellite => SPIN_RATE,
        };
        body.rotation_period
            .map_or(0.0, |period| rate / period * time_scale)
    }

    /// Pivot rotation added per tick for a satellite.
    pub fn revolution_increment(body: &BodyDescriptor, time_scale: f64) -> f64 {
        body.orbital_period
            .map_or(0.0, |period| REVOLUTION_RATE / period * time_scale)
    }

    /// Update a body's own placement.
    ///
    /// Planets get their orbital position recomputed; every body accumulates
    /// spin if simulated time moved since its last tick. Satellite positions
    /// are left alone, their motion comes from [`Kinematics::advance_pivot`].
    pub fn advance(
        &self,
        placement: &mut Placement,
        body: &BodyDescriptor,
        elapsed: f64,
        time_scale: f64,
    ) {
        if body.class() == BodyClass::Planet {
            if let Some(position) = self.orbital_position(body, elapsed, time_scale) {
                placement.position = position;
            }
        }

        if elapsed > placement.last_tick {
            placement.rotation_y += Self::spin_increment(body, time_scale);
            placement.last_tick = elapsed;
        }
    }

    /// Revolve a satellite by turning the pivot it hangs from.
    pub fn advance_pivot(pivot: &mut Placement, body: &BodyDescriptor, elapsed: f64, time_scale: f64) {
        if elapsed > pivot.last_tick {
            pivot.rotation_y += Self::revolution_increment(body, time_scale);
            pivot.last_tick = elapsed;
        }
    }

    /// Advance every registered body and satellite pivot in `graph`.
    pub fn step(
        &self,
        graph: &mut PlacementGraph,
        registry: &BodyRegistry,
        elapsed: f64,
        time_scale: f64,
    ) {
        for body in registry.all_bodies() {
            let Ok(node) = graph.body_node(&body.name) else {
                continue;
            };

            if body.is_satellite() {
                if let Ok(Some(pivot)) = graph.pivot_of(&body.name) {
                    Self::advance_pivot(graph.placement_mut(pivot), body, elapsed, time_scale);
                }
            }

            self.advance(graph.placement_mut(node), body, elapsed, time_scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::compose;
    use crate::test_utils::fixtures;
    use approx::assert_relative_eq;

    #[test]
    fn test_cold_start_at_zero() {
        let kinematics = Kinematics::default();
        let earth = fixtures::earth();
        let mut placement = Placement::default();

        kinematics.advance(&mut placement, &earth, 0.0, 0.1);

        assert_relative_eq!(placement.position.x, 150.0 * kinematics.distance_scale);
        assert_eq!(placement.position.y, 0.0);
        assert_eq!(placement.position.z, 0.0);
        assert_eq!(placement.rotation_y, 0.0);
    }

    #[test]
    fn test_quarter_orbit() {
        let kinematics = Kinematics { distance_scale: 1.0 };
        let earth = fixtures::earth();
        // A quarter of one year at time scale 1
        let pos = kinematics.orbital_position(&earth, 0.25, 1.0).unwrap();
        assert_relative_eq!(pos.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pos.z, 150.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inclination_lifts_y() {
        let kinematics = Kinematics { distance_scale: 1.0 };
        let mercury = fixtures::mercury();
        let pos = kinematics.orbital_position(&mercury, 0.06, 1.0).unwrap();
        // Quarter orbit: sin(angle) = 1
        assert_relative_eq!(pos.y, 58.0 * 0.03, epsilon = 1e-9);
    }

    #[test]
    fn test_star_has_no_orbit() {
        let kinematics = Kinematics::default();
        assert!(kinematics.orbital_position(&fixtures::sun(), 10.0, 0.1).is_none());
    }

    #[test]
    fn test_spin_accumulates_per_tick() {
        let kinematics = Kinematics::default();
        let earth = fixtures::earth();
        let mut placement = Placement::default();

        for tick in 1..=10 {
            kinematics.advance(&mut placement, &earth, tick as f64 * 0.016, 0.1);
        }
        assert_relative_eq!(placement.rotation_y, 10.0 * SPIN_RATE / 1.0 * 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_repeated_elapsed_does_not_spin() {
        let kinematics = Kinematics::default();
        let earth = fixtures::earth();
        let mut placement = Placement::default();

        kinematics.advance(&mut placement, &earth, 1.0, 0.1);
        let after_first = placement.rotation_y;
        kinematics.advance(&mut placement, &earth, 1.0, 0.1);
        assert_eq!(placement.rotation_y, after_first);
    }

    #[test]
    fn test_star_spins_slower() {
        let sun = fixtures::sun();
        assert_relative_eq!(Kinematics::spin_increment(&sun, 0.1), 0.001 / 27.0 * 0.1);
    }

    #[test]
    fn test_unknown_rotation_does_not_spin() {
        let earth = fixtures::earth().without_rotation();
        assert_eq!(Kinematics::spin_increment(&earth, 0.1), 0.0);
    }

    #[test]
    fn test_satellite_revolves_through_pivot() {
        let registry = fixtures::sun_earth_moon();
        let config = SceneConfig::default();
        let mut graph = compose(&registry, &config).unwrap();
        let kinematics = Kinematics::new(&config);

        let moon = graph.body_node("Moon").unwrap();
        let pivot = graph.pivot_of("Moon").unwrap().unwrap();
        let local_before = graph.node(moon).placement.position;

        kinematics.step(&mut graph, &registry, 0.5, 0.1);

        // Local coordinates never change; the pivot carries the revolution.
        assert_eq!(graph.node(moon).placement.position, local_before);
        assert_relative_eq!(
            graph.node(pivot).placement.rotation_y,
            REVOLUTION_RATE / 0.073 * 0.1
        );
    }

    #[test]
    fn test_step_moves_planets_with_time() {
        let registry = fixtures::sun_earth_moon();
        let config = SceneConfig::default();
        let mut graph = compose(&registry, &config).unwrap();
        let kinematics = Kinematics::new(&config);
        let earth = graph.body_node("Earth").unwrap();

        kinematics.step(&mut graph, &registry, 1.0, 0.1);
        let expected = kinematics
            .orbital_position(registry.get_body("Earth").unwrap(), 1.0, 0.1)
            .unwrap();
        assert_eq!(graph.node(earth).placement.position, expected);

        // The sun never leaves the origin.
        let sun = graph.body_node("Sun").unwrap();
        assert_eq!(graph.node(sun).placement.position, DVec3::ZERO);
    }
}
