//! Property-based tests for the kinematics engine using proptest.
//!
//! These cover the orbital formula across a wide range of periods, distances
//! and time scales.

use proptest::prelude::*;

use super::Kinematics;
use crate::registry::BodyDescriptor;
use crate::scene::Placement;

fn planet(distance: f64, orbital_period: f64, rotation_period: f64, inclination: f64) -> BodyDescriptor {
    BodyDescriptor::planet("Test", 1000.0, 1.0, distance, orbital_period, rotation_period)
        .with_inclination(inclination)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A flat orbit never leaves the y = 0 plane.
    #[test]
    fn prop_flat_orbit_stays_in_plane(
        distance in 1.0f64..5000.0,
        period in 0.01f64..200.0,
        elapsed in 0.0f64..1.0e6,
        time_scale in 0.01f64..1.0,
    ) {
        let kinematics = Kinematics::default();
        let body = planet(distance, period, 1.0, 0.0);
        let pos = kinematics.orbital_position(&body, elapsed, time_scale).unwrap();
        prop_assert_eq!(pos.y, 0.0);
    }

    /// Advancing by one full cycle returns x/z to where they started.
    #[test]
    fn prop_orbit_is_periodic(
        distance in 1.0f64..5000.0,
        period in 0.05f64..200.0,
        elapsed in 0.0f64..1000.0,
        time_scale in 0.01f64..1.0,
    ) {
        let kinematics = Kinematics::default();
        let body = planet(distance, period, 1.0, 0.1);
        let cycle = period / time_scale;

        let start = kinematics.orbital_position(&body, elapsed, time_scale).unwrap();
        let end = kinematics.orbital_position(&body, elapsed + cycle, time_scale).unwrap();

        // Relative to orbit radius; the angle grows with elapsed time so
        // absolute error grows with it too.
        let tolerance = 1e-9 * distance * (1.0 + (elapsed + cycle) * time_scale / period);
        prop_assert!((start.x - end.x).abs() <= tolerance, "x drifted: {} vs {}", start.x, end.x);
        prop_assert!((start.z - end.z).abs() <= tolerance, "z drifted: {} vs {}", start.z, end.z);
    }

    /// The orbit radius in the xz plane equals the scaled distance.
    #[test]
    fn prop_orbit_radius_is_constant(
        distance in 1.0f64..5000.0,
        period in 0.01f64..200.0,
        elapsed in 0.0f64..1.0e5,
    ) {
        let kinematics = Kinematics::default();
        let body = planet(distance, period, 1.0, 0.2);
        let pos = kinematics.orbital_position(&body, elapsed, 0.1).unwrap();
        let radius = (pos.x * pos.x + pos.z * pos.z).sqrt();
        let expected = distance * kinematics.distance_scale;
        prop_assert!((radius - expected).abs() <= 1e-9 * expected);
    }

    /// Flipping the sign of the rotation period flips the spin direction.
    #[test]
    fn prop_retrograde_spin_is_mirrored(
        rotation_period in 0.001f64..300.0,
        time_scale in 0.01f64..1.0,
    ) {
        let prograde = planet(100.0, 1.0, rotation_period, 0.0);
        let retrograde = planet(100.0, 1.0, -rotation_period, 0.0);

        let forward = Kinematics::spin_increment(&prograde, time_scale);
        let backward = Kinematics::spin_increment(&retrograde, time_scale);

        prop_assert!(forward > 0.0);
        prop_assert_eq!(backward, -forward);
    }

    /// Two placements ticked identically end in the same state.
    #[test]
    fn prop_identical_ticks_agree(
        ticks in prop::collection::vec(0.001f64..0.1, 1..50),
        rotation_period in -50.0f64..50.0,
    ) {
        prop_assume!(rotation_period.abs() > 1e-3);
        let kinematics = Kinematics::default();
        let body = planet(100.0, 1.0, rotation_period, 0.05);

        let mut a = Placement::default();
        let mut b = Placement::default();
        let mut elapsed = 0.0;
        for dt in ticks {
            elapsed += dt;
            kinematics.advance(&mut a, &body, elapsed, 0.1);
            kinematics.advance(&mut b, &body, elapsed, 0.1);
        }
        prop_assert_eq!(a, b);
    }
}
