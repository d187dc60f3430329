//! Test utilities for the orrery.
//!
//! Provides small body catalogs so unit tests do not depend on the full
//! built-in solar system.

/// Fixtures for creating test bodies and registries.
pub mod fixtures {
    use crate::registry::{BodyDescriptor, BodyRegistry};

    /// The star, with a glow.
    pub fn sun() -> BodyDescriptor {
        BodyDescriptor::star("Sun", 696_340.0, 30.0, 27.0).with_glow([1.0, 1.0, 0.0])
    }

    /// A planet on a flat orbit: one unit per year, one day per spin.
    pub fn earth() -> BodyDescriptor {
        BodyDescriptor::planet("Earth", 6_371.0, 6.4, 150.0, 1.0, 1.0)
    }

    pub fn moon() -> BodyDescriptor {
        BodyDescriptor::satellite("Moon", "Earth", 1_737.4, 1.7, 0.384, 0.073, 27.3)
    }

    /// A planet with a slightly inclined orbit.
    pub fn mercury() -> BodyDescriptor {
        BodyDescriptor::planet("Mercury", 2_439.7, 2.4, 58.0, 0.24, 58.6).with_inclination(0.03)
    }

    /// A retrograde rotator whose catalog distance differs from the real one.
    pub fn venus() -> BodyDescriptor {
        BodyDescriptor::planet("Venus", 6_051.8, 6.0, 108.0, 0.62, -243.0)
            .with_real_distance(108.2)
    }

    /// A ringed planet.
    pub fn saturn() -> BodyDescriptor {
        BodyDescriptor::planet("Saturn", 58_232.0, 58.2, 1_427.0, 29.46, 0.44)
            .with_inclination(0.08)
            .with_rings(70.0, 120.0)
    }

    /// Star, one planet and its satellite.
    pub fn sun_earth_moon() -> BodyRegistry {
        BodyRegistry::new(vec![sun(), earth(), moon()]).expect("fixture catalog is valid")
    }

    /// Star plus a ringed planet, for picking through decorations.
    pub fn sun_and_saturn() -> BodyRegistry {
        BodyRegistry::new(vec![sun(), saturn()]).expect("fixture catalog is valid")
    }
}
