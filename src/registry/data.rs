//! Built-in solar system catalog.
//!
//! Display radii and distances are hand-tuned for visibility, not to scale.
//! Satellite periods are relative to their host and compressed so the moons
//! visibly move at the default speed.

use super::BodyDescriptor;

/// Every body in the catalog: the Sun first, then planets by distance,
/// then satellites.
pub fn solar_system_bodies() -> Vec<BodyDescriptor> {
    vec![
        BodyDescriptor::star("Sun", 696_340.0, 30.0, 27.0)
            .with_texture("textures/sun.jpg")
            .with_color([1.0, 0.95, 0.4])
            .with_glow([1.0, 1.0, 0.0]),
        BodyDescriptor::planet("Mercury", 2_439.7, 2.4, 58.0, 0.24, 58.6)
            .with_real_distance(57.9)
            .with_inclination(0.03)
            .with_texture("textures/mercury.jpg")
            .with_color([0.6, 0.6, 0.6]),
        // Retrograde rotation
        BodyDescriptor::planet("Venus", 6_051.8, 6.0, 108.0, 0.62, -243.0)
            .with_real_distance(108.2)
            .with_inclination(0.03)
            .with_texture("textures/venus.jpg")
            .with_color([0.9, 0.85, 0.7]),
        BodyDescriptor::planet("Earth", 6_371.0, 6.4, 150.0, 1.0, 1.0)
            .with_real_distance(149.6)
            .with_texture("textures/earth.jpg")
            .with_color([0.2, 0.5, 0.8]),
        BodyDescriptor::planet("Mars", 3_389.5, 3.4, 228.0, 1.88, 1.03)
            .with_real_distance(227.9)
            .with_inclination(0.03)
            .with_texture("textures/mars.jpg")
            .with_color([0.8, 0.4, 0.2]),
        BodyDescriptor::planet("Jupiter", 69_911.0, 69.9, 778.0, 11.86, 0.41)
            .with_real_distance(778.6)
            .with_inclination(0.05)
            .with_texture("textures/jupiter.jpg")
            .with_color([0.8, 0.7, 0.6]),
        BodyDescriptor::planet("Saturn", 58_232.0, 58.2, 1_427.0, 29.46, 0.44)
            .with_real_distance(1_433.5)
            .with_inclination(0.08)
            .with_rings(70.0, 120.0)
            .with_ring_texture("textures/saturn_rings.png")
            .with_texture("textures/saturn.jpg")
            .with_color([0.9, 0.85, 0.6]),
        // Retrograde rotation
        BodyDescriptor::planet("Uranus", 25_362.0, 25.4, 2_871.0, 84.01, -0.72)
            .with_real_distance(2_872.5)
            .with_inclination(0.20)
            .with_rings(32.0, 40.0)
            .with_ring_texture("textures/uranus_rings.png")
            .with_texture("textures/uranus.jpg")
            .with_color([0.6, 0.8, 0.9]),
        BodyDescriptor::planet("Neptune", 24_622.0, 24.6, 4_498.0, 164.8, 0.67)
            .with_real_distance(4_495.1)
            .with_inclination(0.06)
            .with_texture("textures/neptune.jpg")
            .with_color([0.3, 0.5, 0.9]),
        BodyDescriptor::satellite("Moon", "Earth", 1_737.4, 1.7, 0.384, 0.073, 27.3)
            .with_texture("textures/moon.jpg")
            .with_color([0.7, 0.7, 0.7]),
        // Phobos and Deimos are tidally locked: rotation equals revolution.
        BodyDescriptor::satellite("Phobos", "Mars", 11.267, 0.5, 0.009, 0.0008, 0.0008)
            .with_texture("textures/phobos.jpg")
            .with_color([0.55, 0.5, 0.45]),
        BodyDescriptor::satellite("Deimos", "Mars", 6.2, 0.4, 0.023, 0.003, 0.003)
            .with_texture("textures/deimos.jpg")
            .with_color([0.6, 0.55, 0.5]),
    ]
}
