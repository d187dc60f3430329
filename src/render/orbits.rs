//! Orbit ring rendering using Bevy Gizmos.
//!
//! Each ring is redrawn every frame at the center the placement graph reports,
//! so satellite rings follow their host. Visibility comes from the graph's
//! ring flags, which the orbits toggle flips.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Isometry3d;
use bevy::prelude::*;

use crate::controller::InteractionController;

/// Plugin providing orbit ring visualization.
pub struct OrbitRingPlugin;

impl Plugin for OrbitRingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitRingSettings>();
    }
}

/// Settings for orbit ring rendering.
#[derive(Resource)]
pub struct OrbitRingSettings {
    /// Number of segments per ring (higher = smoother).
    pub segments: u32,
    pub color: Color,
}

impl Default for OrbitRingSettings {
    fn default() -> Self {
        Self {
            segments: 128,
            color: Color::srgba(1.0, 1.0, 1.0, 0.2),
        }
    }
}

/// Draw every visible orbit ring in the XZ plane.
pub fn draw_orbit_rings(
    mut gizmos: Gizmos,
    controller: Res<InteractionController>,
    settings: Res<OrbitRingSettings>,
) {
    let graph = controller.graph();
    // Gizmo circles lie in XY; tip them over into XZ
    let flat = Quat::from_rotation_x(FRAC_PI_2);

    for ring in graph.orbit_rings().iter().filter(|r| r.visible) {
        let center = graph.orbit_center(ring).as_vec3();
        gizmos
            .circle(Isometry3d::new(center, flat), ring.radius as f32, settings.color)
            .resolution(settings.segments);
    }
}
