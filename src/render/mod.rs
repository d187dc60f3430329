//! Rendering systems for the orrery.
//!
//! This module mirrors the placement graph onto Bevy entities: body meshes,
//! ring and glow meshes, orbit rings and name labels. Nothing here mutates
//! simulation state.

pub mod bodies;
pub mod labels;
pub mod orbits;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use self::bodies::{BodyVisualPlugin, sync_node_visuals};
use self::labels::{LabelPlugin, draw_body_labels};
use self::orbits::{OrbitRingPlugin, draw_orbit_rings};
use crate::types::OrrerySet;

// Re-export for use in other modules
pub use self::bodies::NodeVisual;
pub use self::labels::LabelSettings;
pub use self::orbits::OrbitRingSettings;

/// Background color behind the scene.
pub const SPACE_COLOR: Color = Color::srgb(0.0, 0.0, 0.02);

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SPACE_COLOR))
            .add_plugins((BodyVisualPlugin, OrbitRingPlugin, LabelPlugin))
            // Orbit rings are drawn after the transforms they are centered on
            .add_systems(
                Update,
                (sync_node_visuals, draw_orbit_rings)
                    .chain()
                    .in_set(OrrerySet::Sync),
            )
            .add_systems(EguiPrimaryContextPass, draw_body_labels);
    }
}
