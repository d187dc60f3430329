//! One-time construction of the placement graph from the registry.

use bevy::log::info;
use bevy::math::DVec3;

use super::{Decoration, NodeKind, OrbitRing, Placement, PlacementGraph, Shape};
use crate::registry::{BodyDescriptor, BodyRegistry};
use crate::types::SimulationError;

/// Display constants used when laying out the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Multiplier from descriptor distances to scene units.
    pub distance_scale: f64,
    /// Multiplier from descriptor display radii to scene units.
    pub size_scale: f64,
    /// Extra spread for satellites, whose catalog distances are tiny.
    pub satellite_distance_factor: f64,
    /// Label height above a body, in body radii.
    pub label_offset_factor: f64,
    pub label_width: f64,
    pub label_height: f64,
    /// Glow sphere radius relative to its body.
    pub glow_scale: f64,
    pub orbit_ring_half_width: f64,
    /// Also trace orbit rings for satellites.
    pub satellite_orbit_rings: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            distance_scale: 1.2,
            size_scale: 1.2,
            satellite_distance_factor: 20.0,
            label_offset_factor: 1.5,
            label_width: 30.0,
            label_height: 10.0,
            glow_scale: 1.2,
            orbit_ring_half_width: 0.1,
            satellite_orbit_rings: false,
        }
    }
}

/// Build the placement graph for every body in `registry`.
///
/// Primary bodies hang from the root; each satellite gets a pivot under its
/// host and sits on that pivot's +x axis. The graph is only returned once
/// fully built.
pub fn compose(
    registry: &BodyRegistry,
    config: &SceneConfig,
) -> Result<PlacementGraph, SimulationError> {
    let mut graph = PlacementGraph::new();
    let root = graph.root();

    for body in registry.all_bodies().iter().filter(|b| !b.is_satellite()) {
        let radius = body.display_radius * config.size_scale;
        let distance = body.distance.unwrap_or(0.0) * config.distance_scale;

        let node = graph.add_child(
            root,
            NodeKind::Body(body.name.clone()),
            Placement::at(DVec3::new(distance, 0.0, 0.0)),
            Some(Shape::Sphere { radius }),
        );

        if let Some(rings) = &body.rings {
            graph.add_child(
                node,
                NodeKind::Decoration(Decoration::Rings),
                Placement::default(),
                Some(Shape::Annulus {
                    inner: rings.inner_radius * config.size_scale,
                    outer: rings.outer_radius * config.size_scale,
                }),
            );
        }

        if body.glow_color.is_some() {
            graph.add_child(
                node,
                NodeKind::Decoration(Decoration::Glow),
                Placement::default(),
                Some(Shape::Sphere {
                    radius: radius * config.glow_scale,
                }),
            );
        }

        graph.add_child(
            node,
            NodeKind::Decoration(Decoration::Label),
            Placement::at(DVec3::new(0.0, radius * config.label_offset_factor, 0.0)),
            Some(Shape::Billboard {
                width: config.label_width,
                height: config.label_height,
            }),
        );

        if body.distance.is_some() {
            graph.add_orbit_ring(orbit_ring(body, distance, config));
        }
    }

    for body in registry.all_bodies().iter().filter(|b| b.is_satellite()) {
        let host_name = body.parent.as_deref().unwrap_or_default();
        let host = graph.body_node(host_name)?;

        let pivot = graph.add_child(host, NodeKind::Pivot, Placement::default(), None);
        let offset = body.distance.unwrap_or(0.0)
            * config.distance_scale
            * config.satellite_distance_factor;
        graph.add_child(
            pivot,
            NodeKind::Body(body.name.clone()),
            Placement::at(DVec3::new(offset, 0.0, 0.0)),
            Some(Shape::Sphere {
                radius: body.display_radius * config.size_scale,
            }),
        );

        if config.satellite_orbit_rings {
            graph.add_orbit_ring(orbit_ring(body, offset, config));
        }
    }

    info!(
        "Composed {} bodies into {} placement nodes ({} orbit rings)",
        registry.len(),
        graph.len(),
        graph.orbit_rings().len()
    );

    Ok(graph)
}

fn orbit_ring(body: &BodyDescriptor, radius: f64, config: &SceneConfig) -> OrbitRing {
    OrbitRing {
        body: body.name.clone(),
        radius,
        half_width: config.orbit_ring_half_width,
        visible: true,
    }
}
