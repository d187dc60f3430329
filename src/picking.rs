//! Pointer-to-body resolution.
//!
//! A pointer position becomes a ray from the view camera. The ray is tested
//! against every shaped node hanging from a registered body (rings, labels
//! and glows included), the nearest hit is kept, and the graph is walked
//! upwards from it to the closest node tagged as a body.

use bevy::log::debug;
use bevy::math::{DQuat, DVec2, DVec3};

use crate::camera::{Ray, ViewCamera};
use crate::registry::{BodyDescriptor, BodyRegistry};
use crate::scene::{NodeId, NodeKind, PlacementGraph, Shape};
use crate::types::Viewport;

/// Rays nearly parallel to a flat shape are treated as misses.
const PARALLEL_EPSILON: f64 = 1e-12;

/// One ray/node intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub node: NodeId,
    /// Distance along the ray in world units.
    pub distance: f64,
}

/// Intersect `ray` with the shapes of `nodes`, nearest hit first.
///
/// Hidden nodes (or nodes under a hidden ancestor) are skipped.
pub fn intersect(graph: &PlacementGraph, ray: &Ray, nodes: &[NodeId]) -> Vec<RayHit> {
    let mut hits: Vec<RayHit> = nodes
        .iter()
        .filter(|&&id| graph.is_effectively_visible(id))
        .filter_map(|&id| {
            let shape = graph.node(id).shape?;
            let center = graph.world_position(id);
            let distance = match shape {
                Shape::Sphere { radius } => intersect_sphere(ray, center, radius),
                Shape::Annulus { inner, outer } => {
                    let rotation = DQuat::from_rotation_y(graph.world_rotation_y(id));
                    intersect_annulus(ray, center, rotation, inner, outer)
                }
                Shape::Billboard { width, height } => {
                    intersect_billboard(ray, center, width * 0.5, height * 0.5)
                }
            }?;
            Some(RayHit { node: id, distance })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest body-tagged node at or above `id`, stopping at the root.
pub fn owning_body(graph: &PlacementGraph, id: NodeId) -> Option<&str> {
    std::iter::once(id)
        .chain(graph.ancestors(id))
        .map(|node| &graph.node(node).kind)
        .take_while(|kind| **kind != NodeKind::Root)
        .find_map(|kind| match kind {
            NodeKind::Body(name) => Some(name.as_str()),
            _ => None,
        })
}

/// Resolve a pointer position to the body under it.
pub fn resolve<'r>(
    pointer: DVec2,
    viewport: Viewport,
    camera: &ViewCamera,
    graph: &PlacementGraph,
    registry: &'r BodyRegistry,
) -> Option<&'r BodyDescriptor> {
    if viewport.is_degenerate() {
        return None;
    }

    let ray = camera.ray_through_pointer(pointer, viewport);
    resolve_ray(&ray, graph, registry)
}

/// Resolve an already constructed ray. Only the nearest hit is considered.
pub fn resolve_ray<'r>(
    ray: &Ray,
    graph: &PlacementGraph,
    registry: &'r BodyRegistry,
) -> Option<&'r BodyDescriptor> {
    let candidates = graph.body_subtrees();
    let nearest = intersect(graph, ray, &candidates).into_iter().next()?;

    let name = owning_body(graph, nearest.node)?;
    debug!(
        "Picked {:?} at distance {:.2}, resolved to {}",
        graph.node(nearest.node).kind,
        nearest.distance,
        name
    );
    registry.get_body(name).ok()
}

fn intersect_sphere(ray: &Ray, center: DVec3, radius: f64) -> Option<f64> {
    let to_center = center - ray.origin;
    let along = to_center.dot(ray.direction);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }

    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Origin inside the sphere
        Some(far)
    } else {
        None
    }
}

/// Double-sided flat ring in the node's local XZ plane.
fn intersect_annulus(
    ray: &Ray,
    center: DVec3,
    rotation: DQuat,
    inner: f64,
    outer: f64,
) -> Option<f64> {
    let inverse = rotation.inverse();
    let origin = inverse * (ray.origin - center);
    let direction = inverse * ray.direction;
    if direction.y.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = -origin.y / direction.y;
    if t < 0.0 {
        return None;
    }

    let point = origin + direction * t;
    let radius = DVec2::new(point.x, point.z).length();
    (inner..=outer).contains(&radius).then_some(t)
}

/// Rectangle facing back along the ray, like a sprite facing the camera.
fn intersect_billboard(ray: &Ray, center: DVec3, half_width: f64, half_height: f64) -> Option<f64> {
    let t = (center - ray.origin).dot(ray.direction);
    if t < 0.0 {
        return None;
    }

    let right = ray.direction.cross(DVec3::Y).try_normalize()?;
    let up = right.cross(ray.direction);
    let offset = ray.at(t) - center;

    (offset.dot(right).abs() <= half_width && offset.dot(up).abs() <= half_height).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Decoration, SceneConfig, compose};
    use crate::test_utils::fixtures;
    use approx::assert_relative_eq;

    fn saturn_scene() -> (BodyRegistry, PlacementGraph) {
        let registry = fixtures::sun_and_saturn();
        let graph = compose(&registry, &SceneConfig::default()).unwrap();
        (registry, graph)
    }

    fn down_at(point: DVec3) -> Ray {
        Ray::new(point + DVec3::new(0.0, 500.0, 0.0), DVec3::NEG_Y)
    }

    #[test]
    fn test_sphere_hit_distance() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z);
        assert_relative_eq!(intersect_sphere(&ray, DVec3::ZERO, 2.0).unwrap(), 8.0);
        assert!(intersect_sphere(&ray, DVec3::new(5.0, 0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_sphere_behind_origin_missed() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::Z);
        assert!(intersect_sphere(&ray, DVec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_annulus_hole_is_empty() {
        let ray = down_at(DVec3::ZERO);
        assert!(intersect_annulus(&ray, DVec3::ZERO, DQuat::IDENTITY, 1.0, 2.0).is_none());

        let ray = down_at(DVec3::new(1.5, 0.0, 0.0));
        assert_relative_eq!(
            intersect_annulus(&ray, DVec3::ZERO, DQuat::IDENTITY, 1.0, 2.0).unwrap(),
            500.0
        );
    }

    #[test]
    fn test_ring_hit_resolves_to_planet() {
        let (registry, graph) = saturn_scene();
        let saturn = graph.body_node("Saturn").unwrap();
        let center = graph.world_position(saturn);

        // Straight down through the ring band, well outside the planet sphere.
        let ray = down_at(center + DVec3::new(100.0, 0.0, 0.0));
        let hits = intersect(&graph, &ray, &graph.body_subtrees());
        assert_eq!(
            graph.node(hits[0].node).kind,
            NodeKind::Decoration(Decoration::Rings)
        );

        let picked = resolve_ray(&ray, &graph, &registry).unwrap();
        assert_eq!(picked.name, "Saturn");
    }

    #[test]
    fn test_label_hit_resolves_to_planet() {
        let (registry, graph) = saturn_scene();
        let saturn = graph.body_node("Saturn").unwrap();
        let label = graph
            .children(saturn)
            .iter()
            .copied()
            .find(|&c| graph.node(c).kind == NodeKind::Decoration(Decoration::Label))
            .unwrap();
        let label_center = graph.world_position(label);

        // Horizontal ray just above the planet, aimed at the label.
        let ray = Ray::new(label_center + DVec3::new(0.0, 0.0, 1000.0), DVec3::NEG_Z);
        let picked = resolve_ray(&ray, &graph, &registry).unwrap();
        assert_eq!(picked.name, "Saturn");
    }

    #[test]
    fn test_glow_resolves_to_sun() {
        let (registry, graph) = saturn_scene();
        let sun_radius = 30.0 * 1.2;
        // Grazes the glow but misses the sun's own sphere.
        let ray = Ray::new(DVec3::new(sun_radius * 1.1, 0.0, 1000.0), DVec3::NEG_Z);
        let picked = resolve_ray(&ray, &graph, &registry).unwrap();
        assert_eq!(picked.name, "Sun");
    }

    #[test]
    fn test_miss_resolves_to_none() {
        let (registry, graph) = saturn_scene();
        let ray = Ray::new(DVec3::new(0.0, 5000.0, 0.0), DVec3::Y);
        assert!(resolve_ray(&ray, &graph, &registry).is_none());
    }

    #[test]
    fn test_nearest_hit_wins() {
        let (registry, graph) = saturn_scene();
        let saturn = graph.world_position(graph.body_node("Saturn").unwrap());

        // Along the x axis from beyond Saturn towards the Sun: Saturn is first.
        let ray = Ray::new(saturn + DVec3::new(1000.0, 0.0, 0.0), DVec3::NEG_X);
        let hits = intersect(&graph, &ray, &graph.body_subtrees());
        assert!(hits.len() >= 2, "expected Saturn and Sun on the line");
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(resolve_ray(&ray, &graph, &registry).unwrap().name, "Saturn");
    }

    #[test]
    fn test_owning_body_stops_at_root() {
        let (_, graph) = saturn_scene();
        assert_eq!(owning_body(&graph, graph.root()), None);
    }

    #[test]
    fn test_owning_body_through_pivot() {
        let registry = fixtures::sun_earth_moon();
        let graph = compose(&registry, &SceneConfig::default()).unwrap();
        let pivot = graph.pivot_of("Moon").unwrap().unwrap();
        // A pivot has no shape, but if it were hit it would belong to Earth.
        assert_eq!(owning_body(&graph, pivot), Some("Earth"));
    }

    #[test]
    fn test_pointer_through_screen_center() {
        let (registry, graph) = saturn_scene();
        let camera = ViewCamera {
            position: DVec3::new(0.0, 0.0, 500.0),
            target: DVec3::ZERO,
            ..Default::default()
        };
        let viewport = Viewport::new(800.0, 600.0);

        let picked = resolve(DVec2::new(400.0, 300.0), viewport, &camera, &graph, &registry);
        assert_eq!(picked.unwrap().name, "Sun");

        // Top-left corner looks off into empty space.
        let picked = resolve(DVec2::new(0.0, 0.0), viewport, &camera, &graph, &registry);
        assert!(picked.is_none());
    }

    #[test]
    fn test_degenerate_viewport() {
        let (registry, graph) = saturn_scene();
        let picked = resolve(
            DVec2::ZERO,
            Viewport::new(0.0, 0.0),
            &ViewCamera::default(),
            &graph,
            &registry,
        );
        assert!(picked.is_none());
    }
}
