//! Body, ring and glow meshes.
//!
//! One entity is spawned per shaped node of the placement graph. Labels are
//! the exception: they are drawn with egui (see `labels.rs`), their billboard
//! shape only exists for picking.

use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;

use bevy::asset::io::file::FileAssetReader;
use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::controller::InteractionController;
use crate::picking::owning_body;
use crate::registry::BodyDescriptor;
use crate::scene::{Decoration, NodeId, NodeKind, Shape};

/// Asset folder under the base path, as configured by the default `AssetPlugin`.
const ASSET_DIR: &str = "assets";

/// Opacity of the star's glow shell.
const GLOW_ALPHA: f32 = 0.3;

/// Links a render entity to its placement node.
#[derive(Component, Debug)]
pub struct NodeVisual {
    pub node: NodeId,
    /// Fixed rotation applied on top of the node's world rotation, for meshes
    /// whose native orientation differs from the node's.
    pub mesh_rotation: Quat,
}

/// Plugin spawning a mesh for every shaped placement node.
pub struct BodyVisualPlugin;

impl Plugin for BodyVisualPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_body_visuals);
    }
}

fn srgb([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}

/// Where the asset server looks for `path`. The base path is resolved like
/// the asset server does it: `BEVY_ASSET_ROOT`, then the manifest directory,
/// then the executable's directory.
fn texture_file(path: &str) -> PathBuf {
    FileAssetReader::get_base_path().join(ASSET_DIR).join(path)
}

/// Load `path` if the asset server will find it. Missing textures fall back
/// to the descriptor's flat color instead of an invisible material.
fn load_texture(asset_server: &AssetServer, path: Option<&str>) -> Option<Handle<Image>> {
    let path = path?;
    let file = texture_file(path);
    if !file.exists() {
        debug!("Texture {} not found, using flat color", file.display());
        return None;
    }
    Some(asset_server.load(path.to_string()))
}

fn body_material(body: &BodyDescriptor, asset_server: &AssetServer) -> StandardMaterial {
    let texture = load_texture(asset_server, body.texture.as_deref());
    StandardMaterial {
        base_color: if texture.is_some() {
            Color::WHITE
        } else {
            srgb(body.color)
        },
        base_color_texture: texture,
        // Nothing in the scene is lit
        unlit: true,
        ..default()
    }
}

fn ring_material(body: &BodyDescriptor, asset_server: &AssetServer) -> StandardMaterial {
    let texture = body
        .rings
        .as_ref()
        .and_then(|rings| load_texture(asset_server, rings.texture.as_deref()));
    StandardMaterial {
        base_color: if texture.is_some() {
            Color::WHITE
        } else {
            srgb(body.color).with_alpha(0.8)
        },
        base_color_texture: texture,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

fn glow_material(body: &BodyDescriptor) -> StandardMaterial {
    let color = body.glow_color.map_or(Color::WHITE, srgb);
    StandardMaterial {
        base_color: color.with_alpha(GLOW_ALPHA),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        // Only the far half of the shell is drawn, a halo around the star
        // rather than a tint over it
        cull_mode: Some(Face::Front),
        ..default()
    }
}

/// Spawn meshes for every body, ring and glow node.
fn spawn_body_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    controller: Res<InteractionController>,
) {
    let graph = controller.graph();
    let mut spawned = 0;

    for (id, node) in graph.nodes() {
        let Some(shape) = node.shape else {
            continue;
        };
        let Some(body) = owning_body(graph, id).and_then(|name| controller.registry().get_body(name).ok())
        else {
            continue;
        };

        let (mesh, material, mesh_rotation) = match (&node.kind, shape) {
            (NodeKind::Body(_), Shape::Sphere { radius }) => (
                meshes.add(Sphere::new(radius as f32).mesh().uv(32, 18)),
                body_material(body, &asset_server),
                Quat::IDENTITY,
            ),
            (NodeKind::Decoration(Decoration::Glow), Shape::Sphere { radius }) => (
                meshes.add(Sphere::new(radius as f32).mesh().uv(32, 18)),
                glow_material(body),
                Quat::IDENTITY,
            ),
            (NodeKind::Decoration(Decoration::Rings), Shape::Annulus { inner, outer }) => (
                meshes.add(Annulus::new(inner as f32, outer as f32)),
                ring_material(body, &asset_server),
                // Annulus meshes lie in XY; rings lie in the body's XZ plane
                Quat::from_rotation_x(-FRAC_PI_2),
            ),
            _ => continue,
        };

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(material)),
            Transform::default(),
            Visibility::default(),
            NodeVisual {
                node: id,
                mesh_rotation,
            },
        ));
        spawned += 1;
    }

    info!(
        "Spawned {} meshes for {} bodies",
        spawned,
        controller.registry().len()
    );
}

/// Copy world transforms and visibility from the placement graph.
pub fn sync_node_visuals(
    controller: Res<InteractionController>,
    mut visuals: Query<(&NodeVisual, &mut Transform, &mut Visibility)>,
) {
    let graph = controller.graph();
    for (visual, mut transform, mut visibility) in visuals.iter_mut() {
        transform.translation = graph.world_position(visual.node).as_vec3();
        transform.rotation =
            Quat::from_rotation_y(graph.world_rotation_y(visual.node) as f32) * visual.mesh_rotation;
        *visibility = if graph.is_effectively_visible(visual.node) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
