//! Body labels using egui for text rendering.
//!
//! Each label is painted into the screen rectangle its billboard covers, so
//! the text shrinks with distance exactly like the box picking tests against.

use bevy::math::{DVec2, DVec3};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContexts, egui};

use crate::camera::ViewCamera;
use crate::controller::InteractionController;
use crate::picking::owning_body;
use crate::scene::{Decoration, NodeKind, Shape};
use crate::types::Viewport;

/// Plugin providing body label rendering.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>();
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    /// Labels projecting smaller than this many pixels are not painted.
    pub min_font_size: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self { min_font_size: 6.0 }
    }
}

/// Screen rectangle of a `width` x `height` billboard centered at `center`,
/// as (center, size) in logical pixels. `None` behind the camera.
pub fn label_screen_rect(
    camera: &ViewCamera,
    viewport: Viewport,
    center: DVec3,
    width: f64,
    height: f64,
) -> Option<(DVec2, DVec2)> {
    let screen_center = camera.project(center, viewport)?;
    let scale = camera.pixels_per_unit(center, viewport)?;
    Some((screen_center, DVec2::new(width, height) * scale))
}

/// Draw a name label for every visible label node in front of the camera.
pub fn draw_body_labels(
    mut contexts: EguiContexts,
    controller: Res<InteractionController>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    settings: Res<LabelSettings>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let viewport = Viewport::new(window.width() as f64, window.height() as f64);
    if viewport.is_degenerate() {
        return;
    }

    let graph = controller.graph();
    let painter = ctx.layer_painter(egui::LayerId::background());

    for (id, node) in graph.nodes() {
        if node.kind != NodeKind::Decoration(Decoration::Label) || !graph.is_effectively_visible(id)
        {
            continue;
        }
        let Some(Shape::Billboard { width, height }) = node.shape else {
            continue;
        };
        let Some(name) = owning_body(graph, id) else {
            continue;
        };
        let Some((center, size)) = label_screen_rect(
            controller.camera(),
            viewport,
            graph.world_position(id),
            width,
            height,
        ) else {
            continue;
        };

        let font_size = size.y as f32;
        if font_size < settings.min_font_size {
            continue;
        }
        let font = egui::FontId::proportional(font_size);
        let label_pos = egui::pos2(center.x as f32, center.y as f32);

        // Shadow
        painter.text(
            label_pos + egui::vec2(1.0, 1.0),
            egui::Align2::CENTER_CENTER,
            name,
            font.clone(),
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
        );

        // Main text
        painter.text(
            label_pos,
            egui::Align2::CENTER_CENTER,
            name,
            font,
            egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking;
    use crate::registry::BodyRegistry;
    use crate::scene::{SceneConfig, compose};
    use crate::test_utils::fixtures;

    #[test]
    fn test_painted_rect_matches_pick_box() {
        let registry = BodyRegistry::new(vec![fixtures::sun(), fixtures::earth()]).unwrap();
        let config = SceneConfig::default();
        let graph = compose(&registry, &config).unwrap();
        let earth = graph.body_node("Earth").unwrap();
        let label = graph
            .children(earth)
            .iter()
            .copied()
            .find(|&c| graph.node(c).kind == NodeKind::Decoration(Decoration::Label))
            .unwrap();

        let center = graph.world_position(label);
        let camera = ViewCamera {
            position: center + DVec3::new(0.0, 0.0, 300.0),
            target: center,
            ..ViewCamera::default()
        };
        let viewport = Viewport::new(800.0, 600.0);
        let (screen, size) =
            label_screen_rect(&camera, viewport, center, config.label_width, config.label_height)
                .unwrap();
        let half_width = size.x * 0.5;

        let inside = picking::resolve(
            screen + DVec2::new(half_width * 0.95, 0.0),
            viewport,
            &camera,
            &graph,
            &registry,
        );
        assert_eq!(inside.map(|b| b.name.as_str()), Some("Earth"));

        let outside = picking::resolve(
            screen + DVec2::new(half_width * 1.05, 0.0),
            viewport,
            &camera,
            &graph,
            &registry,
        );
        assert!(outside.is_none());
    }

    #[test]
    fn test_rect_shrinks_with_distance() {
        let viewport = Viewport::new(800.0, 600.0);
        let near = ViewCamera {
            position: DVec3::new(0.0, 0.0, 100.0),
            target: DVec3::ZERO,
            ..ViewCamera::default()
        };
        let far = ViewCamera {
            position: DVec3::new(0.0, 0.0, 400.0),
            ..near
        };

        let (_, near_size) = label_screen_rect(&near, viewport, DVec3::ZERO, 30.0, 10.0).unwrap();
        let (_, far_size) = label_screen_rect(&far, viewport, DVec3::ZERO, 30.0, 10.0).unwrap();
        assert!((near_size.y - 4.0 * far_size.y).abs() < 1e-9);
        assert!((near_size.x - 3.0 * near_size.y).abs() < 1e-9);
    }
}
