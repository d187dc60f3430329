//! Info panel showing the selected body's facts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::controller::{Action, InteractionController};
use crate::registry::BodyFacts;

use super::controls::colors;
use super::icons;

/// Label/value rows for the panel, values already formatted.
pub fn fact_rows(facts: &BodyFacts) -> [(&'static str, String); 4] {
    [
        ("Radius (km)", crate::registry::format_grouped(facts.radius)),
        ("Distance (million km)", facts.distance.to_string()),
        ("Orbital period (years)", facts.orbital_period.to_string()),
        ("Rotation period (days)", facts.rotation.to_string()),
    ]
}

/// System that renders the info panel while a body is selected.
pub fn info_panel(mut contexts: EguiContexts, mut controller: ResMut<InteractionController>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Some(body) = controller.selected_body() else {
        return;
    };
    let class = body.class();
    let facts = BodyFacts::from(body);

    let mut close = false;

    egui::Window::new("body_info")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::same(12))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 60, 80))),
        )
        .show(ctx, |ui| {
            ui.set_min_width(220.0);

            // Header with close button
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{} {}", icons::body_icon(class), facts.name))
                        .strong()
                        .size(18.0)
                        .color(colors::TEXT),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button(icons::CLOSE).on_hover_text("Close (Esc)").clicked() {
                        close = true;
                    }
                });
            });

            ui.separator();

            egui::Grid::new("body_facts")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (label, value) in fact_rows(&facts) {
                        ui.label(egui::RichText::new(label).color(colors::INACTIVE));
                        ui.label(egui::RichText::new(value).monospace().color(colors::TEXT));
                        ui.end_row();
                    }
                });
        });

    if close {
        let _ = controller.apply(Action::Select(None));
    }
}
