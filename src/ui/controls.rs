//! Control dock (bottom bar).
//!
//! The dock provides a single horizontal strip with:
//! - Play/Pause toggle
//! - Orbit rings toggle
//! - Labels toggle
//! - Speed slider with its multiplier label
//! - Reset view button
//! - Help button with shortcuts tooltip

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::controller::{Action, InteractionController};
use crate::time::{SPEED_MAX, SPEED_MIN};
use crate::types::SimulationState;

use super::icons;

/// Colors for the dock UI.
pub(super) mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const ACTIVE: Color32 = Color32::from_rgb(85, 221, 136);
    pub const INACTIVE: Color32 = Color32::from_rgb(120, 120, 130);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// Keyboard shortcuts listed in the help overlay.
pub const SHORTCUTS: [(&str, &str); 9] = [
    ("Space", "Play/Pause"),
    ("O", "Show/hide orbits"),
    ("L", "Show/hide labels"),
    ("[ / ]", "Slower/faster"),
    ("R", "Reset view"),
    ("Esc", "Close info panel"),
    ("Drag", "Orbit camera"),
    ("Right drag", "Pan camera"),
    ("Scroll", "Zoom"),
];

/// Resource for help tooltip visibility.
#[derive(Resource, Default)]
pub struct HelpTooltipState {
    pub visible: bool,
}

/// System that renders the dock at the bottom and forwards clicks to the
/// controller as actions.
pub fn dock_system(
    mut contexts: EguiContexts,
    mut controller: ResMut<InteractionController>,
    mut help_state: ResMut<HelpTooltipState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut actions = Vec::new();
    let state = controller.state().clone();

    egui::TopBottomPanel::bottom("dock")
        .exact_height(56.0)
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 16.0;

                render_play_pause(ui, &state, &mut actions);
                render_orbits_toggle(ui, &state, &mut actions);
                render_labels_toggle(ui, &state, &mut actions);

                ui.separator();

                render_speed_slider(ui, &state, &mut actions);

                // Spacer to push remaining buttons to the right
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;

                    render_help_button(ui, &mut help_state);
                    render_reset_button(ui, &mut actions);
                });
            });
        });

    if help_state.visible {
        render_help_overlay(ctx);
    }

    for action in actions {
        // Failures are already logged by the controller
        let _ = controller.apply(action);
    }
}

/// Render the play/pause toggle button.
fn render_play_pause(ui: &mut egui::Ui, state: &SimulationState, actions: &mut Vec<Action>) {
    let (icon, color, tooltip) = if state.is_playing() {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    } else {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    };

    let button = egui::Button::new(egui::RichText::new(icon).size(22.0).color(color))
        .min_size(egui::vec2(40.0, 36.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        actions.push(Action::TogglePlay);
    }
}

fn render_orbits_toggle(ui: &mut egui::Ui, state: &SimulationState, actions: &mut Vec<Action>) {
    let (color, tooltip) = if state.show_orbits {
        (colors::ACTIVE, "Hide orbits (O)")
    } else {
        (colors::INACTIVE, "Show orbits (O)")
    };

    let button = egui::Button::new(egui::RichText::new(icons::ORBIT).size(20.0).color(color))
        .frame(state.show_orbits)
        .min_size(egui::vec2(36.0, 32.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        actions.push(Action::ToggleOrbits);
    }
}

fn render_labels_toggle(ui: &mut egui::Ui, state: &SimulationState, actions: &mut Vec<Action>) {
    let (color, tooltip) = if state.show_labels {
        (colors::ACTIVE, "Hide labels (L)")
    } else {
        (colors::INACTIVE, "Show labels (L)")
    };

    let button = egui::Button::new(egui::RichText::new(icons::LABELS).size(20.0).color(color))
        .frame(state.show_labels)
        .min_size(egui::vec2(36.0, 32.0));

    if ui.add(button).on_hover_text(tooltip).clicked() {
        actions.push(Action::ToggleLabels);
    }
}

/// Render the speed slider. The label shows speed relative to the default.
fn render_speed_slider(ui: &mut egui::Ui, state: &SimulationState, actions: &mut Vec<Action>) {
    ui.label(egui::RichText::new(icons::SPEED).size(18.0).color(colors::TEXT));

    let mut speed = state.time_scale();
    let slider = egui::Slider::new(&mut speed, SPEED_MIN..=SPEED_MAX)
        .show_value(false)
        .step_by(SPEED_MIN);
    if ui.add(slider).on_hover_text("Simulation speed ([ / ])").changed() {
        actions.push(Action::SetSpeed(speed));
    }

    ui.label(
        egui::RichText::new(state.clock.speed_label())
            .monospace()
            .size(14.0)
            .color(colors::TEXT),
    );
}

/// Render the reset view button.
fn render_reset_button(ui: &mut egui::Ui, actions: &mut Vec<Action>) {
    let button = egui::Button::new(egui::RichText::new(icons::RESET_VIEW).size(18.0))
        .min_size(egui::vec2(36.0, 32.0));

    if ui.add(button).on_hover_text("Reset view (R)").clicked() {
        actions.push(Action::ResetView);
    }
}

/// Render the help button.
fn render_help_button(ui: &mut egui::Ui, help_state: &mut HelpTooltipState) {
    let button = egui::Button::new(egui::RichText::new(icons::HELP).size(18.0))
        .min_size(egui::vec2(32.0, 32.0));

    let response = ui.add(button);

    if response.hovered() || help_state.visible {
        help_state.visible = response.hovered();
    }

    if response.clicked() {
        help_state.visible = !help_state.visible;
    }
}

/// Render the help overlay showing keyboard shortcuts.
fn render_help_overlay(ctx: &egui::Context) {
    egui::Window::new("Keyboard Shortcuts")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-70.0, -70.0))
        .frame(
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_premultiplied(26, 26, 36, 245))
                .inner_margin(egui::Margin::same(16))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 60, 80))),
        )
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            egui::Grid::new("shortcuts_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .show(ui, |ui| {
                    for (key, action) in SHORTCUTS {
                        ui.label(egui::RichText::new(key).strong().monospace().size(14.0));
                        ui.label(egui::RichText::new(action).size(14.0));
                        ui.end_row();
                    }
                });
        });
}
