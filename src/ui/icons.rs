//! Phosphor icon definitions for the UI.
//!
//! Provides icon constants using the Phosphor icon font.
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::registry::BodyClass;

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

/// Play icon (triangle pointing right)
pub const PLAY: &str = egui_phosphor::regular::PLAY;
/// Pause icon (two vertical bars)
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
/// Reset view icon
pub const RESET_VIEW: &str = egui_phosphor::regular::CROSSHAIR;
/// Orbit rings toggle
pub const ORBIT: &str = egui_phosphor::regular::CIRCLE_DASHED;
/// Labels toggle
pub const LABELS: &str = egui_phosphor::regular::TAG;
/// Speed slider
pub const SPEED: &str = egui_phosphor::regular::GAUGE;
/// Help/question icon
pub const HELP: &str = egui_phosphor::regular::QUESTION;
/// Close/X icon
pub const CLOSE: &str = egui_phosphor::regular::X;

/// Sun icon
pub const SUN: &str = egui_phosphor::regular::SUN;
/// Planet/globe icon
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
/// Moon icon
pub const MOON: &str = egui_phosphor::regular::MOON;

/// Icon shown next to a body's name.
pub fn body_icon(class: BodyClass) -> &'static str {
    match class {
        BodyClass::Star => SUN,
        BodyClass::Planet => PLANET,
        BodyClass::Satellite => MOON,
    }
}
