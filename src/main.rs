//! Orrery - Solar System Visualization
//!
//! A desktop application showing the Sun, planets and moons in motion, with
//! click-to-inspect body facts.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::controller::InteractionController;
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::time::TimePlugin;
use orrery::types::SimulationError;
use orrery::ui::UiPlugin;

fn main() -> Result<(), SimulationError> {
    // A broken catalog aborts before any window opens
    let controller = InteractionController::solar_system()?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(controller)
        .add_plugins((TimePlugin, CameraPlugin, RenderPlugin, InputPlugin, UiPlugin))
        .run();

    Ok(())
}
