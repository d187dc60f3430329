//! Input handling for keyboard shortcuts and the mouse.
//!
//! Keyboard shortcuts map onto controller actions. The left mouse button
//! either orbits the camera (press, move, release) or picks a body (press and
//! release without moving); the right button pans and the scroll wheel zooms.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::controller::{Action, InteractionController};
use crate::time::{SPEED_MAX, SPEED_MIN};
use crate::types::{OrrerySet, Viewport};

/// Pointer travel in pixels before a press counts as a drag instead of a click.
pub const CLICK_THRESHOLD: f32 = 4.0;

/// Camera orbit in radians per pixel of drag.
pub const ORBIT_SPEED: f64 = 0.005;

/// Zoom change per scroll unit.
pub const ZOOM_SPEED: f64 = 0.1;

/// Tracks the left button between press and release.
#[derive(Resource, Default, Debug)]
pub struct DragState {
    /// Cursor position at press time; `None` when the button is up.
    pub pressed_at: Option<Vec2>,
    /// Set once the cursor has left the click threshold.
    pub dragging: bool,
}

impl DragState {
    pub fn press(&mut self, position: Vec2) {
        self.pressed_at = Some(position);
        self.dragging = false;
    }

    /// Record the current cursor position. Returns true while dragging.
    pub fn update(&mut self, position: Vec2) -> bool {
        if let Some(start) = self.pressed_at {
            if !self.dragging && start.distance(position) > CLICK_THRESHOLD {
                self.dragging = true;
            }
        }
        self.dragging
    }

    /// End the press. Returns true if it was a click rather than a drag.
    pub fn release(&mut self) -> bool {
        let clicked = self.pressed_at.take().is_some() && !self.dragging;
        self.dragging = false;
        clicked
    }
}

/// Halve or double the time scale, staying within the slider range.
pub fn stepped_speed(current: f64, faster: bool) -> f64 {
    let next = if faster { current * 2.0 } else { current * 0.5 };
    next.clamp(SPEED_MIN, SPEED_MAX)
}

/// Plugin providing keyboard shortcuts, camera controls and picking.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>().add_systems(
            Update,
            (keyboard_shortcuts, mouse_orbit_and_pick, mouse_pan, scroll_zoom)
                .chain()
                .in_set(OrrerySet::Input),
        );
    }
}

fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut controller: ResMut<InteractionController>,
    mut contexts: EguiContexts,
) {
    // Don't steal keys from a focused text field
    if contexts.ctx_mut().is_ok_and(|ctx| ctx.wants_keyboard_input()) {
        return;
    }

    let mut actions = Vec::new();

    if keys.just_pressed(KeyCode::Space) {
        actions.push(Action::TogglePlay);
    }
    if keys.just_pressed(KeyCode::KeyO) {
        actions.push(Action::ToggleOrbits);
    }
    if keys.just_pressed(KeyCode::KeyL) {
        actions.push(Action::ToggleLabels);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        actions.push(Action::ResetView);
    }
    if keys.just_pressed(KeyCode::Escape) {
        actions.push(Action::Select(None));
    }

    // Time controls: [ and ] to adjust simulation speed
    let current = controller.state().time_scale();
    if keys.just_pressed(KeyCode::BracketLeft) {
        actions.push(Action::SetSpeed(stepped_speed(current, false)));
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        actions.push(Action::SetSpeed(stepped_speed(current, true)));
    }

    for action in actions {
        // Failures are already logged by the controller
        let _ = controller.apply(action);
    }
}

/// Left drag orbits the camera; a left click without drag picks a body.
fn mouse_orbit_and_pick(
    mouse: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut controller: ResMut<InteractionController>,
    mut drag_state: ResMut<DragState>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    // Only check egui when NOT already pressed, so a drag that passes over a
    // panel keeps going and still sees the release.
    if mouse.just_pressed(MouseButton::Left) && !egui_wants_pointer(&mut contexts) {
        drag_state.press(cursor);
    }

    if drag_state.pressed_at.is_none() {
        return;
    }

    if mouse.pressed(MouseButton::Left) && drag_state.update(cursor) {
        let delta = mouse_motion.delta.as_dvec2();
        controller
            .camera_mut()
            .orbit(-delta.x * ORBIT_SPEED, delta.y * ORBIT_SPEED);
    }

    if mouse.just_released(MouseButton::Left) && drag_state.release() {
        let viewport = Viewport::new(window.width() as f64, window.height() as f64);
        let pointer = DVec2::new(cursor.x as f64, cursor.y as f64);
        if let Some(body) = controller.pick(pointer, viewport) {
            debug!("Clicked on {}", body.name);
        }
    }
}

/// Right drag slides the camera and its target across the view plane.
fn mouse_pan(
    mouse: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut controller: ResMut<InteractionController>,
    mut panning: Local<bool>,
    mut contexts: EguiContexts,
) {
    // Same rule as orbiting: egui only gets a say when the drag starts
    if mouse.just_pressed(MouseButton::Right) {
        *panning = !egui_wants_pointer(&mut contexts);
    }
    if !mouse.pressed(MouseButton::Right) {
        *panning = false;
        return;
    }
    if !*panning || mouse_motion.delta == Vec2::ZERO {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let viewport = Viewport::new(window.width() as f64, window.height() as f64);
    controller
        .camera_mut()
        .pan(mouse_motion.delta.as_dvec2(), viewport);
}

/// Handle mouse scroll wheel for zoom.
fn scroll_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut controller: ResMut<InteractionController>,
    mut contexts: EguiContexts,
) {
    // Skip if no scroll input
    if mouse_scroll.delta.y == 0.0 || egui_wants_pointer(&mut contexts) {
        return;
    }

    // Logarithmic zoom: multiply distance by a factor based on scroll direction
    let factor = (1.0 - mouse_scroll.delta.y as f64 * ZOOM_SPEED).max(0.1);
    controller.camera_mut().zoom(factor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_in_place_is_click() {
        let mut drag = DragState::default();
        drag.press(Vec2::new(100.0, 100.0));
        assert!(!drag.update(Vec2::new(102.0, 101.0)));
        assert!(drag.release());
        assert!(drag.pressed_at.is_none());
    }

    #[test]
    fn test_moving_past_threshold_is_drag() {
        let mut drag = DragState::default();
        drag.press(Vec2::new(100.0, 100.0));
        assert!(drag.update(Vec2::new(120.0, 100.0)));
        // Coming back does not turn it into a click again
        assert!(drag.update(Vec2::new(100.0, 100.0)));
        assert!(!drag.release());
    }

    #[test]
    fn test_release_without_press_is_not_click() {
        let mut drag = DragState::default();
        assert!(!drag.release());
    }

    #[test]
    fn test_stepped_speed_stays_in_range() {
        assert_eq!(stepped_speed(0.1, true), 0.2);
        assert_eq!(stepped_speed(0.1, false), 0.05);
        assert_eq!(stepped_speed(0.8, true), SPEED_MAX);
        assert_eq!(stepped_speed(0.015, false), SPEED_MIN);
    }
}
