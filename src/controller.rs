//! Interaction controller: the owner of all mutable simulation state.
//!
//! User actions arrive as discrete [`Action`]s; the host calls
//! [`InteractionController::frame`] once per display refresh. An action that
//! fails leaves the previous state untouched.

use bevy::log::{debug, info, warn};
use bevy::math::DVec2;
use bevy::prelude::*;

use crate::camera::ViewCamera;
use crate::kinematics::Kinematics;
use crate::picking;
use crate::registry::{BodyDescriptor, BodyFacts, BodyRegistry};
use crate::scene::{PlacementGraph, SceneConfig, compose};
use crate::types::{SimulationError, SimulationState, Viewport};

/// Discrete user actions.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    TogglePlay,
    ToggleOrbits,
    ToggleLabels,
    /// New time scale, already constrained to the speed slider's range.
    SetSpeed(f64),
    /// Camera back to its default position and target.
    ResetView,
    /// Show facts for a body, or hide the info display with `None`.
    Select(Option<String>),
}

/// Owns the registry, placement graph, camera and [`SimulationState`].
#[derive(Resource, Debug)]
pub struct InteractionController {
    registry: BodyRegistry,
    graph: PlacementGraph,
    kinematics: Kinematics,
    state: SimulationState,
    camera: ViewCamera,
}

impl InteractionController {
    /// Compose the scene for `registry`. Fails without building anything if
    /// a satellite's host is missing.
    pub fn new(registry: BodyRegistry, config: &SceneConfig) -> Result<Self, SimulationError> {
        let graph = compose(&registry, config)?;
        Ok(Self {
            registry,
            graph,
            kinematics: Kinematics::new(config),
            state: SimulationState::default(),
            camera: ViewCamera::default(),
        })
    }

    /// Controller for the built-in solar system catalog.
    pub fn solar_system() -> Result<Self, SimulationError> {
        Self::new(BodyRegistry::solar_system()?, &SceneConfig::default())
    }

    /// Apply one user action.
    pub fn apply(&mut self, action: Action) -> Result<(), SimulationError> {
        let result = match action.clone() {
            Action::TogglePlay => {
                self.toggle_play();
                Ok(())
            }
            Action::ToggleOrbits => {
                self.toggle_orbits();
                Ok(())
            }
            Action::ToggleLabels => {
                self.toggle_labels();
                Ok(())
            }
            Action::SetSpeed(value) => self.set_speed(value),
            Action::ResetView => {
                self.reset_view();
                Ok(())
            }
            Action::Select(name) => self.select(name.as_deref()),
        };

        if let Err(err) = &result {
            warn!("Rejected {:?}: {}", action, err);
        }
        result
    }

    pub fn toggle_play(&mut self) -> bool {
        let playing = self.state.clock.toggle_playing();
        info!("Simulation {}", if playing { "running" } else { "paused" });
        playing
    }

    pub fn toggle_orbits(&mut self) -> bool {
        self.state.show_orbits = !self.state.show_orbits;
        self.graph.set_orbits_visible(self.state.show_orbits);
        info!("Orbits {}", if self.state.show_orbits { "shown" } else { "hidden" });
        self.state.show_orbits
    }

    pub fn toggle_labels(&mut self) -> bool {
        self.state.show_labels = !self.state.show_labels;
        self.graph.set_labels_visible(self.state.show_labels);
        info!("Labels {}", if self.state.show_labels { "shown" } else { "hidden" });
        self.state.show_labels
    }

    pub fn set_speed(&mut self, value: f64) -> Result<(), SimulationError> {
        self.state.clock.set_time_scale(value)?;
        info!("Time scale: {} ({})", value, self.state.clock.speed_label());
        Ok(())
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
        info!("View reset");
    }

    /// Select a body by name, or clear the selection with `None`.
    pub fn select(&mut self, name: Option<&str>) -> Result<(), SimulationError> {
        match name {
            Some(name) => {
                let body = self.registry.get_body(name)?;
                info!("Selected {}", body.name);
                self.state.selected_body = Some(body.name.clone());
            }
            None => {
                if self.state.selected_body.take().is_some() {
                    info!("Selection cleared");
                }
            }
        }
        Ok(())
    }

    /// Resolve a pointer position and select whatever is under it.
    /// A miss clears the selection.
    pub fn pick(&mut self, pointer: DVec2, viewport: Viewport) -> Option<&BodyDescriptor> {
        let picked = picking::resolve(pointer, viewport, &self.camera, &self.graph, &self.registry)
            .map(|body| body.name.clone());
        debug!("Pointer at ({:.0}, {:.0}) picked {:?}", pointer.x, pointer.y, picked);

        // The name came from the registry, so selecting it cannot fail.
        self.select(picked.as_deref()).ok()?;
        self.selected_body()
    }

    /// One frame: tick the clock and, when playing, move every body.
    /// Returns elapsed simulated time.
    pub fn frame(&mut self, now: f64) -> f64 {
        let elapsed = self.state.clock.tick(now);
        if self.state.is_playing() {
            self.kinematics.step(
                &mut self.graph,
                &self.registry,
                elapsed,
                self.state.time_scale(),
            );
        }
        elapsed
    }

    pub fn selected_body(&self) -> Option<&BodyDescriptor> {
        self.state
            .selected_body
            .as_deref()
            .and_then(|name| self.registry.get_body(name).ok())
    }

    /// Facts for the info display, `None` when it is hidden.
    pub fn selected_facts(&self) -> Option<BodyFacts> {
        self.selected_body().map(BodyFacts::from)
    }

    pub fn info_visible(&self) -> bool {
        self.state.selected_body.is_some()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn graph(&self) -> &PlacementGraph {
        &self.graph
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    /// Camera controls move the rig directly; they are not simulation actions.
    pub fn camera_mut(&mut self) -> &mut ViewCamera {
        &mut self.camera
    }
}
