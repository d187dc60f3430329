//! Core types shared across the orrery: errors, viewport and simulation state.

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::time::SimulationClock;

/// System set for ordering the per-frame work.
///
/// Input must be applied before the clock advances so that a pause issued
/// this frame suppresses this frame's kinematics, and world transforms are
/// copied onto entities only after the kinematics ran.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrrerySet {
    /// Keyboard shortcuts, camera controls and picking.
    Input,
    /// Clock tick and kinematics update.
    Advance,
    /// Copy placement graph transforms onto render entities.
    Sync,
}

/// Reason a body descriptor was rejected at load time.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DescriptorFault {
    #[error("orbital period must be non-zero")]
    ZeroOrbitalPeriod,

    #[error("rotation period must be non-zero")]
    ZeroRotationPeriod,

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("orbiting body has no {0}")]
    MissingOrbit(&'static str),

    #[error("parent body '{0}' is not registered")]
    DanglingParent(String),

    #[error("parent body '{0}' is itself a satellite")]
    NestedSatellite(String),

    #[error("body orbits itself")]
    SelfParent,

    #[error("name is already registered")]
    DuplicateName,

    #[error("ring radii must satisfy 0 < inner ({inner}) < outer ({outer})")]
    InvalidRings { inner: f64, outer: f64 },
}

/// Errors surfaced by the simulation core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("unknown body '{0}'")]
    NotFound(String),

    #[error("invalid descriptor for '{body}': {fault}")]
    InvalidDescriptor { body: String, fault: DescriptorFault },

    #[error("invalid {name}: {value} (must be positive)")]
    InvalidArgument { name: &'static str, value: f64 },
}

/// Size of the drawing surface in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// A viewport with no area cannot be picked into.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Convert a pointer position (origin top-left, y down) to normalized
    /// device coordinates in [-1, 1] with y up.
    pub fn to_ndc(&self, pointer: DVec2) -> DVec2 {
        DVec2::new(
            pointer.x / self.width * 2.0 - 1.0,
            -(pointer.y / self.height) * 2.0 + 1.0,
        )
    }

    /// Inverse of [`Viewport::to_ndc`].
    pub fn from_ndc(&self, ndc: DVec2) -> DVec2 {
        DVec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// The single process-wide simulation state.
///
/// Owned by [`crate::controller::InteractionController`]; mutated only in
/// response to discrete user actions, read every frame.
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// Play/pause, time scale and the elapsed time counter.
    pub clock: SimulationClock,
    /// Name of the body whose facts are on display.
    pub selected_body: Option<String>,
    /// Whether orbit rings are drawn.
    pub show_orbits: bool,
    /// Whether body name labels are drawn and pickable.
    pub show_labels: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            clock: SimulationClock::default(),
            selected_body: None,
            show_orbits: true,
            show_labels: true,
        }
    }
}

impl SimulationState {
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn time_scale(&self) -> f64 {
        self.clock.time_scale()
    }
}
