//! Simulation clock and the per-frame driver.
//!
//! The clock turns host wall-clock readings into elapsed simulated time.
//! Pausing does not stop or rewind the counter; it only suppresses the
//! kinematics update downstream.

use bevy::prelude::*;

use crate::controller::InteractionController;
use crate::types::{OrrerySet, SimulationError};

/// Time scale at startup; also the reference for the "1.0x" speed label.
pub const DEFAULT_TIME_SCALE: f64 = 0.1;

/// Lower bound of the speed slider.
pub const SPEED_MIN: f64 = 0.01;

/// Upper bound of the speed slider.
pub const SPEED_MAX: f64 = 1.0;

/// Tracks play/pause state, the time-scale multiplier and elapsed time.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    /// Wall-clock reading of the first tick.
    origin: Option<f64>,
    /// Seconds since `origin`, never decreasing.
    elapsed: f64,
    time_scale: f64,
    playing: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            origin: None,
            elapsed: 0.0,
            time_scale: DEFAULT_TIME_SCALE,
            playing: true,
        }
    }
}

impl SimulationClock {
    /// Feed a wall-clock reading in seconds and return elapsed simulated time.
    ///
    /// The first call fixes the origin and returns 0. Readings that go
    /// backwards leave the counter where it was.
    pub fn tick(&mut self, now: f64) -> f64 {
        let origin = *self.origin.get_or_insert(now);
        self.elapsed = self.elapsed.max(now - origin);
        self.elapsed
    }

    /// Elapsed simulated time as of the last tick.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Set the time-scale multiplier. Non-positive or non-finite values are
    /// rejected and the previous scale is kept.
    pub fn set_time_scale(&mut self, value: f64) -> Result<(), SimulationError> {
        if !(value > 0.0 && value.is_finite()) {
            return Err(SimulationError::InvalidArgument {
                name: "time scale",
                value,
            });
        }
        self.time_scale = value;
        Ok(())
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Flip play/pause and return the new state.
    pub fn toggle_playing(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Time scale relative to the default.
    pub fn speed_multiplier(&self) -> f64 {
        self.time_scale / DEFAULT_TIME_SCALE
    }

    /// Human-readable speed, e.g. `"1.0x"`.
    pub fn speed_label(&self) -> String {
        format!("{:.1}x", self.speed_multiplier())
    }
}

/// Plugin driving the simulation once per frame.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (OrrerySet::Input, OrrerySet::Advance, OrrerySet::Sync).chain(),
        )
        .add_systems(Update, advance_simulation.in_set(OrrerySet::Advance));
    }
}

/// Feed the host's elapsed wall-clock time into the controller.
///
/// Reads `Time<Real>`: the virtual clock caps each step, so after a stall it
/// would lag the wall clock for good. Play/pause lives in the simulation
/// clock so that elapsed time keeps running while paused.
fn advance_simulation(mut controller: ResMut<InteractionController>, time: Res<Time<Real>>) {
    controller.frame(time.elapsed_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.tick(1_700_000_000.0), 0.0);
        assert_eq!(clock.tick(1_700_000_002.5), 2.5);
    }

    #[test]
    fn test_pause_does_not_freeze_counter() {
        let mut clock = SimulationClock::default();
        clock.tick(10.0);
        clock.set_playing(false);
        assert_eq!(clock.tick(13.0), 3.0);
        clock.set_playing(true);
        assert_eq!(clock.tick(14.0), 4.0);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = SimulationClock::default();
        clock.tick(100.0);
        clock.tick(105.0);
        assert_eq!(clock.tick(103.0), 5.0);
        assert_eq!(clock.elapsed(), 5.0);
    }

    #[test]
    fn test_rejects_non_positive_time_scale() {
        let mut clock = SimulationClock::default();

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = clock.set_time_scale(bad).unwrap_err();
            assert!(matches!(err, SimulationError::InvalidArgument { .. }));
            assert_eq!(clock.time_scale(), DEFAULT_TIME_SCALE);
        }

        clock.set_time_scale(0.5).unwrap();
        assert_eq!(clock.time_scale(), 0.5);
    }

    #[test]
    fn test_toggle_playing_twice_restores() {
        let mut clock = SimulationClock::default();
        assert!(!clock.toggle_playing());
        assert!(clock.toggle_playing());
    }

    #[test]
    fn test_speed_label() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.speed_label(), "1.0x");

        clock.set_time_scale(0.25).unwrap();
        assert_eq!(clock.speed_label(), "2.5x");

        clock.set_time_scale(SPEED_MIN).unwrap();
        assert_eq!(clock.speed_label(), "0.1x");
    }
}
