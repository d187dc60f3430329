//! Orrery - Solar System Visualization
//!
//! A library crate providing the body catalog, placement graph, kinematics,
//! picking and interaction controller, plus the Bevy plugins that display
//! them.

pub mod camera;
pub mod controller;
pub mod input;
pub mod kinematics;
pub mod picking;
pub mod registry;
pub mod render;
pub mod scene;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
