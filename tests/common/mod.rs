//! Common test utilities for integration tests.

use orrery::controller::InteractionController;
use orrery::registry::{BodyDescriptor, BodyRegistry};
use orrery::scene::SceneConfig;

/// Sun, Earth and the Moon with the catalog's display values.
pub fn sun_earth_moon() -> BodyRegistry {
    BodyRegistry::new(vec![
        BodyDescriptor::star("Sun", 696_340.0, 30.0, 27.0).with_glow([1.0, 1.0, 0.0]),
        BodyDescriptor::planet("Earth", 6_371.0, 6.4, 150.0, 1.0, 1.0).with_real_distance(149.6),
        BodyDescriptor::satellite("Moon", "Earth", 1_737.4, 1.7, 0.384, 0.073, 27.3),
    ])
    .expect("scenario catalog is valid")
}

/// Controller over [`sun_earth_moon`] with default display constants.
pub fn scenario_controller() -> InteractionController {
    InteractionController::new(sun_earth_moon(), &SceneConfig::default())
        .expect("scenario composes")
}
