//! Static catalog of celestial bodies.
//!
//! Descriptors are validated once when the registry is built and never
//! mutated afterwards. Satellites reference their host body by name.

pub mod data;
mod facts;

use std::collections::HashMap;

use crate::types::{DescriptorFault, SimulationError};

pub use data::solar_system_bodies;
pub use facts::{BodyFacts, Fact, RotationFact, format_grouped};

/// Ring system around a planet, in display units before size scaling.
#[derive(Clone, Debug, PartialEq)]
pub struct RingParams {
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Texture asset path for the rings.
    pub texture: Option<String>,
}

/// How a body moves, derived from which orbital fields it declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyClass {
    /// Fixed at the origin, only spins.
    Star,
    /// Revolves around the origin on a closed-form orbit.
    Planet,
    /// Revolves around a host body through a pivot node.
    Satellite,
}

/// Physical and display parameters of one body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescriptor {
    /// Unique identity and display name.
    pub name: String,
    /// Physical radius in kilometers.
    pub radius: f64,
    /// Radius used for rendering, pre-scaled for visibility.
    pub display_radius: f64,
    /// Orbital period in simulated years.
    pub orbital_period: Option<f64>,
    /// Rotation period in simulated days; negative means retrograde.
    pub rotation_period: Option<f64>,
    /// Orbital distance in display units (from the host for satellites).
    pub distance: Option<f64>,
    /// Real distance in millions of kilometers, for display only.
    pub real_distance: Option<f64>,
    /// Unitless orbital tilt factor.
    pub inclination: f64,
    /// Host body for satellites.
    pub parent: Option<String>,
    pub rings: Option<RingParams>,
    /// Surface texture asset path.
    pub texture: Option<String>,
    /// sRGB base color used alongside the texture.
    pub color: [f32; 3],
    /// Halo color; stars only.
    pub glow_color: Option<[f32; 3]>,
}

impl BodyDescriptor {
    fn base(name: &str, radius: f64, display_radius: f64) -> Self {
        Self {
            name: name.to_string(),
            radius,
            display_radius,
            orbital_period: None,
            rotation_period: None,
            distance: None,
            real_distance: None,
            inclination: 0.0,
            parent: None,
            rings: None,
            texture: None,
            color: [1.0, 1.0, 1.0],
            glow_color: None,
        }
    }

    /// A star sitting at the origin.
    pub fn star(name: &str, radius: f64, display_radius: f64, rotation_period: f64) -> Self {
        Self {
            rotation_period: Some(rotation_period),
            ..Self::base(name, radius, display_radius)
        }
    }

    /// A body orbiting the star.
    pub fn planet(
        name: &str,
        radius: f64,
        display_radius: f64,
        distance: f64,
        orbital_period: f64,
        rotation_period: f64,
    ) -> Self {
        Self {
            distance: Some(distance),
            real_distance: Some(distance),
            orbital_period: Some(orbital_period),
            rotation_period: Some(rotation_period),
            ..Self::base(name, radius, display_radius)
        }
    }

    /// A body orbiting `parent`.
    pub fn satellite(
        name: &str,
        parent: &str,
        radius: f64,
        display_radius: f64,
        distance: f64,
        orbital_period: f64,
        rotation_period: f64,
    ) -> Self {
        Self {
            parent: Some(parent.to_string()),
            ..Self::planet(name, radius, display_radius, distance, orbital_period, rotation_period)
        }
    }

    pub fn with_real_distance(mut self, real_distance: f64) -> Self {
        self.real_distance = Some(real_distance);
        self
    }

    pub fn with_inclination(mut self, inclination: f64) -> Self {
        self.inclination = inclination;
        self
    }

    pub fn with_rings(mut self, inner_radius: f64, outer_radius: f64) -> Self {
        self.rings = Some(RingParams {
            inner_radius,
            outer_radius,
            texture: None,
        });
        self
    }

    pub fn with_ring_texture(mut self, path: &str) -> Self {
        if let Some(rings) = self.rings.as_mut() {
            rings.texture = Some(path.to_string());
        }
        self
    }

    pub fn with_texture(mut self, path: &str) -> Self {
        self.texture = Some(path.to_string());
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_glow(mut self, color: [f32; 3]) -> Self {
        self.glow_color = Some(color);
        self
    }

    pub fn without_rotation(mut self) -> Self {
        self.rotation_period = None;
        self
    }

    pub fn class(&self) -> BodyClass {
        if self.parent.is_some() {
            BodyClass::Satellite
        } else if self.orbital_period.is_some() || self.distance.is_some() {
            BodyClass::Planet
        } else {
            BodyClass::Star
        }
    }

    pub fn is_satellite(&self) -> bool {
        self.class() == BodyClass::Satellite
    }

    pub fn is_retrograde(&self) -> bool {
        self.rotation_period.is_some_and(|p| p < 0.0)
    }

    /// Checks that only need this descriptor.
    fn validate_fields(&self) -> Result<(), DescriptorFault> {
        check_finite("radius", self.radius)?;
        check_finite("display radius", self.display_radius)?;
        check_finite("inclination", self.inclination)?;

        if let Some(period) = self.orbital_period {
            check_finite("orbital period", period)?;
            if period == 0.0 {
                return Err(DescriptorFault::ZeroOrbitalPeriod);
            }
        }
        if let Some(period) = self.rotation_period {
            check_finite("rotation period", period)?;
            if period == 0.0 {
                return Err(DescriptorFault::ZeroRotationPeriod);
            }
        }
        if let Some(distance) = self.distance {
            check_finite("distance", distance)?;
        }

        if self.class() != BodyClass::Star {
            if self.orbital_period.is_none() {
                return Err(DescriptorFault::MissingOrbit("orbital period"));
            }
            if self.distance.is_none() {
                return Err(DescriptorFault::MissingOrbit("distance"));
            }
        }

        if let Some(rings) = &self.rings {
            let (inner, outer) = (rings.inner_radius, rings.outer_radius);
            if !(inner > 0.0 && inner < outer && outer.is_finite()) {
                return Err(DescriptorFault::InvalidRings { inner, outer });
            }
        }

        if self.parent.as_deref() == Some(self.name.as_str()) {
            return Err(DescriptorFault::SelfParent);
        }

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), DescriptorFault> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DescriptorFault::NonFinite { field, value })
    }
}

/// Read-only, validated collection of body descriptors.
#[derive(Clone, Debug)]
pub struct BodyRegistry {
    bodies: Vec<BodyDescriptor>,
    index: HashMap<String, usize>,
}

impl BodyRegistry {
    /// Validate and index `bodies`, keeping their order.
    pub fn new(bodies: Vec<BodyDescriptor>) -> Result<Self, SimulationError> {
        let mut index = HashMap::with_capacity(bodies.len());

        for (i, body) in bodies.iter().enumerate() {
            body.validate_fields().map_err(|fault| invalid(body, fault))?;
            if index.insert(body.name.clone(), i).is_some() {
                return Err(invalid(body, DescriptorFault::DuplicateName));
            }
        }

        // Parent references can point forward in the list, so check them
        // once every name is indexed.
        for body in &bodies {
            let Some(parent) = body.parent.as_deref() else {
                continue;
            };
            let Some(&host) = index.get(parent) else {
                return Err(invalid(body, DescriptorFault::DanglingParent(parent.to_string())));
            };
            if bodies[host].is_satellite() {
                return Err(invalid(body, DescriptorFault::NestedSatellite(parent.to_string())));
            }
        }

        Ok(Self { bodies, index })
    }

    /// The built-in solar system catalog.
    pub fn solar_system() -> Result<Self, SimulationError> {
        Self::new(solar_system_bodies())
    }

    /// All bodies in registration order.
    pub fn all_bodies(&self) -> &[BodyDescriptor] {
        &self.bodies
    }

    pub fn get_body(&self, name: &str) -> Result<&BodyDescriptor, SimulationError> {
        self.index
            .get(name)
            .map(|&i| &self.bodies[i])
            .ok_or_else(|| SimulationError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Satellites orbiting `name`, in registration order.
    pub fn satellites_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a BodyDescriptor> + 'a {
        self.bodies
            .iter()
            .filter(move |b| b.parent.as_deref() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn invalid(body: &BodyDescriptor, fault: DescriptorFault) -> SimulationError {
    SimulationError::InvalidDescriptor {
        body: body.name.clone(),
        fault,
    }
}
