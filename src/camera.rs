//! Camera for the orrery.
//!
//! [`ViewCamera`] is an engine-independent perspective rig orbiting a target
//! point. The controller owns it, picking builds rays from it, and
//! [`CameraPlugin`] mirrors it onto the Bevy camera every frame.

use bevy::math::{DVec2, DVec3};
use bevy::prelude::*;

use crate::controller::InteractionController;
use crate::types::{OrrerySet, Viewport};

/// Camera position after startup and after a view reset.
pub const DEFAULT_CAMERA_POSITION: DVec3 = DVec3::new(0.0, 200.0, 400.0);

/// Point the camera looks at after a view reset.
pub const DEFAULT_CAMERA_TARGET: DVec3 = DVec3::ZERO;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f64 = 60.0;

pub const NEAR_PLANE: f64 = 0.1;

pub const FAR_PLANE: f64 = 10_000.0;

/// Closest the camera may get to its target.
pub const MIN_DISTANCE: f64 = 5.0;

/// Furthest the camera may get from its target.
pub const MAX_DISTANCE: f64 = 8_000.0;

/// Keeps the camera off the poles where `looking_at` degenerates.
const MAX_PITCH: f64 = 1.5;

/// A ray in world space with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Perspective camera orbiting a target point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewCamera {
    pub position: DVec3,
    pub target: DVec3,
    /// Vertical field of view in radians.
    pub fov_y: f64,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self {
            position: DEFAULT_CAMERA_POSITION,
            target: DEFAULT_CAMERA_TARGET,
            fov_y: FOV_DEGREES.to_radians(),
        }
    }
}

impl ViewCamera {
    /// Restore the default position and target.
    pub fn reset(&mut self) {
        self.position = DEFAULT_CAMERA_POSITION;
        self.target = DEFAULT_CAMERA_TARGET;
    }

    pub fn forward(&self) -> DVec3 {
        (self.target - self.position).normalize()
    }

    /// Ray from the camera through a point given in normalized device
    /// coordinates.
    pub fn ray_through_ndc(&self, ndc: DVec2, aspect: f64) -> Ray {
        let forward = self.forward();
        let right = forward.cross(DVec3::Y).normalize();
        let up = right.cross(forward);
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * aspect;

        Ray::new(
            self.position,
            forward + right * (ndc.x * half_width) + up * (ndc.y * half_height),
        )
    }

    /// Depth of `point` along the view direction.
    fn depth(&self, point: DVec3) -> f64 {
        (point - self.position).dot(self.forward())
    }

    /// Pointer position of a world point; `None` behind the near plane.
    pub fn project(&self, point: DVec3, viewport: Viewport) -> Option<DVec2> {
        let depth = self.depth(point);
        if depth <= NEAR_PLANE {
            return None;
        }

        let forward = self.forward();
        let right = forward.cross(DVec3::Y).normalize();
        let up = right.cross(forward);
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * viewport.aspect();

        let offset = point - self.position;
        let ndc = DVec2::new(
            offset.dot(right) / (depth * half_width),
            offset.dot(up) / (depth * half_height),
        );
        Some(viewport.from_ndc(ndc))
    }

    /// Screen pixels covered by one world unit at `point`'s depth.
    pub fn pixels_per_unit(&self, point: DVec3, viewport: Viewport) -> Option<f64> {
        let depth = self.depth(point);
        (depth > NEAR_PLANE).then(|| viewport.height / (2.0 * (self.fov_y * 0.5).tan() * depth))
    }

    /// Ray from the camera through a pointer position in the viewport.
    pub fn ray_through_pointer(&self, pointer: DVec2, viewport: Viewport) -> Ray {
        self.ray_through_ndc(viewport.to_ndc(pointer), viewport.aspect())
    }

    /// Orbit around the target by `yaw` and `pitch` radians.
    pub fn orbit(&mut self, yaw: f64, pitch: f64) {
        let offset = self.position - self.target;
        let distance = offset.length();
        let current_yaw = offset.x.atan2(offset.z);
        let current_pitch = (offset.y / distance).asin();

        let yaw = current_yaw + yaw;
        let pitch = (current_pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);

        self.position = self.target
            + DVec3::new(
                distance * pitch.cos() * yaw.sin(),
                distance * pitch.sin(),
                distance * pitch.cos() * yaw.cos(),
            );
    }

    /// Slide position and target together so the point under the pointer
    /// follows a drag of `delta` pixels.
    pub fn pan(&mut self, delta: DVec2, viewport: Viewport) {
        let Some(scale) = self.pixels_per_unit(self.target, viewport) else {
            return;
        };
        let forward = self.forward();
        let right = forward.cross(DVec3::Y).normalize();
        let up = right.cross(forward);

        // Screen y grows downward
        let shift = (-right * delta.x + up * delta.y) / scale;
        self.position += shift;
        self.target += shift;
    }

    /// Scale the distance to the target by `factor`, within limits.
    pub fn zoom(&mut self, factor: f64) {
        let offset = self.position - self.target;
        let distance = (offset.length() * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + offset.normalize() * distance;
    }

    pub fn distance(&self) -> f64 {
        (self.position - self.target).length()
    }
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing the Bevy camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, sync_camera.in_set(OrrerySet::Sync));
    }
}

/// Spawn the main camera with a perspective projection matching
/// [`ViewCamera`], so picking rays line up with what is drawn.
fn setup_camera(mut commands: Commands) {
    let view = ViewCamera::default();
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: view.fov_y as f32,
            near: NEAR_PLANE as f32,
            far: FAR_PLANE as f32,
            ..default()
        }),
        camera_transform(&view),
        MainCamera,
    ));
}

/// Mirror the controller's camera rig onto the Bevy camera.
fn sync_camera(
    controller: Res<InteractionController>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = camera_transform(controller.camera());
}

fn camera_transform(view: &ViewCamera) -> Transform {
    Transform::from_translation(view.position.as_vec3()).looking_at(view.target.as_vec3(), Vec3::Y)
}
