//! Camera gaze queries.
//!
//! Everything here is a pure function of a camera pose and a target; nothing
//! is cached between calls. None of the tests account for occlusion or
//! culling, so "in view" means "potentially visible".

use glam::Vec3;

use crate::traits::{PoseProvider, PositionProvider};

/// Whether a world point lands inside the camera's view.
///
/// Points behind the camera are never in view. Otherwise the point counts as
/// in view when *either* viewport coordinate lies strictly inside (0, 1),
/// so a point far off to the side at screen-centre height still passes.
pub fn is_within_view<P: PoseProvider + ?Sized>(camera: &P, target_position: Vec3) -> bool {
    let viewport = camera.world_to_viewport(target_position);

    if viewport.z < 0.0 {
        return false;
    }

    let inside = |v: f32| v > 0.0 && v < 1.0;
    inside(viewport.x) || inside(viewport.y)
}

pub fn is_object_within_view<P, T>(camera: &P, object: &T) -> bool
where
    P: PoseProvider + ?Sized,
    T: PositionProvider + ?Sized,
{
    is_within_view(camera, object.world_position())
}

/// Forward direction of the camera in world space.
///
/// Derived by unprojecting the screen centre onto the near plane so it always
/// agrees with `world_to_viewport`.
pub fn facing_direction<P: PoseProvider + ?Sized>(camera: &P) -> Vec3 {
    let centre = camera.viewport_to_world(Vec3::new(0.5, 0.5, camera.near_clip()));
    (centre - camera.position()).normalize_or_zero()
}

/// Unit direction from the camera to `position`, or `Vec3::ZERO` when the
/// two coincide.
pub fn direction_to_position<P: PoseProvider + ?Sized>(camera: &P, position: Vec3) -> Vec3 {
    (position - camera.position()).normalize_or_zero()
}

pub fn direction_to_object<P, T>(camera: &P, object: &T) -> Vec3
where
    P: PoseProvider + ?Sized,
    T: PositionProvider + ?Sized,
{
    direction_to_position(camera, object.world_position())
}

/// Angle in degrees between the camera's facing direction and the direction
/// to `position`. A target sitting on the camera reports 90 degrees.
pub fn angle_to_position<P: PoseProvider + ?Sized>(camera: &P, position: Vec3) -> f32 {
    let camera_dir = facing_direction(camera);
    let target_dir = direction_to_position(camera, position);
    camera_dir.dot(target_dir).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Whether `position` lies inside the cone of half-angle
/// `angle_threshold_degrees` around the camera's facing direction.
pub fn is_facing_position<P: PoseProvider + ?Sized>(
    camera: &P,
    position: Vec3,
    angle_threshold_degrees: f32,
) -> bool {
    angle_to_position(camera, position) < angle_threshold_degrees
}

pub fn is_facing_object<P, T>(camera: &P, object: &T, angle_threshold_degrees: f32) -> bool
where
    P: PoseProvider + ?Sized,
    T: PositionProvider + ?Sized,
{
    is_facing_position(camera, object.world_position(), angle_threshold_degrees)
}

/// Method-call form of the gaze queries for any camera pose
pub trait Gaze: PoseProvider {
    fn is_within_view(&self, target_position: Vec3) -> bool {
        is_within_view(self, target_position)
    }

    fn is_object_within_view<T: PositionProvider + ?Sized>(&self, object: &T) -> bool {
        is_object_within_view(self, object)
    }

    fn facing_direction(&self) -> Vec3 {
        facing_direction(self)
    }

    fn direction_to_position(&self, position: Vec3) -> Vec3 {
        direction_to_position(self, position)
    }

    fn direction_to_object<T: PositionProvider + ?Sized>(&self, object: &T) -> Vec3 {
        direction_to_object(self, object)
    }

    fn is_facing_position(&self, position: Vec3, angle_threshold_degrees: f32) -> bool {
        is_facing_position(self, position, angle_threshold_degrees)
    }

    fn is_facing_object<T: PositionProvider + ?Sized>(
        &self,
        object: &T,
        angle_threshold_degrees: f32,
    ) -> bool {
        is_facing_object(self, object, angle_threshold_degrees)
    }
}

impl<P: PoseProvider + ?Sized> Gaze for P {}
