use glam::Vec3;

/// Camera pose abstraction - everything the gaze queries need from a camera
pub trait PoseProvider {
    /// Camera position in world space
    fn position(&self) -> Vec3;

    /// Project a world point into viewport space
    /// x/y span the screen in [0, 1], z is depth along the forward axis
    fn world_to_viewport(&self, point: Vec3) -> Vec3;

    /// Inverse of `world_to_viewport`
    fn viewport_to_world(&self, viewport: Vec3) -> Vec3;

    /// Distance from the camera to the near clip plane
    fn near_clip(&self) -> f32;
}
