use glam::Vec3;

/// Anything with a world-space position the camera can look at
pub trait PositionProvider {
    fn world_position(&self) -> Vec3;
}

impl PositionProvider for Vec3 {
    fn world_position(&self) -> Vec3 {
        *self
    }
}
