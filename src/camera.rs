use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::PoseProvider;

pub const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;
pub const DEFAULT_NEAR: f32 = 0.3;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Pitch stays just short of straight up/down so the view basis never collapses
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 1e-3;

const DEPTH_EPSILON: f32 = 1e-8;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraConfigError {
    #[error("field of view must be within (0, 180) degrees, got {0}")]
    FieldOfView(f32),
    #[error("aspect ratio must be positive, got {0}")]
    Aspect(f32),
    #[error("near clip must be positive, got {0}")]
    Near(f32),
    #[error("far clip {far} must be beyond near clip {near}")]
    Far { near: f32, far: f32 },
}

/// Perspective camera described by position, yaw and pitch
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            fov_y: DEFAULT_FOV_Y_DEGREES.to_radians(),
            aspect: DEFAULT_ASPECT,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }

    /// Camera at `eye` oriented towards `target`
    /// Falls back to yaw = pitch = 0 when the two points coincide
    pub fn look_at(eye: Vec3, target: Vec3) -> Self {
        let dir = (target - eye).normalize_or_zero();
        if dir == Vec3::ZERO {
            return Self::new(eye, 0.0, 0.0);
        }
        Self::new(eye, dir.x.atan2(dir.z), dir.y.clamp(-1.0, 1.0).asin())
    }

    /// Replace the lens parameters, rejecting values that break the projection
    pub fn with_projection(
        mut self,
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, CameraConfigError> {
        let fov_degrees = fov_y.to_degrees();
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(CameraConfigError::FieldOfView(fov_degrees));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(CameraConfigError::Aspect(aspect));
        }
        if !(near > 0.0 && near.is_finite()) {
            return Err(CameraConfigError::Near(near));
        }
        if !(far > near) {
            return Err(CameraConfigError::Far { near, far });
        }
        self.fov_y = fov_y;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
        Ok(self)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn forward(&self) -> Vec3 {
        let pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        Vec3::new(
            self.yaw.sin() * pitch.cos(),
            pitch.sin(),
            self.yaw.cos() * pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Rotate around the world Y axis
    pub fn turn(&mut self, yaw_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    fn half_extents(&self) -> (f32, f32) {
        let tan_half = (self.fov_y * 0.5).tan();
        (tan_half * self.aspect, tan_half)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0)
    }
}

impl PoseProvider for Camera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn world_to_viewport(&self, point: Vec3) -> Vec3 {
        let forward = self.forward();
        let right = self.right();
        let up = right.cross(forward);

        let rel = point - self.position;
        let depth = rel.dot(forward);
        // Keep points on the camera plane finite, same trick as the ray/AABB slab test
        let d = if depth.abs() < DEPTH_EPSILON {
            DEPTH_EPSILON.copysign(depth)
        } else {
            depth
        };

        let (half_w, half_h) = self.half_extents();
        let ndc_x = rel.dot(right) / (d * half_w);
        let ndc_y = rel.dot(up) / (d * half_h);

        Vec3::new(0.5 + 0.5 * ndc_x, 0.5 + 0.5 * ndc_y, depth)
    }

    fn viewport_to_world(&self, viewport: Vec3) -> Vec3 {
        let forward = self.forward();
        let right = self.right();
        let up = right.cross(forward);

        let (half_w, half_h) = self.half_extents();
        let depth = viewport.z;
        let ndc_x = viewport.x * 2.0 - 1.0;
        let ndc_y = viewport.y * 2.0 - 1.0;

        self.position
            + forward * depth
            + right * (ndc_x * half_w * depth)
            + up * (ndc_y * half_h * depth)
    }

    fn near_clip(&self) -> f32 {
        self.near
    }
}

/// Camera description as it appears in a scene file, angles in degrees
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            aspect: DEFAULT_ASPECT,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

impl CameraSettings {
    pub fn build(&self) -> Result<Camera, CameraConfigError> {
        Camera::new(
            self.position,
            self.yaw_degrees.to_radians(),
            self.pitch_degrees.to_radians(),
        )
        .with_projection(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}
