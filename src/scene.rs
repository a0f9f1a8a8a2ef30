use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{Camera, CameraConfigError, CameraSettings};
use crate::fade::{FadeConfig, FadeConfigError, FadeController, FadePhase, LabelId};
use crate::gaze;
use crate::label::TextLabel;
use crate::math::{hsv_to_rgb, Rgba};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid camera: {0}")]
    Camera(#[from] CameraConfigError),
    #[error("invalid fade config: {0}")]
    Fade(#[from] FadeConfigError),
    #[error("scene has no labels")]
    Empty,
}

/// Scene file contents: one camera, one fade config shared by every label
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraSettings,
    pub fade: FadeConfig,
    pub labels: Vec<TextLabel>,
}

/// Reads a scene description from a JSON file
pub fn load_scene(path: impl AsRef<Path>) -> Result<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene file: {:?}", path);

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {:?}", path))?;
    let scene: SceneDescription = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scene file: {:?}", path))?;

    log::info!("Scene loaded: {} labels", scene.labels.len());
    Ok(scene)
}

/// Labels spread evenly on a horizontal ring around the origin
pub fn create_ring_scene(count: u32, radius: f32) -> SceneDescription {
    let labels = (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let position = Vec3::new(angle.sin() * radius, 0.0, angle.cos() * radius);
            let hue = (i as f32 * 0.618033988749895) % 1.0;
            let color = Rgba::from_rgb(hsv_to_rgb(hue, 0.6, 1.0), 0.0);
            TextLabel::new(format!("label {}", i), position, color)
        })
        .collect();

    SceneDescription {
        camera: CameraSettings::default(),
        fade: FadeConfig::default(),
        labels,
    }
}

/// Host-side runtime: one camera and a fade controller per label
#[derive(Debug)]
pub struct Stage {
    pub camera: Camera,
    controllers: Vec<FadeController<TextLabel>>,
}

impl Stage {
    pub fn new(description: SceneDescription) -> Result<Self, SceneError> {
        if description.labels.is_empty() {
            return Err(SceneError::Empty);
        }
        let camera = description.camera.build()?;
        let controllers = description
            .labels
            .into_iter()
            .zip(0u32..)
            .map(|(label, i)| FadeController::new(LabelId(i), description.fade, label))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            camera,
            controllers,
        })
    }

    /// Advance every controller by one frame, returning labels that completed
    pub fn tick(&mut self, dt: f32) -> Vec<LabelId> {
        let camera = &self.camera;
        self.controllers
            .iter_mut()
            .filter_map(|controller| controller.tick(camera, dt).then(|| controller.id()))
            .collect()
    }

    pub fn controllers(&self) -> &[FadeController<TextLabel>] {
        &self.controllers
    }

    pub fn all_latched(&self) -> bool {
        self.controllers.iter().all(|c| c.state().is_latched())
    }

    pub fn latched_count(&self) -> usize {
        self.controllers
            .iter()
            .filter(|c| c.state().is_latched())
            .count()
    }

    /// Labels that are potentially on screen this frame
    pub fn in_view_count(&self) -> usize {
        self.controllers
            .iter()
            .filter(|c| gaze::is_object_within_view(&self.camera, c.target()))
            .count()
    }

    pub fn fading_in_count(&self) -> usize {
        self.controllers
            .iter()
            .filter(|c| c.phase() == FadePhase::FadingIn)
            .count()
    }
}
