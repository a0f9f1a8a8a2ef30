use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::Rgba;
use crate::traits::{OpacitySink, PositionProvider};

/// World-space text label whose color alpha is driven by a fade controller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub text: String,
    pub position: Vec3,
    #[serde(default)]
    pub color: Rgba,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, position: Vec3, color: Rgba) -> Self {
        Self {
            text: text.into(),
            position,
            color,
        }
    }
}

impl PositionProvider for TextLabel {
    fn world_position(&self) -> Vec3 {
        self.position
    }
}

impl OpacitySink for TextLabel {
    fn set_alpha(&mut self, alpha: f32) {
        self.color.set_alpha(alpha);
    }

    fn alpha(&self) -> f32 {
        self.color.alpha()
    }
}
