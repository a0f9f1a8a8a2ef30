/// Writable opacity channel of a visual
pub trait OpacitySink {
    /// Replace the alpha channel, leaving color untouched
    fn set_alpha(&mut self, alpha: f32);

    /// Current alpha channel
    fn alpha(&self) -> f32;
}
