pub mod camera;
pub mod cli;
pub mod fade;
pub mod frame;
pub mod gaze;
pub mod label;
pub mod math;
pub mod scene;
pub mod traits;

pub use camera::Camera;
pub use fade::{FadeConfig, FadeController, FadeState, LabelId};
pub use gaze::Gaze;
pub use label::TextLabel;
pub use scene::{create_ring_scene, load_scene, SceneDescription, Stage};
