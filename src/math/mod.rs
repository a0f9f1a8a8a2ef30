mod approx;
mod color;

pub use approx::{approximately, ALPHA_EPSILON};
pub use color::{hsv_to_rgb, Rgba};
