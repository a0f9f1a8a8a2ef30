/// Tolerance used when deciding that an alpha value has reached its target
pub const ALPHA_EPSILON: f32 = 1e-5;

/// Float comparison scaled to the magnitude of the operands
pub fn approximately(a: f32, b: f32) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= ALPHA_EPSILON * scale
}
