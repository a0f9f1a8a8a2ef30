pub mod opacity;
pub mod pose;
pub mod position;

pub use opacity::*;
pub use pose::*;
pub use position::*;
