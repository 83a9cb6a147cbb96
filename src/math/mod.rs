mod color;
mod transform;

pub use color::{blend_over, desaturate, Color};
pub use transform::{rotation_about, TransformStack};
