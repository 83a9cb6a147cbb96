pub mod canvas;
pub mod host;

pub use canvas::*;
pub use host::*;
