pub mod assets;
pub mod cli;
pub mod config;
pub mod core;
pub mod face;
pub mod math;
pub mod simulator;
pub mod traits;

pub use config::{FaceConfig, MarkerVariant};
pub use face::{FaceRenderer, WatchFaceEngine};
