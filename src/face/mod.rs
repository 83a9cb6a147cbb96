pub mod engine;
pub mod geometry;
pub mod markers;
pub mod mode;
pub mod paints;
pub mod renderer;
pub mod style;

pub use engine::WatchFaceEngine;
pub use geometry::{fraction_of_hour, SurfaceGeometry, MAX_SURFACE_DIMENSION};
pub use markers::{BitmapMarkers, HourMarkers, MarkerSprites, WedgeMarkers};
pub use mode::{DeviceProperties, DisplayMode, RenderMode};
pub use paints::FacePaints;
pub use renderer::{FaceRenderer, SpriteSet};
pub use style::WatchFaceStyle;
